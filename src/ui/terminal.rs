use std::io::{self, Write};

use crossterm::{cursor, style, terminal, ExecutableCommand, QueueableCommand};

/// Raw-mode alternate screen the dashboard draws into
///
/// The terminal is restored when the value is dropped. `install_panic_hook`
/// covers the case where a thread panics while the screen is still up.
pub struct Tui {
    stdout: io::Stdout,
}

impl Tui {
    pub fn setup() -> io::Result<Self> {
        let mut stdout = io::stdout();
        terminal::enable_raw_mode()?;
        stdout.execute(terminal::EnterAlternateScreen)?;
        Ok(Self { stdout })
    }

    pub fn draw(&mut self, screen: &str) -> io::Result<()> {
        queue_screen(&mut self.stdout, screen)?;
        self.stdout.flush()
    }

    fn teardown(&mut self) {
        restore(&mut self.stdout);
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        self.teardown();
    }
}

fn restore(stdout: &mut io::Stdout) {
    let _ = stdout.execute(cursor::Show);
    let _ = stdout.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();
    let _ = stdout.flush();
}

/// Put the terminal back before the default hook prints the panic message
pub fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        restore(&mut io::stdout());
        original_hook(panic_info);
    }));
}

/// Clear and queue the screen text line by line.
///
/// Raw mode does not turn `\n` into a carriage return, so lines are
/// separated with cursor moves. The cursor ends after the last line (the prompt).
pub fn queue_screen<W: Write>(out: &mut W, screen: &str) -> io::Result<()> {
    out.queue(cursor::MoveTo(0, 0))?;
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let mut lines = screen.split('\n').peekable();
    while let Some(line) = lines.next() {
        out.queue(style::Print(line))?;
        if lines.peek().is_some() {
            out.queue(cursor::MoveToNextLine(1))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_lines_use_cursor_moves() {
        let mut out = Vec::new();
        queue_screen(&mut out, "Smart Bedroom\nTemperature  19.0°C\n> stop").unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Smart Bedroom"));
        assert!(text.contains("Temperature  19.0°C"));
        assert!(text.ends_with("> stop"));
        assert!(!text.contains('\n'));
    }
}
