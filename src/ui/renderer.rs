use std::io;
use std::thread;
use std::time::Duration;

use crossbeam_channel::{select, tick};

use crate::messaging::{Event, EventBus, HELP_TEXT};
use crate::playback::SoundPlaybackController;
use crate::state::{AlertCenter, SharedViewModel};

use super::render::render_screen;
use super::terminal::Tui;

/// Interval for re-checking banner expiry between events
const BANNER_CHECK: Duration = Duration::from_secs(1);

/// Redraws the terminal whenever something on the bus changes
pub struct TerminalRenderer {
    view: SharedViewModel,
    alerts: AlertCenter,
    playback: SoundPlaybackController,
    bus: EventBus,
}

impl TerminalRenderer {
    pub fn new(
        view: SharedViewModel,
        alerts: AlertCenter,
        playback: SoundPlaybackController,
        bus: EventBus,
    ) -> Self {
        Self {
            view,
            alerts,
            playback,
            bus,
        }
    }

    /// Full screen text for the current state
    pub fn compose(&self, show_help: bool) -> String {
        let alerts = self.alerts.visible();
        let playing = self.playback.current();
        let mut screen = {
            let view = self.view.read();
            render_screen(&view, &alerts, playing.as_ref())
        };
        if show_help {
            screen.insert_str(0, &format!("{}\n\n", HELP_TEXT));
        }
        screen
    }

    fn draw(&self, tui: &mut Tui, show_help: bool) {
        if let Err(e) = tui.draw(&self.compose(show_help)) {
            tracing::warn!("Failed to draw dashboard: {}", e);
        }
    }

    /// Subscribe to the bus and draw until `Event::Shutdown`.
    /// The terminal is restored when the thread ends.
    pub fn spawn(self, mut tui: Tui) -> io::Result<thread::JoinHandle<()>> {
        let (events, subscriber) = self.bus.subscribe();

        thread::Builder::new()
            .name("renderer".to_string())
            .spawn(move || {
                let expiry = tick(BANNER_CHECK);
                let mut show_help = false;
                let mut banners = self.alerts.visible().len();
                self.draw(&mut tui, show_help);

                loop {
                    select! {
                        recv(events) -> event => match event {
                            Ok(Event::Shutdown) | Err(_) => break,
                            Ok(event) => {
                                tracing::trace!("Redraw: {}", event.description());
                                match event {
                                    Event::HelpRequested => show_help = true,
                                    Event::SectionChanged { .. } => show_help = false,
                                    _ => {}
                                }
                                banners = self.alerts.visible().len();
                                self.draw(&mut tui, show_help);
                            }
                        },
                        recv(expiry) -> _ => {
                            let visible = self.alerts.visible().len();
                            if visible != banners {
                                banners = visible;
                                self.draw(&mut tui, show_help);
                            }
                        }
                    }
                }

                self.bus.unsubscribe(subscriber);
                drop(tui);
                tracing::debug!("Renderer stopped");
            })
    }
}
