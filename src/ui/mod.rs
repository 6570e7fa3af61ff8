/// Terminal user interface
///
/// `UiController` turns keys and typed commands into actions, `render` turns
/// the view model into text and `TerminalRenderer` redraws on every bus event.
pub mod controller;
pub mod render;
pub mod renderer;
pub mod terminal;

pub use controller::{Flow, UiController};
pub use renderer::TerminalRenderer;
pub use terminal::{install_panic_hook, Tui};
