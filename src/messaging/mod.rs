/// Messaging module for Event/Command architecture
///
/// - **Events**: notifications of things that happened (past tense, broadcast)
/// - **Commands**: requests typed at the terminal (imperative, targeted)
///
/// ```text
/// ┌──────────┐  Command   ┌──────────────┐
/// │ Terminal │ ─────────> │ UiController │ ──┐
/// └──────────┘            └──────────────┘   │ Event   ┌───────────┐    ┌──────────┐
///                         ┌──────────────┐   ├───────> │ Event Bus │ ─> │ Terminal │
/// ┌──────────┐   tick     │    Poller    │ ──┘         └───────────┘    │   View   │
/// │  Ticker  │ ─────────> │              │                              └──────────┘
/// └──────────┘            └──────────────┘
/// ```
pub mod bus;
pub mod commands;
pub mod events;

pub use bus::{EventBus, SubscriberId};
pub use commands::{Command, Toggle, HELP_TEXT};
pub use events::Event;
