/// Dashboard polling loop
pub mod poller;

pub use poller::{DashboardPoller, PollerSettings, TickOutcome, SLEEP_SOUND_NOTICE};
