/// State management module
///
/// Status rules, transient banners and the view model shared between the
/// poller, the UI controller and the terminal view.

pub mod alerts;
pub mod status;
pub mod view_model;

// Re-export commonly used types
pub use alerts::{Alert, AlertCenter, AlertLevel};
pub use status::{
    EnvironmentStatus, LightControlStatus, LightStatus, Occupancy, TemperatureControlStatus,
    TemperatureStatus,
};
pub use view_model::{
    ControlView, DashboardPanel, ReadingView, Section, SettingsForm, SharedViewModel, ViewModel,
};
