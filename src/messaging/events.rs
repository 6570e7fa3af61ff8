/// Event types for the dashboard
///
/// Events represent things that have happened (past tense).
/// They are broadcast to all subscribers; the terminal view redraws on them.
use crate::playback::PlaybackMode;
use crate::state::{Alert, Section};

/// Dashboard events
#[derive(Debug, Clone)]
pub enum Event {
    /// A banner was raised
    AlertRaised(Alert),

    /// Visible banners were dismissed by the user
    AlertsDismissed,

    /// A polling tick rendered new sensor values
    DashboardUpdated,

    /// Sleep chart or history table was (re)loaded
    SleepHistoryLoaded,

    /// Settings form was filled from the server
    PreferencesLoaded,

    /// A settings form field changed locally
    SettingsEdited,

    /// User switched between dashboard and settings
    SectionChanged { section: Section },

    /// A playback session began
    PlaybackStarted {
        sound_id: String,
        mode: PlaybackMode,
    },

    /// The playback session ended (manual stop, auto-stop or replacement)
    PlaybackStopped { sound_id: String },

    /// User asked for the command list
    HelpRequested,

    /// The prompt line was edited
    InputChanged,

    /// Application is shutting down
    Shutdown,
}

impl Event {
    /// Get a human-readable description of the event
    pub fn description(&self) -> String {
        match self {
            Event::AlertRaised(alert) => {
                format!("Alert ({}): {}", alert.level.label(), alert.message)
            }
            Event::AlertsDismissed => "Alerts dismissed".to_string(),
            Event::DashboardUpdated => "Dashboard updated".to_string(),
            Event::SleepHistoryLoaded => "Sleep history loaded".to_string(),
            Event::PreferencesLoaded => "Preferences loaded".to_string(),
            Event::SettingsEdited => "Settings edited".to_string(),
            Event::SectionChanged { section } => format!("Section: {}", section.title()),
            Event::PlaybackStarted { sound_id, mode } => {
                format!("Playing {} ({})", sound_id, mode)
            }
            Event::PlaybackStopped { sound_id } => format!("Stopped {}", sound_id),
            Event::HelpRequested => "Help requested".to_string(),
            Event::InputChanged => "Input changed".to_string(),
            Event::Shutdown => "Shutting down".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_event_description() {
        let event = Event::PlaybackStopped {
            sound_id: "rain".to_string(),
        };
        assert_eq!(event.description(), "Stopped rain");

        let event = Event::PlaybackStarted {
            sound_id: "ocean".to_string(),
            mode: PlaybackMode::Preview {
                duration: Duration::from_secs(5),
            },
        };
        assert_eq!(event.description(), "Playing ocean (preview 5s)");
    }
}
