/// Command types for the dashboard
///
/// Commands represent requests to perform actions (imperative).
/// They are parsed from terminal input and executed by the UI controller.
use crate::error::CommandError;

/// Settings form checkbox
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    AdaptiveLight,
    AutoTemp,
    SleepNotifications,
}

impl Toggle {
    fn parse(value: &str) -> Option<Self> {
        match value {
            "adaptive-light" | "auto-light" => Some(Toggle::AdaptiveLight),
            "auto-temp" => Some(Toggle::AutoTemp),
            "sleep-notifications" | "notifications" => Some(Toggle::SleepNotifications),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Toggle::AdaptiveLight => "Adaptive lighting",
            Toggle::AutoTemp => "Auto temperature",
            Toggle::SleepNotifications => "Sleep notifications",
        }
    }
}

/// Dashboard commands
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Show the live dashboard
    ShowDashboard,

    /// Show the settings form (reloads preferences)
    ShowSettings,

    /// Select a sound card and preview it
    SelectSound { sound_id: String },

    /// Preview a sound without selecting it
    PreviewSound { sound_id: String },

    /// Point the custom sound card at another id and select it
    SetCustomSound { sound_id: String },

    /// Temperature slider input
    SetIdealTemp(f64),

    /// Light slider input
    SetMaxLight(f64),

    /// Sound duration field input
    SetSoundDuration(u64),

    /// Flip a settings checkbox
    Toggle(Toggle),

    /// Play the selected sound for the form duration
    TestSound,

    /// Stop any playing sound
    StopSound,

    /// Save selected sound and duration
    SaveSoundPreferences,

    /// Save environment preferences form
    SaveEnvironmentPreferences,

    /// Reload sleep chart and history table
    RefreshHistory,

    /// Dismiss visible banners
    DismissAlerts,

    Help,

    Quit,
}

fn required<'a>(arg: Option<&'a str>, command: &'static str) -> Result<&'a str, CommandError> {
    arg.ok_or(CommandError::MissingArgument(command))
}

fn number(arg: Option<&str>, command: &'static str) -> Result<f64, CommandError> {
    let raw = required(arg, command)?;
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| CommandError::InvalidValue {
            command,
            value: raw.to_string(),
        })
}

impl Command {
    /// Parse a line of terminal input
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let mut parts = line.split_whitespace();
        let name = parts
            .next()
            .ok_or_else(|| CommandError::Unknown(String::new()))?;
        let arg = parts.next();

        let command = match name {
            "dashboard" | "d" => Command::ShowDashboard,
            "settings" | "s" => Command::ShowSettings,
            "select" => Command::SelectSound {
                sound_id: required(arg, "select")?.to_string(),
            },
            "preview" | "play" => Command::PreviewSound {
                sound_id: required(arg, "preview")?.to_string(),
            },
            "custom" => Command::SetCustomSound {
                sound_id: required(arg, "custom")?.to_string(),
            },
            "temp" => Command::SetIdealTemp(number(arg, "temp")?),
            "light" => Command::SetMaxLight(number(arg, "light")?),
            "duration" => {
                let raw = required(arg, "duration")?;
                let secs = raw.parse::<u64>().map_err(|_| CommandError::InvalidValue {
                    command: "duration",
                    value: raw.to_string(),
                })?;
                Command::SetSoundDuration(secs)
            }
            "toggle" => {
                let raw = required(arg, "toggle")?;
                let toggle = Toggle::parse(raw).ok_or_else(|| CommandError::InvalidValue {
                    command: "toggle",
                    value: raw.to_string(),
                })?;
                Command::Toggle(toggle)
            }
            "test" => Command::TestSound,
            "stop" => Command::StopSound,
            "save-sound" => Command::SaveSoundPreferences,
            "save-env" => Command::SaveEnvironmentPreferences,
            "refresh" => Command::RefreshHistory,
            "dismiss" => Command::DismissAlerts,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };

        Ok(command)
    }

    /// Get a human-readable description of the command
    pub fn description(&self) -> String {
        match self {
            Command::ShowDashboard => "Show dashboard".to_string(),
            Command::ShowSettings => "Show settings".to_string(),
            Command::SelectSound { sound_id } => format!("Select sound: {}", sound_id),
            Command::PreviewSound { sound_id } => format!("Preview sound: {}", sound_id),
            Command::SetCustomSound { sound_id } => format!("Custom sound: {}", sound_id),
            Command::SetIdealTemp(v) => format!("Ideal temperature: {}", v),
            Command::SetMaxLight(v) => format!("Max light: {}", v),
            Command::SetSoundDuration(v) => format!("Sound duration: {}s", v),
            Command::Toggle(t) => format!("Toggle: {}", t.label()),
            Command::TestSound => "Test sound".to_string(),
            Command::StopSound => "Stop sound".to_string(),
            Command::SaveSoundPreferences => "Save sound preferences".to_string(),
            Command::SaveEnvironmentPreferences => "Save environment preferences".to_string(),
            Command::RefreshHistory => "Refresh sleep history".to_string(),
            Command::DismissAlerts => "Dismiss alerts".to_string(),
            Command::Help => "Help".to_string(),
            Command::Quit => "Quit application".to_string(),
        }
    }
}

pub const HELP_TEXT: &str = "\
Commands:
  dashboard | settings           switch section
  select <id>                    select a sound card and preview it
  preview <id>                   preview a sound (5s)
  custom <id>                    use a custom sound id
  temp <c> | light <pct>         move the preference sliders
  duration <secs>                sound duration
  toggle adaptive-light|auto-temp|sleep-notifications
  test | stop                    play the selected sound / stop playback
  save-sound | save-env          save preferences
  refresh                        reload sleep chart and history
  dismiss                        hide banners
  quit | Ctrl-C                  exit";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_navigation_and_sound_commands() {
        assert_eq!(Command::parse("settings").unwrap(), Command::ShowSettings);
        assert_eq!(Command::parse("  d ").unwrap(), Command::ShowDashboard);
        assert_eq!(
            Command::parse("select rain").unwrap(),
            Command::SelectSound {
                sound_id: "rain".to_string()
            }
        );
        assert_eq!(Command::parse("stop").unwrap(), Command::StopSound);
    }

    #[test]
    fn test_parse_form_inputs() {
        assert_eq!(Command::parse("temp 19.5").unwrap(), Command::SetIdealTemp(19.5));
        assert_eq!(Command::parse("duration 30").unwrap(), Command::SetSoundDuration(30));
        assert_eq!(
            Command::parse("toggle auto-temp").unwrap(),
            Command::Toggle(Toggle::AutoTemp)
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            Command::parse("select"),
            Err(CommandError::MissingArgument("select"))
        );
        assert_eq!(
            Command::parse("temp warm"),
            Err(CommandError::InvalidValue {
                command: "temp",
                value: "warm".to_string()
            })
        );
        assert_eq!(
            Command::parse("duration -3"),
            Err(CommandError::InvalidValue {
                command: "duration",
                value: "-3".to_string()
            })
        );
        assert!(matches!(Command::parse("dance"), Err(CommandError::Unknown(_))));
        assert!(Command::parse("toggle lasers").is_err());
    }

    #[test]
    fn test_command_description() {
        assert_eq!(Command::StopSound.description(), "Stop sound");
        assert_eq!(
            Command::SaveSoundPreferences.description(),
            "Save sound preferences"
        );
    }
}
