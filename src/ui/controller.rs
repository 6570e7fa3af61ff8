use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::{debug, info};

use crate::api::SoundPreferencesUpdate;
use crate::dashboard::DashboardPoller;
use crate::messaging::{Command, Event, EventBus, Toggle};
use crate::playback::SoundPlaybackController;
use crate::preferences::PreferencesStore;
use crate::state::{AlertCenter, Section, SharedViewModel};

/// Whether the command loop should keep reading input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

#[derive(Clone)]
pub struct UiController {
    inner: Arc<UiInner>,
}

struct UiInner {
    view: SharedViewModel,
    playback: SoundPlaybackController,
    preferences: PreferencesStore,
    poller: DashboardPoller,
    alerts: AlertCenter,
    bus: EventBus,
    preview: Duration,
}

impl UiController {
    pub fn new(
        view: SharedViewModel,
        playback: SoundPlaybackController,
        preferences: PreferencesStore,
        poller: DashboardPoller,
        alerts: AlertCenter,
        bus: EventBus,
        preview: Duration,
    ) -> Self {
        Self {
            inner: Arc::new(UiInner {
                view,
                playback,
                preferences,
                poller,
                alerts,
                bus,
                preview,
            }),
        }
    }

    pub fn view(&self) -> SharedViewModel {
        Arc::clone(&self.inner.view)
    }

    /// Parse and run one line of terminal input. Bad input becomes a warning banner.
    pub fn handle_line(&self, line: &str) -> Flow {
        if line.trim().is_empty() {
            return Flow::Continue;
        }
        match Command::parse(line) {
            Ok(command) => self.handle(command),
            Err(e) => {
                self.inner.alerts.warning(format!("{}. Type 'help' for commands.", e));
                Flow::Continue
            }
        }
    }

    /// Edit the prompt line; Enter runs it, Esc clears it and Ctrl-C quits
    pub fn handle_key(&self, key: KeyEvent) -> Flow {
        if key.kind != KeyEventKind::Press {
            return Flow::Continue;
        }

        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return self.handle(Command::Quit);
            }
            KeyCode::Enter => {
                let line = std::mem::take(&mut self.inner.view.write().input);
                self.inner.bus.publish(Event::InputChanged);
                return self.handle_line(&line);
            }
            KeyCode::Char(c) => self.inner.view.write().input.push(c),
            KeyCode::Backspace => {
                self.inner.view.write().input.pop();
            }
            KeyCode::Esc => self.inner.view.write().input.clear(),
            _ => return Flow::Continue,
        }

        self.inner.bus.publish(Event::InputChanged);
        Flow::Continue
    }

    pub fn handle(&self, command: Command) -> Flow {
        debug!("Command: {}", command.description());

        match command {
            Command::ShowDashboard => self.show_section(Section::Dashboard),
            Command::ShowSettings => {
                self.show_section(Section::Settings);
                if let Some(prefs) = self.inner.preferences.load_preferences() {
                    self.inner.playback.set_ui_duration(Some(prefs.sound_duration));
                }
            }
            Command::SelectSound { sound_id } => {
                if self.inner.view.write().settings.select_sound(&sound_id) {
                    self.edited();
                    self.preview(&sound_id);
                } else {
                    self.inner
                        .alerts
                        .warning(format!("Unknown sound: {}", sound_id));
                }
            }
            Command::PreviewSound { sound_id } => self.preview(&sound_id),
            Command::SetCustomSound { sound_id } => {
                self.inner.view.write().settings.set_custom_sound(&sound_id);
                info!("Custom sound set to {}", sound_id);
                self.edited();
            }
            Command::SetIdealTemp(value) => {
                self.inner.view.write().settings.ideal_temp = value;
                self.edited();
            }
            Command::SetMaxLight(value) => {
                self.inner.view.write().settings.max_light = value;
                self.edited();
            }
            Command::SetSoundDuration(secs) => {
                self.inner.view.write().settings.sound_duration = secs;
                self.inner.playback.set_ui_duration(Some(secs));
                self.edited();
            }
            Command::Toggle(toggle) => {
                {
                    let mut view = self.inner.view.write();
                    let form = &mut view.settings;
                    let field = match toggle {
                        Toggle::AdaptiveLight => &mut form.adaptive_light,
                        Toggle::AutoTemp => &mut form.auto_temp,
                        Toggle::SleepNotifications => &mut form.sleep_notifications,
                    };
                    *field = !*field;
                }
                self.edited();
            }
            Command::TestSound => self.test_sound(),
            Command::StopSound => {
                self.inner.playback.stop();
                self.inner.alerts.info("Sound stopped.");
            }
            Command::SaveSoundPreferences => self.save_sound(),
            Command::SaveEnvironmentPreferences => {
                let update = self.inner.view.read().settings.environment_update();
                // The store already raised a banner for failures
                let _ = self.inner.preferences.save_environment_preferences(&update);
            }
            Command::RefreshHistory => self.inner.poller.load_sleep_data(),
            Command::DismissAlerts => self.inner.alerts.dismiss_all(),
            Command::Help => self.inner.bus.publish(Event::HelpRequested),
            Command::Quit => {
                info!("Quit requested");
                self.inner.playback.stop();
                self.inner.bus.publish(Event::Shutdown);
                return Flow::Quit;
            }
        }

        Flow::Continue
    }

    fn show_section(&self, section: Section) {
        self.inner.view.write().section = section;
        self.inner.bus.publish(Event::SectionChanged { section });
    }

    fn edited(&self) {
        self.inner.bus.publish(Event::SettingsEdited);
    }

    fn preview(&self, sound_id: &str) {
        // Failures already surface as a danger banner
        let _ = self.inner.playback.play(sound_id, Some(self.inner.preview));
    }

    fn test_sound(&self) {
        let (selected, duration) = {
            let view = self.inner.view.read();
            (
                view.settings.selected_sound.clone(),
                view.settings.sound_duration,
            )
        };

        match selected {
            Some(sound_id) => {
                self.inner
                    .alerts
                    .info(format!("Playing sound for {} seconds...", duration));
                self.inner.playback.set_ui_duration(Some(duration));
                let _ = self.inner.playback.play(&sound_id, None);
            }
            None => {
                self.inner.alerts.warning("Please select a sound first.");
            }
        }
    }

    fn save_sound(&self) {
        let update = {
            let view = self.inner.view.read();
            view.settings
                .selected_sound
                .clone()
                .map(|sound_id| SoundPreferencesUpdate {
                    sound_id,
                    duration: view.settings.sound_duration,
                })
        };

        match update {
            Some(update) => {
                let _ = self.inner.preferences.save_sound_preferences(&update);
            }
            None => {
                self.inner.alerts.warning("Please select a sound.");
            }
        }
    }
}
