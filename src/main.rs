use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use crossbeam_channel::bounded;
use crossterm::event;
use sysinfo::System;
use tracing_subscriber::{reload, EnvFilter, Registry};

use bedroom_dashboard::api::{DashboardApi, HttpApiClient};
use bedroom_dashboard::audio_system::RodioBackend;
use bedroom_dashboard::config::{Config, APP_DIR_NAME};
use bedroom_dashboard::dashboard::{DashboardPoller, PollerSettings};
use bedroom_dashboard::error::AppResult;
use bedroom_dashboard::messaging::{Command, EventBus};
use bedroom_dashboard::playback::SoundPlaybackController;
use bedroom_dashboard::preferences::PreferencesStore;
use bedroom_dashboard::state::{AlertCenter, ViewModel};
use bedroom_dashboard::ui::{install_panic_hook, Flow, TerminalRenderer, Tui, UiController};

const LOG_TARGET_STARTUP: &str = "bedroom_dashboard::startup";

#[derive(Parser, Debug)]
#[command(
    name = "bedroom-dashboard",
    version,
    about = "Terminal dashboard for the smart bedroom server"
)]
struct CliArgs {
    /// Config file to use instead of the one in the app directory
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Server base URL, overrides `server_url` from the config
    #[arg(long, value_name = "URL")]
    server: Option<String>,
}

type FilterHandle = reload::Handle<EnvFilter, Registry>;

/// File-only logging; the terminal belongs to the dashboard.
///
/// Starts at `RUST_LOG` or info so config loading is logged; the config's
/// level is applied afterwards through the returned handle.
fn initialize_tracing() -> FilterHandle {
    use tracing_appender::rolling;
    use tracing_subscriber::{fmt, prelude::*};

    let log_dir = Config::app_dir()
        .map(|dir| dir.join("logs"))
        .unwrap_or_else(|_| PathBuf::from(APP_DIR_NAME).join("logs"));

    if let Err(e) = std::fs::create_dir_all(&log_dir) {
        eprintln!("Warning: Failed to create log directory: {}", e);
    }

    let file_appender = rolling::daily(&log_dir, "bedroom-dashboard.log");

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let (filter, handle) = reload::Layer::new(filter);

    let file_layer = fmt::layer()
        .with_writer(file_appender)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .init();

    handle
}

/// `RUST_LOG` wins over the config's `log_level`
fn apply_log_level(handle: &FilterHandle, level: &str) {
    if std::env::var_os(EnvFilter::DEFAULT_ENV).is_some() {
        return;
    }
    match EnvFilter::try_new(level) {
        Ok(filter) => {
            if let Err(e) = handle.reload(filter) {
                tracing::warn!("Failed to apply log level {}: {}", level, e);
            }
        }
        Err(e) => tracing::warn!("Invalid log level {}: {}", level, e),
    }
}

fn log_runtime_environment() {
    let version = env!("CARGO_PKG_VERSION");
    let os_name = System::long_os_version()
        .or_else(System::name)
        .unwrap_or_else(|| "Unknown OS".to_string());
    let kernel = System::kernel_version().unwrap_or_else(|| "Unknown Kernel".to_string());
    let architecture = std::env::consts::ARCH;

    tracing::info!(target: LOG_TARGET_STARTUP, "Starting Bedroom Dashboard v{} on ({})", version, architecture);
    tracing::info!(target: LOG_TARGET_STARTUP, "Operating System: {} (kernel {})", os_name, kernel);
}

fn load_config(args: &CliArgs) -> AppResult<Config> {
    let mut config = match &args.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("Failed to load configuration")?;

    if let Some(server) = &args.server {
        config.server_url = server.clone();
        config.validate().context("Invalid --server URL")?;
    }

    Ok(config)
}

fn run(config: Config) -> AppResult<()> {
    tracing::info!(target: LOG_TARGET_STARTUP, "Server: {}", config.server_url);

    let bus = EventBus::new();
    let alerts = AlertCenter::new(bus.clone(), config.alert_dismiss_after());
    let view = ViewModel::shared(config.sounds.clone());

    let client = HttpApiClient::new(&config.server_url, config.request_timeout());
    let api: Arc<dyn DashboardApi> = Arc::new(client.clone());

    let backend = RodioBackend::new(client, config.volume).context("Failed to start audio")?;
    let playback = SoundPlaybackController::new(
        Arc::new(backend),
        alerts.clone(),
        bus.clone(),
        Duration::from_secs(config.default_preview_secs),
        Duration::from_secs(config.sleep_loop_threshold_secs),
    );

    let preferences =
        PreferencesStore::new(Arc::clone(&api), view.clone(), alerts.clone(), bus.clone());
    let poller = DashboardPoller::new(
        Arc::clone(&api),
        playback.clone(),
        view.clone(),
        alerts.clone(),
        bus.clone(),
        PollerSettings {
            interval: config.poll_interval(),
            occupancy_threshold: config.occupancy_threshold,
            history_days: config.history_days,
        },
    );
    let ui = UiController::new(
        view.clone(),
        playback.clone(),
        preferences.clone(),
        poller.clone(),
        alerts.clone(),
        bus.clone(),
        Duration::from_secs(config.default_preview_secs),
    );

    // Fill the form so `test` and `save-sound` work before visiting settings
    if let Some(prefs) = preferences.load_preferences() {
        playback.set_ui_duration(Some(prefs.sound_duration));
    }

    let (shutdown_tx, shutdown_rx) = bounded::<()>(1);
    let poller = poller
        .spawn(shutdown_rx)
        .context("Failed to spawn poller thread")?;

    let tui = Tui::setup().context("Failed to set up the terminal")?;
    install_panic_hook();
    let renderer = TerminalRenderer::new(view, alerts, playback, bus)
        .spawn(tui)
        .context("Failed to spawn renderer thread")?;

    let input = read_keys(&ui);
    if let Err(e) = &input {
        tracing::error!("Terminal input failed: {:#}", e);
        ui.handle(Command::Quit);
    }

    tracing::info!("Shutting down");
    drop(shutdown_tx);
    if poller.join().is_err() {
        tracing::error!("Poller thread panicked");
    }
    if renderer.join().is_err() {
        tracing::error!("Renderer thread panicked");
    }

    input
}

/// Feed key presses to the UI until a command quits
fn read_keys(ui: &UiController) -> AppResult<()> {
    loop {
        if let event::Event::Key(key) = event::read().context("Failed to read terminal input")? {
            if ui.handle_key(key) == Flow::Quit {
                return Ok(());
            }
        }
    }
}

fn main() -> AppResult<()> {
    let args = CliArgs::parse();

    let log_filter = initialize_tracing();
    log_runtime_environment();

    let config = load_config(&args)?;
    apply_log_level(&log_filter, &config.log_level);

    run(config)
}
