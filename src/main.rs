// Main entry point - Dependency injection and event loop startup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{sync::Arc, time::Duration};
use tracing_subscriber::EnvFilter;

use crate::application::dashboard_app::DashboardApp;
use crate::application::events::AppEvent;
use crate::application::notification_gate::NotificationGate;
use crate::application::settings_service::SettingsService;
use crate::domain::settings::RefreshRate;
use crate::infrastructure::clock::SystemClock;
use crate::infrastructure::config::load_dashboard_config;
use crate::infrastructure::file_storage::FileStorage;
use crate::infrastructure::http_sensor_api::HttpSensorApi;
use crate::infrastructure::notifier::TerminalNotifier;
use crate::presentation::commands::{HELP, spawn_stdin_reader};
use crate::presentation::console_view::ConsoleView;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = load_dashboard_config()?;

    // Initialize tracing; stdout belongs to the dashboard, logs go to stderr
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    // Anything that escapes a handler is logged, never shown raw
    std::panic::set_hook(Box::new(|info| {
        tracing::error!(panic = %info, "unhandled error");
    }));

    // Create adapters (infrastructure layer)
    let api = Arc::new(HttpSensorApi::new(
        &config.api.base_url,
        Duration::from_millis(config.api.timeout_ms),
    )?);
    let storage = Arc::new(FileStorage::open(&config.storage.path));
    let notifier = Arc::new(TerminalNotifier::new(config.notifications.permission));

    // Create services (application layer)
    let settings_service = SettingsService::new(storage);
    let settings = settings_service.load(
        RefreshRate::new(config.refresh.default_rate_ms)?,
        config.notifications.enabled,
    );
    let gate = NotificationGate::new(notifier, Arc::new(SystemClock));
    if settings.notifications_enabled {
        gate.request_permission();
    }

    let app = DashboardApp::new(
        api,
        gate,
        settings_service,
        Box::new(ConsoleView::new(std::io::stdout())),
        settings,
        config.charts.max_points,
    );

    // Wire input sources (presentation layer)
    spawn_stdin_reader(app.sender())?;
    let shutdown = app.sender();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = shutdown.send(AppEvent::Shutdown).await;
        }
    });

    tracing::info!(api = %config.api.base_url, "starting plant dashboard");
    println!("{}", HELP);

    app.run().await;

    Ok(())
}
