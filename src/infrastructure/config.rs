use crate::application::notification_gate::NotificationPermission;
use serde::Deserialize;

pub const DEFAULT_CONFIG_PATH: &str = "config/dashboard";
pub const CONFIG_PATH_ENV: &str = "PLANT_DASHBOARD_CONFIG";
const ENV_PREFIX: &str = "PLANT_DASHBOARD";

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardConfig {
    pub api: ApiSettings,
    pub refresh: RefreshSettings,
    pub charts: ChartSettings,
    pub notifications: NotificationSettings,
    pub storage: StorageSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    pub timeout_ms: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RefreshSettings {
    pub default_rate_ms: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChartSettings {
    /// Most recent history points drawn on the magnitude chart.
    pub max_points: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct NotificationSettings {
    pub enabled: bool,
    pub permission: NotificationPermission,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageSettings {
    pub path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingSettings {
    pub level: String,
}

/// Reads the file named by `PLANT_DASHBOARD_CONFIG`, or `config/dashboard`.
pub fn load_dashboard_config() -> anyhow::Result<DashboardConfig> {
    let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let settings = builder(&path)?
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    validate(settings.try_deserialize()?)
}

/// Defaults overlaid with an optional config file.
fn builder(path: &str) -> anyhow::Result<config::ConfigBuilder<config::builder::DefaultState>> {
    Ok(config::Config::builder()
        .set_default("api.base_url", "http://localhost:5000/api/sensor")?
        .set_default("api.timeout_ms", 5000_i64)?
        .set_default("refresh.default_rate_ms", 2000_i64)?
        .set_default("charts.max_points", 20_i64)?
        .set_default("notifications.enabled", false)?
        .set_default("notifications.permission", "prompt")?
        .set_default("storage.path", "dashboard-state.toml")?
        .set_default("logging.level", "info")?
        .add_source(config::File::with_name(path).required(false)))
}

fn validate(config: DashboardConfig) -> anyhow::Result<DashboardConfig> {
    if config.refresh.default_rate_ms == 0 {
        anyhow::bail!("refresh.default_rate_ms must be greater than zero");
    }
    if config.charts.max_points == 0 {
        anyhow::bail!("charts.max_points must be greater than zero");
    }
    if config.api.base_url.trim().is_empty() {
        anyhow::bail!("api.base_url must not be empty");
    }
    Ok(config)
}
