// Settings service - loads and persists user settings through key/value storage
use crate::domain::settings::{AppSettings, RefreshRate, Theme};
use std::sync::Arc;

pub const THEME_KEY: &str = "theme";
pub const LAST_NOTIFICATION_KEY: &str = "lastNotification";

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("failed to write settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode settings: {0}")]
    Encode(#[from] toml::ser::Error),
}

/// String-keyed persistent storage, the same shape as browser local storage.
pub trait SettingsStorage: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

#[derive(Clone)]
pub struct SettingsService {
    storage: Arc<dyn SettingsStorage>,
}

impl SettingsService {
    pub fn new(storage: Arc<dyn SettingsStorage>) -> Self {
        Self { storage }
    }

    /// Theme and throttle clock come from storage; refresh rate and the
    /// notification toggle start from the configured defaults.
    pub fn load(&self, refresh_rate: RefreshRate, notifications_enabled: bool) -> AppSettings {
        let theme = match self.storage.get(THEME_KEY) {
            Some(raw) => raw.parse::<Theme>().unwrap_or_else(|e| {
                tracing::warn!(error = %e, "ignoring stored theme");
                Theme::default()
            }),
            None => Theme::default(),
        };

        let last_notification_at_ms = self
            .storage
            .get(LAST_NOTIFICATION_KEY)
            .and_then(|raw| match raw.trim().parse::<i64>() {
                Ok(ms) if ms >= 0 => Some(ms),
                Ok(ms) => {
                    tracing::warn!(value = ms, "ignoring negative notification timestamp");
                    None
                }
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        value = %raw,
                        "ignoring stored notification timestamp"
                    );
                    None
                }
            });

        AppSettings {
            theme,
            refresh_rate,
            notifications_enabled,
            last_notification_at_ms,
        }
    }

    pub fn save_theme(&self, theme: Theme) -> Result<(), StorageError> {
        self.storage.set(THEME_KEY, theme.as_str())
    }

    pub fn save_last_notification(&self, at_ms: i64) -> Result<(), StorageError> {
        self.storage.set(LAST_NOTIFICATION_KEY, &at_ms.to_string())
    }
}
