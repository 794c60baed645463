// User settings domain model
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Values offered by the refresh-rate selector.
pub const REFRESH_RATE_CHOICES_MS: [u64; 4] = [1000, 2000, 5000, 10000];

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("refresh rate must be greater than zero")]
    ZeroRefreshRate,
    #[error("refresh rate {0}ms is not one of the selectable rates")]
    UnsupportedRefreshRate(u64),
    #[error("unknown theme '{0}'")]
    UnknownTheme(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dark" => Ok(Theme::Dark),
            "light" => Ok(Theme::Light),
            other => Err(SettingsError::UnknownTheme(other.to_string())),
        }
    }
}

/// Poll interval in milliseconds. Never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshRate(u64);

impl RefreshRate {
    pub fn new(ms: u64) -> Result<Self, SettingsError> {
        if ms == 0 {
            return Err(SettingsError::ZeroRefreshRate);
        }
        Ok(Self(ms))
    }

    /// Only the values the selector offers.
    pub fn from_choice(ms: u64) -> Result<Self, SettingsError> {
        if !REFRESH_RATE_CHOICES_MS.contains(&ms) {
            return Err(SettingsError::UnsupportedRefreshRate(ms));
        }
        Self::new(ms)
    }

    pub fn as_millis(&self) -> u64 {
        self.0
    }

    pub fn as_duration(&self) -> Duration {
        Duration::from_millis(self.0)
    }
}

impl Default for RefreshRate {
    fn default() -> Self {
        Self(2000)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppSettings {
    pub theme: Theme,
    pub refresh_rate: RefreshRate,
    pub notifications_enabled: bool,
    pub last_notification_at_ms: Option<i64>,
}
