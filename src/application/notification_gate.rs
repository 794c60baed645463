// Notification gate - decides whether a reading deserves a desktop alert
use crate::domain::sensor::SensorReading;
use crate::domain::settings::AppSettings;
use serde::Deserialize;
use std::sync::Arc;

/// Minimum time between two notifications, shared by every plant.
pub const THROTTLE_WINDOW_MS: i64 = 30_000;

/// Readings at or below this dominant magnitude are considered silence.
pub const MAGNITUDE_THRESHOLD: f64 = 0.1;

pub const NOTIFICATION_TITLE: &str = "🌱 Your plant is talking!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationPermission {
    Granted,
    Denied,
    Prompt,
}

/// Host notification facility. The host decides whether permission is granted.
pub trait Notifier: Send + Sync {
    fn permission(&self) -> NotificationPermission;
    fn request_permission(&self) -> NotificationPermission;
    fn notify(&self, title: &str, body: &str);
}

pub trait Clock: Send + Sync {
    /// Wall clock in epoch milliseconds.
    fn now_ms(&self) -> i64;
}

#[derive(Clone)]
pub struct NotificationGate {
    notifier: Arc<dyn Notifier>,
    clock: Arc<dyn Clock>,
}

impl NotificationGate {
    pub fn new(notifier: Arc<dyn Notifier>, clock: Arc<dyn Clock>) -> Self {
        Self { notifier, clock }
    }

    pub fn request_permission(&self) -> NotificationPermission {
        self.notifier.request_permission()
    }

    /// Fires at most one notification per throttle window and records the firing
    /// time in `settings`. Returns whether a notification was emitted.
    pub fn maybe_notify(&self, reading: &SensorReading, settings: &mut AppSettings) -> bool {
        if !settings.notifications_enabled {
            return false;
        }
        if self.notifier.permission() != NotificationPermission::Granted {
            return false;
        }
        if !reading.is_online() || reading.dominant_magnitude <= MAGNITUDE_THRESHOLD {
            return false;
        }

        let now = self.clock.now_ms();
        if let Some(last) = settings.last_notification_at_ms {
            let elapsed_ms = now.saturating_sub(last);
            if elapsed_ms <= THROTTLE_WINDOW_MS {
                tracing::debug!(elapsed_ms, "notification throttled");
                return false;
            }
        }

        let body = format!(
            "{} is communicating at {:.1} Hz",
            reading.plant_name, reading.dominant_frequency
        );
        self.notifier.notify(NOTIFICATION_TITLE, &body);
        settings.last_notification_at_ms = Some(now);
        true
    }
}
