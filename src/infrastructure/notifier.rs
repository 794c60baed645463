// Terminal notifier - rings the bell and prints the alert
use crate::application::notification_gate::{NotificationPermission, Notifier};
use std::sync::Mutex;

/// Stands in for the desktop notification host. Permission starts at the
/// configured value; a request grants it unless it was configured as denied.
#[derive(Debug)]
pub struct TerminalNotifier {
    permission: Mutex<NotificationPermission>,
}

impl TerminalNotifier {
    pub fn new(permission: NotificationPermission) -> Self {
        Self {
            permission: Mutex::new(permission),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, NotificationPermission> {
        self.permission.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Notifier for TerminalNotifier {
    fn permission(&self) -> NotificationPermission {
        *self.lock()
    }

    fn request_permission(&self) -> NotificationPermission {
        let mut permission = self.lock();
        if *permission == NotificationPermission::Prompt {
            *permission = NotificationPermission::Granted;
            tracing::info!("notification permission granted");
        }
        *permission
    }

    fn notify(&self, title: &str, body: &str) {
        tracing::info!(title, body, "notification sent");
        println!("\x07{} {}", title, body);
    }
}
