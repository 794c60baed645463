// Connectivity indicator state
use crate::domain::view::ConnectionStatus;

/// Written only by the poll cycle. Starts in `Connecting` and has no terminal state.
#[derive(Debug, Clone)]
pub struct StatusIndicator {
    current: ConnectionStatus,
}

impl StatusIndicator {
    pub fn new() -> Self {
        Self {
            current: ConnectionStatus::Connecting,
        }
    }

    #[cfg(test)]
    pub fn current(&self) -> ConnectionStatus {
        self.current
    }

    #[cfg(test)]
    pub fn is_connected(&self) -> bool {
        self.current == ConnectionStatus::Online
    }

    /// Returns the previous status.
    pub fn set(&mut self, status: ConnectionStatus) -> ConnectionStatus {
        let previous = self.current;
        if previous != status {
            tracing::debug!(from = ?previous, to = ?status, "connection status changed");
        }
        self.current = status;
        previous
    }
}

impl Default for StatusIndicator {
    fn default() -> Self {
        Self::new()
    }
}
