// Plant roster domain model, as served by `GET {base}/plants`
use super::sensor::SignalStatus;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Plant {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub location: String,
    pub status: SignalStatus,
    pub communication_frequency: f64,
    pub health_score: f64,
    /// Timestamp string as sent by the backend; parsed only for display.
    pub last_communication: String,
}

impl Plant {
    pub fn is_online(&self) -> bool {
        self.status == SignalStatus::Online
    }
}
