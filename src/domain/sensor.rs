// Sensor reading domain model, as served by `GET {base}/data`
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalStatus {
    Online,
    Offline,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct HistoryPoint {
    #[serde(deserialize_with = "super::scalar_label")]
    pub time: String,
    pub magnitude: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Band {
    pub name: String,
    pub range: String,
    pub magnitude_db: f64,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SensorReading {
    pub raw_value: f64,
    pub voltage: f64,
    pub dominant_magnitude: f64,
    pub dominant_magnitude_db: f64,
    pub average_magnitude: f64,
    pub dominant_frequency: f64,
    pub status: SignalStatus,
    pub plant_name: String,
    #[serde(default)]
    pub history: Vec<HistoryPoint>,
    #[serde(default)]
    pub bands: Vec<Band>,
}

impl SensorReading {
    pub fn is_online(&self) -> bool {
        self.status == SignalStatus::Online
    }

    /// The most recent `max_points` history entries, oldest first.
    pub fn recent_history(&self, max_points: usize) -> &[HistoryPoint] {
        let skip = self.history.len().saturating_sub(max_points);
        &self.history[skip..]
    }
}
