// Sensor backend trait - the opaque data source behind the dashboard
use crate::domain::analytics::AnalyticsSummary;
use crate::domain::plant::Plant;
use crate::domain::sensor::SensorReading;
use async_trait::async_trait;

/// Every way a fetch can fail. Call sites collapse all of them into "fetch failed".
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request to {url} failed: {message}")]
    Network { url: String, message: String },
    #[error("{url} responded with status {status}")]
    HttpStatus { url: String, status: u16 },
    #[error("malformed body from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

#[async_trait]
pub trait SensorApi: Send + Sync {
    /// `GET {base}/data`
    async fn fetch_reading(&self) -> Result<SensorReading, FetchError>;

    /// `GET {base}/plants`
    async fn fetch_plants(&self) -> Result<Vec<Plant>, FetchError>;

    /// `GET {base}/analytics/summary`
    async fn fetch_analytics(&self) -> Result<AnalyticsSummary, FetchError>;
}
