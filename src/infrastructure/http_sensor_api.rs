// HTTP implementation of the sensor backend
use crate::application::sensor_api::{FetchError, SensorApi};
use crate::domain::analytics::AnalyticsSummary;
use crate::domain::plant::Plant;
use crate::domain::sensor::SensorReading;
use anyhow::Context;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct HttpSensorApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpSensorApi {
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Transport errors, non-2xx statuses and undecodable bodies each map to
    /// their own `FetchError` variant.
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, FetchError> {
        let url = self.url(path);
        tracing::trace!(%url, "fetching");

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| FetchError::Network {
                url: url.clone(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus {
                url,
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|e| FetchError::Network {
            url: url.clone(),
            message: e.to_string(),
        })?;

        serde_json::from_str(&body).map_err(|source| FetchError::Decode { url, source })
    }
}

#[async_trait]
impl SensorApi for HttpSensorApi {
    async fn fetch_reading(&self) -> Result<SensorReading, FetchError> {
        self.get_json("data").await
    }

    async fn fetch_plants(&self) -> Result<Vec<Plant>, FetchError> {
        self.get_json("plants").await
    }

    async fn fetch_analytics(&self) -> Result<AnalyticsSummary, FetchError> {
        self.get_json("analytics/summary").await
    }
}
