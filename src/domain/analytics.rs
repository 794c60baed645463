// Analytics summary domain model, as served by `GET {base}/analytics/summary`
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TrendBucket {
    #[serde(deserialize_with = "super::scalar_label")]
    pub hour: String,
    pub count: u64,
}

/// One frequency bucket. Percentages are independent per bucket and need not sum to 100.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DistributionBucket {
    pub range: String,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AnalyticsSummary {
    pub total_plants: u64,
    pub active_plants: u64,
    pub total_communications_today: u64,
    pub average_frequency: f64,
    #[serde(default)]
    pub communication_trends: Vec<TrendBucket>,
    #[serde(default)]
    pub frequency_distribution: Vec<DistributionBucket>,
}
