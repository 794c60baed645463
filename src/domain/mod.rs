// Domain layer - Payload models, settings and chart series
pub mod analytics;
pub mod chart;
pub mod plant;
pub mod sensor;
pub mod settings;
pub mod view;

use serde::{Deserialize, Deserializer};

/// Accept a chart label given either as a JSON string or a number.
///
/// The backend sends hour buckets as `14` on some deployments and `"14:00"` on others.
pub(crate) fn scalar_label<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(match Scalar::deserialize(deserializer)? {
        Scalar::Text(s) => s,
        Scalar::Int(i) => i.to_string(),
        Scalar::Float(f) => f.to_string(),
    })
}
