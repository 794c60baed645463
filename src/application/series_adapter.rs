// Series adapter - pure transforms from payloads to chart series
use crate::domain::analytics::{DistributionBucket, TrendBucket};
use crate::domain::chart::{BandListItem, ChartSeries, ColoredPoint, LineSeries, SeriesPoint};
use crate::domain::sensor::{Band, HistoryPoint};

pub const LINE_COLOR: &str = "#22c55e";
pub const DISTRIBUTION_PALETTE: [&str; 4] = ["#22c55e", "#16a34a", "#15803d", "#166534"];

/// Magnitude history as a line, input order preserved. No truncation happens here.
pub fn magnitude_series(history: &[HistoryPoint]) -> ChartSeries {
    ChartSeries::Line(LineSeries {
        name: "Communication magnitude".to_string(),
        color: LINE_COLOR.to_string(),
        points: history
            .iter()
            .map(|p| SeriesPoint {
                label: p.time.clone(),
                value: p.magnitude,
            })
            .collect(),
    })
}

/// Band bars plus the side list pairing each band with its range.
pub fn band_series(bands: &[Band]) -> (ChartSeries, Vec<BandListItem>) {
    let bars = bands
        .iter()
        .map(|b| ColoredPoint {
            label: b.name.clone(),
            value: b.magnitude_db,
            color: b.color.clone(),
        })
        .collect();

    let list = bands
        .iter()
        .map(|b| BandListItem {
            name: b.name.clone(),
            range: b.range.clone(),
            magnitude: format!("{:.1} dB", b.magnitude_db),
            color: b.color.clone(),
        })
        .collect();

    (ChartSeries::Bar(bars), list)
}

pub fn trend_series(trends: &[TrendBucket]) -> ChartSeries {
    ChartSeries::Line(LineSeries {
        name: "Communications per hour".to_string(),
        color: LINE_COLOR.to_string(),
        points: trends
            .iter()
            .map(|t| SeriesPoint {
                label: t.hour.clone(),
                value: t.count as f64,
            })
            .collect(),
    })
}

/// Percentages are taken as-is, never renormalized.
pub fn distribution_series(buckets: &[DistributionBucket]) -> ChartSeries {
    ChartSeries::Donut(
        buckets
            .iter()
            .zip(DISTRIBUTION_PALETTE.iter().cycle())
            .map(|(b, color)| ColoredPoint {
                label: b.range.clone(),
                value: b.percentage,
                color: color.to_string(),
            })
            .collect(),
    )
}
