// Display formatting for readouts, cards and text charts
use crate::domain::sensor::SignalStatus;
use chrono::{DateTime, NaiveDateTime, Utc};

const SPARK_LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// `123.5 Hz` below 1 kHz, `1.50 kHz` from there on.
pub fn format_frequency(hz: f64) -> String {
    if hz < 1000.0 {
        format!("{:.1} Hz", hz)
    } else {
        format!("{:.2} kHz", hz / 1000.0)
    }
}

pub fn signal_label(status: SignalStatus) -> &'static str {
    match status {
        SignalStatus::Online => "🟢 Plant talking",
        SignalStatus::Offline => "🔴 Silent",
    }
}

/// Accepts RFC 3339 or a naive ISO timestamp (taken as UTC).
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// Age of a timestamp as `now`, `12m`, `3h` or `2d`. Unparseable input is shown verbatim.
pub fn format_age(raw: &str, now: DateTime<Utc>) -> String {
    let Some(ts) = parse_timestamp(raw) else {
        return raw.to_string();
    };

    let minutes = (now - ts).num_minutes();
    if minutes < 1 {
        "now".to_string()
    } else if minutes < 60 {
        format!("{}m", minutes)
    } else if minutes < 1440 {
        format!("{}h", minutes / 60)
    } else {
        format!("{}d", minutes / 1440)
    }
}

pub fn sparkline(values: &[f64]) -> String {
    let (min, max) = bounds(values);
    let span = max - min;

    values
        .iter()
        .map(|v| {
            if span <= f64::EPSILON {
                return SPARK_LEVELS[0];
            }
            let level = ((v - min) / span * (SPARK_LEVELS.len() - 1) as f64).round() as usize;
            SPARK_LEVELS[level.min(SPARK_LEVELS.len() - 1)]
        })
        .collect()
}

/// Horizontal bar proportional to `|value|` against the largest magnitude.
pub fn bar(value: f64, largest: f64, width: usize) -> String {
    if largest <= 0.0 {
        return String::new();
    }
    let filled = ((value.abs() / largest) * width as f64).round() as usize;
    "█".repeat(filled.min(width))
}

pub fn bounds(values: &[f64]) -> (f64, f64) {
    values.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(*v), hi.max(*v))
    })
}
