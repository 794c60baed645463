// Chart series models handed to the render sink
use serde::Serialize;

/// A drawing surface that holds at most one chart instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Canvas {
    Magnitude,
    Bands,
    Trends,
    Distribution,
}

impl Canvas {
    pub fn kind(&self) -> ChartKind {
        match self {
            Canvas::Magnitude | Canvas::Trends => ChartKind::Line,
            Canvas::Bands => ChartKind::Bar,
            Canvas::Distribution => ChartKind::Donut,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Canvas::Magnitude => "Communication magnitude",
            Canvas::Bands => "Magnitude per band (dB)",
            Canvas::Trends => "Communications per hour",
            Canvas::Distribution => "Frequency distribution",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ChartKind {
    Line,
    Bar,
    Donut,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColoredPoint {
    pub label: String,
    pub value: f64,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineSeries {
    pub name: String,
    pub color: String,
    pub points: Vec<SeriesPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ChartSeries {
    Line(LineSeries),
    Bar(Vec<ColoredPoint>),
    Donut(Vec<ColoredPoint>),
}

impl ChartSeries {
    pub fn kind(&self) -> ChartKind {
        match self {
            ChartSeries::Line(_) => ChartKind::Line,
            ChartSeries::Bar(_) => ChartKind::Bar,
            ChartSeries::Donut(_) => ChartKind::Donut,
        }
    }

    #[cfg(test)]
    pub fn labels(&self) -> Vec<&str> {
        match self {
            ChartSeries::Line(line) => line.points.iter().map(|p| p.label.as_str()).collect(),
            ChartSeries::Bar(points) | ChartSeries::Donut(points) => {
                points.iter().map(|p| p.label.as_str()).collect()
            }
        }
    }

    #[cfg(test)]
    pub fn values(&self) -> Vec<f64> {
        match self {
            ChartSeries::Line(line) => line.points.iter().map(|p| p.value).collect(),
            ChartSeries::Bar(points) | ChartSeries::Donut(points) => {
                points.iter().map(|p| p.value).collect()
            }
        }
    }
}

/// Band row shown next to the band chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BandListItem {
    pub name: String,
    pub range: String,
    /// Magnitude rounded to one decimal, e.g. `-20.3 dB`.
    pub magnitude: String,
    pub color: String,
}
