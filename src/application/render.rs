// Rendering seams - the chart sink, the text surface and the chart registry
use crate::domain::analytics::AnalyticsSummary;
use crate::domain::chart::{BandListItem, Canvas, ChartSeries};
use crate::domain::plant::Plant;
use crate::domain::sensor::SensorReading;
use crate::domain::settings::Theme;
use crate::domain::view::{ConnectionStatus, Tab};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq)]
pub enum PlantsPanel<'a> {
    Loading,
    Cards(&'a [Plant]),
    Failed,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AnalyticsPanel<'a> {
    Loading,
    Summary(&'a AnalyticsSummary),
    Failed,
}

/// Everything on screen that is not a chart.
pub trait DashboardView: Send {
    fn show_tab(&mut self, tab: Tab);
    fn show_theme(&mut self, theme: Theme);
    fn show_status(&mut self, status: ConnectionStatus);
    fn show_reading(&mut self, reading: &SensorReading);
    fn show_bands(&mut self, bands: &[BandListItem]);
    fn show_plants(&mut self, panel: PlantsPanel<'_>);
    fn show_analytics(&mut self, panel: AnalyticsPanel<'_>);
    fn show_message(&mut self, message: &str);
}

/// The charting backend. It never owns chart state; the registry does.
pub trait RenderSink: Send {
    fn create_chart(&mut self, chart: &ChartInstance);
    fn update_chart(&mut self, chart: &ChartInstance);
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartInstance {
    pub canvas: Canvas,
    pub series: ChartSeries,
    /// Number of in-place updates since creation.
    pub revision: u64,
}

/// A surface that shows both text and charts.
pub trait Screen: DashboardView + RenderSink {}

impl<T: DashboardView + RenderSink> Screen for T {}

/// Holds at most one chart per canvas. Later renders mutate it in place.
#[derive(Debug, Default)]
pub struct ChartRegistry {
    charts: HashMap<Canvas, ChartInstance>,
}

impl ChartRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true when the chart was created by this call.
    pub fn render<S>(&mut self, canvas: Canvas, series: ChartSeries, sink: &mut S) -> bool
    where
        S: RenderSink + ?Sized,
    {
        debug_assert_eq!(canvas.kind(), series.kind(), "series kind does not fit canvas");

        match self.charts.get_mut(&canvas) {
            Some(chart) => {
                chart.series = series;
                chart.revision += 1;
                sink.update_chart(chart);
                false
            }
            None => {
                let chart = self.charts.entry(canvas).or_insert(ChartInstance {
                    canvas,
                    series,
                    revision: 0,
                });
                sink.create_chart(chart);
                true
            }
        }
    }

    #[cfg(test)]
    pub fn get(&self, canvas: Canvas) -> Option<&ChartInstance> {
        self.charts.get(&canvas)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.charts.len()
    }
}
