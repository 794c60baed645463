// Console view - draws the dashboard as text on a terminal
use crate::application::render::{
    AnalyticsPanel, ChartInstance, DashboardView, PlantsPanel, RenderSink,
};
use crate::domain::chart::{BandListItem, ChartSeries};
use crate::domain::plant::Plant;
use crate::domain::sensor::SensorReading;
use crate::domain::settings::Theme;
use crate::domain::view::{ConnectionStatus, Tab};
use crate::presentation::format::{
    bar, bounds, format_age, format_frequency, signal_label, sparkline,
};
use std::io::Write;

const BAR_WIDTH: usize = 24;
const RESET: &str = "\x1b[0m";

pub struct ConsoleView<W: Write + Send> {
    out: W,
    theme: Theme,
}

impl<W: Write + Send> ConsoleView<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            theme: Theme::default(),
        }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn accent(&self) -> &'static str {
        match self.theme {
            Theme::Dark => "\x1b[1;92m",
            Theme::Light => "\x1b[1;32m",
        }
    }

    fn emit(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{}", text).and_then(|_| self.out.flush()) {
            tracing::warn!(error = %e, "failed to write to console");
        }
    }

    fn heading(&mut self, title: &str) {
        let line = format!("{}━━ {} ━━{}", self.accent(), title, RESET);
        self.emit(&line);
    }

    fn plant_card(&mut self, plant: &Plant, now: chrono::DateTime<chrono::Utc>) {
        let badge = if plant.is_online() { "Online" } else { "Offline" };
        self.emit(&format!("┌ {} [{}]", plant.name, badge));
        self.emit(&format!("│ {} · 📍 {}", plant.kind, plant.location));
        self.emit(&format!(
            "└ Frequency {:.1} Hz | Health {}% | Last contact {}",
            plant.communication_frequency,
            plant.health_score,
            format_age(&plant.last_communication, now)
        ));
    }

    fn draw(&mut self, chart: &ChartInstance) {
        self.heading(chart.canvas.title());

        match &chart.series {
            ChartSeries::Line(line) => {
                let values: Vec<f64> = line.points.iter().map(|p| p.value).collect();
                if values.is_empty() {
                    self.emit("  (no data)");
                    return;
                }
                let (min, max) = bounds(&values);
                let first = line.points.first().map(|p| p.label.as_str()).unwrap_or_default();
                let last = line.points.last().map(|p| p.label.as_str()).unwrap_or_default();
                self.emit(&format!("  {}", sparkline(&values)));
                self.emit(&format!("  {} → {}   min {:.3}  max {:.3}", first, last, min, max));
            }
            ChartSeries::Bar(points) => {
                let largest = points.iter().map(|p| p.value.abs()).fold(0.0, f64::max);
                let width = points.iter().map(|p| p.label.chars().count()).max().unwrap_or(0);
                for p in points {
                    let line = format!(
                        "  {:<width$} {:>7.1} {}",
                        p.label,
                        p.value,
                        bar(p.value, largest, BAR_WIDTH),
                        width = width
                    );
                    self.emit(&line);
                }
            }
            ChartSeries::Donut(slices) => {
                for s in slices {
                    self.emit(&format!("  ● {}: {}%", s.label, s.value));
                }
            }
        }
    }
}

impl<W: Write + Send> DashboardView for ConsoleView<W> {
    fn show_tab(&mut self, tab: Tab) {
        let title = match tab {
            Tab::Dashboard => "🌿 Dashboard",
            Tab::Plants => "🪴 Plants",
            Tab::Analytics => "📊 Analytics",
        };
        self.heading(title);
    }

    fn show_theme(&mut self, theme: Theme) {
        self.theme = theme;
        self.emit(&format!("Theme: {}", theme));
    }

    fn show_status(&mut self, status: ConnectionStatus) {
        let dot = match status {
            ConnectionStatus::Connecting => "◌",
            ConnectionStatus::Online => "●",
            ConnectionStatus::Offline => "○",
        };
        self.emit(&format!("{} {}", dot, status.label()));
    }

    fn show_reading(&mut self, reading: &SensorReading) {
        self.emit(&format!("{}  {}", reading.plant_name, signal_label(reading.status)));
        self.emit(&format!(
            "  Raw value {}   Voltage {} V",
            reading.raw_value, reading.voltage
        ));
        self.emit(&format!(
            "  Dominant magnitude {:.3} ({:.1} dB)   Average {:.3}",
            reading.dominant_magnitude, reading.dominant_magnitude_db, reading.average_magnitude
        ));
        self.emit(&format!(
            "  Dominant frequency {}",
            format_frequency(reading.dominant_frequency)
        ));
    }

    fn show_bands(&mut self, bands: &[BandListItem]) {
        for band in bands {
            self.emit(&format!(
                "  {} ({})  {}  {}",
                band.name, band.range, band.magnitude, band.color
            ));
        }
    }

    fn show_plants(&mut self, panel: PlantsPanel<'_>) {
        match panel {
            PlantsPanel::Loading => self.emit("Loading plants..."),
            PlantsPanel::Failed => self.emit("Failed to load plants"),
            PlantsPanel::Cards([]) => self.emit("No plants registered"),
            PlantsPanel::Cards(plants) => {
                let now = chrono::Utc::now();
                for plant in plants {
                    self.plant_card(plant, now);
                }
            }
        }
    }

    fn show_analytics(&mut self, panel: AnalyticsPanel<'_>) {
        match panel {
            AnalyticsPanel::Loading => self.emit("Loading analytics..."),
            AnalyticsPanel::Failed => self.emit("Failed to load analytics"),
            AnalyticsPanel::Summary(summary) => {
                self.emit(&format!("  Total plants          {}", summary.total_plants));
                self.emit(&format!("  Active plants         {}", summary.active_plants));
                self.emit(&format!(
                    "  Communications today  {}",
                    summary.total_communications_today
                ));
                self.emit(&format!(
                    "  Average frequency     {:.1} Hz",
                    summary.average_frequency
                ));
            }
        }
    }

    fn show_message(&mut self, message: &str) {
        self.emit(&format!("» {}", message));
    }
}

impl<W: Write + Send> RenderSink for ConsoleView<W> {
    fn create_chart(&mut self, chart: &ChartInstance) {
        self.draw(chart);
    }

    fn update_chart(&mut self, chart: &ChartInstance) {
        self.draw(chart);
    }
}
