// Test doubles shared by the application tests
use crate::application::notification_gate::{Clock, NotificationPermission, Notifier};
use crate::application::render::{
    AnalyticsPanel, ChartInstance, DashboardView, PlantsPanel, RenderSink,
};
use crate::application::sensor_api::{FetchError, SensorApi};
use crate::application::settings_service::{SettingsStorage, StorageError};
use crate::domain::analytics::{AnalyticsSummary, DistributionBucket, TrendBucket};
use crate::domain::chart::{BandListItem, Canvas};
use crate::domain::plant::Plant;
use crate::domain::sensor::{Band, HistoryPoint, SensorReading, SignalStatus};
use crate::domain::settings::Theme;
use crate::domain::view::{ConnectionStatus, Tab};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub fn reading(dominant_magnitude: f64) -> SensorReading {
    SensorReading {
        raw_value: 512.0,
        voltage: 1.65,
        dominant_magnitude,
        dominant_magnitude_db: -7.5,
        average_magnitude: 0.12,
        dominant_frequency: 123.456,
        status: SignalStatus::Online,
        plant_name: "Fern".to_string(),
        history: vec![
            HistoryPoint { time: "10:00:01".into(), magnitude: 0.1 },
            HistoryPoint { time: "10:00:03".into(), magnitude: 0.3 },
        ],
        bands: vec![
            Band {
                name: "Delta".into(),
                range: "0-4 Hz".into(),
                magnitude_db: -20.0,
                color: "#f00".into(),
            },
            Band {
                name: "Theta".into(),
                range: "4-8 Hz".into(),
                magnitude_db: -3.0,
                color: "#0f0".into(),
            },
        ],
    }
}

pub fn roster() -> Vec<Plant> {
    vec![
        Plant {
            name: "Fern".into(),
            kind: "Pteridophyta".into(),
            location: "Lab 1".into(),
            status: SignalStatus::Online,
            communication_frequency: 42.5,
            health_score: 91.0,
            last_communication: "2026-10-19T10:00:00Z".into(),
        },
        Plant {
            name: "Cactus".into(),
            kind: "Cactaceae".into(),
            location: "Window".into(),
            status: SignalStatus::Offline,
            communication_frequency: 3.0,
            health_score: 55.0,
            last_communication: "2026-10-18T08:00:00Z".into(),
        },
    ]
}

pub fn summary() -> AnalyticsSummary {
    AnalyticsSummary {
        total_plants: 4,
        active_plants: 3,
        total_communications_today: 1200,
        average_frequency: 87.25,
        communication_trends: (0..4)
            .map(|h| TrendBucket { hour: format!("{:02}:00", h), count: h * 10 })
            .collect(),
        frequency_distribution: vec![
            DistributionBucket { range: "0-1kHz".into(), percentage: 40.0 },
            DistributionBucket { range: "1-2kHz".into(), percentage: 65.0 },
        ],
    }
}

pub struct ManualClock {
    now: AtomicI64,
}

impl ManualClock {
    pub fn new(start_ms: i64) -> Self {
        Self { now: AtomicI64::new(start_ms) }
    }

    pub fn advance(&self, ms: i64) {
        self.now.fetch_add(ms, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }
}

pub struct RecordingNotifier {
    permission: Mutex<NotificationPermission>,
    sent: Mutex<Vec<(String, String)>>,
}

impl RecordingNotifier {
    pub fn new(permission: NotificationPermission) -> Self {
        Self {
            permission: Mutex::new(permission),
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn permission(&self) -> NotificationPermission {
        *self.permission.lock().unwrap()
    }

    fn request_permission(&self) -> NotificationPermission {
        let mut permission = self.permission.lock().unwrap();
        if *permission == NotificationPermission::Prompt {
            *permission = NotificationPermission::Granted;
        }
        *permission
    }

    fn notify(&self, title: &str, body: &str) {
        self.sent.lock().unwrap().push((title.to_string(), body.to_string()));
    }
}

#[derive(Default)]
pub struct MemoryStorage {
    values: Mutex<HashMap<String, String>>,
}

impl SettingsStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.values.lock().unwrap().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values.lock().unwrap().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Responses are handed out in push order; an empty queue yields a network error.
#[derive(Default)]
pub struct ScriptedApi {
    readings: Mutex<VecDeque<Result<SensorReading, FetchError>>>,
    plants: Mutex<VecDeque<Result<Vec<Plant>, FetchError>>>,
    analytics: Mutex<VecDeque<Result<AnalyticsSummary, FetchError>>>,
    reading_calls: AtomicUsize,
    plants_calls: AtomicUsize,
    analytics_calls: AtomicUsize,
}

impl ScriptedApi {
    pub fn push_reading(&self, result: Result<SensorReading, FetchError>) {
        self.readings.lock().unwrap().push_back(result);
    }

    pub fn push_plants(&self, result: Result<Vec<Plant>, FetchError>) {
        self.plants.lock().unwrap().push_back(result);
    }

    pub fn push_analytics(&self, result: Result<AnalyticsSummary, FetchError>) {
        self.analytics.lock().unwrap().push_back(result);
    }

    pub fn reading_calls(&self) -> usize {
        self.reading_calls.load(Ordering::SeqCst)
    }

    pub fn plants_calls(&self) -> usize {
        self.plants_calls.load(Ordering::SeqCst)
    }

    fn exhausted<T>(path: &str) -> Result<T, FetchError> {
        Err(FetchError::Network {
            url: format!("scripted://{}", path),
            message: "no scripted response".to_string(),
        })
    }
}

#[async_trait]
impl SensorApi for ScriptedApi {
    async fn fetch_reading(&self) -> Result<SensorReading, FetchError> {
        self.reading_calls.fetch_add(1, Ordering::SeqCst);
        let next = self.readings.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Self::exhausted("data"))
    }

    async fn fetch_plants(&self) -> Result<Vec<Plant>, FetchError> {
        self.plants_calls.fetch_add(1, Ordering::SeqCst);
        let next = self.plants.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Self::exhausted("plants"))
    }

    async fn fetch_analytics(&self) -> Result<AnalyticsSummary, FetchError> {
        self.analytics_calls.fetch_add(1, Ordering::SeqCst);
        let next = self.analytics.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Self::exhausted("analytics/summary"))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PanelState {
    Loading,
    Loaded(usize),
    Failed,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViewCall {
    Tab(Tab),
    Theme(Theme),
    Status(ConnectionStatus),
    Reading(String),
    Bands(usize),
    Plants(PanelState),
    /// `Loaded` counts trend buckets.
    Analytics(PanelState),
    Message(String),
    ChartCreated(Canvas),
    ChartUpdated(Canvas, u64),
}

/// Clones share one call log, so a boxed copy can be inspected from the test.
#[derive(Clone, Default)]
pub struct RecordingView {
    calls: Arc<Mutex<Vec<ViewCall>>>,
}

impl RecordingView {
    pub fn calls(&self) -> Vec<ViewCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn take(&self) -> Vec<ViewCall> {
        std::mem::take(&mut *self.calls.lock().unwrap())
    }

    fn record(&self, call: ViewCall) {
        self.calls.lock().unwrap().push(call);
    }
}

impl DashboardView for RecordingView {
    fn show_tab(&mut self, tab: Tab) {
        self.record(ViewCall::Tab(tab));
    }

    fn show_theme(&mut self, theme: Theme) {
        self.record(ViewCall::Theme(theme));
    }

    fn show_status(&mut self, status: ConnectionStatus) {
        self.record(ViewCall::Status(status));
    }

    fn show_reading(&mut self, reading: &SensorReading) {
        self.record(ViewCall::Reading(reading.plant_name.clone()));
    }

    fn show_bands(&mut self, bands: &[BandListItem]) {
        self.record(ViewCall::Bands(bands.len()));
    }

    fn show_plants(&mut self, panel: PlantsPanel<'_>) {
        let state = match panel {
            PlantsPanel::Loading => PanelState::Loading,
            PlantsPanel::Cards(plants) => PanelState::Loaded(plants.len()),
            PlantsPanel::Failed => PanelState::Failed,
        };
        self.record(ViewCall::Plants(state));
    }

    fn show_analytics(&mut self, panel: AnalyticsPanel<'_>) {
        let state = match panel {
            AnalyticsPanel::Loading => PanelState::Loading,
            AnalyticsPanel::Summary(summary) => {
                PanelState::Loaded(summary.communication_trends.len())
            }
            AnalyticsPanel::Failed => PanelState::Failed,
        };
        self.record(ViewCall::Analytics(state));
    }

    fn show_message(&mut self, message: &str) {
        self.record(ViewCall::Message(message.to_string()));
    }
}

impl RenderSink for RecordingView {
    fn create_chart(&mut self, chart: &ChartInstance) {
        self.record(ViewCall::ChartCreated(chart.canvas));
    }

    fn update_chart(&mut self, chart: &ChartInstance) {
        self.record(ViewCall::ChartUpdated(chart.canvas, chart.revision));
    }
}
