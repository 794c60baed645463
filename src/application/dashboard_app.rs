// Dashboard app - the single event loop that owns all UI state
use crate::application::events::{AppEvent, DispatchToken, UserCommand};
use crate::application::notification_gate::{NotificationGate, NotificationPermission};
use crate::application::poller::{PollTick, Poller};
use crate::application::render::{AnalyticsPanel, ChartRegistry, PlantsPanel, Screen};
use crate::application::sensor_api::{FetchError, SensorApi};
use crate::application::series_adapter::{
    band_series, distribution_series, magnitude_series, trend_series,
};
use crate::application::settings_service::SettingsService;
use crate::application::status_indicator::StatusIndicator;
use crate::application::tab_controller::{TabController, TabLoad};
use crate::domain::analytics::AnalyticsSummary;
use crate::domain::chart::Canvas;
use crate::domain::plant::Plant;
use crate::domain::sensor::SensorReading;
use crate::domain::settings::{AppSettings, RefreshRate, Theme};
use crate::domain::view::{ConnectionStatus, Tab};
use std::sync::Arc;
use tokio::sync::mpsc;

const EVENT_QUEUE_CAPACITY: usize = 100;

/// Everything the handlers read and write. Owned by the loop, never shared.
#[derive(Debug)]
pub struct AppState {
    pub tabs: TabController,
    pub status: StatusIndicator,
    pub settings: AppSettings,
    pub charts: ChartRegistry,
    next_sensor_seq: u64,
    applied_sensor_seq: u64,
}

impl AppState {
    pub fn new(settings: AppSettings) -> Self {
        Self {
            tabs: TabController::new(),
            status: StatusIndicator::default(),
            settings,
            charts: ChartRegistry::new(),
            next_sensor_seq: 0,
            applied_sensor_seq: 0,
        }
    }
}

pub struct DashboardApp {
    state: AppState,
    api: Arc<dyn SensorApi>,
    gate: NotificationGate,
    settings_service: SettingsService,
    screen: Box<dyn Screen>,
    poller: Poller<AppEvent>,
    chart_max_points: usize,
    events_tx: mpsc::Sender<AppEvent>,
    events_rx: mpsc::Receiver<AppEvent>,
}

impl DashboardApp {
    pub fn new(
        api: Arc<dyn SensorApi>,
        gate: NotificationGate,
        settings_service: SettingsService,
        screen: Box<dyn Screen>,
        settings: AppSettings,
        chart_max_points: usize,
    ) -> Self {
        let (events_tx, events_rx) = mpsc::channel(EVENT_QUEUE_CAPACITY);
        let poller = Poller::new(events_tx.clone());

        Self {
            state: AppState::new(settings),
            api,
            gate,
            settings_service,
            screen,
            poller,
            chart_max_points,
            events_tx,
            events_rx,
        }
    }

    /// Handle for producers outside the loop (stdin, signals).
    pub fn sender(&self) -> mpsc::Sender<AppEvent> {
        self.events_tx.clone()
    }

    #[cfg(test)]
    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub async fn run(mut self) {
        self.startup();

        while let Some(event) = self.events_rx.recv().await {
            if !self.handle(event) {
                break;
            }
        }

        self.poller.stop();
        tracing::info!("dashboard stopped");
    }

    fn startup(&mut self) {
        self.screen.show_theme(self.state.settings.theme);
        self.screen.show_tab(self.state.tabs.current());

        // Initial load, then periodic refresh.
        self.dispatch_sensor_fetch();
        self.poller.start(self.state.settings.refresh_rate.as_duration());

        tracing::info!(
            refresh_ms = self.state.settings.refresh_rate.as_millis(),
            "dashboard started"
        );
    }

    /// Returns false once the loop should exit.
    pub(crate) fn handle(&mut self, event: AppEvent) -> bool {
        match event {
            AppEvent::Tick(tick) => self.on_tick(tick),
            AppEvent::SensorLoaded { token, result } => self.on_sensor_loaded(token, result),
            AppEvent::PlantsLoaded { epoch, result } => self.on_plants_loaded(epoch, result),
            AppEvent::AnalyticsLoaded { epoch, result } => self.on_analytics_loaded(epoch, result),
            AppEvent::Command(UserCommand::Quit) | AppEvent::Shutdown => return false,
            AppEvent::Command(command) => self.on_command(command),
        }
        true
    }

    fn on_tick(&mut self, tick: PollTick) {
        if !self.poller.is_current(&tick) {
            tracing::debug!(timer_id = tick.timer_id, "ignoring tick from cancelled timer");
            return;
        }
        if self.state.tabs.current() != Tab::Dashboard {
            return;
        }
        self.dispatch_sensor_fetch();
    }

    fn dispatch_sensor_fetch(&mut self) {
        self.state.next_sensor_seq += 1;
        let token = DispatchToken {
            epoch: self.state.tabs.epoch(),
            seq: self.state.next_sensor_seq,
        };

        self.set_status(ConnectionStatus::Connecting);

        let api = self.api.clone();
        self.spawn_fetch(async move {
            AppEvent::SensorLoaded {
                token,
                result: api.fetch_reading().await,
            }
        });
    }

    fn on_sensor_loaded(
        &mut self,
        token: DispatchToken,
        result: Result<SensorReading, FetchError>,
    ) {
        let tabs = &self.state.tabs;
        if !tabs.is_current(Tab::Dashboard, token.epoch) {
            tracing::debug!(
                seq = token.seq,
                "dropping sensor response, dashboard no longer active"
            );
            return;
        }
        if token.seq <= self.state.applied_sensor_seq {
            tracing::debug!(
                seq = token.seq,
                applied = self.state.applied_sensor_seq,
                "dropping sensor response overtaken by a newer one"
            );
            return;
        }
        self.state.applied_sensor_seq = token.seq;

        match result {
            Ok(reading) => {
                self.render_dashboard(&reading);
                self.check_notification(&reading);
                self.set_status(ConnectionStatus::Online);
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to load sensor data");
                self.set_status(ConnectionStatus::Offline);
            }
        }
    }

    fn render_dashboard(&mut self, reading: &SensorReading) {
        self.screen.show_reading(reading);

        let history = reading.recent_history(self.chart_max_points);
        self.state
            .charts
            .render(Canvas::Magnitude, magnitude_series(history), &mut *self.screen);

        let (bars, band_list) = band_series(&reading.bands);
        self.state.charts.render(Canvas::Bands, bars, &mut *self.screen);
        self.screen.show_bands(&band_list);
    }

    fn check_notification(&mut self, reading: &SensorReading) {
        if !self.gate.maybe_notify(reading, &mut self.state.settings) {
            return;
        }
        if let Some(at_ms) = self.state.settings.last_notification_at_ms {
            if let Err(e) = self.settings_service.save_last_notification(at_ms) {
                tracing::warn!(error = %e, "failed to persist notification time");
            }
        }
    }

    fn set_status(&mut self, status: ConnectionStatus) {
        self.state.status.set(status);
        self.screen.show_status(status);
    }

    fn select_tab(&mut self, tab: Tab) {
        let load = self.state.tabs.select(tab);
        self.screen.show_tab(tab);

        match load {
            TabLoad::None => {}
            TabLoad::Plants { epoch } => {
                self.screen.show_plants(PlantsPanel::Loading);
                let api = self.api.clone();
                self.spawn_fetch(async move {
                    AppEvent::PlantsLoaded {
                        epoch,
                        result: api.fetch_plants().await,
                    }
                });
            }
            TabLoad::Analytics { epoch } => {
                self.screen.show_analytics(AnalyticsPanel::Loading);
                let api = self.api.clone();
                self.spawn_fetch(async move {
                    AppEvent::AnalyticsLoaded {
                        epoch,
                        result: api.fetch_analytics().await,
                    }
                });
            }
        }
    }

    fn on_plants_loaded(&mut self, epoch: u64, result: Result<Vec<Plant>, FetchError>) {
        if !self.state.tabs.is_current(Tab::Plants, epoch) {
            tracing::debug!(epoch, "dropping plants response for inactive tab");
            return;
        }

        match result {
            Ok(plants) => self.screen.show_plants(PlantsPanel::Cards(&plants)),
            Err(e) => {
                tracing::warn!(error = %e, "failed to load plants");
                self.screen.show_plants(PlantsPanel::Failed);
            }
        }
    }

    fn on_analytics_loaded(&mut self, epoch: u64, result: Result<AnalyticsSummary, FetchError>) {
        if !self.state.tabs.is_current(Tab::Analytics, epoch) {
            tracing::debug!(epoch, "dropping analytics response for inactive tab");
            return;
        }

        match result {
            Ok(summary) => {
                self.screen.show_analytics(AnalyticsPanel::Summary(&summary));
                self.state.charts.render(
                    Canvas::Trends,
                    trend_series(&summary.communication_trends),
                    &mut *self.screen,
                );
                self.state.charts.render(
                    Canvas::Distribution,
                    distribution_series(&summary.frequency_distribution),
                    &mut *self.screen,
                );
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to load analytics");
                self.screen.show_analytics(AnalyticsPanel::Failed);
            }
        }
    }

    fn on_command(&mut self, command: UserCommand) {
        match command {
            UserCommand::SelectTab(tab) => self.select_tab(tab),
            UserCommand::SetRefreshRate(ms) => self.set_refresh_rate(ms),
            UserCommand::SetTheme(theme) => self.set_theme(theme),
            UserCommand::SetNotifications(enabled) => self.set_notifications(enabled),
            UserCommand::Quit => {}
        }
    }

    fn set_refresh_rate(&mut self, ms: u64) {
        match RefreshRate::from_choice(ms) {
            Ok(rate) => {
                self.state.settings.refresh_rate = rate;
                self.poller.restart(rate.as_duration());
                self.screen
                    .show_message(&format!("Refresh interval set to {}ms", rate.as_millis()));
            }
            Err(e) => self.screen.show_message(&e.to_string()),
        }
    }

    fn set_theme(&mut self, theme: Theme) {
        self.state.settings.theme = theme;
        if let Err(e) = self.settings_service.save_theme(theme) {
            tracing::warn!(error = %e, "failed to persist theme");
        }
        self.screen.show_theme(theme);
    }

    fn set_notifications(&mut self, enabled: bool) {
        if enabled {
            let permission = self.gate.request_permission();
            if permission != NotificationPermission::Granted {
                self.screen
                    .show_message("Notifications enabled, but permission was not granted");
            }
        }
        self.state.settings.notifications_enabled = enabled;
        let state = if enabled { "on" } else { "off" };
        self.screen.show_message(&format!("Notifications {}", state));
    }

    fn spawn_fetch<F>(&self, fetch: F)
    where
        F: Future<Output = AppEvent> + Send + 'static,
    {
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            if tx.send(fetch.await).await.is_err() {
                tracing::debug!("event loop closed, dropping fetch result");
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::settings_service::{LAST_NOTIFICATION_KEY, SettingsStorage, THEME_KEY};
    use crate::application::test_support::{
        ManualClock, MemoryStorage, PanelState, RecordingNotifier, RecordingView, ScriptedApi,
        ViewCall, reading, roster, summary,
    };
    use std::time::Duration;

    struct Harness {
        app: DashboardApp,
        api: Arc<ScriptedApi>,
        view: RecordingView,
        notifier: Arc<RecordingNotifier>,
        storage: Arc<MemoryStorage>,
    }

    fn harness() -> Harness {
        let api = Arc::new(ScriptedApi::default());
        let view = RecordingView::default();
        let notifier = Arc::new(RecordingNotifier::new(NotificationPermission::Prompt));
        let storage = Arc::new(MemoryStorage::default());
        let gate = NotificationGate::new(notifier.clone(), Arc::new(ManualClock::new(5_000_000)));

        let app = DashboardApp::new(
            api.clone(),
            gate,
            SettingsService::new(storage.clone()),
            Box::new(view.clone()),
            AppSettings::default(),
            20,
        );

        Harness { app, api, view, notifier, storage }
    }

    impl Harness {
        async fn next_event(&mut self) -> AppEvent {
            self.app.events_rx.recv().await.unwrap()
        }

        /// Wait for the next poll tick and run the fetch it triggers to completion.
        async fn poll_once(&mut self) {
            let tick = self.next_event().await;
            assert!(matches!(tick, AppEvent::Tick(_)), "expected tick, got {:?}", tick);
            self.app.handle(tick);
            let loaded = self.next_event().await;
            assert!(matches!(loaded, AppEvent::SensorLoaded { .. }));
            self.app.handle(loaded);
        }

        fn command(&mut self, command: UserCommand) {
            assert!(self.app.handle(AppEvent::Command(command)));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_tick_renders_dashboard() {
        let mut h = harness();
        h.api.push_reading(Ok(reading(0.05)));
        h.api.push_reading(Ok(reading(0.07)));
        h.app.poller.start(Duration::from_millis(2000));

        h.poll_once().await;
        let calls = h.view.take();
        assert_eq!(
            calls,
            vec![
                ViewCall::Status(ConnectionStatus::Connecting),
                ViewCall::Reading("Fern".into()),
                ViewCall::ChartCreated(Canvas::Magnitude),
                ViewCall::ChartCreated(Canvas::Bands),
                ViewCall::Bands(2),
                ViewCall::Status(ConnectionStatus::Online),
            ]
        );

        h.poll_once().await;
        let calls = h.view.take();
        assert!(calls.contains(&ViewCall::ChartUpdated(Canvas::Magnitude, 1)));
        assert!(calls.contains(&ViewCall::ChartUpdated(Canvas::Bands, 1)));
        assert_eq!(h.app.state().charts.len(), 2);
        assert!(h.app.state().status.is_connected());
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_goes_offline_and_next_tick_retries() {
        let mut h = harness();
        h.api.push_reading(Err(FetchError::HttpStatus {
            url: "http://sensor/data".into(),
            status: 500,
        }));
        h.api.push_reading(Ok(reading(0.5)));
        h.app.poller.start(Duration::from_millis(1000));

        h.poll_once().await;
        assert_eq!(h.app.state().status.current(), ConnectionStatus::Offline);
        assert!(h.view.take().contains(&ViewCall::Status(ConnectionStatus::Offline)));

        h.poll_once().await;
        assert_eq!(h.api.reading_calls(), 2);
        assert_eq!(h.app.state().status.current(), ConnectionStatus::Online);
    }

    #[tokio::test(start_paused = true)]
    async fn test_late_dashboard_response_dropped_after_tab_switch() {
        let mut h = harness();
        h.api.push_reading(Ok(reading(0.9)));
        h.api.push_analytics(Ok(summary()));
        h.app.poller.start(Duration::from_millis(1000));

        let tick = h.next_event().await;
        h.app.handle(tick);
        h.command(UserCommand::SelectTab(Tab::Analytics));

        for _ in 0..2 {
            let event = h.next_event().await;
            h.app.handle(event);
        }

        let calls = h.view.take();
        assert!(!calls.iter().any(|c| matches!(c, ViewCall::Reading(_))));
        assert!(!calls.contains(&ViewCall::ChartCreated(Canvas::Magnitude)));
        assert!(calls.contains(&ViewCall::Analytics(PanelState::Loaded(4))));
        assert!(calls.contains(&ViewCall::ChartCreated(Canvas::Trends)));
        assert!(calls.contains(&ViewCall::ChartCreated(Canvas::Distribution)));
    }

    #[tokio::test]
    async fn test_overtaken_response_is_dropped() {
        let mut h = harness();

        h.app.handle(AppEvent::SensorLoaded {
            token: DispatchToken { epoch: 0, seq: 2 },
            result: Ok(reading(0.3)),
        });
        h.app.handle(AppEvent::SensorLoaded {
            token: DispatchToken { epoch: 0, seq: 1 },
            result: Err(FetchError::Network {
                url: "http://sensor/data".into(),
                message: "timed out".into(),
            }),
        });

        assert_eq!(h.app.state().status.current(), ConnectionStatus::Online);
        assert!(!h.view.take().contains(&ViewCall::Status(ConnectionStatus::Offline)));
    }

    #[tokio::test]
    async fn test_ticks_ignored_off_dashboard() {
        let mut h = harness();
        h.api.push_plants(Ok(roster()));
        h.app.poller.start(Duration::from_secs(3600));
        h.command(UserCommand::SelectTab(Tab::Plants));

        // Tick from a timer that no longer exists.
        h.app.handle(AppEvent::Tick(PollTick { timer_id: 999 }));

        let event = h.next_event().await;
        assert!(matches!(event, AppEvent::PlantsLoaded { .. }));
        h.app.handle(event);

        assert_eq!(h.api.reading_calls(), 0);
        let calls = h.view.take();
        assert!(calls.contains(&ViewCall::Plants(PanelState::Loading)));
        assert!(calls.contains(&ViewCall::Plants(PanelState::Loaded(2))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_poll_tick_is_noop_on_plants_tab() {
        let mut h = harness();
        h.api.push_plants(Ok(roster()));
        h.app.poller.start(Duration::from_millis(1000));
        h.command(UserCommand::SelectTab(Tab::Plants));

        let mut ticks = 0;
        while ticks < 3 {
            match h.next_event().await {
                event @ AppEvent::Tick(_) => {
                    ticks += 1;
                    h.app.handle(event);
                }
                event => {
                    h.app.handle(event);
                }
            }
        }
        assert_eq!(h.api.reading_calls(), 0);
    }

    #[tokio::test]
    async fn test_plants_failure_shows_placeholder_and_revisit_refetches() {
        let mut h = harness();
        h.api.push_plants(Err(FetchError::HttpStatus {
            url: "http://sensor/plants".into(),
            status: 503,
        }));
        h.api.push_plants(Ok(roster()));

        h.command(UserCommand::SelectTab(Tab::Plants));
        let event = h.next_event().await;
        h.app.handle(event);
        assert!(h.view.take().contains(&ViewCall::Plants(PanelState::Failed)));

        h.command(UserCommand::SelectTab(Tab::Dashboard));
        h.command(UserCommand::SelectTab(Tab::Plants));
        let event = h.next_event().await;
        h.app.handle(event);

        assert_eq!(h.api.plants_calls(), 2);
        assert!(h.view.take().contains(&ViewCall::Plants(PanelState::Loaded(2))));
    }

    #[tokio::test]
    async fn test_analytics_failure_shows_placeholder() {
        let mut h = harness();
        h.command(UserCommand::SelectTab(Tab::Analytics));
        let event = h.next_event().await;
        h.app.handle(event);

        let calls = h.view.take();
        assert!(calls.contains(&ViewCall::Analytics(PanelState::Failed)));
        assert!(!calls.iter().any(|c| matches!(c, ViewCall::ChartCreated(_))));
    }

    #[tokio::test]
    async fn test_refresh_rate_change_restarts_poller() {
        let mut h = harness();
        h.app.poller.start(Duration::from_millis(2000));

        h.command(UserCommand::SetRefreshRate(5000));
        assert_eq!(h.app.poller.interval(), Some(Duration::from_millis(5000)));
        assert_eq!(h.app.state().settings.refresh_rate.as_millis(), 5000);

        h.command(UserCommand::SetRefreshRate(3000));
        assert_eq!(h.app.poller.interval(), Some(Duration::from_millis(5000)));
        let calls = h.view.take();
        assert!(
            calls
                .iter()
                .any(|c| matches!(c, ViewCall::Message(m) if m.contains("3000")))
        );
    }

    #[tokio::test]
    async fn test_theme_is_persisted() {
        let mut h = harness();
        h.command(UserCommand::SetTheme(Theme::Light));

        assert_eq!(h.storage.get(THEME_KEY).as_deref(), Some("light"));
        assert_eq!(h.app.state().settings.theme, Theme::Light);
        assert!(h.view.take().contains(&ViewCall::Theme(Theme::Light)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_notification_fires_once_and_is_persisted() {
        let mut h = harness();
        h.api.push_reading(Ok(reading(0.5)));
        h.api.push_reading(Ok(reading(0.5)));
        h.command(UserCommand::SetNotifications(true));
        h.app.poller.start(Duration::from_millis(1000));

        h.poll_once().await;
        h.poll_once().await;

        assert_eq!(h.notifier.sent().len(), 1);
        assert_eq!(h.storage.get(LAST_NOTIFICATION_KEY).as_deref(), Some("5000000"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_disabled_notifications_never_fire() {
        let mut h = harness();
        h.api.push_reading(Ok(reading(0.5)));
        h.command(UserCommand::SetNotifications(true));
        h.command(UserCommand::SetNotifications(false));
        h.app.poller.start(Duration::from_millis(1000));

        h.poll_once().await;
        assert!(h.notifier.sent().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_stops_on_shutdown() {
        let h = harness();
        h.api.push_reading(Ok(reading(0.2)));
        let tx = h.app.sender();
        let handle = tokio::spawn(h.app.run());

        tx.send(AppEvent::Shutdown).await.unwrap();
        handle.await.unwrap();

        let calls = h.view.calls();
        assert!(calls.contains(&ViewCall::Theme(Theme::Dark)));
        assert!(calls.contains(&ViewCall::Tab(Tab::Dashboard)));
        assert!(calls.contains(&ViewCall::Status(ConnectionStatus::Connecting)));
    }
}
