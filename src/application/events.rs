// Events processed by the dashboard loop
use crate::application::poller::PollTick;
use crate::application::sensor_api::FetchError;
use crate::domain::analytics::AnalyticsSummary;
use crate::domain::plant::Plant;
use crate::domain::sensor::SensorReading;
use crate::domain::settings::Theme;
use crate::domain::view::Tab;

/// Captured when a sensor fetch is dispatched and checked again when it completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchToken {
    pub epoch: u64,
    pub seq: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum UserCommand {
    SelectTab(Tab),
    SetRefreshRate(u64),
    SetTheme(Theme),
    SetNotifications(bool),
    Quit,
}

#[derive(Debug)]
pub enum AppEvent {
    Tick(PollTick),
    SensorLoaded {
        token: DispatchToken,
        result: Result<SensorReading, FetchError>,
    },
    PlantsLoaded {
        epoch: u64,
        result: Result<Vec<Plant>, FetchError>,
    },
    AnalyticsLoaded {
        epoch: u64,
        result: Result<AnalyticsSummary, FetchError>,
    },
    Command(UserCommand),
    Shutdown,
}

impl From<PollTick> for AppEvent {
    fn from(tick: PollTick) -> Self {
        AppEvent::Tick(tick)
    }
}

impl From<UserCommand> for AppEvent {
    fn from(command: UserCommand) -> Self {
        AppEvent::Command(command)
    }
}
