// Application layer - Use cases, state machine and seams to the outside world
pub mod dashboard_app;
pub mod events;
pub mod notification_gate;
pub mod poller;
pub mod render;
pub mod sensor_api;
pub mod series_adapter;
pub mod settings_service;
pub mod status_indicator;
pub mod tab_controller;

#[cfg(test)]
pub(crate) mod test_support;
