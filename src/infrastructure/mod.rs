// Infrastructure layer - External dependencies and adapters
pub mod clock;
pub mod config;
pub mod file_storage;
pub mod http_sensor_api;
pub mod notifier;
