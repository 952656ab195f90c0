pub mod calendar_yaml;
pub mod data_source;
pub mod delivery_forecast;
pub mod duration_projector;
pub mod estimation_api;
pub mod forecast_config;
pub mod progress_analyzer;
pub mod record_analysis;
pub mod record_session;
pub mod snapshot_yaml;
pub mod velocity_estimator;
