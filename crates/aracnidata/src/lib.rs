pub mod assessment;
pub mod config;
pub mod consultation;
pub mod error;
pub mod projects;
pub mod telemetry;
