pub mod config;
pub mod error;
pub mod reports;
pub mod runtime;
pub mod session;
pub mod telemetry;
