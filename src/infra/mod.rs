pub mod error;
pub mod http;
pub mod services;
pub mod telemetry;
