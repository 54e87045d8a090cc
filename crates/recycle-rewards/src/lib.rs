pub mod config;
pub mod error;
pub mod recycling;
pub mod rewards;
pub mod telemetry;
