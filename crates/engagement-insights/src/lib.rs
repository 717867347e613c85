pub mod analysis;
pub mod config;
pub mod error;
pub mod output;
pub mod session;
pub mod survey;
pub mod tasks;
pub mod telemetry;
