pub mod config;
pub mod error;
pub mod scoresheet;
pub mod telemetry;
pub mod training;
