//! # Menyesha Shared
//!
//! Configuration, telemetry, and shared constants for the Menyesha platform.

pub mod config;
pub mod constants;
pub mod error;
pub mod telemetry;

pub use config::AppConfig;
pub use error::AppError;
