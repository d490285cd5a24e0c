//! Plugin configuration and constants.
//!
//! This module provides:
//! - Configuration constants (file names, endpoints, limits, reply texts)
//! - Host-facing settings (`Settings`, `GeoIpSection`)
//! - CLI option types for the console front-end

mod constants;
mod settings;
mod types;

// Re-export all constants
pub use constants::*;
pub use settings::{GeoIpSection, Settings};
pub use types::{LogFormat, LogLevel, Opt};
