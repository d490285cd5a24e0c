//! Application initialization and resource setup.
//!
//! This module provides functions to initialize the shared resources the
//! command needs:
//! - Logger
//! - HTTP client (database downloads)
//! - DNS resolver (forward and reverse lookups)

mod client;
mod logger;
mod resolver;

// Re-export public API
pub use client::init_client;
pub use logger::init_logger_with;
pub use resolver::init_resolver;
