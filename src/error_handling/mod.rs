//! Error handling.
//!
//! Errors are categorized into:
//! - **Initialization** errors of the console front-end (logger, HTTP client)
//! - **Lookup** errors, each carrying the reply text shown to the user
//! - **Database** errors returned by a GeoIP database handle

mod types;

// Re-export public API
pub use types::{DatabaseLookupError, InitializationError, LookupError};
