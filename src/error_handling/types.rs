//! Error type definitions.
//!
//! This module defines the initialization errors of the console front-end and
//! the user-facing failures of the lookup command.

use std::net::IpAddr;

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Failures of the lookup command.
///
/// Every variant is recoverable; its `Display` text is the exact reply sent
/// back to the user who triggered the command.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// The command was triggered without an argument.
    #[error("No search term.")]
    NoSearchTerm,

    /// The argument looked like a nickname the host has no record of.
    #[error("I'm not aware of this user.")]
    UnknownUser,

    /// The nickname is known but its host has not been recorded yet.
    #[error("I don't know that user's host.")]
    UnknownHost,

    /// The query is neither a valid address nor a resolvable hostname.
    #[error("Unable to resolve IP/Hostname")]
    Unresolvable,

    /// No database directory was found and downloading one failed.
    #[error("Sorry, I don't have a GeoIP database to use for this lookup.")]
    NoDatabase,

    /// The address is valid but absent from the database.
    #[error("The address is not in the database.")]
    NotInDatabase,

    /// The database files exist but could not be opened or decoded.
    #[error("Sorry, I couldn't read the GeoIP database.")]
    DatabaseRead,
}

/// Errors returned by a GeoIP database handle.
#[derive(Error, Debug)]
pub enum DatabaseLookupError {
    /// The address has no record in the database.
    #[error("Address {0} not found in GeoIP database")]
    AddressNotFound(IpAddr),

    /// The reader failed to look up or decode the record.
    #[error("GeoIP database error: {0}")]
    Database(#[from] maxminddb::MaxMindDbError),
}

impl From<DatabaseLookupError> for LookupError {
    fn from(e: DatabaseLookupError) -> Self {
        match e {
            DatabaseLookupError::AddressNotFound(_) => LookupError::NotInDatabase,
            DatabaseLookupError::Database(_) => LookupError::DatabaseRead,
        }
    }
}
