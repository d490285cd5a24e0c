//! HTTP client initialization.

use std::time::Duration;

use reqwest::ClientBuilder;

use crate::error_handling::InitializationError;

/// Initializes the HTTP client used for database downloads.
///
/// Creates a `reqwest::Client` configured with the given User-Agent and an
/// overall request timeout. Database files are large, so the timeout should be
/// generous.
///
/// # Errors
///
/// Returns `InitializationError::HttpClientError` if client creation fails.
pub fn init_client(
    user_agent: &str,
    timeout: Duration,
) -> Result<reqwest::Client, InitializationError> {
    let client = ClientBuilder::new()
        .timeout(timeout)
        .user_agent(user_agent.to_string())
        .build()?;
    Ok(client)
}
