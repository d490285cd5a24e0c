//! Query resolution: turns the command argument into an address or hostname.

use super::UserLookup;
use crate::error_handling::LookupError;

/// Characters that mark an argument as an address or hostname rather than a nickname.
const ADDRESS_MARKERS: [char; 2] = ['.', ':'];

/// Resolves the raw command argument to the string that will be looked up.
///
/// An argument containing `.` or `:` is used as-is (trimmed). Anything else is
/// a nickname: it is lowercased and replaced by the host the registry has
/// recorded for that user.
///
/// # Errors
///
/// - `LookupError::NoSearchTerm` for a missing or blank argument
/// - `LookupError::UnknownUser` if the nickname is not in the registry
/// - `LookupError::UnknownHost` if the user's host has not been recorded
pub fn resolve_query<U>(raw_argument: Option<&str>, users: &U) -> Result<String, LookupError>
where
    U: UserLookup + ?Sized,
{
    let argument = raw_argument
        .map(str::trim)
        .filter(|arg| !arg.is_empty())
        .ok_or(LookupError::NoSearchTerm)?;

    if argument.contains(ADDRESS_MARKERS) {
        return Ok(argument.to_string());
    }

    let nickname = argument.to_lowercase();
    let user = users.find_user(&nickname).ok_or_else(|| {
        log::debug!("No user record for {}", nickname);
        LookupError::UnknownUser
    })?;

    match user.host {
        Some(host) if !host.trim().is_empty() => {
            log::debug!("Using host {} of user {}", host, user.nick);
            Ok(host)
        }
        _ => Err(LookupError::UnknownHost),
    }
}
