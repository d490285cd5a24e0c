//! IP address lookup.
//!
//! Opens the databases, queries City then ASN and assembles the result that
//! becomes the reply line.

use std::net::IpAddr;
use std::path::Path;

use super::reader::{DatabaseSource, GeoIpDatabase};
use super::types::GeoIpResult;
use crate::dns::{display_hostname, HostResolver};
use crate::error_handling::{DatabaseLookupError, LookupError};

/// Looks up `ip` in the databases stored in `database_dir`.
///
/// The handles are opened for this lookup only and dropped before returning.
/// The ASN database is not consulted when the City lookup misses.
///
/// # Errors
///
/// - `LookupError::NotInDatabase` if either database has no record for `ip`
/// - `LookupError::DatabaseRead` if the files cannot be opened or decoded
pub async fn lookup_ip<S, R>(
    source: &S,
    resolver: &R,
    database_dir: &Path,
    ip: IpAddr,
) -> Result<GeoIpResult, LookupError>
where
    S: DatabaseSource,
    R: HostResolver,
{
    let databases = source.open(database_dir).await.map_err(|e| {
        log::error!("Failed to open GeoIP databases in {}: {:#}", database_dir.display(), e);
        LookupError::DatabaseRead
    })?;

    let hostname = display_hostname(ip, resolver).await;

    let location = databases.city(ip).map_err(log_lookup_failure)?;
    let network = databases.asn(ip).map_err(log_lookup_failure)?;

    Ok(GeoIpResult {
        hostname,
        location,
        network,
    })
}

fn log_lookup_failure(e: DatabaseLookupError) -> LookupError {
    match &e {
        DatabaseLookupError::AddressNotFound(_) => log::debug!("{}", e),
        DatabaseLookupError::Database(_) => log::error!("{}", e),
    }
    LookupError::from(e)
}
