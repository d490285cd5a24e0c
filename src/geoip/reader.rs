//! GeoIP database handles.
//!
//! The command only needs two questions answered about an address, so the
//! binary-format reader sits behind [`GeoIpDatabase`]. [`DatabaseSource`]
//! opens a handle from a database directory.

use std::future::Future;
use std::net::IpAddr;
use std::path::Path;

use anyhow::{Context, Result};
use maxminddb::Reader;

use super::types::{AsnRecord, CityRecord, Edition};
use crate::error_handling::DatabaseLookupError;

/// An opened pair of City and ASN databases.
pub trait GeoIpDatabase {
    /// Looks up location fields for `ip` in the City database.
    fn city(&self, ip: IpAddr) -> Result<CityRecord, DatabaseLookupError>;

    /// Looks up network fields for `ip` in the ASN database.
    fn asn(&self, ip: IpAddr) -> Result<AsnRecord, DatabaseLookupError>;
}

/// Opens [`GeoIpDatabase`] handles from a directory.
pub trait DatabaseSource {
    /// Handle type; released when dropped.
    type Database: GeoIpDatabase;

    /// Opens both databases found in `dir`.
    fn open(&self, dir: &Path) -> impl Future<Output = Result<Self::Database>> + Send;
}

/// City and ASN readers backed by MaxMind `.mmdb` files.
pub struct MaxMindDatabases {
    city: Reader<Vec<u8>>,
    asn: Reader<Vec<u8>>,
}

impl MaxMindDatabases {
    /// Reads `GeoLite2-City.mmdb` and `GeoLite2-ASN.mmdb` from `dir`.
    pub async fn open(dir: &Path) -> Result<Self> {
        let city = load_reader(&dir.join(Edition::City.file_name())).await?;
        let asn = load_reader(&dir.join(Edition::Asn.file_name())).await?;
        Ok(Self { city, asn })
    }
}

/// Loads a GeoIP database from a local file path
async fn load_reader(path: &Path) -> Result<Reader<Vec<u8>>> {
    log::debug!("Loading GeoIP database from: {}", path.display());

    let db_bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read GeoIP database from {}", path.display()))?;

    let reader = Reader::from_source(db_bytes)
        .with_context(|| format!("Failed to parse GeoIP database from {}", path.display()))?;

    log::debug!(
        "Loaded {} (build_{})",
        reader.metadata.database_type,
        reader.metadata.build_epoch
    );

    Ok(reader)
}

impl GeoIpDatabase for MaxMindDatabases {
    fn city(&self, ip: IpAddr) -> Result<CityRecord, DatabaseLookupError> {
        // maxminddb 0.27: lookup() yields a LookupResult; has_data() tells a miss apart
        let lookup = self.city.lookup(ip)?;
        if !lookup.has_data() {
            return Err(DatabaseLookupError::AddressNotFound(ip));
        }

        let city: maxminddb::geoip2::City = lookup
            .decode()?
            .ok_or(DatabaseLookupError::AddressNotFound(ip))?;

        Ok(CityRecord {
            country_name: city.country.names.english.map(|s| s.to_string()),
            // Subdivisions are ordered from least to most specific
            region: city
                .subdivisions
                .last()
                .and_then(|subdivision| subdivision.names.english)
                .map(|s| s.to_string()),
            city: city.city.names.english.map(|s| s.to_string()),
        })
    }

    fn asn(&self, ip: IpAddr) -> Result<AsnRecord, DatabaseLookupError> {
        let lookup = self.asn.lookup(ip)?;
        if !lookup.has_data() {
            return Err(DatabaseLookupError::AddressNotFound(ip));
        }

        let asn: maxminddb::geoip2::Asn = lookup
            .decode()?
            .ok_or(DatabaseLookupError::AddressNotFound(ip))?;

        Ok(AsnRecord {
            number: asn.autonomous_system_number,
            organization: asn.autonomous_system_organization.map(|s| s.to_string()),
        })
    }
}

/// Opens [`MaxMindDatabases`] from disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaxMindSource;

impl DatabaseSource for MaxMindSource {
    type Database = MaxMindDatabases;

    fn open(&self, dir: &Path) -> impl Future<Output = Result<MaxMindDatabases>> + Send {
        MaxMindDatabases::open(dir)
    }
}
