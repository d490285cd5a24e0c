//! GeoIP data structures.
//!
//! This module defines the database editions and the records returned by a
//! lookup, plus the reply line assembled from them.

use std::fmt;

use crate::config::{ASN_DB_FILE, CITY_DB_FILE, FIELD_SEPARATOR};

/// A MaxMind GeoLite2 database variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edition {
    /// Autonomous system number and organization
    Asn,
    /// Country, subdivisions and city
    City,
}

impl Edition {
    /// Editions in the order they are downloaded.
    pub const DOWNLOAD_ORDER: [Edition; 2] = [Edition::Asn, Edition::City];

    /// MaxMind's name for the edition (`ASN`, `City`).
    pub fn name(self) -> &'static str {
        match self {
            Edition::Asn => "ASN",
            Edition::City => "City",
        }
    }

    /// The `edition_id` query parameter value.
    pub fn edition_id(self) -> String {
        format!("GeoLite2-{}", self.name())
    }

    /// File name of the database on disk.
    pub fn file_name(self) -> &'static str {
        match self {
            Edition::Asn => ASN_DB_FILE,
            Edition::City => CITY_DB_FILE,
        }
    }
}

/// Location fields of a City database record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CityRecord {
    pub country_name: Option<String>,
    /// Name of the most specific subdivision (e.g. state or province)
    pub region: Option<String>,
    pub city: Option<String>,
}

/// Network fields of an ASN database record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AsnRecord {
    pub number: Option<u32>,
    pub organization: Option<String>,
}

/// Everything known about a looked-up address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeoIpResult {
    pub hostname: String,
    pub location: CityRecord,
    pub network: AsnRecord,
}

impl GeoIpResult {
    /// Returns the `Label: value` fields in reply order.
    ///
    /// `Hostname`, `Location` and `ISP` are always present; `Region` and
    /// `City` only when the database has a non-empty name for them.
    pub fn fields(&self) -> Vec<String> {
        let mut parts = Vec::with_capacity(5);
        parts.push(format!("Hostname: {}", self.hostname));
        parts.push(format!(
            "Location: {}",
            non_empty(&self.location.country_name).unwrap_or("Unknown")
        ));
        if let Some(region) = non_empty(&self.location.region) {
            parts.push(format!("Region: {}", region));
        }
        if let Some(city) = non_empty(&self.location.city) {
            parts.push(format!("City: {}", city));
        }
        let number = self
            .network
            .number
            .map(|n| n.to_string())
            .unwrap_or_else(|| "Unknown".to_string());
        let organization = non_empty(&self.network.organization).unwrap_or("Unknown");
        parts.push(format!("ISP: AS{} {}", number, organization));
        parts
    }
}

impl fmt::Display for GeoIpResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.fields().join(FIELD_SEPARATOR))
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}
