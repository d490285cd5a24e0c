//! GeoIP lookup using MaxMind GeoLite2 databases.
//!
//! This module locates (or downloads) the City and ASN databases, opens them
//! per lookup and turns a record pair into a reply.

mod extract;
mod init;
mod lookup;
mod reader;
mod types;

// Re-export public API
pub use extract::maybe_decompress_targz;
pub use init::{
    build_download_urls, download_databases, find_database_dir, has_database_pair,
    locate_or_fetch, Bootstrap,
};
pub use lookup::lookup_ip;
pub use reader::{DatabaseSource, GeoIpDatabase, MaxMindDatabases, MaxMindSource};
pub use types::{AsnRecord, CityRecord, Edition, GeoIpResult};
