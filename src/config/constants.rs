//! Configuration constants.
//!
//! This module defines the file names, download endpoints, limits and reply
//! texts used throughout the plugin.

use std::time::Duration;

// Database files
/// File name of the GeoLite2 City database
pub const CITY_DB_FILE: &str = "GeoLite2-City.mmdb";
/// File name of the GeoLite2 ASN database
pub const ASN_DB_FILE: &str = "GeoLite2-ASN.mmdb";
/// System-wide directory searched after the configured and home directories
pub const SYSTEM_GEOIP_DIR: &str = "/usr/share/GeoIP";

// Download endpoints
/// MaxMind direct download endpoint (requires a license key)
pub const MAXMIND_DOWNLOAD_BASE: &str = "https://download.maxmind.com/app/geoip_download";
/// Keyless mirror serving raw `.mmdb` files; `{edition}` is replaced by the edition name
pub const KEYLESS_MIRROR_TEMPLATE: &str =
    "https://raw.githubusercontent.com/P3TERX/GeoLite.mmdb/download/GeoLite2-{edition}.mmdb";
/// Environment variable consulted for the MaxMind license key
pub const MAXMIND_LICENSE_KEY_ENV: &str = "MAXMIND_LICENSE_KEY";

// Download limits
/// Maximum accepted size of a single database download (City is ~60MB uncompressed)
pub const MAX_GEOIP_DOWNLOAD_SIZE: usize = 200 * 1024 * 1024;
/// Default HTTP timeout for database downloads, in seconds
pub const DEFAULT_DOWNLOAD_TIMEOUT_SECS: u64 = 300;
/// DNS query timeout
pub const DNS_TIMEOUT: Duration = Duration::from_secs(3);
/// User-Agent sent with database downloads
pub const DEFAULT_USER_AGENT: &str = concat!("iplookup/", env!("CARGO_PKG_VERSION"));

// Command surface
/// Names the command answers to
pub const COMMAND_NAMES: [&str; 2] = ["iplookup", "ip"];
/// Prefix that marks a chat line as a command
pub const COMMAND_PREFIX: &str = ".";
/// Prefix prepended to every line the command sends
pub const OUTPUT_PREFIX: &str = "[IP/Host Lookup] ";
/// Usage example shown in help output
pub const COMMAND_EXAMPLE: &str = ".ip 8.8.8.8";
/// Separator between the fields of a lookup reply
pub const FIELD_SEPARATOR: &str = " | ";

// Replies
/// Sent before a (possibly slow) database download starts
pub const DOWNLOAD_NOTICE: &str = "Downloading GeoIP database, please wait...";
