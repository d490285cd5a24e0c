//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! of the console front-end.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::constants::{
    DEFAULT_DOWNLOAD_TIMEOUT_SECS, DEFAULT_USER_AGENT, MAXMIND_LICENSE_KEY_ENV,
};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Command-line options for the console front-end.
///
/// The console stands in for the chat host: it supplies the bot home
/// directory, the `[ip]` settings and a static user table.
///
/// # Examples
///
/// ```bash
/// # One-shot lookup
/// iplookup 8.8.8.8
///
/// # Interactive: read ".ip <query>" lines from stdin
/// iplookup --user alice=alice.example.org
///
/// # Use databases from a fixed directory
/// iplookup --db-path /srv/geoip example.com
/// ```
#[derive(Debug, Parser)]
#[command(
    name = "iplookup",
    about = "Looks up GeoIP location and ASN details for an IP, hostname, or nickname."
)]
pub struct Opt {
    /// Address, hostname, or nickname to look up (reads ".ip <query>" lines from stdin if omitted)
    pub query: Option<String>,

    /// Bot home directory; databases are downloaded here when missing
    #[arg(long, default_value = ".")]
    pub homedir: PathBuf,

    /// Directory containing GeoLite2-City.mmdb and GeoLite2-ASN.mmdb
    #[arg(long)]
    pub db_path: Option<PathBuf>,

    /// MaxMind license key; without one the keyless mirror is used
    #[arg(long, env = MAXMIND_LICENSE_KEY_ENV, hide_env_values = true)]
    pub license_key: Option<String>,

    /// Directory a relative --db-path is resolved against (defaults to the working directory)
    #[arg(long)]
    pub config_dir: Option<PathBuf>,

    /// Nickname replies are addressed to
    #[arg(long, default_value = "console")]
    pub nick: String,

    /// Known chat user as NICK=HOST (HOST may be empty); repeatable
    #[arg(long = "user", value_name = "NICK=HOST")]
    pub users: Vec<String>,

    /// Download timeout in seconds
    #[arg(long, default_value_t = DEFAULT_DOWNLOAD_TIMEOUT_SECS)]
    pub timeout_seconds: u64,

    /// HTTP User-Agent header value for downloads
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,
}
