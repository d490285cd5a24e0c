//! iplookup library: GeoIP lookups for an IRC bot command
//!
//! This library implements the `.iplookup` / `.ip` command: it turns an IP
//! address, hostname, or nickname into a one-line summary of the address's
//! reverse DNS name, location and network operator, using the MaxMind GeoLite2
//! City and ASN databases. Missing databases are downloaded on first use, from
//! MaxMind when a license key is configured and from a keyless mirror otherwise.
//!
//! The chat host is reached through the [`plugin::UserLookup`] and
//! [`plugin::Reply`] traits, so the command can be driven by any bot framework.
//! The bundled binary drives it from the console.
//!
//! # Example
//!
//! ```no_run
//! use iplookup::config::Settings;
//! use iplookup::geoip::MaxMindSource;
//! use iplookup::initialization::{init_client, init_resolver};
//! use iplookup::plugin::IpLookup;
//! use iplookup::{ConsoleReply, StaticUsers};
//! use std::time::Duration;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = init_client("iplookup", Duration::from_secs(300))?;
//! let command = IpLookup::new(Settings::new("."), client, init_resolver(), MaxMindSource);
//!
//! let users = StaticUsers::parse(&["alice=alice.example.org".to_string()])?;
//! command.handle(Some("8.8.8.8"), &users, &ConsoleReply::new("console")).await;
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

#![warn(missing_docs)]

mod app;
pub mod config;
pub mod dns;
mod error_handling;
pub mod geoip;
pub mod initialization;
pub mod plugin;
#[cfg(test)]
mod test_helpers;

// Re-export public API
pub use app::{ConsoleReply, StaticUsers};
pub use config::{LogFormat, LogLevel, Opt, Settings};
pub use error_handling::{DatabaseLookupError, InitializationError, LookupError};
pub use run::{run_console, settings_from_opt};

// Console driver: one-shot query or a stream of command lines from stdin
mod run {
    use anyhow::{Context, Result};
    use std::path::PathBuf;
    use std::time::Duration;

    use log::{info, warn};
    use tokio::io::{AsyncBufReadExt, BufReader};

    use crate::app::{ConsoleReply, StaticUsers};
    use crate::config::{GeoIpSection, Opt, Settings, COMMAND_EXAMPLE};
    use crate::geoip::MaxMindSource;
    use crate::initialization::{init_client, init_resolver};
    use crate::plugin::{parse_trigger, IpLookup};

    /// Builds the plugin settings from the console options.
    ///
    /// `config_dir` is the directory a relative `--db-path` is resolved
    /// against when `--config-dir` is not given.
    pub fn settings_from_opt(opt: &Opt, config_dir: PathBuf) -> Settings {
        let mut settings = Settings::new(opt.homedir.clone());
        settings.config_dir = opt.config_dir.clone().unwrap_or(config_dir);
        settings.geoip = GeoIpSection {
            db_path: opt.db_path.clone(),
            maxmind_license_key: opt.license_key.clone(),
        };
        settings
    }

    /// Runs the command from the console.
    ///
    /// With a query, performs a single lookup. Without one, reads lines from
    /// stdin and runs every `.ip` / `.iplookup` command among them; other
    /// lines are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the `--user` table is malformed, the working
    /// directory cannot be determined, or the HTTP client cannot be created.
    /// Lookup failures are not errors; they are printed as replies.
    pub async fn run_console(opt: Opt) -> Result<()> {
        let users = StaticUsers::parse(&opt.users).context("Failed to parse --user entries")?;
        let cwd = std::env::current_dir().context("Failed to determine working directory")?;
        let settings = settings_from_opt(&opt, cwd);

        if settings.geoip.license_key().is_some() {
            info!("MaxMind license key configured; downloads use MaxMind");
        }

        let client = init_client(&opt.user_agent, Duration::from_secs(opt.timeout_seconds))
            .context("Failed to initialize HTTP client")?;
        let resolver = init_resolver();
        let command = IpLookup::new(settings, client, resolver, MaxMindSource);
        let out = ConsoleReply::new(opt.nick.as_str());

        if let Some(query) = opt.query.as_deref() {
            command.handle(Some(query), &users, &out).await;
            return Ok(());
        }

        info!("Reading commands from stdin, e.g. {}", COMMAND_EXAMPLE);
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            let line = match lines.next_line().await {
                Ok(Some(line)) => line,
                Ok(None) => break,
                Err(e) => {
                    warn!("Failed to read line from input: {e}");
                    break;
                }
            };

            let Some(argument) = parse_trigger(&line) else {
                continue;
            };
            command.handle(argument, &users, &out).await;
        }

        Ok(())
    }

}
