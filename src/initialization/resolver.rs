//! DNS resolver initialization.
//!
//! This module provides functions to initialize the DNS resolver with proper
//! timeout configuration.

use std::sync::Arc;

use hickory_resolver::config::{ResolverConfig, ResolverOpts};
use hickory_resolver::TokioAsyncResolver;

/// Initializes the DNS resolver for hostname and reverse lookups.
///
/// Uses the system configuration (`/etc/resolv.conf`) when it can be read, and
/// falls back to the default upstream servers otherwise. Timeouts are short so
/// an unresponsive server cannot stall a command for long.
pub fn init_resolver() -> Arc<TokioAsyncResolver> {
    let (config, mut opts) = match hickory_resolver::system_conf::read_system_conf() {
        Ok(system) => system,
        Err(e) => {
            log::debug!("Falling back to default DNS configuration: {e}");
            (ResolverConfig::default(), ResolverOpts::default())
        }
    };

    opts.timeout = crate::config::DNS_TIMEOUT;
    opts.attempts = 2;

    Arc::new(TokioAsyncResolver::tokio(config, opts))
}
