//! IP address resolution and reverse DNS lookup.
//!
//! This module turns a query string into the address that is looked up in the
//! GeoIP databases, and an address into the hostname shown in the reply.

use std::future::Future;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use anyhow::{Error, Result};
use hickory_resolver::TokioAsyncResolver;

use crate::error_handling::LookupError;

/// Forward and reverse DNS resolution.
///
/// Implemented for the hickory resolver; tests substitute a fixed table.
pub trait HostResolver {
    /// Resolves a hostname to its addresses, in the order the resolver returned them.
    fn resolve_host(&self, host: &str) -> impl Future<Output = Result<Vec<IpAddr>>> + Send;

    /// Returns the first PTR name for `ip`, or `None` if there is no record.
    fn reverse_name(&self, ip: IpAddr) -> impl Future<Output = Result<Option<String>>> + Send;
}

impl HostResolver for TokioAsyncResolver {
    fn resolve_host(&self, host: &str) -> impl Future<Output = Result<Vec<IpAddr>>> + Send {
        async move {
            let response = self.lookup_ip(host).await.map_err(Error::new)?;
            Ok(response.iter().collect())
        }
    }

    fn reverse_name(&self, ip: IpAddr) -> impl Future<Output = Result<Option<String>>> + Send {
        async move {
            let response = self.reverse_lookup(ip).await.map_err(Error::new)?;
            Ok(response.iter().next().map(|name| name.to_utf8()))
        }
    }
}

/// Validates a query as an address, resolving dotted hostnames.
///
/// - A query containing `:` must be an IPv6 literal.
/// - A query containing `.` is an IPv4 literal, or else a hostname whose first
///   resolved address is used.
/// - Anything else is rejected.
///
/// # Errors
///
/// Returns `LookupError::Unresolvable` if none of the rules produce an address.
pub async fn normalize<R: HostResolver>(query: &str, resolver: &R) -> Result<IpAddr, LookupError> {
    if query.contains(':') {
        return query
            .parse::<Ipv6Addr>()
            .map(IpAddr::V6)
            .map_err(|_| LookupError::Unresolvable);
    }

    if !query.contains('.') {
        return Err(LookupError::Unresolvable);
    }

    if let Ok(ip) = query.parse::<Ipv4Addr>() {
        return Ok(IpAddr::V4(ip));
    }

    match resolver.resolve_host(query).await {
        Ok(addresses) => match addresses.first() {
            Some(ip) => {
                log::debug!("Resolved {query} to {ip}");
                Ok(*ip)
            }
            None => {
                log::debug!("No addresses found for {query}");
                Err(LookupError::Unresolvable)
            }
        },
        Err(e) => {
            log::debug!("Failed to resolve {query}: {e}");
            Err(LookupError::Unresolvable)
        }
    }
}

/// Returns the hostname to display for `ip`.
///
/// Falls back to the address itself when the reverse lookup fails or finds no
/// PTR record. The trailing root dot of a fully qualified name is removed.
pub async fn display_hostname<R: HostResolver>(ip: IpAddr, resolver: &R) -> String {
    match resolver.reverse_name(ip).await {
        Ok(Some(name)) => {
            let name = name.strip_suffix('.').unwrap_or(&name);
            if name.is_empty() {
                ip.to_string()
            } else {
                name.to_string()
            }
        }
        Ok(None) => ip.to_string(),
        Err(e) => {
            log::debug!("Reverse DNS lookup for {ip} failed: {e}");
            ip.to_string()
        }
    }
}
