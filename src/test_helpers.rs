//! Shared test helpers for the command and its stages.
//!
//! This module provides doubles for the resolver, database, user registry and
//! reply capabilities, so the command can be exercised without a network or a bot.

use std::collections::HashMap;
use std::future::Future;
use std::net::IpAddr;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::Result;

use crate::dns::HostResolver;
use crate::error_handling::DatabaseLookupError;
use crate::geoip::{AsnRecord, CityRecord, DatabaseSource, GeoIpDatabase};
use crate::plugin::{ChatUser, Reply, UserLookup};

/// Resolver answering from fixed forward and PTR tables.
#[derive(Default)]
pub struct FakeResolver {
    forward: HashMap<String, Vec<IpAddr>>,
    ptr: HashMap<IpAddr, String>,
    forward_queries: AtomicUsize,
}

impl FakeResolver {
    pub fn with_host(mut self, host: &str, addresses: &[IpAddr]) -> Self {
        self.forward.insert(host.to_string(), addresses.to_vec());
        self
    }

    pub fn with_ptr(mut self, ip: IpAddr, name: &str) -> Self {
        self.ptr.insert(ip, name.to_string());
        self
    }

    pub fn forward_queries(&self) -> usize {
        self.forward_queries.load(Ordering::SeqCst)
    }
}

impl HostResolver for FakeResolver {
    fn resolve_host(&self, host: &str) -> impl Future<Output = Result<Vec<IpAddr>>> + Send {
        self.forward_queries.fetch_add(1, Ordering::SeqCst);
        let answer = self
            .forward
            .get(host)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("no record found for {}", host));
        async move { answer }
    }

    fn reverse_name(&self, ip: IpAddr) -> impl Future<Output = Result<Option<String>>> + Send {
        let answer = self.ptr.get(&ip).cloned();
        async move {
            match answer {
                Some(name) => Ok(Some(name)),
                None => Err(anyhow::anyhow!("no PTR record for {}", ip)),
            }
        }
    }
}

/// In-memory databases handed out by [`FakeDatabaseSource`].
pub struct FakeDatabases {
    city: HashMap<IpAddr, CityRecord>,
    asn: HashMap<IpAddr, AsnRecord>,
    asn_queries: Arc<AtomicUsize>,
}

impl GeoIpDatabase for FakeDatabases {
    fn city(&self, ip: IpAddr) -> Result<CityRecord, DatabaseLookupError> {
        self.city
            .get(&ip)
            .cloned()
            .ok_or(DatabaseLookupError::AddressNotFound(ip))
    }

    fn asn(&self, ip: IpAddr) -> Result<AsnRecord, DatabaseLookupError> {
        self.asn_queries.fetch_add(1, Ordering::SeqCst);
        self.asn
            .get(&ip)
            .cloned()
            .ok_or(DatabaseLookupError::AddressNotFound(ip))
    }
}

/// Database source that records which directories were opened.
#[derive(Default)]
pub struct FakeDatabaseSource {
    city: HashMap<IpAddr, CityRecord>,
    asn: HashMap<IpAddr, AsnRecord>,
    fail_open: bool,
    opened: Mutex<Vec<PathBuf>>,
    asn_queries: Arc<AtomicUsize>,
}

impl FakeDatabaseSource {
    pub fn failing() -> Self {
        Self {
            fail_open: true,
            ..Self::default()
        }
    }

    pub fn with_city(mut self, ip: IpAddr, record: CityRecord) -> Self {
        self.city.insert(ip, record);
        self
    }

    pub fn with_asn(mut self, ip: IpAddr, record: AsnRecord) -> Self {
        self.asn.insert(ip, record);
        self
    }

    pub fn opened_dirs(&self) -> Vec<PathBuf> {
        self.opened.lock().unwrap().clone()
    }

    pub fn asn_queries(&self) -> usize {
        self.asn_queries.load(Ordering::SeqCst)
    }
}

impl DatabaseSource for FakeDatabaseSource {
    type Database = FakeDatabases;

    fn open(&self, dir: &Path) -> impl Future<Output = Result<FakeDatabases>> + Send {
        self.opened.lock().unwrap().push(dir.to_path_buf());
        let result = if self.fail_open {
            Err(anyhow::anyhow!("Failed to parse GeoIP database"))
        } else {
            Ok(FakeDatabases {
                city: self.city.clone(),
                asn: self.asn.clone(),
                asn_queries: Arc::clone(&self.asn_queries),
            })
        };
        async move { result }
    }
}

/// User registry keyed by lowercase nickname.
#[derive(Default)]
pub struct FakeUsers {
    users: HashMap<String, Option<String>>,
    queries: AtomicUsize,
}

impl FakeUsers {
    pub fn with_user(mut self, nick: &str, host: Option<&str>) -> Self {
        self.users
            .insert(nick.to_string(), host.map(str::to_string));
        self
    }

    pub fn queries(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }
}

impl UserLookup for FakeUsers {
    fn find_user(&self, nickname: &str) -> Option<ChatUser> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        self.users.get(nickname).map(|host| ChatUser {
            nick: nickname.to_string(),
            host: host.clone(),
        })
    }
}

/// A message sent through [`RecordingReply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sent {
    Say(String),
    Reply(String),
}

/// Collects everything the command sends.
#[derive(Default)]
pub struct RecordingReply {
    sent: Mutex<Vec<Sent>>,
}

impl RecordingReply {
    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }
}

impl Reply for RecordingReply {
    fn say(&self, text: &str) {
        self.sent.lock().unwrap().push(Sent::Say(text.to_string()));
    }

    fn reply(&self, text: &str) {
        self.sent.lock().unwrap().push(Sent::Reply(text.to_string()));
    }
}
