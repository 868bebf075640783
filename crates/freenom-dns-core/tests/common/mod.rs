//! Test doubles and common utilities for contract tests
//!
//! `RecordingRegistrar` wraps the in-memory registrar and counts every call
//! so tests can assert which registrar operations an entry point issued.

#![allow(dead_code)]

use freenom_dns_core::config::{Credentials, ProviderConfig};
use freenom_dns_core::error::{Error, Result};
use freenom_dns_core::record::{DnsRecord, RecordType, RegistrarRecord};
use freenom_dns_core::registrar::MemoryRegistrar;
use freenom_dns_core::traits::{DomainInfo, Registrar};
use freenom_dns_core::{ConfigureOutcome, FreenomProvider};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// A registrar that records how often each operation was called
pub struct RecordingRegistrar {
    inner: MemoryRegistrar,
    login_call_count: Arc<AtomicUsize>,
    get_call_count: Arc<AtomicUsize>,
    add_call_count: Arc<AtomicUsize>,
    modify_call_count: Arc<AtomicUsize>,
    delete_call_count: Arc<AtomicUsize>,
    /// When set, every fetch fails as if the registrar were down
    offline: Arc<AtomicBool>,
}

impl RecordingRegistrar {
    pub fn new() -> Self {
        Self {
            inner: MemoryRegistrar::new(),
            login_call_count: Arc::new(AtomicUsize::new(0)),
            get_call_count: Arc::new(AtomicUsize::new(0)),
            add_call_count: Arc::new(AtomicUsize::new(0)),
            modify_call_count: Arc::new(AtomicUsize::new(0)),
            delete_call_count: Arc::new(AtomicUsize::new(0)),
            offline: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Create a registrar that only accepts the given credentials
    pub fn with_credentials(credentials: Credentials) -> Self {
        Self {
            inner: MemoryRegistrar::with_credentials(credentials),
            ..Self::new()
        }
    }

    /// Create a new RecordingRegistrar that shares state and counters with an existing one
    pub fn sharing_counters_with(other: &Self) -> Self {
        Self {
            inner: other.inner.clone(),
            login_call_count: Arc::clone(&other.login_call_count),
            get_call_count: Arc::clone(&other.get_call_count),
            add_call_count: Arc::clone(&other.add_call_count),
            modify_call_count: Arc::clone(&other.modify_call_count),
            delete_call_count: Arc::clone(&other.delete_call_count),
            offline: Arc::clone(&other.offline),
        }
    }

    /// The wrapped account, for seeding domains
    pub fn account(&self) -> &MemoryRegistrar {
        &self.inner
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub fn login_call_count(&self) -> usize {
        self.login_call_count.load(Ordering::SeqCst)
    }

    pub fn get_call_count(&self) -> usize {
        self.get_call_count.load(Ordering::SeqCst)
    }

    pub fn add_call_count(&self) -> usize {
        self.add_call_count.load(Ordering::SeqCst)
    }

    pub fn modify_call_count(&self) -> usize {
        self.modify_call_count.load(Ordering::SeqCst)
    }

    pub fn delete_call_count(&self) -> usize {
        self.delete_call_count.load(Ordering::SeqCst)
    }

    /// Number of mutating calls (add, modify, delete)
    pub fn mutation_count(&self) -> usize {
        self.add_call_count() + self.modify_call_count() + self.delete_call_count()
    }
}

#[async_trait::async_trait]
impl Registrar for RecordingRegistrar {
    async fn login(&self, credentials: &Credentials) -> Result<()> {
        self.login_call_count.fetch_add(1, Ordering::SeqCst);
        self.inner.login(credentials).await
    }

    async fn get_domain_info(&self, domain: &str) -> Result<DomainInfo> {
        self.get_call_count.fetch_add(1, Ordering::SeqCst);
        if self.offline.load(Ordering::SeqCst) {
            return Err(Error::unavailable("connection refused"));
        }
        self.inner.get_domain_info(domain).await
    }

    async fn add_record(&self, domain: &str, records: &[RegistrarRecord]) -> Result<()> {
        self.add_call_count.fetch_add(1, Ordering::SeqCst);
        self.inner.add_record(domain, records).await
    }

    async fn modify_record(
        &self,
        domain: &str,
        old: &RegistrarRecord,
        new: &RegistrarRecord,
    ) -> Result<()> {
        self.modify_call_count.fetch_add(1, Ordering::SeqCst);
        self.inner.modify_record(domain, old, new).await
    }

    async fn delete_record(&self, domain: &str, record: &RegistrarRecord) -> Result<()> {
        self.delete_call_count.fetch_add(1, Ordering::SeqCst);
        self.inner.delete_record(domain, record).await
    }

    fn registrar_name(&self) -> &'static str {
        "recording"
    }
}

/// Environment lookup that finds nothing
pub fn no_env(_: &str) -> Option<String> {
    None
}

/// Configuration with explicit test credentials
pub fn test_config() -> ProviderConfig {
    ProviderConfig::new()
        .with_username("alice")
        .with_password("secret")
}

/// A provider logged in to a registrar that shares counters with `registrar`
pub async fn configured_provider(registrar: &RecordingRegistrar) -> FreenomProvider {
    let mut provider = FreenomProvider::new("test");
    let outcome = provider
        .configure_with_registrar(
            Arc::new(RecordingRegistrar::sharing_counters_with(registrar)),
            &test_config(),
            no_env,
        )
        .await
        .expect("configuration succeeds");
    assert_eq!(outcome, ConfigureOutcome::Configured);
    provider
}

/// An A record in example.tk
pub fn a_record(name: &str, value: &str) -> DnsRecord {
    DnsRecord {
        domain: "example.tk".to_string(),
        record_type: RecordType::A,
        name: name.to_string(),
        value: value.to_string(),
        priority: 0,
        ttl: 3600,
    }
}
