// # Memory Registrar
//
// In-memory implementation of Registrar.
//
// ## Purpose
//
// Behaves like the real registrar for one account without any network or
// persistence. Used by tests and by hosts that only need a scratch zone.
//
// ## Crash Behavior
//
// - All records are lost when the process exits

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::{ZoneBook, check_credentials};
use crate::config::{Credentials, RegistrarConfig};
use crate::record::RegistrarRecord;
use crate::traits::{DomainInfo, Registrar, RegistrarFactory};
use crate::Error;

const REGISTRAR_NAME: &str = "memory";

#[derive(Debug, Default)]
struct MemoryAccount {
    book: ZoneBook,
    expected: Option<Credentials>,
    logged_in: bool,
}

impl MemoryAccount {
    fn require_login(&self) -> Result<(), Error> {
        if !self.logged_in {
            return Err(Error::auth("not logged in"));
        }
        Ok(())
    }
}

/// In-memory registrar implementation
///
/// # Example
///
/// ```rust,no_run
/// use freenom_dns_core::config::Credentials;
/// use freenom_dns_core::registrar::MemoryRegistrar;
/// use freenom_dns_core::traits::Registrar;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let registrar = MemoryRegistrar::new();
///     registrar.add_domain("example.tk").await;
///
///     registrar.login(&Credentials::new("alice", "secret")).await?;
///     let info = registrar.get_domain_info("example.tk").await?;
///     assert!(info.records.is_empty());
///
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct MemoryRegistrar {
    inner: Arc<RwLock<MemoryAccount>>,
}

impl MemoryRegistrar {
    /// Create an empty account that accepts any non-empty credentials
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(MemoryAccount::default())),
        }
    }

    /// Create an empty account that only accepts the given credentials
    pub fn with_credentials(credentials: Credentials) -> Self {
        Self {
            inner: Arc::new(RwLock::new(MemoryAccount {
                expected: Some(credentials),
                ..MemoryAccount::default()
            })),
        }
    }

    /// Put a domain into the account. Returns `false` if it was already there.
    pub async fn add_domain(&self, domain: &str) -> bool {
        self.inner.write().await.book.add_domain(domain)
    }

    /// Names of all domains in the account, sorted
    pub async fn domains(&self) -> Vec<String> {
        self.inner.read().await.book.domain_names()
    }

    /// Whether a login has succeeded
    pub async fn is_logged_in(&self) -> bool {
        self.inner.read().await.logged_in
    }
}

impl Default for MemoryRegistrar {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Registrar for MemoryRegistrar {
    async fn login(&self, credentials: &Credentials) -> Result<(), Error> {
        let mut guard = self.inner.write().await;
        check_credentials(guard.expected.as_ref(), credentials)?;
        guard.logged_in = true;
        Ok(())
    }

    async fn get_domain_info(&self, domain: &str) -> Result<DomainInfo, Error> {
        let guard = self.inner.read().await;
        guard.require_login()?;
        guard.book.info(REGISTRAR_NAME, domain)
    }

    async fn add_record(&self, domain: &str, records: &[RegistrarRecord]) -> Result<(), Error> {
        let mut guard = self.inner.write().await;
        guard.require_login()?;
        guard.book.add(domain, records);
        Ok(())
    }

    async fn modify_record(
        &self,
        domain: &str,
        old: &RegistrarRecord,
        new: &RegistrarRecord,
    ) -> Result<(), Error> {
        let mut guard = self.inner.write().await;
        guard.require_login()?;
        guard.book.modify(domain, old, new)
    }

    async fn delete_record(&self, domain: &str, record: &RegistrarRecord) -> Result<(), Error> {
        let mut guard = self.inner.write().await;
        guard.require_login()?;
        guard.book.delete(domain, record)
    }

    fn registrar_name(&self) -> &'static str {
        REGISTRAR_NAME
    }
}

/// Factory for [`MemoryRegistrar`]
pub struct MemoryRegistrarFactory;

#[async_trait]
impl RegistrarFactory for MemoryRegistrarFactory {
    async fn create(&self, config: &RegistrarConfig) -> Result<Arc<dyn Registrar>, Error> {
        match config {
            RegistrarConfig::Memory => Ok(Arc::new(MemoryRegistrar::new())),
            _ => Err(Error::config("Invalid config for memory registrar")),
        }
    }
}
