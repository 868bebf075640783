// # Registrar Trait
//
// Defines the interface to the external registrar client: authenticate,
// fetch a domain's record set, add, modify and delete records.
//
// ## Implementations
//
// - In-memory: `registrar::MemoryRegistrar`
// - JSON file: `registrar::FileRegistrar`
//
// ## Usage
//
// ```rust,ignore
// use freenom_dns_core::Registrar;
//
// #[tokio::main]
// async fn main() -> anyhow::Result<()> {
//     let registrar = /* Registrar implementation */;
//
//     registrar.login(&credentials).await?;
//     let info = registrar.get_domain_info("example.tk").await?;
//     println!("{} records", info.records.len());
//
//     Ok(())
// }
// ```

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::{Credentials, RegistrarConfig};
use crate::record::RegistrarRecord;

/// Everything the registrar reports about one domain
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DomainInfo {
    /// The domain the records belong to
    pub domain: String,
    /// The full record set, in registrar order
    pub records: Vec<RegistrarRecord>,
}

/// Trait for registrar client implementations
///
/// The registrar has no server-side filtering: every lookup fetches the
/// domain's full record set and filters locally.
///
/// # Thread Safety
///
/// Implementations must be usable across async tasks. Whether calls for
/// different domains may run concurrently is up to the implementation.
///
/// # Error Reporting
///
/// - Credential or session problems: `Error::RegistrarAuth`
/// - Network or server trouble: `Error::RegistrarUnavailable`
/// - Modify/delete of a record that is not there: `Error::RecordNotFound`
///
/// Implementations never retry; the caller sees the first failure.
#[async_trait]
pub trait Registrar: Send + Sync {
    /// Authenticate against the registrar
    ///
    /// Every other call requires a prior successful login.
    async fn login(&self, credentials: &Credentials) -> Result<(), crate::Error>;

    /// Fetch a domain's full record set
    ///
    /// # Parameters
    ///
    /// - `domain`: The domain name (e.g., "example.tk")
    async fn get_domain_info(&self, domain: &str) -> Result<DomainInfo, crate::Error>;

    /// Add records to a domain
    ///
    /// # Parameters
    ///
    /// - `domain`: The domain name
    /// - `records`: Records to add
    async fn add_record(
        &self,
        domain: &str,
        records: &[RegistrarRecord],
    ) -> Result<(), crate::Error>;

    /// Replace `old` with `new` in a domain
    ///
    /// The registrar receives both views and works out the difference
    /// itself.
    async fn modify_record(
        &self,
        domain: &str,
        old: &RegistrarRecord,
        new: &RegistrarRecord,
    ) -> Result<(), crate::Error>;

    /// Remove a record from a domain
    async fn delete_record(
        &self,
        domain: &str,
        record: &RegistrarRecord,
    ) -> Result<(), crate::Error>;

    /// Get the registrar name (for logging/debugging)
    fn registrar_name(&self) -> &'static str;
}

/// Helper trait for constructing registrars from configuration
#[async_trait]
pub trait RegistrarFactory: Send + Sync {
    /// Create a Registrar instance from configuration
    ///
    /// # Returns
    ///
    /// A shared Registrar trait object
    async fn create(
        &self,
        config: &RegistrarConfig,
    ) -> Result<Arc<dyn Registrar>, crate::Error>;
}
