// # Freenom Provider
//
// Entry points a host calls: configuration, the `freenom_dns_record`
// resource and the three read-only data sources.
//
// ## Configuration Flow
//
// ```text
// ProviderConfig --resolve--> Credentials --registry--> Registrar --login--> Session
//                     |
//                     +--> Deferred (unknown value): stay unconfigured
// ```
//
// Every resource and data source call needs the session and fails with
// `Error::NotConfigured` without one.

use serde::Serialize;
use std::sync::Arc;

use crate::config::{CredentialResolution, Credentials, ProviderConfig};
use crate::error::{Error, Result};
use crate::identity::parse_id;
use crate::locator::RecordLocator;
use crate::plan::{PlannedChange, ReplacementPolicy, plan_change};
use crate::reconciler::{DeleteOutcome, Reconciler};
use crate::record::{DnsRecord, ManagedRecord, RegistrarRecord};
use crate::registry::RegistrarRegistry;
use crate::session::Session;
use crate::traits::{Registrar, RegistrarFactory};
use crate::validation::{validate_domain, validate_record};

/// Outcome of [`FreenomProvider::configure`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigureOutcome {
    /// A session was established
    Configured,
    /// A credential is not known yet; the provider stays unconfigured
    Deferred {
        /// The attribute that is still unknown
        attribute: &'static str,
    },
}

/// Every record of a domain
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DnsRecordList {
    pub domain: String,
    pub records: Vec<ManagedRecord>,
}

/// Records of a domain that point at one value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReverseDnsRecordList {
    pub domain: String,
    pub value: String,
    pub records: Vec<ManagedRecord>,
}

/// The provider
///
/// # Example
///
/// ```rust,no_run
/// use freenom_dns_core::config::ProviderConfig;
/// use freenom_dns_core::provider::FreenomProvider;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let mut provider = FreenomProvider::new(env!("CARGO_PKG_VERSION"));
///     let config = ProviderConfig::new().with_username("alice").with_password("secret");
///     provider.configure(&config, |key| std::env::var(key).ok()).await?;
///
///     let list = provider.dns_records("example.tk").await?;
///     println!("{} records", list.records.len());
///     Ok(())
/// }
/// ```
pub struct FreenomProvider {
    version: String,
    registry: RegistrarRegistry,
    replacement_policy: ReplacementPolicy,
    session: Option<Session>,
}

impl FreenomProvider {
    /// Create an unconfigured provider with the built-in registrars
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            registry: RegistrarRegistry::with_builtins(),
            replacement_policy: ReplacementPolicy::default(),
            session: None,
        }
    }

    /// Use a different replacement policy for [`plan`](Self::plan)
    pub fn with_replacement_policy(mut self, policy: ReplacementPolicy) -> Self {
        self.replacement_policy = policy;
        self
    }

    /// Provider version
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Make another registrar type available to configuration
    pub fn register_registrar(&self, name: impl Into<String>, factory: Box<dyn RegistrarFactory>) {
        self.registry.register(name, factory);
    }

    /// Resolve credentials, build the configured registrar and log in.
    ///
    /// `env` looks up the environment variables used for null credentials.
    /// On failure the provider keeps whatever session it had before.
    pub async fn configure<F>(&mut self, config: &ProviderConfig, env: F) -> Result<ConfigureOutcome>
    where
        F: Fn(&str) -> Option<String>,
    {
        config.validate()?;
        let credentials = match Self::resolve(config, env)? {
            Ok(credentials) => credentials,
            Err(outcome) => return Ok(outcome),
        };

        let registrar = self.registry.create(&config.registrar).await?;
        self.connect(registrar, &credentials).await
    }

    /// Like [`configure`](Self::configure), against an existing registrar.
    pub async fn configure_with_registrar<F>(
        &mut self,
        registrar: Arc<dyn Registrar>,
        config: &ProviderConfig,
        env: F,
    ) -> Result<ConfigureOutcome>
    where
        F: Fn(&str) -> Option<String>,
    {
        let credentials = match Self::resolve(config, env)? {
            Ok(credentials) => credentials,
            Err(outcome) => return Ok(outcome),
        };
        self.connect(registrar, &credentials).await
    }

    fn resolve<F>(
        config: &ProviderConfig,
        env: F,
    ) -> Result<std::result::Result<Credentials, ConfigureOutcome>>
    where
        F: Fn(&str) -> Option<String>,
    {
        match config.resolve_credentials_with(env)? {
            CredentialResolution::Resolved(credentials) => Ok(Ok(credentials)),
            CredentialResolution::Deferred { attribute } => {
                tracing::warn!(
                    attribute = attribute,
                    "Cannot use unknown value as {}, provider stays unconfigured",
                    attribute
                );
                Ok(Err(ConfigureOutcome::Deferred { attribute }))
            }
        }
    }

    async fn connect(
        &mut self,
        registrar: Arc<dyn Registrar>,
        credentials: &Credentials,
    ) -> Result<ConfigureOutcome> {
        let session = Session::login(registrar, credentials).await?;
        self.session = Some(session);
        Ok(ConfigureOutcome::Configured)
    }

    /// Whether a session is available
    pub fn is_configured(&self) -> bool {
        self.session.is_some()
    }

    /// The authenticated session
    pub fn session(&self) -> Result<&Session> {
        self.session.as_ref().ok_or(Error::NotConfigured)
    }

    // ===== freenom_dns_record resource =====

    /// Check a record without contacting the registrar
    pub fn validate(&self, record: &DnsRecord) -> Result<()> {
        validate_record(record)
    }

    /// Decide how to move from stored state to `desired`
    pub fn plan(&self, prior: Option<&DnsRecord>, desired: &DnsRecord) -> PlannedChange {
        plan_change(prior, desired, &self.replacement_policy)
    }

    pub async fn create(&self, desired: &DnsRecord) -> Result<ManagedRecord> {
        Reconciler::new(self.session()?).create(desired).await
    }

    /// `Ok(None)` means the record is gone and should leave the host's state
    pub async fn read(&self, id: &str) -> Result<Option<ManagedRecord>> {
        Reconciler::new(self.session()?).read(id).await
    }

    pub async fn update(&self, prior: &DnsRecord, plan: &DnsRecord) -> Result<ManagedRecord> {
        Reconciler::new(self.session()?).update(prior, plan).await
    }

    pub async fn delete(&self, id: &str) -> Result<DeleteOutcome> {
        Reconciler::new(self.session()?).delete(id).await
    }

    /// Adopt an existing registrar record by its identifier.
    ///
    /// Unlike [`read`](Self::read), a missing record is an error here.
    pub async fn import_state(&self, id: &str) -> Result<ManagedRecord> {
        let key = parse_id(id)?;
        tracing::info!(id = %id, "Importing record");
        self.read(id)
            .await?
            .ok_or_else(|| Error::record_not_found(key.domain, key.name))
    }

    // ===== data sources =====

    /// Single record by name (`freenom_dns_record` data source)
    pub async fn dns_record(&self, domain: &str, name: &str) -> Result<ManagedRecord> {
        validate_domain(domain)?;
        let session = self.session()?;
        tracing::info!(domain = %domain, name = %name, "Reading record");

        let found = RecordLocator::new(session).find_by_name(domain, name).await?;
        let mut record = DnsRecord::from_registrar(domain, &found);
        record.name = name.to_string();
        Ok(ManagedRecord::from(record))
    }

    /// All records of a domain (`freenom_dns_records` data source)
    pub async fn dns_records(&self, domain: &str) -> Result<DnsRecordList> {
        validate_domain(domain)?;
        let session = self.session()?;

        let found = RecordLocator::new(session).find_all_by_domain(domain).await?;
        tracing::info!(domain = %domain, count = found.len(), "Found records");

        Ok(DnsRecordList {
            domain: domain.to_string(),
            records: managed_records(domain, &found),
        })
    }

    /// Records pointing at `value` (`freenom_reverse_dns_records` data source)
    pub async fn reverse_dns_records(
        &self,
        domain: &str,
        value: &str,
    ) -> Result<ReverseDnsRecordList> {
        validate_domain(domain)?;
        let session = self.session()?;

        let found = RecordLocator::new(session)
            .find_all_by_domain_and_value(domain, value)
            .await?;
        tracing::info!(domain = %domain, value = %value, count = found.len(), "Found records");

        Ok(ReverseDnsRecordList {
            domain: domain.to_string(),
            value: value.to_string(),
            records: managed_records(domain, &found),
        })
    }
}

fn managed_records(domain: &str, records: &[RegistrarRecord]) -> Vec<ManagedRecord> {
    records
        .iter()
        .map(|r| ManagedRecord::from(DnsRecord::from_registrar(domain, r)))
        .collect()
}

impl std::fmt::Debug for FreenomProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FreenomProvider")
            .field("version", &self.version)
            .field("registrars", &self.registry.list())
            .field("session", &self.session)
            .finish()
    }
}
