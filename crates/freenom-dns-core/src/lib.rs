// # freenom-dns-core
//
// DNS record reconciliation for domains held at the Freenom registrar.
//
// ## Architecture Overview
//
// - **Registrar**: Trait for the external registrar client
// - **Session**: Authenticated registrar handle, created once at configuration
// - **RecordLocator**: Fetch-all-then-filter lookups by name or value
// - **Reconciler**: Create/read/update/delete of a single managed record
// - **FreenomProvider**: Host entry points (resource, data sources, plan)
// - **RegistrarRegistry**: Registrar factories keyed by type name
//
// ## Design Principles
//
// 1. **Registrar is the source of truth**: nothing is cached between calls
// 2. **Fail fast**: validation runs before any registrar call
// 3. **No local recovery**: every failure reaches the caller unchanged
// 4. **Library-First**: the CLI is a thin host over this crate

pub mod config;
pub mod error;
pub mod identity;
pub mod locator;
pub mod plan;
pub mod provider;
pub mod reconciler;
pub mod record;
pub mod registrar;
pub mod registry;
pub mod session;
pub mod traits;
pub mod validation;

// Re-export core types for convenience
pub use config::{AttrValue, Credentials, ProviderConfig, RegistrarConfig};
pub use error::{Error, Result};
pub use identity::{RecordKey, compute_fqdn, compute_id, parse_id};
pub use locator::RecordLocator;
pub use plan::{PlannedChange, RecordField, ReplacementPolicy, plan_change};
pub use provider::{ConfigureOutcome, FreenomProvider};
pub use reconciler::{DeleteOutcome, Reconciler};
pub use record::{DnsRecord, ManagedRecord, RecordType, RegistrarRecord};
pub use registrar::{FileRegistrar, MemoryRegistrar};
pub use registry::RegistrarRegistry;
pub use session::Session;
pub use traits::{DomainInfo, Registrar, RegistrarFactory};
