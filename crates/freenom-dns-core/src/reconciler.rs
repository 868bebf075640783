// # Reconciler
//
// Create, read, update and delete for a single managed record.
//
// ## Lifecycle
//
// ```text
// Absent --create--> Created --read--> Verified --update--> Updated
//    ^                                    |
//    +----------------delete--------------+
// ```
//
// A record that disappears at the registrar is reported by `read` as
// `None`, so the host can drop it from its state. `delete` of a record that
// is already gone succeeds with `DeleteOutcome::AlreadyAbsent`.
//
// ## Failure Behavior
//
// - Validation runs before any registrar call
// - Registrar failures are returned as-is, never retried
// - A failed call leaves the registrar untouched as far as this side knows

use serde::Serialize;

use crate::error::{Error, Result};
use crate::identity::parse_id;
use crate::locator::RecordLocator;
use crate::record::{DnsRecord, ManagedRecord};
use crate::session::Session;
use crate::validation::{validate_domain, validate_record};

/// Result of a delete request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeleteOutcome {
    /// The record existed and the registrar removed it
    Deleted,
    /// No record with that name was left to remove
    AlreadyAbsent,
}

/// Drives record changes through an authenticated session
#[derive(Debug, Clone, Copy)]
pub struct Reconciler<'a> {
    session: &'a Session,
}

impl<'a> Reconciler<'a> {
    /// Create a reconciler on top of a session
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    fn locator(&self) -> RecordLocator<'a> {
        RecordLocator::new(self.session)
    }

    /// Add a record at the registrar.
    ///
    /// The returned record carries the requested attributes with `id` and
    /// `fqdn` derived from them.
    pub async fn create(&self, desired: &DnsRecord) -> Result<ManagedRecord> {
        validate_record(desired)?;

        tracing::debug!(
            domain = %desired.domain,
            name = %desired.name,
            record_type = %desired.record_type,
            "Creating record"
        );

        self.session
            .registrar()
            .add_record(&desired.domain, &[desired.to_registrar()])
            .await?;

        let managed = ManagedRecord::from(desired.clone());
        tracing::info!(id = %managed.id(), "Record created");
        Ok(managed)
    }

    /// Fetch the current state of the record behind `id`.
    ///
    /// Returns `Ok(None)` when the registrar no longer has a record with
    /// that name.
    pub async fn read(&self, id: &str) -> Result<Option<ManagedRecord>> {
        let key = parse_id(id)?;
        validate_domain(&key.domain)?;

        let found = match self.locator().find_by_name(&key.domain, &key.name).await {
            Ok(record) => record,
            Err(Error::RecordNotFound { .. }) => {
                tracing::warn!(id = %id, "Record no longer exists at the registrar");
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        let mut record = DnsRecord::from_registrar(key.domain, &found);
        record.name = record.name.to_lowercase();

        Ok(Some(ManagedRecord::from(record)))
    }

    /// Change a record in place with a single modify call.
    ///
    /// # Errors
    ///
    /// - `Error::ImmutableFieldChanged` if the domain differs
    /// - `Error::Validation` if the plan is invalid
    /// - Registrar errors from the modify call
    pub async fn update(&self, prior: &DnsRecord, plan: &DnsRecord) -> Result<ManagedRecord> {
        if prior.domain != plan.domain {
            return Err(Error::immutable("domain", &prior.domain, &plan.domain));
        }
        validate_record(plan)?;

        let old = prior.to_registrar();
        let new = plan.to_registrar();

        tracing::debug!(
            domain = %plan.domain,
            old_name = %old.name,
            new_name = %new.name,
            "Modifying record"
        );

        self.session
            .registrar()
            .modify_record(&plan.domain, &old, &new)
            .await?;

        let managed = ManagedRecord::from(plan.clone());
        tracing::info!(id = %managed.id(), "Record updated");
        Ok(managed)
    }

    /// Remove the record behind `id`.
    pub async fn delete(&self, id: &str) -> Result<DeleteOutcome> {
        let key = parse_id(id)?;
        validate_domain(&key.domain)?;

        let found = match self.locator().find_by_name(&key.domain, &key.name).await {
            Ok(record) => record,
            Err(Error::RecordNotFound { .. }) => {
                tracing::warn!(id = %id, "Record already absent, nothing to delete");
                return Ok(DeleteOutcome::AlreadyAbsent);
            }
            Err(e) => return Err(e),
        };

        self.session
            .registrar()
            .delete_record(&key.domain, &found)
            .await?;

        tracing::info!(id = %id, "Record deleted");
        Ok(DeleteOutcome::Deleted)
    }
}
