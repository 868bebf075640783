//! Record lookup against the registrar
//!
//! The registrar cannot filter server-side, so every lookup fetches the
//! domain's full record set and scans it. Nothing is cached between calls.

use crate::error::{Error, Result};
use crate::record::RegistrarRecord;
use crate::session::Session;

/// Finds records in a domain through an authenticated session
#[derive(Debug, Clone, Copy)]
pub struct RecordLocator<'a> {
    session: &'a Session,
}

impl<'a> RecordLocator<'a> {
    /// Create a locator on top of a session
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// First record whose name matches `name`, ignoring case.
    ///
    /// # Errors
    ///
    /// - `Error::RecordNotFound` if no record matches
    /// - Registrar errors from the fetch, unchanged
    pub async fn find_by_name(&self, domain: &str, name: &str) -> Result<RegistrarRecord> {
        let records = self.find_all_by_domain(domain).await?;
        let wanted = name.to_lowercase();

        for record in records {
            tracing::trace!(
                domain = %domain,
                name = %record.name,
                record_type = %record.record_type,
                "Checking record"
            );
            if record.name.to_lowercase() == wanted {
                return Ok(record);
            }
        }

        Err(Error::record_not_found(domain, name))
    }

    /// Every record in the domain, in registrar order
    pub async fn find_all_by_domain(&self, domain: &str) -> Result<Vec<RegistrarRecord>> {
        let info = self.session.registrar().get_domain_info(domain).await?;
        tracing::debug!(
            domain = %domain,
            count = info.records.len(),
            "Fetched domain records"
        );
        Ok(info.records)
    }

    /// Records whose value is exactly `value`. Case matters.
    pub async fn find_all_by_domain_and_value(
        &self,
        domain: &str,
        value: &str,
    ) -> Result<Vec<RegistrarRecord>> {
        let records = self.find_all_by_domain(domain).await?;
        Ok(records.into_iter().filter(|r| r.value == value).collect())
    }
}
