//! Validation rules applied before any registrar call
//!
//! Nothing here touches the network; callers run these checks first so an
//! invalid input never causes a partial side effect.

use crate::error::{Error, Result};
use crate::record::{DnsRecord, RecordType};

/// Smallest accepted TTL in seconds
pub const MIN_TTL: i64 = 1;

/// Check domain syntax.
///
/// Each dot-separated label is a single letter or digit, or starts and ends
/// with one and contains only letters, digits and hyphens in between.
/// Label and name lengths are not limited.
pub fn validate_domain(domain: &str) -> Result<()> {
    if domain.is_empty() {
        return Err(Error::validation("domain", "cannot be empty"));
    }

    for label in domain.split('.') {
        if label.is_empty() {
            return Err(Error::validation(
                "domain",
                format!("'{}' has an empty label", domain),
            ));
        }

        if !label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(Error::validation(
                "domain",
                format!("label '{}' contains invalid characters", label),
            ));
        }

        if label.starts_with('-') || label.ends_with('-') {
            return Err(Error::validation(
                "domain",
                format!("label '{}' cannot start or end with a hyphen", label),
            ));
        }
    }

    Ok(())
}

/// Check that a TTL is at least one second.
pub fn validate_ttl(ttl: i64) -> Result<()> {
    if ttl < MIN_TTL {
        return Err(Error::validation(
            "ttl",
            format!("must be at least {}, got {}", MIN_TTL, ttl),
        ));
    }
    Ok(())
}

/// Parse a record type from its wire name.
pub fn validate_record_type(value: &str) -> Result<RecordType> {
    value.parse()
}

/// Run every rule that applies to a full record.
pub fn validate_record(record: &DnsRecord) -> Result<()> {
    validate_domain(&record.domain)?;
    validate_ttl(record.ttl)?;
    Ok(())
}
