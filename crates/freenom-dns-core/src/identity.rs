//! Record identity codec
//!
//! A managed record is identified by `lowercase(name) + "/" + domain`.
//! The identifier is always derived from the record, never stored on its own.

use crate::error::{Error, Result};

/// Separator between the name and domain segments of an identifier
pub const ID_SEPARATOR: char = '/';

/// The two halves of a decoded identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordKey {
    /// Domain the record lives in
    pub domain: String,
    /// Subdomain label, as it appears in the identifier
    pub name: String,
}

/// Encode the identifier for `(domain, name)`.
pub fn compute_id(domain: &str, name: &str) -> String {
    format!("{}{}{}", name.to_lowercase(), ID_SEPARATOR, domain)
}

/// Fully qualified name of the record, for presentation only.
pub fn compute_fqdn(domain: &str, name: &str) -> String {
    format!("{}.{}", name.to_lowercase(), domain)
}

/// Decode an identifier produced by [`compute_id`].
///
/// The identifier must contain exactly one separator. The name segment is
/// returned as stored; it is not lower-cased again.
pub fn parse_id(id: &str) -> Result<RecordKey> {
    let mut parts = id.split(ID_SEPARATOR);
    match (parts.next(), parts.next(), parts.next()) {
        (Some(name), Some(domain), None) => Ok(RecordKey {
            domain: domain.to_string(),
            name: name.to_string(),
        }),
        _ => Err(Error::invalid_identifier(format!(
            "'{}' is not of the form <name>/<domain>",
            id
        ))),
    }
}
