//! DNS record data model
//!
//! - [`DnsRecord`]: the six authoritative attributes of a managed record
//! - [`ManagedRecord`]: a record together with its derived `id` and `fqdn`
//! - [`RegistrarRecord`]: a record as the registrar stores it (no domain)

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;
use crate::identity::{compute_fqdn, compute_id};

/// Record types accepted by the registrar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecordType {
    /// IPv4 address
    A,
    /// IPv6 address
    Aaaa,
    /// Canonical name
    Cname,
    /// Location
    Loc,
    /// Mail exchange
    Mx,
    /// Naming authority pointer
    Naptr,
    /// Responsible person
    Rp,
    /// Free text
    Txt,
}

impl RecordType {
    /// Every accepted type, in registrar order
    pub const ALL: [RecordType; 8] = [
        RecordType::A,
        RecordType::Aaaa,
        RecordType::Cname,
        RecordType::Loc,
        RecordType::Mx,
        RecordType::Naptr,
        RecordType::Rp,
        RecordType::Txt,
    ];

    /// Upper-case wire name of the type
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::A => "A",
            RecordType::Aaaa => "AAAA",
            RecordType::Cname => "CNAME",
            RecordType::Loc => "LOC",
            RecordType::Mx => "MX",
            RecordType::Naptr => "NAPTR",
            RecordType::Rp => "RP",
            RecordType::Txt => "TXT",
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parsing is case-sensitive: `"a"` is not a record type.
impl FromStr for RecordType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RecordType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| {
                Error::validation(
                    "type",
                    format!(
                        "'{}' is not one of A, AAAA, CNAME, LOC, MX, NAPTR, RP, TXT",
                        s
                    ),
                )
            })
    }
}

/// A record as held by the registrar, scoped to a domain by context
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrarRecord {
    /// Record type
    #[serde(rename = "type")]
    pub record_type: RecordType,
    /// Subdomain label (empty for the apex)
    pub name: String,
    /// Type-dependent value
    pub value: String,
    /// Priority, meaningful for MX
    pub priority: i64,
    /// Time to live in seconds
    pub ttl: i64,
}

/// The managed entity: the six authoritative attributes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsRecord {
    /// Domain the record belongs to
    pub domain: String,
    /// Record type
    #[serde(rename = "type")]
    pub record_type: RecordType,
    /// Subdomain label, compared case-insensitively
    pub name: String,
    /// Type-dependent value
    pub value: String,
    /// Priority, meaningful for MX
    pub priority: i64,
    /// Time to live in seconds
    pub ttl: i64,
}

impl DnsRecord {
    /// Build a record from a registrar entry under the given domain
    pub fn from_registrar(domain: impl Into<String>, record: &RegistrarRecord) -> Self {
        Self {
            domain: domain.into(),
            record_type: record.record_type,
            name: record.name.clone(),
            value: record.value.clone(),
            priority: record.priority,
            ttl: record.ttl,
        }
    }

    /// The view submitted to the registrar. The name is always lower-cased.
    pub fn to_registrar(&self) -> RegistrarRecord {
        RegistrarRecord {
            record_type: self.record_type,
            name: self.name.to_lowercase(),
            value: self.value.clone(),
            priority: self.priority,
            ttl: self.ttl,
        }
    }

    /// Stable identifier: `lowercase(name)/domain`
    pub fn id(&self) -> String {
        compute_id(&self.domain, &self.name)
    }

    /// Presentation name: `lowercase(name).domain`
    pub fn fqdn(&self) -> String {
        compute_fqdn(&self.domain, &self.name)
    }
}

/// A record with its derived attributes, as handed back to the host.
///
/// `id` and `fqdn` are recomputed from the record every time one of these
/// is built; there is no way to set them independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManagedRecord {
    id: String,
    fqdn: String,
    #[serde(flatten)]
    record: DnsRecord,
}

impl ManagedRecord {
    /// Record identifier (`name/domain`)
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Fully qualified domain name
    pub fn fqdn(&self) -> &str {
        &self.fqdn
    }

    /// The authoritative attributes
    pub fn record(&self) -> &DnsRecord {
        &self.record
    }

    /// Unwrap into the authoritative attributes
    pub fn into_record(self) -> DnsRecord {
        self.record
    }
}

impl From<DnsRecord> for ManagedRecord {
    fn from(record: DnsRecord) -> Self {
        Self {
            id: record.id(),
            fqdn: record.fqdn(),
            record,
        }
    }
}
