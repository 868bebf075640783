//! Plan-vs-state diffing
//!
//! Decides what a host should do with a desired record given what it last
//! stored: nothing, create it, modify it in place, or delete and recreate
//! it. The decision is made locally; nothing here talks to the registrar.

use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

use crate::record::DnsRecord;

/// The six authoritative record attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordField {
    Domain,
    Type,
    Name,
    Value,
    Priority,
    Ttl,
}

impl RecordField {
    /// Every field, in attribute order
    pub const ALL: [RecordField; 6] = [
        RecordField::Domain,
        RecordField::Type,
        RecordField::Name,
        RecordField::Value,
        RecordField::Priority,
        RecordField::Ttl,
    ];

    /// Attribute name as the host sees it
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordField::Domain => "domain",
            RecordField::Type => "type",
            RecordField::Name => "name",
            RecordField::Value => "value",
            RecordField::Priority => "priority",
            RecordField::Ttl => "ttl",
        }
    }

    fn differs(&self, prior: &DnsRecord, desired: &DnsRecord) -> bool {
        match self {
            RecordField::Domain => prior.domain != desired.domain,
            RecordField::Type => prior.record_type != desired.record_type,
            RecordField::Name => prior.name.to_lowercase() != desired.name.to_lowercase(),
            RecordField::Value => prior.value != desired.value,
            RecordField::Priority => prior.priority != desired.priority,
            RecordField::Ttl => prior.ttl != desired.ttl,
        }
    }
}

impl fmt::Display for RecordField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which field changes force delete-and-recreate
///
/// `Domain` always forces replacement: the registrar cannot move a record
/// between domains, and the reconciler refuses such an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplacementPolicy {
    replace: BTreeSet<RecordField>,
}

impl ReplacementPolicy {
    /// Every field change forces replacement
    pub fn all() -> Self {
        Self {
            replace: RecordField::ALL.into_iter().collect(),
        }
    }

    /// Only a domain change forces replacement
    pub fn domain_only() -> Self {
        Self {
            replace: BTreeSet::from([RecordField::Domain]),
        }
    }

    /// Allow `field` to change in place
    pub fn with_in_place(mut self, field: RecordField) -> Self {
        if field != RecordField::Domain {
            self.replace.remove(&field);
        }
        self
    }

    /// Whether a change to `field` forces replacement
    pub fn requires_replace(&self, field: RecordField) -> bool {
        self.replace.contains(&field)
    }
}

impl Default for ReplacementPolicy {
    fn default() -> Self {
        Self::all()
    }
}

/// What a host should do to reach the desired record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum PlannedChange {
    /// Nothing stored yet
    Create,
    /// Stored and desired agree
    NoOp,
    /// Modify in place
    Update {
        /// Fields that differ
        changed: Vec<RecordField>,
    },
    /// Delete the stored record and create the desired one
    Replace {
        /// Fields that differ
        changed: Vec<RecordField>,
    },
}

impl PlannedChange {
    /// Fields that differ between prior and desired
    pub fn changed(&self) -> &[RecordField] {
        match self {
            PlannedChange::Update { changed } | PlannedChange::Replace { changed } => changed,
            PlannedChange::Create | PlannedChange::NoOp => &[],
        }
    }
}

/// Compare stored state with the desired record.
pub fn plan_change(
    prior: Option<&DnsRecord>,
    desired: &DnsRecord,
    policy: &ReplacementPolicy,
) -> PlannedChange {
    let Some(prior) = prior else {
        return PlannedChange::Create;
    };

    let changed: Vec<RecordField> = RecordField::ALL
        .into_iter()
        .filter(|field| field.differs(prior, desired))
        .collect();

    if changed.is_empty() {
        PlannedChange::NoOp
    } else if changed.iter().any(|f| policy.requires_replace(*f)) {
        PlannedChange::Replace { changed }
    } else {
        PlannedChange::Update { changed }
    }
}
