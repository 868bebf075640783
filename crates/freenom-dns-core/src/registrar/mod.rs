// # Registrar Implementations
//
// Local implementations of the Registrar trait. Both keep an account made
// of domains, each with its record set, and differ only in persistence.
//
// A domain enters the account the first time a record is added to it (or
// through `add_domain`). Asking for a domain outside the account is an
// error, the same way the real registrar refuses foreign domains.

pub mod file;
pub mod memory;

pub use file::{FileRegistrar, FileRegistrarFactory};
pub use memory::{MemoryRegistrar, MemoryRegistrarFactory};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::config::Credentials;
use crate::error::{Error, Result};
use crate::record::RegistrarRecord;
use crate::traits::DomainInfo;

/// Two registrar entries denote the same record
fn same_record(a: &RegistrarRecord, b: &RegistrarRecord) -> bool {
    a.record_type == b.record_type
        && a.value == b.value
        && a.name.to_lowercase() == b.name.to_lowercase()
}

fn domain_key(domain: &str) -> String {
    domain.to_lowercase()
}

/// Record set of a single domain
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Zone {
    records: Vec<RegistrarRecord>,
    updated_at: DateTime<Utc>,
}

impl Zone {
    fn new() -> Self {
        Self {
            records: Vec::new(),
            updated_at: Utc::now(),
        }
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// The account: every domain and its records
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct ZoneBook {
    domains: HashMap<String, Zone>,
}

impl ZoneBook {
    fn add_domain(&mut self, domain: &str) -> bool {
        let key = domain_key(domain);
        if self.domains.contains_key(&key) {
            return false;
        }
        self.domains.insert(key, Zone::new());
        true
    }

    fn domain_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.domains.keys().cloned().collect();
        names.sort();
        names
    }

    fn info(&self, registrar: &str, domain: &str) -> Result<DomainInfo> {
        let zone = self.domains.get(&domain_key(domain)).ok_or_else(|| {
            Error::registrar(registrar, format!("domain not found in account: {}", domain))
        })?;
        Ok(DomainInfo {
            domain: domain.to_string(),
            records: zone.records.clone(),
        })
    }

    fn add(&mut self, domain: &str, records: &[RegistrarRecord]) {
        let zone = self
            .domains
            .entry(domain_key(domain))
            .or_insert_with(Zone::new);
        zone.records.extend_from_slice(records);
        zone.touch();
    }

    fn modify(
        &mut self,
        domain: &str,
        old: &RegistrarRecord,
        new: &RegistrarRecord,
    ) -> Result<()> {
        let zone = self
            .domains
            .get_mut(&domain_key(domain))
            .ok_or_else(|| Error::record_not_found(domain, &old.name))?;
        let slot = zone
            .records
            .iter_mut()
            .find(|r| same_record(r, old))
            .ok_or_else(|| Error::record_not_found(domain, &old.name))?;
        *slot = new.clone();
        zone.touch();
        Ok(())
    }

    fn delete(&mut self, domain: &str, record: &RegistrarRecord) -> Result<()> {
        let zone = self
            .domains
            .get_mut(&domain_key(domain))
            .ok_or_else(|| Error::record_not_found(domain, &record.name))?;
        let index = zone
            .records
            .iter()
            .position(|r| same_record(r, record))
            .ok_or_else(|| Error::record_not_found(domain, &record.name))?;
        zone.records.remove(index);
        zone.touch();
        Ok(())
    }
}

/// Check a login attempt against the account's expected credentials
fn check_credentials(expected: Option<&Credentials>, given: &Credentials) -> Result<()> {
    if given.username.is_empty() || given.password.is_empty() {
        return Err(Error::auth("username and password are required"));
    }
    if let Some(expected) = expected
        && expected != given
    {
        return Err(Error::auth(format!(
            "invalid credentials for {}",
            given.username
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::RecordType;

    fn record(name: &str, value: &str) -> RegistrarRecord {
        RegistrarRecord {
            record_type: RecordType::A,
            name: name.to_string(),
            value: value.to_string(),
            priority: 0,
            ttl: 3600,
        }
    }

    #[test]
    fn test_zone_book_lifecycle() {
        let mut book = ZoneBook::default();
        assert!(book.info("test", "example.tk").is_err());

        book.add("example.tk", &[record("www", "10.0.0.1")]);
        assert_eq!(book.info("test", "EXAMPLE.tk").unwrap().records.len(), 1);

        book.modify("example.tk", &record("WWW", "10.0.0.1"), &record("www", "10.0.0.2"))
            .unwrap();
        assert_eq!(
            book.info("test", "example.tk").unwrap().records[0].value,
            "10.0.0.2"
        );

        let err = book
            .delete("example.tk", &record("www", "10.0.0.1"))
            .unwrap_err();
        assert!(err.is_not_found());

        book.delete("example.tk", &record("www", "10.0.0.2")).unwrap();
        assert!(book.info("test", "example.tk").unwrap().records.is_empty());
        assert_eq!(book.domain_names(), vec!["example.tk".to_string()]);
    }

    #[test]
    fn test_check_credentials() {
        let expected = Credentials::new("alice", "secret");
        assert!(check_credentials(Some(&expected), &Credentials::new("alice", "secret")).is_ok());
        assert!(matches!(
            check_credentials(Some(&expected), &Credentials::new("alice", "wrong")),
            Err(Error::RegistrarAuth(_))
        ));
        assert!(matches!(
            check_credentials(None, &Credentials::new("", "x")),
            Err(Error::RegistrarAuth(_))
        ));
        assert!(check_credentials(None, &Credentials::new("anyone", "x")).is_ok());
    }
}
