//! Contract Test: Lookups and Data Sources
//!
//! Constraints verified:
//! - Name lookups ignore case, value lookups do not
//! - Every lookup fetches the full record set; nothing is cached
//! - Lookups never mutate the registrar
//! - Registrar failures surface unchanged and are distinguishable from
//!   "not found"

mod common;

use common::*;
use freenom_dns_core::error::Error;
use freenom_dns_core::record::RecordType;

async fn seeded(registrar: &RecordingRegistrar) -> freenom_dns_core::FreenomProvider {
    let provider = configured_provider(registrar).await;
    provider.create(&a_record("www", "10.0.0.1")).await.unwrap();
    provider.create(&a_record("Api", "10.0.0.1")).await.unwrap();

    let mut cname = a_record("docs", "Host.example.tk");
    cname.record_type = RecordType::Cname;
    provider.create(&cname).await.unwrap();
    provider
}

#[tokio::test]
async fn single_record_lookup_ignores_case() {
    let registrar = RecordingRegistrar::new();
    let provider = seeded(&registrar).await;

    let found = provider.dns_record("example.tk", "API").await.unwrap();
    assert_eq!(found.id(), "api/example.tk");
    assert_eq!(found.fqdn(), "api.example.tk");
    assert_eq!(found.record().value, "10.0.0.1");
    assert_eq!(found.record().name, "API");

    let err = provider.dns_record("example.tk", "ftp").await.unwrap_err();
    assert!(err.is_not_found());
    assert!(!err.is_transient());
}

#[tokio::test]
async fn list_returns_every_record() {
    let registrar = RecordingRegistrar::new();
    let provider = seeded(&registrar).await;

    let list = provider.dns_records("example.tk").await.unwrap();
    assert_eq!(list.domain, "example.tk");
    let ids: Vec<&str> = list.records.iter().map(|r| r.id()).collect();
    assert_eq!(ids, vec!["www/example.tk", "api/example.tk", "docs/example.tk"]);
    assert!(list.records.iter().all(|r| r.record().domain == "example.tk"));
}

#[tokio::test]
async fn reverse_lookup_matches_exact_value() {
    let registrar = RecordingRegistrar::new();
    let provider = seeded(&registrar).await;

    let reverse = provider
        .reverse_dns_records("example.tk", "10.0.0.1")
        .await
        .unwrap();
    assert_eq!(reverse.value, "10.0.0.1");
    let names: Vec<&str> = reverse
        .records
        .iter()
        .map(|r| r.record().name.as_str())
        .collect();
    assert_eq!(names, vec!["www", "api"]);

    let reverse = provider
        .reverse_dns_records("example.tk", "host.example.tk")
        .await
        .unwrap();
    assert!(reverse.records.is_empty(), "value match must be case-sensitive");

    let reverse = provider
        .reverse_dns_records("example.tk", "Host.example.tk")
        .await
        .unwrap();
    assert_eq!(reverse.records.len(), 1);
}

#[tokio::test]
async fn every_lookup_refetches_without_mutation() {
    let registrar = RecordingRegistrar::new();
    let provider = seeded(&registrar).await;
    let mutations = registrar.mutation_count();
    let fetches = registrar.get_call_count();

    provider.dns_record("example.tk", "www").await.unwrap();
    provider.dns_record("example.tk", "www").await.unwrap();
    provider.dns_records("example.tk").await.unwrap();
    provider
        .reverse_dns_records("example.tk", "10.0.0.1")
        .await
        .unwrap();

    assert_eq!(registrar.get_call_count(), fetches + 4);
    assert_eq!(registrar.mutation_count(), mutations);
}

#[tokio::test]
async fn registrar_outage_is_transient_not_missing() {
    let registrar = RecordingRegistrar::new();
    let provider = seeded(&registrar).await;
    registrar.set_offline(true);

    let err = provider.dns_record("example.tk", "www").await.unwrap_err();
    assert!(matches!(err, Error::RegistrarUnavailable(_)));
    assert!(err.is_transient());
    assert!(!err.is_not_found());

    // Read must not mistake an outage for a vanished record
    let err = provider.read("www/example.tk").await.unwrap_err();
    assert!(err.is_transient());

    let err = provider.delete("www/example.tk").await.unwrap_err();
    assert!(err.is_transient());
    assert_eq!(registrar.delete_call_count(), 0);
}

#[tokio::test]
async fn data_sources_reject_bad_domains_before_fetching() {
    let registrar = RecordingRegistrar::new();
    let provider = configured_provider(&registrar).await;

    for domain in ["", "-bad.com", "bad-.com", "example..tk"] {
        assert!(matches!(
            provider.dns_records(domain).await,
            Err(Error::Validation { attribute: "domain", .. })
        ));
        assert!(matches!(
            provider.reverse_dns_records(domain, "10.0.0.1").await,
            Err(Error::Validation { attribute: "domain", .. })
        ));
        assert!(matches!(
            provider.dns_record(domain, "www").await,
            Err(Error::Validation { attribute: "domain", .. })
        ));
    }
    assert_eq!(registrar.get_call_count(), 0);
}
