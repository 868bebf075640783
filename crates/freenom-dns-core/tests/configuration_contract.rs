//! Contract Test: Provider Configuration
//!
//! Constraints verified:
//! - Nothing runs against the registrar before a session exists
//! - Unknown credentials defer configuration with a warning, not an error
//! - Null credentials fall back to the environment
//! - Empty credentials and rejected logins are errors
//! - Configuration picks the registrar through the registry, including
//!   factories registered by the host

mod common;

use common::*;
use freenom_dns_core::config::{
    AttrValue, Credentials, PASSWORD_ENV, ProviderConfig, RegistrarConfig, USERNAME_ENV,
};
use freenom_dns_core::error::{Error, Result};
use freenom_dns_core::traits::{Registrar, RegistrarFactory};
use freenom_dns_core::{ConfigureOutcome, FreenomProvider};
use std::sync::Arc;

fn env_with_credentials(key: &str) -> Option<String> {
    match key {
        USERNAME_ENV => Some("env-user".to_string()),
        PASSWORD_ENV => Some("env-pass".to_string()),
        _ => None,
    }
}

#[tokio::test]
async fn unconfigured_provider_refuses_every_entry_point() {
    let provider = FreenomProvider::new("test");
    let record = a_record("www", "10.0.0.1");

    assert!(matches!(provider.create(&record).await, Err(Error::NotConfigured)));
    assert!(matches!(provider.read("www/example.tk").await, Err(Error::NotConfigured)));
    assert!(matches!(
        provider.update(&record, &record).await,
        Err(Error::NotConfigured)
    ));
    assert!(matches!(provider.delete("www/example.tk").await, Err(Error::NotConfigured)));
    assert!(matches!(
        provider.import_state("www/example.tk").await,
        Err(Error::NotConfigured)
    ));
    assert!(matches!(
        provider.dns_record("example.tk", "www").await,
        Err(Error::NotConfigured)
    ));
    assert!(matches!(provider.dns_records("example.tk").await, Err(Error::NotConfigured)));
    assert!(matches!(
        provider.reverse_dns_records("example.tk", "10.0.0.1").await,
        Err(Error::NotConfigured)
    ));
}

#[tokio::test]
async fn unknown_credentials_defer_without_login() {
    let registrar = RecordingRegistrar::new();
    let mut provider = FreenomProvider::new("test");

    let config = ProviderConfig {
        password: AttrValue::Unknown,
        ..test_config()
    };
    let outcome = provider
        .configure_with_registrar(
            Arc::new(RecordingRegistrar::sharing_counters_with(&registrar)),
            &config,
            env_with_credentials,
        )
        .await
        .unwrap();

    assert_eq!(outcome, ConfigureOutcome::Deferred { attribute: "password" });
    assert!(!provider.is_configured());
    assert_eq!(registrar.login_call_count(), 0);
}

#[tokio::test]
async fn null_credentials_come_from_environment() {
    let registrar =
        RecordingRegistrar::with_credentials(Credentials::new("env-user", "env-pass"));
    let mut provider = FreenomProvider::new("test");

    let outcome = provider
        .configure_with_registrar(
            Arc::new(RecordingRegistrar::sharing_counters_with(&registrar)),
            &ProviderConfig::new(),
            env_with_credentials,
        )
        .await
        .unwrap();

    assert_eq!(outcome, ConfigureOutcome::Configured);
    assert_eq!(provider.session().unwrap().username(), "env-user");
    assert_eq!(registrar.login_call_count(), 1);
}

#[tokio::test]
async fn empty_credentials_are_configuration_errors() {
    let registrar = RecordingRegistrar::new();
    let mut provider = FreenomProvider::new("test");

    let err = provider
        .configure_with_registrar(
            Arc::new(RecordingRegistrar::sharing_counters_with(&registrar)),
            &ProviderConfig::new().with_password("secret"),
            no_env,
        )
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Config(_)));
    assert!(!provider.is_configured());
    assert_eq!(registrar.login_call_count(), 0);
}

#[tokio::test]
async fn rejected_login_leaves_provider_unconfigured() {
    let registrar = RecordingRegistrar::with_credentials(Credentials::new("alice", "secret"));
    let mut provider = FreenomProvider::new("test");

    let err = provider
        .configure_with_registrar(
            Arc::new(RecordingRegistrar::sharing_counters_with(&registrar)),
            &ProviderConfig::new().with_username("alice").with_password("wrong"),
            no_env,
        )
        .await
        .unwrap_err();

    assert!(matches!(err, Error::RegistrarAuth(_)));
    assert!(!provider.is_configured());
    assert!(matches!(provider.session(), Err(Error::NotConfigured)));
}

#[tokio::test]
async fn configure_selects_registrar_from_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("zones.json");

    let config = test_config().with_registrar(RegistrarConfig::File {
        path: path.to_string_lossy().into_owned(),
    });

    let mut provider = FreenomProvider::new("test");
    provider.configure(&config, no_env).await.unwrap();
    assert_eq!(provider.session().unwrap().registrar().registrar_name(), "file");

    provider.create(&a_record("www", "10.0.0.1")).await.unwrap();

    // A second provider on the same file sees the record
    let mut reopened = FreenomProvider::new("test");
    reopened.configure(&config, no_env).await.unwrap();
    let found = reopened.dns_record("example.tk", "www").await.unwrap();
    assert_eq!(found.record().value, "10.0.0.1");
}

#[tokio::test]
async fn unknown_registrar_type_is_a_configuration_error() {
    let config = test_config().with_registrar(RegistrarConfig::Custom {
        factory: "remote".to_string(),
        config: serde_json::json!({ "endpoint": "https://example.invalid" }),
    });

    let mut provider = FreenomProvider::new("test");
    let err = provider.configure(&config, no_env).await.unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}

struct SharedRegistrarFactory {
    registrar: Arc<RecordingRegistrar>,
}

#[async_trait::async_trait]
impl RegistrarFactory for SharedRegistrarFactory {
    async fn create(&self, _config: &RegistrarConfig) -> Result<Arc<dyn Registrar>> {
        Ok(Arc::new(RecordingRegistrar::sharing_counters_with(
            &self.registrar,
        )))
    }
}

#[tokio::test]
async fn registered_factories_are_configurable() {
    let registrar = Arc::new(RecordingRegistrar::new());
    let provider_registrar = Arc::clone(&registrar);

    let mut provider = FreenomProvider::new("test");
    provider.register_registrar(
        "recording",
        Box::new(SharedRegistrarFactory {
            registrar: provider_registrar,
        }),
    );

    let config = test_config().with_registrar(RegistrarConfig::Custom {
        factory: "recording".to_string(),
        config: serde_json::json!({}),
    });
    let outcome = provider.configure(&config, no_env).await.unwrap();

    assert_eq!(outcome, ConfigureOutcome::Configured);
    assert_eq!(registrar.login_call_count(), 1);
    assert_eq!(
        provider.session().unwrap().registrar().registrar_name(),
        "recording"
    );
}
