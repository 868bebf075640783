//! Registrar registry
//!
//! Maps registrar type names to factories so configuration can pick an
//! implementation without a hard-coded match.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use freenom_dns_core::registry::RegistrarRegistry;
//! use freenom_dns_core::config::RegistrarConfig;
//!
//! let registry = RegistrarRegistry::with_builtins();
//! registry.register("remote", Box::new(RemoteFactory));
//!
//! let registrar = registry.create(&RegistrarConfig::Memory).await?;
//! ```

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::config::RegistrarConfig;
use crate::error::{Error, Result};
use crate::registrar::{FileRegistrarFactory, MemoryRegistrarFactory};
use crate::traits::{Registrar, RegistrarFactory};

/// Registry of registrar factories
///
/// ## Thread Safety
///
/// The registry uses interior mutability with RwLock, allowing concurrent
/// reads and exclusive writes.
#[derive(Default)]
pub struct RegistrarRegistry {
    factories: RwLock<HashMap<String, Arc<dyn RegistrarFactory>>>,
}

impl RegistrarRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the `memory` and `file` registrars registered
    pub fn with_builtins() -> Self {
        let registry = Self::new();
        registry.register("memory", Box::new(MemoryRegistrarFactory));
        registry.register("file", Box::new(FileRegistrarFactory));
        registry
    }

    /// Register a registrar factory under a type name
    ///
    /// A later registration under the same name replaces the earlier one.
    pub fn register(&self, name: impl Into<String>, factory: Box<dyn RegistrarFactory>) {
        let mut factories = self
            .factories
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        factories.insert(name.into(), Arc::from(factory));
    }

    /// Create a registrar from configuration
    ///
    /// # Returns
    ///
    /// - `Ok(Arc<dyn Registrar>)`: Created registrar
    /// - `Err(Error)`: If the configuration is invalid, the type is not
    ///   registered, or creation fails
    pub async fn create(&self, config: &RegistrarConfig) -> Result<Arc<dyn Registrar>> {
        config.validate()?;
        let registrar_type = config.type_name();

        let factory = {
            let factories = self
                .factories
                .read()
                .unwrap_or_else(PoisonError::into_inner);
            factories.get(registrar_type).cloned().ok_or_else(|| {
                Error::config(format!("Unknown registrar type: {}", registrar_type))
            })?
        };

        // Lock is released before the async create
        factory.create(config).await
    }

    /// List all registered registrar types, sorted
    pub fn list(&self) -> Vec<String> {
        let factories = self
            .factories
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        let mut names: Vec<String> = factories.keys().cloned().collect();
        names.sort();
        names
    }

    /// Check if a registrar type is registered
    pub fn contains(&self, name: &str) -> bool {
        let factories = self
            .factories
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        factories.contains_key(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct FailingFactory;

    #[async_trait]
    impl RegistrarFactory for FailingFactory {
        async fn create(&self, _config: &RegistrarConfig) -> Result<Arc<dyn Registrar>> {
            Err(Error::unavailable("remote registrar offline"))
        }
    }

    #[test]
    fn test_registry_registration() {
        let registry = RegistrarRegistry::new();
        assert!(!registry.contains("remote"));

        registry.register("remote", Box::new(FailingFactory));

        assert!(registry.contains("remote"));
        assert_eq!(registry.list(), vec!["remote".to_string()]);
    }

    #[test]
    fn test_builtins_are_registered() {
        let registry = RegistrarRegistry::with_builtins();
        assert_eq!(registry.list(), vec!["file".to_string(), "memory".to_string()]);
    }

    #[test]
    fn test_create_memory_registrar() {
        let registry = RegistrarRegistry::with_builtins();
        let registrar = tokio_test::block_on(registry.create(&RegistrarConfig::Memory)).unwrap();
        assert_eq!(registrar.registrar_name(), "memory");
    }

    #[test]
    fn test_create_dispatches_custom_configs() {
        let registry = RegistrarRegistry::with_builtins();
        registry.register("remote", Box::new(FailingFactory));

        let config = RegistrarConfig::Custom {
            factory: "remote".to_string(),
            config: serde_json::json!({ "endpoint": "https://example.invalid" }),
        };
        let err = tokio_test::block_on(registry.create(&config))
            .err()
            .expect("create should fail");
        assert!(err.is_transient());

        let config = RegistrarConfig::Custom {
            factory: "missing".to_string(),
            config: serde_json::json!({}),
        };
        let err = tokio_test::block_on(registry.create(&config))
            .err()
            .expect("create should fail");
        assert!(matches!(err, Error::Config(_)));
    }
}
