//! Configuration types for the Freenom DNS provider
//!
//! Credentials come from explicit configuration first and fall back to the
//! `FREENOM_USERNAME` / `FREENOM_PASSWORD` environment variables when the
//! configured value is null.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Environment variable consulted when no username is configured
pub const USERNAME_ENV: &str = "FREENOM_USERNAME";

/// Environment variable consulted when no password is configured
pub const PASSWORD_ENV: &str = "FREENOM_PASSWORD";

/// A configuration value that may be set, unset, or not yet known.
///
/// `Unknown` is what a host passes when the value depends on something it
/// has not computed yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttrValue<T> {
    /// The value is set
    Known(T),
    /// The value is not set
    #[default]
    Null,
    /// The value will only be known later
    Unknown,
}

impl<T> AttrValue<T> {
    /// Returns `true` for [`AttrValue::Unknown`]
    pub fn is_unknown(&self) -> bool {
        matches!(self, AttrValue::Unknown)
    }

    /// Returns `true` for [`AttrValue::Null`]
    pub fn is_null(&self) -> bool {
        matches!(self, AttrValue::Null)
    }

    /// The value, if known
    pub fn known(&self) -> Option<&T> {
        match self {
            AttrValue::Known(v) => Some(v),
            _ => None,
        }
    }
}

impl<T> From<Option<T>> for AttrValue<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => AttrValue::Known(v),
            None => AttrValue::Null,
        }
    }
}

/// Resolved registrar credentials
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Account name
    pub username: String,
    /// Account password. Never logged.
    pub password: String,
}

impl Credentials {
    /// Create a credential pair
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<REDACTED>")
            .finish()
    }
}

/// Outcome of resolving credentials from configuration and environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialResolution {
    /// Both values are available
    Resolved(Credentials),
    /// A value is not known yet; configuration has to wait
    Deferred {
        /// The attribute that is still unknown
        attribute: &'static str,
    },
}

/// Which registrar implementation to talk to
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RegistrarConfig {
    /// In-memory registrar (not persistent)
    #[default]
    Memory,

    /// Registrar backed by a JSON file
    File {
        /// Path to the zone snapshot
        path: String,
    },

    /// Registrar provided by a registered factory
    Custom {
        /// Factory name to use
        factory: String,
        /// Custom configuration data
        config: serde_json::Value,
    },
}

impl RegistrarConfig {
    /// Validate the registrar configuration
    pub fn validate(&self) -> Result<()> {
        match self {
            RegistrarConfig::Memory => Ok(()),
            RegistrarConfig::File { path } => {
                if path.is_empty() {
                    return Err(Error::config("File registrar path cannot be empty"));
                }
                Ok(())
            }
            RegistrarConfig::Custom { factory, config } => {
                if factory.is_empty() {
                    return Err(Error::config("Custom registrar factory cannot be empty"));
                }
                if config.is_null() {
                    return Err(Error::config("Custom registrar config cannot be null"));
                }
                Ok(())
            }
        }
    }

    /// Name under which the matching factory is registered
    pub fn type_name(&self) -> &str {
        match self {
            RegistrarConfig::Memory => "memory",
            RegistrarConfig::File { .. } => "file",
            RegistrarConfig::Custom { factory, .. } => factory,
        }
    }
}

/// Provider-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Registrar account name
    #[serde(default)]
    pub username: AttrValue<String>,

    /// Registrar account password
    #[serde(default)]
    pub password: AttrValue<String>,

    /// Registrar implementation
    #[serde(default)]
    pub registrar: RegistrarConfig,
}

impl ProviderConfig {
    /// Create a configuration that takes everything from the environment
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the username explicitly
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = AttrValue::Known(username.into());
        self
    }

    /// Set the password explicitly
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = AttrValue::Known(password.into());
        self
    }

    /// Select the registrar implementation
    pub fn with_registrar(mut self, registrar: RegistrarConfig) -> Self {
        self.registrar = registrar;
        self
    }

    /// Validate everything that does not depend on the environment
    pub fn validate(&self) -> Result<()> {
        self.registrar.validate()
    }

    /// Resolve credentials with an explicit environment lookup.
    ///
    /// Unknown values defer resolution. Null values are looked up in the
    /// environment. An empty result for either value is an error.
    pub fn resolve_credentials_with<F>(&self, env: F) -> Result<CredentialResolution>
    where
        F: Fn(&str) -> Option<String>,
    {
        if self.username.is_unknown() {
            return Ok(CredentialResolution::Deferred {
                attribute: "username",
            });
        }
        if self.password.is_unknown() {
            return Ok(CredentialResolution::Deferred {
                attribute: "password",
            });
        }

        let username = match &self.username {
            AttrValue::Known(v) => v.clone(),
            _ => env(USERNAME_ENV).unwrap_or_default(),
        };
        let password = match &self.password {
            AttrValue::Known(v) => v.clone(),
            _ => env(PASSWORD_ENV).unwrap_or_default(),
        };

        if username.is_empty() {
            return Err(Error::config(format!(
                "Username cannot be an empty string. Set it in configuration or via {}",
                USERNAME_ENV
            )));
        }
        if password.is_empty() {
            return Err(Error::config(format!(
                "Password cannot be an empty string. Set it in configuration or via {}",
                PASSWORD_ENV
            )));
        }

        Ok(CredentialResolution::Resolved(Credentials::new(
            username, password,
        )))
    }
}
