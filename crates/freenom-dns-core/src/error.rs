//! Error types for the Freenom DNS core
//!
//! Every failure surfaces to the caller as one of these variants. Nothing in
//! this crate retries or recovers locally.

use thiserror::Error;

/// Result type alias for Freenom DNS operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type
#[derive(Error, Debug)]
pub enum Error {
    /// No authenticated registrar session is available
    #[error("Provider not configured: no authenticated registrar session")]
    NotConfigured,

    /// Record identifier could not be decoded
    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// No record with the requested name exists at the registrar
    #[error("Record not found: {name}/{domain}")]
    RecordNotFound {
        /// Domain that was searched
        domain: String,
        /// Subdomain label that was searched for
        name: String,
    },

    /// An attribute that cannot change in place was changed
    #[error("{field} cannot be changed (from '{prior}' to '{planned}')")]
    ImmutableFieldChanged {
        /// Attribute name
        field: &'static str,
        /// Value held in prior state
        prior: String,
        /// Value requested by the plan
        planned: String,
    },

    /// Registrar rejected the credentials or the session expired
    #[error("Registrar authentication failed: {0}")]
    RegistrarAuth(String),

    /// Registrar could not be reached or answered with a transient failure
    #[error("Registrar unavailable: {0}")]
    RegistrarUnavailable(String),

    /// Input rejected before any network call
    #[error("Invalid {attribute}: {message}")]
    Validation {
        /// Attribute that failed validation
        attribute: &'static str,
        /// What was wrong with it
        message: String,
    },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Registrar-specific failure that fits no other variant
    #[error("Registrar error ({registrar}): {message}")]
    Registrar {
        /// Registrar name
        registrar: String,
        /// Error message
        message: String,
    },

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an invalid identifier error
    pub fn invalid_identifier(msg: impl Into<String>) -> Self {
        Self::InvalidIdentifier(msg.into())
    }

    /// Create a "record not found" error
    pub fn record_not_found(domain: impl Into<String>, name: impl Into<String>) -> Self {
        Self::RecordNotFound {
            domain: domain.into(),
            name: name.into(),
        }
    }

    /// Create an immutable field error
    pub fn immutable(
        field: &'static str,
        prior: impl Into<String>,
        planned: impl Into<String>,
    ) -> Self {
        Self::ImmutableFieldChanged {
            field,
            prior: prior.into(),
            planned: planned.into(),
        }
    }

    /// Create a registrar authentication error
    pub fn auth(msg: impl Into<String>) -> Self {
        Self::RegistrarAuth(msg.into())
    }

    /// Create a registrar unavailable error
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::RegistrarUnavailable(msg.into())
    }

    /// Create a validation error
    pub fn validation(attribute: &'static str, msg: impl Into<String>) -> Self {
        Self::Validation {
            attribute,
            message: msg.into(),
        }
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a registrar-specific error
    pub fn registrar(registrar: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Registrar {
            registrar: registrar.into(),
            message: message.into(),
        }
    }

    /// The record (or the thing being looked up) does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::RecordNotFound { .. })
    }

    /// The failure may go away if the same call is issued again later
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::RegistrarUnavailable(_) | Self::Io(_))
    }
}

/// Helper for converting anyhow::Error to our Error type
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_is_distinct_from_transient() {
        let missing = Error::record_not_found("example.tk", "www");
        assert!(missing.is_not_found());
        assert!(!missing.is_transient());

        let down = Error::unavailable("connection reset");
        assert!(down.is_transient());
        assert!(!down.is_not_found());

        assert!(!Error::auth("bad password").is_transient());
    }

    #[test]
    fn test_display_messages() {
        assert_eq!(
            Error::record_not_found("example.tk", "www").to_string(),
            "Record not found: www/example.tk"
        );
        assert_eq!(
            Error::immutable("domain", "a.tk", "b.tk").to_string(),
            "domain cannot be changed (from 'a.tk' to 'b.tk')"
        );
        assert_eq!(
            Error::validation("ttl", "must be at least 1").to_string(),
            "Invalid ttl: must be at least 1"
        );
    }
}
