//! Authenticated registrar session
//!
//! A [`Session`] only exists after a successful login. Every locator and
//! reconciler call takes one by reference, so "not logged in" cannot be
//! reached from inside this crate; hosts that may run before configuration
//! finishes get [`Error::NotConfigured`](crate::Error::NotConfigured) from
//! [`FreenomProvider`](crate::provider::FreenomProvider) instead.

use std::sync::Arc;

use crate::config::Credentials;
use crate::error::Result;
use crate::traits::Registrar;

/// Handle to a logged-in registrar
#[derive(Clone)]
pub struct Session {
    registrar: Arc<dyn Registrar>,
    username: String,
}

impl Session {
    /// Log in and return the session.
    ///
    /// Login errors from the registrar are returned unchanged.
    pub async fn login(registrar: Arc<dyn Registrar>, credentials: &Credentials) -> Result<Self> {
        tracing::debug!(
            registrar = registrar.registrar_name(),
            username = %credentials.username,
            "Logging in to registrar"
        );

        registrar.login(credentials).await?;

        tracing::info!(
            registrar = registrar.registrar_name(),
            username = %credentials.username,
            "Registrar session established"
        );

        Ok(Self {
            registrar,
            username: credentials.username.clone(),
        })
    }

    /// The registrar behind this session
    pub fn registrar(&self) -> &dyn Registrar {
        self.registrar.as_ref()
    }

    /// Account the session is logged in as
    pub fn username(&self) -> &str {
        &self.username
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("registrar", &self.registrar.registrar_name())
            .field("username", &self.username)
            .finish()
    }
}
