//! Core traits for the Freenom DNS provider
//!
//! - [`Registrar`]: the external registrar client
//! - [`RegistrarFactory`]: builds registrars from configuration

pub mod registrar;

pub use registrar::{DomainInfo, Registrar, RegistrarFactory};
