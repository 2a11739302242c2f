//! Registry feature slice.
//!
//! Lookups over the metadata catalogue plus the pure guard predicates the
//! router runs before invoking a handler. Everything here is read-only over
//! catalogue rows; no durable state is owned by this crate.

pub mod error;
pub mod guard;
pub mod service;

pub use error::RegistryError;
pub use service::{RegistryService, ResolvedHandler};
