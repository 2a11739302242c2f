//! Self-validation feature slice.
//!
//! Proves at startup (or in a test) that every binding the registry declares
//! resolves against the compiled surface: service keys to live instances,
//! handler names to manifest entries, status entities to bound readers with
//! queryable fields.

pub mod error;
pub mod validator;

pub use error::{REGISTRY_INVALID, ValidationError};
pub use validator::Validator;
