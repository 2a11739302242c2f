//! # Domain Models
//!
//! This crate contains pure domain types with minimal dependencies (`serde`, `serde_json`).
//! Keep it lean: no I/O, networking, or heavy logic—just data and simple helpers.
//!
//! The registry catalogue ([`registry`]) describes which business objects exist and
//! which actions they expose; the dispatch types ([`request`], [`envelope`]) are the
//! transient request/response shapes crossing the router boundary.

pub mod config;
pub mod constants;
pub mod envelope;
pub mod registry;
pub mod request;

/// Normalizes an object or action code for lookup: trims surrounding whitespace
/// and upper-cases the remainder. `" supply "` and `"SUPPLY"` are the same code.
#[must_use]
pub fn normalize_code(raw: &str) -> String {
    raw.trim().to_uppercase()
}
