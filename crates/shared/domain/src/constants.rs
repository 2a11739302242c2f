//! Shared literal constants for the dispatch core.

/// Role assumed when a caller context carries no role.
pub const ROLE_AGENT: &str = "AGENT";

/// Trusted internal role that satisfies any `requiredRole` check.
pub const ROLE_SYSTEM: &str = "SYSTEM";

/// Payload key consulted for the entity id when the registry does not override it.
pub const DEFAULT_ID_KEY: &str = "id";
