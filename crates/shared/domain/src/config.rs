use crate::constants::{ROLE_AGENT, ROLE_SYSTEM};
use serde::Deserialize;

/// Router configuration knobs shared across deployments.
///
/// Kept deliberately small: the dispatch core is metadata-driven, and everything
/// per-object lives in the registry catalogue instead of configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Role assumed when the caller context has none.
    pub default_role: String,
    /// Role that bypasses `requiredRole` checks for trusted internal callers.
    pub system_role: String,
}

// --- Default ---

impl Default for RouterConfig {
    fn default() -> Self {
        Self { default_role: ROLE_AGENT.to_owned(), system_role: ROLE_SYSTEM.to_owned() }
    }
}
