//! Registry catalogue model: domain objects and the actions they expose.
//!
//! Rows are created and edited administratively outside this core; here they are
//! read-only data. Serde field names match the persisted camelCase layout, and the
//! defaults mirror the catalogue's normalization rules (`isActive` → true,
//! `enabledForAgents` → true, key fields → `"id"`).

use crate::constants::DEFAULT_ID_KEY;
use crate::normalize_code;
use serde::{Deserialize, Serialize};

/// Whether an action mutates state or only reads it. Informational for callers;
/// the router treats both identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionType {
    Command,
    Query,
}

/// A named operation on a domain object, bound to one handler and guarded by
/// role/agent/status rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    /// Unique per object, normalized.
    pub code: String,
    /// Name of the callable on the owning service. Must be non-empty.
    pub handler_name: String,
    pub action_type: ActionType,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Informational HTTP surface hints; never evaluated here.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_path: Option<String>,
    #[serde(default)]
    pub is_posting_action: bool,
    /// Statuses the guarded entity may be in for this action to run.
    /// Empty means unrestricted (any status, including none).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allowed_from_statuses: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_status: Option<String>,
    #[serde(default)]
    pub is_bulk: bool,
    #[serde(default = "default_true")]
    pub enabled_for_agents: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_role: Option<String>,
    /// Permits the action when the entity has no resolvable status even though
    /// `allowed_from_statuses` is restrictive.
    #[serde(default)]
    pub allow_when_no_status: bool,
}

impl Action {
    /// True when `allowed_from_statuses` restricts the action at all.
    #[must_use]
    pub fn is_status_restricted(&self) -> bool {
        !self.allowed_from_statuses.is_empty()
    }

    /// True when `status` is an allowed source status for this action.
    #[must_use]
    pub fn allows_status(&self, status: &str) -> bool {
        self.allowed_from_statuses.iter().any(|s| s == status)
    }
}

/// A registry-declared business entity type exposing actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainObject {
    /// Unique, normalized, stable once referenced.
    pub code: String,
    pub name: String,
    /// Business grouping (e.g. `SCM`, `FINANCE`); informational.
    pub domain_grouping: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_name: Option<String>,
    /// Key into the static service map; objects without one are not dispatchable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_base_path: Option<String>,
    #[serde(default = "default_id_key")]
    pub primary_key_field: String,
    /// Payload key carrying the entity id; `"id"` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_payload_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub is_internal: bool,
    /// Entity and field backing the status guard. Must be set together or not at
    /// all; a half-set pair is treated as no binding.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_entity_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_field_name: Option<String>,
    /// Informational status enumeration; never evaluated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statuses_definition: Option<Vec<String>>,
    #[serde(default)]
    pub actions: Vec<Action>,
}

/// The status entity/field pair an object declares, when it declares both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusBinding<'a> {
    pub entity_name: &'a str,
    pub field_name: &'a str,
}

impl DomainObject {
    /// Payload key to read the entity id from, falling back to `"id"`.
    #[must_use]
    pub fn id_key(&self) -> &str {
        self.id_payload_key.as_deref().unwrap_or(DEFAULT_ID_KEY)
    }

    /// Status binding, present only when both entity and field are declared.
    #[must_use]
    pub fn status_binding(&self) -> Option<StatusBinding<'_>> {
        match (self.status_entity_name.as_deref(), self.status_field_name.as_deref()) {
            (Some(entity_name), Some(field_name)) => {
                Some(StatusBinding { entity_name, field_name })
            },
            _ => None,
        }
    }

    /// Looks up an action by already-normalized code.
    #[must_use]
    pub fn find_action(&self, normalized_code: &str) -> Option<&Action> {
        self.actions.iter().find(|a| a.code == normalized_code)
    }

    /// True when `raw` names this object after normalization.
    #[must_use]
    pub fn matches_code(&self, raw: &str) -> bool {
        self.code == normalize_code(raw)
    }
}

const fn default_true() -> bool {
    true
}

fn default_id_key() -> String {
    DEFAULT_ID_KEY.to_owned()
}
