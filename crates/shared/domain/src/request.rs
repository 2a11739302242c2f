//! Transient dispatch request types, created and consumed within one call.

use crate::normalize_code;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Who is calling. Absent fields fall back to router defaults (`role` → `"AGENT"`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallerContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl CallerContext {
    /// Context with only a role set.
    #[must_use]
    pub fn with_role(role: impl Into<String>) -> Self {
        Self { role: Some(role.into()), ..Self::default() }
    }
}

/// One invocation of `(object, action)` with an opaque JSON payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchRequest {
    pub object: String,
    pub action: String,
    #[serde(default)]
    pub payload: Map<String, Value>,
    #[serde(default)]
    pub context: CallerContext,
}

impl DispatchRequest {
    #[must_use]
    pub fn new(object: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            object: object.into(),
            action: action.into(),
            payload: Map::new(),
            context: CallerContext::default(),
        }
    }

    #[must_use]
    pub fn payload(mut self, payload: Map<String, Value>) -> Self {
        self.payload = payload;
        self
    }

    #[must_use]
    pub fn context(mut self, context: CallerContext) -> Self {
        self.context = context;
        self
    }

    /// Normalized object code for lookup.
    #[must_use]
    pub fn object_code(&self) -> String {
        normalize_code(&self.object)
    }

    /// Normalized action code for lookup.
    #[must_use]
    pub fn action_code(&self) -> String {
        normalize_code(&self.action)
    }
}
