//! Dispatch-facing failures of the registry: unknown codes, inactive objects,
//! and guard rejections. Wiring drift lives in `ohub_kernel::error` instead.

use ohub_derive::error_code;
use ohub_domain::envelope::ErrorBody;
use ohub_kernel::store::StoreError;
use serde_json::{Value, json};

/// A request the catalogue rejects before any handler runs.
#[error_code]
pub enum RegistryError {
    #[error("object `{object_code}` not found")]
    ObjectNotFound {
        object_code: String,
        /// Set when a guarded entity id did not resolve, rather than the
        /// catalogue code itself.
        id: Option<String>,
    },

    #[error("action `{action_code}` not found on object `{object_code}`")]
    ActionNotFound { object_code: String, action_code: String },

    #[error("object `{object_code}` is inactive")]
    ObjectInactive { object_code: String },

    #[error("action `{action_code}` is not enabled for agents")]
    ActionForbiddenForAgent { object_code: String, action_code: String },

    #[error("action `{action_code}` requires role `{required_role}`, caller has `{role}`")]
    ActionForbidden { action_code: String, required_role: String, role: String },

    #[error("action `{action_code}` requires the entity to have a status")]
    ActionStatusRequired {
        object_code: String,
        action_code: String,
        allowed_from_statuses: Vec<String>,
    },

    #[error("action `{action_code}` is not allowed from status `{current_status}`")]
    ActionInvalidStatus {
        object_code: String,
        action_code: String,
        current_status: String,
        allowed_from_statuses: Vec<String>,
    },

    /// Catalogue store failure, surfaced through the generic envelope code.
    #[code("ROUTER_ERROR")]
    #[error("registry store unavailable: {message}")]
    Unavailable { message: String },
}

impl RegistryError {
    pub(crate) fn object_not_found(object_code: impl Into<String>) -> Self {
        Self::ObjectNotFound { object_code: object_code.into(), id: None }
    }

    /// Structured details for the error envelope, camelCase like the catalogue.
    #[must_use]
    pub fn details(&self) -> Value {
        match self {
            Self::ObjectNotFound { object_code, id } => match id {
                Some(id) => json!({ "objectCode": object_code, "id": id }),
                None => json!({ "objectCode": object_code }),
            },
            Self::ActionNotFound { object_code, action_code }
            | Self::ActionForbiddenForAgent { object_code, action_code } => json!({
                "objectCode": object_code,
                "actionCode": action_code,
            }),
            Self::ObjectInactive { object_code } => json!({ "objectCode": object_code }),
            Self::ActionForbidden { action_code, required_role, role } => json!({
                "actionCode": action_code,
                "requiredRole": required_role,
                "role": role,
            }),
            Self::ActionStatusRequired { allowed_from_statuses, .. } => json!({
                "allowedFromStatuses": allowed_from_statuses,
            }),
            Self::ActionInvalidStatus { current_status, allowed_from_statuses, .. } => json!({
                "currentStatus": current_status,
                "allowedFromStatuses": allowed_from_statuses,
            }),
            Self::Unavailable { message } => json!({ "error": message }),
        }
    }
}

impl From<StoreError> for RegistryError {
    fn from(err: StoreError) -> Self {
        Self::Unavailable { message: err.to_string() }
    }
}

impl From<&RegistryError> for ErrorBody {
    fn from(err: &RegistryError) -> Self {
        Self::new(err.code(), err.to_string()).with_details(err.details())
    }
}
