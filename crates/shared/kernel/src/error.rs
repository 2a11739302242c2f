//! Wiring failures: the registry declared a binding the compiled surface does not have.
//!
//! Resolution is by string key, so the catalogue can drift from the handler
//! surface (renamed methods, unmapped services, dropped status fields) without the
//! compiler noticing. Each drift class gets one variant here; Self-Validation
//! reports them offline and the router reports the dispatch-time subset.

use ohub_derive::error_code;
use ohub_domain::envelope::ErrorBody;
use serde_json::{Value, json};

/// A declared binding that does not resolve against the compiled code.
#[error_code]
pub enum WiringError {
    #[error("service not found for key `{service_key}`")]
    ServiceNotFound { object_code: String, service_key: String },

    #[error("no instance bound for service key `{service_key}`")]
    ServiceInstanceNotFound { object_code: String, service_key: String },

    #[error("handler `{handler_name}` not found on service `{service_key}`")]
    HandlerNotFound {
        object_code: String,
        action_code: String,
        handler_name: String,
        service_key: String,
    },

    #[error("action {object_code}.{action_code} declares an empty handler name")]
    HandlerEmpty { object_code: String, action_code: String },

    #[error("no status reader mapped for entity `{status_entity_name}`")]
    StatusRepoNotMapped { object_code: String, status_entity_name: String },

    #[error("status reader for entity `{status_entity_name}` is declared but not bound")]
    StatusRepoInvalid { object_code: String, status_entity_name: String },

    #[error(
        "status field `{status_field_name}` is not queryable on entity `{status_entity_name}`: {error}"
    )]
    StatusFieldInvalid {
        object_code: String,
        status_entity_name: String,
        status_field_name: String,
        error: String,
    },
}

impl WiringError {
    /// Structured details for the error envelope, camelCase like the catalogue.
    #[must_use]
    pub fn details(&self) -> Value {
        match self {
            Self::ServiceNotFound { object_code, service_key }
            | Self::ServiceInstanceNotFound { object_code, service_key } => json!({
                "objectCode": object_code,
                "serviceKey": service_key,
            }),
            Self::HandlerNotFound { object_code, action_code, handler_name, service_key } => {
                json!({
                    "objectCode": object_code,
                    "actionCode": action_code,
                    "handlerName": handler_name,
                    "serviceKey": service_key,
                })
            },
            Self::HandlerEmpty { object_code, action_code } => json!({
                "objectCode": object_code,
                "actionCode": action_code,
            }),
            Self::StatusRepoNotMapped { object_code, status_entity_name }
            | Self::StatusRepoInvalid { object_code, status_entity_name } => json!({
                "objectCode": object_code,
                "statusEntityName": status_entity_name,
            }),
            Self::StatusFieldInvalid {
                object_code,
                status_entity_name,
                status_field_name,
                error,
            } => json!({
                "objectCode": object_code,
                "statusEntityName": status_entity_name,
                "statusFieldName": status_field_name,
                "error": error,
            }),
        }
    }
}

impl From<&WiringError> for ErrorBody {
    fn from(err: &WiringError) -> Self {
        Self::new(err.code(), err.to_string()).with_details(err.details())
    }
}
