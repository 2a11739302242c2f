//! Self-validation failures. The one place in the core allowed to surface an
//! `Err` to its caller, since it halts startup or fails a test rather than
//! answering a request.

use ohub_domain::envelope::ErrorBody;
use ohub_kernel::error::WiringError;
use ohub_kernel::store::StoreError;
use serde_json::{Value, json};
use thiserror::Error;

/// Aggregate code used when findings are batched instead of failing fast.
pub const REGISTRY_INVALID: &str = "REGISTRY_INVALID";

#[derive(Debug, Error)]
pub enum ValidationError {
    /// First wiring violation found by the fail-fast pass.
    #[error(transparent)]
    Wiring(#[from] WiringError),

    #[error(transparent)]
    Store(#[from] StoreError),

    /// Every violation found by the aggregating pass.
    #[error("registry validation found {} violation(s)", findings.len())]
    RegistryInvalid { findings: Vec<ErrorBody> },
}

impl ValidationError {
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Wiring(err) => err.code(),
            Self::Store(_) => "ROUTER_ERROR",
            Self::RegistryInvalid { .. } => REGISTRY_INVALID,
        }
    }

    #[must_use]
    pub fn details(&self) -> Value {
        match self {
            Self::Wiring(err) => err.details(),
            Self::Store(err) => json!({ "error": err.to_string() }),
            Self::RegistryInvalid { findings } => {
                json!({ "findings": findings })
            },
        }
    }
}

impl From<&ValidationError> for ErrorBody {
    fn from(err: &ValidationError) -> Self {
        Self::new(err.code(), err.to_string()).with_details(err.details())
    }
}
