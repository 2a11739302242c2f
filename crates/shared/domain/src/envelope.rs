//! The uniform result envelope crossing the router boundary.
//!
//! Failures are a stable `{code, message, details?}` triple, not language-level
//! errors: transport layers forward the envelope as-is and need no translation of
//! their own. On the wire the envelope is the discriminated shape
//! `{"success": true, "data": ...}` / `{"success": false, "error": {...}}`.

use serde::de::Error as DeError;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Machine-readable failure body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl ErrorBody {
    #[must_use]
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self { code: code.into(), message: message.into(), details: None }
    }

    #[must_use]
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }
}

/// Outcome of one dispatch: exactly one handler invocation succeeded, or a typed
/// failure was produced before/around it. No partial results are possible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchResult {
    Success { data: Value },
    Failure { error: ErrorBody },
}

impl DispatchResult {
    #[must_use]
    pub fn ok(data: Value) -> Self {
        Self::Success { data }
    }

    #[must_use]
    pub fn fail(error: ErrorBody) -> Self {
        Self::Failure { error }
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    #[must_use]
    pub const fn data(&self) -> Option<&Value> {
        match self {
            Self::Success { data } => Some(data),
            Self::Failure { .. } => None,
        }
    }

    #[must_use]
    pub const fn error(&self) -> Option<&ErrorBody> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { error } => Some(error),
        }
    }

    /// Error code of a failure, if any.
    #[must_use]
    pub fn error_code(&self) -> Option<&str> {
        self.error().map(|e| e.code.as_str())
    }
}

impl Serialize for DispatchResult {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Success { data } => {
                let mut state = serializer.serialize_struct("DispatchResult", 2)?;
                state.serialize_field("success", &true)?;
                state.serialize_field("data", data)?;
                state.end()
            },
            Self::Failure { error } => {
                let mut state = serializer.serialize_struct("DispatchResult", 2)?;
                state.serialize_field("success", &false)?;
                state.serialize_field("error", error)?;
                state.end()
            },
        }
    }
}

impl<'de> Deserialize<'de> for DispatchResult {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct RawEnvelope {
            success: bool,
            #[serde(default)]
            data: Option<Value>,
            #[serde(default)]
            error: Option<ErrorBody>,
        }

        let raw = RawEnvelope::deserialize(deserializer)?;
        if raw.success {
            Ok(Self::Success { data: raw.data.unwrap_or(Value::Null) })
        } else {
            let error = raw
                .error
                .ok_or_else(|| D::Error::custom("failure envelope is missing `error`"))?;
            Ok(Self::Failure { error })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_envelope_is_discriminated() {
        let result = DispatchResult::ok(json!({"id": "S1"}));
        let wire = serde_json::to_value(&result).unwrap();
        assert_eq!(wire, json!({"success": true, "data": {"id": "S1"}}));
        assert_eq!(serde_json::from_value::<DispatchResult>(wire).unwrap(), result);
    }

    #[test]
    fn failure_envelope_carries_code_and_details() {
        let result = DispatchResult::fail(
            ErrorBody::new("ACTION_INVALID_STATUS", "not allowed from RECEIVED")
                .with_details(json!({"currentStatus": "RECEIVED"})),
        );
        let wire = serde_json::to_value(&result).unwrap();
        assert_eq!(wire["success"], json!(false));
        assert_eq!(wire["error"]["code"], json!("ACTION_INVALID_STATUS"));
        assert_eq!(serde_json::from_value::<DispatchResult>(wire).unwrap(), result);
    }
}
