//! Handler/service contract and the static service map.
//!
//! A service is a live instance exposing callable members named by the registry's
//! `handlerName` strings. The exposed names are data (a manifest), so validation
//! is a pure diff between the catalogue and [`Service::handlers`], with no
//! runtime reflection anywhere.

use crate::error::WiringError;
use async_trait::async_trait;
use fxhash::FxHashMap;
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// A failure raised by a business handler.
///
/// Handlers may fail with their own structured `{code, message, details}` triple;
/// the router preserves it verbatim. A failure without a code is wrapped in the
/// generic `ROUTER_ERROR` envelope instead.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct HandlerError {
    pub code: Option<String>,
    pub message: String,
    pub details: Option<Value>,
}

impl HandlerError {
    /// Unstructured failure; the router wraps it as `ROUTER_ERROR`.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self { code: None, message: message.into(), details: None }
    }

    /// Structured failure with a stable business code, passed through verbatim.
    #[must_use]
    pub fn coded(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self { code: Some(code.into()), message: message.into(), details: None }
    }

    #[must_use]
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Raised when `invoke` is called with a name outside the manifest.
    /// Callers normally pre-check [`Service::handlers`] and report the
    /// wiring-level `HANDLER_NOT_FOUND` instead.
    #[must_use]
    pub fn unknown_handler(handler_name: &str) -> Self {
        Self::new(format!("unknown handler `{handler_name}`"))
    }
}

/// A live business service instance the router can invoke into.
#[async_trait]
pub trait Service: Send + Sync {
    /// The manifest: handler names this service exposes, as compile-time data.
    fn handlers(&self) -> &'static [&'static str];

    /// Invokes a handler by name with one opaque JSON payload.
    async fn invoke(
        &self,
        handler_name: &str,
        payload: Map<String, Value>,
    ) -> Result<Value, HandlerError>;
}

impl fmt::Debug for dyn Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("dyn Service")
    }
}

/// One slot in the service map.
///
/// A key can be *declared* without being bound — e.g. a feature slice compiled
/// out of this deployment — which keeps "unknown key" and "known key, no
/// instance" as distinct, explicit failures.
#[derive(Clone)]
enum ServiceSlot {
    Declared,
    Bound(Arc<dyn Service>),
}

impl fmt::Debug for ServiceSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Declared => f.write_str("Declared"),
            Self::Bound(_) => f.write_str("Bound(..)"),
        }
    }
}

/// The static table from `serviceKey` to a resolvable handler instance.
///
/// Built once at wiring time and read-only afterwards; resolution is a single
/// map index.
#[derive(Debug, Clone, Default)]
pub struct ServiceMap {
    entries: FxHashMap<String, ServiceSlot>,
}

impl ServiceMap {
    #[must_use]
    pub fn builder() -> ServiceMapBuilder {
        ServiceMapBuilder::default()
    }

    /// Resolves a service key to its live instance.
    ///
    /// # Errors
    /// Returns [`WiringError::ServiceNotFound`] for an unknown key and
    /// [`WiringError::ServiceInstanceNotFound`] for a declared-but-unbound one.
    pub fn resolve(
        &self,
        object_code: &str,
        service_key: &str,
    ) -> Result<Arc<dyn Service>, WiringError> {
        match self.entries.get(service_key) {
            Some(ServiceSlot::Bound(service)) => Ok(Arc::clone(service)),
            Some(ServiceSlot::Declared) => Err(WiringError::ServiceInstanceNotFound {
                object_code: object_code.to_owned(),
                service_key: service_key.to_owned(),
            }),
            None => Err(WiringError::ServiceNotFound {
                object_code: object_code.to_owned(),
                service_key: service_key.to_owned(),
            }),
        }
    }

    #[must_use]
    pub fn contains(&self, service_key: &str) -> bool {
        self.entries.contains_key(service_key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Builder collecting `serviceKey` → instance bindings at wiring time.
#[derive(Debug, Default)]
pub struct ServiceMapBuilder {
    entries: FxHashMap<String, ServiceSlot>,
}

impl ServiceMapBuilder {
    /// Binds a live service instance to a key. Re-binding a key replaces it.
    #[must_use]
    pub fn register(mut self, service_key: impl Into<String>, service: Arc<dyn Service>) -> Self {
        self.entries.insert(service_key.into(), ServiceSlot::Bound(service));
        self
    }

    /// Declares a key without binding an instance (for bindings that exist in the
    /// catalogue but are compiled out of this deployment). Never overwrites a
    /// bound instance.
    #[must_use]
    pub fn declare(mut self, service_key: impl Into<String>) -> Self {
        self.entries.entry(service_key.into()).or_insert(ServiceSlot::Declared);
        self
    }

    #[must_use]
    pub fn build(self) -> ServiceMap {
        ServiceMap { entries: self.entries }
    }
}

/// Implements [`Service`] for a type from a `"handlerName" => method` table.
///
/// The string keys are the registry-facing handler names; the methods are
/// `async fn(&self, Map<String, Value>) -> Result<Value, HandlerError>`.
/// Consumer crates need `async-trait` and `serde_json` in scope as dependencies.
///
/// ```rust,ignore
/// ohub_kernel::service_handlers! {
///     SuppliesService {
///         "confirmReceive" => confirm_receive,
///         "getById" => get_by_id,
///     }
/// }
/// ```
#[macro_export]
macro_rules! service_handlers {
    ($service:ty { $($name:literal => $method:ident),+ $(,)? }) => {
        #[$crate::async_trait]
        impl $crate::service::Service for $service {
            fn handlers(&self) -> &'static [&'static str] {
                &[$($name),+]
            }

            async fn invoke(
                &self,
                handler_name: &str,
                payload: ::serde_json::Map<::std::string::String, ::serde_json::Value>,
            ) -> ::std::result::Result<::serde_json::Value, $crate::service::HandlerError> {
                match handler_name {
                    $( $name => self.$method(payload).await, )+
                    other => ::std::result::Result::Err(
                        $crate::service::HandlerError::unknown_handler(other),
                    ),
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct EchoService;

    crate::service_handlers! {
        EchoService {
            "echo" => echo,
        }
    }

    impl EchoService {
        async fn echo(&self, payload: Map<String, Value>) -> Result<Value, HandlerError> {
            Ok(Value::Object(payload))
        }
    }

    #[tokio::test]
    async fn bound_service_resolves_and_invokes() {
        let map = ServiceMap::builder().register("EchoService", Arc::new(EchoService)).build();

        let service = map.resolve("THING", "EchoService").expect("bound key resolves");
        assert_eq!(service.handlers(), &["echo"]);

        let mut payload = Map::new();
        payload.insert("id".to_owned(), json!("T1"));
        let result = service.invoke("echo", payload).await.unwrap();
        assert_eq!(result, json!({"id": "T1"}));
    }

    #[tokio::test]
    async fn missing_and_declared_keys_fail_differently() {
        let map = ServiceMap::builder().declare("GhostService").build();

        let err = map.resolve("THING", "NoSuchService").unwrap_err();
        assert_eq!(err.code(), "SERVICE_NOT_FOUND");

        let err = map.resolve("THING", "GhostService").unwrap_err();
        assert_eq!(err.code(), "SERVICE_INSTANCE_NOT_FOUND");
    }

    #[tokio::test]
    async fn invoking_outside_the_manifest_is_an_unstructured_failure() {
        let service = EchoService;
        let err = service.invoke("nope", Map::new()).await.unwrap_err();
        assert!(err.code.is_none());
    }
}
