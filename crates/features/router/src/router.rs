//! The dispatch pipeline: resolve, guard, invoke, wrap.

use ohub_domain::config::RouterConfig;
use ohub_domain::constants::DEFAULT_ID_KEY;
use ohub_domain::envelope::{DispatchResult, ErrorBody};
use ohub_domain::registry::DomainObject;
use ohub_domain::request::DispatchRequest;
use ohub_kernel::error::WiringError;
use ohub_kernel::service::{HandlerError, ServiceMap};
use ohub_kernel::status::{StatusLookup, StatusReaderMap};
use ohub_registry::error::RegistryError;
use ohub_registry::{RegistryService, ResolvedHandler, guard};
use serde_json::{Map, Value, json};
use tracing::{debug, warn};

/// Generic fallback code for failures with no stable code of their own.
pub const ROUTER_ERROR: &str = "ROUTER_ERROR";

/// Metadata-driven dispatch over the registry catalogue.
///
/// Owns no mutable state: the catalogue handle, service map and reader map are
/// read-only after wiring, so one router serves any number of concurrent calls.
/// The pipeline is a single-transition state machine; any guard failure is a
/// terminal edge to a typed error, never an escaping panic or `Err`.
#[derive(Debug, Clone)]
pub struct Router {
    registry: RegistryService,
    services: ServiceMap,
    status_readers: StatusReaderMap,
    config: RouterConfig,
}

impl Router {
    #[must_use]
    pub fn new(
        registry: RegistryService,
        services: ServiceMap,
        status_readers: StatusReaderMap,
        config: RouterConfig,
    ) -> Self {
        Self { registry, services, status_readers, config }
    }

    /// Dispatches one request: exactly one handler invocation on success, a
    /// typed failure envelope otherwise. Never returns an `Err` to the caller.
    pub async fn dispatch(&self, request: DispatchRequest) -> DispatchResult {
        let object_code = request.object_code();
        let action_code = request.action_code();
        debug!(object = %object_code, action = %action_code, "dispatching");

        match self.run(&object_code, &action_code, &request).await {
            Ok(data) => DispatchResult::ok(data),
            Err(error) => {
                warn!(
                    object = %object_code,
                    action = %action_code,
                    code = %error.code,
                    "dispatch rejected"
                );
                DispatchResult::fail(error)
            },
        }
    }

    async fn run(
        &self,
        object_code: &str,
        action_code: &str,
        request: &DispatchRequest,
    ) -> Result<Value, ErrorBody> {
        let resolved = self
            .registry
            .resolve_handler(object_code, action_code)
            .await
            .map_err(|e| ErrorBody::from(&e))?;

        self.check_permissions(&resolved, request)?;

        let current_status = self.current_status(&resolved.object, &request.payload).await?;
        guard::ensure_status_allowed(&resolved.object, &resolved.action, current_status.as_deref())
            .map_err(|e| ErrorBody::from(&e))?;

        // Objects without a serviceKey miss the map and fail the same way an
        // unmapped key does.
        let service_key = resolved.service_key.clone().unwrap_or_default();
        let service = self
            .services
            .resolve(&resolved.object.code, &service_key)
            .map_err(|e| ErrorBody::from(&e))?;

        // Pre-check the manifest so a drifted handler name fails with the same
        // wiring error Self-Validation reports, not an opaque handler failure.
        if !service.handlers().contains(&resolved.handler_name.as_str()) {
            let err = WiringError::HandlerNotFound {
                object_code: resolved.object.code.clone(),
                action_code: resolved.action.code.clone(),
                handler_name: resolved.handler_name.clone(),
                service_key,
            };
            return Err(ErrorBody::from(&err));
        }

        service
            .invoke(&resolved.handler_name, request.payload.clone())
            .await
            .map_err(handler_failure)
    }

    fn check_permissions(
        &self,
        resolved: &ResolvedHandler,
        request: &DispatchRequest,
    ) -> Result<(), ErrorBody> {
        let role = request.context.role.as_deref().unwrap_or(&self.config.default_role);

        if role == self.config.default_role {
            guard::ensure_enabled_for_agents(&resolved.object, &resolved.action)
                .map_err(|e| ErrorBody::from(&e))?;
        }
        guard::ensure_role_allowed(&resolved.action, role, &self.config.system_role)
            .map_err(|e| ErrorBody::from(&e))
    }

    /// Resolves the guarded entity's current status, lazily.
    ///
    /// Only objects declaring a status binding trigger a lookup, and only when
    /// the payload carries an id. An unmapped status entity yields no status
    /// here; Self-Validation is where that drift gets reported.
    async fn current_status(
        &self,
        object: &DomainObject,
        payload: &Map<String, Value>,
    ) -> Result<Option<String>, ErrorBody> {
        let Some(binding) = object.status_binding() else {
            return Ok(None);
        };
        let Some(id) = entity_id(object, payload) else {
            return Ok(None);
        };

        let reader = match self.status_readers.resolve(&object.code, binding.entity_name) {
            Ok(reader) => reader,
            Err(err) => {
                warn!(
                    object = %object.code,
                    entity = binding.entity_name,
                    code = err.code(),
                    "status reader unresolved, treating status as absent"
                );
                return Ok(None);
            },
        };

        match reader.find_status(&id).await {
            Ok(StatusLookup::Found { status }) => Ok(status),
            Ok(StatusLookup::Missing) => {
                let err =
                    RegistryError::ObjectNotFound { object_code: object.code.clone(), id: Some(id) };
                Err(ErrorBody::from(&err))
            },
            Err(err) => Err(ErrorBody::new(ROUTER_ERROR, err.to_string())
                .with_details(json!({ "objectCode": object.code, "id": id }))),
        }
    }
}

/// Id under the object's `idPayloadKey`, falling back to `"id"`. A null at the
/// declared key counts as absent and still falls back. String ids pass
/// through, numeric ids are stringified, anything else counts as absent.
fn entity_id(object: &DomainObject, payload: &Map<String, Value>) -> Option<String> {
    let value = payload
        .get(object.id_key())
        .filter(|value| !value.is_null())
        .or_else(|| payload.get(DEFAULT_ID_KEY))?;
    match value {
        Value::String(id) => Some(id.clone()),
        Value::Number(id) => Some(id.to_string()),
        _ => None,
    }
}

/// Preserves a handler's own structured error; wraps anything unstructured.
fn handler_failure(err: HandlerError) -> ErrorBody {
    let HandlerError { code, message, details } = err;
    let mut body = ErrorBody::new(code.unwrap_or_else(|| ROUTER_ERROR.to_owned()), message);
    if let Some(details) = details {
        body = body.with_details(details);
    }
    body
}
