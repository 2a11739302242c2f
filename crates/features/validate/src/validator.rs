//! The two validation passes over the live catalogue.
//!
//! Resolution is by string key, so the catalogue can drift from the compiled
//! handler surface (renamed methods, unmapped services, dropped status fields)
//! without the compiler noticing. These passes turn that drift class into one
//! explicit check at startup or in a test, instead of a runtime error
//! discovered by a caller.

use crate::error::ValidationError;
use ohub_domain::envelope::ErrorBody;
use ohub_domain::registry::DomainObject;
use ohub_kernel::error::WiringError;
use ohub_kernel::service::ServiceMap;
use ohub_kernel::status::StatusReaderMap;
use ohub_kernel::store::StoreError;
use ohub_registry::{RegistryError, RegistryService};
use tracing::{debug, info};

/// Checks every registry binding against the compiled surface.
#[derive(Debug, Clone)]
pub struct Validator {
    registry: RegistryService,
    services: ServiceMap,
    status_readers: StatusReaderMap,
}

impl Validator {
    #[must_use]
    pub fn new(
        registry: RegistryService,
        services: ServiceMap,
        status_readers: StatusReaderMap,
    ) -> Self {
        Self { registry, services, status_readers }
    }

    /// Fail-fast validation: binding pass, then status-repository pass,
    /// stopping at the first violation.
    ///
    /// # Errors
    /// The first wiring violation found, or the store failure that prevented
    /// listing the catalogue.
    pub async fn validate_all(&self) -> Result<(), ValidationError> {
        let objects = self.list_catalogue().await?;

        for object in &objects {
            if let Some(violation) = self.binding_violations(object).into_iter().next() {
                return Err(violation.into());
            }
        }
        for object in &objects {
            self.check_status_repo(object).await?;
        }

        info!(objects = objects.len(), "registry self-validation passed");
        Ok(())
    }

    /// Aggregating validation: walks the whole catalogue and reports every
    /// violation at once.
    ///
    /// # Errors
    /// [`ValidationError::RegistryInvalid`] listing each finding, or the store
    /// failure that prevented listing the catalogue.
    pub async fn validate_report(&self) -> Result<(), ValidationError> {
        let objects = self.list_catalogue().await?;
        let mut findings: Vec<ErrorBody> = Vec::new();

        for object in &objects {
            findings.extend(self.binding_violations(object).iter().map(ErrorBody::from));
        }
        for object in &objects {
            if let Err(err) = self.check_status_repo(object).await {
                findings.push(ErrorBody::from(&err));
            }
        }

        if findings.is_empty() {
            info!(objects = objects.len(), "registry self-validation passed");
            Ok(())
        } else {
            Err(ValidationError::RegistryInvalid { findings })
        }
    }

    async fn list_catalogue(&self) -> Result<Vec<DomainObject>, ValidationError> {
        self.registry.list_objects().await.map_err(|err| {
            ValidationError::Store(StoreError::Unavailable(match err {
                RegistryError::Unavailable { message } => message,
                other => other.to_string(),
            }))
        })
    }

    /// Binding pass for one object: its service key must resolve to a live
    /// instance and every action's handler must be non-empty and on the
    /// instance's manifest. Returns one violation per broken action; an
    /// unresolvable service key masks the action checks, since there is no
    /// manifest to diff against.
    fn binding_violations(&self, object: &DomainObject) -> Vec<WiringError> {
        let Some(service_key) = object.service_key.as_deref() else {
            // Not dispatchable, nothing to bind.
            return Vec::new();
        };

        let service = match self.services.resolve(&object.code, service_key) {
            Ok(service) => service,
            Err(err) => return vec![err],
        };
        let manifest = service.handlers();

        let mut violations = Vec::new();
        for action in &object.actions {
            if action.handler_name.trim().is_empty() {
                violations.push(WiringError::HandlerEmpty {
                    object_code: object.code.clone(),
                    action_code: action.code.clone(),
                });
            } else if !manifest.contains(&action.handler_name.as_str()) {
                violations.push(WiringError::HandlerNotFound {
                    object_code: object.code.clone(),
                    action_code: action.code.clone(),
                    handler_name: action.handler_name.clone(),
                    service_key: service_key.to_owned(),
                });
            }
        }

        if violations.is_empty() {
            debug!(object = %object.code, service = service_key, "bindings ok");
        }
        violations
    }

    /// Status-repository pass for one object: a reader must be bound for the
    /// declared entity, and the declared field must be queryable on the live
    /// schema (probed with a minimal select).
    async fn check_status_repo(&self, object: &DomainObject) -> Result<(), WiringError> {
        let Some(binding) = object.status_binding() else {
            return Ok(());
        };

        let reader = self.status_readers.resolve(&object.code, binding.entity_name)?;
        if let Err(err) = reader.probe().await {
            return Err(WiringError::StatusFieldInvalid {
                object_code: object.code.clone(),
                status_entity_name: binding.entity_name.to_owned(),
                status_field_name: binding.field_name.to_owned(),
                error: err.to_string(),
            });
        }

        debug!(object = %object.code, entity = binding.entity_name, "status repo ok");
        Ok(())
    }
}
