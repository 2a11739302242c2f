//! Catalogue lookups over a [`RegistryStore`] snapshot.

use crate::error::RegistryError;
use crate::guard;
use ohub_domain::normalize_code;
use ohub_domain::registry::{Action, DomainObject};
use ohub_kernel::store::RegistryStore;
use std::sync::Arc;
use tracing::debug;

/// Everything the router needs to reach the handler for one (object, action)
/// pair: the rows themselves plus the service-map key and callable name.
#[derive(Debug, Clone)]
pub struct ResolvedHandler {
    pub object: DomainObject,
    pub action: Action,
    /// Absent when the object declares no `serviceKey`; such objects are not
    /// dispatchable and fail at the service-map seam.
    pub service_key: Option<String>,
    pub handler_name: String,
}

/// Read-only view over the registry catalogue, plus the dispatch guards.
///
/// Stateless apart from the store handle, so one instance serves any number
/// of concurrent calls.
#[derive(Clone)]
pub struct RegistryService {
    store: Arc<dyn RegistryStore>,
}

impl std::fmt::Debug for RegistryService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistryService").finish_non_exhaustive()
    }
}

impl RegistryService {
    #[must_use]
    pub fn new(store: Arc<dyn RegistryStore>) -> Self {
        Self { store }
    }

    /// The full live catalogue, ordered by code.
    ///
    /// # Errors
    /// Fails only when the store is unreachable.
    pub async fn list_objects(&self) -> Result<Vec<DomainObject>, RegistryError> {
        let mut objects = self.store.list_all().await?;
        objects.sort_by(|a, b| a.code.cmp(&b.code));
        Ok(objects)
    }

    /// Ordered action list of one object.
    ///
    /// # Errors
    /// `OBJECT_NOT_FOUND` when no object matches the normalized code.
    pub async fn list_actions_for_object(&self, code: &str) -> Result<Vec<Action>, RegistryError> {
        let object = self.get_object_by_code(code).await?;
        Ok(object.actions)
    }

    /// Lookup by code, normalizing first.
    ///
    /// # Errors
    /// `OBJECT_NOT_FOUND` when no object matches the normalized code.
    pub async fn get_object_by_code(&self, code: &str) -> Result<DomainObject, RegistryError> {
        let normalized = normalize_code(code);
        self.store
            .get_by_code(&normalized)
            .await?
            .ok_or_else(|| RegistryError::object_not_found(normalized))
    }

    /// Looks up an (object, action) pair.
    ///
    /// # Errors
    /// `OBJECT_NOT_FOUND` for an unknown object, `ACTION_NOT_FOUND` when the
    /// object exists but the action does not.
    pub async fn get_action(
        &self,
        object_code: &str,
        action_code: &str,
    ) -> Result<(DomainObject, Action), RegistryError> {
        let object = self.get_object_by_code(object_code).await?;
        let normalized = normalize_code(action_code);
        let Some(action) = object.find_action(&normalized).cloned() else {
            return Err(RegistryError::ActionNotFound {
                object_code: object.code,
                action_code: normalized,
            });
        };
        Ok((object, action))
    }

    /// Resolves the dispatch target for an (object, action) pair.
    ///
    /// # Errors
    /// As [`Self::get_action`], plus `OBJECT_INACTIVE` for a switched-off object.
    pub async fn resolve_handler(
        &self,
        object_code: &str,
        action_code: &str,
    ) -> Result<ResolvedHandler, RegistryError> {
        let (object, action) = self.get_action(object_code, action_code).await?;
        if !object.is_active {
            return Err(RegistryError::ObjectInactive { object_code: object.code });
        }

        debug!(
            object = %object.code,
            action = %action.code,
            handler = %action.handler_name,
            "handler resolved"
        );

        Ok(ResolvedHandler {
            service_key: object.service_key.clone(),
            handler_name: action.handler_name.clone(),
            object,
            action,
        })
    }

    /// Agent guard by codes; see [`guard::ensure_enabled_for_agents`].
    ///
    /// # Errors
    /// Lookup failures as [`Self::get_action`], `ACTION_FORBIDDEN_FOR_AGENT`
    /// when the action is switched off for agents.
    pub async fn ensure_action_allowed_for_agents(
        &self,
        object_code: &str,
        action_code: &str,
    ) -> Result<(), RegistryError> {
        let (object, action) = self.get_action(object_code, action_code).await?;
        guard::ensure_enabled_for_agents(&object, &action)
    }

    /// Status guard by codes; see [`guard::ensure_status_allowed`].
    ///
    /// # Errors
    /// Lookup failures as [`Self::get_action`], `ACTION_STATUS_REQUIRED` or
    /// `ACTION_INVALID_STATUS` per the status machine.
    pub async fn ensure_action_allowed_for_status(
        &self,
        object_code: &str,
        action_code: &str,
        current_status: Option<&str>,
    ) -> Result<(), RegistryError> {
        let (object, action) = self.get_action(object_code, action_code).await?;
        guard::ensure_status_allowed(&object, &action, current_status)
    }
}
