//! Facade crate for the OpsHub dispatch core.
//! Re-exports domain/kernel primitives and composes the feature slices into one
//! wired handle. Keep this crate thin: it should compose other crates, not
//! implement dispatch logic.
//!
//! ## Usage
//! - Build a catalogue store (or load a [`kernel::store::MemoryRegistry`] snapshot).
//! - Register services and status readers on [`OpsHub::builder`].
//! - Call [`OpsHub::validate_all`] at startup, then serve [`OpsHub::dispatch`].

pub use ohub_domain as domain;
pub use ohub_kernel as kernel;

pub use ohub_domain::config::RouterConfig;
pub use ohub_domain::envelope::{DispatchResult, ErrorBody};
pub use ohub_domain::request::{CallerContext, DispatchRequest};
pub use ohub_kernel::service::{HandlerError, Service};
pub use ohub_kernel::status::{StatusLookup, StatusReadError, StatusReader};
pub use ohub_kernel::store::{MemoryRegistry, RegistryStore};
pub use ohub_router::Router;
pub use ohub_validate::{ValidationError, Validator};

/// Feature slices, re-exported for direct access.
pub mod features {
    pub use ohub_registry as registry;
    pub use ohub_router as router;
    pub use ohub_validate as validate;
}

use ohub_kernel::service::{ServiceMap, ServiceMapBuilder};
use ohub_kernel::status::{StatusReaderMap, StatusReaderMapBuilder};
use ohub_registry::RegistryService;
use std::sync::Arc;

/// A fully wired dispatch core: catalogue, service map, status readers.
///
/// Everything inside is read-only after [`OpsHubBuilder::build`], so the handle
/// is cheap to clone and safe to share across tasks.
#[derive(Debug, Clone)]
pub struct OpsHub {
    registry: RegistryService,
    router: Router,
    validator: Validator,
}

impl OpsHub {
    #[must_use]
    pub fn builder(store: Arc<dyn RegistryStore>) -> OpsHubBuilder {
        OpsHubBuilder {
            store,
            services: ServiceMap::builder(),
            status_readers: StatusReaderMap::builder(),
            config: RouterConfig::default(),
        }
    }

    /// Dispatches one request through the router. Never returns an `Err`.
    pub async fn dispatch(&self, request: DispatchRequest) -> DispatchResult {
        self.router.dispatch(request).await
    }

    /// Fail-fast self-validation, meant for startup or tests.
    ///
    /// # Errors
    /// The first wiring violation found.
    pub async fn validate_all(&self) -> Result<(), ValidationError> {
        self.validator.validate_all().await
    }

    /// Aggregating self-validation reporting every violation at once.
    ///
    /// # Errors
    /// `REGISTRY_INVALID` listing each finding.
    pub async fn validate_report(&self) -> Result<(), ValidationError> {
        self.validator.validate_report().await
    }

    #[must_use]
    pub const fn registry(&self) -> &RegistryService {
        &self.registry
    }

    #[must_use]
    pub const fn router(&self) -> &Router {
        &self.router
    }
}

/// Collects services, status readers and configuration around one store.
pub struct OpsHubBuilder {
    store: Arc<dyn RegistryStore>,
    services: ServiceMapBuilder,
    status_readers: StatusReaderMapBuilder,
    config: RouterConfig,
}

impl std::fmt::Debug for OpsHubBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpsHubBuilder").field("config", &self.config).finish_non_exhaustive()
    }
}

impl OpsHubBuilder {
    /// Binds a live service instance to its catalogue `serviceKey`.
    #[must_use]
    pub fn service(mut self, service_key: impl Into<String>, service: Arc<dyn Service>) -> Self {
        self.services = self.services.register(service_key, service);
        self
    }

    /// Declares a service key without binding an instance.
    #[must_use]
    pub fn declare_service(mut self, service_key: impl Into<String>) -> Self {
        self.services = self.services.declare(service_key);
        self
    }

    /// Binds a status reader to its catalogue `statusEntityName`.
    #[must_use]
    pub fn status_reader(
        mut self,
        entity_name: impl Into<String>,
        reader: Arc<dyn StatusReader>,
    ) -> Self {
        self.status_readers = self.status_readers.register(entity_name, reader);
        self
    }

    /// Declares a status entity without binding a reader.
    #[must_use]
    pub fn declare_status_reader(mut self, entity_name: impl Into<String>) -> Self {
        self.status_readers = self.status_readers.declare(entity_name);
        self
    }

    #[must_use]
    pub fn config(mut self, config: RouterConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn build(self) -> OpsHub {
        let registry = RegistryService::new(self.store);
        let services = self.services.build();
        let status_readers = self.status_readers.build();

        let router = Router::new(
            registry.clone(),
            services.clone(),
            status_readers.clone(),
            self.config,
        );
        let validator = Validator::new(registry.clone(), services, status_readers);

        OpsHub { registry, router, validator }
    }
}
