//! Kernel utilities shared across slices.
//!
//! This crate owns the three seams where declarative registry metadata meets
//! compiled code:
//!
//! * [`store`] — the read-only registry store contract plus an in-memory snapshot
//!   implementation.
//! * [`service`] — the handler/service contract and the static [`ServiceMap`]
//!   from `serviceKey` to a live instance. Resolution is a single map index, not
//!   reflection, so the failure modes (missing key vs. missing instance) stay
//!   explicit.
//! * [`status`] — the status-repository contract: one typed reader per guarded
//!   entity, registered in a static table keyed by entity name.
//!
//! All three maps are built once at wiring time and never mutated afterwards,
//! which is why concurrent dispatches need no locking here.

pub mod error;
pub mod service;
pub mod status;
pub mod store;

pub use ohub_domain as domain;

// Re-exported so `service_handlers!` expansions resolve in consumer crates.
pub use async_trait::async_trait;

pub use crate::error::WiringError;
pub use crate::service::{HandlerError, Service, ServiceMap, ServiceMapBuilder};
pub use crate::status::{StatusLookup, StatusReadError, StatusReader, StatusReaderMap};
pub use crate::store::{MemoryRegistry, RegistryStore, StoreError};
