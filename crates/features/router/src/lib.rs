//! Dispatch router feature slice.
//!
//! One entry point, [`Router::dispatch`]: normalize the request, resolve the
//! (object, action) pair, run the permission and status guards, invoke the
//! bound handler and wrap the outcome in the uniform result envelope.

pub mod router;

pub use router::{ROUTER_ERROR, Router};
