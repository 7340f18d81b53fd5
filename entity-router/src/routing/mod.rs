//! Capability addressing and target-resolution layer.
//!
//! Owns the route-pattern grammar, the per-router capability registry, and the
//! pure lookup that turns a registry pattern into an ordered list of
//! invocable targets (local drivers first, child routers as fallback).

mod pattern;
pub use pattern::{is_match, WILDCARD};

mod registry;
pub use registry::{
    Capability, EntityFamily, FanOutPolicy, Operation, RouteBinding, RouteRegistry,
};

pub mod routes;

mod resolver;
pub use resolver::{DriverTarget, RouterTarget, Target};
pub(crate) use resolver::{CapabilityBindings, DriverBinding};
