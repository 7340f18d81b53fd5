/********************************************************************************
 * Copyright (c) 2026 Contributors to the Eclipse Foundation
 *
 * See the NOTICE file(s) distributed with this work for additional
 * information regarding copyright ownership.
 *
 * This program and the accompanying materials are made available under the
 * terms of the Apache License Version 2.0 which is available at
 * https://www.apache.org/licenses/LICENSE-2.0
 *
 * SPDX-License-Identifier: Apache-2.0
 ********************************************************************************/

//! Target model and typed driver bindings.
//!
//! A target is resolved per call and never outlives the call that produced
//! it: either a locally bound capability implementation or a child router
//! carrying the pattern to recurse with. Driver bindings are stored per
//! capability trait-object type, keyed by `TypeId`, so resolution stays a
//! pure lookup with no runtime type inspection on the request path.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

use crate::routing::pattern;
use crate::router::Router;

/// A locally bound capability implementation plus an identifier for logging.
pub struct DriverTarget<D: ?Sized> {
    pub id: String,
    pub driver: Arc<D>,
}

impl<D: ?Sized> Clone for DriverTarget<D> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            driver: self.driver.clone(),
        }
    }
}

/// A child/peer router reachable for a pattern, carrying the pattern used
/// when recursing.
#[derive(Clone)]
pub struct RouterTarget {
    pub id: String,
    pub router: Router,
    pub pattern: String,
}

/// A resolved, invocable endpoint for a capability.
pub enum Target<D: ?Sized> {
    Driver(DriverTarget<D>),
    Router(RouterTarget),
}

/// One driver registered for a capability, with the route patterns its
/// configuration claims.
pub(crate) struct DriverBinding<D: ?Sized> {
    pub(crate) id: String,
    pub(crate) patterns: Vec<String>,
    pub(crate) driver: Arc<D>,
}

impl<D: ?Sized> DriverBinding<D> {
    fn matches(&self, route: &str) -> bool {
        self.patterns.iter().any(|p| pattern::is_match(p, route))
    }
}

/// Typed driver bindings per capability trait-object type.
///
/// Mutated only at router-assembly time; the request path reads it without
/// locking.
pub(crate) struct CapabilityBindings {
    slots: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl CapabilityBindings {
    pub(crate) fn new() -> Self {
        Self {
            slots: HashMap::new(),
        }
    }

    /// Registers a driver binding for capability `D`.
    pub(crate) fn bind<D>(&mut self, binding: DriverBinding<D>)
    where
        D: ?Sized + Send + Sync + 'static,
    {
        let slot = self
            .slots
            .entry(TypeId::of::<D>())
            .or_insert_with(|| Box::new(Vec::<DriverBinding<D>>::new()));
        slot.downcast_mut::<Vec<DriverBinding<D>>>()
            .expect("capability slot holds bindings of its own type")
            .push(binding);
    }

    /// Returns the driver targets bound for capability `D` whose patterns
    /// claim `route`, de-duplicated by driver id so no two bindings shadow
    /// each other.
    pub(crate) fn bound<D>(&self, route: &str) -> Vec<DriverTarget<D>>
    where
        D: ?Sized + Send + Sync + 'static,
    {
        let mut targets: Vec<DriverTarget<D>> = Vec::new();
        if let Some(slot) = self.slots.get(&TypeId::of::<D>()) {
            let bindings = slot
                .downcast_ref::<Vec<DriverBinding<D>>>()
                .expect("capability slot holds bindings of its own type");
            for binding in bindings {
                if binding.matches(route) && !targets.iter().any(|t| t.id == binding.id) {
                    targets.push(DriverTarget {
                        id: binding.id.clone(),
                        driver: binding.driver.clone(),
                    });
                }
            }
        }
        targets
    }
}

#[cfg(test)]
mod tests {
    use super::{CapabilityBindings, DriverBinding};
    use async_trait::async_trait;
    use std::sync::Arc;

    #[async_trait]
    trait ProbeCapability: Send + Sync {
        async fn probe(&self) -> &'static str;
    }

    struct ProbeDriver(&'static str);

    #[async_trait]
    impl ProbeCapability for ProbeDriver {
        async fn probe(&self) -> &'static str {
            self.0
        }
    }

    fn binding(id: &str, patterns: &[&str], answer: &'static str) -> DriverBinding<dyn ProbeCapability> {
        DriverBinding {
            id: id.to_string(),
            patterns: patterns.iter().map(|p| p.to_string()).collect(),
            driver: Arc::new(ProbeDriver(answer)),
        }
    }

    #[tokio::test]
    async fn bound_returns_only_pattern_matching_drivers() {
        let mut bindings = CapabilityBindings::new();
        bindings.bind(binding("driver-a", &["Sources.*"], "a"));
        bindings.bind(binding("driver-b", &["Definitions.*"], "b"));

        let targets = bindings.bound::<dyn ProbeCapability>("Sources.Instances.Read.Absolute");

        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].id, "driver-a");
        assert_eq!(targets[0].driver.probe().await, "a");
    }

    #[test]
    fn duplicate_driver_ids_do_not_shadow_each_other() {
        let mut bindings = CapabilityBindings::new();
        bindings.bind(binding("driver-a", &["Sources.*"], "a"));
        bindings.bind(binding("driver-a", &["*"], "a"));

        let targets = bindings.bound::<dyn ProbeCapability>("Sources.Instances.Read.Absolute");

        assert_eq!(targets.len(), 1);
    }

    #[test]
    fn unbound_capability_resolves_to_no_targets() {
        let bindings = CapabilityBindings::new();
        let targets = bindings.bound::<dyn ProbeCapability>("Sources.Instances.Read.Absolute");
        assert!(targets.is_empty());
    }
}
