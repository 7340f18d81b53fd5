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

//! Immutable capability registry: one route pattern and fan-out policy per
//! capability, built once at router-assembly time and threaded explicitly into
//! resolution.

use std::collections::HashMap;
use std::fmt;

/// Entity/operation family a capability belongs to.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum EntityFamily {
    Sources,
    SourceMetadata,
    Definitions,
    DefinitionMetadata,
    Messages,
    Commands,
    Blobs,
}

/// Operation verb within a family.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Operation {
    Read,
    Query,
    Subscribe,
    Publish,
    Delete,
    Empty,
    Expire,
    ExpireUpdate,
    ExpireAccess,
    Run,
}

/// A narrow operation contract addressed by exactly one route pattern.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Capability {
    pub family: EntityFamily,
    pub operation: Operation,
}

impl Capability {
    pub const fn new(family: EntityFamily, operation: Operation) -> Self {
        Self { family, operation }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}.{:?}", self.family, self.operation)
    }
}

/// How the executor treats multiple matching local drivers.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FanOutPolicy {
    /// Invoke all drivers concurrently and merge result items, de-duplicated
    /// by identity. Read-shaped default.
    Merge,
    /// Attempt drivers in order and keep the first successful response.
    /// Required for stream-valued reads, which cannot be merged.
    First,
    /// Invoke all drivers concurrently and require unanimous success.
    /// Write-shaped default.
    All,
}

/// Registry entry for one capability.
#[derive(Clone, Copy, Debug)]
pub struct RouteBinding {
    pub pattern: &'static str,
    pub policy: FanOutPolicy,
}

/// Capability-to-pattern table for one router.
///
/// Lookup of a capability that was never registered is a programming error
/// and panics rather than degrading silently.
pub struct RouteRegistry {
    bindings: HashMap<Capability, RouteBinding>,
}

impl RouteRegistry {
    pub(crate) fn empty() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Builds the full platform registry from the per-family route tables.
    pub fn platform() -> Self {
        let mut registry = Self::empty();
        super::routes::register_all(&mut registry);
        registry
    }

    /// Registers `capability` under `pattern` with the given policy.
    ///
    /// Panics when the capability is already registered; each capability maps
    /// to exactly one pattern within a registry.
    pub fn register(&mut self, capability: Capability, pattern: &'static str, policy: FanOutPolicy) {
        let previous = self
            .bindings
            .insert(capability, RouteBinding { pattern, policy });
        if let Some(previous) = previous {
            panic!(
                "capability {capability} registered twice (patterns {} and {pattern})",
                previous.pattern
            );
        }
    }

    /// Overrides the fan-out policy of an already-registered capability.
    pub fn set_policy(&mut self, capability: Capability, policy: FanOutPolicy) {
        let binding = self
            .bindings
            .get_mut(&capability)
            .unwrap_or_else(|| panic!("capability {capability} is not registered"));
        binding.policy = policy;
    }

    /// Resolves a capability to its route binding.
    ///
    /// Panics when the capability was never registered; requesting an
    /// undeclared capability is a programming error.
    pub fn resolve(&self, capability: Capability) -> RouteBinding {
        *self
            .bindings
            .get(&capability)
            .unwrap_or_else(|| panic!("capability {capability} is not registered"))
    }

    /// Non-panicking lookup, for callers probing whether a family declares a
    /// capability at all (deferred-option processing).
    pub fn try_resolve(&self, capability: Capability) -> Option<RouteBinding> {
        self.bindings.get(&capability).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::{Capability, EntityFamily, FanOutPolicy, Operation, RouteRegistry};

    #[test]
    fn platform_registry_resolves_declared_capabilities() {
        let registry = RouteRegistry::platform();

        let read = registry.resolve(Capability::new(EntityFamily::Sources, Operation::Read));
        assert_eq!(read.pattern, "Sources.Instances.Read.Absolute");
        assert_eq!(read.policy, FanOutPolicy::Merge);

        let publish = registry.resolve(Capability::new(EntityFamily::Sources, Operation::Publish));
        assert_eq!(publish.pattern, "Sources.Instances.Write.Publish");
        assert_eq!(publish.policy, FanOutPolicy::All);

        let blob_read = registry.resolve(Capability::new(EntityFamily::Blobs, Operation::Read));
        assert_eq!(blob_read.policy, FanOutPolicy::First);
    }

    #[test]
    #[should_panic(expected = "is not registered")]
    fn unregistered_capability_panics() {
        let registry = RouteRegistry::empty();
        registry.resolve(Capability::new(EntityFamily::Sources, Operation::Read));
    }

    #[test]
    fn policy_override_is_visible_on_resolve() {
        let mut registry = RouteRegistry::platform();
        let capability = Capability::new(EntityFamily::Sources, Operation::Read);

        registry.set_policy(capability, FanOutPolicy::First);

        assert_eq!(registry.resolve(capability).policy, FanOutPolicy::First);
    }

    #[test]
    #[should_panic(expected = "registered twice")]
    fn duplicate_registration_panics() {
        let mut registry = RouteRegistry::platform();
        registry.register(
            Capability::new(EntityFamily::Sources, Operation::Read),
            "Sources.Instances.Read.Absolute",
            FanOutPolicy::Merge,
        );
    }
}
