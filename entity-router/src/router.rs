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

//! The router facade: registry, driver bindings, child links, and the
//! per-family router accessors.
//!
//! Registry and bindings are immutable once built, so the request path reads
//! them without locking. Child routers form a tree; a call that finds no
//! local driver delegates down the configured chain.

use std::sync::Arc;

use tracing::debug;

use crate::dispatch::{RouteResponse, RouteResult};
use crate::entities::{
    CommandRouter, DefinitionRouter, EntityRouter, MessageRouter, RoutedEntity, SourceRouter,
};
use crate::blobs::BlobRouter;
use crate::observability::events;
use crate::routing::{
    is_match, Capability, CapabilityBindings, DriverBinding, DriverTarget, FanOutPolicy,
    RouteRegistry, RouterTarget, Target,
};
use crate::subscriptions::{NotificationSink, Subscription, SubscriptionManager};

const COMPONENT: &str = "router";

pub(crate) struct ChildLink {
    router: Router,
    patterns: Vec<String>,
}

impl ChildLink {
    fn serves(&self, route: &str) -> bool {
        self.patterns.iter().any(|p| is_match(p, route))
    }
}

pub(crate) struct RouterInner {
    id: String,
    registry: RouteRegistry,
    bindings: CapabilityBindings,
    children: Vec<ChildLink>,
    subscriptions: SubscriptionManager,
}

/// A routing node: locates the right executor for each operation among its
/// locally bound drivers and configured child routers.
#[derive(Clone)]
pub struct Router {
    inner: Arc<RouterInner>,
}

impl Router {
    pub fn builder(id: impl Into<String>) -> RouterBuilder {
        RouterBuilder {
            id: id.into(),
            registry: RouteRegistry::platform(),
            bindings: CapabilityBindings::new(),
            children: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.inner.id
    }

    pub(crate) fn registry(&self) -> &RouteRegistry {
        &self.inner.registry
    }

    /// Resolves the ordered target list for a capability pattern: local
    /// drivers when any are bound, otherwise child routers claiming the
    /// pattern, otherwise empty (the no-route condition).
    pub(crate) fn resolve_targets<D>(&self, pattern: &str) -> Vec<Target<D>>
    where
        D: ?Sized + Send + Sync + 'static,
    {
        let drivers: Vec<DriverTarget<D>> = self.inner.bindings.bound::<D>(pattern);
        if !drivers.is_empty() {
            return drivers.into_iter().map(Target::Driver).collect();
        }

        self.inner
            .children
            .iter()
            .filter(|child| child.serves(pattern))
            .map(|child| {
                Target::Router(RouterTarget {
                    id: child.router.id().to_string(),
                    router: child.router.clone(),
                    pattern: pattern.to_string(),
                })
            })
            .collect()
    }

    /// Generic entity router for any routed entity kind.
    pub fn entities<E: RoutedEntity>(&self) -> EntityRouter<E> {
        EntityRouter::new(self.clone())
    }

    pub fn sources(&self) -> SourceRouter {
        SourceRouter::new(self.clone())
    }

    pub fn definitions(&self) -> DefinitionRouter {
        DefinitionRouter::new(self.clone())
    }

    pub fn messages(&self) -> MessageRouter {
        MessageRouter::new(self.clone())
    }

    pub fn commands(&self) -> CommandRouter {
        CommandRouter::new(self.clone())
    }

    pub fn blobs(&self) -> BlobRouter {
        BlobRouter::new(self.clone())
    }

    pub fn subscriptions(&self) -> &SubscriptionManager {
        &self.inner.subscriptions
    }

    /// Opens a notification subscription for one entity kind: resolves the
    /// subscribe capability with the read machinery (kept open), registers
    /// the push sink under a fresh id, and starts delivery.
    pub async fn subscribe_notifications<E: RoutedEntity>(
        &self,
        filter: &str,
        sink: Arc<dyn NotificationSink>,
        request_id: Option<String>,
    ) -> RouteResponse<Subscription> {
        let response = self.entities::<E>().subscribe(request_id).await;
        let duration = response.duration;
        if !response.success() {
            let results = response
                .results
                .into_iter()
                .map(RouteResult::recast)
                .collect();
            return RouteResponse::new(results, duration);
        }

        let mut feeds = response.into_contents();
        let Some(feed) = feeds.pop() else {
            return RouteResponse::new(
                vec![RouteResult::route_not_configured(self.id(), filter)],
                duration,
            );
        };

        let subscription = self
            .inner
            .subscriptions
            .register(filter.to_string(), sink, feed)
            .await;
        RouteResponse::new(
            vec![RouteResult::ok(self.id(), filter, subscription)],
            duration,
        )
    }

    /// Cancels a notification subscription; unknown ids are a no-op.
    pub async fn unsubscribe(&self, subscription_id: &str) {
        self.inner.subscriptions.unsubscribe(subscription_id).await;
    }
}

/// Assembles a router: driver bindings, child links, and per-capability
/// policy overrides are fixed at build time.
pub struct RouterBuilder {
    id: String,
    registry: RouteRegistry,
    bindings: CapabilityBindings,
    children: Vec<ChildLink>,
}

impl RouterBuilder {
    /// Binds a driver capability implementation under `driver_id` for the
    /// route patterns its configuration claims.
    pub fn bind<D, I>(mut self, driver_id: &str, patterns: I, driver: Arc<D>) -> Self
    where
        D: ?Sized + Send + Sync + 'static,
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let patterns: Vec<String> = patterns.into_iter().map(Into::into).collect();
        debug!(
            event = events::ROUTER_DRIVER_BOUND,
            component = COMPONENT,
            router_id = %self.id,
            driver_id,
            patterns = ?patterns,
            "driver bound"
        );
        self.bindings.bind(DriverBinding {
            id: driver_id.to_string(),
            patterns,
            driver,
        });
        self
    }

    /// Links a child router serving the given patterns. Order matters: the
    /// child list is an ordered fallback chain.
    pub fn child<I>(mut self, router: Router, patterns: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let patterns: Vec<String> = patterns.into_iter().map(Into::into).collect();
        debug!(
            event = events::ROUTER_CHILD_LINKED,
            component = COMPONENT,
            router_id = %self.id,
            child_id = %router.id(),
            patterns = ?patterns,
            "child router linked"
        );
        self.children.push(ChildLink { router, patterns });
        self
    }

    /// Overrides the fan-out policy of one capability.
    pub fn policy(mut self, capability: Capability, policy: FanOutPolicy) -> Self {
        self.registry.set_policy(capability, policy);
        self
    }

    pub fn build(self) -> Router {
        debug!(
            event = events::ROUTER_BUILD_OK,
            component = COMPONENT,
            router_id = %self.id,
            children = self.children.len(),
            "router assembled"
        );
        Router {
            inner: Arc::new(RouterInner {
                id: self.id,
                registry: self.registry,
                bindings: self.bindings,
                children: self.children,
                subscriptions: SubscriptionManager::new(),
            }),
        }
    }
}
