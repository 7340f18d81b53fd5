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

//! The generic entity-router contract.
//!
//! Every primitive has the same shape: resolve the capability's pattern in
//! the registry, resolve targets, build the driver-invocation and (recursive)
//! router-invocation closures, execute, then process any deferred options
//! best-effort. Per-family routers instantiate this once per entity kind and
//! compose higher-level operations from the same primitives.

use std::marker::PhantomData;

use futures::future::BoxFuture;
use futures::FutureExt;
use tracing::{debug, warn};

use crate::dispatch::executor;
use crate::dispatch::{OptionKind, RouteOption, RouteRequest, RouteResponse};
use crate::entities::drivers::{
    DeleteRequest, DeleteResult, EmptyRequest, EntityDeleteDriver, EntityEmptyDriver,
    EntityExpireAccessDriver, EntityExpireDriver, EntityExpireUpdateDriver, EntityPublishDriver,
    EntityReadDriver, EntitySubscribeDriver, OperationMode, PublishResult,
};
use crate::entities::entity::{Entity, RoutedEntity};
use crate::observability::events;
use crate::router::Router;
use crate::routing::{Capability, DriverTarget, Operation, RouterTarget};
use crate::subscriptions::EntityConsumer;

const COMPONENT: &str = "entity_router";

pub(crate) mod op {
    pub const READ: &str = "Read";
    pub const SUBSCRIBE: &str = "Subscribe";
    pub const PUBLISH: &str = "Publish";
    pub const DELETE: &str = "Delete";
    pub const EMPTY: &str = "Empty";
    pub const EXPIRE: &str = "Expire";
    pub const EXPIRE_ACCESS: &str = "Expire-Access";
    pub const EXPIRE_UPDATE: &str = "Expire-Update";
}

fn entity_key<E: Entity>(entity: &E) -> &str {
    entity.uuid()
}

/// Routes the primitive operations of one entity kind.
pub struct EntityRouter<E> {
    router: Router,
    marker: PhantomData<fn() -> E>,
}

impl<E> Clone for EntityRouter<E> {
    fn clone(&self) -> Self {
        Self {
            router: self.router.clone(),
            marker: PhantomData,
        }
    }
}

impl<E: RoutedEntity> EntityRouter<E> {
    pub(crate) fn new(router: Router) -> Self {
        Self {
            router,
            marker: PhantomData,
        }
    }

    /// Reads entities by uuid set.
    pub async fn read(&self, uuids: Vec<String>, request_id: Option<String>) -> RouteResponse<E> {
        self.clone().read_boxed(uuids, request_id).await
    }

    pub(crate) fn read_boxed(
        self,
        uuids: Vec<String>,
        request_id: Option<String>,
    ) -> BoxFuture<'static, RouteResponse<E>> {
        async move {
            let request = RouteRequest::new(op::READ, request_id, uuids.clone());
            let binding = self
                .router
                .registry()
                .resolve(Capability::new(E::FAMILY, Operation::Read));
            let targets = self
                .router
                .resolve_targets::<dyn EntityReadDriver<E>>(binding.pattern);

            let driver_fn = {
                let uuids = uuids.clone();
                let id = request.id.clone();
                move |target: DriverTarget<dyn EntityReadDriver<E>>| {
                    let uuids = uuids.clone();
                    let id = id.clone();
                    async move { target.driver.read(&uuids, &id).await }
                }
            };
            let router_fn = {
                let uuids = uuids;
                let id = request.id.clone();
                move |target: RouterTarget| {
                    target
                        .router
                        .entities::<E>()
                        .read_boxed(uuids.clone(), Some(id.clone()))
                }
            };

            let mut response = executor::run(
                self.router.id(),
                &request,
                binding.policy,
                targets,
                Some(entity_key::<E> as fn(&E) -> &str),
                driver_fn,
                router_fn,
            )
            .await;

            let options = std::mem::take(&mut response.options);
            self.process_options(&request.id, options).await;
            response
        }
        .boxed()
    }

    /// Opens a feed of entity batches from every target able to supply one.
    pub async fn subscribe(
        &self,
        request_id: Option<String>,
    ) -> RouteResponse<EntityConsumer<Vec<E>>> {
        self.clone().subscribe_boxed(request_id).await
    }

    pub(crate) fn subscribe_boxed(
        self,
        request_id: Option<String>,
    ) -> BoxFuture<'static, RouteResponse<EntityConsumer<Vec<E>>>> {
        async move {
            let request = RouteRequest::new(op::SUBSCRIBE, request_id, Vec::new());
            let binding = self
                .router
                .registry()
                .resolve(Capability::new(E::FAMILY, Operation::Subscribe));
            let targets = self
                .router
                .resolve_targets::<dyn EntitySubscribeDriver<E>>(binding.pattern);

            let driver_fn = {
                let id = request.id.clone();
                move |target: DriverTarget<dyn EntitySubscribeDriver<E>>| {
                    let id = id.clone();
                    async move { target.driver.subscribe(&id).await }
                }
            };
            let router_fn = {
                let id = request.id.clone();
                move |target: RouterTarget| {
                    target
                        .router
                        .entities::<E>()
                        .subscribe_boxed(Some(id.clone()))
                }
            };

            executor::subscribe(self.router.id(), &request, targets, driver_fn, router_fn).await
        }
        .boxed()
    }

    /// Publishes entities, de-duplicated by uuid. The operation mode is
    /// forwarded to drivers unchanged.
    pub async fn publish(
        &self,
        entities: Vec<E>,
        mode: OperationMode,
        request_id: Option<String>,
    ) -> RouteResponse<PublishResult<E>> {
        self.clone().publish_boxed(entities, mode, request_id).await
    }

    pub(crate) fn publish_boxed(
        self,
        entities: Vec<E>,
        mode: OperationMode,
        request_id: Option<String>,
    ) -> BoxFuture<'static, RouteResponse<PublishResult<E>>> {
        async move {
            let mut entities = entities;
            let mut seen = std::collections::HashSet::new();
            entities.retain(|entity| seen.insert(entity.uuid().to_string()));

            let queries: Vec<String> = entities.iter().map(|e| e.uuid().to_string()).collect();
            let request = RouteRequest::new(op::PUBLISH, request_id, queries);
            let binding = self
                .router
                .registry()
                .resolve(Capability::new(E::FAMILY, Operation::Publish));
            let targets = self
                .router
                .resolve_targets::<dyn EntityPublishDriver<E>>(binding.pattern);

            let driver_fn = {
                let entities = entities.clone();
                let id = request.id.clone();
                move |target: DriverTarget<dyn EntityPublishDriver<E>>| {
                    let entities = entities.clone();
                    let id = id.clone();
                    async move { target.driver.publish(&entities, mode, &id).await }
                }
            };
            let router_fn = {
                let entities = entities;
                let id = request.id.clone();
                move |target: RouterTarget| {
                    target.router.entities::<E>().publish_boxed(
                        entities.clone(),
                        mode,
                        Some(id.clone()),
                    )
                }
            };

            let mut response = executor::run(
                self.router.id(),
                &request,
                binding.policy,
                targets,
                None,
                driver_fn,
                router_fn,
            )
            .await;

            let options = std::mem::take(&mut response.options);
            let options = options
                .into_iter()
                .map(|option| option.map(|result| result.entity))
                .collect();
            self.process_options(&request.id, options).await;
            response
        }
        .boxed()
    }

    /// Deletes entities by request set. The operation mode is forwarded to
    /// drivers unchanged.
    pub async fn delete(
        &self,
        requests: Vec<DeleteRequest>,
        mode: OperationMode,
        request_id: Option<String>,
    ) -> RouteResponse<bool> {
        self.clone().delete_boxed(requests, mode, request_id).await
    }

    pub(crate) fn delete_boxed(
        self,
        requests: Vec<DeleteRequest>,
        mode: OperationMode,
        request_id: Option<String>,
    ) -> BoxFuture<'static, RouteResponse<bool>> {
        async move {
            let queries: Vec<String> = requests.iter().map(|r| r.uuid.clone()).collect();
            let request = RouteRequest::new(op::DELETE, request_id, queries);
            let binding = self
                .router
                .registry()
                .resolve(Capability::new(E::FAMILY, Operation::Delete));
            let targets = self
                .router
                .resolve_targets::<dyn EntityDeleteDriver<E>>(binding.pattern);

            let driver_fn = {
                let requests = requests.clone();
                let id = request.id.clone();
                move |target: DriverTarget<dyn EntityDeleteDriver<E>>| {
                    let requests = requests.clone();
                    let id = id.clone();
                    async move { target.driver.delete(&requests, mode, &id).await }
                }
            };
            let router_fn = {
                let requests = requests;
                let id = request.id.clone();
                move |target: RouterTarget| {
                    target.router.entities::<E>().delete_boxed(
                        requests.clone(),
                        mode,
                        Some(id.clone()),
                    )
                }
            };

            executor::run(
                self.router.id(),
                &request,
                binding.policy,
                targets,
                None,
                driver_fn,
                router_fn,
            )
            .await
        }
        .boxed()
    }

    /// Empties entity content by request set.
    pub async fn empty(
        &self,
        requests: Vec<EmptyRequest>,
        mode: OperationMode,
        request_id: Option<String>,
    ) -> RouteResponse<bool> {
        self.clone().empty_boxed(requests, mode, request_id).await
    }

    pub(crate) fn empty_boxed(
        self,
        requests: Vec<EmptyRequest>,
        mode: OperationMode,
        request_id: Option<String>,
    ) -> BoxFuture<'static, RouteResponse<bool>> {
        async move {
            let queries: Vec<String> = requests.iter().map(|r| r.uuid.clone()).collect();
            let request = RouteRequest::new(op::EMPTY, request_id, queries);
            let binding = self
                .router
                .registry()
                .resolve(Capability::new(E::FAMILY, Operation::Empty));
            let targets = self
                .router
                .resolve_targets::<dyn EntityEmptyDriver<E>>(binding.pattern);

            let driver_fn = {
                let requests = requests.clone();
                let id = request.id.clone();
                move |target: DriverTarget<dyn EntityEmptyDriver<E>>| {
                    let requests = requests.clone();
                    let id = id.clone();
                    async move { target.driver.empty(&requests, mode, &id).await }
                }
            };
            let router_fn = {
                let requests = requests;
                let id = request.id.clone();
                move |target: RouterTarget| {
                    target.router.entities::<E>().empty_boxed(
                        requests.clone(),
                        mode,
                        Some(id.clone()),
                    )
                }
            };

            executor::run(
                self.router.id(),
                &request,
                binding.policy,
                targets,
                None,
                driver_fn,
                router_fn,
            )
            .await
        }
        .boxed()
    }

    /// Expires entities by request set.
    pub async fn expire(
        &self,
        requests: Vec<DeleteRequest>,
        request_id: Option<String>,
    ) -> RouteResponse<DeleteResult> {
        self.clone().expire_boxed(requests, request_id).await
    }

    pub(crate) fn expire_boxed(
        self,
        requests: Vec<DeleteRequest>,
        request_id: Option<String>,
    ) -> BoxFuture<'static, RouteResponse<DeleteResult>> {
        async move {
            let queries: Vec<String> = requests.iter().map(|r| r.uuid.clone()).collect();
            let request = RouteRequest::new(op::EXPIRE, request_id, queries);
            let binding = self
                .router
                .registry()
                .resolve(Capability::new(E::FAMILY, Operation::Expire));
            let targets = self
                .router
                .resolve_targets::<dyn EntityExpireDriver<E>>(binding.pattern);

            let driver_fn = {
                let requests = requests.clone();
                let id = request.id.clone();
                move |target: DriverTarget<dyn EntityExpireDriver<E>>| {
                    let requests = requests.clone();
                    let id = id.clone();
                    async move { target.driver.expire(&requests, &id).await }
                }
            };
            let router_fn = {
                let requests = requests;
                let id = request.id.clone();
                move |target: RouterTarget| {
                    target
                        .router
                        .entities::<E>()
                        .expire_boxed(requests.clone(), Some(id.clone()))
                }
            };

            executor::run(
                self.router.id(),
                &request,
                binding.policy,
                targets,
                None,
                driver_fn,
                router_fn,
            )
            .await
        }
        .boxed()
    }

    /// Expires entities not updated within their retention window.
    pub async fn expire_by_update(
        &self,
        requests: Vec<DeleteRequest>,
        request_id: Option<String>,
    ) -> RouteResponse<DeleteResult> {
        self.clone().expire_by_update_boxed(requests, request_id).await
    }

    pub(crate) fn expire_by_update_boxed(
        self,
        requests: Vec<DeleteRequest>,
        request_id: Option<String>,
    ) -> BoxFuture<'static, RouteResponse<DeleteResult>> {
        async move {
            let queries: Vec<String> = requests.iter().map(|r| r.uuid.clone()).collect();
            let request = RouteRequest::new(op::EXPIRE_UPDATE, request_id, queries);
            let binding = self
                .router
                .registry()
                .resolve(Capability::new(E::FAMILY, Operation::ExpireUpdate));
            let targets = self
                .router
                .resolve_targets::<dyn EntityExpireUpdateDriver<E>>(binding.pattern);

            let driver_fn = {
                let requests = requests.clone();
                let id = request.id.clone();
                move |target: DriverTarget<dyn EntityExpireUpdateDriver<E>>| {
                    let requests = requests.clone();
                    let id = id.clone();
                    async move { target.driver.expire_by_update(&requests, &id).await }
                }
            };
            let router_fn = {
                let requests = requests;
                let id = request.id.clone();
                move |target: RouterTarget| {
                    target
                        .router
                        .entities::<E>()
                        .expire_by_update_boxed(requests.clone(), Some(id.clone()))
                }
            };

            executor::run(
                self.router.id(),
                &request,
                binding.policy,
                targets,
                None,
                driver_fn,
                router_fn,
            )
            .await
        }
        .boxed()
    }

    /// Expires entities not accessed within their retention window.
    pub async fn expire_by_access(
        &self,
        requests: Vec<DeleteRequest>,
        request_id: Option<String>,
    ) -> RouteResponse<DeleteResult> {
        self.clone().expire_by_access_boxed(requests, request_id).await
    }

    pub(crate) fn expire_by_access_boxed(
        self,
        requests: Vec<DeleteRequest>,
        request_id: Option<String>,
    ) -> BoxFuture<'static, RouteResponse<DeleteResult>> {
        async move {
            let queries: Vec<String> = requests.iter().map(|r| r.uuid.clone()).collect();
            let request = RouteRequest::new(op::EXPIRE_ACCESS, request_id, queries);
            let binding = self
                .router
                .registry()
                .resolve(Capability::new(E::FAMILY, Operation::ExpireAccess));
            let targets = self
                .router
                .resolve_targets::<dyn EntityExpireAccessDriver<E>>(binding.pattern);

            let driver_fn = {
                let requests = requests.clone();
                let id = request.id.clone();
                move |target: DriverTarget<dyn EntityExpireAccessDriver<E>>| {
                    let requests = requests.clone();
                    let id = id.clone();
                    async move { target.driver.expire_by_access(&requests, &id).await }
                }
            };
            let router_fn = {
                let requests = requests;
                let id = request.id.clone();
                move |target: RouterTarget| {
                    target
                        .router
                        .entities::<E>()
                        .expire_by_access_boxed(requests.clone(), Some(id.clone()))
                }
            };

            executor::run(
                self.router.id(),
                &request,
                binding.policy,
                targets,
                None,
                driver_fn,
                router_fn,
            )
            .await
        }
        .boxed()
    }

    /// Processes deferred options attached by drivers or child routers.
    ///
    /// Fire-and-forget obligations: a failure here is logged and never flips
    /// an otherwise-successful response to failed.
    async fn process_options(&self, request_id: &str, options: Vec<RouteOption<E>>) {
        if options.is_empty() {
            return;
        }

        let mut publishes: Vec<E> = Vec::new();
        let mut empties: Vec<EmptyRequest> = Vec::new();
        for option in options {
            match option.kind {
                OptionKind::Publish => {
                    if let Some(entity) = option.argument {
                        publishes.push(entity);
                    }
                }
                OptionKind::Empty => {
                    if !option.request.is_empty() {
                        empties.push(EmptyRequest::new(&option.request));
                    }
                }
            }
        }

        if !publishes.is_empty() {
            debug!(
                event = events::OPTION_PROCESS_START,
                component = COMPONENT,
                correlation_id = %request_id,
                kind = "publish",
                count = publishes.len(),
                "processing deferred publish options"
            );
            let response = self
                .clone()
                .publish_boxed(
                    publishes,
                    OperationMode::Async,
                    Some(request_id.to_string()),
                )
                .await;
            if !response.success() {
                warn!(
                    event = events::OPTION_PROCESS_FAILED,
                    component = COMPONENT,
                    correlation_id = %request_id,
                    kind = "publish",
                    "deferred publish failed"
                );
            }
        }

        // Drivers may attach Empty options for families that never declare
        // the capability; skip rather than trip the registry's fail-fast.
        if !empties.is_empty()
            && self
                .router
                .registry()
                .try_resolve(Capability::new(E::FAMILY, Operation::Empty))
                .is_none()
        {
            warn!(
                event = events::OPTION_PROCESS_FAILED,
                component = COMPONENT,
                correlation_id = %request_id,
                kind = "empty",
                "family declares no empty capability, options dropped"
            );
            empties.clear();
        }

        if !empties.is_empty() {
            debug!(
                event = events::OPTION_PROCESS_START,
                component = COMPONENT,
                correlation_id = %request_id,
                kind = "empty",
                count = empties.len(),
                "processing deferred empty options"
            );
            let response = self
                .clone()
                .empty_boxed(empties, OperationMode::Async, Some(request_id.to_string()))
                .await;
            if !response.success() {
                warn!(
                    event = events::OPTION_PROCESS_FAILED,
                    component = COMPONENT,
                    correlation_id = %request_id,
                    kind = "empty",
                    "deferred empty failed"
                );
            }
        }
    }
}
