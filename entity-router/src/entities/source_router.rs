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

//! Source-family router: the generic contract plus the uuid-chain query and
//! its chain-read composite.

use std::time::Instant;

use futures::future::BoxFuture;
use futures::FutureExt;

use crate::dispatch::executor;
use crate::dispatch::{RouteRequest, RouteResponse, RouteResult};
use crate::entities::drivers::{
    SourceMetadataQueryDriver, SourceQueryDriver, SourceQueryResult,
};
use crate::entities::entity::{SourceEntity, SourceMetadataEntity};
use crate::entities::entity_router::EntityRouter;
use crate::router::Router;
use crate::routing::{Capability, DriverTarget, EntityFamily, Operation, RouterTarget};

const QUERY_CHAIN_OPERATION: &str = "Query-Uuid-Chain";
const READ_CHAIN_OPERATION: &str = "Read-Chain";
const QUERY_BY_SOURCE_OPERATION: &str = "Query-By-Source";

fn query_result_key(result: &SourceQueryResult) -> &str {
    &result.uuid
}

fn metadata_key(entity: &SourceMetadataEntity) -> &str {
    &entity.uuid
}

/// Routes source entities and their composite queries.
#[derive(Clone)]
pub struct SourceRouter {
    router: Router,
    entities: EntityRouter<SourceEntity>,
}

impl SourceRouter {
    pub(crate) fn new(router: Router) -> Self {
        let entities = EntityRouter::new(router.clone());
        Self { router, entities }
    }

    /// The generic primitives for source entities.
    pub fn entities(&self) -> &EntityRouter<SourceEntity> {
        &self.entities
    }

    /// Router for source metadata sub-entities.
    pub fn metadata(&self) -> SourceMetadataRouter {
        SourceMetadataRouter::new(self.router.clone())
    }

    /// Resolves each queried uuid into the uuid set along its parent chain.
    pub async fn query_uuid_chain(
        &self,
        uuids: Vec<String>,
        request_id: Option<String>,
    ) -> RouteResponse<SourceQueryResult> {
        self.clone().query_uuid_chain_boxed(uuids, request_id).await
    }

    fn query_uuid_chain_boxed(
        self,
        uuids: Vec<String>,
        request_id: Option<String>,
    ) -> BoxFuture<'static, RouteResponse<SourceQueryResult>> {
        async move {
            let request = RouteRequest::new(QUERY_CHAIN_OPERATION, request_id, uuids.clone());
            let binding = self
                .router
                .registry()
                .resolve(Capability::new(EntityFamily::Sources, Operation::Query));
            let targets = self
                .router
                .resolve_targets::<dyn SourceQueryDriver>(binding.pattern);

            let driver_fn = {
                let uuids = uuids.clone();
                let id = request.id.clone();
                move |target: DriverTarget<dyn SourceQueryDriver>| {
                    let uuids = uuids.clone();
                    let id = id.clone();
                    async move { target.driver.query_uuid_chain(&uuids, &id).await }
                }
            };
            let router_fn = {
                let uuids = uuids;
                let id = request.id.clone();
                move |target: RouterTarget| {
                    target
                        .router
                        .sources()
                        .query_uuid_chain_boxed(uuids.clone(), Some(id.clone()))
                }
            };

            executor::run(
                self.router.id(),
                &request,
                binding.policy,
                targets,
                Some(query_result_key as fn(&SourceQueryResult) -> &str),
                driver_fn,
                router_fn,
            )
            .await
        }
        .boxed()
    }

    /// Composite: resolve the uuid chain, then batch-read the resolved set.
    ///
    /// One correlation id and one stopwatch span the whole composite; the
    /// inner calls keep their own durations for diagnostics.
    pub async fn read_chain(
        &self,
        uuids: Vec<String>,
        request_id: Option<String>,
    ) -> RouteResponse<SourceEntity> {
        let started = Instant::now();
        let request = RouteRequest::new(READ_CHAIN_OPERATION, request_id, uuids.clone());

        let chain = self
            .query_uuid_chain(uuids, Some(request.id.clone()))
            .await;
        if !chain.success() {
            let results = chain
                .results
                .into_iter()
                .map(RouteResult::recast)
                .collect();
            return RouteResponse::new(results, started.elapsed());
        }

        let mut chain_uuids: Vec<String> = Vec::new();
        for result in chain.contents() {
            if !chain_uuids.contains(&result.uuid) {
                chain_uuids.push(result.uuid.clone());
            }
        }

        let read = self
            .entities
            .read(chain_uuids, Some(request.id.clone()))
            .await;
        RouteResponse::new(read.results, started.elapsed())
    }
}

/// Routes source metadata sub-entities.
#[derive(Clone)]
pub struct SourceMetadataRouter {
    router: Router,
    entities: EntityRouter<SourceMetadataEntity>,
}

impl SourceMetadataRouter {
    pub(crate) fn new(router: Router) -> Self {
        let entities = EntityRouter::new(router.clone());
        Self { router, entities }
    }

    pub fn entities(&self) -> &EntityRouter<SourceMetadataEntity> {
        &self.entities
    }

    /// Queries metadata entities by owning source uuid.
    pub async fn query_by_source(
        &self,
        source_uuids: Vec<String>,
        request_id: Option<String>,
    ) -> RouteResponse<SourceMetadataEntity> {
        self.clone()
            .query_by_source_boxed(source_uuids, request_id)
            .await
    }

    fn query_by_source_boxed(
        self,
        source_uuids: Vec<String>,
        request_id: Option<String>,
    ) -> BoxFuture<'static, RouteResponse<SourceMetadataEntity>> {
        async move {
            let request =
                RouteRequest::new(QUERY_BY_SOURCE_OPERATION, request_id, source_uuids.clone());
            let binding = self
                .router
                .registry()
                .resolve(Capability::new(EntityFamily::SourceMetadata, Operation::Query));
            let targets = self
                .router
                .resolve_targets::<dyn SourceMetadataQueryDriver>(binding.pattern);

            let driver_fn = {
                let source_uuids = source_uuids.clone();
                let id = request.id.clone();
                move |target: DriverTarget<dyn SourceMetadataQueryDriver>| {
                    let source_uuids = source_uuids.clone();
                    let id = id.clone();
                    async move { target.driver.query_by_source(&source_uuids, &id).await }
                }
            };
            let router_fn = {
                let source_uuids = source_uuids;
                let id = request.id.clone();
                move |target: RouterTarget| {
                    target
                        .router
                        .sources()
                        .metadata()
                        .query_by_source_boxed(source_uuids.clone(), Some(id.clone()))
                }
            };

            executor::run(
                self.router.id(),
                &request,
                binding.policy,
                targets,
                Some(metadata_key as fn(&SourceMetadataEntity) -> &str),
                driver_fn,
                router_fn,
            )
            .await
        }
        .boxed()
    }
}
