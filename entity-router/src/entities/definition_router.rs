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

//! Definition-family router: the generic contract plus hierarchy queries.

use futures::future::BoxFuture;
use futures::FutureExt;

use crate::dispatch::executor;
use crate::dispatch::{RouteRequest, RouteResponse};
use crate::entities::drivers::{DefinitionMetadataQueryDriver, DefinitionQueryDriver};
use crate::entities::entity::{DefinitionEntity, DefinitionMetadataEntity};
use crate::entities::entity_router::EntityRouter;
use crate::router::Router;
use crate::routing::{Capability, DriverTarget, EntityFamily, Operation, RouterTarget};

const QUERY_BY_PARENT_OPERATION: &str = "Query-By-Parent";
const QUERY_BY_DEFINITION_OPERATION: &str = "Query-By-Definition";

fn definition_key(entity: &DefinitionEntity) -> &str {
    &entity.uuid
}

fn metadata_key(entity: &DefinitionMetadataEntity) -> &str {
    &entity.uuid
}

/// Routes definition entities and their hierarchy queries.
#[derive(Clone)]
pub struct DefinitionRouter {
    router: Router,
    entities: EntityRouter<DefinitionEntity>,
}

impl DefinitionRouter {
    pub(crate) fn new(router: Router) -> Self {
        let entities = EntityRouter::new(router.clone());
        Self { router, entities }
    }

    pub fn entities(&self) -> &EntityRouter<DefinitionEntity> {
        &self.entities
    }

    pub fn metadata(&self) -> DefinitionMetadataRouter {
        DefinitionMetadataRouter::new(self.router.clone())
    }

    /// Queries definitions by parent uuid.
    pub async fn query_by_parent(
        &self,
        parent_uuids: Vec<String>,
        request_id: Option<String>,
    ) -> RouteResponse<DefinitionEntity> {
        self.clone()
            .query_by_parent_boxed(parent_uuids, request_id)
            .await
    }

    fn query_by_parent_boxed(
        self,
        parent_uuids: Vec<String>,
        request_id: Option<String>,
    ) -> BoxFuture<'static, RouteResponse<DefinitionEntity>> {
        async move {
            let request =
                RouteRequest::new(QUERY_BY_PARENT_OPERATION, request_id, parent_uuids.clone());
            let binding = self
                .router
                .registry()
                .resolve(Capability::new(EntityFamily::Definitions, Operation::Query));
            let targets = self
                .router
                .resolve_targets::<dyn DefinitionQueryDriver>(binding.pattern);

            let driver_fn = {
                let parent_uuids = parent_uuids.clone();
                let id = request.id.clone();
                move |target: DriverTarget<dyn DefinitionQueryDriver>| {
                    let parent_uuids = parent_uuids.clone();
                    let id = id.clone();
                    async move { target.driver.query_by_parent(&parent_uuids, &id).await }
                }
            };
            let router_fn = {
                let parent_uuids = parent_uuids;
                let id = request.id.clone();
                move |target: RouterTarget| {
                    target
                        .router
                        .definitions()
                        .query_by_parent_boxed(parent_uuids.clone(), Some(id.clone()))
                }
            };

            executor::run(
                self.router.id(),
                &request,
                binding.policy,
                targets,
                Some(definition_key as fn(&DefinitionEntity) -> &str),
                driver_fn,
                router_fn,
            )
            .await
        }
        .boxed()
    }
}

/// Routes definition metadata sub-entities.
#[derive(Clone)]
pub struct DefinitionMetadataRouter {
    router: Router,
    entities: EntityRouter<DefinitionMetadataEntity>,
}

impl DefinitionMetadataRouter {
    pub(crate) fn new(router: Router) -> Self {
        let entities = EntityRouter::new(router.clone());
        Self { router, entities }
    }

    pub fn entities(&self) -> &EntityRouter<DefinitionMetadataEntity> {
        &self.entities
    }

    /// Queries metadata entities by owning definition uuid.
    pub async fn query_by_definition(
        &self,
        definition_uuids: Vec<String>,
        request_id: Option<String>,
    ) -> RouteResponse<DefinitionMetadataEntity> {
        self.clone()
            .query_by_definition_boxed(definition_uuids, request_id)
            .await
    }

    fn query_by_definition_boxed(
        self,
        definition_uuids: Vec<String>,
        request_id: Option<String>,
    ) -> BoxFuture<'static, RouteResponse<DefinitionMetadataEntity>> {
        async move {
            let request = RouteRequest::new(
                QUERY_BY_DEFINITION_OPERATION,
                request_id,
                definition_uuids.clone(),
            );
            let binding = self.router.registry().resolve(Capability::new(
                EntityFamily::DefinitionMetadata,
                Operation::Query,
            ));
            let targets = self
                .router
                .resolve_targets::<dyn DefinitionMetadataQueryDriver>(binding.pattern);

            let driver_fn = {
                let definition_uuids = definition_uuids.clone();
                let id = request.id.clone();
                move |target: DriverTarget<dyn DefinitionMetadataQueryDriver>| {
                    let definition_uuids = definition_uuids.clone();
                    let id = id.clone();
                    async move {
                        target
                            .driver
                            .query_by_definition(&definition_uuids, &id)
                            .await
                    }
                }
            };
            let router_fn = {
                let definition_uuids = definition_uuids;
                let id = request.id.clone();
                move |target: RouterTarget| {
                    target
                        .router
                        .definitions()
                        .metadata()
                        .query_by_definition_boxed(definition_uuids.clone(), Some(id.clone()))
                }
            };

            executor::run(
                self.router.id(),
                &request,
                binding.policy,
                targets,
                Some(metadata_key as fn(&DefinitionMetadataEntity) -> &str),
                driver_fn,
                router_fn,
            )
            .await
        }
        .boxed()
    }
}
