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

//! Message-family router: broker messages addressed by topic.

use futures::future::BoxFuture;
use futures::FutureExt;

use crate::dispatch::executor;
use crate::dispatch::{RouteRequest, RouteResponse};
use crate::entities::drivers::MessageQueryDriver;
use crate::entities::entity::MessageEntity;
use crate::entities::entity_router::EntityRouter;
use crate::router::Router;
use crate::routing::{Capability, DriverTarget, EntityFamily, Operation, RouterTarget};

const QUERY_BY_TOPIC_OPERATION: &str = "Query-By-Topic";

fn message_key(entity: &MessageEntity) -> &str {
    &entity.uuid
}

/// Routes broker messages.
#[derive(Clone)]
pub struct MessageRouter {
    router: Router,
    entities: EntityRouter<MessageEntity>,
}

impl MessageRouter {
    pub(crate) fn new(router: Router) -> Self {
        let entities = EntityRouter::new(router.clone());
        Self { router, entities }
    }

    pub fn entities(&self) -> &EntityRouter<MessageEntity> {
        &self.entities
    }

    /// Queries retained messages by topic.
    pub async fn query_by_topic(
        &self,
        topics: Vec<String>,
        request_id: Option<String>,
    ) -> RouteResponse<MessageEntity> {
        self.clone().query_by_topic_boxed(topics, request_id).await
    }

    fn query_by_topic_boxed(
        self,
        topics: Vec<String>,
        request_id: Option<String>,
    ) -> BoxFuture<'static, RouteResponse<MessageEntity>> {
        async move {
            let request = RouteRequest::new(QUERY_BY_TOPIC_OPERATION, request_id, topics.clone());
            let binding = self
                .router
                .registry()
                .resolve(Capability::new(EntityFamily::Messages, Operation::Query));
            let targets = self
                .router
                .resolve_targets::<dyn MessageQueryDriver>(binding.pattern);

            let driver_fn = {
                let topics = topics.clone();
                let id = request.id.clone();
                move |target: DriverTarget<dyn MessageQueryDriver>| {
                    let topics = topics.clone();
                    let id = id.clone();
                    async move { target.driver.query_by_topic(&topics, &id).await }
                }
            };
            let router_fn = {
                let topics = topics;
                let id = request.id.clone();
                move |target: RouterTarget| {
                    target
                        .router
                        .messages()
                        .query_by_topic_boxed(topics.clone(), Some(id.clone()))
                }
            };

            executor::run(
                self.router.id(),
                &request,
                binding.policy,
                targets,
                Some(message_key as fn(&MessageEntity) -> &str),
                driver_fn,
                router_fn,
            )
            .await
        }
        .boxed()
    }
}
