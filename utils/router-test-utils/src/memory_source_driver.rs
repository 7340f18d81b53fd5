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

use std::collections::HashMap;
use std::time::Instant;

use async_trait::async_trait;
use tokio::sync::Mutex;

use entity_router::entities::{
    DeleteRequest, DeleteResult, EntityDeleteDriver, EntityExpireDriver, EntityPublishDriver,
    EntityReadDriver, OperationMode, PublishResult, PublishResultKind, SourceQueryDriver,
    SourceQueryResult,
};
use entity_router::{RouteResponse, RouteResult, SourceEntity};

/// In-memory source store implementing the read, publish, delete, expire,
/// and uuid-chain query capabilities. Records every correlation id it is
/// invoked with so tests can assert propagation.
pub struct MemorySourceDriver {
    id: String,
    sources: Mutex<HashMap<String, SourceEntity>>,
    request_ids: Mutex<Vec<String>>,
}

impl MemorySourceDriver {
    pub fn new(id: &str) -> Self {
        Self::with_sources(id, Vec::new())
    }

    pub fn with_sources(id: &str, sources: Vec<SourceEntity>) -> Self {
        let sources = sources
            .into_iter()
            .map(|entity| (entity.uuid.clone(), entity))
            .collect();
        Self {
            id: id.to_string(),
            sources: Mutex::new(sources),
            request_ids: Mutex::new(Vec::new()),
        }
    }

    pub async fn contains(&self, uuid: &str) -> bool {
        self.sources.lock().await.contains_key(uuid)
    }

    /// Correlation ids seen by this driver, in invocation order.
    pub async fn recorded_request_ids(&self) -> Vec<String> {
        self.request_ids.lock().await.clone()
    }

    async fn record(&self, request_id: &str) {
        self.request_ids.lock().await.push(request_id.to_string());
    }
}

#[async_trait]
impl EntityReadDriver<SourceEntity> for MemorySourceDriver {
    async fn read(&self, uuids: &[String], request_id: &str) -> RouteResponse<SourceEntity> {
        let started = Instant::now();
        self.record(request_id).await;

        let sources = self.sources.lock().await;
        let results = uuids
            .iter()
            .map(|uuid| match sources.get(uuid) {
                Some(entity) => RouteResult::ok(&self.id, uuid, entity.clone()),
                None => RouteResult::not_found(&self.id, uuid),
            })
            .collect();
        RouteResponse::new(results, started.elapsed())
    }
}

#[async_trait]
impl EntityPublishDriver<SourceEntity> for MemorySourceDriver {
    async fn publish(
        &self,
        entities: &[SourceEntity],
        mode: OperationMode,
        request_id: &str,
    ) -> RouteResponse<PublishResult<SourceEntity>> {
        let started = Instant::now();
        self.record(request_id).await;

        let kind = match mode {
            OperationMode::Sync => PublishResultKind::Created,
            OperationMode::Async => PublishResultKind::Queued,
        };

        let mut sources = self.sources.lock().await;
        let results = entities
            .iter()
            .map(|entity| {
                sources.insert(entity.uuid.clone(), entity.clone());
                RouteResult::ok(
                    &self.id,
                    &entity.uuid,
                    PublishResult::new(kind, entity.clone()),
                )
            })
            .collect();
        RouteResponse::new(results, started.elapsed())
    }
}

#[async_trait]
impl EntityDeleteDriver<SourceEntity> for MemorySourceDriver {
    async fn delete(
        &self,
        requests: &[DeleteRequest],
        _mode: OperationMode,
        request_id: &str,
    ) -> RouteResponse<bool> {
        let started = Instant::now();
        self.record(request_id).await;

        let mut sources = self.sources.lock().await;
        let results = requests
            .iter()
            .map(|request| match sources.remove(&request.uuid) {
                Some(_) => RouteResult::ok(&self.id, &request.uuid, true),
                None => RouteResult::not_found(&self.id, &request.uuid),
            })
            .collect();
        RouteResponse::new(results, started.elapsed())
    }
}

#[async_trait]
impl EntityExpireDriver<SourceEntity> for MemorySourceDriver {
    async fn expire(
        &self,
        requests: &[DeleteRequest],
        request_id: &str,
    ) -> RouteResponse<DeleteResult> {
        let started = Instant::now();
        self.record(request_id).await;

        let mut sources = self.sources.lock().await;
        let results = requests
            .iter()
            .map(|request| {
                let count = u64::from(sources.remove(&request.uuid).is_some());
                RouteResult::ok(
                    &self.id,
                    &request.uuid,
                    DeleteResult {
                        target: request.uuid.clone(),
                        count,
                    },
                )
            })
            .collect();
        RouteResponse::new(results, started.elapsed())
    }
}

#[async_trait]
impl SourceQueryDriver for MemorySourceDriver {
    async fn query_uuid_chain(
        &self,
        uuids: &[String],
        request_id: &str,
    ) -> RouteResponse<SourceQueryResult> {
        let started = Instant::now();
        self.record(request_id).await;

        let sources = self.sources.lock().await;
        let mut results = Vec::new();
        for uuid in uuids {
            let mut current = sources.get(uuid);
            if current.is_none() {
                results.push(RouteResult::not_found(&self.id, uuid));
                continue;
            }
            while let Some(entity) = current {
                results.push(RouteResult::ok(
                    &self.id,
                    uuid,
                    SourceQueryResult {
                        query: uuid.clone(),
                        uuid: entity.uuid.clone(),
                    },
                ));
                current = entity
                    .parent_uuid
                    .as_ref()
                    .and_then(|parent| sources.get(parent));
            }
        }
        RouteResponse::new(results, started.elapsed())
    }
}
