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

use entity_router::entities::{DefinitionQueryDriver, EntityReadDriver};
use entity_router::{DefinitionEntity, RouteResponse, RouteResult};

/// In-memory definition store implementing read and query-by-parent.
pub struct MemoryDefinitionDriver {
    id: String,
    definitions: Mutex<HashMap<String, DefinitionEntity>>,
}

impl MemoryDefinitionDriver {
    pub fn with_definitions(id: &str, definitions: Vec<DefinitionEntity>) -> Self {
        let definitions = definitions
            .into_iter()
            .map(|entity| (entity.uuid.clone(), entity))
            .collect();
        Self {
            id: id.to_string(),
            definitions: Mutex::new(definitions),
        }
    }
}

#[async_trait]
impl EntityReadDriver<DefinitionEntity> for MemoryDefinitionDriver {
    async fn read(&self, uuids: &[String], _request_id: &str) -> RouteResponse<DefinitionEntity> {
        let started = Instant::now();
        let definitions = self.definitions.lock().await;
        let results = uuids
            .iter()
            .map(|uuid| match definitions.get(uuid) {
                Some(entity) => RouteResult::ok(&self.id, uuid, entity.clone()),
                None => RouteResult::not_found(&self.id, uuid),
            })
            .collect();
        RouteResponse::new(results, started.elapsed())
    }
}

#[async_trait]
impl DefinitionQueryDriver for MemoryDefinitionDriver {
    async fn query_by_parent(
        &self,
        parent_uuids: &[String],
        _request_id: &str,
    ) -> RouteResponse<DefinitionEntity> {
        let started = Instant::now();
        let definitions = self.definitions.lock().await;
        let mut results = Vec::new();
        for parent_uuid in parent_uuids {
            let mut found = false;
            for entity in definitions.values() {
                if entity.parent_uuid.as_deref() == Some(parent_uuid) {
                    results.push(RouteResult::ok(&self.id, parent_uuid, entity.clone()));
                    found = true;
                }
            }
            if !found {
                results.push(RouteResult::not_found(&self.id, parent_uuid));
            }
        }
        RouteResponse::new(results, started.elapsed())
    }
}
