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

use std::time::{Duration, Instant};

use async_trait::async_trait;

use entity_router::entities::{
    CommandResponse, CommandRunDriver, EntityPublishDriver, EntityReadDriver, OperationMode,
    PublishResult,
};
use entity_router::{RouteResponse, RouteResult, SourceEntity};

/// Publish driver that rejects every entity.
pub struct RejectingPublishDriver {
    id: String,
}

impl RejectingPublishDriver {
    pub fn new(id: &str) -> Self {
        Self { id: id.to_string() }
    }
}

#[async_trait]
impl EntityPublishDriver<SourceEntity> for RejectingPublishDriver {
    async fn publish(
        &self,
        entities: &[SourceEntity],
        _mode: OperationMode,
        _request_id: &str,
    ) -> RouteResponse<PublishResult<SourceEntity>> {
        let started = Instant::now();
        let results = entities
            .iter()
            .map(|entity| RouteResult::internal_error(&self.id, &entity.uuid, "write rejected"))
            .collect();
        RouteResponse::new(results, started.elapsed())
    }
}

/// Read driver that fails every uuid.
pub struct FailingReadDriver {
    id: String,
}

impl FailingReadDriver {
    pub fn new(id: &str) -> Self {
        Self { id: id.to_string() }
    }
}

#[async_trait]
impl EntityReadDriver<SourceEntity> for FailingReadDriver {
    async fn read(&self, uuids: &[String], _request_id: &str) -> RouteResponse<SourceEntity> {
        let started = Instant::now();
        let results = uuids
            .iter()
            .map(|uuid| RouteResult::internal_error(&self.id, uuid, "backend unavailable"))
            .collect();
        RouteResponse::new(results, started.elapsed())
    }
}

/// Read driver that sleeps before answering, for duration assertions.
pub struct SlowReadDriver {
    id: String,
    delay: Duration,
    entities: Vec<SourceEntity>,
}

impl SlowReadDriver {
    pub fn new(id: &str, delay: Duration, entities: Vec<SourceEntity>) -> Self {
        Self {
            id: id.to_string(),
            delay,
            entities,
        }
    }
}

#[async_trait]
impl EntityReadDriver<SourceEntity> for SlowReadDriver {
    async fn read(&self, uuids: &[String], _request_id: &str) -> RouteResponse<SourceEntity> {
        let started = Instant::now();
        tokio::time::sleep(self.delay).await;
        let results = uuids
            .iter()
            .map(|uuid| {
                match self.entities.iter().find(|entity| &entity.uuid == uuid) {
                    Some(entity) => RouteResult::ok(&self.id, uuid, entity.clone()),
                    None => RouteResult::not_found(&self.id, uuid),
                }
            })
            .collect();
        RouteResponse::new(results, started.elapsed())
    }
}

/// Command driver that echoes its parameters back.
pub struct EchoCommandDriver {
    id: String,
}

impl EchoCommandDriver {
    pub fn new(id: &str) -> Self {
        Self { id: id.to_string() }
    }
}

#[async_trait]
impl CommandRunDriver for EchoCommandDriver {
    async fn run(
        &self,
        command_id: &str,
        parameters: &[(String, String)],
        _request_id: &str,
    ) -> RouteResponse<CommandResponse> {
        let started = Instant::now();
        let output = parameters
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join("\n")
            .into_bytes();
        let response = CommandResponse {
            command_id: command_id.to_string(),
            status_code: 200,
            output,
        };
        RouteResponse::new(
            vec![RouteResult::ok(&self.id, command_id, response)],
            started.elapsed(),
        )
    }
}
