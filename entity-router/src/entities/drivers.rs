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

//! Driver capability contracts.
//!
//! One narrow trait per (entity kind × operation). Every method receives its
//! payload plus the correlation id of the external call and returns the
//! uniform response envelope; drivers report failure through the envelope,
//! never by panicking across the router boundary.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::dispatch::RouteResponse;
use crate::entities::entity::{
    DefinitionEntity, DefinitionMetadataEntity, Entity, MessageEntity, SourceMetadataEntity,
};
use crate::subscriptions::EntityConsumer;

/// Whether a write blocks until durably applied or returns once accepted.
/// Forwarded verbatim to drivers; the router never alters it.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum OperationMode {
    Sync,
    Async,
}

/// How a published entity was applied.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PublishResultKind {
    Created,
    Changed,
    Queued,
}

/// Per-entity publish outcome.
#[derive(Clone, Debug)]
pub struct PublishResult<E> {
    pub kind: PublishResultKind,
    pub entity: E,
}

impl<E> PublishResult<E> {
    pub fn new(kind: PublishResultKind, entity: E) -> Self {
        Self { kind, entity }
    }
}

/// Deletion target specification.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct DeleteRequest {
    pub uuid: String,
    pub timestamp: Option<u64>,
}

impl DeleteRequest {
    pub fn new(uuid: impl Into<String>) -> Self {
        Self {
            uuid: uuid.into(),
            timestamp: None,
        }
    }
}

/// Empty-content target specification.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct EmptyRequest {
    pub uuid: String,
}

impl EmptyRequest {
    pub fn new(uuid: impl Into<String>) -> Self {
        Self { uuid: uuid.into() }
    }
}

/// Expiration outcome per target.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DeleteResult {
    pub target: String,
    pub count: u64,
}

#[async_trait]
pub trait EntityReadDriver<E: Entity>: Send + Sync {
    async fn read(&self, uuids: &[String], request_id: &str) -> RouteResponse<E>;
}

#[async_trait]
pub trait EntitySubscribeDriver<E: Entity>: Send + Sync {
    async fn subscribe(&self, request_id: &str) -> RouteResponse<EntityConsumer<Vec<E>>>;
}

#[async_trait]
pub trait EntityPublishDriver<E: Entity>: Send + Sync {
    async fn publish(
        &self,
        entities: &[E],
        mode: OperationMode,
        request_id: &str,
    ) -> RouteResponse<PublishResult<E>>;
}

#[async_trait]
pub trait EntityDeleteDriver<E: Entity>: Send + Sync {
    async fn delete(
        &self,
        requests: &[DeleteRequest],
        mode: OperationMode,
        request_id: &str,
    ) -> RouteResponse<bool>;
}

#[async_trait]
pub trait EntityEmptyDriver<E: Entity>: Send + Sync {
    async fn empty(
        &self,
        requests: &[EmptyRequest],
        mode: OperationMode,
        request_id: &str,
    ) -> RouteResponse<bool>;
}

#[async_trait]
pub trait EntityExpireDriver<E: Entity>: Send + Sync {
    async fn expire(&self, requests: &[DeleteRequest], request_id: &str)
        -> RouteResponse<DeleteResult>;
}

#[async_trait]
pub trait EntityExpireUpdateDriver<E: Entity>: Send + Sync {
    async fn expire_by_update(
        &self,
        requests: &[DeleteRequest],
        request_id: &str,
    ) -> RouteResponse<DeleteResult>;
}

#[async_trait]
pub trait EntityExpireAccessDriver<E: Entity>: Send + Sync {
    async fn expire_by_access(
        &self,
        requests: &[DeleteRequest],
        request_id: &str,
    ) -> RouteResponse<DeleteResult>;
}

/// Resolved entry of a source-chain query: the queried uuid and one uuid
/// reachable along its parent chain.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SourceQueryResult {
    pub query: String,
    pub uuid: String,
}

#[async_trait]
pub trait SourceQueryDriver: Send + Sync {
    /// Resolves each queried uuid into the uuids along its parent chain,
    /// the queried uuid included.
    async fn query_uuid_chain(
        &self,
        uuids: &[String],
        request_id: &str,
    ) -> RouteResponse<SourceQueryResult>;
}

#[async_trait]
pub trait SourceMetadataQueryDriver: Send + Sync {
    async fn query_by_source(
        &self,
        source_uuids: &[String],
        request_id: &str,
    ) -> RouteResponse<SourceMetadataEntity>;
}

#[async_trait]
pub trait DefinitionQueryDriver: Send + Sync {
    async fn query_by_parent(
        &self,
        parent_uuids: &[String],
        request_id: &str,
    ) -> RouteResponse<DefinitionEntity>;
}

#[async_trait]
pub trait DefinitionMetadataQueryDriver: Send + Sync {
    async fn query_by_definition(
        &self,
        definition_uuids: &[String],
        request_id: &str,
    ) -> RouteResponse<DefinitionMetadataEntity>;
}

#[async_trait]
pub trait MessageQueryDriver: Send + Sync {
    async fn query_by_topic(
        &self,
        topics: &[String],
        request_id: &str,
    ) -> RouteResponse<MessageEntity>;
}

/// Outcome of a routed command run.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CommandResponse {
    pub command_id: String,
    pub status_code: u16,
    pub output: Vec<u8>,
}

#[async_trait]
pub trait CommandRunDriver: Send + Sync {
    async fn run(
        &self,
        command_id: &str,
        parameters: &[(String, String)],
        request_id: &str,
    ) -> RouteResponse<CommandResponse>;
}
