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

//! # entity-router
//!
//! `entity-router` is the routing and dispatch fabric of a distributed entity
//! platform: given a logical operation (read, query, subscribe, publish,
//! delete, expire) against a typed entity or blob, it locates the right
//! executor — a locally registered driver or, failing that, a child router to
//! which the same operation is recursively delegated — invokes it, aggregates
//! the outcome, and reports timing and partial-failure information uniformly
//! through one response envelope.
//!
//! Typical usage is API-first and centered on [`Router`]: bind driver
//! capability implementations, link child routers, then address operations
//! through the per-family routers.
//!
//! ```
//! use std::sync::Arc;
//! use entity_router::{Router, RouteResponse, SourceEntity};
//! use entity_router::entities::EntityReadDriver;
//!
//! # pub mod memory_driver {
//! #     use std::time::Instant;
//! #     use async_trait::async_trait;
//! #     use entity_router::entities::EntityReadDriver;
//! #     use entity_router::{RouteResponse, RouteResult, SourceEntity};
//! #
//! #     pub struct MemoryReadDriver;
//! #
//! #     #[async_trait]
//! #     impl EntityReadDriver<SourceEntity> for MemoryReadDriver {
//! #         async fn read(&self, uuids: &[String], _request_id: &str) -> RouteResponse<SourceEntity> {
//! #             let started = Instant::now();
//! #             let results = uuids
//! #                 .iter()
//! #                 .map(|uuid| {
//! #                     RouteResult::ok(
//! #                         "memory",
//! #                         uuid,
//! #                         SourceEntity {
//! #                             uuid: uuid.clone(),
//! #                             parent_uuid: None,
//! #                             kind: "adapter".to_string(),
//! #                             created: 0,
//! #                         },
//! #                     )
//! #                 })
//! #                 .collect();
//! #             RouteResponse::new(results, started.elapsed())
//! #         }
//! #     }
//! # }
//!
//! # tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(async {
//! let driver: Arc<dyn EntityReadDriver<SourceEntity>> =
//!     Arc::new(memory_driver::MemoryReadDriver);
//!
//! let router = Router::builder("gateway")
//!     .bind("memory", ["Sources.*"], driver)
//!     .build();
//!
//! let response: RouteResponse<SourceEntity> = router
//!     .sources()
//!     .entities()
//!     .read(vec!["source-1".to_string()], None)
//!     .await;
//!
//! assert!(response.success());
//! assert_eq!(response.contents().len(), 1);
//! # });
//! ```
//!
//! ## Internal architecture map
//!
//! - Router facade: outward [`Router`]/[`RouterBuilder`] surface and the
//!   per-family router accessors
//! - Routing: capability registry, route patterns, target resolution
//! - Dispatch: request/response envelope and the fan-out/fallback executor
//! - Entities: the generic entity-router contract and its specializations
//! - Subscriptions: push consumers and the live subscription table
//! - Blobs: stream-valued read/publish/delete routing
//!
//! ## Observability model
//!
//! The workspace uses `tracing` for logs/events. Library code emits events
//! and does not unconditionally initialize a global subscriber;
//! binaries and tests are responsible for one-time `tracing_subscriber`
//! initialization at process boundaries.

mod config;
pub use config::{ConfigError, RouteConfig, RouterConfig, TargetConfig};

pub mod dispatch;
pub use dispatch::{
    OptionKind, ResultKind, RouteOption, RouteRequest, RouteResponse, RouteResult,
};

pub mod entities;
pub use entities::{
    DefinitionEntity, DefinitionMetadataEntity, Entity, EntityCategory, EntityRef, MessageEntity,
    OperationMode, SourceEntity, SourceMetadataEntity,
};

pub mod blobs;
pub use blobs::BlobStream;

#[doc(hidden)]
pub mod observability;

mod router;
pub use router::{Router, RouterBuilder};

pub mod routing;
pub use routing::{Capability, EntityFamily, FanOutPolicy, Operation};

pub mod subscriptions;
pub use subscriptions::{
    DeliveryError, EntityNotification, NotificationKind, NotificationSink, Subscription,
};
