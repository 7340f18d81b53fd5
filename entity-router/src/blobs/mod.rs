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

//! Content-addressed blob routing.
//!
//! The same resolve/execute shape as the entity routers, restricted to
//! read/publish/delete over byte streams. A blob read returns a lazily
//! produced stream, restartable only by reissuing the call; because streams
//! cannot be merged, read fan-out degrades to first-success.

use async_trait::async_trait;
use bytes::Bytes;
use futures::future::BoxFuture;
use futures::stream::BoxStream;
use futures::FutureExt;

use crate::dispatch::executor;
use crate::dispatch::{RouteRequest, RouteResponse};
use crate::router::Router;
use crate::routing::{Capability, DriverTarget, EntityFamily, Operation, RouterTarget};

const READ_OPERATION: &str = "Read";
const PUBLISH_OPERATION: &str = "Publish";
const DELETE_OPERATION: &str = "Delete";

/// A lazily produced blob payload.
pub type BlobStream = BoxStream<'static, std::io::Result<Bytes>>;

#[async_trait]
pub trait BlobReadDriver: Send + Sync {
    async fn read(&self, blob_id: &str, request_id: &str) -> RouteResponse<BlobStream>;
}

#[async_trait]
pub trait BlobPublishDriver: Send + Sync {
    /// Ownership of `content` transfers to the driver for the duration of
    /// the call.
    async fn publish(&self, blob_id: &str, content: Bytes, request_id: &str)
        -> RouteResponse<bool>;
}

#[async_trait]
pub trait BlobDeleteDriver: Send + Sync {
    async fn delete(&self, blob_id: &str, request_id: &str) -> RouteResponse<bool>;
}

/// Routes blob reads, publishes, and deletes.
#[derive(Clone)]
pub struct BlobRouter {
    router: Router,
}

impl BlobRouter {
    pub(crate) fn new(router: Router) -> Self {
        Self { router }
    }

    /// Reads a blob as a stream; first-success across targets.
    pub async fn read(
        &self,
        blob_id: String,
        request_id: Option<String>,
    ) -> RouteResponse<BlobStream> {
        self.clone().read_boxed(blob_id, request_id).await
    }

    fn read_boxed(
        self,
        blob_id: String,
        request_id: Option<String>,
    ) -> BoxFuture<'static, RouteResponse<BlobStream>> {
        async move {
            let request = RouteRequest::new(READ_OPERATION, request_id, vec![blob_id.clone()]);
            let binding = self
                .router
                .registry()
                .resolve(Capability::new(EntityFamily::Blobs, Operation::Read));
            let targets = self
                .router
                .resolve_targets::<dyn BlobReadDriver>(binding.pattern);

            let driver_fn = {
                let blob_id = blob_id.clone();
                let id = request.id.clone();
                move |target: DriverTarget<dyn BlobReadDriver>| {
                    let blob_id = blob_id.clone();
                    let id = id.clone();
                    async move { target.driver.read(&blob_id, &id).await }
                }
            };
            let router_fn = {
                let blob_id = blob_id;
                let id = request.id.clone();
                move |target: RouterTarget| {
                    target
                        .router
                        .blobs()
                        .read_boxed(blob_id.clone(), Some(id.clone()))
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

    /// Publishes a blob; ownership of the byte sequence transfers to the
    /// invoked drivers.
    pub async fn publish(
        &self,
        blob_id: String,
        content: Bytes,
        request_id: Option<String>,
    ) -> RouteResponse<bool> {
        self.clone().publish_boxed(blob_id, content, request_id).await
    }

    fn publish_boxed(
        self,
        blob_id: String,
        content: Bytes,
        request_id: Option<String>,
    ) -> BoxFuture<'static, RouteResponse<bool>> {
        async move {
            let request = RouteRequest::new(PUBLISH_OPERATION, request_id, vec![blob_id.clone()]);
            let binding = self
                .router
                .registry()
                .resolve(Capability::new(EntityFamily::Blobs, Operation::Publish));
            let targets = self
                .router
                .resolve_targets::<dyn BlobPublishDriver>(binding.pattern);

            let driver_fn = {
                let blob_id = blob_id.clone();
                let content = content.clone();
                let id = request.id.clone();
                move |target: DriverTarget<dyn BlobPublishDriver>| {
                    let blob_id = blob_id.clone();
                    let content = content.clone();
                    let id = id.clone();
                    async move { target.driver.publish(&blob_id, content, &id).await }
                }
            };
            let router_fn = {
                let blob_id = blob_id;
                let content = content;
                let id = request.id.clone();
                move |target: RouterTarget| {
                    target.router.blobs().publish_boxed(
                        blob_id.clone(),
                        content.clone(),
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

    /// Deletes a blob.
    pub async fn delete(
        &self,
        blob_id: String,
        request_id: Option<String>,
    ) -> RouteResponse<bool> {
        self.clone().delete_boxed(blob_id, request_id).await
    }

    fn delete_boxed(
        self,
        blob_id: String,
        request_id: Option<String>,
    ) -> BoxFuture<'static, RouteResponse<bool>> {
        async move {
            let request = RouteRequest::new(DELETE_OPERATION, request_id, vec![blob_id.clone()]);
            let binding = self
                .router
                .registry()
                .resolve(Capability::new(EntityFamily::Blobs, Operation::Delete));
            let targets = self
                .router
                .resolve_targets::<dyn BlobDeleteDriver>(binding.pattern);

            let driver_fn = {
                let blob_id = blob_id.clone();
                let id = request.id.clone();
                move |target: DriverTarget<dyn BlobDeleteDriver>| {
                    let blob_id = blob_id.clone();
                    let id = id.clone();
                    async move { target.driver.delete(&blob_id, &id).await }
                }
            };
            let router_fn = {
                let blob_id = blob_id;
                let id = request.id.clone();
                move |target: RouterTarget| {
                    target
                        .router
                        .blobs()
                        .delete_boxed(blob_id.clone(), Some(id.clone()))
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
}
