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
use bytes::Bytes;
use futures::StreamExt;
use tokio::sync::Mutex;

use entity_router::blobs::{BlobDeleteDriver, BlobPublishDriver, BlobReadDriver, BlobStream};
use entity_router::{RouteResponse, RouteResult};

/// In-memory blob store; reads stream the stored payload in one chunk.
pub struct MemoryBlobDriver {
    id: String,
    blobs: Mutex<HashMap<String, Bytes>>,
}

impl MemoryBlobDriver {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            blobs: Mutex::new(HashMap::new()),
        }
    }

    pub async fn contains(&self, blob_id: &str) -> bool {
        self.blobs.lock().await.contains_key(blob_id)
    }

    pub async fn insert(&self, blob_id: &str, content: Bytes) {
        self.blobs.lock().await.insert(blob_id.to_string(), content);
    }
}

#[async_trait]
impl BlobReadDriver for MemoryBlobDriver {
    async fn read(&self, blob_id: &str, _request_id: &str) -> RouteResponse<BlobStream> {
        let started = Instant::now();
        let blobs = self.blobs.lock().await;
        let results = match blobs.get(blob_id) {
            Some(content) => {
                let stream: BlobStream =
                    futures::stream::iter(vec![Ok(content.clone())]).boxed();
                vec![RouteResult::ok(&self.id, blob_id, stream)]
            }
            None => vec![RouteResult::not_found(&self.id, blob_id)],
        };
        RouteResponse::new(results, started.elapsed())
    }
}

#[async_trait]
impl BlobPublishDriver for MemoryBlobDriver {
    async fn publish(
        &self,
        blob_id: &str,
        content: Bytes,
        _request_id: &str,
    ) -> RouteResponse<bool> {
        let started = Instant::now();
        self.blobs.lock().await.insert(blob_id.to_string(), content);
        RouteResponse::new(
            vec![RouteResult::ok(&self.id, blob_id, true)],
            started.elapsed(),
        )
    }
}

#[async_trait]
impl BlobDeleteDriver for MemoryBlobDriver {
    async fn delete(&self, blob_id: &str, _request_id: &str) -> RouteResponse<bool> {
        let started = Instant::now();
        let results = match self.blobs.lock().await.remove(blob_id) {
            Some(_) => vec![RouteResult::ok(&self.id, blob_id, true)],
            None => vec![RouteResult::not_found(&self.id, blob_id)],
        };
        RouteResponse::new(results, started.elapsed())
    }
}
