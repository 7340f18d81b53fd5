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

use std::time::Instant;

use async_trait::async_trait;
use tokio::sync::Mutex;

use entity_router::entities::EntitySubscribeDriver;
use entity_router::subscriptions::{ConsumerHandle, EntityConsumer};
use entity_router::{RouteResponse, RouteResult, SourceEntity};

/// Subscribe driver whose feeds are pushed by the test itself.
pub struct FeedSubscribeDriver {
    id: String,
    handles: Mutex<Vec<ConsumerHandle<Vec<SourceEntity>>>>,
}

impl FeedSubscribeDriver {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            handles: Mutex::new(Vec::new()),
        }
    }

    /// Pushes a batch into every open feed.
    pub async fn push(&self, batch: Vec<SourceEntity>) {
        let handles = self.handles.lock().await;
        for handle in handles.iter() {
            handle.push(batch.clone()).await;
        }
    }
}

#[async_trait]
impl EntitySubscribeDriver<SourceEntity> for FeedSubscribeDriver {
    async fn subscribe(&self, _request_id: &str) -> RouteResponse<EntityConsumer<Vec<SourceEntity>>> {
        let started = Instant::now();
        let (handle, consumer) = EntityConsumer::channel();
        self.handles.lock().await.push(handle);
        RouteResponse::new(
            vec![RouteResult::ok(&self.id, "subscribe", consumer)],
            started.elapsed(),
        )
    }
}
