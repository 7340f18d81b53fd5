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

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use entity_router::entities::EntitySubscribeDriver;
use entity_router::subscriptions::{DeliveryError, EntityNotification, NotificationSink};
use entity_router::{Router, SourceEntity};
use router_test_utils::{init_logging, source, FeedSubscribeDriver};

struct RecordingSink {
    batches: Mutex<Vec<Vec<EntityNotification>>>,
}

impl RecordingSink {
    fn new() -> Self {
        Self {
            batches: Mutex::new(Vec::new()),
        }
    }

    async fn received(&self) -> Vec<Vec<EntityNotification>> {
        self.batches.lock().await.clone()
    }
}

#[async_trait]
impl NotificationSink for RecordingSink {
    async fn notify(&self, batch: Vec<EntityNotification>) -> Result<(), DeliveryError> {
        self.batches.lock().await.push(batch);
        Ok(())
    }
}

fn feed_router(driver: Arc<FeedSubscribeDriver>) -> Router {
    let subscriber: Arc<dyn EntitySubscribeDriver<SourceEntity>> = driver;
    Router::builder("notifications")
        .bind("feed", ["Sources.*"], subscriber)
        .build()
}

#[tokio::test(flavor = "multi_thread")]
async fn published_batches_reach_the_sink_in_feed_order() {
    init_logging();

    let driver = Arc::new(FeedSubscribeDriver::new("feed"));
    let router = feed_router(driver.clone());
    let sink = Arc::new(RecordingSink::new());

    let response = router
        .subscribe_notifications::<SourceEntity>("*", sink.clone(), None)
        .await;
    assert!(response.success());

    driver.push(vec![source("source-1", None)]).await;
    driver.push(vec![source("source-2", None)]).await;
    tokio::time::sleep(Duration::from_millis(50)).await;

    let batches = sink.received().await;
    assert_eq!(batches.len(), 2);
    assert_eq!(batches[0][0].entity.uuid, "source-1");
    assert_eq!(batches[1][0].entity.uuid, "source-2");
}

#[tokio::test(flavor = "multi_thread")]
async fn filter_limits_delivery_to_matching_entities() {
    init_logging();

    let driver = Arc::new(FeedSubscribeDriver::new("feed"));
    let router = feed_router(driver.clone());
    let sink = Arc::new(RecordingSink::new());

    let response = router
        .subscribe_notifications::<SourceEntity>("line-*", sink.clone(), None)
        .await;
    assert!(response.success());

    driver
        .push(vec![source("line-1", None), source("cell-9", None)])
        .await;
    tokio::time::sleep(Duration::from_millis(50)).await;

    let batches = sink.received().await;
    assert_eq!(batches.len(), 1);
    assert_eq!(batches[0].len(), 1);
    assert_eq!(batches[0][0].entity.uuid, "line-1");
}

#[tokio::test(flavor = "multi_thread")]
async fn unsubscribe_stops_delivery_and_is_idempotent() {
    init_logging();

    let driver = Arc::new(FeedSubscribeDriver::new("feed"));
    let router = feed_router(driver.clone());
    let sink = Arc::new(RecordingSink::new());

    let response = router
        .subscribe_notifications::<SourceEntity>("*", sink.clone(), None)
        .await;
    let subscription = response.contents()[0].clone();
    assert_eq!(router.subscriptions().active_count().await, 1);

    router.unsubscribe(&subscription.id).await;
    assert_eq!(router.subscriptions().active_count().await, 0);

    // Second unsubscribe with the same id is a no-op, never an error.
    router.unsubscribe(&subscription.id).await;

    driver.push(vec![source("source-1", None)]).await;
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(sink.received().await.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn subscribing_without_any_target_reports_no_route() {
    init_logging();

    let router = Router::builder("empty").build();
    let sink = Arc::new(RecordingSink::new());

    let response = router
        .subscribe_notifications::<SourceEntity>("*", sink, None)
        .await;

    assert!(!response.success());
    assert!(response.not_routed());
}
