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
use std::time::Instant;

use async_trait::async_trait;

use entity_router::entities::{EntityPublishDriver, EntityReadDriver};
use entity_router::{
    OptionKind, RouteOption, RouteResponse, RouteResult, Router, SourceEntity,
};
use router_test_utils::{init_logging, source, MemorySourceDriver};

/// Read driver that attaches a deferred publish option to every response.
struct OptionAttachingReadDriver {
    id: String,
    deferred: SourceEntity,
}

#[async_trait]
impl EntityReadDriver<SourceEntity> for OptionAttachingReadDriver {
    async fn read(&self, uuids: &[String], _request_id: &str) -> RouteResponse<SourceEntity> {
        let started = Instant::now();
        let results = uuids
            .iter()
            .map(|uuid| RouteResult::ok(&self.id, uuid, source(uuid, None)))
            .collect();
        let options = vec![RouteOption::new(
            OptionKind::Publish,
            &self.deferred.uuid,
            Some(self.deferred.clone()),
        )];
        RouteResponse::with_options(results, started.elapsed(), options)
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn deferred_publish_option_is_processed_with_the_same_correlation_id() {
    init_logging();

    let reader: Arc<dyn EntityReadDriver<SourceEntity>> = Arc::new(OptionAttachingReadDriver {
        id: "cache".to_string(),
        deferred: source("source-2", None),
    });
    let store = Arc::new(MemorySourceDriver::new("store"));
    let publisher: Arc<dyn EntityPublishDriver<SourceEntity>> = store.clone();

    let router = Router::builder("options")
        .bind("cache", ["Sources.Instances.Read.Absolute"], reader)
        .bind("store", ["Sources.Instances.Write.Publish"], publisher)
        .build();

    let response = router
        .sources()
        .entities()
        .read(vec!["source-1".to_string()], Some("trace-1".to_string()))
        .await;

    assert!(response.success());
    // The option was stripped from the caller-visible envelope.
    assert!(response.options.is_empty());

    // The deferred publish went through the router under the same id.
    assert!(store.contains("source-2").await);
    assert_eq!(store.recorded_request_ids().await, vec!["trace-1"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn failed_option_processing_never_flips_a_successful_response() {
    init_logging();

    // No publish route exists, so processing the deferred option fails.
    let reader: Arc<dyn EntityReadDriver<SourceEntity>> = Arc::new(OptionAttachingReadDriver {
        id: "cache".to_string(),
        deferred: source("source-2", None),
    });
    let router = Router::builder("options")
        .bind("cache", ["Sources.Instances.Read.Absolute"], reader)
        .build();

    let response = router
        .sources()
        .entities()
        .read(vec!["source-1".to_string()], None)
        .await;

    assert!(response.success());
    assert_eq!(response.contents().len(), 1);
}
