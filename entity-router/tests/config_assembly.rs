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

use entity_router::entities::EntityReadDriver;
use entity_router::{Router, RouterConfig, SourceEntity};
use router_test_utils::{init_logging, source, MemorySourceDriver};

mod support;

const GATEWAY_CONFIG: &str = r#"
{
    id: "gateway",
    routes: [
        {
            patterns: ["Sources.*"],
            targets: [
                { type: "driver", id: "memory" },
                { type: "router", id: "warehouse" },
            ],
        },
    ],
}
"#;

#[tokio::test(flavor = "multi_thread")]
async fn configured_driver_serves_its_route_patterns() {
    init_logging();

    let config = RouterConfig::parse(GATEWAY_CONFIG).expect("config should parse");

    let driver = Arc::new(MemorySourceDriver::with_sources(
        "memory",
        vec![source("source-1", None)],
    ));
    let reader: Arc<dyn EntityReadDriver<SourceEntity>> = driver;

    let router = Router::builder(config.id.clone())
        .bind("memory", config.driver_patterns("memory"), reader)
        .build();

    let response = router
        .sources()
        .entities()
        .read(vec!["source-1".to_string()], None)
        .await;

    assert!(response.success());
    assert_eq!(response.results[0].source, "memory");
}

#[tokio::test(flavor = "multi_thread")]
async fn configured_child_router_receives_delegated_calls() {
    init_logging();

    let config = RouterConfig::parse(GATEWAY_CONFIG).expect("config should parse");

    let (warehouse, _driver) = support::single_source_router(
        "warehouse",
        "warehouse-memory",
        vec![source("source-1", None)],
    );

    let router = Router::builder(config.id.clone())
        .child(warehouse, config.router_patterns("warehouse"))
        .build();

    let response = router
        .sources()
        .entities()
        .read(vec!["source-1".to_string()], None)
        .await;

    assert!(response.success());
    assert_eq!(response.results[0].source, "warehouse-memory");
}

#[tokio::test(flavor = "multi_thread")]
async fn configured_patterns_do_not_leak_to_other_families() {
    init_logging();

    let config = RouterConfig::parse(GATEWAY_CONFIG).expect("config should parse");

    let driver = Arc::new(MemorySourceDriver::new("memory"));
    let reader: Arc<dyn EntityReadDriver<SourceEntity>> = driver;
    let router = Router::builder(config.id.clone())
        .bind("memory", config.driver_patterns("memory"), reader)
        .build();

    // Blobs were never configured, so the blob family has no route.
    let response = router.blobs().read("blob-1".to_string(), None).await;
    assert!(!response.success());
    assert!(response.not_routed());
}
