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
use entity_router::{Router, SourceEntity};
use router_test_utils::{init_logging, source, MemorySourceDriver};

mod support;

fn reader(driver: Arc<MemorySourceDriver>) -> Arc<dyn EntityReadDriver<SourceEntity>> {
    driver
}

#[tokio::test(flavor = "multi_thread")]
async fn read_fan_out_merges_disjoint_result_sets_without_duplicates() {
    init_logging();

    let driver_a = Arc::new(MemorySourceDriver::with_sources(
        "memory-a",
        vec![source("source-1", None), source("source-2", None)],
    ));
    let driver_b = Arc::new(MemorySourceDriver::with_sources(
        "memory-b",
        vec![source("source-3", None)],
    ));

    let router = Router::builder("fan-out")
        .bind("memory-a", ["Sources.*"], reader(driver_a))
        .bind("memory-b", ["Sources.*"], reader(driver_b))
        .build();

    let response = router
        .sources()
        .entities()
        .read(
            vec![
                "source-1".to_string(),
                "source-2".to_string(),
                "source-3".to_string(),
            ],
            None,
        )
        .await;

    assert!(response.success());
    let mut uuids: Vec<&str> = response.contents().iter().map(|e| e.uuid.as_str()).collect();
    uuids.sort_unstable();
    assert_eq!(uuids, vec!["source-1", "source-2", "source-3"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn overlapping_result_sets_are_deduplicated_by_identity() {
    init_logging();

    let driver_a = Arc::new(MemorySourceDriver::with_sources(
        "memory-a",
        vec![source("source-1", None), source("source-2", None)],
    ));
    let driver_b = Arc::new(MemorySourceDriver::with_sources(
        "memory-b",
        vec![source("source-2", None), source("source-3", None)],
    ));

    let router = Router::builder("fan-out")
        .bind("memory-a", ["Sources.*"], reader(driver_a))
        .bind("memory-b", ["Sources.*"], reader(driver_b))
        .build();

    let response = router
        .sources()
        .entities()
        .read(
            vec![
                "source-1".to_string(),
                "source-2".to_string(),
                "source-3".to_string(),
            ],
            None,
        )
        .await;

    assert!(response.success());
    let mut uuids: Vec<&str> = response.contents().iter().map(|e| e.uuid.as_str()).collect();
    uuids.sort_unstable();
    assert_eq!(uuids, vec!["source-1", "source-2", "source-3"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn single_driver_read_preserves_the_driver_order() {
    init_logging();

    let (router, _driver) = support::single_source_router(
        "ordered",
        "memory",
        vec![source("source-1", None), source("source-2", None)],
    );

    let response = router
        .sources()
        .entities()
        .read(vec!["source-2".to_string(), "source-1".to_string()], None)
        .await;

    assert!(response.success());
    let uuids: Vec<&str> = response.contents().iter().map(|e| e.uuid.as_str()).collect();
    assert_eq!(uuids, vec!["source-2", "source-1"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn unknown_uuids_return_not_found_but_the_envelope_stays_successful() {
    init_logging();

    let (router, _driver) =
        support::single_source_router("lookup", "memory", vec![source("source-1", None)]);

    let response = router
        .sources()
        .entities()
        .read(vec!["source-1".to_string(), "missing".to_string()], None)
        .await;

    assert!(response.success());
    assert!(!response.not_routed());
    assert_eq!(response.contents().len(), 1);
}
