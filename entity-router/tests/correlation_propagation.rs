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

use router_test_utils::{init_logging, source};

mod support;

#[tokio::test(flavor = "multi_thread")]
async fn composite_issues_every_internal_call_with_one_generated_id() {
    init_logging();

    let (router, driver) = support::single_source_router(
        "composite",
        "memory",
        vec![source("a", Some("b")), source("b", None)],
    );

    let response = router
        .sources()
        .read_chain(vec!["a".to_string()], None)
        .await;
    assert!(response.success());

    // Chain query + batch read: two internal calls, one identical id.
    let recorded = driver.recorded_request_ids().await;
    assert_eq!(recorded.len(), 2);
    assert_eq!(recorded[0], recorded[1]);
    assert!(!recorded[0].is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn caller_supplied_id_reaches_the_delegated_driver_unchanged() {
    init_logging();

    let (child, driver) =
        support::single_source_router("child", "memory", vec![source("source-1", None)]);
    let parent = entity_router::Router::builder("parent")
        .child(child, ["Sources.*"])
        .build();

    let response = parent
        .sources()
        .entities()
        .read(
            vec!["source-1".to_string()],
            Some("trace-4711".to_string()),
        )
        .await;
    assert!(response.success());

    assert_eq!(driver.recorded_request_ids().await, vec!["trace-4711"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn composite_through_a_child_keeps_one_id_across_both_calls() {
    init_logging();

    let (child, driver) = support::single_source_router(
        "child",
        "memory",
        vec![source("a", Some("b")), source("b", None)],
    );
    let parent = entity_router::Router::builder("parent")
        .child(child, ["Sources.*"])
        .build();

    let response = parent
        .sources()
        .read_chain(vec!["a".to_string()], None)
        .await;
    assert!(response.success());

    let recorded = driver.recorded_request_ids().await;
    assert_eq!(recorded.len(), 2);
    assert_eq!(recorded[0], recorded[1]);
}
