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

use bytes::Bytes;
use futures::StreamExt;

use entity_router::blobs::{BlobPublishDriver, BlobReadDriver};
use entity_router::Router;
use router_test_utils::{init_logging, MemoryBlobDriver};

fn blob_router(driver: Arc<MemoryBlobDriver>) -> Router {
    let read: Arc<dyn BlobReadDriver> = driver.clone();
    let publish: Arc<dyn BlobPublishDriver> = driver;
    Router::builder("blobs")
        .bind("filesystem", ["Blobs.*"], read)
        .bind("filesystem", ["Blobs.*"], publish)
        .build()
}

#[tokio::test(flavor = "multi_thread")]
async fn published_blob_streams_back_on_read() {
    init_logging();

    let driver = Arc::new(MemoryBlobDriver::new("filesystem"));
    let router = blob_router(driver.clone());

    let publish = router
        .blobs()
        .publish("blob-1".to_string(), Bytes::from_static(b"payload"), None)
        .await;
    assert!(publish.success());
    assert!(driver.contains("blob-1").await);

    let mut read = router.blobs().read("blob-1".to_string(), None).await;
    assert!(read.success());

    let mut stream = read
        .results
        .remove(0)
        .content
        .expect("read result should carry the stream");
    let mut payload = Vec::new();
    while let Some(chunk) = stream.next().await {
        payload.extend_from_slice(&chunk.expect("stream chunk should be readable"));
    }
    assert_eq!(payload, b"payload");
}

#[tokio::test(flavor = "multi_thread")]
async fn read_falls_through_to_the_store_that_holds_the_blob() {
    init_logging();

    let empty_store = Arc::new(MemoryBlobDriver::new("store-a"));
    let backing_store = Arc::new(MemoryBlobDriver::new("store-b"));
    backing_store
        .insert("blob-1", Bytes::from_static(b"payload"))
        .await;

    let read_a: Arc<dyn BlobReadDriver> = empty_store;
    let read_b: Arc<dyn BlobReadDriver> = backing_store;
    let router = Router::builder("blobs")
        .bind("store-a", ["Blobs.*"], read_a)
        .bind("store-b", ["Blobs.*"], read_b)
        .build();

    let read = router.blobs().read("blob-1".to_string(), None).await;

    assert!(read.success());
    assert_eq!(read.results[0].source, "store-b");
}

#[tokio::test(flavor = "multi_thread")]
async fn delete_removes_the_blob_from_the_store() {
    init_logging();

    let driver = Arc::new(MemoryBlobDriver::new("filesystem"));
    driver.insert("blob-1", Bytes::from_static(b"payload")).await;

    let delete: Arc<dyn entity_router::blobs::BlobDeleteDriver> = driver.clone();
    let router = Router::builder("blobs")
        .bind("filesystem", ["Blobs.*"], delete)
        .build();

    let response = router.blobs().delete("blob-1".to_string(), None).await;

    assert!(response.success());
    assert!(!driver.contains("blob-1").await);
}

#[tokio::test(flavor = "multi_thread")]
async fn blob_read_without_any_target_reports_no_route() {
    init_logging();

    let router = Router::builder("empty").build();
    let response = router.blobs().read("blob-1".to_string(), None).await;

    assert!(!response.success());
    assert!(response.not_routed());
}
