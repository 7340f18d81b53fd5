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

//! In-memory mock drivers and helpers for `entity-router` integration tests.

mod memory_source_driver;
pub use memory_source_driver::MemorySourceDriver;

mod memory_definition_driver;
pub use memory_definition_driver::MemoryDefinitionDriver;

mod memory_blob_driver;
pub use memory_blob_driver::MemoryBlobDriver;

mod feed_subscribe_driver;
pub use feed_subscribe_driver::FeedSubscribeDriver;

mod failing_drivers;
pub use failing_drivers::{EchoCommandDriver, FailingReadDriver, RejectingPublishDriver, SlowReadDriver};

use entity_router::SourceEntity;

/// One-time tracing initialization for integration tests; later calls are
/// no-ops.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}

/// Builds a source entity with the given uuid and optional parent.
pub fn source(uuid: &str, parent_uuid: Option<&str>) -> SourceEntity {
    SourceEntity {
        uuid: uuid.to_string(),
        parent_uuid: parent_uuid.map(|p| p.to_string()),
        kind: "adapter".to_string(),
        created: 0,
    }
}
