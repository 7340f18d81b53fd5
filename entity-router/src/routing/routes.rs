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

//! Per-family route tables.
//!
//! One table per entity/operation family, enumerating the canonical route
//! pattern of every capability the family declares. The three expire variants
//! of a family share its `Write.Expire` pattern with distinct capability
//! entries.

// Read
// - Absolute
// - Query
// - Subscribe

// Write
// - Publish
// - Delete
// - Empty
// - Expire
// - Run

use super::registry::{Capability, EntityFamily, FanOutPolicy, Operation, RouteRegistry};

pub mod sources {
    pub const READ: &str = "Sources.Instances.Read.Absolute";
    pub const QUERY: &str = "Sources.Instances.Read.Query";
    pub const SUBSCRIBE: &str = "Sources.Instances.Read.Subscribe";
    pub const PUBLISH: &str = "Sources.Instances.Write.Publish";
    pub const DELETE: &str = "Sources.Instances.Write.Delete";
    pub const EXPIRE: &str = "Sources.Instances.Write.Expire";

    // Metadata
    pub const METADATA_READ: &str = "Sources.Metadata.Read.Absolute";
    pub const METADATA_QUERY: &str = "Sources.Metadata.Read.Query";
    pub const METADATA_SUBSCRIBE: &str = "Sources.Metadata.Read.Subscribe";
    pub const METADATA_PUBLISH: &str = "Sources.Metadata.Write.Publish";
    pub const METADATA_DELETE: &str = "Sources.Metadata.Write.Delete";
    pub const METADATA_EMPTY: &str = "Sources.Metadata.Write.Empty";
    pub const METADATA_EXPIRE: &str = "Sources.Metadata.Write.Expire";
}

pub mod definitions {
    pub const READ: &str = "Definitions.Instances.Read.Absolute";
    pub const QUERY: &str = "Definitions.Instances.Read.Query";
    pub const SUBSCRIBE: &str = "Definitions.Instances.Read.Subscribe";
    pub const PUBLISH: &str = "Definitions.Instances.Write.Publish";
    pub const DELETE: &str = "Definitions.Instances.Write.Delete";
    pub const EXPIRE: &str = "Definitions.Instances.Write.Expire";

    // Metadata
    pub const METADATA_READ: &str = "Definitions.Metadata.Read.Absolute";
    pub const METADATA_QUERY: &str = "Definitions.Metadata.Read.Query";
    pub const METADATA_SUBSCRIBE: &str = "Definitions.Metadata.Read.Subscribe";
    pub const METADATA_PUBLISH: &str = "Definitions.Metadata.Write.Publish";
    pub const METADATA_DELETE: &str = "Definitions.Metadata.Write.Delete";
    pub const METADATA_EMPTY: &str = "Definitions.Metadata.Write.Empty";
    pub const METADATA_EXPIRE: &str = "Definitions.Metadata.Write.Expire";
}

pub mod messages {
    pub const READ: &str = "Messages.Brokers.Read.Absolute";
    pub const QUERY: &str = "Messages.Brokers.Read.Query";
    pub const SUBSCRIBE: &str = "Messages.Brokers.Read.Subscribe";
    pub const PUBLISH: &str = "Messages.Brokers.Write.Publish";
    pub const DELETE: &str = "Messages.Brokers.Write.Delete";
    pub const EXPIRE: &str = "Messages.Brokers.Write.Expire";
}

pub mod commands {
    pub const RUN: &str = "Commands.Write.Run";
}

pub mod blobs {
    pub const READ: &str = "Blobs.Read.Absolute";
    pub const PUBLISH: &str = "Blobs.Write.Publish";
    pub const DELETE: &str = "Blobs.Write.Delete";
}

fn register_entity_family(
    registry: &mut RouteRegistry,
    family: EntityFamily,
    table: &[(Operation, &'static str, FanOutPolicy)],
) {
    for &(operation, pattern, policy) in table {
        registry.register(Capability::new(family, operation), pattern, policy);
    }
}

/// Registers every family table into `registry`.
pub(crate) fn register_all(registry: &mut RouteRegistry) {
    use FanOutPolicy::{All, First, Merge};
    use Operation::*;

    register_entity_family(
        registry,
        EntityFamily::Sources,
        &[
            (Read, sources::READ, Merge),
            (Query, sources::QUERY, Merge),
            (Subscribe, sources::SUBSCRIBE, Merge),
            (Publish, sources::PUBLISH, All),
            (Delete, sources::DELETE, All),
            (Expire, sources::EXPIRE, All),
            (ExpireUpdate, sources::EXPIRE, All),
            (ExpireAccess, sources::EXPIRE, All),
        ],
    );

    register_entity_family(
        registry,
        EntityFamily::SourceMetadata,
        &[
            (Read, sources::METADATA_READ, Merge),
            (Query, sources::METADATA_QUERY, Merge),
            (Subscribe, sources::METADATA_SUBSCRIBE, Merge),
            (Publish, sources::METADATA_PUBLISH, All),
            (Delete, sources::METADATA_DELETE, All),
            (Empty, sources::METADATA_EMPTY, All),
            (Expire, sources::METADATA_EXPIRE, All),
            (ExpireUpdate, sources::METADATA_EXPIRE, All),
            (ExpireAccess, sources::METADATA_EXPIRE, All),
        ],
    );

    register_entity_family(
        registry,
        EntityFamily::Definitions,
        &[
            (Read, definitions::READ, Merge),
            (Query, definitions::QUERY, Merge),
            (Subscribe, definitions::SUBSCRIBE, Merge),
            (Publish, definitions::PUBLISH, All),
            (Delete, definitions::DELETE, All),
            (Expire, definitions::EXPIRE, All),
            (ExpireUpdate, definitions::EXPIRE, All),
            (ExpireAccess, definitions::EXPIRE, All),
        ],
    );

    register_entity_family(
        registry,
        EntityFamily::DefinitionMetadata,
        &[
            (Read, definitions::METADATA_READ, Merge),
            (Query, definitions::METADATA_QUERY, Merge),
            (Subscribe, definitions::METADATA_SUBSCRIBE, Merge),
            (Publish, definitions::METADATA_PUBLISH, All),
            (Delete, definitions::METADATA_DELETE, All),
            (Empty, definitions::METADATA_EMPTY, All),
            (Expire, definitions::METADATA_EXPIRE, All),
            (ExpireUpdate, definitions::METADATA_EXPIRE, All),
            (ExpireAccess, definitions::METADATA_EXPIRE, All),
        ],
    );

    register_entity_family(
        registry,
        EntityFamily::Messages,
        &[
            (Read, messages::READ, Merge),
            (Query, messages::QUERY, Merge),
            (Subscribe, messages::SUBSCRIBE, Merge),
            (Publish, messages::PUBLISH, All),
            (Delete, messages::DELETE, All),
            (Expire, messages::EXPIRE, All),
            (ExpireUpdate, messages::EXPIRE, All),
            (ExpireAccess, messages::EXPIRE, All),
        ],
    );

    registry.register(
        Capability::new(EntityFamily::Commands, Run),
        commands::RUN,
        All,
    );

    // Blob reads return streams, which cannot be merged; first-success only.
    registry.register(Capability::new(EntityFamily::Blobs, Read), blobs::READ, First);
    registry.register(
        Capability::new(EntityFamily::Blobs, Publish),
        blobs::PUBLISH,
        All,
    );
    registry.register(
        Capability::new(EntityFamily::Blobs, Delete),
        blobs::DELETE,
        All,
    );
}
