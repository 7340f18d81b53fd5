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

//! Entity identity model and the concrete entity kinds routed by the fabric.

use serde::{Deserialize, Serialize};

use crate::routing::EntityFamily;

/// Entity family enumeration; identity is scoped per category, so a uuid
/// alone is not globally unique.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityCategory {
    Sources = 1,
    Definitions = 2,
    Objects = 3,
    Messages = 4,
}

/// The (category, class, uuid) identity triple.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct EntityRef {
    pub category: EntityCategory,
    pub class: u8,
    pub uuid: String,
}

/// A routable entity: identity plus its category/class constants.
pub trait Entity: Clone + Send + Sync + 'static {
    const CATEGORY: EntityCategory;
    const CLASS: u8;

    fn uuid(&self) -> &str;

    fn entity_ref(&self) -> EntityRef {
        EntityRef {
            category: Self::CATEGORY,
            class: Self::CLASS,
            uuid: self.uuid().to_string(),
        }
    }
}

/// An entity kind wired into the capability registry.
pub trait RoutedEntity: Entity {
    const FAMILY: EntityFamily;
}

/// A data source registered with the platform.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct SourceEntity {
    pub uuid: String,
    pub parent_uuid: Option<String>,
    pub kind: String,
    pub created: u64,
}

impl Entity for SourceEntity {
    const CATEGORY: EntityCategory = EntityCategory::Sources;
    const CLASS: u8 = 1;

    fn uuid(&self) -> &str {
        &self.uuid
    }
}

impl RoutedEntity for SourceEntity {
    const FAMILY: EntityFamily = EntityFamily::Sources;
}

/// Key/value metadata attached to a source.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct SourceMetadataEntity {
    pub uuid: String,
    pub source_uuid: String,
    pub name: String,
    pub value: String,
    pub created: u64,
}

impl Entity for SourceMetadataEntity {
    const CATEGORY: EntityCategory = EntityCategory::Sources;
    const CLASS: u8 = 2;

    fn uuid(&self) -> &str {
        &self.uuid
    }
}

impl RoutedEntity for SourceMetadataEntity {
    const FAMILY: EntityFamily = EntityFamily::SourceMetadata;
}

/// A type definition in the platform vocabulary.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct DefinitionEntity {
    pub uuid: String,
    pub id: String,
    pub parent_uuid: Option<String>,
    pub created: u64,
}

impl Entity for DefinitionEntity {
    const CATEGORY: EntityCategory = EntityCategory::Definitions;
    const CLASS: u8 = 1;

    fn uuid(&self) -> &str {
        &self.uuid
    }
}

impl RoutedEntity for DefinitionEntity {
    const FAMILY: EntityFamily = EntityFamily::Definitions;
}

/// Key/value metadata attached to a definition.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct DefinitionMetadataEntity {
    pub uuid: String,
    pub definition_uuid: String,
    pub name: String,
    pub value: String,
    pub created: u64,
}

impl Entity for DefinitionMetadataEntity {
    const CATEGORY: EntityCategory = EntityCategory::Definitions;
    const CLASS: u8 = 2;

    fn uuid(&self) -> &str {
        &self.uuid
    }
}

impl RoutedEntity for DefinitionMetadataEntity {
    const FAMILY: EntityFamily = EntityFamily::DefinitionMetadata;
}

/// A broker message observed on a topic.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct MessageEntity {
    pub uuid: String,
    pub broker_id: String,
    pub topic: String,
    pub payload: Vec<u8>,
    pub timestamp: u64,
}

impl Entity for MessageEntity {
    const CATEGORY: EntityCategory = EntityCategory::Messages;
    const CLASS: u8 = 1;

    fn uuid(&self) -> &str {
        &self.uuid
    }
}

impl RoutedEntity for MessageEntity {
    const FAMILY: EntityFamily = EntityFamily::Messages;
}
