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

//! Live subscription table and notification delivery.
//!
//! Tracks active subscriptions keyed by generated id and owns one delivery
//! task per subscription, converting upstream entity batches into
//! entity-change notifications filtered against the subscription's query
//! filter. Delivery is at-least-once while the subscription stays
//! registered; a failed delivery attempt is logged and the subscription
//! remains active.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::entities::{Entity, EntityRef};
use crate::observability::events;
use crate::routing::is_match;
use crate::subscriptions::EntityConsumer;

const COMPONENT: &str = "subscriptions";

/// What happened to the entity a notification refers to.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NotificationKind {
    Created,
    Changed,
    Deleted,
}

/// One entity-change notification.
#[derive(Clone, Debug)]
pub struct EntityNotification {
    pub kind: NotificationKind,
    pub entity: EntityRef,
}

impl EntityNotification {
    pub fn changed(entity: EntityRef) -> Self {
        Self {
            kind: NotificationKind::Changed,
            entity,
        }
    }
}

/// A single delivery attempt to a consumer failed.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct DeliveryError {
    pub message: String,
}

/// Push endpoint receiving batches of entity-change notifications.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn notify(&self, batch: Vec<EntityNotification>) -> Result<(), DeliveryError>;
}

/// Caller-visible subscription record.
#[derive(Clone, Debug)]
pub struct Subscription {
    pub id: String,
    pub filter: String,
}

struct SubscriptionEntry {
    filter: String,
    delivery: JoinHandle<()>,
}

/// Table of live subscriptions; add/remove are atomic with respect to each
/// other and to teardown.
pub struct SubscriptionManager {
    subscriptions: Mutex<HashMap<String, SubscriptionEntry>>,
}

impl SubscriptionManager {
    pub(crate) fn new() -> Self {
        Self {
            subscriptions: Mutex::new(HashMap::new()),
        }
    }

    /// Registers a subscription over an already-resolved upstream feed and
    /// spawns its delivery task.
    pub(crate) async fn register<E: Entity>(
        &self,
        filter: String,
        sink: Arc<dyn NotificationSink>,
        feed: EntityConsumer<Vec<E>>,
    ) -> Subscription {
        let id = Uuid::new_v4().to_string();
        let delivery = tokio::spawn(deliver(id.clone(), filter.clone(), sink, feed));

        let mut subscriptions = self.subscriptions.lock().await;
        subscriptions.insert(
            id.clone(),
            SubscriptionEntry {
                filter: filter.clone(),
                delivery,
            },
        );
        debug!(
            event = events::SUBSCRIPTION_CREATED,
            component = COMPONENT,
            subscription_id = %id,
            filter = %filter,
            "subscription registered"
        );

        Subscription { id, filter }
    }

    /// Cancels a subscription: deregisters the delivery task and releases the
    /// consumer. Unknown ids are a no-op, so double-unsubscribe never errors.
    pub async fn unsubscribe(&self, id: &str) {
        let removed = {
            let mut subscriptions = self.subscriptions.lock().await;
            subscriptions.remove(id)
        };
        match removed {
            Some(entry) => {
                entry.delivery.abort();
                debug!(
                    event = events::SUBSCRIPTION_REMOVED,
                    component = COMPONENT,
                    subscription_id = %id,
                    filter = %entry.filter,
                    "subscription removed"
                );
            }
            None => {
                debug!(
                    event = events::SUBSCRIPTION_MISSING,
                    component = COMPONENT,
                    subscription_id = %id,
                    "unsubscribe for unknown id ignored"
                );
            }
        }
    }

    /// Number of live subscriptions.
    pub async fn active_count(&self) -> usize {
        self.subscriptions.lock().await.len()
    }
}

impl Drop for SubscriptionManager {
    fn drop(&mut self) {
        if let Ok(mut subscriptions) = self.subscriptions.try_lock() {
            for entry in subscriptions.values() {
                entry.delivery.abort();
            }
            subscriptions.clear();
        }
    }
}

async fn deliver<E: Entity>(
    subscription_id: String,
    filter: String,
    sink: Arc<dyn NotificationSink>,
    mut feed: EntityConsumer<Vec<E>>,
) {
    while let Some(batch) = feed.recv().await {
        let notifications: Vec<EntityNotification> = batch
            .iter()
            .filter(|entity| is_match(&filter, entity.uuid()))
            .map(|entity| EntityNotification::changed(entity.entity_ref()))
            .collect();
        if notifications.is_empty() {
            continue;
        }
        if let Err(err) = sink.notify(notifications).await {
            warn!(
                event = events::SUBSCRIPTION_DELIVERY_FAILED,
                component = COMPONENT,
                subscription_id = %subscription_id,
                err = %err,
                "delivery attempt failed, subscription stays active"
            );
        }
    }
    debug!(
        event = events::SUBSCRIPTION_FEED_CLOSED,
        component = COMPONENT,
        subscription_id = %subscription_id,
        "upstream feed closed"
    );
}

#[cfg(test)]
mod tests {
    use super::{DeliveryError, EntityNotification, NotificationSink, SubscriptionManager};
    use crate::entities::SourceEntity;
    use crate::subscriptions::EntityConsumer;
    use async_trait::async_trait;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    struct RecordingSink {
        batches: Mutex<Vec<Vec<EntityNotification>>>,
    }

    impl RecordingSink {
        fn new() -> Self {
            Self {
                batches: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl NotificationSink for RecordingSink {
        async fn notify(&self, batch: Vec<EntityNotification>) -> Result<(), DeliveryError> {
            self.batches.lock().await.push(batch);
            Ok(())
        }
    }

    fn source(uuid: &str) -> SourceEntity {
        SourceEntity {
            uuid: uuid.to_string(),
            parent_uuid: None,
            kind: "test".to_string(),
            created: 0,
        }
    }

    #[tokio::test]
    async fn delivers_filtered_batches_to_the_sink() {
        let manager = SubscriptionManager::new();
        let sink = Arc::new(RecordingSink::new());
        let (handle, feed) = EntityConsumer::channel();

        manager
            .register("source-*".to_string(), sink.clone(), feed)
            .await;

        handle
            .push(vec![source("source-1"), source("other-1")])
            .await;
        drop(handle);

        tokio::time::sleep(std::time::Duration::from_millis(20)).await;

        let batches = sink.batches.lock().await;
        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0].len(), 1);
        assert_eq!(batches[0][0].entity.uuid, "source-1");
    }

    #[tokio::test]
    async fn unsubscribe_twice_is_a_no_op() {
        let manager = SubscriptionManager::new();
        let sink = Arc::new(RecordingSink::new());
        let (_handle, feed) = EntityConsumer::<Vec<SourceEntity>>::channel();

        let subscription = manager.register("*".to_string(), sink, feed).await;
        assert_eq!(manager.active_count().await, 1);

        manager.unsubscribe(&subscription.id).await;
        assert_eq!(manager.active_count().await, 0);

        manager.unsubscribe(&subscription.id).await;
        assert_eq!(manager.active_count().await, 0);
    }

    #[tokio::test]
    async fn failed_delivery_keeps_the_subscription_active() {
        struct FailingSink;

        #[async_trait]
        impl NotificationSink for FailingSink {
            async fn notify(
                &self,
                _batch: Vec<EntityNotification>,
            ) -> Result<(), DeliveryError> {
                Err(DeliveryError {
                    message: "consumer endpoint unavailable".to_string(),
                })
            }
        }

        let manager = SubscriptionManager::new();
        let (handle, feed) = EntityConsumer::channel();

        manager
            .register("*".to_string(), Arc::new(FailingSink), feed)
            .await;

        handle.push(vec![source("source-1")]).await;
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;

        assert_eq!(manager.active_count().await, 1);
    }
}
