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

//! Channel-backed push consumer.
//!
//! A driver keeps the [`ConsumerHandle`] to push batches and hands the
//! [`EntityConsumer`] to the router, which may merge several upstream
//! consumers into one. Ordering is preserved within a single upstream feed;
//! no ordering is guaranteed across merged feeds.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;
use uuid::Uuid;

use crate::observability::events;

const COMPONENT: &str = "consumer";
const DEFAULT_QUEUE_SIZE: usize = 128;

/// Receiving end of a notification feed, identified for logging.
///
/// `recv` yields `None` once every push handle has been dropped and, for a
/// merged consumer, every upstream feed has closed.
pub struct EntityConsumer<T> {
    id: String,
    receiver: mpsc::Receiver<T>,
    forwards: Vec<JoinHandle<()>>,
}

/// Cloneable push side of an [`EntityConsumer`].
pub struct ConsumerHandle<T> {
    sender: mpsc::Sender<T>,
}

impl<T> Clone for ConsumerHandle<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<T> ConsumerHandle<T> {
    /// Pushes one item; returns `false` when the consumer has been dropped.
    pub async fn push(&self, item: T) -> bool {
        self.sender.send(item).await.is_ok()
    }
}

impl<T> EntityConsumer<T> {
    /// Creates a push-handle/consumer pair.
    pub fn channel() -> (ConsumerHandle<T>, EntityConsumer<T>) {
        Self::channel_with_capacity(DEFAULT_QUEUE_SIZE)
    }

    pub fn channel_with_capacity(capacity: usize) -> (ConsumerHandle<T>, EntityConsumer<T>) {
        let (sender, receiver) = mpsc::channel(capacity);
        (
            ConsumerHandle { sender },
            EntityConsumer {
                id: Uuid::new_v4().to_string(),
                receiver,
                forwards: Vec::new(),
            },
        )
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Receives the next item; `None` once the feed has closed.
    pub async fn recv(&mut self) -> Option<T> {
        self.receiver.recv().await
    }
}

impl<T: Send + 'static> EntityConsumer<T> {
    /// Combines several upstream consumers into one.
    ///
    /// A forwarding task per upstream drains it into the merged channel; the
    /// task ends when its upstream closes or the merged consumer is dropped.
    pub fn merge(upstreams: Vec<EntityConsumer<T>>) -> Self {
        let (handle, mut merged) = Self::channel();
        for mut upstream in upstreams {
            let handle = handle.clone();
            let upstream_id = upstream.id.clone();
            merged.forwards.push(tokio::spawn(async move {
                while let Some(item) = upstream.recv().await {
                    if !handle.push(item).await {
                        break;
                    }
                }
                debug!(
                    event = events::CONSUMER_FORWARD_CLOSED,
                    component = COMPONENT,
                    upstream = %upstream_id,
                    "upstream feed closed"
                );
            }));
        }
        merged
    }
}

impl<T> Drop for EntityConsumer<T> {
    fn drop(&mut self) {
        for forward in &self.forwards {
            forward.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::EntityConsumer;

    #[tokio::test]
    async fn push_and_recv_preserve_order() {
        let (handle, mut consumer) = EntityConsumer::channel();

        assert!(handle.push(1u32).await);
        assert!(handle.push(2u32).await);

        assert_eq!(consumer.recv().await, Some(1));
        assert_eq!(consumer.recv().await, Some(2));
    }

    #[tokio::test]
    async fn push_after_consumer_dropped_reports_closed() {
        let (handle, consumer) = EntityConsumer::channel();
        drop(consumer);

        assert!(!handle.push(1u32).await);
    }

    #[tokio::test]
    async fn recv_ends_when_all_handles_are_dropped() {
        let (handle, mut consumer) = EntityConsumer::channel();
        handle.push("last").await;
        drop(handle);

        assert_eq!(consumer.recv().await, Some("last"));
        assert_eq!(consumer.recv().await, None);
    }

    #[tokio::test]
    async fn merge_preserves_order_within_one_upstream_and_closes() {
        let (handle_a, upstream_a) = EntityConsumer::channel();
        let (handle_b, upstream_b) = EntityConsumer::channel();

        let mut merged = EntityConsumer::merge(vec![upstream_a, upstream_b]);
        drop(handle_b);

        handle_a.push("a-1").await;
        handle_a.push("a-2").await;
        drop(handle_a);

        assert_eq!(merged.recv().await, Some("a-1"));
        assert_eq!(merged.recv().await, Some("a-2"));
        assert_eq!(merged.recv().await, None);
    }
}
