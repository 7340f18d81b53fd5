//! Notification-subscription lifecycle: push consumers, upstream merging,
//! and the per-router subscription table.

mod consumer;
pub use consumer::{ConsumerHandle, EntityConsumer};

mod manager;
pub use manager::{
    DeliveryError, EntityNotification, NotificationKind, NotificationSink, Subscription,
    SubscriptionManager,
};
