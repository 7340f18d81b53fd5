//! Canonical structured event names used across `entity-router`.

// Dispatch and target-execution events.
pub const DISPATCH_START: &str = "dispatch_start";
pub const DISPATCH_OK: &str = "dispatch_ok";
pub const DISPATCH_FAILED: &str = "dispatch_failed";
pub const DISPATCH_NO_ROUTE: &str = "dispatch_no_route";
pub const TARGET_FAILED: &str = "target_failed";
pub const TARGET_FALLBACK_NEXT: &str = "target_fallback_next";

// Deferred-option processing events.
pub const OPTION_PROCESS_START: &str = "option_process_start";
pub const OPTION_PROCESS_FAILED: &str = "option_process_failed";

// Notification-subscription lifecycle events.
pub const SUBSCRIPTION_CREATED: &str = "subscription_created";
pub const SUBSCRIPTION_REMOVED: &str = "subscription_removed";
pub const SUBSCRIPTION_MISSING: &str = "subscription_missing";
pub const SUBSCRIPTION_DELIVERY_FAILED: &str = "subscription_delivery_failed";
pub const SUBSCRIPTION_FEED_CLOSED: &str = "subscription_feed_closed";

// Consumer merge/forwarding events.
pub const CONSUMER_FORWARD_CLOSED: &str = "consumer_forward_closed";

// Router assembly events.
pub const ROUTER_BUILD_OK: &str = "router_build_ok";
pub const ROUTER_CHILD_LINKED: &str = "router_child_linked";
pub const ROUTER_DRIVER_BOUND: &str = "router_driver_bound";
