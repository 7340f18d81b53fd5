//! Structured-event vocabulary shared across the crate.
//!
//! Library code emits `tracing` events with these names and never installs a
//! global subscriber; binaries and tests own one-time subscriber
//! initialization at process boundaries.

pub mod events;
