//! Telemetry Module
//!
//! Counters and gauges for the audit pipeline. Updates are independent
//! atomic operations; there is no cross-counter transaction.

mod collector;

pub use collector::{MetricsCollector, MetricsSnapshot};
