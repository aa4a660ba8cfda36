//! This crate implements a transaction audit pipeline: signed monetary
//! transactions flow through a ledger into a bounded buffer and are
//! periodically flushed into value-bounded audit batches for downstream
//! submission.

pub mod types; // Defines common data structures and types used throughout the system.
pub mod api; // Handles the external HTTP surface.
pub mod validation; // Contains the amount-range validator.
pub mod ledger; // Manages the running balance and transaction history.
pub mod pool; // Implements the bounded ingestion buffer.
pub mod audit; // Batching engine, flush coordinator and triggers.
pub mod persistence; // Two-phase audit batch store.
pub mod notifier; // Downstream submission sink.
pub mod producer; // Paced emission streams and simulation lifecycle.
pub mod metrics; // Runtime counters and gauges.
pub mod config; // Defines and loads system configuration.

// Re-export commonly used types and configurations for easier access.
pub use types::*;
pub use audit::AuditCoordinator;
pub use config::Config;
