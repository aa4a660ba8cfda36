//! Audit Pipeline Module
//!
//! This module contains the two halves of the audit core:
//! - BatchingEngine: partitions drained transactions into value-bounded
//!   sub-batches
//! - AuditCoordinator: bounded ingestion plus threshold/timeout-triggered
//!   flush cycles connecting the engine, the batch store and the notifier

mod coordinator;
mod engine;
mod trigger;


pub use coordinator::{AuditCoordinator, IngestOutcome};
pub use engine::{BatchingEngine, BatchingStrategy};
pub use trigger::FlushTrigger;
