//! Batch Persistence Module
//!
//! Two-phase store for audit batches: `save` records the drained
//! transactions as pending, `mark_submitted` flips them once the
//! notifier accepted them. The storage technology behind the contract
//! is deliberately unspecified; an in-memory store ships by default.

mod store;

pub use store::{AuditBatchStore, InMemoryBatchStore};
