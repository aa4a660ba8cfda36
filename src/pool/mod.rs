//! Transaction Queue Module
//!
//! This module implements the bounded ingestion buffer that sits between
//! the emission streams and the flush coordinator.

mod bounded_queue;

pub use bounded_queue::BoundedQueue;
