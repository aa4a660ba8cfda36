//! Bounded Queue Module
//!
//! This module implements a capacity-bounded FIFO buffer for transactions
//! awaiting a flush cycle. Offers and drains are non-blocking: a full
//! buffer rejects the offer immediately instead of making the caller wait.

use crate::Transaction;
use std::collections::VecDeque;
use tokio::sync::RwLock;

/// Bounded FIFO buffer of pending transactions
///
/// Uses VecDeque for efficient insertion at the back and removal from the
/// front. Protected by RwLock for concurrent access from many producer
/// streams and the flush triggers.
pub struct BoundedQueue {
    transactions: RwLock<VecDeque<Transaction>>,
    capacity: usize,
}

impl BoundedQueue {
    /// Creates a new empty queue with the given capacity
    pub fn new(capacity: usize) -> Self {
        Self {
            transactions: RwLock::new(VecDeque::with_capacity(capacity)),
            capacity,
        }
    }

    /// Offer a transaction without blocking
    ///
    /// # Returns
    /// `true` if the transaction was enqueued, `false` if the buffer is
    /// at capacity. The caller decides what to do with a rejected
    /// transaction; the queue never waits for space.
    pub async fn offer(&self, tx: Transaction) -> bool {
        let mut txs = self.transactions.write().await;
        if txs.len() >= self.capacity {
            return false;
        }
        txs.push_back(tx);
        true
    }

    /// Remove and return up to `max` transactions from the front (FIFO)
    pub async fn drain(&self, max: usize) -> Vec<Transaction> {
        let mut txs = self.transactions.write().await;
        let take = max.min(txs.len());
        txs.drain(..take).collect()
    }

    pub async fn len(&self) -> usize {
        self.transactions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.transactions.read().await.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
