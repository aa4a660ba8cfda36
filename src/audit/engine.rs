//! Batching Engine Module
//!
//! This module partitions a drained transaction list into disjoint
//! sub-batches whose totals of absolute values stay under the configured
//! ceiling, heuristically minimizing the sub-batch count.

use crate::config::AuditConfig;
use crate::{AuditBatch, AuditError, Money, Transaction};
use uuid::Uuid;

/// Batching strategy selected at construction from configuration
///
/// Both variants run the same canonical placement: a descending stable
/// sort by absolute value followed by first-fit. The greedy variant of
/// the heuristic is behaviorally identical and kept only as a named
/// configuration choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchingStrategy {
    FirstFitDecreasing,
    Greedy,
}

impl BatchingStrategy {
    /// Parse a strategy name from configuration
    ///
    /// Accepts `"first-fit-decreasing"` and `"greedy"`; anything else
    /// falls back to first-fit-decreasing.
    pub fn from_name(name: &str) -> Self {
        match name {
            "greedy" => BatchingStrategy::Greedy,
            _ => BatchingStrategy::FirstFitDecreasing,
        }
    }
}

/// Value-bounded bin-packing engine
///
/// # Contract
/// Given an unordered transaction list and the value ceiling, produce
/// disjoint sub-batches covering every input exactly once, each with a
/// total absolute value at or under the ceiling.
pub struct BatchingEngine {
    value_limit: Money,
    strategy: BatchingStrategy,
}

impl BatchingEngine {
    pub fn new(config: &AuditConfig) -> Self {
        Self {
            value_limit: Money::new(config.max_batch_value),
            strategy: BatchingStrategy::from_name(&config.strategy),
        }
    }

    pub fn with_limit(value_limit: Money, strategy: BatchingStrategy) -> Self {
        Self {
            value_limit,
            strategy,
        }
    }

    pub fn value_limit(&self) -> Money {
        self.value_limit
    }

    pub fn strategy(&self) -> BatchingStrategy {
        self.strategy
    }

    /// Partition transactions into value-bounded sub-batches
    ///
    /// First-fit-decreasing: sort descending by absolute value (stable,
    /// ties keep their relative order), then place each transaction into
    /// the first sub-batch it fits; open a new sub-batch when none fits.
    ///
    /// # Returns
    /// * `Ok(vec![])` for empty input
    /// * `Err(AuditError::TransactionExceedsCeiling)` if any single
    ///   transaction's absolute value is above the ceiling — upstream
    ///   validation is expected to prevent this, so it is surfaced as an
    ///   explicit error rather than guessed around
    /// * `Ok(batches)` otherwise, each with a fresh collision-free id
    pub fn group_into_batches(
        &self,
        transactions: Vec<Transaction>,
    ) -> Result<Vec<AuditBatch>, AuditError> {
        if transactions.is_empty() {
            return Ok(Vec::new());
        }

        if let Some(oversized) = transactions
            .iter()
            .find(|tx| tx.absolute_value() > self.value_limit)
        {
            return Err(AuditError::TransactionExceedsCeiling {
                id: oversized.id,
                value: oversized.absolute_value(),
                limit: self.value_limit,
            });
        }

        // Descending stable sort by absolute value
        let mut sorted = transactions;
        sorted.sort_by(|a, b| b.absolute_value().cmp(&a.absolute_value()));

        // First-fit placement with running totals
        let mut raw_batches: Vec<Vec<Transaction>> = Vec::new();
        let mut batch_totals: Vec<Money> = Vec::new();

        for tx in sorted {
            let tx_value = tx.absolute_value();
            let slot = batch_totals
                .iter()
                .position(|total| *total + tx_value <= self.value_limit);

            match slot {
                Some(i) => {
                    batch_totals[i] = batch_totals[i] + tx_value;
                    raw_batches[i].push(tx);
                }
                None => {
                    batch_totals.push(tx_value);
                    raw_batches.push(vec![tx]);
                }
            }
        }

        raw_batches
            .into_iter()
            .map(|batch| {
                let batch_id = format!("batch-{}", Uuid::new_v4());
                AuditBatch::new(batch_id, batch, self.value_limit)
            })
            .collect()
    }
}
