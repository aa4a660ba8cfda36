use crate::{AuditBatch, TransactionOutcome};
use serde::Serialize;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Collects runtime metrics for the audit pipeline
///
/// Every update is a single atomic operation, safe to call from any
/// task. Flush latency is tracked as a running sum and sample count so
/// the snapshot can report an average without holding samples.
#[derive(Default)]
pub struct MetricsCollector {
    queue_size: AtomicUsize,
    accepted_tx: AtomicU64,
    invalid_tx: AtomicU64,
    dropped_tx: AtomicU64,
    produced_tx: AtomicU64,
    submitted_tx: AtomicU64,
    emission_rate: AtomicU64,
    audit_batches: AtomicU64,
    audited_transactions: AtomicU64,
    flush_latency_micros: AtomicU64,
    flush_samples: AtomicU64,
}

/// Point-in-time view of all counters, served by the metrics endpoint
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    pub queue_size: usize,
    pub accepted_tx: u64,
    pub invalid_tx: u64,
    pub dropped_tx: u64,
    pub produced_tx: u64,
    pub submitted_tx: u64,
    pub emission_rate: u64,
    pub audit_batches: u64,
    pub audited_transactions: u64,
    pub average_flush_latency_ms: f64,
}

impl MetricsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update_queue_size(&self, size: usize) {
        self.queue_size.store(size, Ordering::Relaxed);
        debug!(size, "queue size updated");
    }

    pub fn increment_dropped(&self) {
        self.dropped_tx.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_produced(&self) {
        self.produced_tx.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_submitted(&self) {
        self.submitted_tx.fetch_add(1, Ordering::Relaxed);
    }

    /// Instantaneous emission rate gauge, bumped per tick and reset when
    /// a stream completes
    pub fn bump_emission_rate(&self) {
        self.emission_rate.fetch_add(1, Ordering::Relaxed);
    }

    pub fn reset_emission_rate(&self) {
        self.emission_rate.store(0, Ordering::Relaxed);
    }

    pub fn record_outcome(&self, outcome: &TransactionOutcome) {
        match outcome {
            TransactionOutcome::Accepted(tx) => {
                self.accepted_tx.fetch_add(1, Ordering::Relaxed);
                debug!(id = %tx.id, amount = %tx.amount, "transaction accepted");
            }
            TransactionOutcome::Invalid { transaction, reason } => {
                self.invalid_tx.fetch_add(1, Ordering::Relaxed);
                let id = transaction
                    .as_ref()
                    .map(|t| t.id.to_string())
                    .unwrap_or_else(|| "N/A".to_string());
                warn!(%id, %reason, "transaction invalid");
            }
        }
    }

    pub fn record_submission(&self, batches: &[AuditBatch]) {
        self.audit_batches
            .fetch_add(batches.len() as u64, Ordering::Relaxed);
        let tx_count: usize = batches.iter().map(|b| b.transaction_count()).sum();
        self.audited_transactions
            .fetch_add(tx_count as u64, Ordering::Relaxed);
        info!(batches = batches.len(), transactions = tx_count, "audit submission recorded");
    }

    pub fn record_flush_latency(&self, latency: Duration) {
        self.flush_latency_micros
            .fetch_add(latency.as_micros() as u64, Ordering::Relaxed);
        self.flush_samples.fetch_add(1, Ordering::Relaxed);
    }

    pub fn dropped_count(&self) -> u64 {
        self.dropped_tx.load(Ordering::Relaxed)
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let samples = self.flush_samples.load(Ordering::Relaxed);
        let average_flush_latency_ms = if samples == 0 {
            0.0
        } else {
            self.flush_latency_micros.load(Ordering::Relaxed) as f64 / samples as f64 / 1000.0
        };

        MetricsSnapshot {
            queue_size: self.queue_size.load(Ordering::Relaxed),
            accepted_tx: self.accepted_tx.load(Ordering::Relaxed),
            invalid_tx: self.invalid_tx.load(Ordering::Relaxed),
            dropped_tx: self.dropped_tx.load(Ordering::Relaxed),
            produced_tx: self.produced_tx.load(Ordering::Relaxed),
            submitted_tx: self.submitted_tx.load(Ordering::Relaxed),
            emission_rate: self.emission_rate.load(Ordering::Relaxed),
            audit_batches: self.audit_batches.load(Ordering::Relaxed),
            audited_transactions: self.audited_transactions.load(Ordering::Relaxed),
            average_flush_latency_ms,
        }
    }

    /// Log a one-line-per-metric snapshot, used by the periodic runtime
    /// metrics timer and the final snapshot on shutdown
    pub fn log_runtime_metrics(&self) {
        let snap = self.snapshot();
        info!("metrics snapshot");
        info!(" - queue size: {}", snap.queue_size);
        info!(" - dropped tx: {}", snap.dropped_tx);
        info!(" - accepted tx: {}", snap.accepted_tx);
        info!(" - invalid tx: {}", snap.invalid_tx);
        info!(" - audit submissions: {}", snap.audit_batches);
        info!(" - audited transactions: {}", snap.audited_transactions);
        info!(
            " - average flush latency: {:.2} ms",
            snap.average_flush_latency_ms
        );
    }
}
