//! Flush Coordinator Module
//!
//! This module implements the ingestion and flush coordination engine.
//! Transactions arrive through a bounded buffer; two independent triggers
//! (threshold and timeout) feed one guarded flush function, and at most
//! one flush cycle runs at a time.
//!
//! # Flush cycle
//! 1. Drain up to the submission limit in FIFO order
//! 2. Persist the raw drained list as pending (phase 1)
//! 3. Partition into value-bounded sub-batches via the batching engine
//! 4. Submit the sub-batches to the notifier
//! 5. Mark the persisted batch submitted (phase 2)
//!
//! A failure anywhere in the cycle is logged and the guard released;
//! drained transactions are not re-enqueued. The pending marker left by
//! phase 1 is the only recovery handle.

use crate::audit::{BatchingEngine, FlushTrigger};
use crate::config::AuditConfig;
use crate::metrics::MetricsCollector;
use crate::notifier::AuditNotifier;
use crate::persistence::AuditBatchStore;
use crate::pool::BoundedQueue;
use crate::Transaction;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval, Instant};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// Result of a single ingestion attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestOutcome {
    Accepted,
    /// The buffer was full; the transaction was recorded under a drop id
    /// and will not enter any flush cycle
    Dropped,
}

/// Ingestion and flush coordinator
///
/// Owns the bounded buffer and the single-slot flush guard. Shared
/// behind `Arc` between the API surface, the emission streams and the
/// periodic flush timer.
pub struct AuditCoordinator {
    queue: BoundedQueue,
    engine: BatchingEngine,
    store: Arc<dyn AuditBatchStore>,
    notifier: Arc<dyn AuditNotifier>,
    metrics: Arc<MetricsCollector>,
    submission_limit: usize,
    flush_interval: Duration,
    /// Single-slot mutual exclusion: true while a flush cycle is running
    flushing: AtomicBool,
}

impl AuditCoordinator {
    pub fn new(
        config: &AuditConfig,
        store: Arc<dyn AuditBatchStore>,
        notifier: Arc<dyn AuditNotifier>,
        metrics: Arc<MetricsCollector>,
    ) -> Self {
        info!(
            queue_capacity = config.queue_capacity,
            submission_limit = config.submission_limit,
            flush_interval_ms = config.flush_interval_ms,
            "audit coordinator initialized"
        );

        Self {
            queue: BoundedQueue::new(config.queue_capacity),
            engine: BatchingEngine::new(config),
            store,
            notifier,
            metrics,
            submission_limit: config.submission_limit,
            flush_interval: Duration::from_millis(config.flush_interval_ms),
            flushing: AtomicBool::new(false),
        }
    }

    /// Accept a transaction and conditionally trigger a flush
    ///
    /// Never blocks the caller. On a full buffer the transaction is
    /// dropped: it is persisted under a distinct drop id, the drop
    /// counter is incremented, and `Dropped` is returned.
    pub async fn ingest(self: &Arc<Self>, tx: Transaction) -> IngestOutcome {
        debug!(id = %tx.id, "ingesting transaction");
        let accepted = self.queue.offer(tx.clone()).await;
        self.metrics.update_queue_size(self.queue.len().await);

        if !accepted {
            warn!(id = %tx.id, "queue saturated, dropping transaction");
            self.persist_dropped(tx);
            self.metrics.increment_dropped();
            return IngestOutcome::Dropped;
        }

        self.flush_if_threshold_met().await;
        IngestOutcome::Accepted
    }

    /// Threshold trigger: flush when the buffer reached the submission limit
    pub async fn flush_if_threshold_met(self: &Arc<Self>) {
        self.try_flush(FlushTrigger::Threshold).await;
    }

    /// Start the timeout trigger
    ///
    /// Fires on a fixed period and flushes whenever the buffer is
    /// non-empty, bounding latency under low throughput. The returned
    /// handle lets shutdown abort the timer.
    pub fn spawn_flush_timer(self: &Arc<Self>) -> JoinHandle<()> {
        let coordinator = Arc::clone(self);
        tokio::spawn(async move {
            let mut ticker = interval(coordinator.flush_interval);
            // The first tick completes immediately
            ticker.tick().await;
            loop {
                ticker.tick().await;
                coordinator.try_flush(FlushTrigger::Timeout).await;
            }
        })
    }

    /// Guarded flush entry point shared by both triggers
    ///
    /// A trigger that finds a flush already in flight is a no-op; it does
    /// not queue or retry. The next trigger catches any remaining backlog.
    async fn try_flush(self: &Arc<Self>, trigger: FlushTrigger) {
        let queue_len = self.queue.len().await;
        let should_flush = match trigger {
            FlushTrigger::Threshold => queue_len >= self.submission_limit,
            FlushTrigger::Timeout => queue_len > 0,
        };

        if !should_flush {
            return;
        }

        if self
            .flushing
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!(%trigger, "flush already in flight, skipping");
            return;
        }

        debug!(%trigger, queue_len, "flush trigger fired");
        let coordinator = Arc::clone(self);
        tokio::spawn(async move {
            coordinator.run_flush_cycle().await;
        });
    }

    /// One guarded flush cycle; the guard is released on every exit path
    async fn run_flush_cycle(self: Arc<Self>) {
        let started = Instant::now();

        if let Err(e) = self.flush_cycle_inner().await {
            error!(error = %e, "audit cycle failure");
        }

        self.flushing.store(false, Ordering::Release);
        self.metrics.record_flush_latency(started.elapsed());
        debug!("flush cycle completed, guard released");
    }

    async fn flush_cycle_inner(&self) -> anyhow::Result<()> {
        let drained = self.queue.drain(self.submission_limit).await;
        self.metrics.update_queue_size(self.queue.len().await);

        if drained.is_empty() {
            debug!("no transactions to process, skipping cycle");
            return Ok(());
        }

        let cycle_id = Uuid::new_v4().to_string();
        info!(
            batch_id = %cycle_id,
            transactions = drained.len(),
            "persisting audit batch"
        );
        self.store.save(&cycle_id, drained.clone())?;

        let batches = self.engine.group_into_batches(drained)?;
        info!(sub_batches = batches.len(), "grouped for submission");
        self.notifier.submit(&batches);

        self.store.mark_submitted(&cycle_id)?;
        info!(batch_id = %cycle_id, "audit batch submitted");
        Ok(())
    }

    /// Record a transaction rejected at ingestion under a distinct drop id
    ///
    /// A persistence failure here is logged only; the transaction is lost.
    fn persist_dropped(&self, tx: Transaction) {
        let drop_id = format!("dropped-{}", Uuid::new_v4());
        if let Err(e) = self.store.save(&drop_id, vec![tx]) {
            error!(%drop_id, error = %e, "failed to persist dropped transaction");
        }
    }

    pub async fn queue_len(&self) -> usize {
        self.queue.len().await
    }

    pub fn dropped_count(&self) -> u64 {
        self.metrics.dropped_count()
    }

    pub fn store(&self) -> &Arc<dyn AuditBatchStore> {
        &self.store
    }
}
