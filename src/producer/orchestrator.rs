//! Emission Orchestrator Module
//!
//! This module runs the paced producer loops. Each stream emits a fixed
//! number of transactions evenly spread over its run, submits them to
//! the ledger and the audit coordinator, and periodically asks the
//! coordinator to check its threshold trigger.
//!
//! # Pacing
//! Ticks are scheduled against absolute deadlines: every iteration adds
//! the fixed spacing to the previous deadline and sleeps only for the
//! remaining delta, so per-iteration overhead never accumulates into
//! drift. Streams are independent tasks with no cross-stream ordering.

use crate::audit::AuditCoordinator;
use crate::ledger::BankAccount;
use crate::metrics::MetricsCollector;
use crate::producer::TransactionGenerator;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, warn};

/// Per-run emission settings
///
/// Holds the transaction count and run duration only; the per-tick
/// spacing is always derived from them, never stored.
#[derive(Debug, Clone, Copy)]
pub struct ProducerConfig {
    pub count: u32,
    pub interval: Duration,
}

impl ProducerConfig {
    pub fn new(count: u32, interval_seconds: u64) -> Self {
        Self {
            count,
            interval: Duration::from_secs(interval_seconds),
        }
    }

    /// Fixed spacing between ticks: interval divided by count
    pub fn spacing(&self) -> Duration {
        self.interval / self.count.max(1)
    }

    /// How many ticks lie between two threshold-trigger checkpoints
    pub fn checkpoint_every(&self, checkpoints: u32) -> u32 {
        (self.count / checkpoints.max(1)).max(1)
    }
}

/// Drives N independent emission streams into the ledger and coordinator
pub struct EmissionOrchestrator {
    ledger: Arc<BankAccount>,
    coordinator: Arc<AuditCoordinator>,
    metrics: Arc<MetricsCollector>,
    checkpoints: u32,
}

impl EmissionOrchestrator {
    pub fn new(
        ledger: Arc<BankAccount>,
        coordinator: Arc<AuditCoordinator>,
        metrics: Arc<MetricsCollector>,
        checkpoints: u32,
    ) -> Self {
        Self {
            ledger,
            coordinator,
            metrics,
            checkpoints,
        }
    }

    /// Spawn one paced emission loop per generator
    ///
    /// # Returns
    /// The join handles of the spawned streams; aborting them is the
    /// best-effort interruption used by simulation stop
    pub fn start_emit_loops(
        &self,
        generators: Vec<Arc<dyn TransactionGenerator>>,
        config: ProducerConfig,
    ) -> Vec<JoinHandle<()>> {
        debug!(
            streams = generators.len(),
            count = config.count,
            interval_secs = config.interval.as_secs(),
            "starting emission loops"
        );

        generators
            .into_iter()
            .map(|generator| {
                let ledger = Arc::clone(&self.ledger);
                let coordinator = Arc::clone(&self.coordinator);
                let metrics = Arc::clone(&self.metrics);
                let checkpoints = self.checkpoints;
                tokio::spawn(async move {
                    emit_loop(generator, ledger, coordinator, metrics, config, checkpoints).await;
                })
            })
            .collect()
    }
}

/// One emission stream: produce, submit, enqueue, pace
///
/// A failed iteration is logged and counted; the loop continues. The
/// paced sleep is the only suspension point besides the submissions
/// themselves, and it is cancellable by aborting the stream's task.
async fn emit_loop(
    generator: Arc<dyn TransactionGenerator>,
    ledger: Arc<BankAccount>,
    coordinator: Arc<AuditCoordinator>,
    metrics: Arc<MetricsCollector>,
    config: ProducerConfig,
    checkpoints: u32,
) {
    let spacing = config.spacing();
    let check_every = config.checkpoint_every(checkpoints);
    let mut next_tick = Instant::now();
    let mut successful = 0u32;

    for i in 0..config.count {
        let tx = generator.produce();
        metrics.increment_produced();
        metrics.bump_emission_rate();

        match ledger.process_transaction(&tx).await {
            Ok(()) => {
                metrics.increment_submitted();
                coordinator.ingest(tx).await;
                successful += 1;
            }
            Err(e) => {
                warn!(stream = generator.name(), iteration = i, error = %e,
                    "transaction emission failed");
            }
        }

        // Checkpoint: give the coordinator a drain opportunity without
        // paying the threshold check on every tick
        if (i + 1) % check_every == 0 {
            coordinator.flush_if_threshold_met().await;
        }

        next_tick += spacing;
        sleep_until(next_tick).await;
    }

    debug!(
        stream = generator.name(),
        successful, "emission completed"
    );
    metrics.reset_emission_rate();
}
