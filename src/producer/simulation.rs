//! Simulation Lifecycle Module
//!
//! Start/stop wrapper around the emission orchestrator. A run launches
//! one credit-biased and one debit-biased stream plus a periodic metrics
//! logger; stop aborts whatever is still in flight and logs a final
//! snapshot.

use crate::config::{ProducerSettings, TransactionConfig};
use crate::metrics::MetricsCollector;
use crate::producer::{
    CreditGenerator, DebitGenerator, EmissionOrchestrator, ProducerConfig, TransactionGenerator,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::info;

const METRICS_LOG_PERIOD: Duration = Duration::from_secs(10);

pub struct SimulationManager {
    orchestrator: EmissionOrchestrator,
    transaction_config: TransactionConfig,
    producer_settings: ProducerSettings,
    metrics: Arc<MetricsCollector>,
    /// Handles of in-flight emission streams and the metrics timer
    running: Mutex<Vec<JoinHandle<()>>>,
}

impl SimulationManager {
    pub fn new(
        orchestrator: EmissionOrchestrator,
        transaction_config: TransactionConfig,
        producer_settings: ProducerSettings,
        metrics: Arc<MetricsCollector>,
    ) -> Self {
        Self {
            orchestrator,
            transaction_config,
            producer_settings,
            metrics,
            running: Mutex::new(Vec::new()),
        }
    }

    /// Start a simulation run with the given count and duration, falling
    /// back to the configured defaults when the caller passes none
    pub async fn start(&self, count: Option<u32>, interval_seconds: Option<u64>) {
        let count = count.unwrap_or(self.producer_settings.count);
        let interval_seconds = interval_seconds.unwrap_or(self.producer_settings.interval_seconds);
        info!(count, interval_seconds, "starting simulation");

        let config = ProducerConfig::new(count, interval_seconds);
        let generators: Vec<Arc<dyn TransactionGenerator>> = vec![
            Arc::new(CreditGenerator::new(self.transaction_config.clone())),
            Arc::new(DebitGenerator::new(self.transaction_config.clone())),
        ];

        let mut handles = self.orchestrator.start_emit_loops(generators, config);

        let metrics = Arc::clone(&self.metrics);
        handles.push(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(METRICS_LOG_PERIOD);
            ticker.tick().await;
            loop {
                ticker.tick().await;
                metrics.log_runtime_metrics();
            }
        }));

        let mut running = self.running.lock().await;
        // A second start while a run is active layers new streams on top;
        // stop() clears everything either way
        running.extend(handles);
    }

    /// Abort in-flight emission loops and the metrics timer, then log a
    /// final snapshot
    pub async fn stop(&self) {
        info!("stopping simulation");
        let mut running = self.running.lock().await;
        for handle in running.drain(..) {
            handle.abort();
        }
        self.metrics.log_runtime_metrics();
    }
}
