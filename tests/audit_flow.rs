//! End-to-end audit flow: emission streams feed the ledger and the
//! coordinator, the triggers flush, and every emitted transaction ends
//! up in exactly one submitted value-bounded sub-batch.

use auditflow::audit::AuditCoordinator;
use auditflow::config::{AuditConfig, TransactionConfig};
use auditflow::ledger::BankAccount;
use auditflow::metrics::MetricsCollector;
use auditflow::notifier::AuditNotifier;
use auditflow::persistence::{AuditBatchStore, InMemoryBatchStore};
use auditflow::producer::{
    CreditGenerator, DebitGenerator, EmissionOrchestrator, ProducerConfig, TransactionGenerator,
};
use auditflow::{AuditBatch, Money};
use rust_decimal::Decimal;
use std::sync::{Arc, Mutex};
use std::time::Duration;

struct CapturingNotifier {
    batches: Mutex<Vec<AuditBatch>>,
    metrics: Arc<MetricsCollector>,
}

impl CapturingNotifier {
    fn new(metrics: Arc<MetricsCollector>) -> Self {
        Self {
            batches: Mutex::new(Vec::new()),
            metrics,
        }
    }

    fn submitted_tx_count(&self) -> usize {
        self.batches
            .lock()
            .unwrap()
            .iter()
            .map(|b| b.transaction_count())
            .sum()
    }
}

impl AuditNotifier for CapturingNotifier {
    fn submit(&self, batches: &[AuditBatch]) {
        self.metrics.record_submission(batches);
        self.batches.lock().unwrap().extend_from_slice(batches);
    }
}

#[tokio::test]
async fn emitted_transactions_flow_into_submitted_batches() {
    let transaction_config = TransactionConfig {
        min_amount: Decimal::from(200),
        max_amount: Decimal::from(500_000),
        default_balance: Decimal::ZERO,
    };
    let audit_config = AuditConfig {
        queue_capacity: 10_000,
        submission_limit: 1_000,
        flush_interval_ms: 100,
        max_batch_value: Decimal::from(1_000_000),
        strategy: "first-fit-decreasing".to_string(),
    };

    let metrics = Arc::new(MetricsCollector::new());
    let store = Arc::new(InMemoryBatchStore::new());
    let notifier = Arc::new(CapturingNotifier::new(metrics.clone()));
    let coordinator = Arc::new(AuditCoordinator::new(
        &audit_config,
        store.clone(),
        notifier.clone(),
        metrics.clone(),
    ));
    let ledger = Arc::new(BankAccount::new(&transaction_config, metrics.clone()));

    // Timeout trigger picks up whatever the threshold trigger leaves behind
    let timer = coordinator.spawn_flush_timer();

    let orchestrator = EmissionOrchestrator::new(
        ledger.clone(),
        coordinator.clone(),
        metrics.clone(),
        5,
    );
    let generators: Vec<Arc<dyn TransactionGenerator>> = vec![
        Arc::new(CreditGenerator::new(transaction_config.clone())),
        Arc::new(DebitGenerator::new(transaction_config)),
    ];
    let handles = orchestrator.start_emit_loops(generators, ProducerConfig::new(600, 1));
    for handle in handles {
        handle.await.unwrap();
    }

    // All 1200 emitted transactions are eventually drained and submitted
    let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
    while notifier.submitted_tx_count() < 1_200 && tokio::time::Instant::now() < deadline {
        tokio::time::sleep(Duration::from_millis(25)).await;
    }
    timer.abort();

    assert_eq!(notifier.submitted_tx_count(), 1_200);
    assert_eq!(coordinator.queue_len().await, 0);
    assert_eq!(coordinator.dropped_count(), 0);

    // Two-phase persistence completed for every cycle
    assert!(store.find_pending().is_empty());

    // Every sub-batch respects the value ceiling
    let ceiling = Money::from_units(1_000_000);
    for batch in notifier.batches.lock().unwrap().iter() {
        assert!(batch.total_value() <= ceiling);
        assert!(batch.transaction_count() > 0);
    }

    let snapshot = metrics.snapshot();
    assert_eq!(snapshot.produced_tx, 1_200);
    assert_eq!(snapshot.submitted_tx, 1_200);
    assert_eq!(snapshot.audited_transactions, 1_200);
}
