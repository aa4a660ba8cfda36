//! Tests for emission pacing and stream behavior

#[cfg(test)]
mod tests {
    use crate::audit::AuditCoordinator;
    use crate::config::{AuditConfig, TransactionConfig};
    use crate::ledger::BankAccount;
    use crate::metrics::MetricsCollector;
    use crate::notifier::AuditNotifier;
    use crate::persistence::InMemoryBatchStore;
    use crate::producer::{
        CreditGenerator, DebitGenerator, EmissionOrchestrator, ProducerConfig,
        TransactionGenerator,
    };
    use crate::{AuditBatch, Money, Transaction, TransactionId};
    use rust_decimal::Decimal;
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::time::Duration;

    struct SilentNotifier;

    impl AuditNotifier for SilentNotifier {
        fn submit(&self, _batches: &[AuditBatch]) {}
    }

    fn transaction_config() -> TransactionConfig {
        TransactionConfig {
            min_amount: Decimal::from(200),
            max_amount: Decimal::from(500_000),
            default_balance: Decimal::ZERO,
        }
    }

    struct Fixture {
        ledger: Arc<BankAccount>,
        coordinator: Arc<AuditCoordinator>,
        metrics: Arc<MetricsCollector>,
    }

    fn fixture() -> Fixture {
        let metrics = Arc::new(MetricsCollector::new());
        let audit_config = AuditConfig {
            queue_capacity: 10_000,
            submission_limit: 10_000,
            flush_interval_ms: 60_000,
            max_batch_value: Decimal::from(1_000_000),
            strategy: "first-fit-decreasing".to_string(),
        };
        let coordinator = Arc::new(AuditCoordinator::new(
            &audit_config,
            Arc::new(InMemoryBatchStore::new()),
            Arc::new(SilentNotifier),
            metrics.clone(),
        ));
        let ledger = Arc::new(BankAccount::new(&transaction_config(), metrics.clone()));
        Fixture {
            ledger,
            coordinator,
            metrics,
        }
    }

    #[test]
    fn spacing_is_derived_from_count_and_interval() {
        let config = ProducerConfig::new(10, 1);
        assert_eq!(config.spacing(), Duration::from_millis(100));

        let config = ProducerConfig::new(25, 25);
        assert_eq!(config.spacing(), Duration::from_secs(1));

        // Zero count must not divide by zero
        let config = ProducerConfig::new(0, 5);
        assert_eq!(config.spacing(), Duration::from_secs(5));
    }

    #[test]
    fn checkpoint_interval_covers_degenerate_inputs() {
        let config = ProducerConfig::new(10, 1);
        assert_eq!(config.checkpoint_every(5), 2);
        assert_eq!(config.checkpoint_every(0), 10);

        let config = ProducerConfig::new(3, 1);
        // More checkpoints than ticks collapses to every tick
        assert_eq!(config.checkpoint_every(10), 1);
    }

    #[tokio::test]
    async fn two_streams_fill_queue_without_duplicate_ids() {
        let fx = fixture();
        let orchestrator = EmissionOrchestrator::new(
            fx.ledger.clone(),
            fx.coordinator.clone(),
            fx.metrics.clone(),
            5,
        );

        let generators: Vec<Arc<dyn TransactionGenerator>> = vec![
            Arc::new(CreditGenerator::new(transaction_config())),
            Arc::new(DebitGenerator::new(transaction_config())),
        ];
        let handles = orchestrator.start_emit_loops(generators, ProducerConfig::new(10, 1));
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(fx.coordinator.queue_len().await, 20);

        let history = fx
            .ledger
            .history_between(chrono::DateTime::<chrono::Utc>::UNIX_EPOCH, chrono::Utc::now())
            .await;
        let ids: HashSet<TransactionId> = history.iter().map(|tx| tx.id).collect();
        assert_eq!(ids.len(), 20);

        let snapshot = fx.metrics.snapshot();
        assert_eq!(snapshot.produced_tx, 20);
        assert_eq!(snapshot.submitted_tx, 20);
    }

    #[tokio::test]
    async fn failing_iterations_are_counted_and_skipped() {
        struct OutOfRangeGenerator;

        impl TransactionGenerator for OutOfRangeGenerator {
            fn produce(&self) -> Transaction {
                // Below the configured minimum, always rejected by the ledger
                Transaction::new(TransactionId::generate(), Money::from_units(1))
            }

            fn name(&self) -> &'static str {
                "out-of-range"
            }
        }

        let fx = fixture();
        let orchestrator = EmissionOrchestrator::new(
            fx.ledger.clone(),
            fx.coordinator.clone(),
            fx.metrics.clone(),
            5,
        );

        let handles = orchestrator.start_emit_loops(
            vec![Arc::new(OutOfRangeGenerator)],
            ProducerConfig::new(5, 1),
        );
        for handle in handles {
            handle.await.unwrap();
        }

        // Every iteration failed validation; none reached the queue
        assert_eq!(fx.coordinator.queue_len().await, 0);
        let snapshot = fx.metrics.snapshot();
        assert_eq!(snapshot.produced_tx, 5);
        assert_eq!(snapshot.submitted_tx, 0);
        assert_eq!(snapshot.invalid_tx, 5);
        assert_eq!(fx.ledger.balance().await, Money::ZERO);
    }

    #[test]
    fn generators_stay_within_the_legal_range() {
        let config = transaction_config();
        let credit = CreditGenerator::new(config.clone());
        let debit = DebitGenerator::new(config.clone());

        for _ in 0..100 {
            let c = credit.produce();
            assert!(c.is_credit());
            let abs = c.absolute_value();
            assert!(abs >= Money::new(config.min_amount) && abs <= Money::new(config.max_amount));

            let d = debit.produce();
            assert!(d.is_debit());
            let abs = d.absolute_value();
            assert!(abs >= Money::new(config.min_amount) && abs <= Money::new(config.max_amount));
        }
    }
}
