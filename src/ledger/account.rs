use crate::config::TransactionConfig;
use crate::metrics::MetricsCollector;
use crate::validation::TransactionValidator;
use crate::{Money, Transaction, TransactionOutcome, ValidationError};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Balance accumulator with an append-only transaction history
///
/// `process_transaction` validates, then atomically applies the signed
/// amount to the running balance. Validation failures fail fast and are
/// recorded as invalid outcomes; they never reach the balance.
pub struct BankAccount {
    balance: RwLock<Money>,
    history: RwLock<Vec<Transaction>>,
    validator: TransactionValidator,
    metrics: Arc<MetricsCollector>,
}

impl BankAccount {
    pub fn new(config: &TransactionConfig, metrics: Arc<MetricsCollector>) -> Self {
        Self {
            balance: RwLock::new(Money::new(config.default_balance)),
            history: RwLock::new(Vec::new()),
            validator: TransactionValidator::new(config),
            metrics,
        }
    }

    /// Validate and apply a transaction to the running balance
    pub async fn process_transaction(&self, tx: &Transaction) -> Result<(), ValidationError> {
        if let Err(e) = self.validator.validate(&tx.amount) {
            self.metrics.record_outcome(&TransactionOutcome::Invalid {
                transaction: Some(tx.clone()),
                reason: e.to_string(),
            });
            return Err(e);
        }

        {
            let mut balance = self.balance.write().await;
            *balance = *balance + tx.amount;
        }
        self.history.write().await.push(tx.clone());

        self.metrics
            .record_outcome(&TransactionOutcome::Accepted(tx.clone()));
        Ok(())
    }

    pub async fn balance(&self) -> Money {
        *self.balance.read().await
    }

    /// Transactions whose timestamps fall within [start, end]
    pub async fn history_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Vec<Transaction> {
        self.history
            .read()
            .await
            .iter()
            .filter(|tx| tx.timestamp >= start && tx.timestamp <= end)
            .cloned()
            .collect()
    }

    pub fn validator(&self) -> &TransactionValidator {
        &self.validator
    }
}
