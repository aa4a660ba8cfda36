use crate::Transaction;
use std::collections::HashMap;
use std::sync::RwLock;

/// Two-phase audit batch store
///
/// # Contract
/// - `save` is an idempotent create: saving the same id twice overwrites
///   with the same pending state
/// - `mark_submitted` is an idempotent transition: marking an already
///   submitted batch is a no-op, marking an unknown id is a no-op
/// - `find_pending` lists saved-but-unsubmitted ids for advisory
///   recovery; nothing resubmits them automatically
pub trait AuditBatchStore: Send + Sync {
    fn save(&self, batch_id: &str, transactions: Vec<Transaction>) -> anyhow::Result<()>;

    fn load(&self, batch_id: &str) -> Option<Vec<Transaction>>;

    fn mark_submitted(&self, batch_id: &str) -> anyhow::Result<()>;

    fn find_pending(&self) -> Vec<String>;
}

struct StoredBatch {
    transactions: Vec<Transaction>,
    submitted: bool,
}

/// In-memory batch store backed by a locked HashMap
#[derive(Default)]
pub struct InMemoryBatchStore {
    store: RwLock<HashMap<String, StoredBatch>>,
}

impl InMemoryBatchStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AuditBatchStore for InMemoryBatchStore {
    fn save(&self, batch_id: &str, transactions: Vec<Transaction>) -> anyhow::Result<()> {
        let mut store = self.store.write().expect("batch store lock poisoned");
        store.insert(
            batch_id.to_string(),
            StoredBatch {
                transactions,
                submitted: false,
            },
        );
        Ok(())
    }

    fn load(&self, batch_id: &str) -> Option<Vec<Transaction>> {
        let store = self.store.read().expect("batch store lock poisoned");
        store.get(batch_id).map(|b| b.transactions.clone())
    }

    fn mark_submitted(&self, batch_id: &str) -> anyhow::Result<()> {
        let mut store = self.store.write().expect("batch store lock poisoned");
        if let Some(batch) = store.get_mut(batch_id) {
            batch.submitted = true;
        }
        Ok(())
    }

    fn find_pending(&self) -> Vec<String> {
        let store = self.store.read().expect("batch store lock poisoned");
        store
            .iter()
            .filter(|(_, b)| !b.submitted)
            .map(|(id, _)| id.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Money, TransactionId};

    fn tx(units: i64) -> Transaction {
        Transaction::new(TransactionId::generate(), Money::from_units(units))
    }

    #[test]
    fn save_then_load_returns_transactions() {
        let store = InMemoryBatchStore::new();
        store.save("b1", vec![tx(500), tx(-300)]).unwrap();

        let loaded = store.load("b1").unwrap();
        assert_eq!(loaded.len(), 2);
        assert!(store.load("missing").is_none());
    }

    #[test]
    fn mark_submitted_is_idempotent() {
        let store = InMemoryBatchStore::new();
        store.save("b1", vec![tx(500)]).unwrap();

        store.mark_submitted("b1").unwrap();
        store.mark_submitted("b1").unwrap();
        // Unknown ids are a no-op, not an error
        store.mark_submitted("never-saved").unwrap();

        assert!(store.find_pending().is_empty());
    }

    #[test]
    fn find_pending_lists_only_unsubmitted() {
        let store = InMemoryBatchStore::new();
        store.save("b1", vec![tx(500)]).unwrap();
        store.save("b2", vec![tx(600)]).unwrap();
        store.mark_submitted("b1").unwrap();

        assert_eq!(store.find_pending(), vec!["b2".to_string()]);
    }
}
