//! Audit Notifier Module
//!
//! Downstream sink for finished sub-batches. Submission is at-least-once
//! with no acknowledgment contract; callers treat a returned call as
//! success.

use crate::metrics::MetricsCollector;
use crate::AuditBatch;
use std::sync::Arc;
use tracing::info;

pub trait AuditNotifier: Send + Sync {
    fn submit(&self, batches: &[AuditBatch]);
}

/// Notifier that logs a submission summary and records submission metrics
pub struct ConsoleNotifier {
    metrics: Arc<MetricsCollector>,
}

impl ConsoleNotifier {
    pub fn new(metrics: Arc<MetricsCollector>) -> Self {
        Self { metrics }
    }
}

impl AuditNotifier for ConsoleNotifier {
    fn submit(&self, batches: &[AuditBatch]) {
        self.metrics.record_submission(batches);

        for batch in batches {
            info!(
                batch_id = batch.batch_id(),
                transactions = batch.transaction_count(),
                total_value = %batch.total_value(),
                "sub-batch submitted"
            );
        }
    }
}
