//! Transaction Generators Module
//!
//! Domain-specific sources of synthetic transactions. Each emission
//! stream owns one generator; the credit stream produces positive
//! amounts, the debit stream negative ones, both drawn uniformly from
//! the configured legal range so generated transactions always pass
//! validation.

use crate::config::TransactionConfig;
use crate::{Money, Transaction, TransactionId};
use rand::Rng;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;

pub trait TransactionGenerator: Send + Sync {
    fn produce(&self) -> Transaction;

    fn name(&self) -> &'static str;
}

fn random_amount(config: &TransactionConfig) -> Decimal {
    let min = config.min_amount.to_f64().unwrap_or(0.0);
    let max = config.max_amount.to_f64().unwrap_or(min);
    let value = rand::thread_rng().gen_range(min..=max);
    // Two decimal places keeps generated amounts currency-shaped
    Decimal::from_f64(value)
        .unwrap_or(config.min_amount)
        .round_dp(2)
}

/// Generates credit transactions (positive amounts)
pub struct CreditGenerator {
    config: TransactionConfig,
}

impl CreditGenerator {
    pub fn new(config: TransactionConfig) -> Self {
        Self { config }
    }
}

impl TransactionGenerator for CreditGenerator {
    fn produce(&self) -> Transaction {
        let amount = random_amount(&self.config);
        Transaction::new(TransactionId::generate(), Money::new(amount))
    }

    fn name(&self) -> &'static str {
        "credit"
    }
}

/// Generates debit transactions (negative amounts)
pub struct DebitGenerator {
    config: TransactionConfig,
}

impl DebitGenerator {
    pub fn new(config: TransactionConfig) -> Self {
        Self { config }
    }
}

impl TransactionGenerator for DebitGenerator {
    fn produce(&self) -> Transaction {
        let amount = random_amount(&self.config);
        Transaction::new(TransactionId::generate(), Money::new(-amount))
    }

    fn name(&self) -> &'static str {
        "debit"
    }
}
