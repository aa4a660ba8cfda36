use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Neg, Sub};
use uuid::Uuid;

/// Exact-decimal monetary amount
///
/// Wraps `rust_decimal::Decimal` so every addition across millions of
/// transactions stays exact. Binary floating point is never used for
/// amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(pub Decimal);

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);

    pub fn new(amount: Decimal) -> Self {
        Money(amount)
    }

    /// Build a Money from a whole number of currency units
    pub fn from_units(units: i64) -> Self {
        Money(Decimal::from(units))
    }

    pub fn abs(&self) -> Money {
        Money(self.0.abs())
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    pub fn is_positive(&self) -> bool {
        self.0.is_sign_positive() && !self.0.is_zero()
    }

    pub fn amount(&self) -> Decimal {
        self.0
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        Money(self.0 + other.0)
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, other: Money) -> Money {
        Money(self.0 - other.0)
    }
}

impl Neg for Money {
    type Output = Money;

    fn neg(self) -> Money {
        Money(-self.0)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Collision-resistant transaction identifier
///
/// Random UUIDs replace a process-wide counter so no global mutable
/// state is needed and concurrent streams cannot collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(pub Uuid);

impl TransactionId {
    pub fn generate() -> Self {
        TransactionId(Uuid::new_v4())
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TX-{}", self.0)
    }
}

/// Signed monetary transaction
///
/// Immutable after construction. A negative amount is a debit, a
/// positive amount a credit. Use [`Transaction::validated`] to enforce
/// the configured amount range at construction time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub amount: Money,
    pub timestamp: DateTime<Utc>,
}

impl Transaction {
    pub fn new(id: TransactionId, amount: Money) -> Self {
        Self {
            id,
            amount,
            timestamp: Utc::now(),
        }
    }

    /// Construct a transaction, failing if the amount is outside the
    /// validator's configured range. Out-of-range amounts are rejected,
    /// never clamped.
    pub fn validated(
        id: TransactionId,
        amount: Money,
        validator: &crate::validation::TransactionValidator,
    ) -> Result<Self, ValidationError> {
        validator.validate(&amount)?;
        Ok(Self::new(id, amount))
    }

    pub fn is_debit(&self) -> bool {
        self.amount.is_negative()
    }

    pub fn is_credit(&self) -> bool {
        self.amount.is_positive()
    }

    pub fn absolute_value(&self) -> Money {
        self.amount.abs()
    }
}

/// Value-bounded audit batch
///
/// An ordered snapshot of transactions with a precomputed total of
/// absolute values. The total must not exceed the value ceiling the
/// batch was built against; a violating construction fails instead of
/// silently truncating.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditBatch {
    batch_id: String,
    transactions: Vec<Transaction>,
    total_value: Money,
}

impl AuditBatch {
    pub fn new(
        batch_id: String,
        transactions: Vec<Transaction>,
        value_limit: Money,
    ) -> Result<Self, AuditError> {
        let total_value = transactions
            .iter()
            .fold(Money::ZERO, |acc, tx| acc + tx.absolute_value());

        if total_value > value_limit {
            return Err(AuditError::BatchValueExceeded {
                batch_id,
                total: total_value,
                limit: value_limit,
            });
        }

        Ok(Self {
            batch_id,
            transactions,
            total_value,
        })
    }

    pub fn batch_id(&self) -> &str {
        &self.batch_id
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn total_value(&self) -> Money {
        self.total_value
    }

    pub fn transaction_count(&self) -> usize {
        self.transactions.len()
    }
}

/// Outcome of a ledger submission, recorded for telemetry only
///
/// Control flow uses `Result`; outcomes exist so the metrics collector
/// can count accepted vs. invalid submissions.
#[derive(Debug, Clone)]
pub enum TransactionOutcome {
    Accepted(Transaction),
    Invalid {
        transaction: Option<Transaction>,
        reason: String,
    },
}

/// Validation errors raised at the ledger/ingestion boundary
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("transaction amount {amount} is out of range (expected |amount| between {min} and {max})")]
    AmountOutOfRange {
        amount: Money,
        min: Money,
        max: Money,
    },
    #[error("transaction is missing an identifier")]
    MissingId,
}

/// Failures inside the audit pipeline
#[derive(Debug, Clone, thiserror::Error)]
pub enum AuditError {
    #[error("batch {batch_id} total {total} exceeds value limit {limit}")]
    BatchValueExceeded {
        batch_id: String,
        total: Money,
        limit: Money,
    },
    #[error("transaction {id} value {value} alone exceeds the batch ceiling {limit}")]
    TransactionExceedsCeiling {
        id: TransactionId,
        value: Money,
        limit: Money,
    },
    #[error("ingestion queue saturated, transaction {id} dropped")]
    QueueSaturated { id: TransactionId },
}
