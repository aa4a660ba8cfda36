use crate::config::TransactionConfig;
use crate::{Money, ValidationError};

/// Validates transaction amounts against the configured legal range
///
/// The check applies to the absolute amount, so the same bounds cover
/// credits and debits.
pub struct TransactionValidator {
    min_amount: Money,
    max_amount: Money,
}

impl TransactionValidator {
    pub fn new(config: &TransactionConfig) -> Self {
        Self {
            min_amount: Money::new(config.min_amount),
            max_amount: Money::new(config.max_amount),
        }
    }

    /// Validate an amount
    /// Returns Ok(()) if the absolute amount is within range,
    /// Err(ValidationError) otherwise
    pub fn validate(&self, amount: &Money) -> Result<(), ValidationError> {
        let abs = amount.abs();
        if abs < self.min_amount || abs > self.max_amount {
            return Err(ValidationError::AmountOutOfRange {
                amount: *amount,
                min: self.min_amount,
                max: self.max_amount,
            });
        }
        Ok(())
    }
}
