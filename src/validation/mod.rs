//! Validation Module
//!
//! Contains the amount-range validator applied at the ledger boundary
//! and at validated transaction construction.

mod validator;

pub use validator::TransactionValidator;
