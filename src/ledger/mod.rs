//! Ledger Module
//!
//! Running balance accumulator for the single audited account.

mod account;

pub use account::BankAccount;
