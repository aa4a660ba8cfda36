//! Configuration Module
//!
//! This module defines all configuration structures for the audit service.
//! Configuration is loaded from TOML files and parsed using serde.

use rust_decimal::Decimal;
use serde::Deserialize;
use std::fs;

/// Main configuration structure
///
/// Contains all configuration sections for the service. Built once at
/// startup and passed by reference into each component; no setters.
///
/// # Example TOML
/// ```toml
/// [transaction]
/// min_amount = 200
/// max_amount = 500000
/// default_balance = 0
///
/// [audit]
/// queue_capacity = 10000
/// submission_limit = 1000
/// flush_interval_ms = 5000
/// max_batch_value = 1000000
/// strategy = "first-fit-decreasing"
///
/// [producer]
/// count = 25
/// interval_seconds = 25
/// checkpoints = 5
///
/// [api]
/// host = "127.0.0.1"
/// port = 8080
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub transaction: TransactionConfig,
    pub audit: AuditConfig,
    pub producer: ProducerSettings,
    pub api: ApiConfig,
}

/// Transaction amount bounds and the opening ledger balance
///
/// # Fields
/// - `min_amount`: Minimum legal absolute transaction amount
/// - `max_amount`: Maximum legal absolute transaction amount
/// - `default_balance`: Opening balance of the ledger account
#[derive(Debug, Clone, Deserialize)]
pub struct TransactionConfig {
    pub min_amount: Decimal,
    pub max_amount: Decimal,
    pub default_balance: Decimal,
}

/// Audit ingestion and flush configuration
///
/// # Fields
/// - `queue_capacity`: Bounded ingestion buffer size; offers beyond it are dropped
/// - `submission_limit`: Buffer length that fires the threshold trigger, and
///   the maximum number of transactions drained per flush cycle
/// - `flush_interval_ms`: Period of the timeout trigger that bounds latency
///   when throughput is low
/// - `max_batch_value`: Value ceiling for each sub-batch produced by the
///   batching engine; must exceed `max_amount` or a single transaction could
///   never be placed
/// - `strategy`: Batching strategy, `"first-fit-decreasing"` or `"greedy"`
#[derive(Debug, Clone, Deserialize)]
pub struct AuditConfig {
    pub queue_capacity: usize,
    pub submission_limit: usize,
    pub flush_interval_ms: u64,
    pub max_batch_value: Decimal,
    pub strategy: String,
}

/// Emission stream settings
///
/// Count and duration only; per-tick spacing is derived, never stored.
#[derive(Debug, Clone, Deserialize)]
pub struct ProducerSettings {
    /// Transactions emitted per stream per run
    pub count: u32,
    /// Duration of one run in seconds
    pub interval_seconds: u64,
    /// How many times per run each stream asks the coordinator to check
    /// its threshold trigger
    pub checkpoints: u32,
}

/// API server configuration
///
/// # Fields
/// - `host`: IP address to bind to (e.g., "127.0.0.1" or "0.0.0.0")
/// - `port`: TCP port to listen on
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Arguments
    /// * `path` - Path to the TOML configuration file
    ///
    /// # Returns
    /// * `Ok(Config)` if the file was successfully loaded and parsed
    /// * `Err` if the file couldn't be read or the TOML is invalid
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}
