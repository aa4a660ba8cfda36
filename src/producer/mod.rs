//! Emission Module
//!
//! Synthetic transaction producers and the paced orchestrator that
//! drives load into the ledger and the audit coordinator:
//! - generators: credit-biased and debit-biased amount sources
//! - orchestrator: absolute-deadline paced emission loops
//! - simulation: start/stop lifecycle around the emission streams

mod generator;
mod orchestrator;
mod simulation;

#[cfg(test)]
mod tests;

pub use generator::{CreditGenerator, DebitGenerator, TransactionGenerator};
pub use orchestrator::{EmissionOrchestrator, ProducerConfig};
pub use simulation::SimulationManager;
