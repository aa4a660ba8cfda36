use auditflow::api::Server;
use auditflow::audit::AuditCoordinator;
use auditflow::config::Config;
use auditflow::ledger::BankAccount;
use auditflow::metrics::MetricsCollector;
use auditflow::notifier::ConsoleNotifier;
use auditflow::persistence::InMemoryBatchStore;
use auditflow::producer::{EmissionOrchestrator, SimulationManager};
use std::sync::Arc;
use tracing::info;

/// The main entry point for the audit service.
///
/// Initializes logging, loads the configuration, wires the ledger, the
/// flush coordinator and the simulation manager together, starts the
/// periodic flush timer and serves the HTTP API.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let config = Config::load("config/default.toml")?;
    info!("audit service starting with config: {:?}", config);

    let metrics = Arc::new(MetricsCollector::new());
    let store = Arc::new(InMemoryBatchStore::new());
    let notifier = Arc::new(ConsoleNotifier::new(metrics.clone()));

    let coordinator = Arc::new(AuditCoordinator::new(
        &config.audit,
        store,
        notifier,
        metrics.clone(),
    ));
    info!(strategy = %config.audit.strategy, "batching strategy selected");

    // Timeout trigger: bounds flush latency even under low throughput
    coordinator.spawn_flush_timer();
    info!("flush timer started");

    let ledger = Arc::new(BankAccount::new(&config.transaction, metrics.clone()));

    let orchestrator = EmissionOrchestrator::new(
        ledger.clone(),
        coordinator.clone(),
        metrics.clone(),
        config.producer.checkpoints,
    );
    let simulation = Arc::new(SimulationManager::new(
        orchestrator,
        config.transaction.clone(),
        config.producer.clone(),
        metrics.clone(),
    ));

    let server = Server::new(config, ledger, coordinator, simulation, metrics);
    server.start().await?;

    Ok(())
}
