//! API Server Module
//!
//! This module implements the REST surface over the audit core. Handlers
//! are thin: they validate input, delegate to the ledger, coordinator or
//! simulation manager, and map domain errors to HTTP statuses.

use crate::audit::{AuditCoordinator, IngestOutcome};
use crate::config::Config;
use crate::ledger::BankAccount;
use crate::metrics::{MetricsCollector, MetricsSnapshot};
use crate::producer::SimulationManager;
use crate::{Money, Transaction, TransactionId};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

/// Shared application state accessible across all request handlers
#[derive(Clone)]
pub struct AppState {
    ledger: Arc<BankAccount>,
    coordinator: Arc<AuditCoordinator>,
    simulation: Arc<SimulationManager>,
    metrics: Arc<MetricsCollector>,
}

/// The main API server struct
///
/// Encapsulates the listen address and the shared application state.
pub struct Server {
    config: Config,
    state: AppState,
}

impl Server {
    pub fn new(
        config: Config,
        ledger: Arc<BankAccount>,
        coordinator: Arc<AuditCoordinator>,
        simulation: Arc<SimulationManager>,
        metrics: Arc<MetricsCollector>,
    ) -> Self {
        let state = AppState {
            ledger,
            coordinator,
            simulation,
            metrics,
        };
        Self { config, state }
    }

    /// Starts the API server and begins listening for incoming requests
    pub async fn start(self) -> anyhow::Result<()> {
        let app = Router::new()
            .route("/transactions", post(submit_transaction).get(transaction_history))
            .route("/balance", get(balance))
            .route("/simulation/start", post(start_simulation))
            .route("/simulation/stop", post(stop_simulation))
            .route("/audit/status", get(audit_status))
            .route("/metrics", get(metrics_snapshot))
            .with_state(self.state);

        let addr = format!("{}:{}", self.config.api.host, self.config.api.port);
        info!("API server listening on {}", addr);

        let listener = tokio::net::TcpListener::bind(&addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct SubmitTransactionRequest {
    amount: Decimal,
}

#[derive(Debug, Serialize)]
struct SubmitTransactionResponse {
    id: TransactionId,
    status: &'static str,
}

#[derive(Debug, Serialize)]
struct ApiError {
    error: String,
}

/// POST /transactions — validate, apply to the ledger, enqueue for audit
///
/// Validation failures come back as 422; a saturated ingestion buffer is
/// reported as a drop in the response body, not as an error status.
async fn submit_transaction(
    State(state): State<AppState>,
    Json(request): Json<SubmitTransactionRequest>,
) -> Result<Json<SubmitTransactionResponse>, (StatusCode, Json<ApiError>)> {
    let tx = Transaction::validated(
        TransactionId::generate(),
        Money::new(request.amount),
        state.ledger.validator(),
    )
    .map_err(|e| {
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ApiError {
                error: e.to_string(),
            }),
        )
    })?;

    state.ledger.process_transaction(&tx).await.map_err(|e| {
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ApiError {
                error: e.to_string(),
            }),
        )
    })?;

    let status = match state.coordinator.ingest(tx.clone()).await {
        IngestOutcome::Accepted => "accepted",
        IngestOutcome::Dropped => "dropped",
    };

    Ok(Json(SubmitTransactionResponse { id: tx.id, status }))
}

#[derive(Debug, Serialize)]
struct BalanceResponse {
    balance: Money,
}

/// GET /balance — current ledger balance
async fn balance(State(state): State<AppState>) -> Json<BalanceResponse> {
    Json(BalanceResponse {
        balance: state.ledger.balance().await,
    })
}

#[derive(Debug, Deserialize)]
struct HistoryQuery {
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
}

/// GET /transactions?start=&end= — history filtered by timestamp range
async fn transaction_history(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> Json<Vec<Transaction>> {
    let start = query.start.unwrap_or(DateTime::<Utc>::UNIX_EPOCH);
    let end = query.end.unwrap_or_else(Utc::now);
    Json(state.ledger.history_between(start, end).await)
}

#[derive(Debug, Deserialize)]
struct StartSimulationRequest {
    count: Option<u32>,
    interval_seconds: Option<u64>,
}

/// POST /simulation/start — launch the emission streams
async fn start_simulation(
    State(state): State<AppState>,
    Json(request): Json<StartSimulationRequest>,
) -> StatusCode {
    state
        .simulation
        .start(request.count, request.interval_seconds)
        .await;
    StatusCode::ACCEPTED
}

/// POST /simulation/stop — abort in-flight emission streams
async fn stop_simulation(State(state): State<AppState>) -> StatusCode {
    state.simulation.stop().await;
    StatusCode::ACCEPTED
}

#[derive(Debug, Serialize)]
struct AuditStatusResponse {
    queue_len: usize,
    dropped_transactions: u64,
    pending_batch_ids: Vec<String>,
}

/// GET /audit/status — advisory view of the two-phase store
///
/// Pending ids are informational; nothing resubmits them automatically.
async fn audit_status(State(state): State<AppState>) -> Json<AuditStatusResponse> {
    Json(AuditStatusResponse {
        queue_len: state.coordinator.queue_len().await,
        dropped_transactions: state.coordinator.dropped_count(),
        pending_batch_ids: state.coordinator.store().find_pending(),
    })
}

/// GET /metrics — point-in-time counter snapshot
async fn metrics_snapshot(State(state): State<AppState>) -> Json<MetricsSnapshot> {
    Json(state.metrics.snapshot())
}
