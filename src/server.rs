//! HTTP server exposing the engine to the canvas.
//!
//! Routes:
//! - `GET  /health`
//! - `GET  /automations`: the automation catalog
//! - `POST /simulate`: `{nodes, edges}` to a simulation result
//!
//! Every request is an independent, stateless computation; the only shared
//! state is the read-only catalog.

use std::any::Any;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use tokio::net::TcpListener;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tracing::{error, info};

use crate::api::{self, SimulateResponse};
use crate::catalog::AutomationAction;
use crate::error::WorkflowError;

pub struct AppState {
    pub catalog: Vec<AutomationAction>,
}

pub fn router(catalog: Vec<AutomationAction>) -> Router {
    let state = Arc::new(AppState { catalog });

    Router::new()
        .route("/health", get(health))
        .route("/automations", get(automations))
        .route(
            "/simulate",
            post(simulate).layer(CatchPanicLayer::custom(simulate_panicked)),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Serve until Ctrl-C.
pub async fn serve(bind: &str, catalog: Vec<AutomationAction>) -> anyhow::Result<()> {
    let listener = TcpListener::bind(bind).await?;
    info!(bind = %bind, actions = catalog.len(), "Workflow server listening");

    axum::serve(listener, router(catalog))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;

    info!("Workflow server shut down");
    Ok(())
}

// GET /health
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

// GET /automations
async fn automations(State(state): State<Arc<AppState>>) -> Json<Vec<AutomationAction>> {
    Json(api::automations(&state.catalog))
}

// POST /simulate. The body is read raw so that non-JSON input gets the
// fixed 500 body rather than the extractor's rejection.
async fn simulate(body: Bytes) -> Response {
    let resp = SimulateResponse::from_body(&body);
    info!(
        status = resp.status,
        steps = resp.body.steps.len(),
        valid = resp.body.valid,
        "simulate"
    );
    into_response(resp)
}

fn simulate_panicked(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .cloned()
        .or_else(|| panic.downcast_ref::<&str>().map(|s| s.to_string()))
        .unwrap_or_else(|| "unknown panic".to_string());
    let err = WorkflowError::Simulation(detail);
    error!(code = err.code(), error = %err, "simulate handler panicked");
    into_response(SimulateResponse::internal_error())
}

fn into_response(resp: SimulateResponse) -> Response {
    let status = StatusCode::from_u16(resp.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(resp.body)).into_response()
}
