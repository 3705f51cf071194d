//! Request/response boundary for the remote endpoints.
//!
//! Transport-agnostic: the HTTP server and the wasm bindings both go
//! through here, so the wire contract lives in one place.

use serde_json::Value;
use tracing::warn;

use crate::catalog::AutomationAction;
use crate::error::WorkflowError;
use crate::parse;
use crate::simulate::{self, SimulationResult};

pub const STATUS_OK: u16 = 200;
pub const STATUS_INTERNAL_ERROR: u16 = 500;

#[derive(Debug, Clone, PartialEq)]
pub struct SimulateResponse {
    pub status: u16,
    pub body: SimulationResult,
}

/// Decode a `/simulate` request body and run the simulation.
///
/// Any JSON value is accepted; missing or non-array `nodes`/`edges` read as
/// empty, and so does an empty body. Only a body that is not JSON at all is
/// an error.
pub fn simulate_body(body: &[u8]) -> Result<SimulationResult, WorkflowError> {
    let value: Value = if body.trim_ascii().is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(body)?
    };
    let workflow = parse::decode_lenient(&value);
    Ok(simulate::simulate_workflow(&workflow))
}

impl SimulateResponse {
    pub fn from_body(body: &[u8]) -> Self {
        match simulate_body(body) {
            Ok(result) => SimulateResponse {
                status: STATUS_OK,
                body: result,
            },
            Err(e) => {
                warn!(code = e.code(), phase = %e.phase(), error = %e, "simulate request rejected");
                SimulateResponse::internal_error()
            }
        }
    }

    pub fn internal_error() -> Self {
        SimulateResponse {
            status: STATUS_INTERNAL_ERROR,
            body: SimulationResult::internal_error(),
        }
    }
}

/// Body of `GET /automations`.
pub fn automations(catalog: &[AutomationAction]) -> Vec<AutomationAction> {
    catalog.to_vec()
}
