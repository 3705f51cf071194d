//! WASM entry points for browser use.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::catalog;
use crate::error::WorkflowError;
use crate::parse::{self, Workflow, WorkflowNode};
use crate::simulate::SimulationResult;
use crate::validate::{self, Finding};

/// Validate a workflow JSON (`{nodes, edges}`).
/// Returns a JSON array of findings, or a single error DTO if the text is not
/// a workflow.
#[wasm_bindgen]
pub fn validate_workflow(json: &str) -> JsValue {
    to_js(&validate_workflow_inner(json))
}

fn validate_workflow_inner(json: &str) -> Outcome<Vec<Finding>> {
    match parse::import(json) {
        Ok(workflow) => Outcome::Ok {
            value: validate::validate_workflow(&workflow),
        },
        Err(e) => Outcome::Error(ErrorDto::from(e)),
    }
}

/// Simulate a workflow JSON locally, with the same contract as `POST /simulate`.
#[wasm_bindgen]
pub fn simulate_workflow(json: &str) -> JsValue {
    to_js(&simulate_workflow_inner(json))
}

fn simulate_workflow_inner(json: &str) -> SimulationResult {
    crate::api::SimulateResponse::from_body(json.as_bytes()).body
}

/// Validate a single node JSON against a catalog JSON (array of actions).
/// An empty catalog string means the built-in catalog.
#[wasm_bindgen]
pub fn validate_node(node_json: &str, catalog_json: &str) -> JsValue {
    to_js(&validate_node_inner(node_json, catalog_json))
}

fn validate_node_inner(node_json: &str, catalog_json: &str) -> Outcome<Vec<Finding>> {
    let node = match serde_json::from_str::<WorkflowNode>(node_json) {
        Ok(n) => n,
        Err(e) => return Outcome::Error(ErrorDto::from(WorkflowError::from(e))),
    };

    let actions = if catalog_json.trim().is_empty() {
        catalog::default_catalog()
    } else {
        match catalog::parse_catalog(catalog_json) {
            Ok(a) => a,
            Err(e) => return Outcome::Error(ErrorDto::from(e)),
        }
    };

    Outcome::Ok {
        value: validate::validate_node(&node, &actions),
    }
}

/// Check pasted text against the import contract.
/// Returns `{status: "ok", value: {nodes, edges}}` or `{status: "error", ...}`.
#[wasm_bindgen]
pub fn import_workflow(text: &str) -> JsValue {
    to_js(&import_workflow_inner(text))
}

fn import_workflow_inner(text: &str) -> Outcome<Workflow> {
    match parse::import(text) {
        Ok(workflow) => Outcome::Ok { value: workflow },
        Err(e) => Outcome::Error(ErrorDto::from(e)),
    }
}

/// Normalize workflow JSON into the pretty-printed export text.
#[wasm_bindgen]
pub fn export_workflow(json: &str) -> Result<String, JsValue> {
    parse::import(json)
        .and_then(|workflow| parse::export(&workflow))
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// The built-in automation catalog.
#[wasm_bindgen]
pub fn automation_catalog() -> JsValue {
    to_js(&catalog::default_catalog())
}

/// Maps (nodes, `data`, `params`) become plain JS objects, not `Map`s.
fn to_js<T: Serialize>(value: &T) -> JsValue {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .unwrap_or(JsValue::NULL)
}

// ---------------------------------------------------------------------------
// DTOs for serialization to JS
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, serde::Deserialize)]
struct ErrorDto {
    code: String,
    phase: String,
    message: String,
}

impl From<WorkflowError> for ErrorDto {
    fn from(e: WorkflowError) -> Self {
        ErrorDto {
            code: e.code().to_string(),
            phase: e.phase().to_string(),
            message: e.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(tag = "status")]
enum Outcome<T> {
    #[serde(rename = "ok")]
    Ok { value: T },
    #[serde(rename = "error")]
    Error(ErrorDto),
}
