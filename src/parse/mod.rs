//! Parse phase: JSON text → workflow types + graph construction.
//!
//! Three entry points with different strictness:
//! - `parse`: serde decode of a `{nodes, edges}` object (fields required),
//! - `import`: the import-box contract, any JSON whose top level carries
//!   `nodes` and `edges` arrays,
//! - `decode_lenient`: the simulate-request contract, where anything missing
//!   or mistyped is read as empty.

pub mod graph;
pub mod types;

pub use graph::WorkflowGraph;
pub use types::*;

use serde_json::Value;

use crate::error::WorkflowError;

/// Deserialize a workflow JSON string into a `Workflow` struct.
pub fn parse(json: &str) -> Result<Workflow, WorkflowError> {
    Ok(serde_json::from_str::<Workflow>(json)?)
}

/// Parse JSON and build the graph in one step.
pub fn parse_and_build(json: &str) -> Result<(Workflow, WorkflowGraph), WorkflowError> {
    let workflow = parse(json)?;
    let graph = WorkflowGraph::from_workflow(&workflow);
    Ok((workflow, graph))
}

/// Accept pasted workflow text.
///
/// Only the top-level shape is checked; individual node and edge entries
/// are decoded leniently and any problems surface later as findings.
pub fn import(text: &str) -> Result<Workflow, WorkflowError> {
    let value: Value = serde_json::from_str(text)?;
    let (Some(Value::Array(nodes)), Some(Value::Array(edges))) =
        (value.get("nodes"), value.get("edges"))
    else {
        return Err(WorkflowError::InvalidShape);
    };
    Ok(Workflow {
        nodes: nodes.iter().cloned().map(WorkflowNode::from).collect(),
        edges: edges.iter().cloned().map(WorkflowEdge::from).collect(),
    })
}

/// Read a workflow from an arbitrary JSON value. Never fails.
pub fn decode_lenient(value: &Value) -> Workflow {
    let entries = |key: &str| match value.get(key) {
        Some(Value::Array(items)) => items.clone(),
        _ => Vec::new(),
    };
    Workflow {
        nodes: entries("nodes").into_iter().map(WorkflowNode::from).collect(),
        edges: entries("edges").into_iter().map(WorkflowEdge::from).collect(),
    }
}

/// Pretty-printed `{nodes, edges}` text with 2-space indentation.
pub fn export(workflow: &Workflow) -> Result<String, WorkflowError> {
    Ok(serde_json::to_string_pretty(workflow)?)
}
