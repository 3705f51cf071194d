//! Simulation: derive an execution order and narrate each step.
//!
//! Public API: `simulate(nodes, edges) -> SimulationResult`
//!
//! `valid` only reflects whether there was anything to run. Structural
//! checks belong to `validate`, which callers run first and gate on.

pub mod order;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::parse::graph::WorkflowGraph;
use crate::parse::types::{NodeKind, Workflow, WorkflowEdge, WorkflowNode};

pub use order::execution_order;

pub const NO_NODES: &str = "No nodes found in workflow.";
pub const INTERNAL_ERROR: &str = "Internal error while simulating workflow.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    Ok,
    Skipped,
    /// Reserved for step-level failures; the bucket simulation never emits it.
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    /// 1-based position in the execution order.
    pub id: usize,
    pub node_id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub status: StepStatus,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub valid: bool,
    pub errors: Vec<String>,
    pub steps: Vec<Step>,
}

impl SimulationResult {
    /// The fixed body returned when the boundary fails unexpectedly.
    pub fn internal_error() -> Self {
        SimulationResult {
            valid: false,
            errors: vec![INTERNAL_ERROR.to_string()],
            steps: Vec::new(),
        }
    }
}

/// Simulate a node/edge snapshot.
pub fn simulate(nodes: &[WorkflowNode], edges: &[WorkflowEdge]) -> SimulationResult {
    let graph = WorkflowGraph::build(nodes, edges);

    let steps: Vec<Step> = execution_order(nodes)
        .into_iter()
        .enumerate()
        .map(|(index, node)| build_step(index + 1, node, &graph))
        .collect();

    let mut errors = Vec::new();
    if nodes.is_empty() {
        errors.push(NO_NODES.to_string());
    }

    debug!(
        steps = steps.len(),
        skipped = steps.iter().filter(|s| s.status == StepStatus::Skipped).count(),
        "simulated workflow"
    );

    SimulationResult {
        valid: errors.is_empty(),
        errors,
        steps,
    }
}

pub fn simulate_workflow(workflow: &Workflow) -> SimulationResult {
    simulate(&workflow.nodes, &workflow.edges)
}

fn build_step(id: usize, node: &WorkflowNode, graph: &WorkflowGraph) -> Step {
    let kind = node.kind();
    let label = node.step_label().to_string();

    // End nodes are sinks; anything else without an exit is a dead end.
    let status = if graph.has_outgoing(&node.id) || kind == NodeKind::End {
        StepStatus::Ok
    } else {
        StepStatus::Skipped
    };

    let message = match status {
        StepStatus::Ok => format!("Executed {} node \"{}\".", kind, label),
        StepStatus::Skipped | StepStatus::Error => {
            format!("Node \"{}\" has no outgoing edges; stopping here.", label)
        }
    };

    Step {
        id,
        node_id: node.id.clone(),
        label,
        kind,
        status,
        message,
    }
}
