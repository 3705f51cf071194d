//! Graph-level validation.
//!
//! `validate` runs the structural rules over a snapshot and returns findings
//! as data; it never fails. `validate_node` offers per-node configuration
//! hints for the property panel and is kept separate from
//! `validate`.

pub mod node_rules;
pub mod structural;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::AutomationAction;
use crate::parse::graph::WorkflowGraph;
use crate::parse::types::{Workflow, WorkflowEdge, WorkflowNode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// A structural observation about the graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    #[serde(rename = "type")]
    pub severity: Severity,
    pub message: String,
}

impl Finding {
    pub fn error(message: impl Into<String>) -> Self {
        Finding {
            severity: Severity::Error,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Finding {
            severity: Severity::Warning,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl std::fmt::Display for Finding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.severity {
            Severity::Error => write!(f, "error: {}", self.message),
            Severity::Warning => write!(f, "warning: {}", self.message),
        }
    }
}

/// Validate a node/edge snapshot.
pub fn validate(nodes: &[WorkflowNode], edges: &[WorkflowEdge]) -> Vec<Finding> {
    let graph = WorkflowGraph::build(nodes, edges);
    let findings = structural::validate_structural(nodes, &graph);
    debug!(
        nodes = nodes.len(),
        edges = edges.len(),
        findings = findings.len(),
        "validated workflow"
    );
    findings
}

/// Validate a whole workflow (structural rules only).
pub fn validate_workflow(workflow: &Workflow) -> Vec<Finding> {
    validate(&workflow.nodes, &workflow.edges)
}

/// Whether any finding should block a simulation run. Warnings never do.
pub fn has_blocking_errors(findings: &[Finding]) -> bool {
    findings.iter().any(Finding::is_error)
}

/// Validate a single node's configuration against the automation catalog.
pub fn validate_node(node: &WorkflowNode, catalog: &[AutomationAction]) -> Vec<Finding> {
    node_rules::validate_node_config(node, catalog)
}
