//! Structural validation rules, applied in a fixed order.

use crate::parse::graph::WorkflowGraph;
use crate::parse::types::WorkflowNode;

use super::Finding;

pub const EMPTY_WORKFLOW: &str = "The workflow is empty. Add some nodes to get started.";
pub const NO_START_NODE: &str = "No Start node found. Add a Start node to define the entry point.";
pub const NO_END_NODE: &str =
    "No End node found. Consider adding an End node to mark workflow completion.";

/// Run all structural rules. An empty workflow short-circuits with a single
/// warning; otherwise every rule runs and findings are concatenated in rule
/// order.
pub fn validate_structural(nodes: &[WorkflowNode], graph: &WorkflowGraph) -> Vec<Finding> {
    let mut findings = Vec::new();

    if v001_not_empty(nodes, &mut findings) {
        return findings;
    }
    v002_exactly_one_start(nodes, &mut findings);
    v003_has_end(nodes, &mut findings);
    v004_no_isolated_nodes(nodes, graph, &mut findings);

    findings
}

/// Returns true when the workflow is empty.
fn v001_not_empty(nodes: &[WorkflowNode], findings: &mut Vec<Finding>) -> bool {
    if nodes.is_empty() {
        findings.push(Finding::warning(EMPTY_WORKFLOW));
        return true;
    }
    false
}

fn v002_exactly_one_start(nodes: &[WorkflowNode], findings: &mut Vec<Finding>) {
    let start_count = nodes.iter().filter(|n| n.is_start()).count();
    if start_count == 0 {
        findings.push(Finding::error(NO_START_NODE));
    } else if start_count > 1 {
        findings.push(Finding::error(format!(
            "Multiple Start nodes found ({}). There should be exactly one entry point.",
            start_count
        )));
    }
}

// Any number of End nodes is fine; only their absence is reported.
fn v003_has_end(nodes: &[WorkflowNode], findings: &mut Vec<Finding>) {
    if !nodes.iter().any(|n| n.is_end()) {
        findings.push(Finding::warning(NO_END_NODE));
    }
}

fn v004_no_isolated_nodes(
    nodes: &[WorkflowNode],
    graph: &WorkflowGraph,
    findings: &mut Vec<Finding>,
) {
    for node in nodes {
        if !graph.is_connected(&node.id) {
            findings.push(Finding::warning(format!(
                "Node \"{}\" ({}) is not connected to the workflow.",
                node.display_name(),
                node.kind()
            )));
        }
    }
}
