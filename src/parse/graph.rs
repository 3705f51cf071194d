//! petgraph-based directed graph wrapper for the visual workflow.
//!
//! Building never fails: edges may point at ids that no node carries (the
//! canvas can hand over a half-deleted graph), so unknown endpoints get a
//! vertex of their own. Empty endpoints are not connections and are skipped.

use std::collections::HashMap;

use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;

use super::types::{Workflow, WorkflowEdge, WorkflowNode};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeLabel {
    pub id: String,
    pub source_handle: Option<String>,
    pub target_handle: Option<String>,
}

pub struct WorkflowGraph {
    pub graph: DiGraph<String, EdgeLabel>,
    pub node_indices: HashMap<String, NodeIndex>,
}

impl WorkflowGraph {
    pub fn build(nodes: &[WorkflowNode], edges: &[WorkflowEdge]) -> Self {
        let mut this = WorkflowGraph {
            graph: DiGraph::new(),
            node_indices: HashMap::new(),
        };

        for node in nodes {
            this.vertex(&node.id);
        }

        for edge in edges {
            if edge.source.is_empty() || edge.target.is_empty() {
                continue;
            }
            let s = this.vertex(&edge.source);
            let t = this.vertex(&edge.target);
            this.graph.add_edge(
                s,
                t,
                EdgeLabel {
                    id: edge.id.clone(),
                    source_handle: edge.source_handle.clone(),
                    target_handle: edge.target_handle.clone(),
                },
            );
        }

        this
    }

    pub fn from_workflow(workflow: &Workflow) -> Self {
        Self::build(&workflow.nodes, &workflow.edges)
    }

    fn vertex(&mut self, id: &str) -> NodeIndex {
        if let Some(&idx) = self.node_indices.get(id) {
            return idx;
        }
        let idx = self.graph.add_node(id.to_string());
        self.node_indices.insert(id.to_string(), idx);
        idx
    }

    pub fn successors(&self, node_id: &str) -> Vec<(&str, &EdgeLabel)> {
        self.edges(node_id, Direction::Outgoing)
    }

    pub fn predecessors(&self, node_id: &str) -> Vec<(&str, &EdgeLabel)> {
        self.edges(node_id, Direction::Incoming)
    }

    fn edges(&self, node_id: &str, dir: Direction) -> Vec<(&str, &EdgeLabel)> {
        let Some(&idx) = self.node_indices.get(node_id) else {
            return vec![];
        };
        self.graph
            .edges_directed(idx, dir)
            .map(|e| {
                let other = match dir {
                    Direction::Outgoing => e.target(),
                    Direction::Incoming => e.source(),
                };
                (self.graph[other].as_str(), e.weight())
            })
            .collect()
    }

    pub fn outgoing_count(&self, node_id: &str) -> usize {
        self.successors(node_id).len()
    }

    pub fn incoming_count(&self, node_id: &str) -> usize {
        self.predecessors(node_id).len()
    }

    pub fn has_outgoing(&self, node_id: &str) -> bool {
        self.node_indices.get(node_id).is_some_and(|&idx| {
            self.graph
                .edges_directed(idx, Direction::Outgoing)
                .next()
                .is_some()
        })
    }

    /// True when at least one edge names this node as source or target.
    pub fn is_connected(&self, node_id: &str) -> bool {
        self.node_indices.get(node_id).is_some_and(|&idx| {
            self.graph.edges_directed(idx, Direction::Outgoing).next().is_some()
                || self.graph.edges_directed(idx, Direction::Incoming).next().is_some()
        })
    }
}
