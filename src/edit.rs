//! Graph editing operations used by the canvas.
//!
//! Deleting a node cascades to every edge that references it. Connecting
//! never deduplicates: parallel edges and self-loops are legal in the model.

use crate::parse::types::*;

const FIRST_NODE_POSITION: Position = Position { x: 100.0, y: 100.0 };
const NODE_OFFSET: Position = Position { x: 100.0, y: 50.0 };

impl WorkflowNode {
    /// A freshly placed node with the palette's default payload for `kind`.
    pub fn with_defaults(id: impl Into<String>, kind: NodeKind, position: Position) -> Self {
        let (label, payload) = match kind {
            NodeKind::Start => (
                "Start",
                NodePayload::Start(StartData {
                    title: "Start".into(),
                    ..Default::default()
                }),
            ),
            NodeKind::Task => (
                "Task",
                NodePayload::Task(TaskData {
                    title: "Task".into(),
                    ..Default::default()
                }),
            ),
            NodeKind::Approval => (
                "Approval",
                NodePayload::Approval(ApprovalData {
                    title: "Approval".into(),
                    ..Default::default()
                }),
            ),
            NodeKind::Automated => (
                "Automated Step",
                NodePayload::Automated(AutomatedData {
                    title: "Automated Step".into(),
                    ..Default::default()
                }),
            ),
            NodeKind::End => (
                "End",
                NodePayload::End(EndData {
                    end_message: "Workflow completed".into(),
                    ..Default::default()
                }),
            ),
            NodeKind::Unknown => ("Node", NodePayload::Raw(Default::default())),
        };

        let mut node = WorkflowNode::new(id, kind, payload)
            .with_label(label)
            .at(position);
        node.renderer = Some("default".into());
        node
    }
}

impl Workflow {
    /// Append a node of `kind` next to the last one and return its id.
    pub fn add_node(&mut self, kind: NodeKind) -> String {
        let id = self.fresh_id("node");
        let position = match self.nodes.last() {
            Some(last) => Position::new(
                last.position.x + NODE_OFFSET.x,
                last.position.y + NODE_OFFSET.y,
            ),
            None => FIRST_NODE_POSITION,
        };
        self.nodes
            .push(WorkflowNode::with_defaults(id.clone(), kind, position));
        id
    }

    /// Add a node of `kind` at a drop position and return its id.
    pub fn drop_node(&mut self, kind: NodeKind, position: Position) -> String {
        let id = self.fresh_id("node");
        self.nodes
            .push(WorkflowNode::with_defaults(id.clone(), kind, position));
        id
    }

    /// Connect `source → target` and return the new edge id.
    pub fn connect(&mut self, source: &str, target: &str) -> String {
        let id = self.fresh_edge_id(source, target);
        self.edges.push(WorkflowEdge::new(id.clone(), source, target));
        id
    }

    /// Remove a node and every edge touching it. Returns false if absent.
    pub fn remove_node(&mut self, id: &str) -> bool {
        let before = self.nodes.len();
        self.nodes.retain(|n| n.id != id);
        if self.nodes.len() == before {
            return false;
        }
        self.edges.retain(|e| e.source != id && e.target != id);
        true
    }

    pub fn remove_edge(&mut self, id: &str) -> bool {
        let before = self.edges.len();
        self.edges.retain(|e| e.id != id);
        self.edges.len() != before
    }

    fn fresh_id(&self, prefix: &str) -> String {
        (1..)
            .map(|n| format!("{}-{}", prefix, n))
            .find(|candidate| self.nodes.iter().all(|node| &node.id != candidate))
            .unwrap_or_else(|| prefix.to_string())
    }

    fn fresh_edge_id(&self, source: &str, target: &str) -> String {
        let base = format!("e-{}-{}", source, target);
        if self.edges.iter().all(|e| e.id != base) {
            return base;
        }
        (2..)
            .map(|n| format!("{}-{}", base, n))
            .find(|candidate| self.edges.iter().all(|e| &e.id != candidate))
            .unwrap_or(base)
    }
}
