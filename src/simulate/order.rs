//! Execution order for a simulation run.
//!
//! This is a stable three-bucket partition (start nodes, then everything
//! else, then end nodes), not a traversal: edges do not influence the order.

use crate::parse::types::{NodeKind, WorkflowNode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Bucket {
    Start,
    Middle,
    End,
}

fn bucket(kind: NodeKind) -> Bucket {
    match kind {
        NodeKind::Start => Bucket::Start,
        NodeKind::End => Bucket::End,
        NodeKind::Task | NodeKind::Approval | NodeKind::Automated | NodeKind::Unknown => {
            Bucket::Middle
        }
    }
}

/// Nodes in execution order. Relative input order is kept within a bucket.
pub fn execution_order(nodes: &[WorkflowNode]) -> Vec<&WorkflowNode> {
    let mut ordered: Vec<&WorkflowNode> = nodes.iter().collect();
    // `sort_by_key` is stable.
    ordered.sort_by_key(|n| bucket(n.kind()));
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::types::NodePayload;
    use serde_json::Map;

    fn node(id: &str, kind: NodeKind) -> WorkflowNode {
        WorkflowNode::new(id, kind, NodePayload::Raw(Map::new()))
    }

    #[test]
    fn buckets_are_stable() {
        let nodes = vec![
            node("e1", NodeKind::End),
            node("t1", NodeKind::Task),
            node("s1", NodeKind::Start),
            node("x1", NodeKind::Unknown),
            node("e2", NodeKind::End),
            node("s2", NodeKind::Start),
            node("a1", NodeKind::Approval),
        ];
        let ids: Vec<&str> = execution_order(&nodes).iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["s1", "s2", "t1", "x1", "a1", "e1", "e2"]);
    }
}
