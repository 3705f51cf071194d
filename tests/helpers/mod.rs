use workflow_engine::parse::*;

// =============================================================================
// Node builders
// =============================================================================

pub fn start(id: &str) -> WorkflowNode {
    WorkflowNode::new(
        id,
        NodeKind::Start,
        NodePayload::Start(StartData {
            title: "Start".into(),
            ..Default::default()
        }),
    )
    .with_label("Start")
}

pub fn task(id: &str, label: &str) -> WorkflowNode {
    WorkflowNode::new(
        id,
        NodeKind::Task,
        NodePayload::Task(TaskData {
            title: label.into(),
            assignee: "hr-ops".into(),
            ..Default::default()
        }),
    )
    .with_label(label)
}

pub fn approval(id: &str, label: &str) -> WorkflowNode {
    WorkflowNode::new(
        id,
        NodeKind::Approval,
        NodePayload::Approval(ApprovalData {
            title: label.into(),
            approver_role: "Manager".into(),
            auto_approve_threshold: 2.0,
            ..Default::default()
        }),
    )
    .with_label(label)
}

pub fn automated(id: &str, label: &str) -> WorkflowNode {
    WorkflowNode::new(
        id,
        NodeKind::Automated,
        NodePayload::Automated(AutomatedData {
            title: label.into(),
            ..Default::default()
        }),
    )
    .with_label(label)
}

pub fn end(id: &str) -> WorkflowNode {
    WorkflowNode::new(
        id,
        NodeKind::End,
        NodePayload::End(EndData {
            end_message: "Workflow completed".into(),
            ..Default::default()
        }),
    )
    .with_label("End")
}

/// A node whose kind tag is missing from its data bag.
pub fn untyped(id: &str) -> WorkflowNode {
    WorkflowNode::new(id, NodeKind::Unknown, NodePayload::Raw(Default::default()))
}

// =============================================================================
// Edge / workflow builders
// =============================================================================

pub fn edge(source: &str, target: &str) -> WorkflowEdge {
    WorkflowEdge::new(format!("{}->{}", source, target), source, target)
}

pub fn chain(ids: &[&str]) -> Vec<WorkflowEdge> {
    ids.windows(2).map(|w| edge(w[0], w[1])).collect()
}

/// start → task → end, all connected.
pub fn linear_workflow() -> Workflow {
    Workflow::new(
        vec![start("n1"), task("n2", "Collect documents"), end("n3")],
        chain(&["n1", "n2", "n3"]),
    )
}

/// start → task → approval → automated → end.
pub fn onboarding_workflow() -> Workflow {
    Workflow::new(
        vec![
            start("s"),
            task("t", "Collect documents"),
            approval("a", "Manager approval"),
            automated("x", "Send welcome email"),
            end("e"),
        ],
        chain(&["s", "t", "a", "x", "e"]),
    )
}

pub fn messages(findings: &[workflow_engine::validate::Finding]) -> Vec<&str> {
    findings.iter().map(|f| f.message.as_str()).collect()
}
