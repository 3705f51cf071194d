//! Integration tests for structural validation.

#[allow(dead_code)]
mod helpers;

use helpers::*;
use workflow_engine::parse;
use workflow_engine::validate::{self, Finding, Severity};

#[test]
fn linear_workflow_has_no_findings() {
    let wf = linear_workflow();
    let findings = validate::validate_workflow(&wf);
    assert!(findings.is_empty(), "Expected no findings, got: {:?}", findings);
}

#[test]
fn empty_workflow_is_a_single_warning() {
    let findings = validate::validate(&[], &[]);
    assert_eq!(
        findings,
        vec![Finding::warning(
            "The workflow is empty. Add some nodes to get started."
        )]
    );
}

#[test]
fn empty_workflow_ignores_edges() {
    let findings = validate::validate(&[], &[edge("a", "b")]);
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].severity, Severity::Warning);
}

#[test]
fn missing_start_is_an_error() {
    let json = include_str!("fixtures/no_start.json");
    let wf = parse::import(json).unwrap();
    let findings = validate::validate_workflow(&wf);
    assert_eq!(findings.len(), 1, "{:?}", findings);
    assert!(findings[0].is_error());
    assert!(findings[0].message.contains("No Start node"));
    assert!(validate::has_blocking_errors(&findings));
}

#[test]
fn multiple_starts_report_the_count() {
    let nodes = vec![start("s1"), start("s2"), start("s3"), end("e")];
    let edges = vec![edge("s1", "e"), edge("s2", "e"), edge("s3", "e")];
    let findings = validate::validate(&nodes, &edges);
    assert_eq!(findings.len(), 1, "{:?}", findings);
    assert!(findings[0].is_error());
    assert!(findings[0].message.contains("(3)"), "{}", findings[0]);
}

#[test]
fn missing_end_is_only_a_warning() {
    let nodes = vec![start("s"), task("t", "Review")];
    let findings = validate::validate(&nodes, &[edge("s", "t")]);
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].severity, Severity::Warning);
    assert!(findings[0].message.starts_with("No End node found"));
    assert!(!validate::has_blocking_errors(&findings));
}

#[test]
fn multiple_ends_are_accepted() {
    let nodes = vec![start("s"), end("e1"), end("e2")];
    let edges = vec![edge("s", "e1"), edge("s", "e2")];
    assert!(validate::validate(&nodes, &edges).is_empty());
}

#[test]
fn one_isolated_node_yields_one_warning() {
    let nodes = vec![start("s"), task("t", "Orphan task"), end("e")];
    let findings = validate::validate(&nodes, &[edge("s", "e")]);
    assert_eq!(
        messages(&findings),
        vec!["Node \"Orphan task\" (task) is not connected to the workflow."]
    );
}

#[test]
fn every_isolated_node_is_reported_in_node_order() {
    let nodes = vec![untyped("u1"), start("s"), untyped("u2"), end("e")];
    let findings = validate::validate(&nodes, &[edge("s", "e")]);
    assert_eq!(
        messages(&findings),
        vec![
            "Node \"u1\" (unknown) is not connected to the workflow.",
            "Node \"u2\" (unknown) is not connected to the workflow.",
        ]
    );
}

#[test]
fn lone_start_node_is_isolated() {
    let findings = validate::validate(&[start("s")], &[]);
    assert_eq!(
        messages(&findings),
        vec![
            "No End node found. Consider adding an End node to mark workflow completion.",
            "Node \"Start\" (start) is not connected to the workflow.",
        ]
    );
}

#[test]
fn rules_are_concatenated_in_fixed_order() {
    let nodes = vec![task("t", "Lonely")];
    let findings = validate::validate(&nodes, &[]);
    let severities: Vec<Severity> = findings.iter().map(|f| f.severity).collect();
    assert_eq!(
        severities,
        vec![Severity::Error, Severity::Warning, Severity::Warning]
    );
    assert!(findings[0].message.starts_with("No Start node"));
    assert!(findings[1].message.starts_with("No End node"));
    assert!(findings[2].message.contains("\"Lonely\""));
}

#[test]
fn self_loops_and_duplicates_count_as_connections() {
    let nodes = vec![start("s"), task("t", "Loop"), end("e")];
    let edges = vec![edge("s", "e"), edge("s", "e"), edge("t", "t")];
    assert!(validate::validate(&nodes, &edges).is_empty());
}

#[test]
fn dangling_edge_still_connects_its_known_endpoint() {
    let nodes = vec![start("s"), end("e")];
    let edges = vec![edge("s", "deleted"), edge("deleted-too", "e")];
    assert!(validate::validate(&nodes, &edges).is_empty());
}

#[test]
fn legacy_kind_field_is_honoured() {
    let json = include_str!("fixtures/legacy_kind.json");
    let wf = parse::import(json).unwrap();
    let findings = validate::validate_workflow(&wf);
    assert_eq!(
        messages(&findings),
        vec!["Node \"Mystery\" (unknown) is not connected to the workflow."]
    );
}

#[test]
fn validation_is_deterministic_and_read_only() {
    let wf = onboarding_workflow();
    let snapshot = wf.clone();
    let first = serde_json::to_string(&validate::validate_workflow(&wf)).unwrap();
    let second = serde_json::to_string(&validate::validate_workflow(&wf)).unwrap();
    assert_eq!(first, second);
    assert_eq!(wf, snapshot);
}

#[test]
fn findings_serialize_with_type_field() {
    let findings = validate::validate(&[], &[]);
    let json = serde_json::to_value(&findings).unwrap();
    assert_eq!(json[0]["type"], "warning");
    assert!(json[0]["message"].as_str().unwrap().contains("empty"));
}

#[test]
fn empty_type_falls_back_to_kind() {
    let wf = parse::import(
        r#"{
            "nodes": [
                { "id": "s", "data": { "type": "", "kind": "start", "label": "Begin" } },
                { "id": "e", "data": { "type": "end", "label": "End" } }
            ],
            "edges": [{ "id": "x", "source": "s", "target": "e" }]
        }"#,
    )
    .unwrap();
    assert!(validate::validate_workflow(&wf).is_empty());
}
