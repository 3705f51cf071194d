//! Rust types mirroring the canvas node/edge JSON.
//!
//! Nodes arrive in the canvas library's shape: an `id`, a `position`, a
//! renderer `type`, and a loosely-typed `data` bag. The bag is resolved once,
//! here, into a `NodeKind` plus a closed `NodePayload`, so nothing downstream
//! has to guess at field names.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// =============================================================================
// TOP-LEVEL WORKFLOW
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Workflow {
    pub nodes: Vec<WorkflowNode>,
    pub edges: Vec<WorkflowEdge>,
}

impl Workflow {
    pub fn new(nodes: Vec<WorkflowNode>, edges: Vec<WorkflowEdge>) -> Self {
        Workflow { nodes, edges }
    }

    pub fn node(&self, id: &str) -> Option<&WorkflowNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn node_mut(&mut self, id: &str) -> Option<&mut WorkflowNode> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "Value")]
pub struct WorkflowEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_handle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_handle: Option<String>,
    /// Canvas-owned keys (`type`, `animated`, `style`, ...) carried through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

const EDGE_KEYS: [&str; 5] = ["id", "source", "target", "sourceHandle", "targetHandle"];

impl WorkflowEdge {
    pub fn new(id: impl Into<String>, source: impl Into<String>, target: impl Into<String>) -> Self {
        WorkflowEdge {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            source_handle: None,
            target_handle: None,
            extra: Map::new(),
        }
    }
}

impl From<Value> for WorkflowEdge {
    fn from(value: Value) -> Self {
        WorkflowEdge {
            id: string_field(&value, "id").unwrap_or_default(),
            source: string_field(&value, "source").unwrap_or_default(),
            target: string_field(&value, "target").unwrap_or_default(),
            source_handle: string_field(&value, "sourceHandle"),
            target_handle: string_field(&value, "targetHandle"),
            extra: other_fields(&value, &EDGE_KEYS),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Position { x, y }
    }

    fn from_value(value: Option<&Value>) -> Self {
        let coord = |axis: &str| {
            value
                .and_then(|v| v.get(axis))
                .and_then(Value::as_f64)
                .unwrap_or_default()
        };
        Position::new(coord("x"), coord("y"))
    }
}

// =============================================================================
// NODE KIND
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Start,
    Task,
    Approval,
    Automated,
    End,
    #[serde(other)]
    Unknown,
}

impl NodeKind {
    pub const ALL: [NodeKind; 5] = [
        NodeKind::Start,
        NodeKind::Task,
        NodeKind::Approval,
        NodeKind::Automated,
        NodeKind::End,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Start => "start",
            NodeKind::Task => "task",
            NodeKind::Approval => "approval",
            NodeKind::Automated => "automated",
            NodeKind::End => "end",
            NodeKind::Unknown => "unknown",
        }
    }

    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "start" => NodeKind::Start,
            "task" => NodeKind::Task,
            "approval" => NodeKind::Approval,
            "automated" => NodeKind::Automated,
            "end" => NodeKind::End,
            _ => NodeKind::Unknown,
        }
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolve a node's kind from its raw `data` bag.
///
/// A non-empty string under `type` wins, then a non-empty string under
/// `kind`; anything else (missing, empty, non-string, unrecognized) is
/// `Unknown`.
pub fn classify(data: &Value) -> NodeKind {
    let tag = |key: &str| {
        data.get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    };
    tag("type")
        .or_else(|| tag("kind"))
        .map(NodeKind::from_tag)
        .unwrap_or(NodeKind::Unknown)
}

// =============================================================================
// NODE PAYLOADS
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyValue {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub value: String,
}

impl KeyValue {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        KeyValue {
            key: key.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StartData {
    pub title: String,
    pub metadata: Vec<KeyValue>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TaskData {
    pub title: String,
    pub description: String,
    pub assignee: String,
    pub due_date: String,
    pub custom_fields: Vec<KeyValue>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ApprovalData {
    pub title: String,
    pub approver_role: String,
    pub auto_approve_threshold: f64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AutomatedData {
    pub title: String,
    pub action_id: String,
    /// Parameters for the currently selected action.
    pub params: BTreeMap<String, String>,
    /// Previously entered parameters, keyed by action id.
    pub saved_params: BTreeMap<String, BTreeMap<String, String>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EndData {
    pub end_message: String,
    pub summary_flag: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Kind-specific attributes of a node.
///
/// Each typed struct keeps the data keys it does not model in `extra`.
/// `Raw` keeps the attribute bag as received when the kind is unknown
/// or when the bag's fields do not have the expected JSON types.
#[derive(Debug, Clone, PartialEq)]
pub enum NodePayload {
    Start(StartData),
    Task(TaskData),
    Approval(ApprovalData),
    Automated(AutomatedData),
    End(EndData),
    Raw(Map<String, Value>),
}

impl NodePayload {
    fn decode(kind: NodeKind, data: &Map<String, Value>) -> Self {
        // `type` and `label` live on the node itself.
        let mut fields = data.clone();
        fields.remove("type");
        fields.remove("label");
        let decoded = match kind {
            NodeKind::Start => decode_as(fields).map(NodePayload::Start),
            NodeKind::Task => decode_as(fields).map(NodePayload::Task),
            NodeKind::Approval => decode_as(fields).map(NodePayload::Approval),
            NodeKind::Automated => decode_as(fields).map(NodePayload::Automated),
            NodeKind::End => decode_as(fields).map(NodePayload::End),
            NodeKind::Unknown => None,
        };
        decoded.unwrap_or_else(|| NodePayload::Raw(data.clone()))
    }

    pub fn title(&self) -> Option<&str> {
        match self {
            NodePayload::Start(d) => Some(&d.title),
            NodePayload::Task(d) => Some(&d.title),
            NodePayload::Approval(d) => Some(&d.title),
            NodePayload::Automated(d) => Some(&d.title),
            NodePayload::End(_) => None,
            NodePayload::Raw(map) => map.get("title").and_then(Value::as_str),
        }
    }

    fn to_map(&self) -> Map<String, Value> {
        let value = match self {
            NodePayload::Start(d) => serde_json::to_value(d),
            NodePayload::Task(d) => serde_json::to_value(d),
            NodePayload::Approval(d) => serde_json::to_value(d),
            NodePayload::Automated(d) => serde_json::to_value(d),
            NodePayload::End(d) => serde_json::to_value(d),
            NodePayload::Raw(map) => return map.clone(),
        };
        match value {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }
}

fn decode_as<T: DeserializeOwned>(fields: Map<String, Value>) -> Option<T> {
    serde_json::from_value(Value::Object(fields)).ok()
}

// =============================================================================
// WORKFLOW NODE
// =============================================================================

/// A typed vertex of the workflow graph.
///
/// `kind` is fixed at construction; payload fields are only reachable
/// mutably through the accessor matching that kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub struct WorkflowNode {
    pub id: String,
    pub position: Position,
    /// Canvas renderer name (`"default"` for nodes created by the editor).
    pub renderer: Option<String>,
    pub label: Option<String>,
    /// Top-level canvas keys other than `id`, `position`, `type` and `data`.
    pub extra: Map<String, Value>,
    kind: NodeKind,
    payload: NodePayload,
}

impl WorkflowNode {
    pub fn new(id: impl Into<String>, kind: NodeKind, payload: NodePayload) -> Self {
        let payload = match (kind, payload) {
            (NodeKind::Unknown, p @ NodePayload::Raw(_)) => p,
            (NodeKind::Unknown, p) => NodePayload::Raw(p.to_map()),
            (_, p) => p,
        };
        WorkflowNode {
            id: id.into(),
            position: Position::default(),
            renderer: None,
            label: None,
            extra: Map::new(),
            kind,
            payload,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn at(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn payload(&self) -> &NodePayload {
        &self.payload
    }

    pub fn title(&self) -> Option<&str> {
        self.payload.title()
    }

    /// Name used in validation findings: the label when present, else the id.
    pub fn display_name(&self) -> &str {
        self.label.as_deref().unwrap_or(self.id.as_str())
    }

    /// Name used in simulation steps: first non-empty of label, title, id.
    pub fn step_label(&self) -> &str {
        [self.label.as_deref(), self.title()]
            .into_iter()
            .flatten()
            .find(|s| !s.is_empty())
            .unwrap_or(self.id.as_str())
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = Some(label.into());
    }

    pub fn start_mut(&mut self) -> Option<&mut StartData> {
        match &mut self.payload {
            NodePayload::Start(d) => Some(d),
            _ => None,
        }
    }

    pub fn task_mut(&mut self) -> Option<&mut TaskData> {
        match &mut self.payload {
            NodePayload::Task(d) => Some(d),
            _ => None,
        }
    }

    pub fn approval_mut(&mut self) -> Option<&mut ApprovalData> {
        match &mut self.payload {
            NodePayload::Approval(d) => Some(d),
            _ => None,
        }
    }

    pub fn automated_mut(&mut self) -> Option<&mut AutomatedData> {
        match &mut self.payload {
            NodePayload::Automated(d) => Some(d),
            _ => None,
        }
    }

    pub fn end_mut(&mut self) -> Option<&mut EndData> {
        match &mut self.payload {
            NodePayload::End(d) => Some(d),
            _ => None,
        }
    }

    pub fn is_start(&self) -> bool {
        self.kind == NodeKind::Start
    }

    pub fn is_end(&self) -> bool {
        self.kind == NodeKind::End
    }
}

impl From<Value> for WorkflowNode {
    fn from(value: Value) -> Self {
        let data = match value.get("data") {
            Some(Value::Object(map)) => map.clone(),
            _ => Map::new(),
        };
        let kind = classify(&Value::Object(data.clone()));
        WorkflowNode {
            id: string_field(&value, "id").unwrap_or_default(),
            position: Position::from_value(value.get("position")),
            renderer: string_field(&value, "type"),
            label: data.get("label").and_then(scalar_text),
            extra: other_fields(&value, &NODE_KEYS),
            kind,
            payload: NodePayload::decode(kind, &data),
        }
    }
}

impl From<WorkflowNode> for Value {
    fn from(node: WorkflowNode) -> Self {
        let mut data = node.payload.to_map();
        if !matches!(node.payload, NodePayload::Raw(_)) {
            data.insert("type".into(), Value::from(node.kind.as_str()));
        }
        if let Some(label) = node.label {
            // A raw bag may hold a non-string label that already reads the same.
            if data.get("label").and_then(scalar_text).as_deref() != Some(label.as_str()) {
                data.insert("label".into(), Value::from(label));
            }
        }

        let mut out = node.extra;
        out.insert("id".into(), Value::from(node.id));
        out.insert(
            "position".into(),
            serde_json::json!({ "x": node.position.x, "y": node.position.y }),
        );
        if let Some(renderer) = node.renderer {
            out.insert("type".into(), Value::from(renderer));
        }
        out.insert("data".into(), Value::Object(data));
        Value::Object(out)
    }
}

const NODE_KEYS: [&str; 4] = ["id", "position", "type", "data"];

fn string_field(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(Value::as_str).map(str::to_owned)
}

/// Labels are shown as text; numbers and booleans are printed as-is.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn other_fields(value: &Value, known: &[&str]) -> Map<String, Value> {
    match value {
        Value::Object(map) => map
            .iter()
            .filter(|(k, _)| !known.contains(&k.as_str()))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect(),
        _ => Map::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn classify_prefers_type_then_kind() {
        assert_eq!(classify(&json!({ "type": "task", "kind": "end" })), NodeKind::Task);
        assert_eq!(classify(&json!({ "kind": "end" })), NodeKind::End);
        assert_eq!(classify(&json!({ "type": "", "kind": "start" })), NodeKind::Start);
        assert_eq!(classify(&json!({ "type": "banana" })), NodeKind::Unknown);
        assert_eq!(classify(&json!({ "type": 3 })), NodeKind::Unknown);
        assert_eq!(classify(&json!({})), NodeKind::Unknown);
        assert_eq!(classify(&Value::Null), NodeKind::Unknown);
    }

    #[test]
    fn node_decodes_typed_payload() {
        let node = WorkflowNode::from(json!({
            "id": "a1",
            "position": { "x": 10, "y": 20.5 },
            "type": "default",
            "data": {
                "type": "approval",
                "label": "Manager sign-off",
                "title": "Approve",
                "approverRole": "Manager",
                "autoApproveThreshold": 3
            }
        }));
        assert_eq!(node.kind(), NodeKind::Approval);
        assert_eq!(node.position, Position::new(10.0, 20.5));
        assert_eq!(node.renderer.as_deref(), Some("default"));
        match node.payload() {
            NodePayload::Approval(d) => {
                assert_eq!(d.approver_role, "Manager");
                assert_eq!(d.auto_approve_threshold, 3.0);
            }
            other => panic!("expected approval payload, got {:?}", other),
        }
    }

    #[test]
    fn mistyped_payload_is_kept_raw() {
        let node = WorkflowNode::from(json!({
            "id": "t1",
            "data": { "type": "task", "title": "Review", "assignee": 42 }
        }));
        assert_eq!(node.kind(), NodeKind::Task);
        assert!(matches!(node.payload(), NodePayload::Raw(_)));
        assert_eq!(node.title(), Some("Review"));
        assert!(node.clone().task_mut().is_none());
    }

    #[test]
    fn malformed_node_degrades() {
        let node = WorkflowNode::from(json!(7));
        assert_eq!(node.id, "");
        assert_eq!(node.kind(), NodeKind::Unknown);
        assert_eq!(node.position, Position::default());
    }

    #[test]
    fn step_label_skips_empty_values() {
        let node = WorkflowNode::new(
            "n1",
            NodeKind::Task,
            NodePayload::Task(TaskData {
                title: "Collect documents".into(),
                ..Default::default()
            }),
        )
        .with_label("");
        assert_eq!(node.step_label(), "Collect documents");
        assert_eq!(node.display_name(), "");

        let bare = WorkflowNode::new("n2", NodeKind::End, NodePayload::End(EndData::default()));
        assert_eq!(bare.step_label(), "n2");
        assert_eq!(bare.display_name(), "n2");
    }

    #[test]
    fn node_serializes_kind_tag_and_label() {
        let node = WorkflowNode::new("e1", NodeKind::End, NodePayload::End(EndData::default()))
            .with_label("Done");
        let value = Value::from(node);
        assert_eq!(value["data"]["type"], "end");
        assert_eq!(value["data"]["label"], "Done");
        assert_eq!(value["data"]["summaryFlag"], false);
        assert!(value.get("type").is_none());
    }

    #[test]
    fn scalar_labels_are_printed() {
        let node = WorkflowNode::from(json!({ "id": "n7", "data": { "type": "task", "label": 5 } }));
        assert_eq!(node.display_name(), "5");
        assert_eq!(node.step_label(), "5");

        let raw = WorkflowNode::from(json!({ "id": "r", "data": { "label": true } }));
        assert_eq!(raw.display_name(), "true");
        assert_eq!(Value::from(raw)["data"]["label"], true);

        let null = WorkflowNode::from(json!({ "id": "n8", "data": { "label": null } }));
        assert_eq!(null.display_name(), "n8");
    }

    #[test]
    fn unmodelled_keys_survive_encoding() {
        let node = WorkflowNode::from(json!({
            "id": "t1",
            "selected": true,
            "measured": { "width": 150, "height": 40 },
            "data": { "type": "task", "label": "Review", "notes": "keep me" }
        }));
        match node.payload() {
            NodePayload::Task(d) => {
                assert_eq!(d.extra.get("notes"), Some(&json!("keep me")));
                assert!(!d.extra.contains_key("type"));
                assert!(!d.extra.contains_key("label"));
            }
            other => panic!("expected task payload, got {:?}", other),
        }
        let value = Value::from(node);
        assert_eq!(value["selected"], true);
        assert_eq!(value["measured"]["width"], 150);
        assert_eq!(value["data"]["notes"], "keep me");
        assert_eq!(value["data"]["type"], "task");
    }

    #[test]
    fn edge_decodes_leniently() {
        let edge = WorkflowEdge::from(json!({ "source": "a", "target": 5 }));
        assert_eq!(edge.id, "");
        assert_eq!(edge.source, "a");
        assert_eq!(edge.target, "");
        assert_eq!(edge.source_handle, None);
    }
}
