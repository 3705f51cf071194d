//! Per-node configuration hints.
//! These only ever produce warnings: a half-filled form is normal while a
//! designer is still editing.

use crate::catalog::{self, AutomationAction};
use crate::parse::types::{NodePayload, WorkflowNode};

use super::Finding;

/// Validate a single node's configuration. Returns all findings.
pub fn validate_node_config(node: &WorkflowNode, actions: &[AutomationAction]) -> Vec<Finding> {
    let mut findings = Vec::new();
    let name = node.display_name();

    match node.payload() {
        NodePayload::Task(d) => {
            if d.assignee.trim().is_empty() {
                findings.push(Finding::warning(format!(
                    "Task \"{}\" has no assignee.",
                    name
                )));
            }
        }
        NodePayload::Approval(d) => {
            if d.auto_approve_threshold < 0.0 {
                findings.push(Finding::warning(format!(
                    "Approval \"{}\" has a negative auto-approve threshold ({}).",
                    name, d.auto_approve_threshold
                )));
            }
        }
        NodePayload::Automated(d) => {
            if d.action_id.is_empty() {
                findings.push(Finding::warning(format!(
                    "Automated step \"{}\" has no action selected.",
                    name
                )));
                return findings;
            }
            let Some(action) = catalog::find(actions, &d.action_id) else {
                findings.push(Finding::warning(format!(
                    "Automated step \"{}\" uses unknown action '{}'.",
                    name, d.action_id
                )));
                return findings;
            };
            for param in &action.params {
                let filled = d.params.get(param).is_some_and(|v| !v.trim().is_empty());
                if !filled {
                    findings.push(Finding::warning(format!(
                        "Automated step \"{}\" is missing parameter '{}' for {}.",
                        name, param, action.label
                    )));
                }
            }
        }
        NodePayload::Start(_) | NodePayload::End(_) | NodePayload::Raw(_) => {}
    }

    findings
}
