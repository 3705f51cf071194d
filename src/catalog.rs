//! Automation catalog and the per-node parameter cache.
//!
//! The simulator never consults the catalog. It only drives the automated
//! step's form: which parameters an action needs, and how previously typed
//! values come back when a designer switches between actions.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::WorkflowError;
use crate::parse::types::AutomatedData;

/// Cache key for parameters typed before any action was chosen.
pub const NO_ACTION_KEY: &str = "__no_action__";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutomationAction {
    pub id: String,
    pub label: String,
    /// Required parameter names, in display order.
    pub params: Vec<String>,
}

impl AutomationAction {
    pub fn new(id: &str, label: &str, params: &[&str]) -> Self {
        AutomationAction {
            id: id.into(),
            label: label.into(),
            params: params.iter().map(|p| p.to_string()).collect(),
        }
    }
}

pub fn default_catalog() -> Vec<AutomationAction> {
    vec![
        AutomationAction::new("send_email", "Send Email", &["to", "subject"]),
        AutomationAction::new("generate_doc", "Generate Document", &["template", "recipient"]),
    ]
}

/// Parse a catalog given as a JSON array of actions.
pub fn parse_catalog(json: &str) -> Result<Vec<AutomationAction>, WorkflowError> {
    Ok(serde_json::from_str(json)?)
}

pub fn find<'a>(actions: &'a [AutomationAction], id: &str) -> Option<&'a AutomationAction> {
    actions.iter().find(|a| a.id == id)
}

impl AutomatedData {
    /// Switch the step to another action.
    ///
    /// Unknown actions clear the current parameters and leave the cache
    /// alone. Known actions get exactly their declared parameters, filled
    /// from the cache where a value was typed before.
    pub fn select_action(&mut self, action_id: &str, actions: &[AutomationAction]) {
        self.action_id = action_id.to_string();

        let Some(action) = find(actions, action_id) else {
            self.params.clear();
            return;
        };

        let cached = self.saved_params.get(action_id);
        let params: BTreeMap<String, String> = action
            .params
            .iter()
            .map(|key| {
                let value = cached
                    .and_then(|c| c.get(key))
                    .cloned()
                    .unwrap_or_default();
                (key.clone(), value)
            })
            .collect();

        self.saved_params.insert(action_id.to_string(), params.clone());
        self.params = params;
    }

    /// Set one parameter and mirror the parameter map into the cache.
    pub fn set_param(&mut self, key: &str, value: &str) {
        self.params.insert(key.to_string(), value.to_string());
        let cache_key = if self.action_id.is_empty() {
            NO_ACTION_KEY
        } else {
            self.action_id.as_str()
        };
        self.saved_params
            .insert(cache_key.to_string(), self.params.clone());
    }
}
