//! Unified error type for the boundaries around the engine.
//!
//! The validator and simulator themselves are total and never produce a
//! `WorkflowError`; these only arise when decoding text or bodies handed to
//! the engine from outside.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Parse,
    Import,
    Simulate,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Parse => write!(f, "Parse"),
            Phase::Import => write!(f, "Import"),
            Phase::Simulate => write!(f, "Simulate"),
        }
    }
}

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("Failed to parse workflow JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Invalid workflow: expected an object with \"nodes\" and \"edges\" arrays")]
    InvalidShape,

    #[error("Failed to simulate workflow: {0}")]
    Simulation(String),
}

impl WorkflowError {
    pub fn code(&self) -> &'static str {
        match self {
            WorkflowError::InvalidJson(_) => "P001",
            WorkflowError::InvalidShape => "P002",
            WorkflowError::Simulation(_) => "S001",
        }
    }

    pub fn phase(&self) -> Phase {
        match self {
            WorkflowError::InvalidJson(_) => Phase::Parse,
            WorkflowError::InvalidShape => Phase::Import,
            WorkflowError::Simulation(_) => Phase::Simulate,
        }
    }
}
