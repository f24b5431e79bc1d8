//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent lookup failures and flowchart table defects.
/// These are independent of infrastructure concerns.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("node not found: {0}")]
    NodeNotFound(String),

    #[error("alias cycle detected starting at: {0}")]
    AliasCycle(String),

    #[error("option '{label}' of {node} points to missing node: {target}")]
    DanglingTarget {
        node: String,
        label: String,
        target: String,
    },

    #[error("alias {alias} points to missing node: {target}")]
    DanglingAlias { alias: String, target: String },

    #[error("duplicate option target in {node}: {target}")]
    DuplicateTarget { node: String, target: String },

    #[error("result node without diagnoses: {0}")]
    EmptyDiagnoses(String),

    #[error("question node without options: {0}")]
    EmptyOptions(String),

    #[error("node without text: {0}")]
    EmptyText(String),

    #[error("root node missing: {0}")]
    MissingRoot(String),
}
