//! Application-level errors (wraps domain errors)

use itertools::Itertools;
use thiserror::Error;

use crate::domain::DomainError;

/// Application errors add configuration and output concerns to domain defects.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("config error: {message}")]
    Config { message: String },

    #[error("render document: {source}")]
    Render {
        #[source]
        source: serde_json::Error,
    },

    #[error("flowchart has {} defect(s): {}", .defects.len(), .defects.iter().join("; "))]
    InvalidChart { defects: Vec<DomainError> },
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
