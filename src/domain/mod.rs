//! Domain layer: flowchart entities, lookup and threshold rules
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod chart;
pub mod entities;
pub mod error;
pub mod flowchart;
pub mod labs;
pub mod thresholds;

pub use chart::{anemia_chart, ROOT_ID};
pub use entities::*;
pub use error::DomainError;
pub use flowchart::Flowchart;
pub use labs::{LabStep, Prompt, ResultKind};
pub use thresholds::{Sex, Thresholds, THRESHOLDS};
