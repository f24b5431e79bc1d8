//! Application layer: rendering and invocation strategies
//!
//! This layer turns domain lookups into launcher documents.

pub mod error;
pub mod render;
pub mod strategy;

pub use error::{ApplicationError, ApplicationResult};
pub use render::{to_json, Renderer};
pub use strategy::{strategy_for, Mode, NextStep};
