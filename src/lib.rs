//! anemia: differential-diagnosis flowchart for launcher script filters
//!
//! Architecture:
//! - `domain`: flowchart table, alias resolution, threshold rules (no I/O)
//! - `application`: rendering and invocation strategies
//! - `cli`: command-line interface
//! - `config`: layered settings

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod util;
