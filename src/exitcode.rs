//! Standard exit codes (BSD sysexits.h compatible)
//!
//! Domain outcomes, including an unknown node, always exit 0.

/// Data format error (flowchart defects)
pub const DATAERR: i32 = 65;

/// Internal software error
pub const SOFTWARE: i32 = 70;

/// Input/output error
pub const IOERR: i32 = 74;

/// Configuration error
pub const CONFIG: i32 = 78;
