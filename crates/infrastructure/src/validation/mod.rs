//! Configuration validation module
//!
//! Security checks on the admin access configuration, run at startup.

pub mod security;

pub use security::{SecurityValidator, SecurityWarning, WarningSeverity};
