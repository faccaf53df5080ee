//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer: clocks, the sharded
//! in-memory rate-limit store and the document store. Also owns
//! configuration loading and startup security validation.

pub mod adapters;
pub mod config;
pub mod validation;

pub use adapters::*;
pub use config::{AppConfig, Environment, SecurityConfig, ServerConfig};
pub use validation::{SecurityValidator, SecurityWarning, WarningSeverity};
