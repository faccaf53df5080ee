//! HTTP middleware components
//!
//! The boundary layer (CORS and security headers) wraps everything; the
//! admin guard layer wraps the admin routes only.

pub mod admin_guard;
pub mod boundary;

pub use admin_guard::{AdminGuardLayer, AdminGuardService, AdminRequest};
pub use boundary::{Boundary, BoundaryConfig, BoundaryLayer};
