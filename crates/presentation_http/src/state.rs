//! Application state shared across handlers

use std::sync::Arc;

use application::{AdminGuard, DocumentService};

/// Shared application state
#[derive(Clone, Debug)]
pub struct AppState {
    /// Document operations behind the admin routes
    pub documents: Arc<DocumentService>,
    /// Guard applied to every admin route
    pub guard: Arc<AdminGuard>,
}
