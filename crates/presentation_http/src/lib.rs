//! Matchdesk HTTP presentation layer
//!
//! Admin API surface: the boundary layer (CORS, preflight, security
//! headers), the admin guard layer, document handlers and the rate-limit
//! sweep task.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod tasks;

pub use error::ApiError;
pub use middleware::{AdminGuardLayer, BoundaryConfig, BoundaryLayer};
pub use routes::create_router;
pub use state::AppState;
pub use tasks::spawn_rate_limit_sweep_task;
