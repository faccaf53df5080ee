//! Route definitions

use std::sync::Arc;

use axum::{Router, routing::get};

use crate::{handlers, middleware::AdminGuardLayer, state::AppState};

/// Create the main router
///
/// Admin routes live under `{api_prefix}/admin` and always run behind the
/// admin guard; `/health` is public.
pub fn create_router(state: AppState, api_prefix: &str) -> Router {
    let admin = Router::new()
        .route(
            "/documents/{collection}",
            get(handlers::documents::list_documents),
        )
        .route(
            "/documents/{collection}/{id}",
            get(handlers::documents::get_document)
                .put(handlers::documents::put_document)
                .delete(handlers::documents::delete_document),
        )
        .layer(AdminGuardLayer::new(Arc::clone(&state.guard)));

    let admin_prefix = format!("{}/admin", api_prefix.trim_end_matches('/'));

    Router::new()
        .route("/health", get(handlers::health::health_check))
        .nest(&admin_prefix, admin)
        .with_state(state)
}
