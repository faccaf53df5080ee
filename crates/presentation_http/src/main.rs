//! Matchdesk admin API server
//!
//! Main entry point for the HTTP server.

use std::{sync::Arc, time::Duration};

use application::{AdminGuard, DocumentService, RateLimiter};
use infrastructure::{
    AppConfig, InMemoryDocumentStore, InMemoryRateLimitStore, SecurityValidator, SystemClock,
};
use presentation_http::{
    AppState, BoundaryConfig, BoundaryLayer, create_router, spawn_rate_limit_sweep_task,
};
use tokio::{net::TcpListener, signal};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_LOG_FILTER: &str = "matchdesk_server=debug,presentation_http=debug,tower_http=debug";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Config decides the log format, so it is loaded before tracing exists
    let loaded = AppConfig::load();
    let json_logs = loaded.as_ref().is_ok_and(|c| c.server.json_logs());
    init_tracing(json_logs);

    info!("Matchdesk v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = loaded.unwrap_or_else(|e| {
        tracing::warn!("Failed to load config, using defaults: {}", e);
        AppConfig::default()
    });

    info!(
        environment = %config.environment(),
        host = %config.server.host,
        port = %config.server.port,
        allowed_origins = config.server.allowed_origins.len(),
        token_enforcement = config.security.token_enforcement,
        "Configuration loaded"
    );

    let warnings = SecurityValidator::validate(&config);
    SecurityValidator::log_warnings(&warnings);
    if SecurityValidator::should_block_startup(&config, &warnings) {
        anyhow::bail!(
            "Refusing to start in production with critical security issues \
             (set MATCHDESK_ALLOW_INSECURE_CONFIG=true to override)"
        );
    }

    let rate_policy = config.security.rate_policy()?;

    // One limiter for the whole process, shared by the guard and the sweep task
    let limiter = RateLimiter::new(
        Arc::new(InMemoryRateLimitStore::new()),
        Arc::new(SystemClock),
    );
    let guard = Arc::new(AdminGuard::new(
        limiter.clone(),
        config.security.secret_verifier(),
        config.security.token_policy(),
        rate_policy,
    ));
    let documents = Arc::new(DocumentService::new(Arc::new(InMemoryDocumentStore::new())));

    let sweep_handle = spawn_rate_limit_sweep_task(limiter, config.security.sweep_interval());

    let state = AppState { documents, guard };

    // Last added = outermost: the boundary layer sees every request first
    let app = create_router(state, &config.server.api_prefix)
        .layer(TraceLayer::new_for_http())
        .layer(BoundaryLayer::new(BoundaryConfig::from(&config.server)));

    let addr = config.server.bind_address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server listening on http://{}", addr);

    let shutdown_timeout = Duration::from_secs(config.server.shutdown_timeout_secs.unwrap_or(30));

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown_timeout))
        .await?;

    sweep_handle.abort();
    info!("Server shutdown complete");

    Ok(())
}

fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

/// Wait for shutdown signals (SIGINT, SIGTERM)
async fn shutdown_signal(timeout: Duration) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        }
    }

    info!("Waiting up to {:?} for connections to close...", timeout);
}
