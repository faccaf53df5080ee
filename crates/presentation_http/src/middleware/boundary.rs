//! Boundary middleware: CORS negotiation, preflight short-circuit and
//! security headers
//!
//! Runs before anything else on every request. For paths under the API
//! prefix the allow-origin header is decided per request:
//! - `Origin` present and allowed: the origin is echoed back
//! - no `Origin` (same-origin request): `*`
//! - `Origin` present but not allowed: no allow-origin header
//!
//! `OPTIONS` requests under the API prefix are answered with `204` and the
//! CORS headers only; they never reach a handler.
//!
//! Every other response gets the baseline hardening headers. Responses under
//! the admin UI prefix additionally deny framing outright and enable the
//! legacy XSS filter.

use std::{
    future::Future,
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
};

use axum::{
    body::Body,
    extract::Request,
    http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode, header},
    response::Response,
};
use infrastructure::ServerConfig;
use tower::{Layer, Service};

pub const ALLOWED_METHODS: &str = "GET, POST, PUT, DELETE, OPTIONS";
pub const ALLOWED_HEADERS: &str = "Content-Type, Authorization, x-admin-key";
/// Preflight cache lifetime in seconds
pub const PREFLIGHT_MAX_AGE: &str = "86400";

/// Boundary settings, fixed at startup
#[derive(Clone, Debug)]
pub struct BoundaryConfig {
    /// Explicit origin allow-list; empty means none
    pub allowed_origins: Vec<String>,
    pub api_prefix: String,
    pub admin_ui_prefix: String,
}

impl Default for BoundaryConfig {
    fn default() -> Self {
        Self {
            allowed_origins: Vec::new(),
            api_prefix: "/api".to_string(),
            admin_ui_prefix: "/admin".to_string(),
        }
    }
}

impl From<&ServerConfig> for BoundaryConfig {
    fn from(server: &ServerConfig) -> Self {
        Self {
            allowed_origins: server.allowed_origins.clone(),
            api_prefix: server.api_prefix.clone(),
            admin_ui_prefix: server.admin_ui_prefix.clone(),
        }
    }
}

impl BoundaryConfig {
    pub fn is_allowed_origin(&self, origin: &str) -> bool {
        self.allowed_origins.iter().any(|allowed| allowed == origin)
    }

    pub fn is_api_path(&self, path: &str) -> bool {
        under_prefix(path, &self.api_prefix)
    }

    pub fn is_admin_ui_path(&self, path: &str) -> bool {
        under_prefix(path, &self.admin_ui_prefix)
    }

    /// CORS headers for a request carrying `origin`
    pub fn cors_headers(&self, origin: Option<&HeaderValue>) -> HeaderMap {
        let mut headers = HeaderMap::new();

        match origin {
            None => {
                headers.insert(
                    header::ACCESS_CONTROL_ALLOW_ORIGIN,
                    HeaderValue::from_static("*"),
                );
            },
            Some(origin) => {
                let allowed = origin.to_str().is_ok_and(|o| self.is_allowed_origin(o));
                if allowed {
                    headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, origin.clone());
                }
            },
        }

        headers.insert(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOWED_METHODS),
        );
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOWED_HEADERS),
        );
        headers.insert(
            header::ACCESS_CONTROL_MAX_AGE,
            HeaderValue::from_static(PREFLIGHT_MAX_AGE),
        );

        headers
    }
}

/// Merge CORS headers into a response.
///
/// `Vary` is appended so values set further in (`Accept-Encoding`) survive;
/// everything else replaces.
fn apply_cors_headers(headers: &mut HeaderMap, cors: HeaderMap, has_origin: bool) {
    headers.extend(cors);
    // Caches must not reuse a response across origins
    if has_origin {
        headers.append(header::VARY, HeaderValue::from_static("Origin"));
    }
}

/// `/api` matches `/api` and `/api/...` but not `/apidocs`
fn under_prefix(path: &str, prefix: &str) -> bool {
    let prefix = prefix.trim_end_matches('/');
    if prefix.is_empty() {
        return true;
    }
    path.strip_prefix(prefix)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}

fn apply_hardening_headers(headers: &mut HeaderMap, admin_ui: bool) {
    headers.insert(
        HeaderName::from_static("x-content-type-options"),
        HeaderValue::from_static("nosniff"),
    );
    headers.insert(
        header::REFERRER_POLICY,
        HeaderValue::from_static("strict-origin-when-cross-origin"),
    );

    if admin_ui {
        headers.insert(
            HeaderName::from_static("x-frame-options"),
            HeaderValue::from_static("DENY"),
        );
        headers.insert(
            HeaderName::from_static("x-xss-protection"),
            HeaderValue::from_static("1; mode=block"),
        );
    } else {
        headers.insert(
            HeaderName::from_static("x-frame-options"),
            HeaderValue::from_static("SAMEORIGIN"),
        );
    }
}

/// Layer applying [`Boundary`] to every request
#[derive(Clone, Debug)]
pub struct BoundaryLayer {
    config: Arc<BoundaryConfig>,
}

impl BoundaryLayer {
    #[must_use]
    pub fn new(config: BoundaryConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }
}

impl<S> Layer<S> for BoundaryLayer {
    type Service = Boundary<S>;

    fn layer(&self, inner: S) -> Self::Service {
        Boundary {
            inner,
            config: Arc::clone(&self.config),
        }
    }
}

/// Middleware service for CORS and security headers
#[derive(Clone, Debug)]
pub struct Boundary<S> {
    inner: S,
    config: Arc<BoundaryConfig>,
}

impl<S> Service<Request> for Boundary<S>
where
    S: Service<Request, Response = Response> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request) -> Self::Future {
        let config = Arc::clone(&self.config);
        let mut inner = self.inner.clone();

        let path = req.uri().path();
        let api = config.is_api_path(path);
        let admin_ui = config.is_admin_ui_path(path);
        let origin = req.headers().get(header::ORIGIN);
        let has_origin = origin.is_some();
        let cors = api.then(|| config.cors_headers(origin));

        if api && req.method() == Method::OPTIONS {
            tracing::debug!(path = %path, "Answering CORS preflight");
            let mut response = Response::new(Body::empty());
            *response.status_mut() = StatusCode::NO_CONTENT;
            if let Some(cors) = cors {
                apply_cors_headers(response.headers_mut(), cors, has_origin);
            }
            return Box::pin(async move { Ok(response) });
        }

        Box::pin(async move {
            let mut response = inner.call(req).await?;
            let headers = response.headers_mut();

            if let Some(cors) = cors {
                apply_cors_headers(headers, cors, has_origin);
            }
            apply_hardening_headers(headers, admin_ui);

            Ok(response)
        })
    }
}
