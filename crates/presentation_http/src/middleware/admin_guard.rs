//! Admin guard middleware
//!
//! Wraps the admin routes with [`application::AdminGuard`]: rate limit,
//! admin secret, optional bearer token, then the inner service. Every
//! rejection and every handler failure (including a panic) leaves as one of
//! the fixed [`ApiError`] shapes.

use std::{
    future::Future,
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
};

use application::{AdminGuard, InboundRequest};
use axum::{
    extract::{OriginalUri, Request},
    response::{IntoResponse, Response},
};
use tower::{Layer, Service};

use crate::error::ApiError;

/// An axum request seen through the guard's narrow request interface
#[derive(Debug)]
pub struct AdminRequest(Request);

impl AdminRequest {
    pub const fn new(request: Request) -> Self {
        Self(request)
    }

    pub fn into_inner(self) -> Request {
        self.0
    }
}

impl InboundRequest for AdminRequest {
    fn header(&self, name: &str) -> Option<&str> {
        self.0.headers().get(name).and_then(|v| v.to_str().ok())
    }

    fn method(&self) -> &str {
        self.0.method().as_str()
    }

    /// Full path, also when the admin routes are nested under a prefix
    fn path(&self) -> &str {
        self.0
            .extensions()
            .get::<OriginalUri>()
            .map_or_else(|| self.0.uri().path(), |original| original.0.path())
    }
}

/// Layer that puts routes behind the admin guard
#[derive(Clone, Debug)]
pub struct AdminGuardLayer {
    guard: Arc<AdminGuard>,
}

impl AdminGuardLayer {
    #[must_use]
    pub const fn new(guard: Arc<AdminGuard>) -> Self {
        Self { guard }
    }
}

impl<S> Layer<S> for AdminGuardLayer {
    type Service = AdminGuardService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        AdminGuardService {
            inner,
            guard: Arc::clone(&self.guard),
        }
    }
}

/// Middleware service running the admin guard pipeline
#[derive(Clone, Debug)]
pub struct AdminGuardService<S> {
    inner: S,
    guard: Arc<AdminGuard>,
}

impl<S> Service<Request> for AdminGuardService<S>
where
    S: Service<Request, Response = Response> + Clone + Send + 'static,
    S::Future: Send,
    S::Error: std::fmt::Display + Send,
{
    type Response = Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request) -> Self::Future {
        let guard = Arc::clone(&self.guard);
        let mut inner = self.inner.clone();

        Box::pin(async move {
            let outcome = guard
                .guard(AdminRequest::new(req), move |request: AdminRequest| {
                    inner.call(request.into_inner())
                })
                .await;

            Ok(outcome.unwrap_or_else(|e| ApiError::from(e).into_response()))
        })
    }
}
