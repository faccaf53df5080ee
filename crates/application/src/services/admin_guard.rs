//! Admin API access guard
//!
//! Runs every administrative request through a fixed pipeline, stopping at
//! the first failure:
//!
//! ```text
//! resolve client id -> rate limit -> x-admin-key -> (bearer token) -> handler
//!        |                  |              |               |            |
//!        |             RateLimited   Unauthenticated   Forbidden   Internal
//! ```
//!
//! The secret check always runs, whether or not the token layer is enforced.
//! Handler errors and panics are caught here and reported as `Internal`; the
//! original error is logged, never returned. The guard does not retry.

use std::{fmt, future::Future, panic::AssertUnwindSafe, sync::Arc};

use domain::{ClientId, RateLimitDecision, RatePolicy};
use futures::FutureExt;
use tracing::{debug, error, warn};

use super::{
    client_identity::resolve_client_id, rate_limiter::RateLimiter,
    secret_verifier::SecretVerifier, token_policy::TokenPolicy,
};
use crate::{error::ApplicationError, ports::InboundRequest};

/// Header carrying the static admin secret
pub const ADMIN_KEY_HEADER: &str = "x-admin-key";
/// Header carrying the optional bearer token
pub const AUTHORIZATION_HEADER: &str = "authorization";

const BEARER_PREFIX: &str = "Bearer ";

/// Result of a request that passed every check
#[derive(Debug, Clone)]
pub struct Admission {
    pub client_id: ClientId,
    pub decision: RateLimitDecision,
}

/// Admin guard shared by every admin route
#[derive(Debug, Clone)]
pub struct AdminGuard {
    limiter: RateLimiter,
    secret: Arc<SecretVerifier>,
    tokens: TokenPolicy,
    policy: RatePolicy,
}

impl AdminGuard {
    pub fn new(
        limiter: RateLimiter,
        secret: SecretVerifier,
        tokens: TokenPolicy,
        policy: RatePolicy,
    ) -> Self {
        Self {
            limiter,
            secret: Arc::new(secret),
            tokens,
            policy,
        }
    }

    /// The limiter backing this guard
    pub const fn limiter(&self) -> &RateLimiter {
        &self.limiter
    }

    pub const fn policy(&self) -> &RatePolicy {
        &self.policy
    }

    pub const fn token_policy(&self) -> &TokenPolicy {
        &self.tokens
    }

    /// Run admission, secret and token checks without invoking a handler
    pub fn admit<R: InboundRequest + ?Sized>(
        &self,
        request: &R,
    ) -> Result<Admission, ApplicationError> {
        let client_id = resolve_client_id(request);
        let path = request.path();

        let decision = self.limiter.check(&client_id, &self.policy);
        if !decision.allowed {
            let retry_after_secs = decision.retry_after_secs(self.limiter.now());
            warn!(
                client_id = %client_id,
                path = %path,
                retry_after_secs,
                "Admin request rate limited"
            );
            return Err(ApplicationError::RateLimited { retry_after_secs });
        }

        if !self.secret.verify(request.header(ADMIN_KEY_HEADER)) {
            warn!(client_id = %client_id, path = %path, "Admin request with invalid secret key");
            return Err(ApplicationError::Unauthenticated);
        }

        if self.tokens.is_enforced() {
            let bearer = request
                .header(AUTHORIZATION_HEADER)
                .and_then(|value| value.strip_prefix(BEARER_PREFIX));
            if !self.tokens.verify(bearer) {
                warn!(client_id = %client_id, path = %path, "Admin request with invalid admin token");
                return Err(ApplicationError::Forbidden);
            }
        }

        debug!(
            client_id = %client_id,
            path = %path,
            remaining = decision.remaining,
            "Admin request admitted"
        );
        Ok(Admission {
            client_id,
            decision,
        })
    }

    /// Guard `handler`: run the checks, then invoke it with the request.
    ///
    /// The handler's success value is returned unchanged. Its errors and
    /// panics become [`ApplicationError::Internal`] with a generic message.
    pub async fn guard<R, F, Fut, T, E>(
        &self,
        request: R,
        handler: F,
    ) -> Result<T, ApplicationError>
    where
        R: InboundRequest,
        F: FnOnce(R) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: fmt::Display,
    {
        let path = request.path().to_owned();
        let admission = self.admit(&request)?;

        let outcome = AssertUnwindSafe(async move { handler(request).await })
            .catch_unwind()
            .await;

        match outcome {
            Ok(Ok(response)) => Ok(response),
            Ok(Err(e)) => {
                error!(
                    client_id = %admission.client_id,
                    path = %path,
                    error = %e,
                    "Admin handler failed"
                );
                Err(ApplicationError::Internal("admin handler failed".to_string()))
            },
            Err(panic) => {
                let message = panic
                    .downcast_ref::<&str>()
                    .map(ToString::to_string)
                    .or_else(|| panic.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "non-string panic payload".to_string());
                error!(
                    client_id = %admission.client_id,
                    path = %path,
                    panic = %message,
                    "Admin handler panicked"
                );
                Err(ApplicationError::Internal("admin handler panicked".to_string()))
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{
        sync::atomic::{AtomicUsize, Ordering},
        time::Duration,
    };

    use secrecy::SecretString;

    use super::*;
    use crate::test_support::{FakeClock, FakeRequest, HashMapStore};

    const SECRET: &str = "correct-horse-battery";

    fn guard_with(tokens: TokenPolicy, policy: RatePolicy) -> (AdminGuard, Arc<FakeClock>) {
        let clock = Arc::new(FakeClock::new());
        let limiter = RateLimiter::new(Arc::new(HashMapStore::default()), clock.clone());
        let secret = SecretVerifier::new(SecretString::from(SECRET.to_string()));
        (AdminGuard::new(limiter, secret, tokens, policy), clock)
    }

    fn guard() -> AdminGuard {
        guard_with(TokenPolicy::Disabled, RatePolicy::ADMIN).0
    }

    fn authed() -> FakeRequest {
        FakeRequest::post("/api/admin/documents/matches/1")
            .with_header("x-forwarded-for", "1.2.3.4")
            .with_header(ADMIN_KEY_HEADER, SECRET)
    }

    #[tokio::test]
    async fn correct_secret_invokes_handler_once() {
        let guard = guard();
        let calls = AtomicUsize::new(0);

        let result = guard
            .guard(authed(), |req| {
                calls.fetch_add(1, Ordering::SeqCst);
                async move { Ok::<_, String>(format!("handled {}", req.path)) }
            })
            .await;

        assert_eq!(result.unwrap(), "handled /api/admin/documents/matches/1");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn missing_secret_is_unauthenticated_and_skips_handler() {
        let guard = guard();
        let calls = AtomicUsize::new(0);
        let request = FakeRequest::post("/api/admin/x").with_header("x-real-ip", "5.6.7.8");

        let result = guard
            .guard(request, |_| {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Ok::<_, String>(()) }
            })
            .await;

        assert!(matches!(result, Err(ApplicationError::Unauthenticated)));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn wrong_secret_is_unauthenticated() {
        let request = FakeRequest::post("/api/admin/x").with_header(ADMIN_KEY_HEADER, "nope");
        let result = guard().admit(&request);
        assert!(matches!(result, Err(ApplicationError::Unauthenticated)));
    }

    #[tokio::test]
    async fn rate_limit_runs_before_secret_check() {
        let policy = RatePolicy::from_millis(1, 10_000).unwrap();
        let (guard, clock) = guard_with(TokenPolicy::Disabled, policy);
        let unauth = || FakeRequest::post("/api/admin/x").with_header("x-forwarded-for", "7.7.7.7");

        assert!(matches!(
            guard.admit(&unauth()),
            Err(ApplicationError::Unauthenticated)
        ));

        clock.advance(Duration::from_millis(2500));
        match guard.admit(&unauth()) {
            Err(ApplicationError::RateLimited { retry_after_secs }) => {
                assert_eq!(retry_after_secs, 8);
            },
            other => unreachable!("expected rate limit, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn enforced_token_required_after_secret() {
        let tokens = TokenPolicy::allow_list(vec![SecretString::from("tok-1".to_string())]);
        let (guard, _) = guard_with(tokens, RatePolicy::ADMIN);

        assert!(matches!(
            guard.admit(&authed()),
            Err(ApplicationError::Forbidden)
        ));
        assert!(matches!(
            guard.admit(&authed().with_header(AUTHORIZATION_HEADER, "Bearer tok-2")),
            Err(ApplicationError::Forbidden)
        ));
        assert!(matches!(
            guard.admit(&authed().with_header(AUTHORIZATION_HEADER, "Basic tok-1")),
            Err(ApplicationError::Forbidden)
        ));
        assert!(
            guard
                .admit(&authed().with_header(AUTHORIZATION_HEADER, "Bearer tok-1"))
                .is_ok()
        );
    }

    #[tokio::test]
    async fn enforced_token_does_not_replace_secret() {
        let tokens = TokenPolicy::allow_list(vec![SecretString::from("tok-1".to_string())]);
        let (guard, _) = guard_with(tokens, RatePolicy::ADMIN);
        let request =
            FakeRequest::post("/api/admin/x").with_header(AUTHORIZATION_HEADER, "Bearer tok-1");

        assert!(matches!(
            guard.admit(&request),
            Err(ApplicationError::Unauthenticated)
        ));
    }

    #[tokio::test]
    async fn handler_error_becomes_generic_internal() {
        let result = guard()
            .guard(authed(), |_| async {
                Err::<(), _>("database password is hunter2")
            })
            .await;

        match result {
            Err(ApplicationError::Internal(msg)) => assert!(!msg.contains("hunter2")),
            other => unreachable!("expected internal error, got {other:?}"),
        }
    }

    #[tokio::test]
    #[allow(clippy::panic)]
    async fn handler_panic_becomes_internal() {
        let result = guard()
            .guard(authed(), |_| async {
                if true {
                    panic!("handler exploded");
                }
                Ok::<(), String>(())
            })
            .await;

        assert!(matches!(result, Err(ApplicationError::Internal(_))));
    }

    #[tokio::test]
    async fn admission_reports_remaining_budget() {
        let admission = guard().admit(&authed()).unwrap();
        assert_eq!(admission.client_id.as_str(), "1.2.3.4");
        assert_eq!(admission.decision.limit, 60);
        assert_eq!(admission.decision.remaining, 59);
    }
}
