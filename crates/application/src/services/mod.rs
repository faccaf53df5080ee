//! Application services - guard pipeline and admin use cases

mod admin_guard;
mod client_identity;
mod document_service;
mod rate_limiter;
mod secret_verifier;
mod token_policy;

pub use admin_guard::{ADMIN_KEY_HEADER, AUTHORIZATION_HEADER, Admission, AdminGuard};
pub use client_identity::{X_FORWARDED_FOR, X_REAL_IP, resolve_client_id};
pub use document_service::DocumentService;
pub use rate_limiter::RateLimiter;
pub use secret_verifier::SecretVerifier;
pub use token_policy::{AllowListTokenVerifier, TokenPolicy, TokenVerifier};
