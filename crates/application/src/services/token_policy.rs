//! Optional bearer-token verification
//!
//! [`TokenPolicy`] is chosen once at startup. `Disabled` skips the token
//! layer entirely; `Enforced` delegates to a [`TokenVerifier`], by default
//! an allow-list of admin tokens.

use std::{fmt, sync::Arc};

use secrecy::{ExposeSecret, SecretString};

use super::secret_verifier::constant_time_matches;

/// Pluggable bearer-token check
pub trait TokenVerifier: Send + Sync + fmt::Debug {
    /// Whether `token` grants admin access
    fn verify(&self, token: Option<&str>) -> bool;
}

/// Accepts tokens that appear in a fixed allow-list
///
/// Every entry is compared in constant time and the scan never stops early.
#[derive(Debug, Clone, Default)]
pub struct AllowListTokenVerifier {
    tokens: Vec<SecretString>,
}

impl AllowListTokenVerifier {
    pub fn new(tokens: Vec<SecretString>) -> Self {
        let tokens = tokens
            .into_iter()
            .filter(|t| !t.expose_secret().is_empty())
            .collect();
        Self { tokens }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl TokenVerifier for AllowListTokenVerifier {
    fn verify(&self, token: Option<&str>) -> bool {
        let Some(token) = token else {
            return false;
        };
        self.tokens.iter().fold(false, |found, allowed| {
            constant_time_matches(allowed.expose_secret().as_bytes(), token.as_bytes()) | found
        })
    }
}

/// Whether the bearer-token layer runs, and with which verifier
#[derive(Debug, Clone, Default)]
pub enum TokenPolicy {
    /// Token layer skipped; the admin secret alone authorizes
    #[default]
    Disabled,
    /// Every admin request must carry a token the verifier accepts
    Enforced(Arc<dyn TokenVerifier>),
}

impl TokenPolicy {
    /// Enforce against a static allow-list
    pub fn allow_list(tokens: Vec<SecretString>) -> Self {
        Self::Enforced(Arc::new(AllowListTokenVerifier::new(tokens)))
    }

    pub const fn is_enforced(&self) -> bool {
        matches!(self, Self::Enforced(_))
    }

    /// Outcome of the token layer; always `true` when disabled
    pub fn verify(&self, token: Option<&str>) -> bool {
        match self {
            Self::Disabled => true,
            Self::Enforced(verifier) => verifier.verify(token),
        }
    }
}
