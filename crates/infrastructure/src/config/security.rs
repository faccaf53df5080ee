//! Security configuration: admin secret, admin tokens, rate limiting.

use std::time::Duration;

use application::{SecretVerifier, TokenPolicy};
use domain::{DomainError, RatePolicy};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use super::list::secret_list;

/// Security configuration
///
/// Secrets are held as [`SecretString`]: redacted in `Debug` output and
/// never serialized.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// Static secret expected in the `x-admin-key` header
    #[serde(default = "empty_secret", skip_serializing)]
    pub admin_secret: SecretString,

    /// Require an `Authorization: Bearer` token on top of the secret
    #[serde(default)]
    pub token_enforcement: bool,

    /// Bearer tokens accepted when enforcement is on (array or comma-separated)
    #[serde(default, skip_serializing, deserialize_with = "secret_list")]
    pub admin_tokens: Vec<SecretString>,

    /// Admin requests admitted per window per client
    #[serde(default = "default_max_requests")]
    pub rate_limit_max_requests: u32,

    /// Window length in milliseconds
    #[serde(default = "default_window_ms")]
    pub rate_limit_window_ms: u64,

    /// Expired-window sweep interval in seconds (default: 300 = 5 minutes)
    #[serde(default = "default_sweep_interval")]
    pub rate_limit_sweep_interval_secs: u64,
}

fn empty_secret() -> SecretString {
    SecretString::from(String::new())
}

const fn default_max_requests() -> u32 {
    60
}

const fn default_window_ms() -> u64 {
    60_000
}

const fn default_sweep_interval() -> u64 {
    300 // 5 minutes
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            admin_secret: empty_secret(),
            token_enforcement: false,
            admin_tokens: Vec::new(),
            rate_limit_max_requests: default_max_requests(),
            rate_limit_window_ms: default_window_ms(),
            rate_limit_sweep_interval_secs: default_sweep_interval(),
        }
    }
}

impl SecurityConfig {
    pub fn has_admin_secret(&self) -> bool {
        !self.admin_secret.expose_secret().is_empty()
    }

    /// Length of the admin secret in bytes (the value itself stays hidden)
    pub fn admin_secret_len(&self) -> usize {
        self.admin_secret.expose_secret().len()
    }

    pub fn secret_verifier(&self) -> SecretVerifier {
        SecretVerifier::new(self.admin_secret.clone())
    }

    /// Token layer selected by `token_enforcement`
    pub fn token_policy(&self) -> TokenPolicy {
        if self.token_enforcement {
            TokenPolicy::allow_list(self.admin_tokens.clone())
        } else {
            TokenPolicy::Disabled
        }
    }

    pub fn rate_policy(&self) -> Result<RatePolicy, DomainError> {
        RatePolicy::from_millis(self.rate_limit_max_requests, self.rate_limit_window_ms)
    }

    /// Sweep interval, never shorter than one second
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.rate_limit_sweep_interval_secs.max(1))
    }
}
