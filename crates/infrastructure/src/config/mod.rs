//! Application configuration
//!
//! Split into focused sub-modules:
//! - `server`: HTTP listener, CORS origins, path prefixes, logging
//! - `security`: Admin secret, admin tokens, rate limiting

mod list;
mod security;
mod server;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use security::SecurityConfig;
pub use server::ServerConfig;

/// Prefix of environment variable overrides (`MATCHDESK_SERVER__PORT`)
pub const ENV_PREFIX: &str = "MATCHDESK";

/// Application environment (development or production)
///
/// Controls security validation strictness and default behaviors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Development environment - relaxed security warnings
    #[default]
    Development,
    /// Production environment - strict security validation
    Production,
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
        }
    }
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            _ => Err(format!(
                "Invalid environment: {s}. Use 'development' or 'production'"
            )),
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment (development or production)
    ///
    /// In production, critical security warnings prevent startup unless
    /// MATCHDESK_ALLOW_INSECURE_CONFIG=true.
    #[serde(default)]
    pub environment: Option<Environment>,

    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Admin access configuration
    #[serde(default)]
    pub security: SecurityConfig,
}

impl AppConfig {
    /// Load configuration from environment and optional file
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_with_env(None)
    }

    /// Load using `vars` in place of the process environment when given
    pub fn load_with_env(
        vars: Option<config::Map<String, String>>,
    ) -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            // Load from file if exists
            .add_source(config::File::with_name("config").required(false))
            // Override with environment variables (e.g., MATCHDESK_SERVER__PORT)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .source(vars),
            );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Effective environment, development when unset
    pub fn environment(&self) -> Environment {
        self.environment.unwrap_or_default()
    }

    pub fn is_production(&self) -> bool {
        self.environment() == Environment::Production
    }
}
