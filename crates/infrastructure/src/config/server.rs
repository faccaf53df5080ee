//! HTTP server configuration.

use serde::{Deserialize, Serialize};

use super::list::string_list;

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to
    #[serde(default = "default_port")]
    pub port: u16,

    /// Origins allowed to read admin API responses cross-origin.
    ///
    /// Accepts an array or a comma-separated string. Empty means no explicit
    /// allow-list: same-origin requests get a wildcard, cross-origin ones
    /// get no allow-origin header.
    #[serde(default, deserialize_with = "string_list")]
    pub allowed_origins: Vec<String>,

    /// Path prefix of the JSON API (CORS applies here)
    #[serde(default = "default_api_prefix")]
    pub api_prefix: String,

    /// Path prefix of the admin UI (stricter framing rules)
    #[serde(default = "default_admin_ui_prefix")]
    pub admin_ui_prefix: String,

    /// Graceful shutdown timeout in seconds
    #[serde(default)]
    pub shutdown_timeout_secs: Option<u64>,

    /// Log format: "json" for structured JSON logs, "text" for human-readable
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

const fn default_port() -> u16 {
    3000
}

fn default_api_prefix() -> String {
    "/api".to_string()
}

fn default_admin_ui_prefix() -> String {
    "/admin".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            allowed_origins: Vec::new(),
            api_prefix: default_api_prefix(),
            admin_ui_prefix: default_admin_ui_prefix(),
            shutdown_timeout_secs: Some(30),
            log_format: default_log_format(),
        }
    }
}

impl ServerConfig {
    /// `host:port` for the listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn json_logs(&self) -> bool {
        self.log_format.eq_ignore_ascii_case("json")
    }
}
