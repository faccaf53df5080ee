//! Security validation for application configuration
//!
//! Validates configuration for security issues and provides warnings at startup.
//! Critical issues in production will prevent startup unless explicitly allowed.

use crate::config::AppConfig;
use std::fmt;

/// Environment variable that lets production start despite critical warnings
pub const ALLOW_INSECURE_ENV: &str = "MATCHDESK_ALLOW_INSECURE_CONFIG";

/// Shortest admin secret accepted without a warning, in bytes
pub const MIN_SECRET_LEN: usize = 16;

/// Severity level for security warnings
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum WarningSeverity {
    /// Informational - no action required
    Info,
    /// Warning - should be addressed but not critical
    Warning,
    /// Critical - must be addressed in production
    Critical,
}

impl fmt::Display for WarningSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "INFO"),
            Self::Warning => write!(f, "WARNING"),
            Self::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// A security warning with severity and description
#[derive(Debug, Clone)]
pub struct SecurityWarning {
    pub severity: WarningSeverity,
    /// Short code identifying the warning type
    pub code: &'static str,
    pub message: String,
    /// Recommended action to resolve the issue
    pub recommendation: &'static str,
}

impl SecurityWarning {
    #[must_use]
    pub fn new(
        severity: WarningSeverity,
        code: &'static str,
        message: impl Into<String>,
        recommendation: &'static str,
    ) -> Self {
        Self {
            severity,
            code,
            message: message.into(),
            recommendation,
        }
    }

    #[must_use]
    pub const fn is_critical(&self) -> bool {
        matches!(self.severity, WarningSeverity::Critical)
    }
}

impl fmt::Display for SecurityWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {} - {}",
            self.severity, self.code, self.message, self.recommendation
        )
    }
}

/// Validates application configuration for security issues
#[derive(Debug, Clone, Copy, Default)]
pub struct SecurityValidator;

impl SecurityValidator {
    /// Validate configuration and return all security warnings
    ///
    /// Returns a list of warnings sorted by severity (critical first).
    #[must_use]
    pub fn validate(config: &AppConfig) -> Vec<SecurityWarning> {
        let mut warnings = Vec::new();

        Self::check_admin_secret(config, &mut warnings);
        Self::check_token_enforcement(config, &mut warnings);
        Self::check_cors_configuration(config, &mut warnings);
        Self::check_rate_limiting(config, &mut warnings);

        warnings.sort_by(|a, b| b.severity.cmp(&a.severity));

        warnings
    }

    /// Check if startup should be blocked due to critical security issues
    ///
    /// Reads `MATCHDESK_ALLOW_INSECURE_CONFIG` to allow an explicit override.
    #[must_use]
    pub fn should_block_startup(config: &AppConfig, warnings: &[SecurityWarning]) -> bool {
        let allow_insecure = std::env::var(ALLOW_INSECURE_ENV)
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);

        Self::blocks_startup(config, warnings, allow_insecure)
    }

    /// Blocking decision with the override already resolved
    #[must_use]
    pub fn blocks_startup(
        config: &AppConfig,
        warnings: &[SecurityWarning],
        allow_insecure: bool,
    ) -> bool {
        let has_critical = warnings.iter().any(SecurityWarning::is_critical);
        config.is_production() && has_critical && !allow_insecure
    }

    /// Log all warnings using tracing
    pub fn log_warnings(warnings: &[SecurityWarning]) {
        for warning in warnings {
            match warning.severity {
                WarningSeverity::Critical => {
                    tracing::error!(
                        code = %warning.code,
                        message = %warning.message,
                        recommendation = %warning.recommendation,
                        "Security configuration issue"
                    );
                },
                WarningSeverity::Warning => {
                    tracing::warn!(
                        code = %warning.code,
                        message = %warning.message,
                        recommendation = %warning.recommendation,
                        "Security configuration warning"
                    );
                },
                WarningSeverity::Info => {
                    tracing::info!(
                        code = %warning.code,
                        message = %warning.message,
                        recommendation = %warning.recommendation,
                        "Security configuration notice"
                    );
                },
            }
        }
    }

    fn check_admin_secret(config: &AppConfig, warnings: &mut Vec<SecurityWarning>) {
        if !config.security.has_admin_secret() {
            warnings.push(SecurityWarning::new(
                WarningSeverity::Critical,
                "SEC001",
                "No admin secret configured; every admin request will be rejected",
                "Set MATCHDESK_SECURITY__ADMIN_SECRET",
            ));
            return;
        }

        let len = config.security.admin_secret_len();
        if len < MIN_SECRET_LEN {
            warnings.push(SecurityWarning::new(
                WarningSeverity::Warning,
                "SEC002",
                format!("Admin secret is only {len} bytes long"),
                "Use a random admin secret of at least 16 bytes",
            ));
        }
    }

    fn check_token_enforcement(config: &AppConfig, warnings: &mut Vec<SecurityWarning>) {
        if config.security.token_enforcement && config.security.admin_tokens.is_empty() {
            warnings.push(SecurityWarning::new(
                WarningSeverity::Critical,
                "SEC003",
                "Admin token enforcement is on but no admin tokens are configured",
                "Set MATCHDESK_SECURITY__ADMIN_TOKENS or disable token_enforcement",
            ));
        }
    }

    fn check_cors_configuration(config: &AppConfig, warnings: &mut Vec<SecurityWarning>) {
        if config.server.allowed_origins.is_empty() {
            warnings.push(SecurityWarning::new(
                WarningSeverity::Info,
                "SEC004",
                "No allowed origins configured; cross-origin browsers cannot read API responses",
                "List admin UI origins in server.allowed_origins",
            ));
        }
    }

    fn check_rate_limiting(config: &AppConfig, warnings: &mut Vec<SecurityWarning>) {
        match config.security.rate_policy() {
            Ok(_) => warnings.push(SecurityWarning::new(
                WarningSeverity::Info,
                "SEC005",
                "Clients without forwarding headers share a single rate-limit bucket",
                "Run behind a proxy that sets X-Forwarded-For or X-Real-IP",
            )),
            Err(e) => warnings.push(SecurityWarning::new(
                WarningSeverity::Critical,
                "SEC006",
                format!("Invalid rate limit policy: {e}"),
                "Use a positive rate_limit_max_requests and rate_limit_window_ms",
            )),
        }
    }
}
