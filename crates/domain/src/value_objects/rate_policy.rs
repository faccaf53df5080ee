//! Rate policy value object

use std::time::Duration;

use crate::errors::DomainError;

/// Fixed-window admission policy: at most `max_requests` per `window`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RatePolicy {
    max_requests: u32,
    window: Duration,
}

impl RatePolicy {
    /// Policy applied to administrative requests: 60 requests per minute
    pub const ADMIN: Self = Self {
        max_requests: 60,
        window: Duration::from_secs(60),
    };

    /// Create a policy, rejecting zero limits and zero-length windows
    pub fn new(max_requests: u32, window: Duration) -> Result<Self, DomainError> {
        if max_requests == 0 {
            return Err(DomainError::InvalidRatePolicy(
                "max_requests must be greater than zero".to_string(),
            ));
        }
        if window.is_zero() {
            return Err(DomainError::InvalidRatePolicy(
                "window must be greater than zero".to_string(),
            ));
        }
        Ok(Self {
            max_requests,
            window,
        })
    }

    /// Create a policy from a window length in milliseconds
    pub fn from_millis(max_requests: u32, window_ms: u64) -> Result<Self, DomainError> {
        Self::new(max_requests, Duration::from_millis(window_ms))
    }

    /// Maximum admitted requests per window
    pub const fn max_requests(&self) -> u32 {
        self.max_requests
    }

    /// Window length
    pub const fn window(&self) -> Duration {
        self.window
    }
}

impl Default for RatePolicy {
    fn default() -> Self {
        Self::ADMIN
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_policy_is_sixty_per_minute() {
        assert_eq!(RatePolicy::ADMIN.max_requests(), 60);
        assert_eq!(RatePolicy::ADMIN.window(), Duration::from_millis(60_000));
        assert_eq!(RatePolicy::default(), RatePolicy::ADMIN);
    }

    #[test]
    fn zero_max_requests_rejected() {
        let result = RatePolicy::from_millis(0, 1000);
        assert!(matches!(result, Err(DomainError::InvalidRatePolicy(_))));
    }

    #[test]
    fn zero_window_rejected() {
        let result = RatePolicy::from_millis(5, 0);
        assert!(matches!(result, Err(DomainError::InvalidRatePolicy(_))));
    }

    #[test]
    fn valid_policy_accepted() {
        let policy = RatePolicy::from_millis(2, 1000).unwrap();
        assert_eq!(policy.max_requests(), 2);
        assert_eq!(policy.window(), Duration::from_secs(1));
    }
}
