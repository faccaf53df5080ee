//! API error handling
//!
//! Maps application outcomes onto the fixed response shapes of the admin API.
//! Bodies never carry internal detail; that goes to the log only.

use application::ApplicationError;
use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

pub const TOO_MANY_REQUESTS: &str = "Too many requests";
pub const INVALID_SECRET_KEY: &str = "Unauthorized: Invalid Secret Key";
pub const INVALID_ADMIN_TOKEN: &str = "Unauthorized: Invalid or Missing Admin Token";
pub const INTERNAL_SERVER_ERROR: &str = "Internal Server Error";
pub const SERVICE_UNAVAILABLE: &str = "Service Unavailable";

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Forbidden")]
    Forbidden,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Rate limited, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    /// Seconds until the client's window reopens (429 only)
    #[serde(rename = "retryAfter", skip_serializing_if = "Option::is_none")]
    pub retry_after: Option<u64>,
}

impl ErrorResponse {
    fn message(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            retry_after: None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, ErrorResponse::message(msg)),
            Self::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                ErrorResponse::message(INVALID_SECRET_KEY),
            ),
            Self::Forbidden => (
                StatusCode::FORBIDDEN,
                ErrorResponse::message(INVALID_ADMIN_TOKEN),
            ),
            Self::NotFound(what) => (
                StatusCode::NOT_FOUND,
                ErrorResponse::message(format!("Not found: {what}")),
            ),
            Self::RateLimited { retry_after_secs } => {
                let body = ErrorResponse {
                    error: TOO_MANY_REQUESTS.to_string(),
                    retry_after: Some(retry_after_secs),
                };
                let mut response = (StatusCode::TOO_MANY_REQUESTS, Json(body)).into_response();
                response
                    .headers_mut()
                    .insert(header::RETRY_AFTER, HeaderValue::from(retry_after_secs));
                return response;
            },
            // Backend detail stays in the log
            Self::ServiceUnavailable(_) => (
                StatusCode::SERVICE_UNAVAILABLE,
                ErrorResponse::message(SERVICE_UNAVAILABLE),
            ),
            Self::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::message(INTERNAL_SERVER_ERROR),
            ),
        };

        (status, Json(body)).into_response()
    }
}

impl From<ApplicationError> for ApiError {
    fn from(err: ApplicationError) -> Self {
        match err {
            ApplicationError::RateLimited { retry_after_secs } => {
                Self::RateLimited { retry_after_secs }
            },
            ApplicationError::Unauthenticated => Self::Unauthorized,
            ApplicationError::Forbidden => Self::Forbidden,
            ApplicationError::NotFound(what) => Self::NotFound(what),
            ApplicationError::InvalidInput(msg) => Self::BadRequest(msg),
            ApplicationError::Storage(msg) => {
                tracing::error!(error = %msg, "Document store failure");
                Self::ServiceUnavailable(msg)
            },
            ApplicationError::Internal(msg) => Self::Internal(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;
    use serde_json::{Value, json};

    use super::*;

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn rate_limited_body_and_header() {
        let response = ApiError::RateLimited {
            retry_after_secs: 42,
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(response.headers()[header::RETRY_AFTER], "42");
        assert_eq!(
            body_json(response).await,
            json!({"error": "Too many requests", "retryAfter": 42})
        );
    }

    #[tokio::test]
    async fn unauthorized_body_is_exact() {
        let response = ApiError::Unauthorized.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            body_json(response).await,
            json!({"error": "Unauthorized: Invalid Secret Key"})
        );
    }

    #[tokio::test]
    async fn forbidden_body_is_exact() {
        let response = ApiError::Forbidden.into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(
            body_json(response).await,
            json!({"error": "Unauthorized: Invalid or Missing Admin Token"})
        );
    }

    #[tokio::test]
    async fn internal_body_hides_detail() {
        let response = ApiError::Internal("db at /var/lib/x.db exploded".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            json!({"error": "Internal Server Error"})
        );
    }

    #[tokio::test]
    async fn service_unavailable_hides_detail() {
        let response = ApiError::ServiceUnavailable("connection refused".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body_json(response).await, json!({"error": "Service Unavailable"}));
    }

    #[test]
    fn into_response_bad_request() {
        let response = ApiError::BadRequest("invalid".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn into_response_not_found() {
        let response = ApiError::NotFound("users/42".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn application_errors_convert() {
        assert!(matches!(
            ApiError::from(ApplicationError::RateLimited { retry_after_secs: 3 }),
            ApiError::RateLimited { retry_after_secs: 3 }
        ));
        assert!(matches!(
            ApiError::from(ApplicationError::Unauthenticated),
            ApiError::Unauthorized
        ));
        assert!(matches!(
            ApiError::from(ApplicationError::Forbidden),
            ApiError::Forbidden
        ));
        assert!(matches!(
            ApiError::from(ApplicationError::InvalidInput("bad".to_string())),
            ApiError::BadRequest(_)
        ));
        assert!(matches!(
            ApiError::from(ApplicationError::NotFound("x".to_string())),
            ApiError::NotFound(_)
        ));
        assert!(matches!(
            ApiError::from(ApplicationError::Storage("down".to_string())),
            ApiError::ServiceUnavailable(_)
        ));
        assert!(matches!(
            ApiError::from(ApplicationError::Internal("crash".to_string())),
            ApiError::Internal(_)
        ));
    }

    #[test]
    fn error_response_omits_retry_after_when_absent() {
        let json = serde_json::to_string(&ErrorResponse::message("x")).unwrap();
        assert_eq!(json, r#"{"error":"x"}"#);
    }
}
