use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

use crate::catalog::CatalogError;

pub type AppResult<T> = Result<T, AppError>;

/// Errors surfaced by the HTTP API
#[derive(Debug, Error)]
pub enum AppError {
    /// Missing credential or broken setup
    #[error("API configuration error: {0}")]
    Configuration(String),

    /// Bad or missing query parameters
    #[error("{0}")]
    InvalidArgument(String),

    /// Entity unknown upstream
    #[error("{0}")]
    NotFound(String),

    /// Upstream answered 429
    #[error("Rate limit exceeded")]
    RateLimited(Option<Duration>),

    /// Upstream answered another non-2xx status
    #[error("Upstream request failed with status {status}")]
    Upstream { status: u16, message: String },

    /// Network failure or unreadable upstream body
    #[error("Upstream request failed: {0}")]
    Transport(String),
}

/// API error response body
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::Configuration(msg) => Self::Configuration(msg),
            CatalogError::InvalidArgument(msg) => Self::InvalidArgument(msg),
            CatalogError::NotFound(what) => Self::NotFound(format!("Not found: {what}")),
            CatalogError::RateLimited(retry_after) => Self::RateLimited(retry_after),
            CatalogError::Upstream { status, message } => Self::Upstream { status, message },
            CatalogError::Transport(e) => Self::Transport(e.to_string()),
            CatalogError::Parse(msg) => Self::Transport(msg),
        }
    }
}

impl AppError {
    /// HTTP status sent to the caller
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Configuration(_) | Self::Transport(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
            // Pass the upstream status through when it is a real error status
            Self::Upstream { status, .. } => StatusCode::from_u16(*status)
                .ok()
                .filter(|s| s.is_client_error() || s.is_server_error())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            Self::Configuration(msg) => {
                tracing::error!("Configuration error: {}", msg);
                "API configuration error".to_string()
            }
            Self::Upstream { status, message } => {
                tracing::error!("Upstream error {}: {}", status, message);
                self.to_string()
            }
            Self::Transport(msg) => {
                tracing::error!("Transport error: {}", msg);
                self.to_string()
            }
            Self::RateLimited(_) => {
                tracing::warn!("Upstream rate limit exceeded");
                self.to_string()
            }
            Self::InvalidArgument(_) | Self::NotFound(_) => self.to_string(),
        };

        let mut response = (status, Json(ErrorResponse { error: message })).into_response();

        if let Self::RateLimited(Some(retry_after)) = self {
            if let Ok(value) = HeaderValue::from_str(&retry_after.as_secs().to_string()) {
                response.headers_mut().insert(header::RETRY_AFTER, value);
            }
        }

        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AppError::Configuration("x".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::InvalidArgument("x".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AppError::NotFound("x".into()).status(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::RateLimited(None).status(),
            StatusCode::TOO_MANY_REQUESTS
        );
        assert_eq!(
            AppError::Transport("x".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_upstream_status_passthrough() {
        let err = AppError::Upstream {
            status: 503,
            message: String::new(),
        };
        assert_eq!(err.status(), StatusCode::SERVICE_UNAVAILABLE);

        let err = AppError::Upstream {
            status: 401,
            message: String::new(),
        };
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);

        // A 3xx that reached us as a failure is not sensible to forward
        let err = AppError::Upstream {
            status: 304,
            message: String::new(),
        };
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_retry_after_header() {
        let response = AppError::RateLimited(Some(Duration::from_secs(7))).into_response();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(response.headers()[header::RETRY_AFTER], "7");
    }

    #[test]
    fn test_from_catalog_error() {
        let err: AppError = CatalogError::Parse("bad json".into()).into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let err: AppError = CatalogError::NotFound("/movie/1".into()).into();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }
}
