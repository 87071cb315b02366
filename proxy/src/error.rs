//! Errors surfaced to inbound callers and their HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use users_core::ApiError;

#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("user not found")]
    NotFound,

    #[error("invalid user id: {0}")]
    BadRequest(String),

    #[error("upstream request timed out")]
    Timeout,

    /// The wrapped error stays in logs; clients only see the fixed message.
    #[error("upstream request failed")]
    Upstream(#[source] ApiError),
}

impl From<ApiError> for ProxyError {
    fn from(e: ApiError) -> Self {
        match e {
            ApiError::NotFound => ProxyError::NotFound,
            ApiError::Timeout => ProxyError::Timeout,
            other => ProxyError::Upstream(other),
        }
    }
}

impl ProxyError {
    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::NotFound => StatusCode::NOT_FOUND,
            ProxyError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ProxyError::Timeout => StatusCode::GATEWAY_TIMEOUT,
            ProxyError::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ProxyError::NotFound => "not_found",
            ProxyError::BadRequest(_) => "bad_request",
            ProxyError::Timeout => "upstream_timeout",
            ProxyError::Upstream(_) => "upstream_error",
        }
    }
}

/// JSON body for error responses other than 404.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = self.status();
        if let ProxyError::Upstream(source) = &self {
            tracing::warn!(%status, error = %source, "upstream call failed");
        } else if status.is_server_error() {
            tracing::warn!(%status, error = %self, "upstream call failed");
        } else {
            tracing::debug!(%status, error = %self, "request rejected");
        }

        // 404 always goes out with an empty body.
        if let ProxyError::NotFound = self {
            return status.into_response();
        }
        let body = ErrorBody {
            code: self.code().to_string(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
