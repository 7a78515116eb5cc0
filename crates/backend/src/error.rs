//! Unified error handling for the backend API.
//!
//! Handlers return [`ApiResult`] and use `?` freely; every error is logged
//! here and reaches the client only as a coarse `{ message }` body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use counter_types::MessageResponse;
use thiserror::Error;

use crate::auth::ProviderError;
use crate::store::StoreError;

const SERVER_ERROR: &str = "Server Error";
const AUTH_ERROR: &str = "Auth error";

/// Unified error type for API handlers
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or invalid authorization code or identity token
    #[error("Auth error: {0}")]
    Auth(String),

    /// Session missing or invalid
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Counter store failure
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Anything else that should surface as a 500
    #[error("{0}")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn auth(message: impl Into<String>) -> Self {
        ApiError::Auth(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }
}

impl From<ProviderError> for ApiError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::Transport(e) => {
                ApiError::Internal(anyhow::anyhow!("Identity provider unreachable: {}", e))
            }
            other => {
                tracing::warn!("Identity provider rejected login: {}", other);
                ApiError::Auth(AUTH_ERROR.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::Auth(msg) => {
                tracing::warn!("Auth error: {}", msg);
                (StatusCode::BAD_REQUEST, msg.clone())
            }
            ApiError::Unauthorized(msg) => {
                tracing::debug!("Unauthorized: {}", msg);
                (StatusCode::UNAUTHORIZED, "Unauthorized".to_string())
            }
            ApiError::Store(e) => {
                tracing::error!("Store error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, SERVER_ERROR.to_string())
            }
            ApiError::Internal(e) => {
                tracing::error!("Internal error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, SERVER_ERROR.to_string())
            }
        };

        (status, Json(MessageResponse::new(message))).into_response()
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
