use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::{LlmError, Provider};
use crate::profile::store::StoreError;

/// Detail returned for every validation failure.
pub const VALIDATION_DETAIL: &str = "Unprocessable Entity";
pub const AUTH_DETAIL: &str = "Error in getting user details";

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
/// Clients only ever see `{ "detail": <short string> }`; the cause is logged here.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("{provider} error: {source}")]
    Provider {
        provider: Provider,
        #[source]
        source: LlmError,
    },

    #[error("{detail}: {source}")]
    Persistence {
        detail: &'static str,
        #[source]
        source: StoreError,
    },

    #[error("Auth error: {0}")]
    Auth(#[source] StoreError),
}

impl AppError {
    pub fn provider(provider: Provider) -> impl FnOnce(LlmError) -> AppError {
        move |source| AppError::Provider { provider, source }
    }

    pub fn persistence(detail: &'static str) -> impl FnOnce(StoreError) -> AppError {
        move |source| AppError::Persistence { detail, source }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self {
            AppError::Validation(msg) => {
                tracing::warn!("Rejected request: {msg}");
                (StatusCode::UNPROCESSABLE_ENTITY, VALIDATION_DETAIL)
            }
            AppError::Provider { provider, source } => {
                tracing::error!("{provider} error: {source}");
                (StatusCode::INTERNAL_SERVER_ERROR, provider.failure_detail())
            }
            AppError::Persistence { detail, source } => {
                tracing::error!("{detail}: {source}");
                (StatusCode::INTERNAL_SERVER_ERROR, *detail)
            }
            AppError::Auth(e) => {
                tracing::error!("Auth error: {e}");
                (StatusCode::INTERNAL_SERVER_ERROR, AUTH_DETAIL)
            }
        };

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}
