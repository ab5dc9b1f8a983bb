//! Error types for sfh-hookups
//!
//! `HookupError` is the domain taxonomy shared by the repository and the
//! orchestration service. `ApiError` is what HTTP handlers return; its
//! `IntoResponse` holds the status/code lookup table.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sfh_common::api::types::{
    ErrorResponse, BAD_REQUEST, CONFLICT, INFRASTRUCTURE_ERROR, INTERNAL_ERROR,
    RESOURCE_NOT_FOUND, VALIDATION_ERROR,
};
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::error;

/// Hookup domain and persistence errors
#[derive(Debug, Error)]
pub enum HookupError {
    /// Utility type string is not gas, water or electricity
    #[error("Invalid utility type: {0}")]
    InvalidUtilityType(String),

    /// Identifier is not a well-formed UUID
    #[error("Invalid smart furniture hookup ID format")]
    InvalidIdentifier,

    #[error("Smart furniture hookup not found")]
    NotFound,

    #[error("Name {0} already exists")]
    NameConflict(String),

    #[error("Endpoint {0} already exists")]
    EndpointConflict(String),

    /// Monitoring registration failed for this endpoint
    #[error("Could not configure endpoint: {0}")]
    EndpointConfiguration(String),

    /// Update carried neither a name nor an endpoint
    #[error("At least one of 'name' or 'endpoint' is required.")]
    NothingToUpdate,

    /// Stored row could not be mapped back to a record
    #[error("Corrupt hookup record: {0}")]
    CorruptRecord(String),

    /// Database operation error (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl HookupError {
    /// Status, code and request field (if any) for this error
    fn classify(&self) -> (StatusCode, &'static str, Option<&'static str>) {
        match self {
            HookupError::InvalidUtilityType(_) => {
                (StatusCode::BAD_REQUEST, VALIDATION_ERROR, Some("utilityType"))
            }
            HookupError::NothingToUpdate => (StatusCode::BAD_REQUEST, VALIDATION_ERROR, None),
            HookupError::InvalidIdentifier => (StatusCode::BAD_REQUEST, BAD_REQUEST, None),
            HookupError::NotFound => (StatusCode::NOT_FOUND, RESOURCE_NOT_FOUND, None),
            HookupError::NameConflict(_) => (StatusCode::CONFLICT, CONFLICT, Some("name")),
            HookupError::EndpointConflict(_) => {
                (StatusCode::CONFLICT, CONFLICT, Some("endpoint"))
            }
            HookupError::EndpointConfiguration(_) => {
                (StatusCode::BAD_GATEWAY, INFRASTRUCTURE_ERROR, None)
            }
            HookupError::CorruptRecord(_) | HookupError::Database(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR, None)
            }
        }
    }

    /// HTTP status this error maps to
    pub fn status(&self) -> StatusCode {
        self.classify().0
    }
}

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request payload failed validation, keyed by field
    #[error("Invalid request payload")]
    InvalidPayload(BTreeMap<String, String>),

    #[error(transparent)]
    Hookup(#[from] HookupError),
}

impl ApiError {
    pub fn invalid_field(field: impl Into<String>, detail: impl Into<String>) -> Self {
        let mut errors = BTreeMap::new();
        errors.insert(field.into(), detail.into());
        ApiError::InvalidPayload(errors)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::InvalidPayload(errors) => {
                (StatusCode::BAD_REQUEST, ErrorResponse::invalid_payload(errors))
            }
            ApiError::Hookup(err) => {
                let (status, code, field) = err.classify();
                let body = if status == StatusCode::INTERNAL_SERVER_ERROR {
                    error!("Unhandled error: {}", err);
                    ErrorResponse::new(code, "Internal Server Error")
                } else if let Some(field) = field {
                    ErrorResponse::for_field(code, field, err.to_string())
                } else {
                    ErrorResponse::new(code, err.to_string())
                };
                (status, body)
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
