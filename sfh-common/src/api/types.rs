//! Shared API response types

use serde::Serialize;
use std::collections::BTreeMap;

// ========================================
// Error Codes
// ========================================

pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
pub const BAD_REQUEST: &str = "BAD_REQUEST";
pub const UNAUTHORIZED: &str = "UNAUTHORIZED";
pub const RESOURCE_NOT_FOUND: &str = "RESOURCE_NOT_FOUND";
pub const CONFLICT: &str = "CONFLICT";
pub const INFRASTRUCTURE_ERROR: &str = "INFRASTRUCTURE_ERROR";
pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";

// ========================================
// Error Response Types
// ========================================

/// Error envelope returned with every non-2xx response
///
/// # Examples
///
/// ```
/// use sfh_common::api::types::ErrorResponse;
///
/// let error = ErrorResponse::for_field("CONFLICT", "name", "Name Smart Lamp already exists");
/// assert_eq!(error.message, "Validation failed");
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Machine-readable error code
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Per-field details, empty when the error is not tied to a field
    pub errors: BTreeMap<String, String>,
}

impl ErrorResponse {
    /// Error not tied to any request field
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            errors: BTreeMap::new(),
        }
    }

    /// Error attributed to a single request field
    pub fn for_field(
        code: impl Into<String>,
        field: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        let mut errors = BTreeMap::new();
        errors.insert(field.into(), detail.into());
        Self {
            code: code.into(),
            message: "Validation failed".to_string(),
            errors,
        }
    }

    /// Payload validation failure with one entry per offending field
    pub fn invalid_payload(errors: BTreeMap<String, String>) -> Self {
        Self {
            code: VALIDATION_ERROR.to_string(),
            message: "Invalid request payload".to_string(),
            errors,
        }
    }
}
