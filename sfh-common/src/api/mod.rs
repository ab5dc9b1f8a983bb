//! API module for shared HTTP API functionality
//!
//! This module contains ONLY framework-independent types. Each service wraps
//! them with its own axum response conversions.

pub mod types;

pub use types::ErrorResponse;
