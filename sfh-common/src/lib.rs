//! # SFH Common Library
//!
//! Shared code for the smart furniture hookup (SFH) services:
//! - Error type for configuration and startup failures
//! - Layered configuration file loading
//! - Identifier generation and parsing
//! - The JSON error envelope returned by every HTTP API

pub mod api;
pub mod config;
pub mod error;
pub mod uuid_utils;

pub use error::{Error, Result};
