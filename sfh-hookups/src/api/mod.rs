//! HTTP API handlers for sfh-hookups

pub mod auth;
pub mod health;
pub mod hookups;

pub use auth::{access_gate, HttpIdentityVerifier, IdentityVerifier};
pub use health::health_routes;
pub use hookups::{create_hookup, delete_hookup, get_hookup, list_hookups, update_hookup};
