//! sfh-hookups library - smart furniture hookup service
//!
//! Keeps the hookup records (name, utility type, network endpoint) and keeps
//! the external monitoring service in step with them.

use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod monitoring;
pub mod service;

pub use crate::error::{ApiError, ApiResult, HookupError};
pub use crate::service::HookupService;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Hookup orchestration
    pub service: HookupService,
    /// Delegated token verification for the public routes
    pub identity: Arc<dyn api::IdentityVerifier>,
}

impl AppState {
    /// Create new application state
    pub fn new(service: HookupService, identity: Arc<dyn api::IdentityVerifier>) -> Self {
        Self { service, identity }
    }
}

/// Build application router
///
/// Public hookup routes sit behind the access gate. The internal lookup
/// route and the health endpoint are not gated.
pub fn build_router(state: AppState) -> Router {
    use axum::middleware;
    use axum::routing::get;

    // Protected routes (require authentication)
    let protected = Router::new()
        .route(
            "/api/smart-furniture-hookups",
            get(api::list_hookups).post(api::create_hookup),
        )
        .route(
            "/api/smart-furniture-hookups/:id",
            get(api::get_hookup)
                .patch(api::update_hookup)
                .delete(api::delete_hookup),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            api::access_gate,
        ));

    // Service-to-service routes (no authentication)
    let internal = Router::new().route(
        "/api/internal/smart-furniture-hookups/:id",
        get(api::get_hookup),
    );

    Router::new()
        .merge(protected)
        .merge(internal)
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
