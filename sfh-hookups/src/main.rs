//! sfh-hookups - smart furniture hookup service
//!
//! REST API over the hookup records, gated by the identity service and kept
//! in step with the monitoring service.

use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tracing::{error, info};

use sfh_hookups::api::HttpIdentityVerifier;
use sfh_hookups::config::{Args, ServiceConfig};
use sfh_hookups::db::{self, SqliteHookupRepository};
use sfh_hookups::monitoring::HttpMonitoringGateway;
use sfh_hookups::{build_router, AppState, HookupService};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    // Log build identification immediately after tracing init
    info!(
        "Starting SFH hookup service (sfh-hookups) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let config = ServiceConfig::load(Args::parse())?;
    info!("Database: {}", config.database_url);
    info!("Identity service: {}", config.identity_service_uri);
    info!("Monitoring service: {}", config.monitoring_service_uri);

    let pool = match db::connect(&config.database_url).await {
        Ok(pool) => {
            info!("✓ Connected to database");
            pool
        }
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            return Err(e);
        }
    };

    let service = HookupService::new(
        Arc::new(SqliteHookupRepository::new(pool)),
        Arc::new(HttpMonitoringGateway::new(&config.monitoring_service_uri)),
    );
    let identity = Arc::new(HttpIdentityVerifier::new(&config.identity_service_uri));

    let app = build_router(AppState::new(service, identity));

    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    info!("sfh-hookups listening on http://{}", config.bind_address());
    info!("Health check: http://{}/health", config.bind_address());

    axum::serve(listener, app).await?;

    Ok(())
}
