//! Monitoring gateway
//!
//! Tells the external monitoring service which hookup endpoints to watch.
//!
//! # API Reference
//! - `POST {base}/api/internal/registerSmartFurnitureHookup`
//!   body `{"smartFurnitureHookupID": "<id>", "endpoint": "<endpoint>"}`
//! - `POST {base}/api/internal/disconnectSmartFurnitureHookup`
//!   body `{"endpoint": "<endpoint>"}`

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::models::HookupId;

const REGISTER_PATH: &str = "/api/internal/registerSmartFurnitureHookup";
const DISCONNECT_PATH: &str = "/api/internal/disconnectSmartFurnitureHookup";

/// Monitoring call failure
#[derive(Debug, Error)]
pub enum MonitoringError {
    /// Transport-level failure (connect, send, read)
    #[error("Monitoring request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Monitoring service answered with a non-success status
    #[error("Monitoring service returned HTTP {0}")]
    Status(u16),

    #[error("Monitoring unavailable: {0}")]
    Unavailable(String),
}

/// Registration of hookup endpoints with the monitoring system
#[async_trait]
pub trait MonitoringGateway: Send + Sync {
    /// Start watching `endpoint` on behalf of hookup `id`
    async fn register_endpoint(&self, id: &HookupId, endpoint: &str) -> Result<(), MonitoringError>;

    /// Stop watching `endpoint`
    async fn disconnect_endpoint(&self, endpoint: &str) -> Result<(), MonitoringError>;
}

#[derive(Debug, Serialize)]
struct RegisterRequest<'a> {
    #[serde(rename = "smartFurnitureHookupID")]
    smart_furniture_hookup_id: &'a str,
    endpoint: &'a str,
}

#[derive(Debug, Serialize)]
struct DisconnectRequest<'a> {
    endpoint: &'a str,
}

/// HTTP client for the monitoring service
///
/// No retries and no client-side timeout: a failed call fails immediately and
/// a slow one takes as long as the monitoring service does.
#[derive(Clone)]
pub struct HttpMonitoringGateway {
    http_client: Client,
    base_url: String,
}

impl HttpMonitoringGateway {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http_client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    async fn post<T: Serialize + ?Sized>(&self, path: &str, body: &T) -> Result<(), MonitoringError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(url = %url, "Calling monitoring service");

        let response = self.http_client.post(&url).json(body).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(MonitoringError::Status(status.as_u16()));
        }
        Ok(())
    }
}

#[async_trait]
impl MonitoringGateway for HttpMonitoringGateway {
    async fn register_endpoint(&self, id: &HookupId, endpoint: &str) -> Result<(), MonitoringError> {
        self.post(
            REGISTER_PATH,
            &RegisterRequest {
                smart_furniture_hookup_id: id.as_str(),
                endpoint,
            },
        )
        .await
    }

    async fn disconnect_endpoint(&self, endpoint: &str) -> Result<(), MonitoringError> {
        self.post(DISCONNECT_PATH, &DisconnectRequest { endpoint }).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_register_posts_id_and_endpoint() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path(REGISTER_PATH)
                    .json_body(json!({
                        "smartFurnitureHookupID": "7b2c1f4e-3a61-4d2b-9b1e-0c8f2a5d6e11",
                        "endpoint": "192.168.0.10:5005"
                    }));
                then.status(200);
            })
            .await;

        let gateway = HttpMonitoringGateway::new(server.base_url());
        gateway
            .register_endpoint(
                &HookupId::new("7b2c1f4e-3a61-4d2b-9b1e-0c8f2a5d6e11"),
                "192.168.0.10:5005",
            )
            .await
            .expect("Registration should succeed");

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_register_rejected_by_monitoring() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path(REGISTER_PATH);
                then.status(500);
            })
            .await;

        let gateway = HttpMonitoringGateway::new(server.base_url());
        let err = gateway
            .register_endpoint(&HookupId::new("id"), "192.168.0.10:5005")
            .await
            .unwrap_err();

        assert!(matches!(err, MonitoringError::Status(500)));
    }

    #[tokio::test]
    async fn test_disconnect_posts_endpoint() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path(DISCONNECT_PATH)
                    .json_body(json!({ "endpoint": "192.168.0.10:5005" }));
                then.status(204);
            })
            .await;

        // Trailing slash must not produce a double slash in the path
        let gateway = HttpMonitoringGateway::new(format!("{}/", server.base_url()));
        gateway
            .disconnect_endpoint("192.168.0.10:5005")
            .await
            .expect("Disconnect should succeed");

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_unreachable_monitoring() {
        let gateway = HttpMonitoringGateway::new("http://127.0.0.1:1");

        let err = gateway.disconnect_endpoint("192.168.0.10:5005").await.unwrap_err();

        assert!(matches!(err, MonitoringError::Request(_)));
    }
}
