//! Access control gate
//!
//! Token verification is delegated to the identity service. Read requests
//! need an authenticated caller; every mutation needs an admin.

use async_trait::async_trait;
use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use reqwest::Client;
use serde_json::{json, Value};
use sfh_common::api::types::{ErrorResponse, INTERNAL_ERROR, UNAUTHORIZED};
use tracing::{error, warn};

use crate::AppState;

/// Privilege a route requires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessLevel {
    User,
    Admin,
}

impl AccessLevel {
    /// GET and HEAD are reads; anything else mutates
    pub fn for_method(method: &Method) -> Self {
        if *method == Method::GET || *method == Method::HEAD {
            AccessLevel::User
        } else {
            AccessLevel::Admin
        }
    }

    fn verify_path(&self) -> &'static str {
        match self {
            AccessLevel::User => "/auth/verify",
            AccessLevel::Admin => "/auth/verify-admin",
        }
    }
}

/// Caller credentials forwarded to the identity service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Full `Authorization` header value, including the `Bearer ` prefix
    pub authorization: String,
    pub cookie: Option<String>,
}

impl Credentials {
    /// Extract credentials; a bearer `Authorization` header is mandatory
    pub fn from_headers(headers: &HeaderMap) -> Result<Self, AuthError> {
        let authorization = headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .filter(|v| v.starts_with("Bearer "))
            .ok_or(AuthError::MissingToken)?;

        let cookie = headers
            .get(header::COOKIE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        Ok(Self {
            authorization: authorization.to_string(),
            cookie,
        })
    }
}

/// Verification of caller credentials
#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    async fn verify(&self, credentials: &Credentials, level: AccessLevel) -> Result<(), AuthError>;
}

/// Identity service client
///
/// `GET {base}/auth/verify` for users, `GET {base}/auth/verify-admin` for
/// admins, with the caller's credentials forwarded unchanged.
#[derive(Clone)]
pub struct HttpIdentityVerifier {
    http_client: Client,
    base_url: String,
}

impl HttpIdentityVerifier {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http_client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl IdentityVerifier for HttpIdentityVerifier {
    async fn verify(&self, credentials: &Credentials, level: AccessLevel) -> Result<(), AuthError> {
        let url = format!("{}{}", self.base_url, level.verify_path());

        let mut request = self
            .http_client
            .get(&url)
            .header(reqwest::header::AUTHORIZATION, &credentials.authorization);
        if let Some(cookie) = &credentials.cookie {
            request = request.header(reqwest::header::COOKIE, cookie);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AuthError::Unavailable(format!("Identity service unreachable: {}", e)))?;

        let status = response.status().as_u16();
        match status {
            200..=299 => Ok(()),
            401 | 403 => {
                let body = response.json::<Value>().await.unwrap_or_else(|_| json!({}));
                Err(AuthError::Rejected { status, body })
            }
            _ => Err(AuthError::Unavailable(format!(
                "Identity service returned HTTP {}",
                status
            ))),
        }
    }
}

/// Authentication middleware
///
/// Applied to the public hookup routes only. The internal route and
/// `/health` do NOT use this middleware.
pub async fn access_gate(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let level = AccessLevel::for_method(request.method());
    let credentials = Credentials::from_headers(request.headers())?;

    state.identity.verify(&credentials, level).await?;

    Ok(next.run(request).await)
}

/// Authentication error types for HTTP responses
#[derive(Debug)]
pub enum AuthError {
    /// No bearer token on the request
    MissingToken,
    /// Identity service refused the caller (401 or 403); passed through
    Rejected { status: u16, body: Value },
    /// Identity service could not give an answer
    Unavailable(String),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            AuthError::MissingToken => (
                StatusCode::UNAUTHORIZED,
                Json(ErrorResponse::new(UNAUTHORIZED, "Access token is required")),
            )
                .into_response(),
            AuthError::Rejected { status, body } => {
                warn!("Identity service rejected caller with HTTP {}", status);
                let status = StatusCode::from_u16(status).unwrap_or(StatusCode::UNAUTHORIZED);
                (status, Json(body)).into_response()
            }
            AuthError::Unavailable(msg) => {
                error!("Authentication error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse::new(INTERNAL_ERROR, "Internal Server Error")),
                )
                    .into_response()
            }
        }
    }
}
