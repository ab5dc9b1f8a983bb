//! Smart furniture hookup endpoints
//!
//! Request validation, DTO mapping and delegation to `HookupService`.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{ApiError, ApiResult, HookupError};
use crate::models::{Hookup, HookupId};
use crate::AppState;

const REQUIRED: &str = "Required";
const EMPTY: &str = "String must contain at least 1 character(s)";

/// Hookup as exposed over HTTP
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HookupDto {
    pub id: String,
    pub name: String,
    pub utility_type: String,
    pub endpoint: String,
}

impl From<Hookup> for HookupDto {
    fn from(hookup: Hookup) -> Self {
        Self {
            id: hookup.id.to_string(),
            name: hookup.name,
            utility_type: hookup.utility_type.to_string(),
            endpoint: hookup.endpoint,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HookupListResponse {
    pub smart_furniture_hookups: Vec<HookupDto>,
}

/// POST body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateHookupRequest {
    pub name: Option<String>,
    pub utility_type: Option<String>,
    pub endpoint: Option<String>,
}

/// PATCH body
#[derive(Debug, Deserialize)]
pub struct UpdateHookupRequest {
    pub name: Option<String>,
    pub endpoint: Option<String>,
}

/// Check a required string field, recording a message when it is absent or empty
fn require<'a>(
    errors: &mut BTreeMap<String, String>,
    field: &str,
    value: &'a Option<String>,
) -> Option<&'a str> {
    match value.as_deref() {
        None => {
            errors.insert(field.to_string(), REQUIRED.to_string());
            None
        }
        Some("") => {
            errors.insert(field.to_string(), EMPTY.to_string());
            None
        }
        Some(v) => Some(v),
    }
}

/// Check an optional string field, which must be non-empty when present
fn non_empty(errors: &mut BTreeMap<String, String>, field: &str, value: &Option<String>) {
    if value.as_deref() == Some("") {
        errors.insert(field.to_string(), EMPTY.to_string());
    }
}

fn body_or_reject<T>(payload: Result<Json<T>, JsonRejection>) -> ApiResult<T> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| ApiError::invalid_field("body", rejection.body_text()))
}

/// GET /api/smart-furniture-hookups
pub async fn list_hookups(State(state): State<AppState>) -> ApiResult<Json<HookupListResponse>> {
    let hookups = state.service.list().await?;

    Ok(Json(HookupListResponse {
        smart_furniture_hookups: hookups.into_iter().map(HookupDto::from).collect(),
    }))
}

/// GET /api/smart-furniture-hookups/:id
///
/// Also served without authentication on the internal route.
pub async fn get_hookup(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<HookupDto>> {
    let hookup = state
        .service
        .get(&HookupId::new(id))
        .await?
        .ok_or(HookupError::NotFound)?;

    Ok(Json(hookup.into()))
}

/// POST /api/smart-furniture-hookups
pub async fn create_hookup(
    State(state): State<AppState>,
    payload: Result<Json<CreateHookupRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<HookupDto>)> {
    let request = body_or_reject(payload)?;

    let mut errors = BTreeMap::new();
    let name = require(&mut errors, "name", &request.name);
    let utility_type = require(&mut errors, "utilityType", &request.utility_type);
    let endpoint = require(&mut errors, "endpoint", &request.endpoint);

    let (Some(name), Some(utility_type), Some(endpoint)) = (name, utility_type, endpoint) else {
        return Err(ApiError::InvalidPayload(errors));
    };

    let hookup = state.service.create(name, utility_type, endpoint).await?;

    Ok((StatusCode::CREATED, Json(hookup.into())))
}

/// PATCH /api/smart-furniture-hookups/:id
pub async fn update_hookup(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateHookupRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<HookupDto>)> {
    let request = body_or_reject(payload)?;

    let mut errors = BTreeMap::new();
    non_empty(&mut errors, "name", &request.name);
    non_empty(&mut errors, "endpoint", &request.endpoint);
    if request.name.is_none() && request.endpoint.is_none() {
        errors.insert("body".to_string(), HookupError::NothingToUpdate.to_string());
    }
    if !errors.is_empty() {
        return Err(ApiError::InvalidPayload(errors));
    }

    let hookup = state
        .service
        .update(&HookupId::new(id), request.name, request.endpoint)
        .await?;

    Ok((StatusCode::CREATED, Json(hookup.into())))
}

/// DELETE /api/smart-furniture-hookups/:id
pub async fn delete_hookup(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state.service.delete(&HookupId::new(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
