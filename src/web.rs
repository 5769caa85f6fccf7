//! HTTP boundary. Validates request shape and maps orchestrator outcomes to
//! status codes; everything interesting happens one layer down.

use crate::errors::FurloughError;
use crate::orchestrator::{Orchestrator, PermissionPatch};
use crate::settings::Settings;
use crate::storage::{NewPermission, Permission};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub orchestrator: Orchestrator,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/permissions",
            get(list_permissions).post(request_permission),
        )
        .route("/api/permissions/{id}", axum::routing::put(modify_permission))
        .route("/api/permission-types", get(list_permission_types))
        .with_state(state)
}

pub async fn serve(settings: Settings, orchestrator: Orchestrator) -> miette::Result<()> {
    let state = AppState {
        settings: Arc::new(settings),
        orchestrator,
    };

    let addr: SocketAddr = format!(
        "{}:{}",
        state.settings.server.host, state.settings.server.port
    )
    .parse()
    .map_err(|e| miette::miette!("bad listen addr: {e}"))?;

    let app = router(state);

    tracing::info!(%addr, "API listening");
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| miette::miette!("bind failed: {e}"))?;
    axum::serve(listener, app)
        .await
        .map_err(|e| miette::miette!("server failed: {e}"))?;
    Ok(())
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreatePermissionBody {
    first_name: String,
    last_name: String,
    type_code: i32,
    /// Unix timestamp (seconds)
    date: i64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct UpdatePermissionBody {
    first_name: Option<String>,
    last_name: Option<String>,
    type_code: Option<i32>,
    date: Option<i64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PermissionResponse {
    id: i32,
    first_name: String,
    last_name: String,
    type_code: i32,
    date: i64,
    type_description: Option<String>,
}

impl From<Permission> for PermissionResponse {
    fn from(record: Permission) -> Self {
        Self {
            id: record.id,
            first_name: record.employee_first_name,
            last_name: record.employee_last_name,
            type_code: record.type_code,
            date: record.permission_date,
            type_description: record.type_description,
        }
    }
}

struct ApiError(FurloughError);

impl From<FurloughError> for ApiError {
    fn from(err: FurloughError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            FurloughError::InvalidReference(_) | FurloughError::BadRequest(_) => {
                (StatusCode::BAD_REQUEST, self.0.to_string())
            }
            other => {
                tracing::error!(error = %other, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An error occurred while processing your request".to_string(),
                )
            }
        };

        (
            status,
            Json(json!({ "statusCode": status.as_u16(), "message": message })),
        )
            .into_response()
    }
}

fn validate_name(field: &str, value: &str) -> Result<(), FurloughError> {
    if value.trim().is_empty() {
        return Err(FurloughError::BadRequest(format!("{field} is required")));
    }
    if value.chars().count() > 100 {
        return Err(FurloughError::BadRequest(format!(
            "{field} cannot exceed 100 characters"
        )));
    }
    Ok(())
}

fn validate_type_code(type_code: i32) -> Result<(), FurloughError> {
    if type_code < 1 {
        return Err(FurloughError::BadRequest(
            "typeCode must be greater than 0".to_string(),
        ));
    }
    Ok(())
}

async fn request_permission(
    State(state): State<AppState>,
    Json(body): Json<CreatePermissionBody>,
) -> Result<Json<PermissionResponse>, ApiError> {
    validate_name("firstName", &body.first_name)?;
    validate_name("lastName", &body.last_name)?;
    validate_type_code(body.type_code)?;

    let record = state
        .orchestrator
        .request_permission(NewPermission {
            employee_first_name: body.first_name,
            employee_last_name: body.last_name,
            type_code: body.type_code,
            permission_date: body.date,
        })
        .await?;

    Ok(Json(record.into()))
}

async fn modify_permission(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<UpdatePermissionBody>,
) -> Result<Response, ApiError> {
    if let Some(first_name) = &body.first_name {
        validate_name("firstName", first_name)?;
    }
    if let Some(last_name) = &body.last_name {
        validate_name("lastName", last_name)?;
    }
    if let Some(type_code) = body.type_code {
        validate_type_code(type_code)?;
    }

    let patch = PermissionPatch {
        employee_first_name: body.first_name,
        employee_last_name: body.last_name,
        type_code: body.type_code,
        permission_date: body.date,
    };

    match state.orchestrator.modify_permission(id, patch).await? {
        Some(record) => Ok(Json(PermissionResponse::from(record)).into_response()),
        None => Ok(StatusCode::NOT_FOUND.into_response()),
    }
}

async fn list_permissions(
    State(state): State<AppState>,
) -> Result<Json<Vec<PermissionResponse>>, ApiError> {
    let records = state.orchestrator.list_permissions().await?;
    Ok(Json(records.into_iter().map(Into::into).collect()))
}

async fn list_permission_types(
    State(state): State<AppState>,
) -> Result<Json<Vec<crate::storage::PermissionType>>, ApiError> {
    let types = state.orchestrator.list_permission_types().await?;
    Ok(Json(types))
}
