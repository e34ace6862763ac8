use crate::{errors::{ApiError, ApiResult}, AppState};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use workout_core::{validate_log, FieldError, WorkoutLog};

pub const GREETING: &str = "Welcome to the Muscle Growth API";

#[derive(Serialize)]
pub struct RootResponse {
    message: &'static str,
}

pub async fn root() -> Json<RootResponse> {
    Json(RootResponse { message: GREETING })
}

/// Every user with at least one stored log, in first-write order.
pub async fn list_users(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<String>>> {
    let users = state.store.users().await?;
    Ok(Json(users))
}

pub async fn get_logs(
    State(state): State<Arc<AppState>>,
    Path(username): Path<String>,
) -> ApiResult<Json<Vec<WorkoutLog>>> {
    let logs = state.store.logs_for(&username).await?;
    tracing::debug!(user = %username, count = logs.len(), "Fetched workout logs");
    Ok(Json(logs))
}

pub async fn add_log(
    State(state): State<Arc<AppState>>,
    Path(username): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<WorkoutLog>> {
    let Json(body) = body.map_err(|rejection| {
        ApiError::validation(vec![FieldError::json_invalid(rejection.body_text())])
    })?;

    let log = validate_log(&body).map_err(ApiError::validation)?;
    let stored = state.store.append(&username, log).await?;

    Ok(Json(stored))
}
