use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use chrono::{SecondsFormat, Utc};
use tracing::info;

use crate::{
    error::AppError,
    models::{HealthResponse, JoinRequest, JoinResponse},
    state::AppState,
    utils::get_join_request,
};

pub async fn join_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<JoinRequest>, JsonRejection>,
) -> Result<Json<JoinResponse>, AppError> {
    let request = get_join_request(payload)?;

    let inserted = state
        .datastore
        .insert(&state.config.users_table, request.to_record())
        .await?;

    info!(
        nickname = %request.nickname,
        university = %request.university,
        count = ?inserted.count,
        "Join stored: {:?}",
        inserted.rows
    );

    Ok(Json(JoinResponse::joined(&request.university)))
}

pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}
