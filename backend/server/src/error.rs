use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use crate::{database::DatabaseError, models::ErrorResponse};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    #[error("{0} must not be empty")]
    EmptyField(&'static str),

    #[error("Failed to store join request")]
    Datastore(#[from] DatabaseError),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::MalformedPayload(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::MalformedPayload { .. } => StatusCode::BAD_REQUEST,
            AppError::EmptyField { .. } => StatusCode::BAD_REQUEST,
            AppError::Datastore(ref source) => {
                error!("Datastore failure: {source}");

                StatusCode::BAD_GATEWAY
            }
        };

        (status, Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}
