use axum::{Json, extract::rejection::JsonRejection};

use crate::{error::AppError, models::JoinRequest};

pub fn get_join_request(
    payload: Result<Json<JoinRequest>, JsonRejection>,
) -> Result<JoinRequest, AppError> {
    let Json(request) = payload?;

    validate(&request)?;

    Ok(request)
}

/// Values are checked, never rewritten: what passes is forwarded as sent.
pub fn validate(request: &JoinRequest) -> Result<(), AppError> {
    if request.nickname.trim().is_empty() {
        return Err(AppError::EmptyField("nickname"));
    }

    if request.university.trim().is_empty() {
        return Err(AppError::EmptyField("university"));
    }

    Ok(())
}
