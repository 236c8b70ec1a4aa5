//! # Join Client
//!
//! Terminal counterpart of the frontend's join form.
//!
//! Same checks as the form: both inputs are trimmed and must be non-empty before anything is
//! sent. Then one `POST /api/join`, and the server's message is handed back.
use lobby_server::models::{ErrorResponse, JoinRequest, JoinResponse};
use reqwest::Client;
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("nickname and university are required")]
    MissingInput,

    #[error("cannot reach server: {0}")]
    Unreachable(#[from] reqwest::Error),

    #[error("server refused join ({status}): {message}")]
    Refused { status: u16, message: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinForm {
    nickname: String,
    university: String,
}

impl JoinForm {
    pub fn new(nickname: &str, university: &str) -> Result<Self, ClientError> {
        let nickname = nickname.trim();
        let university = university.trim();

        if nickname.is_empty() || university.is_empty() {
            return Err(ClientError::MissingInput);
        }

        Ok(Self {
            nickname: nickname.to_string(),
            university: university.to_string(),
        })
    }

    pub fn request(&self) -> JoinRequest {
        JoinRequest {
            nickname: self.nickname.clone(),
            university: self.university.clone(),
        }
    }
}

pub async fn join(
    client: &Client,
    backend_url: &str,
    form: &JoinForm,
) -> Result<JoinResponse, ClientError> {
    let url = format!("{}/api/join", backend_url.trim_end_matches('/'));
    debug!("Posting join to {url}");

    let response = client.post(&url).json(&form.request()).send().await?;
    let status = response.status();
    let body = response.text().await?;

    if status.is_success() {
        return serde_json::from_str(&body).map_err(|_| ClientError::Refused {
            status: status.as_u16(),
            message: body,
        });
    }

    let message = serde_json::from_str::<ErrorResponse>(&body)
        .map(|e| e.message)
        .unwrap_or(body);

    Err(ClientError::Refused {
        status: status.as_u16(),
        message,
    })
}
