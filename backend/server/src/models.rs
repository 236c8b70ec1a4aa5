use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

pub const SUCCESS: &str = "success";
pub const ERROR: &str = "error";

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct JoinRequest {
    pub nickname: String,
    pub university: String,
}

impl JoinRequest {
    /// Row written to the users table.
    pub fn to_record(&self) -> Value {
        json!({
            "nickname": self.nickname,
            "university": self.university,
        })
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct JoinResponse {
    pub status: String,
    pub message: String,
}

impl JoinResponse {
    pub fn joined(university: &str) -> Self {
        Self {
            status: SUCCESS.to_string(),
            message: format!("{university} lobby joined"),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ErrorResponse {
    pub status: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: ERROR.to_string(),
            message: message.into(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}
