//! # Supabase
//!
//! Hosted Postgres, reached through its PostgREST interface.
//!
//! Core purpose is to persist join records. Nothing is read back; the service only inserts.
//!
//! ## Requirements
//!
//! - One insert per join, no batching
//! - No local schema knowledge beyond the `nickname` and `university` columns
//! - Duplicate nicknames are allowed, uniqueness is up to the table constraints
//!
//! ## Implementation
//!
//! - `POST {url}/rest/v1/{table}` with the row as a JSON body
//! - `apikey` and `Authorization: Bearer` headers both carry the access key
//! - `Prefer: return=representation,count=exact` so the inserted rows and a count come back
//! - Count is read from the `Content-Range` header, e.g. `0-0/1` or `*/1`
//! - One `reqwest::Client` is built at startup and shared, connection reuse is left to it
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, header::CONTENT_RANGE};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

const REST_PATH: &str = "rest/v1";
const PREFER: &str = "return=representation,count=exact";

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Request to datastore failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Datastore rejected insert into {table} ({status}): {message}")]
    Rejected {
        table: String,
        status: StatusCode,
        message: String,
    },

    #[error("Unexpected response from datastore: {0}")]
    UnexpectedResponse(String),
}

/// Rows the datastore echoed back for an insert, plus its reported count.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Inserted {
    pub rows: Vec<Value>,
    pub count: Option<u64>,
}

#[async_trait]
pub trait Datastore: Send + Sync + 'static {
    async fn insert(&self, table: &str, row: Value) -> Result<Inserted, DatabaseError>;
}

#[derive(Debug, Clone)]
pub struct Supabase {
    client: Client,
    base_url: String,
    key: String,
}

#[derive(Deserialize)]
struct PostgrestError {
    message: String,
}

impl Supabase {
    pub fn new(url: &str, key: &str, timeout: Duration) -> Result<Self, DatabaseError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: url.trim_end_matches('/').to_string(),
            key: key.to_string(),
        })
    }

    pub fn table_url(&self, table: &str) -> String {
        format!("{}/{REST_PATH}/{table}", self.base_url)
    }
}

#[async_trait]
impl Datastore for Supabase {
    async fn insert(&self, table: &str, row: Value) -> Result<Inserted, DatabaseError> {
        let response = self
            .client
            .post(self.table_url(table))
            .header("apikey", &self.key)
            .bearer_auth(&self.key)
            .header("Prefer", PREFER)
            .json(&row)
            .send()
            .await?;

        let status = response.status();
        let count = response
            .headers()
            .get(CONTENT_RANGE)
            .and_then(|value| value.to_str().ok())
            .and_then(parse_count);

        let body = response.text().await?;

        debug!("Datastore responded {status} for insert into {table}");

        if !status.is_success() {
            return Err(DatabaseError::Rejected {
                table: table.to_string(),
                status,
                message: error_message(&body),
            });
        }

        let rows = match serde_json::from_str::<Value>(&body) {
            Ok(Value::Array(rows)) => rows,
            Ok(other) => return Err(DatabaseError::UnexpectedResponse(other.to_string())),
            Err(e) => return Err(DatabaseError::UnexpectedResponse(e.to_string())),
        };

        Ok(Inserted { rows, count })
    }
}

/// Total from a `Content-Range` value such as `0-0/1` or `*/1`. An unknown total (`*`) yields `None`.
pub fn parse_count(content_range: &str) -> Option<u64> {
    content_range.rsplit_once('/')?.1.trim().parse().ok()
}

fn error_message(body: &str) -> String {
    serde_json::from_str::<PostgrestError>(body)
        .map(|e| e.message)
        .unwrap_or_else(|_| body.trim().to_string())
}
