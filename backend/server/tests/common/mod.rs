//! Shared helpers for router and datastore tests.
//!
//! - `Recorder`: in-memory `Datastore` that keeps every insert, or fails every insert.
//! - `FakePostgrest`: axum server on `127.0.0.1:0` that answers like Supabase's insert endpoint.

#![allow(dead_code)]

use std::{
    net::SocketAddr,
    sync::{Arc, Mutex},
    time::Duration,
};

use async_trait::async_trait;
use axum::{
    Json, Router,
    body::{Body, to_bytes},
    extract::{Path, State},
    http::{HeaderMap, Request, StatusCode, header::CONTENT_RANGE, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
    routing::post,
};
use lobby_server::{
    config::Config,
    database::{DatabaseError, Datastore, Inserted},
};
use serde_json::{Value, json};
use tokio::net::TcpListener;

pub fn config(supabase_url: &str) -> Config {
    Config {
        port: 0,
        supabase_url: supabase_url.to_string(),
        supabase_key: "test-key".to_string(),
        users_table: "users".to_string(),
        datastore_timeout: Duration::from_millis(500),
        frontend_url: None,
    }
}

pub fn join_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/join")
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn json_body(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();

    serde_json::from_slice(&bytes).unwrap()
}

#[derive(Default)]
pub struct Recorder {
    pub inserts: Mutex<Vec<(String, Value)>>,
    fail: bool,
}

impl Recorder {
    pub fn failing() -> Self {
        Self {
            inserts: Mutex::default(),
            fail: true,
        }
    }

    pub fn inserts(&self) -> Vec<(String, Value)> {
        self.inserts.lock().unwrap().clone()
    }
}

#[async_trait]
impl Datastore for Recorder {
    async fn insert(&self, table: &str, row: Value) -> Result<Inserted, DatabaseError> {
        if self.fail {
            return Err(DatabaseError::UnexpectedResponse("unavailable".to_string()));
        }

        let mut inserts = self.inserts.lock().unwrap();
        inserts.push((table.to_string(), row.clone()));

        let mut stored = row;
        stored["id"] = json!(inserts.len());

        Ok(Inserted {
            rows: vec![stored],
            count: Some(1),
        })
    }
}

#[derive(Debug, Clone)]
pub struct Captured {
    pub table: String,
    pub headers: HeaderMap,
    pub body: Value,
}

/// Tables with special behavior:
/// - `conflict`: 409 with a PostgREST error body
/// - `broken`: 201 with an object instead of an array
/// - `slow`: sleeps 2s before answering
/// - anything else: 201, echoes the row with an `id`
pub struct FakePostgrest {
    pub addr: SocketAddr,
    pub captured: Arc<Mutex<Vec<Captured>>>,
}

impl FakePostgrest {
    pub async fn start() -> Self {
        let captured = Arc::new(Mutex::new(Vec::new()));

        let router = Router::new()
            .route("/rest/v1/{table}", post(fake_insert))
            .with_state(captured.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Self { addr, captured }
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn captured(&self) -> Vec<Captured> {
        self.captured.lock().unwrap().clone()
    }
}

async fn fake_insert(
    State(captured): State<Arc<Mutex<Vec<Captured>>>>,
    Path(table): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    captured.lock().unwrap().push(Captured {
        table: table.clone(),
        headers,
        body: body.clone(),
    });

    match table.as_str() {
        "conflict" => (
            StatusCode::CONFLICT,
            Json(json!({
                "code": "23505",
                "details": null,
                "hint": null,
                "message": "duplicate key value violates unique constraint"
            })),
        )
            .into_response(),
        "broken" => (StatusCode::CREATED, Json(json!({ "ok": true }))).into_response(),
        "slow" => {
            tokio::time::sleep(Duration::from_secs(2)).await;

            (StatusCode::CREATED, Json(json!([]))).into_response()
        }
        _ => {
            let mut row = body;
            row["id"] = json!(1);

            (
                StatusCode::CREATED,
                [(CONTENT_RANGE, "*/1")],
                Json(json!([row])),
            )
                .into_response()
        }
    }
}

/// Address nothing is listening on.
pub async fn closed_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();

    listener.local_addr().unwrap()
}
