//! Documentation of the university lobby join service.
//!
//! Players enter a nickname and their university on the frontend, which posts them here.
//! Each join becomes one row in the Supabase `users` table and the player is sent on to the lobby.
//!
//!
//!
//! # General Infrastructure
//! - Frontend posts `{nickname, university}` to `POST /api/join`
//! - Server checks the payload shape, then inserts the row through Supabase's PostgREST API
//! - Success answers `{status: "success", message: "<university> lobby joined"}`
//! - `GET /api/health` is a liveness probe, it never touches the datastore
//!
//!
//!
//! # Errors
//!
//! | Cause | Status |
//! |---|---|
//! | Body not JSON, missing field, non-text field | 400 |
//! | Blank nickname or university | 400 |
//! | Supabase unreachable, rejected insert, bad response | 502 |
//!
//! Every error body is `{status: "error", message}`. Datastore details only go to the logs.
//!
//!
//!
//! # Notes
//!
//! ## CORS
//! The frontend is served from a different origin and sends credentials. A literal `*` cannot be
//! combined with credentials, so the request origin, method and headers are mirrored back instead.
//! Setting `FRONTEND_URL` pins the allowed origin.
//!
//! ## Duplicates
//! Joining twice with the same nickname inserts twice. Nothing here deduplicates, the table
//! constraints decide.
//!
//!
//!
//! # Setup
//!
//! Environment.
//! ```sh
//! export SUPABASE_URL=https://<project>.supabase.co
//! export SUPABASE_KEY=<anon key>
//! export RUST_PORT=8000
//! ```
//!
//! Run.
//! ```sh
//! cargo run -p lobby
//! ```
//!
//! Join from the terminal.
//! ```sh
//! cargo run -p lobby_client --bin lobby-join -- alice MIT
//! ```
use std::{sync::Arc, time::Duration};

use anyhow::Context;
use axum::{
    Router,
    http::HeaderValue,
    routing::{get, post},
};

#[cfg(unix)]
use tokio::signal::unix::{SignalKind, signal};
use tokio::{net::TcpListener, signal::ctrl_c};
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt};

pub mod config;
pub mod database;
pub mod error;
pub mod models;
pub mod routes;
pub mod state;
pub mod utils;

use config::Config;
use routes::{health_handler, join_handler};
use state::AppState;

const DEFAULT_LOG_FILTER: &str = "lobby_server=info,tower_http=info";

pub async fn start_server() -> anyhow::Result<()> {
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    info!("Loading config...");
    let config = Config::load().inspect_err(|e| error!("Config error: {e}"))?;

    info!("Initializing state...");
    let state = AppState::new(config)?;

    info!("Starting server...");
    let app = app(state.clone())?;

    let address = format!("0.0.0.0:{}", state.config.port);
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");

    Ok(())
}

pub fn app(state: Arc<AppState>) -> anyhow::Result<Router> {
    let cors = cors_layer(state.config.frontend_url.as_deref())?;

    Ok(Router::new()
        .route("/api/join", post(join_handler))
        .route("/api/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}

fn cors_layer(frontend_url: Option<&str>) -> anyhow::Result<CorsLayer> {
    let origin = match frontend_url {
        Some(url) => AllowOrigin::exact(
            HeaderValue::from_str(url).with_context(|| format!("Invalid FRONTEND_URL {url}"))?,
        ),
        None => AllowOrigin::mirror_request(),
    };

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
        .max_age(Duration::from_secs(60 * 60)))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                error!("Failed to install Ctrl+C handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!("Failed to install signal handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
