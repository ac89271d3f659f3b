use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::compare::{ComparisonReport, compare};
use crate::config::ServeArgs;
use crate::persist::parse_any_players;
use crate::stats::PlayerStatRow;

#[derive(Debug, Clone)]
pub struct AppState {
    pub data_path: PathBuf,
    pub wnba_path: PathBuf,
    pub static_dir: PathBuf,
}

impl AppState {
    pub fn from_args(args: &ServeArgs) -> Self {
        Self {
            data_path: args.paths.data.clone(),
            wnba_path: args.paths.wnba.clone(),
            static_dir: args.static_dir.clone(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0} has not been generated yet")]
    Missing(String),
    #[error("failed reading {path}: {message}")]
    Read { path: String, message: String },
    #[error("{0} is not valid stats json")]
    Invalid(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::Missing(_) => StatusCode::NOT_FOUND,
            ApiError::Read { .. } | ApiError::Invalid(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            warn!("{self}");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub module: String,
    pub version: String,
}

pub fn build_router(state: AppState) -> Router {
    let index = ServeFile::new(state.static_dir.join("index.html"));
    let assets = ServeDir::new(&state.static_dir);

    Router::new()
        .route_service("/", index)
        .route("/data", get(get_data))
        .route("/data.json", get(get_data))
        .route("/api/data", get(get_data))
        .route("/wnba.json", get(get_wnba))
        .route("/api/wnba", get(get_wnba))
        .route("/api/compare", get(get_compare))
        .route("/health", get(health))
        .fallback_service(assets)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn serve(args: &ServeArgs) -> Result<()> {
    let state = AppState::from_args(args);
    let listener = tokio::net::TcpListener::bind(&args.bind)
        .await
        .with_context(|| format!("bind {}", args.bind))?;
    info!(
        "serving {} and {} on http://{}",
        state.data_path.display(),
        state.static_dir.display(),
        args.bind
    );
    axum::serve(listener, build_router(state))
        .await
        .context("http server stopped")
}

/// The scraped document as it sits on disk.
async fn get_data(State(state): State<AppState>) -> Result<Response, ApiError> {
    json_file(&state.data_path).await
}

async fn get_wnba(State(state): State<AppState>) -> Result<Response, ApiError> {
    json_file(&state.wnba_path).await
}

async fn get_compare(State(state): State<AppState>) -> Result<Json<ComparisonReport>, ApiError> {
    let primary = read_players(&state.data_path).await?;
    let other = read_players(&state.wnba_path).await?;
    Ok(Json(compare(&primary, &other)))
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        module: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

async fn json_file(path: &Path) -> Result<Response, ApiError> {
    let body = read_bytes(path).await?;
    Ok(([(header::CONTENT_TYPE, "application/json")], body).into_response())
}

async fn read_players(path: &Path) -> Result<Vec<PlayerStatRow>, ApiError> {
    let body = read_bytes(path).await?;
    let raw = String::from_utf8_lossy(&body);
    parse_any_players(&raw).map_err(|_| ApiError::Invalid(path.display().to_string()))
}

async fn read_bytes(path: &Path) -> Result<Vec<u8>, ApiError> {
    tokio::fs::read(path).await.map_err(|err| {
        let shown = path.display().to_string();
        if err.kind() == ErrorKind::NotFound {
            ApiError::Missing(shown)
        } else {
            ApiError::Read {
                path: shown,
                message: err.to_string(),
            }
        }
    })
}
