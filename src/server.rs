//! HTTP API for SongRank.
//!
//! Every handler maps one request onto one [`ScoringEngine`] call and turns
//! the outcome into a status code. Request-shape validation happens here;
//! the engine only sees well-formed input.
//!
//! # Endpoints
//!
//! | Method | Path | Success | Failure |
//! |--------|------|---------|---------|
//! | `POST` | `/recommendations` | 201 + record | 422, 409 |
//! | `GET`  | `/recommendations` | 200 + array | |
//! | `GET`  | `/recommendations/random` | 200 + record | 404 |
//! | `GET`  | `/recommendations/top/{amount}` | 200 + array | 422 |
//! | `GET`  | `/recommendations/{id}` | 200 + record | 404, 422 |
//! | `POST` | `/recommendations/{id}/upvote` | 200 | 404, 422 |
//! | `POST` | `/recommendations/{id}/downvote` | 200 | 404, 422 |
//! | `GET`  | `/health` | 200 | |
//! | `DELETE` | `/recommendations` | 200 (test mode only) | |
//!
//! # Error Contract
//!
//! ```json
//! { "error": { "code": "conflict", "message": "Recommendations names must be unique" } }
//! ```
//!
//! Error codes: `validation` (422), `conflict` (409), `not_found` (404),
//! `internal` (500).
//!
//! # CORS
//!
//! All origins, methods, and headers are permitted so browser front-ends
//! served from another origin can call the API.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use songrank_core::models::{NewRecommendation, Recommendation};
use songrank_core::{EngineError, ScoringEngine};

use crate::config::Config;
use crate::db;
use crate::migrate;
use crate::sqlite_store::SqliteStore;

/// Shared application state passed to all route handlers via Axum's `State` extractor.
#[derive(Clone)]
struct AppState {
    engine: ScoringEngine,
}

/// Starts the HTTP server backed by the configured SQLite database.
///
/// Creates the schema if needed, binds to `[server].bind`, and serves until
/// the process receives Ctrl-C.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    let pool = db::connect(config).await?;
    migrate::apply(&pool).await?;

    let engine = ScoringEngine::with_thread_random(Arc::new(SqliteStore::new(pool)));
    let app = router(engine, config.server.test_mode);

    if config.server.test_mode {
        tracing::warn!("test mode enabled: DELETE /recommendations wipes all data");
    }

    let listener = tokio::net::TcpListener::bind(&config.server.bind).await?;
    tracing::info!(
        bind = %config.server.bind,
        db = %config.db.path.display(),
        "SongRank listening on http://{}",
        config.server.bind
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}

/// Builds the router around an engine.
///
/// `test_mode` mounts `DELETE /recommendations`.
pub fn router(engine: ScoringEngine, test_mode: bool) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut collection = get(handle_list).post(handle_create);
    if test_mode {
        collection = collection.delete(handle_reset);
    }

    Router::new()
        .route("/recommendations", collection)
        .route("/recommendations/random", get(handle_random))
        .route("/recommendations/top/{amount}", get(handle_top))
        .route("/recommendations/{id}", get(handle_get))
        .route("/recommendations/{id}/upvote", post(handle_upvote))
        .route("/recommendations/{id}/downvote", post(handle_downvote))
        .route("/health", get(handle_health))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(AppState { engine })
}

// ============ Error response ============

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    code: String,
    message: String,
}

/// Internal error type that converts into an Axum HTTP response.
struct AppError {
    status: StatusCode,
    code: String,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code,
                message: self.message,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

fn validation(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::UNPROCESSABLE_ENTITY,
        code: "validation".to_string(),
        message: message.into(),
    }
}

impl From<EngineError> for AppError {
    fn from(err: EngineError) -> Self {
        let status = match &err {
            EngineError::Conflict(_) => StatusCode::CONFLICT,
            EngineError::NotFound(_) => StatusCode::NOT_FOUND,
            EngineError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            EngineError::Store(e) => {
                tracing::error!(error = %e, "storage failure");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        AppError {
            status,
            code: err.kind().to_string(),
            message: err.to_string(),
        }
    }
}

fn parse_id(raw: &str) -> Result<i64, AppError> {
    raw.parse::<i64>()
        .map_err(|_| validation(format!("id must be an integer, got '{}'", raw)))
}

// ============ Handlers ============

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `POST /recommendations`
///
/// Any body that does not deserialize into `{ name, youtubeLink }` (missing
/// or unknown fields, wrong types, bad JSON, wrong content type) is a 422.
async fn handle_create(
    State(state): State<AppState>,
    payload: Result<Json<NewRecommendation>, JsonRejection>,
) -> Result<(StatusCode, Json<Recommendation>), AppError> {
    let Json(input) = payload.map_err(|rejection| validation(rejection.body_text()))?;

    if input.name.trim().is_empty() {
        return Err(validation("name must not be empty"));
    }
    if input.youtube_link.trim().is_empty() {
        return Err(validation("youtubeLink must not be empty"));
    }

    let created = state.engine.insert(input).await?;
    tracing::info!(id = created.id, name = %created.name, "recommendation created");
    Ok((StatusCode::CREATED, Json(created)))
}

async fn handle_list(State(state): State<AppState>) -> Result<Json<Vec<Recommendation>>, AppError> {
    Ok(Json(state.engine.get().await?))
}

async fn handle_random(State(state): State<AppState>) -> Result<Json<Recommendation>, AppError> {
    Ok(Json(state.engine.get_random().await?))
}

async fn handle_top(
    State(state): State<AppState>,
    Path(amount): Path<String>,
) -> Result<Json<Vec<Recommendation>>, AppError> {
    let amount = amount
        .parse::<usize>()
        .map_err(|_| validation(format!("amount must be a non-negative integer, got '{}'", amount)))?;
    Ok(Json(state.engine.get_top(amount).await?))
}

async fn handle_get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Recommendation>, AppError> {
    let id = parse_id(&id)?;
    Ok(Json(state.engine.get_by_id(id).await?))
}

async fn handle_upvote(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&id)?;
    state.engine.upvote(id).await?;
    Ok(StatusCode::OK)
}

async fn handle_downvote(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&id)?;
    let updated = state.engine.downvote(id).await?;
    if updated.score < songrank_core::engine::REMOVAL_THRESHOLD {
        tracing::info!(id, score = updated.score, "recommendation removed by downvote");
    }
    Ok(StatusCode::OK)
}

/// `DELETE /recommendations`, mounted only in test mode.
async fn handle_reset(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    state.engine.reset().await?;
    tracing::warn!("all recommendations removed via test-mode reset");
    Ok(StatusCode::OK)
}
