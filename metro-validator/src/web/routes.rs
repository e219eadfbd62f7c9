//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderValue, Method, StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use tower_http::cors::CorsLayer;
use tracing::{error, info, warn};

use crate::dataset::LoadError;
use crate::report::{ErrorResponse, ValidationResponse};
use crate::validate::run_validation;

use super::config::ServerConfig;
use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState, config: &ServerConfig) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/validate", get(validate))
        .layer(cors_layer(&config.allowed_origins))
        .with_state(state)
}

/// Build the CORS layer. Origins that are not valid header values are skipped.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match o.parse::<HeaderValue>() {
            Ok(v) => Some(v),
            Err(e) => {
                warn!(origin = %o, error = %e, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

/// Health check endpoint.
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: "metro-validator",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Load a fresh snapshot and validate it.
async fn validate(State(state): State<AppState>) -> Result<Json<ApiValidationResponse>, AppError> {
    let database = state.source.describe();

    // Loading and validating are synchronous; keep them off the async workers
    let response = tokio::task::spawn_blocking(move || {
        let dataset = state.source.load()?;
        let report = run_validation(&dataset, &state.config);
        Ok::<_, LoadError>(ValidationResponse::new(database, dataset.stats(), &report))
    })
    .await
    .map_err(|e| AppError::Internal {
        message: format!("validation task failed: {e}"),
    })??;

    info!(status = %response.status, "served validation");
    Ok(Json(response.into()))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    Internal { message: String },
}

impl From<LoadError> for AppError {
    fn from(e: LoadError) -> Self {
        AppError::Internal {
            message: format!("Failed to load dataset: {e}"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        error!(%status, %message, "request failed");

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}
