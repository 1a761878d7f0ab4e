//! Web API module.
//!
//! This module provides a REST API over the parts catalog and the
//! compatibility evaluator for a web-based build configurator.
//!
//! # Endpoints
//!
//! - `GET /health` - Health check
//! - `GET /api/parts` - Full catalog keyed by category
//! - `GET /api/parts/{category}` - Parts of one category
//! - `GET /api/parts/{category}/{id}` - A single part
//! - `GET /api/compatible-groups` - Compatible groups
//! - `POST /api/compatibility/check` - Check a selection given by part ids
//! - `POST /api/compatibility/evaluate` - Check a selection of full part records

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::catalog::{AllParts, PartsCatalog};
use crate::compatibility::{CompatibilityEvaluator, CompatibilityResult};
use crate::config::Config;
use crate::models::{BuildSpec, CompatibleGroup, PartCategory, SelectedParts};

// ============================================================================
// Application State
// ============================================================================

/// Shared application state for the web API.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    config: Arc<Config>,
    /// Parts catalog (immutable after load)
    catalog: Arc<PartsCatalog>,
}

impl AppState {
    /// Creates the state, loading the configured catalog or the built-in one.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let catalog = PartsCatalog::load_or_embedded(config.catalog.path.as_deref())?;
        Ok(Self::with_catalog(config, catalog))
    }

    /// Creates the state around an already loaded catalog.
    #[must_use]
    pub fn with_catalog(config: Config, catalog: PartsCatalog) -> Self {
        Self {
            config: Arc::new(config),
            catalog: Arc::new(catalog),
        }
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Current health status (e.g., "healthy").
    pub status: String,
    /// Application version.
    pub version: String,
    /// Number of parts in the loaded catalog.
    pub parts: usize,
    /// Catalog file path, or "built-in" for the embedded catalog.
    pub catalog: String,
}

/// Compatible group list response.
#[derive(Debug, Serialize)]
pub struct GroupListResponse {
    /// Compatible groups in catalog order.
    pub groups: Vec<CompatibleGroup>,
}

/// Selection by part ids, the body of `POST /api/compatibility/check`.
#[derive(Debug, Default, Deserialize)]
pub struct CheckRequest {
    /// PCB id.
    pub pcb_id: Option<u32>,
    /// Case id.
    pub case_id: Option<u32>,
    /// Plate id.
    pub plate_id: Option<u32>,
    /// Stabilizer id.
    pub stabilizer_id: Option<u32>,
    /// Switch id.
    pub switch_id: Option<u32>,
    /// Keycap id.
    pub keycap_id: Option<u32>,
}

impl From<CheckRequest> for BuildSpec {
    fn from(request: CheckRequest) -> Self {
        Self {
            name: String::new(),
            pcb_id: request.pcb_id,
            case_id: request.case_id,
            plate_id: request.plate_id,
            stabilizer_id: request.stabilizer_id,
            switch_id: request.switch_id,
            keycap_id: request.keycap_id,
        }
    }
}

/// API error response.
#[derive(Debug, Serialize)]
pub struct ApiError {
    /// Error message.
    pub error: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    fn with_details(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: Some(details.into()),
        }
    }
}

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ApiError>)>;

// ============================================================================
// Helpers
// ============================================================================

/// Parses a category path segment.
fn parse_category(category: &str) -> Result<PartCategory, (StatusCode, Json<ApiError>)> {
    category.parse().map_err(|e: anyhow::Error| {
        (
            StatusCode::BAD_REQUEST,
            Json(ApiError::with_details("Invalid part category", e.to_string())),
        )
    })
}

/// Parses a part id path segment.
fn parse_id(id: &str) -> Result<u32, (StatusCode, Json<ApiError>)> {
    id.parse().map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(ApiError::new(format!("Invalid part id: {id}"))),
        )
    })
}

fn serialization_error(e: &anyhow::Error) -> (StatusCode, Json<ApiError>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiError::with_details("Failed to serialize parts", e.to_string())),
    )
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /health - Health check.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        parts: state.catalog.part_count(),
        catalog: state
            .config
            .catalog
            .path
            .as_ref()
            .map_or_else(|| "built-in".to_string(), |p| p.display().to_string()),
    })
}

/// GET /api/parts - Full catalog.
async fn list_all_parts(State(state): State<AppState>) -> Json<AllParts> {
    Json(state.catalog.all().clone())
}

/// GET /api/parts/{category} - Parts of one category.
async fn list_parts(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> ApiResult<Value> {
    let category = parse_category(&category)?;
    let parts = state
        .catalog
        .category_json(category)
        .map_err(|e| serialization_error(&e))?;

    Ok(Json(parts))
}

/// GET /api/parts/{category}/{id} - A single part.
async fn get_part(
    State(state): State<AppState>,
    Path((category, id)): Path<(String, String)>,
) -> ApiResult<Value> {
    let category = parse_category(&category)?;
    let id = parse_id(&id)?;

    let part = state
        .catalog
        .part_json(category, id)
        .map_err(|e| serialization_error(&e))?
        .ok_or_else(|| {
            (
                StatusCode::NOT_FOUND,
                Json(ApiError::new(format!("{category} not found: {id}"))),
            )
        })?;

    Ok(Json(part))
}

/// GET /api/compatible-groups - Compatible groups.
async fn list_groups(State(state): State<AppState>) -> Json<GroupListResponse> {
    Json(GroupListResponse {
        groups: state.catalog.groups().to_vec(),
    })
}

/// POST /api/compatibility/check - Resolve part ids and evaluate.
async fn check_compatibility(
    State(state): State<AppState>,
    Json(request): Json<CheckRequest>,
) -> ApiResult<CompatibilityResult> {
    let build = BuildSpec::from(request);
    let selection = state.catalog.resolve(&build).map_err(|e| {
        warn!("Compatibility check with unknown part: {}", e);
        (
            StatusCode::NOT_FOUND,
            Json(ApiError::with_details("Part not found", e.to_string())),
        )
    })?;

    Ok(Json(CompatibilityEvaluator::new(&selection).evaluate()))
}

/// POST /api/compatibility/evaluate - Evaluate full part records.
async fn evaluate_selection(Json(selection): Json<SelectedParts>) -> Json<CompatibilityResult> {
    Json(CompatibilityEvaluator::new(&selection).evaluate())
}

// ============================================================================
// Router
// ============================================================================

/// Creates the API router.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration - allow all origins for the local frontend
    // NOTE: restrict origins before exposing the server beyond localhost.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Catalog endpoints
        .route("/api/parts", get(list_all_parts))
        .route("/api/parts/{category}", get(list_parts))
        .route("/api/parts/{category}/{id}", get(get_part))
        .route("/api/compatible-groups", get(list_groups))
        // Compatibility endpoints
        .route("/api/compatibility/check", post(check_compatibility))
        .route("/api/compatibility/evaluate", post(evaluate_selection))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Runs the web server.
///
/// # Errors
///
/// Returns an error if the catalog fails to load or the server fails to start.
pub async fn run_server(config: Config, addr: SocketAddr) -> anyhow::Result<()> {
    let state = AppState::new(config)?;
    info!(
        "Loaded catalog with {} parts in {} compatible groups",
        state.catalog.part_count(),
        state.catalog.groups().len()
    );

    let app = create_router(state);

    info!("Starting keebuilder web server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
