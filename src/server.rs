//! Read-only HTTP API over precomputed artifacts.
//!
//! All artifacts are loaded once at startup and shared immutably between
//! requests.

use crate::artifacts::{ArtifactStore, NetworkArtifacts};
use crate::citation::CitationNetwork;
use crate::collaboration::CollaborationNetwork;
use crate::error::{NetworkError, Result};
use crate::histogram::HistogramBin;
use crate::timeline::TimelineEntry;
use axum::{
    extract::{Path, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

pub struct AppState {
    pub artifacts: NetworkArtifacts,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for NetworkError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            NetworkError::NotFound(message) => (StatusCode::NOT_FOUND, message),
            other => (StatusCode::INTERNAL_SERVER_ERROR, other.to_string()),
        };

        if status.is_server_error() {
            error!(error = %message, status = status.as_u16(), "Server error");
        } else {
            warn!(error = %message, status = status.as_u16(), "Client error");
        }

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

/// Build the API router over already-loaded artifacts
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET])
        .allow_origin(Any);

    Router::new()
        .route("/", get(home_handler))
        .route("/api/citation-network", get(citation_handler))
        .route("/api/collaboration-network", get(collaboration_handler))
        .route("/api/timeline", get(timeline_handler))
        .route("/api/histogram/{year}", get(histogram_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Load every artifact from `store` and serve until shutdown.
///
/// Fails before binding if any artifact is missing.
pub async fn run(store: &ArtifactStore, addr: SocketAddr) -> Result<()> {
    let artifacts = store.load_all()?;
    info!(
        papers = artifacts.citation.nodes.len(),
        authors = artifacts.collaboration.nodes.len(),
        years = artifacts.timeline.len(),
        "All data loaded"
    );

    let app = router(Arc::new(AppState { artifacts }));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %addr, "Listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Service name and endpoint index
async fn home_handler() -> Json<Value> {
    Json(json!({
        "message": "Research Network API",
        "endpoints": {
            "/api/citation-network": "Get citation network data",
            "/api/collaboration-network": "Get collaboration network data",
            "/api/timeline": "Get publication timeline data",
            "/api/histogram/{year}": "Get citation histogram for a specific year"
        }
    }))
}

async fn citation_handler(State(state): State<Arc<AppState>>) -> Json<CitationNetwork> {
    Json(state.artifacts.citation.clone())
}

async fn collaboration_handler(State(state): State<Arc<AppState>>) -> Json<CollaborationNetwork> {
    Json(state.artifacts.collaboration.clone())
}

async fn timeline_handler(State(state): State<Arc<AppState>>) -> Json<Vec<TimelineEntry>> {
    Json(state.artifacts.timeline.clone())
}

/// Citation bins for one year, 404 when the year has no papers
async fn histogram_handler(
    State(state): State<Arc<AppState>>,
    Path(year): Path<i32>,
) -> Result<Json<Vec<HistogramBin>>> {
    state
        .artifacts
        .histogram
        .get(year)
        .map(|bins| Json(bins.to_vec()))
        .ok_or_else(|| NetworkError::NotFound(format!("No data for year {}", year)))
}
