use std::sync::Arc;

use axum::{
    http::{header, Method, StatusCode},
    middleware,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    middleware::{make_span_with_request_context, request_context_middleware},
    services::{CandidateSource, RateLimiter, RecommendationEngine},
};

pub mod movies;

/// Shared application state
pub struct AppState {
    pub engine: RecommendationEngine,
    pub catalog: CandidateSource,
    pub rate_limiter: RateLimiter,
    /// Prefix for poster paths
    pub image_base_url: String,
}

impl AppState {
    pub fn new(catalog: CandidateSource, rate_limiter: RateLimiter, image_base_url: String) -> Self {
        Self {
            engine: RecommendationEngine::new(catalog.clone()),
            catalog,
            rate_limiter,
            image_base_url,
        }
    }
}

/// Creates the application router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_routes())
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(cors)
                .layer(middleware::from_fn(request_context_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_context)),
        )
}

/// API routes under /api
fn api_routes() -> Router<Arc<AppState>> {
    Router::new().route("/movies", post(movies::recommend))
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
