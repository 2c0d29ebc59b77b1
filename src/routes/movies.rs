use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    middleware::RequestContext,
    models::MovieResponse,
    routes::AppState,
    services::{resolve_preferences, AnswerBag, ThreadRandom},
};

#[derive(Debug, Deserialize)]
pub struct RecommendRequest {
    #[serde(default)]
    pub answers: Option<Value>,
}

/// Handler for the quiz recommendation endpoint
pub async fn recommend(
    State(state): State<Arc<AppState>>,
    Extension(context): Extension<RequestContext>,
    payload: Result<Json<RecommendRequest>, JsonRejection>,
) -> AppResult<Json<MovieResponse>> {
    let quota = state
        .rate_limiter
        .check(&context.client_ip, Utc::now())
        .await;

    if !quota.can_use {
        tracing::info!(
            request_id = %context.request_id,
            client_ip = %context.client_ip,
            count = quota.count,
            "Daily limit reached"
        );
        return Err(AppError::RateLimited {
            count: quota.count,
            limit: quota.limit,
            reset_at: quota.reset_at,
        });
    }

    let Json(request) = payload?;
    let answers = match request.answers {
        Some(Value::Object(map)) => AnswerBag::new(map),
        _ => {
            return Err(AppError::InvalidInput(
                "Request body must contain an answers object".to_string(),
            ))
        }
    };

    let prefs = resolve_preferences(&answers);
    tracing::info!(
        request_id = %context.request_id,
        preferences = ?prefs,
        "Processing recommendation request"
    );

    let mut rng = ThreadRandom::new();
    let selection = state.engine.recommend(&prefs, &mut rng).await;

    let movie = selection
        .candidate
        .ok_or_else(|| AppError::NotFound("No movie matched the answers".to_string()))?;

    let details = state.catalog.details(movie.id, prefs.language).await;
    state.rate_limiter.record_use(&context.client_ip).await;

    let response = MovieResponse::build(
        &movie,
        details.as_ref(),
        &state.image_base_url,
        selection.notices,
        quota.remaining_after_use(),
    );

    tracing::info!(
        request_id = %context.request_id,
        movie_id = movie.id,
        fallback_log = ?response.fallback_log,
        "Recommendation completed"
    );

    Ok(Json(response))
}
