//! Health check handler.

use axum::Json;
use axum::extract::State;

use medialist_core::traits::cache::CacheProvider;

use crate::dto::response::HealthResponse;
use crate::state::AppState;

/// GET /v1/health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let cache_ok = state.cache.health_check().await.unwrap_or(false);

    Json(HealthResponse {
        status: if cache_ok { "ok" } else { "degraded" }.to_string(),
        cache: cache_ok,
    })
}
