//! Service catalog route handlers

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;

use crate::cache::CacheStats;
use crate::error::Result;
use crate::AppState;

use super::models::Service;

#[derive(Debug, Serialize)]
struct ServicesResponse {
    services: Vec<Service>,
}

/// List the service catalog
async fn list_services(State(state): State<AppState>) -> Result<Json<ServicesResponse>> {
    let services = state.cache.catalog(&state.db).await?;

    Ok(Json(ServicesResponse {
        services: services.as_ref().clone(),
    }))
}

async fn cache_stats(State(state): State<AppState>) -> Json<CacheStats> {
    Json(state.cache.stats())
}

/// Drop the cached catalog so the next read hits the database.
async fn invalidate_cache(State(state): State<AppState>) -> Json<CacheStats> {
    state.cache.invalidate_all();
    Json(state.cache.stats())
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/services", get(list_services))
        .route("/admin/cache/stats", get(cache_stats))
        .route("/admin/cache/invalidate", post(invalidate_cache))
}
