//! PrimeClean booking and invoicing backend.
//!
//! Axum HTTP API over Postgres covering the full job lifecycle: service
//! catalog, quote estimates, booking state machine, invoice generation
//! with Florida sales tax, schedule aggregation and revenue reporting.

pub mod booking;
pub mod cache;
pub mod calendar;
pub mod catalog;
pub mod error;
pub mod invoicing;
pub mod pricing;
pub mod reports;

use axum::Router;
use sqlx::PgPool;

use cache::AppCache;

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub cache: AppCache,
}

/// Full API surface, merged from each domain's router.
pub fn api_router() -> Router<AppState> {
    Router::new()
        .merge(catalog::router())
        .merge(booking::router())
        .merge(invoicing::router())
        .merge(calendar::router())
        .merge(reports::router())
}
