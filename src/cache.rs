//! In-memory caching using moka
//!
//! The service catalog is read-only reference data maintained by an external
//! process, so it is cached with a short TTL and warmed in the background.

use moka::future::Cache;
use serde::Serialize;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::interval;
use tracing::{info, warn};

use crate::catalog::models::Service;
use crate::catalog::queries;
use crate::error::Result;

const CATALOG_KEY: &str = "catalog";

/// Application cache holding the service catalog
#[derive(Clone)]
pub struct AppCache {
    /// Full catalog listing (singleton entry)
    pub services: Cache<String, Arc<Vec<Service>>>,
}

impl AppCache {
    /// Create a new cache instance with configured TTLs
    pub fn new() -> Self {
        Self {
            // Catalog: 1 entry, 5 min TTL (external edits show up within minutes)
            services: Cache::builder()
                .max_capacity(1)
                .time_to_live(Duration::from_secs(5 * 60))
                .build(),
        }
    }

    /// Get the full service catalog, reading through to the database on a miss
    pub async fn catalog(&self, pool: &PgPool) -> Result<Arc<Vec<Service>>> {
        if let Some(cached) = self.services.get(CATALOG_KEY).await {
            tracing::debug!("Cache HIT for service catalog");
            return Ok(cached);
        }

        tracing::debug!("Cache MISS for service catalog");
        let services = Arc::new(queries::get_all_services(pool).await?);
        self.services
            .insert(CATALOG_KEY.to_string(), services.clone())
            .await;
        Ok(services)
    }

    /// Look up one service by id, preferring the cached catalog.
    ///
    /// Falls back to a direct query when the id is not in the cached listing,
    /// so a freshly added service is usable before the TTL expires.
    pub async fn service(&self, pool: &PgPool, id: i64) -> Result<Service> {
        let catalog = self.catalog(pool).await?;
        if let Some(service) = catalog.iter().find(|s| s.id == id) {
            return Ok(service.clone());
        }
        queries::get_service(pool, id).await
    }

    /// Get cache statistics for monitoring
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            catalog_cached: self.services.entry_count() > 0,
        }
    }

    /// Invalidate all caches
    pub fn invalidate_all(&self) {
        self.services.invalidate_all();
        info!("All caches invalidated");
    }
}

impl Default for AppCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Cache statistics for monitoring endpoint
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    pub catalog_cached: bool,
}

/// Start background cache warmer
///
/// Warms the catalog on startup and refreshes every 5 minutes.
pub async fn start_cache_warmer(cache: AppCache, db: PgPool) {
    warm_cache(&cache, &db).await;

    let mut interval = interval(Duration::from_secs(5 * 60));
    loop {
        interval.tick().await;
        warm_cache(&cache, &db).await;
    }
}

/// Warm the cache with the current catalog
async fn warm_cache(cache: &AppCache, db: &PgPool) {
    match queries::get_all_services(db).await {
        Ok(services) => {
            cache
                .services
                .insert(CATALOG_KEY.to_string(), Arc::new(services))
                .await;
            info!("Service catalog cache warmed. Stats: {:?}", cache.stats());
        }
        Err(e) => warn!("Failed to warm service catalog cache: {}", e),
    }
}
