//! Application state shared across handlers.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use sqlx::PgPool;

use crate::config::StorefrontConfig;
use crate::db::{ProductRepository, RepositoryError};
use crate::models::product::Product;

/// How long a cached catalog listing stays fresh.
const PRODUCT_CACHE_TTL: Duration = Duration::from_secs(60);

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like the database pool and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    pool: PgPool,
    product_cache: Cache<(), Arc<Vec<Product>>>,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: StorefrontConfig, pool: PgPool) -> Self {
        let product_cache = Cache::builder()
            .max_capacity(1)
            .time_to_live(PRODUCT_CACHE_TTL)
            .build();

        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                product_cache,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// The full catalog, served from a short-lived cache.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the cache is cold and the database query
    /// fails.
    pub async fn products(&self) -> Result<Arc<Vec<Product>>, RepositoryError> {
        if let Some(cached) = self.inner.product_cache.get(&()).await {
            return Ok(cached);
        }

        let fresh = Arc::new(ProductRepository::new(self.pool()).list().await?);
        self.inner
            .product_cache
            .insert((), Arc::clone(&fresh))
            .await;
        Ok(fresh)
    }

    /// Drop the cached catalog listing after a catalog mutation.
    pub async fn invalidate_products(&self) {
        self.inner.product_cache.invalidate(&()).await;
    }
}
