use std::path::Path;
use std::sync::Arc;

use axum::Router;
use pricecheck_db::{DbPool, ProductRepository, SqlProductRepository};

use crate::{frontend, health, lookup};

/// Full HTTP surface: lookup API, health probe, and the front end as fallback.
pub fn router(db_pool: DbPool, static_dir: &Path) -> Router {
    let catalog: Arc<dyn ProductRepository> = Arc::new(SqlProductRepository::new(db_pool.clone()));

    Router::new()
        .merge(lookup::router(catalog))
        .merge(health::router(db_pool))
        .merge(frontend::router(static_dir))
}
