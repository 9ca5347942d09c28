//! Hosting for the built single-page front end.
//!
//! - `GET /`: `index.html`
//! - `GET /static/*`: bundled assets
//! - anything else: `index.html`, so client-side routes survive a reload

use std::path::Path;

use axum::Router;
use tower_http::services::{ServeDir, ServeFile};

pub const INDEX_FILE: &str = "index.html";

/// Routes for the front end rooted at `static_dir`. Merge this last; its fallback
/// catches every path the API did not claim.
pub fn router(static_dir: &Path) -> Router {
    let index = ServeFile::new(static_dir.join(INDEX_FILE));

    Router::new()
        .route_service("/", index.clone())
        .nest_service("/static", ServeDir::new(static_dir))
        .fallback_service(index)
}
