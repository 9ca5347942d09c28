//! Public barcode lookup.
//!
//! `GET /api/product/{barcode}/` answers 200 with the product, 404 with
//! `{"error": "Product not found"}`, or 500 with
//! `{"error": "Internal Server Error", "details": ...}`. A segment that does not decode
//! to UTF-8 is looked up verbatim, so it answers like any other unknown barcode.

use std::sync::Arc;

use axum::{
    extract::{rejection::PathRejection, Path, State},
    http::{StatusCode, Uri},
    routing::get,
    Json, Router,
};
use pricecheck_core::{Barcode, LookupError, Product};
use pricecheck_db::ProductRepository;
use serde::Serialize;
use tracing::{error, info, warn};

#[derive(Clone)]
pub struct LookupState {
    catalog: Arc<dyn ProductRepository>,
}

impl LookupState {
    pub fn new(catalog: Arc<dyn ProductRepository>) -> Self {
        Self { catalog }
    }
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct LookupErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

pub type LookupFailure = (StatusCode, Json<LookupErrorBody>);

pub fn router(catalog: Arc<dyn ProductRepository>) -> Router {
    Router::new()
        .route("/api/product/{barcode}/", get(product_by_barcode))
        .route("/api/product/{barcode}", get(product_by_barcode))
        .with_state(LookupState::new(catalog))
}

pub async fn product_by_barcode(
    path: Result<Path<String>, PathRejection>,
    uri: Uri,
    State(state): State<LookupState>,
) -> Result<Json<Product>, LookupFailure> {
    let barcode = match path {
        Ok(Path(barcode)) => Barcode(barcode),
        Err(rejection) => {
            let raw = raw_barcode_segment(&uri);
            warn!(
                event_name = "catalog.lookup.undecodable_segment",
                barcode = %raw,
                error = %rejection,
                "barcode segment did not decode; using it verbatim"
            );
            raw
        }
    };
    info!(event_name = "catalog.lookup.start", barcode = %barcode, "fetching product by barcode");

    match lookup(state.catalog.as_ref(), &barcode).await {
        Ok(product) => {
            info!(
                event_name = "catalog.lookup.hit",
                barcode = %barcode,
                name = %product.name,
                "product found"
            );
            Ok(Json(product))
        }
        Err(error) => {
            match &error {
                LookupError::NotFound { .. } => warn!(
                    event_name = "catalog.lookup.miss",
                    barcode = %barcode,
                    "product not found"
                ),
                LookupError::Internal(details) => error!(
                    event_name = "catalog.lookup.failed",
                    barcode = %barcode,
                    error = %details,
                    "product lookup failed"
                ),
            }
            Err(failure_response(error))
        }
    }
}

/// Resolves a barcode against the catalog, folding a miss and any store failure into
/// [`LookupError`].
pub async fn lookup(
    catalog: &dyn ProductRepository,
    barcode: &Barcode,
) -> Result<Product, LookupError> {
    match catalog.find_by_barcode(barcode).await {
        Ok(Some(product)) => Ok(product),
        Ok(None) => Err(LookupError::NotFound { barcode: barcode.clone() }),
        Err(error) => Err(LookupError::Internal(error.to_string())),
    }
}

/// Last non-empty path segment, still percent-encoded.
fn raw_barcode_segment(uri: &Uri) -> Barcode {
    let segment = uri.path().trim_end_matches('/').rsplit('/').next().unwrap_or_default();
    Barcode(segment.to_string())
}

pub fn failure_response(error: LookupError) -> LookupFailure {
    let status = match error {
        LookupError::NotFound { .. } => StatusCode::NOT_FOUND,
        LookupError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let body = LookupErrorBody {
        error: error.user_message().to_string(),
        details: error.details().map(str::to_string),
    };
    (status, Json(body))
}
