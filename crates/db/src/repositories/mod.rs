use async_trait::async_trait;
use thiserror::Error;

use pricecheck_core::domain::product::{Barcode, Product};

pub mod memory;
pub mod product;

pub use memory::InMemoryProductRepository;
pub use product::SqlProductRepository;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("decode error: {0}")]
    Decode(String),
    #[error("a product with barcode `{barcode}` already exists")]
    Duplicate { barcode: Barcode },
}

/// Catalog store keyed by barcode.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Exact-match lookup. The barcode is used verbatim.
    async fn find_by_barcode(&self, barcode: &Barcode) -> Result<Option<Product>, RepositoryError>;

    /// Inserts a new product. An existing entry with the same barcode is left untouched
    /// and reported as [`RepositoryError::Duplicate`].
    async fn insert(&self, product: Product) -> Result<(), RepositoryError>;

    /// Inserts the product, replacing any existing entry with the same barcode.
    async fn save(&self, product: Product) -> Result<(), RepositoryError>;

    /// Returns `false` when no entry matched.
    async fn delete(&self, barcode: &Barcode) -> Result<bool, RepositoryError>;

    /// Products whose name or barcode contains `term` (ASCII case-insensitive),
    /// or every product when `term` is `None`. Ordered by name, then barcode.
    async fn search(&self, term: Option<&str>) -> Result<Vec<Product>, RepositoryError>;
}
