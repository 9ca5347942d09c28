use std::collections::BTreeMap;

use tokio::sync::RwLock;

use pricecheck_core::domain::product::{Barcode, Product};

use super::{ProductRepository, RepositoryError};

#[derive(Default)]
pub struct InMemoryProductRepository {
    products: RwLock<BTreeMap<Barcode, Product>>,
}

impl InMemoryProductRepository {
    pub fn with_products(products: impl IntoIterator<Item = Product>) -> Self {
        let products =
            products.into_iter().map(|product| (product.barcode.clone(), product)).collect();
        Self { products: RwLock::new(products) }
    }
}

#[async_trait::async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn find_by_barcode(&self, barcode: &Barcode) -> Result<Option<Product>, RepositoryError> {
        let products = self.products.read().await;
        Ok(products.get(barcode).cloned())
    }

    async fn insert(&self, product: Product) -> Result<(), RepositoryError> {
        let mut products = self.products.write().await;
        if products.contains_key(&product.barcode) {
            return Err(RepositoryError::Duplicate { barcode: product.barcode });
        }
        products.insert(product.barcode.clone(), product);
        Ok(())
    }

    async fn save(&self, product: Product) -> Result<(), RepositoryError> {
        let mut products = self.products.write().await;
        products.insert(product.barcode.clone(), product);
        Ok(())
    }

    async fn delete(&self, barcode: &Barcode) -> Result<bool, RepositoryError> {
        let mut products = self.products.write().await;
        Ok(products.remove(barcode).is_some())
    }

    async fn search(&self, term: Option<&str>) -> Result<Vec<Product>, RepositoryError> {
        let needle = term.map(str::trim).filter(|term| !term.is_empty()).map(str::to_ascii_lowercase);
        let products = self.products.read().await;

        let mut matches = products
            .values()
            .filter(|product| match &needle {
                Some(needle) => {
                    product.name.to_ascii_lowercase().contains(needle.as_str())
                        || product.barcode.as_str().to_ascii_lowercase().contains(needle.as_str())
                }
                None => true,
            })
            .cloned()
            .collect::<Vec<_>>();
        matches.sort_by(|left, right| {
            left.name.cmp(&right.name).then_with(|| left.barcode.cmp(&right.barcode))
        });
        Ok(matches)
    }
}

#[cfg(test)]
mod tests {
    use pricecheck_core::domain::product::{Barcode, Product};
    use rust_decimal::Decimal;

    use crate::repositories::{InMemoryProductRepository, ProductRepository, RepositoryError};

    fn product(barcode: &str, name: &str) -> Product {
        Product {
            barcode: Barcode(barcode.to_string()),
            name: name.to_string(),
            price: Decimal::new(199, 2),
            description: None,
        }
    }

    #[tokio::test]
    async fn in_memory_product_repository_round_trip() {
        let repo = InMemoryProductRepository::default();
        let widget = product("0123456789012", "Widget");

        repo.save(widget.clone()).await.expect("save");
        let found = repo.find_by_barcode(&widget.barcode).await.expect("lookup");

        assert_eq!(found, Some(widget));
    }

    #[tokio::test]
    async fn in_memory_insert_refuses_duplicate() {
        let repo = InMemoryProductRepository::with_products([product("1", "Widget")]);

        let result = repo.insert(product("1", "Gadget")).await;

        assert!(matches!(result, Err(RepositoryError::Duplicate { .. })));
        let found = repo.find_by_barcode(&Barcode("1".to_string())).await.expect("lookup");
        assert_eq!(found, Some(product("1", "Widget")));
    }

    #[tokio::test]
    async fn in_memory_delete_and_search() {
        let repo =
            InMemoryProductRepository::with_products([product("2", "gadget"), product("1", "Widget")]);

        let found = repo.search(Some("WIDG")).await.expect("search");
        assert_eq!(found, vec![product("1", "Widget")]);

        assert!(repo.delete(&Barcode("1".to_string())).await.expect("delete"));
        assert!(!repo.delete(&Barcode("1".to_string())).await.expect("delete again"));
        assert_eq!(repo.search(None).await.expect("search").len(), 1);
    }
}
