use pricecheck_core::domain::product::{Barcode, Product};
use rust_decimal::Decimal;

use crate::repositories::{ProductRepository, RepositoryError};

struct DemoProduct {
    barcode: &'static str,
    name: &'static str,
    /// (mantissa, scale) for `Decimal::new`.
    price: (i64, u32),
    description: Option<&'static str>,
}

const DEMO_PRODUCTS: &[DemoProduct] = &[
    DemoProduct {
        barcode: "0123456789012",
        name: "Widget",
        price: (999, 2),
        description: Some("A widget"),
    },
    DemoProduct {
        barcode: "4006381333931",
        name: "Highlighter, yellow",
        price: (249, 2),
        description: Some("Chisel-tip text marker"),
    },
    DemoProduct {
        barcode: "5012345678900",
        name: "Sparkling water 1L",
        price: (89, 2),
        description: None,
    },
    DemoProduct {
        barcode: "9780201379624",
        name: "Design Patterns (hardcover)",
        price: (5499, 2),
        description: Some("Gamma, Helm, Johnson, Vlissides"),
    },
];

/// Deterministic demo catalog used by `pricecheck seed` and the smoke paths.
pub struct DemoCatalog;

impl DemoCatalog {
    pub fn products() -> Vec<Product> {
        DEMO_PRODUCTS.iter().map(DemoProduct::to_product).collect()
    }

    /// Upserts every demo product. Re-running is harmless.
    pub async fn load(repo: &dyn ProductRepository) -> Result<SeedResult, RepositoryError> {
        let mut barcodes = Vec::with_capacity(DEMO_PRODUCTS.len());
        for product in Self::products() {
            barcodes.push(product.barcode.clone());
            repo.save(product).await?;
        }
        tracing::debug!(
            event_name = "catalog.seed.loaded",
            product_count = barcodes.len(),
            "demo catalog loaded"
        );
        Ok(SeedResult { products_seeded: barcodes })
    }

    /// Checks that each demo product is present with the expected fields.
    pub async fn verify(
        repo: &dyn ProductRepository,
    ) -> Result<VerificationResult, RepositoryError> {
        let mut checks = Vec::with_capacity(DEMO_PRODUCTS.len());
        for expected in Self::products() {
            let stored = repo.find_by_barcode(&expected.barcode).await?;
            checks.push((expected.barcode.0.clone(), stored.as_ref() == Some(&expected)));
        }

        let all_present = checks.iter().all(|(_, present)| *present);
        Ok(VerificationResult { all_present, checks })
    }
}

impl DemoProduct {
    fn to_product(&self) -> Product {
        let (mantissa, scale) = self.price;
        Product {
            barcode: Barcode(self.barcode.to_string()),
            name: self.name.to_string(),
            price: Decimal::new(mantissa, scale),
            description: self.description.map(str::to_string),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeedResult {
    pub products_seeded: Vec<Barcode>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerificationResult {
    pub all_present: bool,
    pub checks: Vec<(String, bool)>,
}

impl VerificationResult {
    pub fn failed_checks(&self) -> Vec<&str> {
        self.checks
            .iter()
            .filter_map(|(check, passed)| (!passed).then_some(check.as_str()))
            .collect()
    }
}
