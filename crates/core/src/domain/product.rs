use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Opaque lookup key for a product. No format or checksum rules are applied.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Barcode(pub String);

impl Barcode {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Barcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Barcode {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for Barcode {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// A catalog entry. Serializes to exactly `barcode`, `name`, `price`, `description`,
/// with `price` rendered as a JSON number carrying every stored digit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub barcode: Barcode,
    pub name: String,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub price: Decimal,
    pub description: Option<String>,
}

impl Product {
    /// Builds a product for an administrative write, rejecting blank required fields.
    pub fn new(
        barcode: impl Into<Barcode>,
        name: impl Into<String>,
        price: Decimal,
        description: Option<String>,
    ) -> Result<Self, DomainError> {
        let product = Self { barcode: barcode.into(), name: name.into(), price, description };
        product.validate()?;
        Ok(product)
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.barcode.0.trim().is_empty() {
            return Err(DomainError::InvariantViolation("barcode must not be blank".to_string()));
        }
        if self.name.trim().is_empty() {
            return Err(DomainError::InvariantViolation("name must not be blank".to_string()));
        }
        Ok(())
    }
}
