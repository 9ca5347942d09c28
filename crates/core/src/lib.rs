pub mod config;
pub mod domain;
pub mod errors;

pub use domain::product::{Barcode, Product};
pub use errors::{DomainError, LookupError};
