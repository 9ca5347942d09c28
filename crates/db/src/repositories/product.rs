use std::str::FromStr;

use pricecheck_core::domain::product::{Barcode, Product};
use rust_decimal::Decimal;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use super::{ProductRepository, RepositoryError};
use crate::DbPool;

pub struct SqlProductRepository {
    pool: DbPool,
}

impl SqlProductRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl ProductRepository for SqlProductRepository {
    async fn find_by_barcode(&self, barcode: &Barcode) -> Result<Option<Product>, RepositoryError> {
        let row = sqlx::query(
            "SELECT barcode, name, price, description FROM product WHERE barcode = ?",
        )
        .bind(barcode.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(product_from_row).transpose()
    }

    async fn insert(&self, product: Product) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "INSERT INTO product (barcode, name, price, description) VALUES (?, ?, ?, ?)",
        )
        .bind(product.barcode.as_str())
        .bind(&product.name)
        .bind(product.price.to_string())
        .bind(product.description.as_deref())
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(error)) if error.is_unique_violation() => {
                Err(RepositoryError::Duplicate { barcode: product.barcode })
            }
            Err(error) => Err(error.into()),
        }
    }

    async fn save(&self, product: Product) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO product (barcode, name, price, description)
             VALUES (?, ?, ?, ?)
             ON CONFLICT(barcode) DO UPDATE SET
                name = excluded.name,
                price = excluded.price,
                description = excluded.description",
        )
        .bind(product.barcode.as_str())
        .bind(&product.name)
        .bind(product.price.to_string())
        .bind(product.description.as_deref())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete(&self, barcode: &Barcode) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM product WHERE barcode = ?")
            .bind(barcode.as_str())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn search(&self, term: Option<&str>) -> Result<Vec<Product>, RepositoryError> {
        let rows = match term.map(str::trim).filter(|term| !term.is_empty()) {
            Some(term) => {
                let pattern = format!("%{}%", escape_like(term));
                sqlx::query(
                    "SELECT barcode, name, price, description FROM product
                     WHERE name LIKE ?1 ESCAPE '\\' OR barcode LIKE ?1 ESCAPE '\\'
                     ORDER BY name, barcode",
                )
                .bind(pattern)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query(
                    "SELECT barcode, name, price, description FROM product ORDER BY name, barcode",
                )
                .fetch_all(&self.pool)
                .await?
            }
        };

        rows.iter().map(product_from_row).collect()
    }
}

fn product_from_row(row: &SqliteRow) -> Result<Product, RepositoryError> {
    let barcode: String = row.try_get("barcode")?;
    let name: String = row.try_get("name")?;
    let raw_price: String = row.try_get("price")?;
    let description: Option<String> = row.try_get("description")?;

    let price = Decimal::from_str(raw_price.trim()).map_err(|error| {
        RepositoryError::Decode(format!(
            "invalid price `{raw_price}` for barcode `{barcode}`: {error}"
        ))
    })?;

    Ok(Product { barcode: Barcode(barcode), name, price, description })
}

fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use pricecheck_core::domain::product::{Barcode, Product};
    use rust_decimal::Decimal;

    use super::{escape_like, SqlProductRepository};
    use crate::repositories::{ProductRepository, RepositoryError};
    use crate::{connect_with_settings, migrations, DbPool};

    async fn setup() -> (DbPool, SqlProductRepository) {
        let pool = connect_with_settings("sqlite::memory:", 1, 30).await.expect("connect");
        migrations::run_pending(&pool).await.expect("migrations");
        (pool.clone(), SqlProductRepository::new(pool))
    }

    fn product(barcode: &str, name: &str, price: Decimal, description: Option<&str>) -> Product {
        Product {
            barcode: Barcode(barcode.to_string()),
            name: name.to_string(),
            price,
            description: description.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn find_by_barcode_returns_stored_fields() {
        let (pool, repo) = setup().await;
        let widget = product("0123456789012", "Widget", Decimal::new(999, 2), Some("A widget"));
        repo.save(widget.clone()).await.expect("save");

        let found = repo.find_by_barcode(&widget.barcode).await.expect("lookup");

        assert_eq!(found, Some(widget));
        pool.close().await;
    }

    #[tokio::test]
    async fn find_by_barcode_misses_unknown_barcode() {
        let (pool, repo) = setup().await;

        let found = repo.find_by_barcode(&Barcode("9999999999999".to_string())).await.expect("lookup");

        assert_eq!(found, None);
        pool.close().await;
    }

    #[tokio::test]
    async fn barcode_match_is_exact() {
        let (pool, repo) = setup().await;
        repo.save(product("ABC-1", "Widget", Decimal::ONE, None)).await.expect("save");

        assert!(repo.find_by_barcode(&Barcode("abc-1".to_string())).await.expect("lookup").is_none());
        assert!(repo.find_by_barcode(&Barcode(" ABC-1".to_string())).await.expect("lookup").is_none());
        assert!(repo.find_by_barcode(&Barcode("ABC-1".to_string())).await.expect("lookup").is_some());
        pool.close().await;
    }

    #[tokio::test]
    async fn save_replaces_existing_barcode() {
        let (pool, repo) = setup().await;
        repo.save(product("42", "Widget", Decimal::new(100, 2), Some("old"))).await.expect("save");
        repo.save(product("42", "Gadget", Decimal::new(250, 2), None)).await.expect("resave");

        let found = repo.find_by_barcode(&Barcode("42".to_string())).await.expect("lookup");
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM product")
            .fetch_one(&pool)
            .await
            .expect("count");

        assert_eq!(found, Some(product("42", "Gadget", Decimal::new(250, 2), None)));
        assert_eq!(count, 1);
        pool.close().await;
    }

    #[tokio::test]
    async fn price_precision_survives_storage() {
        let (pool, repo) = setup().await;
        let price = Decimal::new(1_234_567_890_123, 4);
        repo.save(product("777", "Bulk", price, None)).await.expect("save");

        let found = repo.find_by_barcode(&Barcode("777".to_string())).await.expect("lookup");

        assert_eq!(found.map(|product| product.price), Some(price));
        pool.close().await;
    }

    #[tokio::test]
    async fn insert_rejects_existing_barcode_without_overwriting() {
        let (pool, repo) = setup().await;
        let original = product("42", "Widget", Decimal::new(100, 2), Some("first"));
        repo.insert(original.clone()).await.expect("insert");

        let result = repo.insert(product("42", "Gadget", Decimal::new(250, 2), None)).await;

        assert!(matches!(
            result,
            Err(RepositoryError::Duplicate { ref barcode }) if barcode.as_str() == "42"
        ));
        let found = repo.find_by_barcode(&Barcode("42".to_string())).await.expect("lookup");
        assert_eq!(found, Some(original));
        pool.close().await;
    }

    #[tokio::test]
    async fn delete_reports_whether_row_existed() {
        let (pool, repo) = setup().await;
        repo.save(product("42", "Widget", Decimal::ONE, None)).await.expect("save");

        assert!(repo.delete(&Barcode("42".to_string())).await.expect("delete"));
        assert!(!repo.delete(&Barcode("42".to_string())).await.expect("delete again"));
        pool.close().await;
    }

    #[tokio::test]
    async fn search_matches_name_or_barcode_case_insensitively() {
        let (pool, repo) = setup().await;
        repo.save(product("100", "Blue Widget", Decimal::ONE, None)).await.expect("save");
        repo.save(product("200", "Gadget", Decimal::ONE, None)).await.expect("save");
        repo.save(product("310", "Apple", Decimal::ONE, None)).await.expect("save");

        let by_name = repo.search(Some("widget")).await.expect("search");
        let by_barcode = repo.search(Some("10")).await.expect("search");
        let all = repo.search(None).await.expect("search");

        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].barcode.as_str(), "100");
        let barcodes: Vec<&str> = by_barcode.iter().map(|p| p.barcode.as_str()).collect();
        assert_eq!(barcodes, vec!["310", "100"]);
        let names: Vec<&str> = all.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Apple", "Blue Widget", "Gadget"]);
        pool.close().await;
    }

    #[tokio::test]
    async fn search_treats_wildcards_literally() {
        let (pool, repo) = setup().await;
        repo.save(product("1", "100% Juice", Decimal::ONE, None)).await.expect("save");
        repo.save(product("2", "1000 Pins", Decimal::ONE, None)).await.expect("save");

        let found = repo.search(Some("100%")).await.expect("search");

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "100% Juice");
        pool.close().await;
    }

    #[tokio::test]
    async fn malformed_price_surfaces_decode_error() {
        let (pool, repo) = setup().await;
        sqlx::query("INSERT INTO product (barcode, name, price) VALUES ('bad', 'Broken', 'n/a')")
            .execute(&pool)
            .await
            .expect("insert raw row");

        let result = repo.find_by_barcode(&Barcode("bad".to_string())).await;

        assert!(matches!(result, Err(RepositoryError::Decode(ref message)) if message.contains("n/a")));
        pool.close().await;
    }

    #[tokio::test]
    async fn closed_pool_surfaces_database_error() {
        let (pool, repo) = setup().await;
        pool.close().await;

        let result = repo.find_by_barcode(&Barcode("42".to_string())).await;

        assert!(matches!(result, Err(RepositoryError::Database(_))));
    }

    #[test]
    fn escape_like_escapes_wildcards_and_escape_char() {
        assert_eq!(escape_like(r"50%_off\"), r"50\%\_off\\");
    }
}
