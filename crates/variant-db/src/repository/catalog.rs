//! # Catalog Repository
//!
//! Loads and stores one product's complete catalog.
//!
//! ## Load Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  load_catalog("tee")                                                    │
//! │       │                                                                 │
//! │       ├── products               WHERE id = ?        → ProductBase      │
//! │       ├── product_options        ORDER BY position   → Vec<ProductOption>│
//! │       ├── option_values          ORDER BY position   → Vec<OptionValue> │
//! │       ├── variants               ORDER BY position   → Vec<Variant>     │
//! │       └── variant_option_values  ORDER BY position   → Variant.options  │
//! │                                                                         │
//! │  Every list comes back in the order it was inserted. Variant order is   │
//! │  what first-match-wins resolution depends on.                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use variant_core::validation::{validate_catalog, validate_stock};
use variant_core::{
    CatalogError, CatalogIndex, DisplayStyle, InputKind, Money, OptionValue, ProductBase,
    ProductCatalog, ProductOption, Variant, VariantOptionValue,
};

// =============================================================================
// Rows
// =============================================================================

#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: String,
    name: String,
    price_minor: i64,
    sale_price_minor: Option<i64>,
    stock: i64,
    has_variants: bool,
}

#[derive(Debug, sqlx::FromRow)]
struct OptionRow {
    id: String,
    name: String,
    sort_order: i32,
    display_style: DisplayStyle,
    input_kind: InputKind,
}

#[derive(Debug, sqlx::FromRow)]
struct ValueRow {
    id: String,
    option_id: String,
    sort_order: i32,
    value: String,
    label: Option<String>,
    color_code: Option<String>,
    image: Option<String>,
}

#[derive(Debug, sqlx::FromRow)]
struct VariantRow {
    id: String,
    sku: String,
    price_minor: Option<i64>,
    sale_price_minor: Option<i64>,
    stock: i64,
    image: Option<String>,
    gallery: String,
}

#[derive(Debug, sqlx::FromRow)]
struct PairRow {
    variant_id: String,
    option_id: String,
    value_id: String,
}

impl From<ProductRow> for ProductBase {
    fn from(row: ProductRow) -> Self {
        ProductBase {
            id: row.id,
            name: row.name,
            price: Money::from_minor(row.price_minor),
            sale_price: row.sale_price_minor.map(Money::from_minor),
            stock: row.stock,
            has_variants: row.has_variants,
        }
    }
}

impl From<OptionRow> for ProductOption {
    fn from(row: OptionRow) -> Self {
        ProductOption {
            id: row.id,
            name: row.name,
            order: row.sort_order,
            display_style: row.display_style,
            input_kind: row.input_kind,
        }
    }
}

impl From<ValueRow> for OptionValue {
    fn from(row: ValueRow) -> Self {
        OptionValue {
            id: row.id,
            option_id: row.option_id,
            order: row.sort_order,
            value: row.value,
            label: row.label,
            color_code: row.color_code,
            image: row.image,
        }
    }
}

impl VariantRow {
    fn into_variant(self, options: Vec<VariantOptionValue>) -> DbResult<Variant> {
        let gallery: Vec<String> =
            serde_json::from_str(&self.gallery).map_err(|e| DbError::CorruptColumn {
                column: "variants.gallery",
                id: self.id.clone(),
                reason: e.to_string(),
            })?;

        Ok(Variant {
            id: self.id,
            options,
            price: self.price_minor.map(Money::from_minor),
            sale_price: self.sale_price_minor.map(Money::from_minor),
            stock: self.stock,
            sku: self.sku,
            image: self.image,
            gallery,
        })
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for catalog database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = CatalogRepository::new(pool);
///
/// repo.insert_catalog(&catalog).await?;
/// let loaded = repo.load_catalog(&catalog.product.id).await?;
/// ```
#[derive(Debug, Clone)]
pub struct CatalogRepository {
    pool: SqlitePool,
}

impl CatalogRepository {
    /// Creates a new CatalogRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CatalogRepository { pool }
    }

    /// Loads a product's full catalog.
    ///
    /// ## Returns
    /// * `Ok(Some(catalog))` - Product exists (variants may be empty)
    /// * `Ok(None)` - No such product
    /// * `Err(DbError)` - Query failed or a stored column is corrupt
    pub async fn load_catalog(&self, product_id: &str) -> DbResult<Option<ProductCatalog>> {
        debug!(product_id = %product_id, "Loading catalog");

        let product = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT id, name, price_minor, sale_price_minor, stock, has_variants
            FROM products
            WHERE id = ?1
            "#,
        )
        .bind(product_id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(product) = product else {
            debug!(product_id = %product_id, "Product not found");
            return Ok(None);
        };

        let options = sqlx::query_as::<_, OptionRow>(
            r#"
            SELECT id, name, sort_order, display_style, input_kind
            FROM product_options
            WHERE product_id = ?1
            ORDER BY position
            "#,
        )
        .bind(product_id)
        .fetch_all(&self.pool)
        .await?;

        let values = sqlx::query_as::<_, ValueRow>(
            r#"
            SELECT id, option_id, sort_order, value, label, color_code, image
            FROM option_values
            WHERE product_id = ?1
            ORDER BY position
            "#,
        )
        .bind(product_id)
        .fetch_all(&self.pool)
        .await?;

        let variant_rows = sqlx::query_as::<_, VariantRow>(
            r#"
            SELECT id, sku, price_minor, sale_price_minor, stock, image, gallery
            FROM variants
            WHERE product_id = ?1
            ORDER BY position
            "#,
        )
        .bind(product_id)
        .fetch_all(&self.pool)
        .await?;

        let pair_rows = sqlx::query_as::<_, PairRow>(
            r#"
            SELECT p.variant_id, p.option_id, p.value_id
            FROM variant_option_values p
            INNER JOIN variants v ON v.product_id = p.product_id AND v.id = p.variant_id
            WHERE p.product_id = ?1
            ORDER BY v.position, p.position
            "#,
        )
        .bind(product_id)
        .fetch_all(&self.pool)
        .await?;

        let mut pairs_by_variant: HashMap<String, Vec<VariantOptionValue>> = HashMap::new();
        for row in pair_rows {
            pairs_by_variant
                .entry(row.variant_id)
                .or_default()
                .push(VariantOptionValue::new(row.option_id, row.value_id));
        }

        let variants = variant_rows
            .into_iter()
            .map(|row| {
                let pairs = pairs_by_variant.remove(&row.id).unwrap_or_default();
                row.into_variant(pairs)
            })
            .collect::<DbResult<Vec<_>>>()?;

        let catalog = ProductCatalog {
            product: product.into(),
            options: options.into_iter().map(Into::into).collect(),
            values: values.into_iter().map(Into::into).collect(),
            variants,
        };

        debug!(
            product_id = %product_id,
            options = catalog.options.len(),
            values = catalog.values.len(),
            variants = catalog.variants.len(),
            "Catalog loaded"
        );

        Ok(Some(catalog))
    }

    /// Loads a product's catalog and builds its resolution index.
    ///
    /// ## Returns
    /// * `Ok(None)` - No such product
    /// * `Err(DbError::InvalidCatalog)` - Stored records break an invariant
    pub async fn load_index(&self, product_id: &str) -> DbResult<Option<CatalogIndex>> {
        match self.load_catalog(product_id).await? {
            Some(catalog) => Ok(Some(CatalogIndex::build(catalog)?)),
            None => Ok(None),
        }
    }

    /// Inserts a complete catalog in one transaction.
    ///
    /// The catalog is validated first; an invalid catalog writes nothing.
    /// Supplied order of options, values, variants and pairs is stored in
    /// `position` columns and reproduced by [`Self::load_catalog`].
    pub async fn insert_catalog(&self, catalog: &ProductCatalog) -> DbResult<()> {
        validate_catalog(catalog)?;

        let product = &catalog.product;
        debug!(product_id = %product.id, "Inserting catalog");

        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO products (
                id, name, price_minor, sale_price_minor, stock, has_variants,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)
            "#,
        )
        .bind(&product.id)
        .bind(&product.name)
        .bind(product.price.minor())
        .bind(product.sale_price.map(|m| m.minor()))
        .bind(product.stock)
        .bind(product.has_variants)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        for (position, option) in catalog.options.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO product_options (
                    id, product_id, name, sort_order, display_style, input_kind, position
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                "#,
            )
            .bind(&option.id)
            .bind(&product.id)
            .bind(&option.name)
            .bind(option.order)
            .bind(option.display_style)
            .bind(option.input_kind)
            .bind(position as i64)
            .execute(&mut *tx)
            .await?;
        }

        for (position, value) in catalog.values.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO option_values (
                    product_id, id, option_id, sort_order, value, label, color_code, image,
                    position
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
                "#,
            )
            .bind(&product.id)
            .bind(&value.id)
            .bind(&value.option_id)
            .bind(value.order)
            .bind(&value.value)
            .bind(&value.label)
            .bind(&value.color_code)
            .bind(&value.image)
            .bind(position as i64)
            .execute(&mut *tx)
            .await?;
        }

        for (position, variant) in catalog.variants.iter().enumerate() {
            let gallery = serde_json::to_string(&variant.gallery)
                .map_err(|e| DbError::Internal(e.to_string()))?;

            sqlx::query(
                r#"
                INSERT INTO variants (
                    id, product_id, sku, price_minor, sale_price_minor, stock,
                    image, gallery, position, updated_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
                "#,
            )
            .bind(&variant.id)
            .bind(&product.id)
            .bind(&variant.sku)
            .bind(variant.price.map(|m| m.minor()))
            .bind(variant.sale_price.map(|m| m.minor()))
            .bind(variant.stock)
            .bind(&variant.image)
            .bind(gallery)
            .bind(position as i64)
            .bind(now)
            .execute(&mut *tx)
            .await?;

            for (pair_position, pair) in variant.options.iter().enumerate() {
                sqlx::query(
                    r#"
                    INSERT INTO variant_option_values (
                        product_id, variant_id, option_id, value_id, position
                    ) VALUES (?1, ?2, ?3, ?4, ?5)
                    "#,
                )
                .bind(&product.id)
                .bind(&variant.id)
                .bind(&pair.option_id)
                .bind(&pair.value_id)
                .bind(pair_position as i64)
                .execute(&mut *tx)
                .await?;
            }
        }

        tx.commit().await?;

        info!(
            product_id = %product.id,
            options = catalog.options.len(),
            variants = catalog.variants.len(),
            "Catalog inserted"
        );

        Ok(())
    }

    /// Sets a variant's stock to an absolute value.
    ///
    /// Variant ids are scoped to their product, so both are required.
    ///
    /// ## Errors
    /// * `DbError::InvalidCatalog` - Negative stock
    /// * `DbError::NotFound` - Unknown product/variant pair
    pub async fn update_variant_stock(
        &self,
        product_id: &str,
        variant_id: &str,
        stock: i64,
    ) -> DbResult<()> {
        validate_stock(stock).map_err(|source| CatalogError::InvalidField {
            record: "variant",
            id: variant_id.to_string(),
            source,
        })?;

        debug!(product_id = %product_id, variant_id = %variant_id, stock, "Updating variant stock");

        let result = sqlx::query(
            r#"
            UPDATE variants
            SET stock = ?3, updated_at = ?4
            WHERE product_id = ?1 AND id = ?2
            "#,
        )
        .bind(product_id)
        .bind(variant_id)
        .bind(stock)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Variant", variant_id));
        }

        Ok(())
    }

    /// Counts stored products (for diagnostics and the seed tool).
    pub async fn count_products(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use variant_core::{SelectionState, SelectionStatus};

    async fn repo() -> CatalogRepository {
        Database::new(DbConfig::in_memory()).await.unwrap().catalogs()
    }

    fn apparel() -> ProductCatalog {
        ProductCatalog {
            product: ProductBase {
                id: "tee".to_string(),
                name: "Classic Tee".to_string(),
                price: Money::from_minor(2500),
                sale_price: None,
                stock: 0,
                has_variants: true,
            },
            options: vec![
                ProductOption::new("size", "Size", 1),
                ProductOption::new("color", "Color", 0)
                    .styled(DisplayStyle::Swatch, InputKind::Color),
            ],
            values: vec![
                OptionValue::new("s", "size", 0, "S"),
                OptionValue::new("red", "color", 0, "red").with_color_code("#ff0000"),
                OptionValue::new("m", "size", 1, "M").with_label("Medium"),
            ],
            variants: vec![
                Variant::new("red-s", "TEE-RED-S", 0)
                    .with_pair("color", "red")
                    .with_pair("size", "s"),
                Variant {
                    image: Some("red-m.jpg".to_string()),
                    gallery: vec!["red-m-1.jpg".to_string(), "red-m-2.jpg".to_string()],
                    ..Variant::new("red-m", "TEE-RED-M", 5)
                        .with_pair("size", "m")
                        .with_pair("color", "red")
                        .with_price(Money::from_minor(2800))
                        .with_sale_price(Money::from_minor(2200))
                },
            ],
        }
    }

    #[tokio::test]
    async fn test_insert_and_load_round_trip() {
        let repo = repo().await;
        let catalog = apparel();

        repo.insert_catalog(&catalog).await.unwrap();
        let loaded = repo.load_catalog("tee").await.unwrap();

        assert_eq!(loaded, Some(catalog));
        assert_eq!(repo.count_products().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_load_missing_product() {
        let repo = repo().await;
        assert_eq!(repo.load_catalog("ghost").await.unwrap(), None);
        assert!(repo.load_index("ghost").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_simple_product_round_trip() {
        let repo = repo().await;
        let catalog = ProductCatalog::simple(ProductBase {
            id: "tote".to_string(),
            name: "Canvas Tote".to_string(),
            price: Money::from_minor(100000),
            sale_price: Some(Money::from_minor(80000)),
            stock: 12,
            has_variants: false,
        });

        repo.insert_catalog(&catalog).await.unwrap();
        assert_eq!(repo.load_catalog("tote").await.unwrap(), Some(catalog));
    }

    #[tokio::test]
    async fn test_invalid_catalog_writes_nothing() {
        let repo = repo().await;
        let mut catalog = apparel();
        catalog.variants.push(
            Variant::new("red-s-again", "TEE-RED-S-2", 1)
                .with_pair("size", "s")
                .with_pair("color", "red"),
        );

        let err = repo.insert_catalog(&catalog).await.unwrap_err();
        assert!(matches!(
            err,
            DbError::InvalidCatalog(CatalogError::DuplicateCombination { .. })
        ));
        assert_eq!(repo.count_products().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_duplicate_insert_is_rejected() {
        let repo = repo().await;
        repo.insert_catalog(&apparel()).await.unwrap();

        let err = repo.insert_catalog(&apparel()).await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
        assert_eq!(repo.count_products().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_update_variant_stock() {
        let repo = repo().await;
        repo.insert_catalog(&apparel()).await.unwrap();

        repo.update_variant_stock("tee", "red-s", 4).await.unwrap();
        let index = repo.load_index("tee").await.unwrap().unwrap();
        assert_eq!(index.variant("red-s").map(|v| v.stock), Some(4));

        assert!(matches!(
            repo.update_variant_stock("tee", "ghost", 1).await,
            Err(DbError::NotFound { .. })
        ));
        assert!(matches!(
            repo.update_variant_stock("mug", "red-s", 1).await,
            Err(DbError::NotFound { .. })
        ));
        assert!(matches!(
            repo.update_variant_stock("tee", "red-s", -1).await,
            Err(DbError::InvalidCatalog(_))
        ));
    }

    #[tokio::test]
    async fn test_products_share_option_value_and_variant_ids() {
        let repo = repo().await;
        let tee = apparel();

        let mut hoodie = apparel();
        hoodie.product.id = "hoodie".to_string();
        hoodie.product.name = "Hoodie".to_string();
        for variant in &mut hoodie.variants {
            variant.sku = variant.sku.replace("TEE", "HOODIE");
        }
        hoodie.variants[0].stock = 9;

        repo.insert_catalog(&tee).await.unwrap();
        repo.insert_catalog(&hoodie).await.unwrap();

        assert_eq!(repo.load_catalog("tee").await.unwrap(), Some(tee));
        assert_eq!(repo.load_catalog("hoodie").await.unwrap(), Some(hoodie));

        // Stock updates stay within one product
        repo.update_variant_stock("hoodie", "red-s", 2).await.unwrap();
        let tee_index = repo.load_index("tee").await.unwrap().unwrap();
        let hoodie_index = repo.load_index("hoodie").await.unwrap().unwrap();
        assert_eq!(tee_index.variant("red-s").map(|v| v.stock), Some(0));
        assert_eq!(hoodie_index.variant("red-s").map(|v| v.stock), Some(2));
    }

    #[tokio::test]
    async fn test_loaded_catalog_drives_a_session() {
        let repo = repo().await;
        repo.insert_catalog(&apparel()).await.unwrap();

        let index = repo.load_index("tee").await.unwrap().unwrap();
        let mut state = SelectionState::new(std::sync::Arc::new(index));

        state.set_option_value("color", "red").unwrap();
        assert_eq!(state.status(), SelectionStatus::Resolved);

        state.set_option_value("size", "m").unwrap();
        assert_eq!(state.status(), SelectionStatus::Purchasable);
        assert_eq!(state.effective_price(), Money::from_minor(2200));
        assert_eq!(state.compare_at_price(), Some(Money::from_minor(2800)));
    }
}
