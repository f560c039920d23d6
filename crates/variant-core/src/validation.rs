//! # Validation Module
//!
//! Catalog invariant checks, run once per load before indexing.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      What Gets Checked                                  │
//! │                                                                         │
//! │  Pass 1: Records                                                        │
//! │  ├── ids present and unique (options, values, variants)                │
//! │  ├── SKU format, prices and stock non-negative                         │
//! │  └── sale price never above the price it discounts                     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Pass 2: References                                                     │
//! │  ├── every value belongs to a known option                             │
//! │  └── every variant pair names a known option + a value OF that option  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Pass 3: Identity                                                       │
//! │  ├── at most one pair per option per variant                           │
//! │  └── no two variants share a complete combination                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The first violation found is returned; catalogs are expected to be
//! valid, and a broken one is a catalog-management bug, not a shopper error.

use std::collections::{HashMap, HashSet};

use crate::error::{CatalogError, ValidationError};
use crate::money::Money;
use crate::types::{OptionValue, ProductBase, ProductCatalog, ProductOption, Selection, Variant};
use crate::MAX_SKU_LEN;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Field Validators
// =============================================================================

/// Validates a record identifier (non-blank).
pub fn validate_id(field: &str, id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Validates a SKU (Stock Keeping Unit).
///
/// ## Rules
/// - Must not be empty
/// - At most `MAX_SKU_LEN` characters
/// - Only alphanumeric characters, hyphens, underscores
///
/// ## Example
/// ```rust
/// use variant_core::validation::validate_sku;
///
/// assert!(validate_sku("TEE-RED-M").is_ok());
/// assert!(validate_sku("").is_err());
/// assert!(validate_sku("has space").is_err());
/// ```
pub fn validate_sku(sku: &str) -> ValidationResult<()> {
    let sku = sku.trim();

    if sku.is_empty() {
        return Err(ValidationError::Required {
            field: "sku".to_string(),
        });
    }

    if sku.len() > MAX_SKU_LEN {
        return Err(ValidationError::TooLong {
            field: "sku".to_string(),
            max: MAX_SKU_LEN,
        });
    }

    if !sku
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "sku".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

/// Validates a swatch color code (`#rgb` or `#rrggbb`).
pub fn validate_color_code(code: &str) -> ValidationResult<()> {
    let hex = code.strip_prefix('#').ok_or_else(|| ValidationError::InvalidFormat {
        field: "color_code".to_string(),
        reason: "must start with '#'".to_string(),
    })?;

    if !matches!(hex.len(), 3 | 6) || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ValidationError::InvalidFormat {
            field: "color_code".to_string(),
            reason: "must be #rgb or #rrggbb".to_string(),
        });
    }

    Ok(())
}

/// Validates a price and its optional sale price.
///
/// ## Rules
/// - Neither may be negative (zero is allowed: free items)
/// - A sale price must not exceed the price it discounts
pub fn validate_prices(price: Option<Money>, sale_price: Option<Money>) -> ValidationResult<()> {
    if price.is_some_and(|p| p.is_negative()) {
        return Err(ValidationError::Negative {
            field: "price".to_string(),
        });
    }

    if let Some(sale) = sale_price {
        if sale.is_negative() {
            return Err(ValidationError::Negative {
                field: "sale_price".to_string(),
            });
        }
        if let Some(price) = price {
            if sale > price {
                return Err(ValidationError::SaleAbovePrice {
                    sale: sale.minor(),
                    price: price.minor(),
                });
            }
        }
    }

    Ok(())
}

/// Validates a stock quantity (non-negative).
pub fn validate_stock(stock: i64) -> ValidationResult<()> {
    if stock < 0 {
        return Err(ValidationError::Negative {
            field: "stock".to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Record Validators
// =============================================================================

fn invalid<'a>(record: &'static str, id: &'a str) -> impl FnOnce(ValidationError) -> CatalogError + 'a {
    move |source| CatalogError::InvalidField {
        record,
        id: id.to_string(),
        source,
    }
}

fn validate_product(product: &ProductBase) -> Result<(), CatalogError> {
    validate_id("id", &product.id).map_err(invalid("Product", &product.id))?;
    validate_prices(Some(product.price), product.sale_price)
        .map_err(invalid("Product", &product.id))?;
    validate_stock(product.stock).map_err(invalid("Product", &product.id))?;
    Ok(())
}

fn validate_option(option: &ProductOption) -> Result<(), CatalogError> {
    validate_id("id", &option.id).map_err(invalid("Option", &option.id))
}

fn validate_value(value: &OptionValue) -> Result<(), CatalogError> {
    validate_id("id", &value.id).map_err(invalid("OptionValue", &value.id))?;
    if let Some(code) = &value.color_code {
        validate_color_code(code).map_err(invalid("OptionValue", &value.id))?;
    }
    Ok(())
}

fn validate_variant(variant: &Variant, product: &ProductBase) -> Result<(), CatalogError> {
    validate_id("id", &variant.id).map_err(invalid("Variant", &variant.id))?;
    validate_sku(&variant.sku).map_err(invalid("Variant", &variant.id))?;
    // A sale override is compared against whatever price it would replace
    let price = variant.price.unwrap_or(product.price);
    validate_prices(Some(price), variant.sale_price).map_err(invalid("Variant", &variant.id))?;
    validate_stock(variant.stock).map_err(invalid("Variant", &variant.id))?;
    Ok(())
}

// =============================================================================
// Catalog Validator
// =============================================================================

/// Validates every invariant of a loaded catalog.
///
/// ## Example
/// ```rust
/// use variant_core::money::Money;
/// use variant_core::types::{OptionValue, ProductBase, ProductCatalog, ProductOption, Variant};
/// use variant_core::validation::validate_catalog;
///
/// let catalog = ProductCatalog {
///     product: ProductBase {
///         id: "tee".into(),
///         name: "Tee".into(),
///         price: Money::from_minor(2000),
///         sale_price: None,
///         stock: 0,
///         has_variants: true,
///     },
///     options: vec![ProductOption::new("size", "Size", 0)],
///     values: vec![OptionValue::new("m", "size", 0, "M")],
///     variants: vec![Variant::new("tee-m", "TEE-M", 4).with_pair("size", "m")],
/// };
///
/// assert!(validate_catalog(&catalog).is_ok());
/// ```
pub fn validate_catalog(catalog: &ProductCatalog) -> Result<(), CatalogError> {
    validate_product(&catalog.product)?;

    let mut option_ids = HashSet::new();
    for option in &catalog.options {
        validate_option(option)?;
        if !option_ids.insert(option.id.as_str()) {
            return Err(CatalogError::DuplicateOption(option.id.clone()));
        }
    }

    // value id -> owning option id
    let mut value_owner: HashMap<&str, &str> = HashMap::new();
    for value in &catalog.values {
        validate_value(value)?;
        if !option_ids.contains(value.option_id.as_str()) {
            return Err(CatalogError::OrphanValue {
                value_id: value.id.clone(),
                option_id: value.option_id.clone(),
            });
        }
        if value_owner
            .insert(value.id.as_str(), value.option_id.as_str())
            .is_some()
        {
            return Err(CatalogError::DuplicateValue(value.id.clone()));
        }
    }

    let mut variant_ids = HashSet::new();
    let mut combinations: HashMap<Selection, &str> = HashMap::new();
    for variant in &catalog.variants {
        validate_variant(variant, &catalog.product)?;
        if !variant_ids.insert(variant.id.as_str()) {
            return Err(CatalogError::DuplicateVariant(variant.id.clone()));
        }

        let mut seen_options = HashSet::new();
        for pair in &variant.options {
            if !option_ids.contains(pair.option_id.as_str()) {
                return Err(CatalogError::UnknownOption {
                    variant_id: variant.id.clone(),
                    option_id: pair.option_id.clone(),
                });
            }
            if value_owner.get(pair.value_id.as_str()) != Some(&pair.option_id.as_str()) {
                return Err(CatalogError::UnknownValue {
                    variant_id: variant.id.clone(),
                    option_id: pair.option_id.clone(),
                    value_id: pair.value_id.clone(),
                });
            }
            if !seen_options.insert(pair.option_id.as_str()) {
                return Err(CatalogError::RepeatedOption {
                    variant_id: variant.id.clone(),
                    option_id: pair.option_id.clone(),
                });
            }
        }

        if let Some(first) = combinations.insert(variant.combination(), variant.id.as_str()) {
            return Err(CatalogError::DuplicateCombination {
                first: first.to_string(),
                second: variant.id.clone(),
            });
        }
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn product() -> ProductBase {
        ProductBase {
            id: "tee".to_string(),
            name: "Tee".to_string(),
            price: Money::from_minor(2000),
            sale_price: None,
            stock: 0,
            has_variants: true,
        }
    }

    fn catalog(variants: Vec<Variant>) -> ProductCatalog {
        ProductCatalog {
            product: product(),
            options: vec![
                ProductOption::new("color", "Color", 0),
                ProductOption::new("size", "Size", 1),
            ],
            values: vec![
                OptionValue::new("red", "color", 0, "red"),
                OptionValue::new("blue", "color", 1, "blue"),
                OptionValue::new("s", "size", 0, "S"),
                OptionValue::new("m", "size", 1, "M"),
            ],
            variants,
        }
    }

    #[test]
    fn test_validate_sku() {
        assert!(validate_sku("TEE-RED-M").is_ok());
        assert!(validate_sku("tee_1").is_ok());

        assert!(validate_sku("").is_err());
        assert!(validate_sku("   ").is_err());
        assert!(validate_sku("has space").is_err());
        assert!(validate_sku(&"A".repeat(100)).is_err());
    }

    #[test]
    fn test_validate_color_code() {
        assert!(validate_color_code("#fff").is_ok());
        assert!(validate_color_code("#FF0000").is_ok());

        assert!(validate_color_code("ff0000").is_err());
        assert!(validate_color_code("#ff00").is_err());
        assert!(validate_color_code("#gg0000").is_err());
    }

    #[test]
    fn test_validate_prices() {
        let p = |n| Some(Money::from_minor(n));

        assert!(validate_prices(p(100000), p(80000)).is_ok());
        assert!(validate_prices(p(0), None).is_ok());
        assert!(validate_prices(None, None).is_ok());

        assert_eq!(
            validate_prices(p(80000), p(100000)),
            Err(ValidationError::SaleAbovePrice {
                sale: 100000,
                price: 80000
            })
        );
        assert!(validate_prices(p(-1), None).is_err());
        assert!(validate_prices(p(10), p(-1)).is_err());
    }

    #[test]
    fn test_valid_catalog() {
        let catalog = catalog(vec![
            Variant::new("v1", "TEE-RED-S", 0)
                .with_pair("color", "red")
                .with_pair("size", "s"),
            Variant::new("v2", "TEE-RED-M", 5)
                .with_pair("color", "red")
                .with_pair("size", "m"),
        ]);
        assert!(validate_catalog(&catalog).is_ok());
    }

    #[test]
    fn test_duplicate_combination_rejected() {
        let catalog = catalog(vec![
            Variant::new("v1", "A", 1)
                .with_pair("color", "red")
                .with_pair("size", "s"),
            Variant::new("v2", "B", 1)
                .with_pair("size", "s")
                .with_pair("color", "red"),
        ]);
        assert_eq!(
            validate_catalog(&catalog),
            Err(CatalogError::DuplicateCombination {
                first: "v1".to_string(),
                second: "v2".to_string(),
            })
        );
    }

    #[test]
    fn test_ids_with_separators_are_distinct_combinations() {
        let catalog = ProductCatalog {
            product: product(),
            options: vec![
                ProductOption::new("a", "A", 0),
                ProductOption::new("a:b", "A:B", 1),
            ],
            values: vec![
                OptionValue::new("b:c", "a", 0, "b:c"),
                OptionValue::new("c", "a:b", 0, "c"),
            ],
            variants: vec![
                Variant::new("v2", "V2", 1).with_pair("a:b", "c"),
                Variant::new("v1", "V1", 1).with_pair("a", "b:c"),
            ],
        };
        assert_eq!(validate_catalog(&catalog), Ok(()));
    }

    #[test]
    fn test_value_from_wrong_option_rejected() {
        let catalog = catalog(vec![Variant::new("v1", "A", 1).with_pair("size", "red")]);
        assert!(matches!(
            validate_catalog(&catalog),
            Err(CatalogError::UnknownValue { .. })
        ));
    }

    #[test]
    fn test_unknown_option_rejected() {
        let catalog = catalog(vec![Variant::new("v1", "A", 1).with_pair("material", "red")]);
        assert!(matches!(
            validate_catalog(&catalog),
            Err(CatalogError::UnknownOption { .. })
        ));
    }

    #[test]
    fn test_repeated_option_rejected() {
        let catalog = catalog(vec![Variant::new("v1", "A", 1)
            .with_pair("color", "red")
            .with_pair("color", "blue")]);
        assert!(matches!(
            validate_catalog(&catalog),
            Err(CatalogError::RepeatedOption { .. })
        ));
    }

    #[test]
    fn test_orphan_value_rejected() {
        let mut catalog = catalog(Vec::new());
        catalog
            .values
            .push(OptionValue::new("cotton", "material", 0, "Cotton"));
        assert!(matches!(
            validate_catalog(&catalog),
            Err(CatalogError::OrphanValue { .. })
        ));
    }

    #[test]
    fn test_variant_sale_above_base_price_rejected() {
        // Product price is 2000; variant has no price override
        let catalog = catalog(vec![Variant::new("v1", "A", 1)
            .with_pair("color", "red")
            .with_sale_price(Money::from_minor(2500))]);
        assert!(matches!(
            validate_catalog(&catalog),
            Err(CatalogError::InvalidField {
                record: "Variant",
                ..
            })
        ));
    }

    #[test]
    fn test_negative_stock_rejected() {
        let catalog = catalog(vec![Variant::new("v1", "A", -3).with_pair("color", "red")]);
        assert!(validate_catalog(&catalog).is_err());
    }
}
