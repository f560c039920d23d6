//! # Catalog Index
//!
//! Lookup tables built once per catalog load and shared by every
//! resolution call of every session on that product.
//!
//! ## What Gets Precomputed
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ProductCatalog (as loaded)          CatalogIndex                       │
//! │  ─────────────────────────           ─────────────────────────────────  │
//! │  options  [size:1, color:0]   ──►    options      [color, size]  sorted │
//! │  values   [m, red, s, blue]   ──►    values_by    color → [red, blue]   │
//! │                                                   size  → [s, m]        │
//! │                                      value_pos    id → position         │
//! │  variants [v1, v2, ...]       ──►    variants     input order, untouched│
//! │                                      exact        {color:red,size:m}→v2 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Sorting is stable: options (and values) with equal `order` keep their
//! input order.

use std::collections::HashMap;

use tracing::debug;

use crate::error::CatalogError;
use crate::resolve;
use crate::types::{OptionValue, ProductBase, ProductCatalog, ProductOption, Selection, Variant};
use crate::validation::validate_catalog;

/// Validated, indexed catalog of one product.
///
/// ## Usage
/// ```rust
/// use variant_core::index::CatalogIndex;
/// use variant_core::money::Money;
/// use variant_core::types::{ProductBase, ProductCatalog};
///
/// let catalog = ProductCatalog::simple(ProductBase {
///     id: "mug".into(),
///     name: "Mug".into(),
///     price: Money::from_minor(1500),
///     sale_price: None,
///     stock: 3,
///     has_variants: false,
/// });
///
/// let index = CatalogIndex::build(catalog).unwrap();
/// assert!(index.options().is_empty());
/// assert!(!index.variants_unavailable());
/// ```
#[derive(Debug, Clone)]
pub struct CatalogIndex {
    product: ProductBase,
    /// Sorted ascending by `order`.
    options: Vec<ProductOption>,
    /// Parallel to `options`; each list sorted ascending by `order`.
    values_by_option: Vec<Vec<OptionValue>>,
    option_pos: HashMap<String, usize>,
    /// value id -> (option position, value position)
    value_pos: HashMap<String, (usize, usize)>,
    /// Supplied order, which is authoritative for first-match-wins.
    variants: Vec<Variant>,
    variant_pos: HashMap<String, usize>,
    /// pair set -> position
    exact: HashMap<Selection, usize>,
}

impl CatalogIndex {
    /// Validates the catalog and builds the index.
    ///
    /// ## Returns
    /// * `Ok(CatalogIndex)` - Ready for resolution
    /// * `Err(CatalogError)` - The first invariant violation found
    pub fn build(catalog: ProductCatalog) -> Result<Self, CatalogError> {
        validate_catalog(&catalog)?;

        let ProductCatalog {
            product,
            mut options,
            values,
            variants,
        } = catalog;

        options.sort_by_key(|option| option.order);

        let option_pos: HashMap<String, usize> = options
            .iter()
            .enumerate()
            .map(|(pos, option)| (option.id.clone(), pos))
            .collect();

        let mut values_by_option: Vec<Vec<OptionValue>> = vec![Vec::new(); options.len()];
        for value in values {
            // Validation guarantees every value has a known owner
            if let Some(&pos) = option_pos.get(&value.option_id) {
                if let Some(bucket) = values_by_option.get_mut(pos) {
                    bucket.push(value);
                }
            }
        }
        for bucket in &mut values_by_option {
            bucket.sort_by_key(|value| value.order);
        }

        let value_pos = values_by_option
            .iter()
            .enumerate()
            .flat_map(|(option_idx, bucket)| {
                bucket
                    .iter()
                    .enumerate()
                    .map(move |(value_idx, value)| (value.id.clone(), (option_idx, value_idx)))
            })
            .collect();

        let variant_pos = variants
            .iter()
            .enumerate()
            .map(|(pos, variant)| (variant.id.clone(), pos))
            .collect();

        let exact = variants
            .iter()
            .enumerate()
            .map(|(pos, variant)| (variant.combination(), pos))
            .collect();

        debug!(
            product_id = %product.id,
            options = options.len(),
            variants = variants.len(),
            "Catalog indexed"
        );

        Ok(CatalogIndex {
            product,
            options,
            values_by_option,
            option_pos,
            value_pos,
            variants,
            variant_pos,
            exact,
        })
    }

    /// The product-level fallback record.
    pub fn product(&self) -> &ProductBase {
        &self.product
    }

    /// Options sorted ascending by display order.
    pub fn options(&self) -> &[ProductOption] {
        &self.options
    }

    /// Looks up an option by id.
    pub fn option(&self, option_id: &str) -> Option<&ProductOption> {
        self.option_pos
            .get(option_id)
            .and_then(|&pos| self.options.get(pos))
    }

    /// Values of an option sorted ascending by display order. Empty for an
    /// unknown option.
    pub fn values_for(&self, option_id: &str) -> &[OptionValue] {
        self.option_pos
            .get(option_id)
            .and_then(|&pos| self.values_by_option.get(pos))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Looks up a value by id.
    pub fn value(&self, value_id: &str) -> Option<&OptionValue> {
        self.value_pos
            .get(value_id)
            .and_then(|&(option_idx, value_idx)| {
                self.values_by_option
                    .get(option_idx)
                    .and_then(|bucket| bucket.get(value_idx))
            })
    }

    /// Looks up a value, but only if it belongs to `option_id`.
    pub fn option_value_for(&self, option_id: &str, value_id: &str) -> Option<&OptionValue> {
        self.value(value_id)
            .filter(|value| value.option_id == option_id)
    }

    /// Variants in supplied order.
    pub fn variants(&self) -> &[Variant] {
        &self.variants
    }

    /// Looks up a variant by id.
    pub fn variant(&self, variant_id: &str) -> Option<&Variant> {
        self.variant_pos
            .get(variant_id)
            .and_then(|&pos| self.variants.get(pos))
    }

    /// Exact match through the pair-set table.
    ///
    /// Same answer as [`resolve::match_exact`] over [`Self::variants`]
    /// (combinations are unique), in O(pairs) instead of O(variants).
    pub fn find_exact(&self, selection: &Selection) -> Option<&Variant> {
        self.exact
            .get(selection)
            .and_then(|&pos| self.variants.get(pos))
    }

    /// First variant consistent with the selection, in supplied order.
    pub fn find_partial(&self, selection: &Selection) -> Option<&Variant> {
        resolve::match_partial(&self.variants, selection)
    }

    /// The product is configured with variants but none were supplied.
    ///
    /// Not an error: the session falls back to the product's own price and
    /// stock and the view flags it.
    pub fn variants_unavailable(&self) -> bool {
        self.product.has_variants && self.variants.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
