//! # Domain Types
//!
//! Catalog records consumed by the resolution engine.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Catalog Records                                 │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────────┐   │
//! │  │  ProductOption  │ 1 │   OptionValue   │   │       Variant       │   │
//! │  │  ─────────────  │──►│  ─────────────  │   │  ─────────────────  │   │
//! │  │  id   "color"   │ * │  id   "red"     │◄──│  options: [         │   │
//! │  │  order 0        │   │  option_id      │   │   (color, red),     │   │
//! │  │  display_style  │   │  order, value   │   │   (size,  m) ]      │   │
//! │  └─────────────────┘   └─────────────────┘   │  price?, sale?      │   │
//! │                                               │  stock, sku         │   │
//! │  ┌─────────────────┐   ┌─────────────────┐   └─────────────────────┘   │
//! │  │   ProductBase   │   │    Selection    │                             │
//! │  │  price, sale?   │   │ option → value  │  (partial or complete)      │
//! │  │  stock          │   │  BTreeMap       │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All records are immutable for the lifetime of a selection session. They
//! are authored and stored elsewhere; this crate only reads them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Display Style / Input Kind
// =============================================================================

/// How the presentation layer renders an option's values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum DisplayStyle {
    /// Colored or image chips.
    Swatch,
    /// Text buttons.
    #[default]
    Button,
    /// A select box.
    Dropdown,
}

/// What kind of raw value an option holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum InputKind {
    /// Free text ("S", "Cotton").
    #[default]
    Text,
    /// A color; values usually carry `color_code`.
    Color,
    /// An image; values usually carry `image`.
    Image,
}

// =============================================================================
// Product Option
// =============================================================================

/// A configurable axis of a product (e.g. Color).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductOption {
    pub id: String,
    pub name: String,
    /// Ascending display order. Ties keep input order.
    pub order: i32,
    #[serde(default)]
    pub display_style: DisplayStyle,
    #[serde(default)]
    pub input_kind: InputKind,
}

impl ProductOption {
    /// Creates a button-style text option.
    pub fn new(id: impl Into<String>, name: impl Into<String>, order: i32) -> Self {
        ProductOption {
            id: id.into(),
            name: name.into(),
            order,
            display_style: DisplayStyle::default(),
            input_kind: InputKind::default(),
        }
    }

    /// Sets the display style and input kind.
    pub fn styled(mut self, display_style: DisplayStyle, input_kind: InputKind) -> Self {
        self.display_style = display_style;
        self.input_kind = input_kind;
        self
    }
}

// =============================================================================
// Option Value
// =============================================================================

/// One concrete choice for an option (e.g. Red).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OptionValue {
    pub id: String,
    pub option_id: String,
    /// Ascending display order within the owning option.
    pub order: i32,
    /// Raw value ("red", "M").
    pub value: String,
    pub label: Option<String>,
    /// Hex color for swatches, e.g. `#ff0000`.
    pub color_code: Option<String>,
    pub image: Option<String>,
}

impl OptionValue {
    /// Creates a value with no label, color or image.
    pub fn new(
        id: impl Into<String>,
        option_id: impl Into<String>,
        order: i32,
        value: impl Into<String>,
    ) -> Self {
        OptionValue {
            id: id.into(),
            option_id: option_id.into(),
            order,
            value: value.into(),
            label: None,
            color_code: None,
            image: None,
        }
    }

    /// Sets the human-readable label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Sets the swatch color.
    pub fn with_color_code(mut self, color_code: impl Into<String>) -> Self {
        self.color_code = Some(color_code.into());
        self
    }

    /// Label if present, raw value otherwise.
    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.value)
    }
}

// =============================================================================
// Variant
// =============================================================================

/// One (optionId, valueId) pair of a variant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct VariantOptionValue {
    pub option_id: String,
    pub value_id: String,
}

impl VariantOptionValue {
    pub fn new(option_id: impl Into<String>, value_id: impl Into<String>) -> Self {
        VariantOptionValue {
            option_id: option_id.into(),
            value_id: value_id.into(),
        }
    }
}

/// A sellable combination of option values with its own price, stock and SKU.
///
/// ## Identity
/// The set of `options` pairs is the variant's identity within its product:
/// no two variants share the same complete set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Variant {
    pub id: String,
    /// At most one pair per option, in authoring order.
    pub options: Vec<VariantOptionValue>,
    /// Overrides the product's base price.
    pub price: Option<Money>,
    /// Overrides every other price when present.
    pub sale_price: Option<Money>,
    pub stock: i64,
    pub sku: String,
    pub image: Option<String>,
    #[serde(default)]
    pub gallery: Vec<String>,
}

impl Variant {
    /// Creates a variant with no pairs and no price overrides.
    pub fn new(id: impl Into<String>, sku: impl Into<String>, stock: i64) -> Self {
        Variant {
            id: id.into(),
            options: Vec::new(),
            price: None,
            sale_price: None,
            stock,
            sku: sku.into(),
            image: None,
            gallery: Vec::new(),
        }
    }

    /// Appends an (optionId, valueId) pair.
    pub fn with_pair(mut self, option_id: impl Into<String>, value_id: impl Into<String>) -> Self {
        self.options.push(VariantOptionValue::new(option_id, value_id));
        self
    }

    /// Sets the price override.
    pub fn with_price(mut self, price: Money) -> Self {
        self.price = Some(price);
        self
    }

    /// Sets the sale-price override.
    pub fn with_sale_price(mut self, sale_price: Money) -> Self {
        self.sale_price = Some(sale_price);
        self
    }

    /// Returns the value this variant assigns to `option_id`, if any.
    pub fn value_for(&self, option_id: &str) -> Option<&str> {
        self.options
            .iter()
            .find(|pair| pair.option_id == option_id)
            .map(|pair| pair.value_id.as_str())
    }

    /// Returns true if this variant assigns a value to `option_id`.
    pub fn defines(&self, option_id: &str) -> bool {
        self.value_for(option_id).is_some()
    }

    /// Checks if at least one unit is in stock.
    #[inline]
    pub fn is_in_stock(&self) -> bool {
        self.stock > 0
    }

    /// The pair set as a selection, for set comparisons (exact-match lookup,
    /// duplicate-combination checks).
    ///
    /// Two variants have equal combinations iff they have the same pair set.
    pub fn combination(&self) -> Selection {
        Selection::from_variant(self)
    }
}

// =============================================================================
// Product Base
// =============================================================================

/// The product-level fallback data used when no variant is resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductBase {
    pub id: String,
    pub name: String,
    pub price: Money,
    pub sale_price: Option<Money>,
    pub stock: i64,
    /// Product is configured as variant-bearing. If this is set but the
    /// variant list is empty, the view reports "variants unavailable".
    pub has_variants: bool,
}

impl ProductBase {
    /// Sale price if present, base price otherwise.
    pub fn effective_price(&self) -> Money {
        self.sale_price.unwrap_or(self.price)
    }
}

// =============================================================================
// Product Catalog
// =============================================================================

/// Everything a catalog store loads for one product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductCatalog {
    pub product: ProductBase,
    pub options: Vec<ProductOption>,
    pub values: Vec<OptionValue>,
    pub variants: Vec<Variant>,
}

impl ProductCatalog {
    /// Creates a catalog with no options and no variants.
    pub fn simple(product: ProductBase) -> Self {
        ProductCatalog {
            product,
            options: Vec::new(),
            values: Vec::new(),
            variants: Vec::new(),
        }
    }
}

// =============================================================================
// Selection
// =============================================================================

/// The shopper's in-progress choice: optionId → valueId.
///
/// ## Why BTreeMap?
/// Iteration and serialization order are stable, so two equal selections
/// always print and serialize identically.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export)]
pub struct Selection(BTreeMap<String, String>);

impl Selection {
    /// Creates an empty selection.
    pub fn new() -> Self {
        Selection(BTreeMap::new())
    }

    /// Builds the complete selection a variant stands for.
    pub fn from_variant(variant: &Variant) -> Self {
        Selection(
            variant
                .options
                .iter()
                .map(|pair| (pair.option_id.clone(), pair.value_id.clone()))
                .collect(),
        )
    }

    /// Returns the chosen value for an option.
    pub fn get(&self, option_id: &str) -> Option<&str> {
        self.0.get(option_id).map(String::as_str)
    }

    /// Chooses `value_id` for `option_id`, replacing any previous choice.
    pub fn set(&mut self, option_id: impl Into<String>, value_id: impl Into<String>) {
        self.0.insert(option_id.into(), value_id.into());
    }

    /// Returns a copy with `option_id` set to `value_id`.
    pub fn with(&self, option_id: &str, value_id: &str) -> Self {
        let mut next = self.clone();
        next.set(option_id, value_id);
        next
    }

    /// Clears the choice for one option.
    pub fn remove(&mut self, option_id: &str) -> Option<String> {
        self.0.remove(option_id)
    }

    /// Clears every choice.
    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn contains(&self, option_id: &str) -> bool {
        self.0.contains_key(option_id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates (optionId, valueId) in option-id order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns true if every option in `options` has a chosen value.
    pub fn is_complete_for(&self, options: &[ProductOption]) -> bool {
        options.iter().all(|option| self.contains(&option.id))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Selection {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Selection(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_value_for() {
        let variant = Variant::new("v1", "TEE-RED-M", 3)
            .with_pair("color", "red")
            .with_pair("size", "m");

        assert_eq!(variant.value_for("color"), Some("red"));
        assert_eq!(variant.value_for("material"), None);
        assert!(variant.defines("size"));
        assert!(variant.is_in_stock());
    }

    #[test]
    fn test_combination_ignores_pair_order() {
        let a = Variant::new("a", "A", 0)
            .with_pair("size", "m")
            .with_pair("color", "red");
        let b = Variant::new("b", "B", 0)
            .with_pair("color", "red")
            .with_pair("size", "m");

        assert_eq!(a.combination(), b.combination());
        assert_eq!(a.combination().get("size"), Some("m"));
    }

    #[test]
    fn test_selection_from_variant_matches_combination() {
        let variant = Variant::new("v1", "SKU", 1)
            .with_pair("size", "s")
            .with_pair("color", "blue");
        let selection = Selection::from_variant(&variant);

        assert_eq!(selection.len(), 2);
        assert_eq!(selection.get("color"), Some("blue"));
        assert_eq!(selection, variant.combination());
    }

    #[test]
    fn test_combination_keeps_separator_characters_apart() {
        // Ids are opaque strings; ':' and '|' inside them must not merge pairs
        let a = Variant::new("v1", "A", 1).with_pair("a", "b:c");
        let b = Variant::new("v2", "B", 1).with_pair("a:b", "c");
        let c = Variant::new("v3", "C", 1)
            .with_pair("a", "b|c:d")
            .with_pair("x", "y");
        let d = Variant::new("v4", "D", 1)
            .with_pair("a", "b")
            .with_pair("c:d|x", "y");

        assert_ne!(a.combination(), b.combination());
        assert_ne!(c.combination(), d.combination());
    }

    #[test]
    fn test_selection_set_replaces() {
        let mut selection = Selection::new();
        selection.set("color", "red");
        selection.set("color", "blue");

        assert_eq!(selection.len(), 1);
        assert_eq!(selection.get("color"), Some("blue"));

        let next = selection.with("size", "l");
        assert_eq!(next.len(), 2);
        assert_eq!(selection.len(), 1);
    }

    #[test]
    fn test_selection_is_complete_for() {
        let options = vec![
            ProductOption::new("color", "Color", 0),
            ProductOption::new("size", "Size", 1),
        ];
        let mut selection: Selection = [("color", "red")].into_iter().collect();
        assert!(!selection.is_complete_for(&options));

        selection.set("size", "m");
        assert!(selection.is_complete_for(&options));
    }

    #[test]
    fn test_selection_serializes_as_map() {
        let selection: Selection = [("size", "m"), ("color", "red")].into_iter().collect();
        let json = serde_json::to_string(&selection).unwrap();
        assert_eq!(json, r#"{"color":"red","size":"m"}"#);
    }

    #[test]
    fn test_option_value_display_label() {
        let plain = OptionValue::new("red", "color", 0, "red");
        assert_eq!(plain.display_label(), "red");

        let labelled = plain.with_label("Crimson");
        assert_eq!(labelled.display_label(), "Crimson");
    }

    #[test]
    fn test_product_effective_price() {
        let product = ProductBase {
            id: "p1".to_string(),
            name: "Tee".to_string(),
            price: Money::from_minor(100000),
            sale_price: Some(Money::from_minor(80000)),
            stock: 12,
            has_variants: false,
        };
        assert_eq!(product.effective_price(), Money::from_minor(80000));
    }
}
