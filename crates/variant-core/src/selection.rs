//! # Selection State
//!
//! Owns one interactive session's option→value choices and requested
//! quantity, and derives everything the presentation layer shows.
//!
//! ## Session Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Selection State Operations                           │
//! │                                                                         │
//! │  Shopper Action          Method                   Selection Change      │
//! │  ──────────────          ──────                   ────────────────      │
//! │                                                                         │
//! │  Open widget ──────────► initialize(variant?) ──► seeded / empty        │
//! │                                                                         │
//! │  Click swatch ─────────► set_option_value() ────► reconcile_change()   │
//! │                                                                         │
//! │  Change quantity ──────► set_quantity(n) ───────► clamp to [1, stock]  │
//! │                                                                         │
//! │  Click reset ──────────► reset() ───────────────► empty                 │
//! │                                                                         │
//! │  Render ───────────────► view() ────────────────► (read only)           │
//! │                                                                         │
//! │  Add to cart ──────────► checkout_line() ───────► (variant, quantity)  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## State Machine
//! ```text
//!   Uninitialized ──► Partial ──► Resolved ──► Purchasable
//!                        ▲            │             │
//!                        └────────────┴─────────────┘
//!                     (set_option_value may move back)
//! ```
//! `Purchasable` is a derived predicate (resolved + stock + quantity), not
//! a separate mutation path.
//!
//! ## Ownership
//! One `SelectionState` per widget. Several widgets on one page each own
//! their own state; they may share the read-only `Arc<CatalogIndex>` of the
//! same product but never any mutable data. Cancelling a session is
//! dropping the value.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::error::{CatalogError, CoreError, CoreResult};
use crate::index::CatalogIndex;
use crate::money::Money;
use crate::resolve::{self, ReconcileOutcome};
use crate::types::{DisplayStyle, InputKind, ProductCatalog, Selection, Variant};
use crate::MIN_QUANTITY;

// =============================================================================
// Status
// =============================================================================

/// Where a session stands in the selection state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum SelectionStatus {
    /// Nothing chosen and nothing resolved.
    Uninitialized,
    /// Some values chosen, no variant addressed yet.
    Partial,
    /// A variant is addressed but cannot be bought (stock or quantity).
    Resolved,
    /// Ready to hand to checkout.
    Purchasable,
}

// =============================================================================
// Selection State
// =============================================================================

/// Per-session selection state for one product.
#[derive(Debug, Clone)]
pub struct SelectionState {
    index: Arc<CatalogIndex>,
    selection: Selection,
    quantity: i64,
}

impl SelectionState {
    /// Creates an empty session over an already-loaded catalog.
    ///
    /// Requiring a built [`CatalogIndex`] is what keeps "not loaded yet"
    /// apart from "loaded, nothing matches": the former cannot produce a
    /// `SelectionState` at all.
    pub fn new(index: Arc<CatalogIndex>) -> Self {
        SelectionState {
            index,
            selection: Selection::new(),
            quantity: MIN_QUANTITY,
        }
    }

    /// Validates and indexes `catalog`, then creates an empty session.
    pub fn from_catalog(catalog: ProductCatalog) -> Result<Self, CatalogError> {
        Ok(SelectionState::new(Arc::new(CatalogIndex::build(catalog)?)))
    }

    // -------------------------------------------------------------------------
    // Mutators
    // -------------------------------------------------------------------------

    /// Seeds the selection from an existing variant's pairs, or starts empty.
    ///
    /// ## Returns
    /// * `Ok(())` - Session (re)started, quantity back to 1
    /// * `Err(CoreError::VariantNotFound)` - Unknown variant id; state untouched
    pub fn initialize(&mut self, from_variant: Option<&str>) -> CoreResult<()> {
        let selection = match from_variant {
            Some(variant_id) => {
                let variant = self
                    .index
                    .variant(variant_id)
                    .ok_or_else(|| CoreError::VariantNotFound(variant_id.to_string()))?;
                Selection::from_variant(variant)
            }
            None => Selection::new(),
        };

        debug!(
            product_id = %self.index.product().id,
            seeded_from = ?from_variant,
            "Selection initialized"
        );

        self.selection = selection;
        self.quantity = MIN_QUANTITY;
        Ok(())
    }

    /// Seeds the selection from the first in-stock variant in list order.
    /// Starts empty when nothing is in stock.
    ///
    /// ## Returns
    /// The id of the seeding variant, if any.
    pub fn initialize_first_in_stock(&mut self) -> Option<String> {
        let Some(variant) = self.index.variants().iter().find(|variant| variant.is_in_stock()) else {
            debug!(product_id = %self.index.product().id, "No variant in stock; starting empty");
            self.reset();
            return None;
        };

        debug!(
            product_id = %self.index.product().id,
            variant_id = %variant.id,
            "Selection seeded from first in-stock variant"
        );
        self.selection = Selection::from_variant(variant);
        self.quantity = MIN_QUANTITY;
        Some(variant.id.clone())
    }

    /// Chooses `value_id` for `option_id`, then reconciles.
    ///
    /// ## Behavior
    /// - Exact variant for the new selection: kept as is
    /// - Otherwise a variant carrying the new value is adopted whole,
    ///   preferring one compatible with the other choices (see
    ///   [`resolve::reconcile_change`])
    /// - Quantity is re-clamped to the new effective stock
    ///
    /// ## Errors
    /// Only for ids the catalog does not know. An unreachable combination
    /// is not an error: the selection simply stays `Partial`.
    pub fn set_option_value(&mut self, option_id: &str, value_id: &str) -> CoreResult<()> {
        self.check_pair(option_id, value_id)?;

        let next = self.selection.with(option_id, value_id);
        let (reconciled, outcome) =
            resolve::reconcile_change_detailed(&next, option_id, self.index.variants());

        match &outcome {
            ReconcileOutcome::Exact => {
                debug!(option_id, value_id, "Selection resolved exactly");
            }
            ReconcileOutcome::AutoFilled { variant_id } | ReconcileOutcome::Anchored { variant_id } => {
                debug!(option_id, value_id, variant_id = %variant_id, ?outcome, "Selection reconciled");
            }
            ReconcileOutcome::Unmatched => {
                debug!(option_id, value_id, "No variant reachable from selection");
            }
        }

        self.selection = reconciled;
        self.requantify();
        Ok(())
    }

    /// Clears the choice for one option without reconciling.
    pub fn clear_option_value(&mut self, option_id: &str) -> CoreResult<()> {
        if self.index.option(option_id).is_none() {
            return Err(CoreError::OptionNotFound(option_id.to_string()));
        }
        self.selection.remove(option_id);
        self.requantify();
        Ok(())
    }

    /// Sets the requested quantity, clamped to `[1, effective stock]`.
    ///
    /// No-op when effective stock is zero.
    ///
    /// ## Example
    /// ```text
    /// stock = 5
    /// set_quantity(0)  → 1
    /// set_quantity(3)  → 3
    /// set_quantity(15) → 5
    /// ```
    pub fn set_quantity(&mut self, quantity: i64) {
        let stock = self.effective_stock();
        if stock <= 0 {
            debug!(requested = quantity, "Quantity unchanged: no stock");
            return;
        }

        let clamped = quantity.clamp(MIN_QUANTITY, stock);
        if clamped != quantity {
            debug!(requested = quantity, clamped, stock, "Quantity clamped");
        }
        self.quantity = clamped;
    }

    /// Clears the selection and sets quantity back to 1.
    pub fn reset(&mut self) {
        self.selection.clear();
        self.quantity = MIN_QUANTITY;
    }

    fn check_pair(&self, option_id: &str, value_id: &str) -> CoreResult<()> {
        if self.index.option(option_id).is_none() {
            return Err(CoreError::OptionNotFound(option_id.to_string()));
        }
        let value = self
            .index
            .value(value_id)
            .ok_or_else(|| CoreError::ValueNotFound(value_id.to_string()))?;
        if value.option_id != option_id {
            return Err(CoreError::ValueNotInOption {
                option_id: option_id.to_string(),
                value_id: value_id.to_string(),
            });
        }
        Ok(())
    }

    /// Keeps an earlier quantity inside the new stock after a selection change.
    fn requantify(&mut self) {
        let stock = self.effective_stock();
        if stock > 0 && self.quantity > stock {
            debug!(from = self.quantity, to = stock, "Quantity reduced to new stock");
            self.quantity = stock;
        }
    }

    // -------------------------------------------------------------------------
    // Derived values
    // -------------------------------------------------------------------------

    /// The catalog this session resolves against.
    pub fn index(&self) -> &CatalogIndex {
        &self.index
    }

    /// Current option→value choices.
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Current requested quantity (always ≥ 1).
    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    /// The variant the selection addresses exactly, if any.
    pub fn resolved_variant(&self) -> Option<&Variant> {
        self.index.find_exact(&self.selection)
    }

    /// The first variant consistent with the selection; used for previews
    /// while the selection is incomplete.
    pub fn preview_variant(&self) -> Option<&Variant> {
        self.resolved_variant()
            .or_else(|| self.index.find_partial(&self.selection))
    }

    /// Variant sale price, else variant price, else product sale price,
    /// else product base price.
    pub fn effective_price(&self) -> Money {
        let product = self.index.product();
        self.resolved_variant()
            .and_then(|variant| variant.sale_price.or(variant.price))
            .unwrap_or_else(|| product.effective_price())
    }

    /// The undiscounted price when a sale price is in effect (for a
    /// struck-through display), `None` otherwise.
    pub fn compare_at_price(&self) -> Option<Money> {
        let product = self.index.product();
        match self.resolved_variant() {
            Some(variant) if variant.sale_price.is_some() => {
                Some(variant.price.unwrap_or(product.price))
            }
            Some(variant) if variant.price.is_some() => None,
            _ => product.sale_price.map(|_| product.price),
        }
    }

    /// Resolved variant's stock, else the product's own stock.
    pub fn effective_stock(&self) -> i64 {
        self.resolved_variant()
            .map(|variant| variant.stock)
            .unwrap_or(self.index.product().stock)
    }

    /// Whether the session can be handed to checkout.
    ///
    /// ## Rules
    /// - A variant must be resolved, unless the product exposes no variants
    ///   (simple product, or variants unavailable)
    /// - Effective stock > 0
    /// - Quantity within `[1, effective stock]`
    pub fn is_purchasable(&self) -> bool {
        let needs_variant = !self.index.variants().is_empty();
        if needs_variant && self.resolved_variant().is_none() {
            return false;
        }

        let stock = self.effective_stock();
        stock > 0 && (MIN_QUANTITY..=stock).contains(&self.quantity)
    }

    /// Current position in the state machine.
    pub fn status(&self) -> SelectionStatus {
        if self.is_purchasable() {
            SelectionStatus::Purchasable
        } else if self.resolved_variant().is_some() {
            SelectionStatus::Resolved
        } else if self.selection.is_empty() {
            SelectionStatus::Uninitialized
        } else {
            SelectionStatus::Partial
        }
    }

    /// The `(variant, quantity)` hand-off for checkout; `None` unless
    /// purchasable.
    pub fn checkout_line(&self) -> Option<CheckoutLine> {
        if !self.is_purchasable() {
            return None;
        }

        let variant = self.resolved_variant();
        let unit_price = self.effective_price();
        Some(CheckoutLine {
            product_id: self.index.product().id.clone(),
            variant_id: variant.map(|v| v.id.clone()),
            sku: variant.map(|v| v.sku.clone()),
            quantity: self.quantity,
            unit_price,
            line_total: unit_price.multiply_quantity(self.quantity),
        })
    }

    /// Builds the render model for the presentation layer.
    ///
    /// Options and values come out sorted by display order; every value
    /// carries whether it is selected and whether it can still lead to a
    /// variant given the other choices.
    pub fn view(&self) -> SelectionView {
        let variants = self.index.variants();

        let options = self
            .index
            .options()
            .iter()
            .map(|option| {
                let selected = self.selection.get(&option.id);
                let values = self
                    .index
                    .values_for(&option.id)
                    .iter()
                    .map(|value| ValueView {
                        id: value.id.clone(),
                        value: value.value.clone(),
                        label: value.display_label().to_string(),
                        color_code: value.color_code.clone(),
                        image: value.image.clone(),
                        selected: selected == Some(value.id.as_str()),
                        available: resolve::is_value_available(
                            &option.id,
                            &value.id,
                            &self.selection,
                            variants,
                        ),
                    })
                    .collect();

                OptionView {
                    id: option.id.clone(),
                    name: option.name.clone(),
                    display_style: option.display_style,
                    input_kind: option.input_kind,
                    selected_value_id: selected.map(str::to_string),
                    values,
                }
            })
            .collect();

        let resolved = self.resolved_variant();
        SelectionView {
            product_id: self.index.product().id.clone(),
            selection: self.selection.clone(),
            options,
            status: self.status(),
            variant_id: resolved.map(|v| v.id.clone()),
            sku: resolved.map(|v| v.sku.clone()),
            preview_image: self.preview_variant().and_then(|v| v.image.clone()),
            price: self.effective_price(),
            compare_at_price: self.compare_at_price(),
            stock: self.effective_stock(),
            quantity: self.quantity,
            purchasable: self.is_purchasable(),
            variants_unavailable: self.index.variants_unavailable(),
        }
    }
}

// =============================================================================
// View Types
// =============================================================================

/// Render model of a whole session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SelectionView {
    pub product_id: String,
    pub selection: Selection,
    /// Sorted by display order.
    pub options: Vec<OptionView>,
    pub status: SelectionStatus,
    pub variant_id: Option<String>,
    pub sku: Option<String>,
    /// Image of the resolved variant, or of the first consistent one.
    pub preview_image: Option<String>,
    pub price: Money,
    pub compare_at_price: Option<Money>,
    pub stock: i64,
    pub quantity: i64,
    pub purchasable: bool,
    /// Variant-bearing product with an empty variant list; base price and
    /// stock are shown instead.
    pub variants_unavailable: bool,
}

/// Render model of one option control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OptionView {
    pub id: String,
    pub name: String,
    pub display_style: DisplayStyle,
    pub input_kind: InputKind,
    pub selected_value_id: Option<String>,
    /// Sorted by display order.
    pub values: Vec<ValueView>,
}

/// Render model of one swatch/button/dropdown entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ValueView {
    pub id: String,
    pub value: String,
    pub label: String,
    pub color_code: Option<String>,
    pub image: Option<String>,
    pub selected: bool,
    /// False when no variant exists for this value given the other choices.
    pub available: bool,
}

/// What checkout receives once a session is purchasable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CheckoutLine {
    pub product_id: String,
    /// `None` for products without variants.
    pub variant_id: Option<String>,
    pub sku: Option<String>,
    pub quantity: i64,
    pub unit_price: Money,
    pub line_total: Money,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{OptionValue, ProductBase, ProductOption};

    fn product(has_variants: bool) -> ProductBase {
        ProductBase {
            id: "tee".to_string(),
            name: "Tee".to_string(),
            price: Money::from_minor(100000),
            sale_price: Some(Money::from_minor(80000)),
            stock: 12,
            has_variants,
        }
    }

    fn apparel(variants: Vec<Variant>) -> SelectionState {
        let catalog = ProductCatalog {
            product: product(true),
            options: vec![
                ProductOption::new("size", "Size", 1),
                ProductOption::new("color", "Color", 0)
                    .styled(DisplayStyle::Swatch, InputKind::Color),
            ],
            values: vec![
                OptionValue::new("l", "size", 2, "L"),
                OptionValue::new("m", "size", 1, "M"),
                OptionValue::new("s", "size", 0, "S"),
                OptionValue::new("blue", "color", 1, "blue").with_color_code("#0000ff"),
                OptionValue::new("red", "color", 0, "red").with_color_code("#ff0000"),
            ],
            variants,
        };
        SelectionState::from_catalog(catalog).unwrap()
    }

    fn red_s_out_red_m_in() -> SelectionState {
        apparel(vec![
            Variant::new("red-s", "TEE-RED-S", 0)
                .with_pair("color", "red")
                .with_pair("size", "s"),
            Variant::new("red-m", "TEE-RED-M", 5)
                .with_pair("color", "red")
                .with_pair("size", "m"),
        ])
    }

    #[test]
    fn test_out_of_stock_then_switch_size() {
        let mut state = red_s_out_red_m_in();

        state.set_option_value("color", "red").unwrap();
        state.set_option_value("size", "s").unwrap();
        assert_eq!(state.resolved_variant().map(|v| v.id.as_str()), Some("red-s"));
        assert_eq!(state.effective_stock(), 0);
        assert!(!state.is_purchasable());
        assert_eq!(state.status(), SelectionStatus::Resolved);

        state.set_option_value("size", "m").unwrap();
        assert_eq!(state.selection().get("color"), Some("red"));
        assert_eq!(state.selection().get("size"), Some("m"));
        assert_eq!(state.quantity(), 1);
        assert!(state.is_purchasable());
        assert_eq!(state.status(), SelectionStatus::Purchasable);
    }

    #[test]
    fn test_zero_variants_falls_back_to_product() {
        let mut state = SelectionState::from_catalog(ProductCatalog::simple(product(false))).unwrap();

        assert_eq!(state.effective_price(), Money::from_minor(80000));
        assert_eq!(state.compare_at_price(), Some(Money::from_minor(100000)));
        assert_eq!(state.effective_stock(), 12);
        assert!(state.is_purchasable());
        assert_eq!(state.status(), SelectionStatus::Purchasable);

        state.set_quantity(12);
        assert!(state.is_purchasable());

        let line = state.checkout_line().unwrap();
        assert_eq!(line.variant_id, None);
        assert_eq!(line.quantity, 12);
        assert_eq!(line.line_total, Money::from_minor(960000));
    }

    #[test]
    fn test_variants_unavailable_is_not_an_error() {
        let state = SelectionState::from_catalog(ProductCatalog::simple(product(true))).unwrap();
        let view = state.view();

        assert!(view.variants_unavailable);
        assert_eq!(view.price, Money::from_minor(80000));
        assert_eq!(view.stock, 12);
        assert!(view.purchasable);
    }

    #[test]
    fn test_quantity_clamping() {
        let mut state = red_s_out_red_m_in();
        state.initialize(Some("red-m")).unwrap();

        state.set_quantity(0);
        assert_eq!(state.quantity(), 1);

        state.set_quantity(5 + 10);
        assert_eq!(state.quantity(), 5);

        state.set_quantity(-4);
        assert_eq!(state.quantity(), 1);
    }

    #[test]
    fn test_set_quantity_noop_without_stock() {
        let mut state = red_s_out_red_m_in();
        state.initialize(Some("red-s")).unwrap();

        state.set_quantity(3);
        assert_eq!(state.quantity(), 1);
        assert!(!state.is_purchasable());
    }

    #[test]
    fn test_quantity_follows_smaller_stock() {
        let mut state = apparel(vec![
            Variant::new("red-m", "TEE-RED-M", 5)
                .with_pair("color", "red")
                .with_pair("size", "m"),
            Variant::new("red-l", "TEE-RED-L", 2)
                .with_pair("color", "red")
                .with_pair("size", "l"),
        ]);
        state.initialize(Some("red-m")).unwrap();
        state.set_quantity(5);

        state.set_option_value("size", "l").unwrap();
        assert_eq!(state.quantity(), 2);
        assert!(state.is_purchasable());
    }

    #[test]
    fn test_initialize_and_reset() {
        let mut state = red_s_out_red_m_in();
        assert_eq!(state.status(), SelectionStatus::Uninitialized);

        state.initialize(Some("red-m")).unwrap();
        assert_eq!(state.selection().len(), 2);
        assert_eq!(state.status(), SelectionStatus::Purchasable);

        assert_eq!(
            state.initialize(Some("ghost")),
            Err(CoreError::VariantNotFound("ghost".to_string()))
        );
        // Failed seeding leaves the session untouched
        assert_eq!(state.selection().get("size"), Some("m"));

        state.reset();
        assert!(state.selection().is_empty());
        assert_eq!(state.quantity(), 1);
        assert_eq!(state.status(), SelectionStatus::Uninitialized);
    }

    #[test]
    fn test_initialize_first_in_stock() {
        let mut state = red_s_out_red_m_in();
        state.set_option_value("size", "m").unwrap();
        state.set_quantity(4);
        assert_eq!(state.initialize_first_in_stock().as_deref(), Some("red-m"));
        assert_eq!(state.selection(), &Selection::from_variant(state.index().variant("red-m").unwrap()));
        assert_eq!(state.quantity(), 1);
        assert!(state.is_purchasable());

        let mut sold_out = apparel(vec![Variant::new("red-s", "TEE-RED-S", 0)
            .with_pair("color", "red")
            .with_pair("size", "s")]);
        assert_eq!(sold_out.initialize_first_in_stock(), None);
        assert!(sold_out.selection().is_empty());
    }

    #[test]
    fn test_partial_status_when_unreachable() {
        let mut state = red_s_out_red_m_in();
        state.set_option_value("color", "blue").unwrap();

        assert_eq!(state.selection().get("color"), Some("blue"));
        assert_eq!(state.status(), SelectionStatus::Partial);
        assert!(state.resolved_variant().is_none());
        assert!(state.checkout_line().is_none());
        // Falls back to the product's own price while unresolved
        assert_eq!(state.effective_price(), Money::from_minor(80000));
    }

    #[test]
    fn test_rejects_unknown_ids() {
        let mut state = red_s_out_red_m_in();

        assert_eq!(
            state.set_option_value("material", "cotton"),
            Err(CoreError::OptionNotFound("material".to_string()))
        );
        assert_eq!(
            state.set_option_value("color", "green"),
            Err(CoreError::ValueNotFound("green".to_string()))
        );
        assert_eq!(
            state.set_option_value("size", "red"),
            Err(CoreError::ValueNotInOption {
                option_id: "size".to_string(),
                value_id: "red".to_string(),
            })
        );
        assert!(state.selection().is_empty());
    }

    #[test]
    fn test_clear_option_value() {
        let mut state = red_s_out_red_m_in();
        state.initialize(Some("red-m")).unwrap();

        state.clear_option_value("size").unwrap();
        assert_eq!(state.status(), SelectionStatus::Partial);
        assert!(state.clear_option_value("material").is_err());
    }

    #[test]
    fn test_variant_price_overrides() {
        let mut state = apparel(vec![
            Variant::new("red-m", "TEE-RED-M", 5)
                .with_pair("color", "red")
                .with_pair("size", "m")
                .with_price(Money::from_minor(120000)),
            Variant::new("red-l", "TEE-RED-L", 5)
                .with_pair("color", "red")
                .with_pair("size", "l")
                .with_price(Money::from_minor(120000))
                .with_sale_price(Money::from_minor(90000)),
        ]);

        state.initialize(Some("red-m")).unwrap();
        assert_eq!(state.effective_price(), Money::from_minor(120000));
        assert_eq!(state.compare_at_price(), None);

        state.set_option_value("size", "l").unwrap();
        assert_eq!(state.effective_price(), Money::from_minor(90000));
        assert_eq!(state.compare_at_price(), Some(Money::from_minor(120000)));
    }

    #[test]
    fn test_view_is_sorted_and_flags_availability() {
        let mut state = red_s_out_red_m_in();
        state.set_option_value("color", "red").unwrap();
        let view = state.view();

        let option_ids: Vec<&str> = view.options.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(option_ids, vec!["color", "size"]);

        let color = &view.options[0];
        assert_eq!(color.display_style, DisplayStyle::Swatch);
        assert_eq!(color.selected_value_id.as_deref(), Some("red"));
        let colors: Vec<(&str, bool, bool)> = color
            .values
            .iter()
            .map(|v| (v.id.as_str(), v.selected, v.available))
            .collect();
        // blue: with size=s held fixed no blue variant exists
        assert_eq!(colors, vec![("red", true, true), ("blue", false, false)]);

        let sizes: Vec<(&str, bool)> = view.options[1]
            .values
            .iter()
            .map(|v| (v.id.as_str(), v.available))
            .collect();
        assert_eq!(sizes, vec![("s", true), ("m", true), ("l", false)]);

        // Auto-filled to the first red variant
        assert_eq!(view.variant_id.as_deref(), Some("red-s"));
        assert_eq!(view.status, SelectionStatus::Resolved);
    }

    #[test]
    fn test_checkout_line_for_variant() {
        let mut state = red_s_out_red_m_in();
        state.initialize(Some("red-m")).unwrap();
        state.set_quantity(2);

        let line = state.checkout_line().unwrap();
        assert_eq!(line.variant_id.as_deref(), Some("red-m"));
        assert_eq!(line.sku.as_deref(), Some("TEE-RED-M"));
        assert_eq!(line.quantity, 2);
        assert_eq!(line.unit_price, Money::from_minor(80000));
        assert_eq!(line.line_total, Money::from_minor(160000));
    }

    #[test]
    fn test_sessions_are_independent() {
        let index = Arc::new(red_s_out_red_m_in().index().clone());
        let mut first = SelectionState::new(Arc::clone(&index));
        let second = SelectionState::new(index);

        first.initialize(Some("red-m")).unwrap();
        assert_eq!(first.status(), SelectionStatus::Purchasable);
        assert_eq!(second.status(), SelectionStatus::Uninitialized);
    }
}
