//! # Money Module
//!
//! Provides the `Money` type used for base prices, variant price overrides
//! and sale prices.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Catalog prices arrive as integers in the smallest currency unit.      │
//! │  Currencies without minor units (e.g. VND) simply use 1 = 1 unit.       │
//! │                                                                         │
//! │    price_override 100000  ──►  Money(100000)                            │
//! │    sale_price      80000  ──►  Money(80000)                             │
//! │                                                                         │
//! │  Formatting (symbols, separators, decimals) belongs to the             │
//! │  presentation layer; Money has no Display impl.                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use variant_core::money::Money;
//!
//! let unit = Money::from_minor(80000);
//! let line = unit.multiply_quantity(3);
//! assert_eq!(line.minor(), 240000);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit.
///
/// ## Where Money is Used
/// ```text
/// ProductBase.price ──┬──► effective price ──► SelectionView.price
///                     │
/// Variant.price ──────┤
/// Variant.sale_price ─┘                   └──► CheckoutLine.unit_price
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from minor units.
    #[inline]
    pub const fn from_minor(minor: i64) -> Self {
        Money(minor)
    }

    /// Returns the value in minor units.
    #[inline]
    pub const fn minor(&self) -> i64 {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    ///
    /// Catalog validation rejects negative prices; this is the check it uses.
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use variant_core::money::Money;
    ///
    /// let unit_price = Money::from_minor(299);
    /// assert_eq!(unit_price.multiply_quantity(3).minor(), 897);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Used to compute the saving shown next to a struck-through price.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
