//! # Error Types
//!
//! Error types for variant-core.
//!
//! ## What Is (and Is Not) an Error
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Outcome Taxonomy                                │
//! │                                                                         │
//! │  Ordinary outcomes (NOT errors, plain return values):                  │
//! │  ├── no variant matches the selection      → None                      │
//! │  ├── value not reachable from selection    → false                     │
//! │  └── quantity out of range                 → clamped                   │
//! │                                                                         │
//! │  Contract violations (errors, this file):                              │
//! │  ├── CatalogError     - loaded records break catalog invariants        │
//! │  ├── ValidationError  - a single field is malformed                    │
//! │  └── CoreError        - a mutator was handed ids the catalog lacks     │
//! │                                                                         │
//! │  variant-db errors (separate crate)                                    │
//! │  └── DbError          - storage failures                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Errors raised by [`SelectionState`](crate::selection::SelectionState)
/// mutators.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// Option id is not part of the loaded catalog.
    #[error("Option not found: {0}")]
    OptionNotFound(String),

    /// Value id is not part of the loaded catalog.
    #[error("Option value not found: {0}")]
    ValueNotFound(String),

    /// Value exists but belongs to a different option.
    ///
    /// ## When This Occurs
    /// - A swatch for "Size" was wired to the "Color" control
    /// - Stale ids after the catalog was reloaded
    #[error("Value {value_id} does not belong to option {option_id}")]
    ValueNotInOption { option_id: String, value_id: String },

    /// Variant id used to seed a session is unknown.
    #[error("Variant not found: {0}")]
    VariantNotFound(String),

    /// Catalog failed its invariants (wraps CatalogError).
    #[error("Invalid catalog: {0}")]
    Catalog(#[from] CatalogError),
}

// =============================================================================
// Catalog Error
// =============================================================================

/// Violations of the catalog invariants, reported by
/// [`validate_catalog`](crate::validation::validate_catalog).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// Two options share an id.
    #[error("Duplicate option id: {0}")]
    DuplicateOption(String),

    /// Two option values share an id.
    #[error("Duplicate option value id: {0}")]
    DuplicateValue(String),

    /// Two variants share an id.
    #[error("Duplicate variant id: {0}")]
    DuplicateVariant(String),

    /// An option value points at an option that does not exist.
    #[error("Option value {value_id} references unknown option {option_id}")]
    OrphanValue { value_id: String, option_id: String },

    /// A variant references an option that does not exist.
    #[error("Variant {variant_id} references unknown option {option_id}")]
    UnknownOption {
        variant_id: String,
        option_id: String,
    },

    /// A variant references a value that does not exist, or that belongs to
    /// another option.
    #[error("Variant {variant_id} references value {value_id} not defined for option {option_id}")]
    UnknownValue {
        variant_id: String,
        option_id: String,
        value_id: String,
    },

    /// A variant defines the same option twice.
    #[error("Variant {variant_id} defines option {option_id} more than once")]
    RepeatedOption {
        variant_id: String,
        option_id: String,
    },

    /// Two variants carry the identical combination of option values.
    ///
    /// ## Why This Matters
    /// A variant's combination is its identity. Two variants with the same
    /// pairs would make exact matching ambiguous.
    #[error("Variants {first} and {second} share the same option combination")]
    DuplicateCombination { first: String, second: String },

    /// A record field failed validation.
    #[error("{record} {id}: {source}")]
    InvalidField {
        record: &'static str,
        id: String,
        #[source]
        source: ValidationError,
    },
}

// =============================================================================
// Validation Error
// =============================================================================

/// Field-level validation errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Invalid format (e.g., SKU with spaces, malformed color code).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Sale price above the price it discounts.
    #[error("sale price {sale} exceeds price {price}")]
    SaleAbovePrice { sale: i64, price: i64 },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
