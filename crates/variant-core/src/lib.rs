//! # variant-core: Pure Variant Resolution
//!
//! This crate resolves a shopper's (possibly incomplete) choice of option
//! values against a product's sparse set of variants. Everything here is a
//! pure function over records that were already loaded by a catalog store.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Variant Resolution Data Flow                        │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Catalog Store (variant-db, or any loader)          │   │
//! │  │        options, option values, variants for ONE product         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ ProductCatalog                         │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ variant-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌────────────┐  ┌────────────┐  ┌────────────┐  ┌─────────┐  │   │
//! │  │   │ validation │─►│   index    │─►│  resolve   │◄─│selection│  │   │
//! │  │   │ invariants │  │ sort+maps  │  │ match/recon│  │ session │  │   │
//! │  │   └────────────┘  └────────────┘  └────────────┘  └─────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ SelectionView / CheckoutLine           │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │        Presentation adapter  →  checkout integration            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Catalog records (ProductOption, OptionValue, Variant, Selection)
//! - [`money`] - Integer money type (no floating point)
//! - [`error`] - Catalog, validation and selection errors
//! - [`validation`] - Catalog invariant checks
//! - [`index`] - Per-load lookup tables
//! - [`resolve`] - The resolution engine (exact, partial, availability, reconcile)
//! - [`selection`] - Per-session selection state and its derived view
//!
//! ## Example Usage
//!
//! ```rust
//! use variant_core::resolve::{match_exact, match_partial};
//! use variant_core::types::{Selection, Variant};
//!
//! let variants = vec![
//!     Variant::new("v-red-m", "TEE-RED-M", 5)
//!         .with_pair("color", "red")
//!         .with_pair("size", "m"),
//! ];
//!
//! let mut selection = Selection::new();
//! selection.set("color", "red");
//!
//! // Incomplete: a preview variant exists, nothing is purchasable yet
//! assert!(match_partial(&variants, &selection).is_some());
//! assert!(match_exact(&variants, &selection).is_none());
//!
//! selection.set("size", "m");
//! assert_eq!(match_exact(&variants, &selection).map(|v| v.id.as_str()), Some("v-red-m"));
//! ```
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: variant list order is authoritative, first match wins
//! 2. **No I/O**: loading and checkout live outside this crate
//! 3. **Integer Money**: prices are minor currency units (i64)
//! 4. **No faults for "no match"**: unresolved selections are `None`/`false`

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod index;
pub mod money;
pub mod resolve;
pub mod selection;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CatalogError, CoreError, CoreResult, ValidationError};
pub use index::CatalogIndex;
pub use money::Money;
pub use selection::{CheckoutLine, SelectionState, SelectionStatus, SelectionView};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Smallest quantity a selection can request.
///
/// ## Business Reason
/// A session always asks for at least one unit; "zero" is expressed by
/// discarding the session, not by a quantity.
pub const MIN_QUANTITY: i64 = 1;

/// Maximum length of a SKU accepted by catalog validation.
pub const MAX_SKU_LEN: usize = 64;
