//! # Resolution Engine
//!
//! Pure, stateless functions that match a [`Selection`] against a product's
//! variant list.
//!
//! ## Matching Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Variant v2 = { color: red, size: m }                                   │
//! │                                                                         │
//! │  Selection               consistent?   exact?                          │
//! │  ──────────────────────  ───────────   ──────                          │
//! │  {}                      yes           no   (incomplete)               │
//! │  { color: red }          yes           no   (incomplete)               │
//! │  { color: red, size: m } yes           YES                             │
//! │  { color: red, size: s } no            no                              │
//! │  { color: blue }         no            no                              │
//! │                                                                         │
//! │  consistent = every pair the variant defines agrees with the selection │
//! │               wherever the selection specifies that option             │
//! │  exact      = the variant's pair set equals the selection              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Tie-Breaking
//! The supplied variant order is authoritative. Whenever several variants
//! qualify (partial match, reconciliation) the first in list order wins.
//! This is deterministic, not a relevance guess.
//!
//! ## Failure Semantics
//! Nothing here errors. "No match" is `None`, "unreachable" is `false`.
//! An empty variant list makes every lookup `None`/`false`.

use crate::types::{Selection, Variant};

/// Why a reconciliation produced the selection it did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// The selection already addressed a variant; kept as is.
    Exact,
    /// No exact variant; the selection was replaced by the pairs of the first
    /// variant consistent with it.
    AutoFilled { variant_id: String },
    /// Nothing carrying the changed value was consistent with the whole
    /// selection; the pairs of the first variant carrying it were adopted.
    Anchored { variant_id: String },
    /// No variant could be reached; the selection is returned unchanged.
    Unmatched,
}

// =============================================================================
// Consistency
// =============================================================================

/// Returns true if every pair `variant` defines agrees with `selection`
/// wherever `selection` specifies that option.
///
/// Options the selection leaves open impose no constraint, and selection
/// entries for options the variant does not define are ignored.
pub fn is_consistent(variant: &Variant, selection: &Selection) -> bool {
    variant.options.iter().all(|pair| {
        selection
            .get(&pair.option_id)
            .map_or(true, |chosen| chosen == pair.value_id)
    })
}

/// Returns true if `variant`'s pair set equals `selection` exactly.
pub fn is_exact(variant: &Variant, selection: &Selection) -> bool {
    let every_pair_chosen = variant
        .options
        .iter()
        .all(|pair| selection.get(&pair.option_id) == Some(pair.value_id.as_str()));

    every_pair_chosen && selection.iter().all(|(option_id, _)| variant.defines(option_id))
}

// =============================================================================
// Matching
// =============================================================================

/// Returns the first variant, in list order, consistent with `selection`.
///
/// Used to preview a representative variant (image, price range) while the
/// selection is still incomplete.
///
/// ## Example
/// ```rust
/// use variant_core::resolve::match_partial;
/// use variant_core::types::{Selection, Variant};
///
/// let variants = vec![
///     Variant::new("red-s", "RED-S", 0).with_pair("color", "red").with_pair("size", "s"),
///     Variant::new("red-m", "RED-M", 5).with_pair("color", "red").with_pair("size", "m"),
/// ];
/// let selection: Selection = [("color", "red")].into_iter().collect();
///
/// // Both qualify; list order decides
/// assert_eq!(match_partial(&variants, &selection).map(|v| v.id.as_str()), Some("red-s"));
/// ```
pub fn match_partial<'a>(variants: &'a [Variant], selection: &Selection) -> Option<&'a Variant> {
    variants
        .iter()
        .find(|variant| is_consistent(variant, selection))
}

/// Returns the variant whose full pair set equals `selection`.
///
/// `None` when the selection is incomplete or no variant carries exactly
/// that combination. This is the only purchasable result.
pub fn match_exact<'a>(variants: &'a [Variant], selection: &Selection) -> Option<&'a Variant> {
    variants.iter().find(|variant| is_exact(variant, selection))
}

/// Returns true iff some variant is consistent with `selection` after
/// setting `option_id` to `value_id`, every other chosen option held fixed.
///
/// Drives disabling of swatches/buttons that cannot lead to a real variant.
///
/// ## Example
/// ```rust
/// use variant_core::resolve::is_value_available;
/// use variant_core::types::{Selection, Variant};
///
/// let variants = vec![
///     Variant::new("red-m", "RED-M", 5).with_pair("color", "red").with_pair("size", "m"),
///     Variant::new("blue-s", "BLUE-S", 5).with_pair("color", "blue").with_pair("size", "s"),
/// ];
/// let selection: Selection = [("color", "red")].into_iter().collect();
///
/// assert!(is_value_available("size", "m", &selection, &variants));
/// assert!(!is_value_available("size", "s", &selection, &variants));
/// // Changing the option itself is judged against the *other* choices
/// assert!(is_value_available("color", "blue", &selection, &variants));
/// ```
pub fn is_value_available(
    option_id: &str,
    value_id: &str,
    selection: &Selection,
    variants: &[Variant],
) -> bool {
    let hypothetical = selection.with(option_id, value_id);
    variants
        .iter()
        .any(|variant| is_consistent(variant, &hypothetical))
}

// =============================================================================
// Reconciliation
// =============================================================================

/// Keeps a selection from dangling in an unmatched state.
///
/// If `selection` already addresses a variant exactly, it is returned
/// unchanged. Otherwise, if some variant is consistent with it, the whole
/// selection is replaced by the first such variant's complete pair set
/// (auto-filling every other option). If nothing is consistent the
/// selection is returned unchanged.
pub fn reconcile(selection: &Selection, variants: &[Variant]) -> Selection {
    reconcile_detailed(selection, variants).0
}

/// [`reconcile`], also reporting which branch was taken.
pub fn reconcile_detailed(
    selection: &Selection,
    variants: &[Variant],
) -> (Selection, ReconcileOutcome) {
    if match_exact(variants, selection).is_some() {
        return (selection.clone(), ReconcileOutcome::Exact);
    }

    match match_partial(variants, selection) {
        Some(candidate) => (
            Selection::from_variant(candidate),
            ReconcileOutcome::AutoFilled {
                variant_id: candidate.id.clone(),
            },
        ),
        None => (selection.clone(), ReconcileOutcome::Unmatched),
    }
}

/// Reconciles after the user changed `changed_option`.
///
/// The changed option's new value is kept whenever some variant carries it:
///
/// 1. Exact variant for the selection: kept as is (`Exact`)
/// 2. First variant carrying the new value and consistent with the whole
///    selection: adopted (`AutoFilled`)
/// 3. First variant carrying the new value: adopted, older choices give
///    way (`Anchored`)
/// 4. No variant carries the new value: plain [`reconcile`], then the first
///    variant consistent with the new value alone (`Anchored`), then
///    `Unmatched`
///
/// ## Guarantee
/// If any variant is consistent with the changed option's new value, the
/// returned selection addresses a variant exactly. If any variant carries
/// that value, the returned selection keeps it.
///
/// ## Example
/// ```rust
/// use variant_core::resolve::{match_exact, reconcile_change};
/// use variant_core::types::{Selection, Variant};
///
/// let variants = vec![
///     Variant::new("red-s", "RED-S", 1).with_pair("color", "red").with_pair("size", "s"),
///     Variant::new("blue-m", "BLUE-M", 1).with_pair("color", "blue").with_pair("size", "m"),
/// ];
///
/// // red/s -> user picks blue; blue/s does not exist
/// let selection: Selection = [("color", "blue"), ("size", "s")].into_iter().collect();
/// let next = reconcile_change(&selection, "color", &variants);
///
/// assert_eq!(next.get("size"), Some("m"));
/// assert!(match_exact(&variants, &next).is_some());
/// ```
pub fn reconcile_change(
    selection: &Selection,
    changed_option: &str,
    variants: &[Variant],
) -> Selection {
    reconcile_change_detailed(selection, changed_option, variants).0
}

/// [`reconcile_change`], also reporting which branch was taken.
pub fn reconcile_change_detailed(
    selection: &Selection,
    changed_option: &str,
    variants: &[Variant],
) -> (Selection, ReconcileOutcome) {
    if match_exact(variants, selection).is_some() {
        return (selection.clone(), ReconcileOutcome::Exact);
    }

    let Some(changed_value) = selection.get(changed_option) else {
        return reconcile_detailed(selection, variants);
    };
    let carries = |variant: &Variant| variant.value_for(changed_option) == Some(changed_value);

    if let Some(candidate) = variants
        .iter()
        .find(|variant| carries(variant) && is_consistent(variant, selection))
    {
        return (
            Selection::from_variant(candidate),
            ReconcileOutcome::AutoFilled {
                variant_id: candidate.id.clone(),
            },
        );
    }

    if let Some(candidate) = variants.iter().find(|variant| carries(variant)) {
        return anchored(candidate);
    }

    let (reconciled, outcome) = reconcile_detailed(selection, variants);
    if outcome != ReconcileOutcome::Unmatched {
        return (reconciled, outcome);
    }

    let anchor = Selection::new().with(changed_option, changed_value);
    match match_partial(variants, &anchor) {
        Some(candidate) => anchored(candidate),
        None => (reconciled, ReconcileOutcome::Unmatched),
    }
}

fn anchored(candidate: &Variant) -> (Selection, ReconcileOutcome) {
    (
        Selection::from_variant(candidate),
        ReconcileOutcome::Anchored {
            variant_id: candidate.id.clone(),
        },
    )
}

// =============================================================================
// Unit Tests
// =============================================================================
