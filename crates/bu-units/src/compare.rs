//! Identical, equivalent and compatible: three progressively looser
//! relations between unit expressions.

use tracing::trace;

use crate::expression::UnitExpression;
use crate::kind::Kind;
use crate::si::{SiOptions, to_si};
use crate::simplify::simplified;
use crate::term::UnitTerm;

/// Same simplified form, attribute for attribute.
pub fn are_identical(a: &UnitExpression, b: &UnitExpression) -> bool {
    let (a, b) = (simplified(a), simplified(b));
    a.len() == b.len()
        && a.iter().zip(b.iter()).all(|(x, y)| {
            x.kind() == y.kind()
                && x.exponent() == y.exponent()
                && x.scale() == y.scale()
                && x.multiplier() == y.multiplier()
        })
}

/// Same simplified SI form, kinds compared up to legacy spelling.
///
/// Both sides are simplified before the reduction, so identical
/// expressions always reduce to the same SI form.
pub fn are_equivalent(a: &UnitExpression, b: &UnitExpression) -> bool {
    let si = |e: &UnitExpression| to_si(&simplified(e), SiOptions::default());
    let (a, b) = (si(a), si(b));
    let equivalent = a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| terms_equivalent(x, y));
    trace!(lhs = %a, rhs = %b, equivalent, "compared SI forms");
    equivalent
}

fn terms_equivalent(x: &UnitTerm, y: &UnitTerm) -> bool {
    Kind::are_equivalent(x.kind(), y.kind())
        && x.exponent() == y.exponent()
        && x.scale() == y.scale()
        && x.multiplier() == y.multiplier()
}

/// Equivalent, or either side is the unresolved unit.
pub fn are_compatible(a: &UnitExpression, b: &UnitExpression) -> bool {
    a.is_invalid() || b.is_invalid() || are_equivalent(a, b)
}

/// [`are_compatible`] for derived units that may be missing; a missing side
/// counts as unresolved.
pub fn are_compatible_derived(a: Option<&UnitExpression>, b: Option<&UnitExpression>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => are_compatible(a, b),
        _ => true,
    }
}

/// Canonical form of `e`, or `None` when no units are declared.
pub fn derive_units(e: &UnitExpression) -> Option<UnitExpression> {
    (!e.is_empty()).then(|| simplified(e))
}


#[cfg(test)]
mod proptests {
    use super::*;
    use bu_core::FormatVersion;
    use bu_core::numeric::Real;
    use proptest::prelude::*;

    const FV: FormatVersion = FormatVersion::L3V2;

    fn term(kinds: Vec<Kind>) -> impl Strategy<Value = UnitTerm> {
        (
            prop::sample::select(kinds),
            -3_i32..=3,
            prop::sample::select(vec![-6, -3, -1, 0, 0, 2, 3]),
            prop::sample::select(vec![1.0, 1.0, 0.5, 3.0, 7.0, 60.0, 1000.0]),
        )
            .prop_filter("non-zero exponent", |(_, e, _, _)| *e != 0)
            .prop_map(|(kind, e, scale, multiplier)| {
                UnitTerm::raw(kind, e as Real, scale, multiplier, FV)
            })
    }

    fn any_term() -> impl Strategy<Value = UnitTerm> {
        term(Kind::defined_in(FV))
    }

    // Kinds whose SI form is a single term with no power of ten of its own.
    fn plain_term() -> impl Strategy<Value = UnitTerm> {
        let kinds: Vec<Kind> = Kind::defined_in(FV)
            .into_iter()
            .filter(|k| !matches!(k, Kind::Avogadro | Kind::Gram | Kind::Litre))
            .collect();
        (prop::sample::select(kinds), -3_i32..=3)
            .prop_filter("non-zero exponent", |(_, e)| *e != 0)
            .prop_map(|(kind, e)| UnitTerm::raw(kind, e as Real, 0, 1.0, FV))
    }

    fn any_expression() -> impl Strategy<Value = UnitExpression> {
        prop::collection::vec(any_term(), 1..5).prop_map(|terms| UnitExpression::from_terms(FV, terms))
    }

    fn with_permutation() -> impl Strategy<Value = (UnitExpression, UnitExpression)> {
        prop::collection::vec(any_term(), 1..6).prop_flat_map(|terms| {
            let original = UnitExpression::from_terms(FV, terms.clone());
            (Just(original), Just(terms).prop_shuffle())
                .prop_map(|(original, shuffled)| (original, UnitExpression::from_terms(FV, shuffled)))
        })
    }

    proptest! {
        #[test]
        fn equivalence_survives_permutation((e, permuted) in with_permutation()) {
            prop_assert!(are_identical(&e, &permuted));
            prop_assert!(are_equivalent(&e, &permuted));
        }

        #[test]
        fn si_form_is_equivalent(terms in prop::collection::vec(plain_term(), 1..5)) {
            let e = UnitExpression::from_terms(FV, terms);
            let mut si = e.clone();
            si.convert_to_si_units();
            prop_assert!(are_equivalent(&e, &si));
        }

        #[test]
        fn relations_are_nested(a in any_expression(), b in any_expression()) {
            if are_identical(&a, &b) {
                prop_assert!(are_equivalent(&a, &b));
            }
            if are_equivalent(&a, &b) {
                prop_assert!(are_compatible(&a, &b));
            }
        }

        #[test]
        fn invalid_is_compatible(e in any_expression()) {
            let invalid = UnitExpression::invalid(FV);
            prop_assert!(are_compatible(&invalid, &e));
        }
    }
}
