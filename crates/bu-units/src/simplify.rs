//! Normalizer: canonical order, merged kinds, no absorbable dimensionless
//! terms.

use std::cmp::Ordering;

use bu_core::FormatVersion;
use bu_core::numeric::{Real, exact_i32};
use tracing::trace;

use crate::expression::UnitExpression;
use crate::kind::Kind;
use crate::merge::{can_merge, merge_unchecked};
use crate::term::UnitTerm;

impl UnitExpression {
    /// Bring the expression into canonical form in place.
    ///
    /// Terms are sorted by kind (ties broken by exponent, scale, multiplier
    /// and offset, so that the result does not depend on the input order),
    /// neighbours that can merge are merged right
    /// to left, leading dimensionless terms are folded into their successor
    /// and powers of ten are moved towards the front where that makes them
    /// easier to read. An expression containing `invalid` collapses to the
    /// sole `invalid` term. Running this twice changes nothing.
    pub fn simplify(&mut self) -> &mut Self {
        let format = self.format_version();
        normalize(self.terms_mut(), format);
        self
    }

    pub fn reorder(&mut self) -> &mut Self {
        self.terms_mut().sort_by(canonical_order);
        self
    }
}

/// Simplified copy of `e`.
pub fn simplified(e: &UnitExpression) -> UnitExpression {
    let mut out = e.clone();
    out.simplify();
    out
}

fn normalize(terms: &mut Vec<UnitTerm>, format: FormatVersion) {
    if terms.is_empty() {
        return;
    }
    if terms.iter().any(UnitTerm::is_invalid) {
        terms.clear();
        terms.push(UnitTerm::invalid(format));
        return;
    }

    terms.sort_by(canonical_order);
    merge_neighbours(terms);

    while terms.len() > 1 && terms[0].is_dimensionless() {
        let dimensionless = terms.remove(0);
        merge_unchecked(&mut terms[0], &dimensionless);
    }

    while redistribute_scales(terms) {}
}

/// Total order on terms. Equal only for terms with the same attributes,
/// which makes merge order, and with it float rounding, a function of the
/// multiset of terms alone.
fn canonical_order(a: &UnitTerm, b: &UnitTerm) -> Ordering {
    a.kind()
        .cmp(&b.kind())
        .then_with(|| a.exponent().total_cmp(&b.exponent()))
        .then_with(|| a.scale().cmp(&b.scale()))
        .then_with(|| a.multiplier().total_cmp(&b.multiplier()))
        .then_with(|| a.offset().total_cmp(&b.offset()))
}

fn merge_neighbours(terms: &mut Vec<UnitTerm>) {
    for i in (0..terms.len().saturating_sub(1)).rev() {
        if !can_merge(&terms[i], &terms[i + 1]) {
            continue;
        }
        if terms[i + 1].is_dimensionless() {
            let trailing = terms.remove(i + 1);
            merge_unchecked(&mut terms[i], &trailing);
        } else {
            let leading = terms.remove(i);
            merge_unchecked(&mut terms[i], &leading);
        }
    }
}

/// One right-to-left pass moving a neighbour's power of ten onto the
/// preceding term. Returns whether anything moved.
///
/// `(10^s1 u)^e1 * (10^s2 v)^e2` becomes `(10^(s1 + s2*e2/e1) u)^e1 * v^e2`
/// when the new scale is an integer and the two decades point in opposite
/// directions. The first pair is only touched when both scales are set.
fn redistribute_scales(terms: &mut [UnitTerm]) -> bool {
    let mut moved = false;
    for i in (0..terms.len().saturating_sub(1)).rev() {
        let (u, v) = (&terms[i], &terms[i + 1]);
        if Kind::are_equivalent(u.kind(), v.kind())
            || u.is_dimensionless()
            || v.is_dimensionless()
            || u.is_invalid()
            || v.is_invalid()
        {
            continue;
        }
        let p1 = u.scale() as Real * u.exponent();
        let p2 = v.scale() as Real * v.exponent();
        if p2 == 0.0 || u.exponent() == 0.0 || sign(p1) == sign(p2) {
            continue;
        }
        if !(i > 1 || (u.scale() != 0 && v.scale() != 0)) {
            continue;
        }
        if let Some(scale) = exact_i32(u.scale() as Real + p2 / u.exponent()) {
            trace!(index = i, scale, "moving scale onto preceding term");
            terms[i].set_scale(scale);
            terms[i + 1].set_scale(0);
            moved = true;
        }
    }
    moved
}

fn sign(v: Real) -> Ordering {
    v.partial_cmp(&0.0).unwrap_or(Ordering::Equal)
}
