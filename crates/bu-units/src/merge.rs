//! Combining two terms into one.
//!
//! A term stands for `(m * 10^s * k)^e`. Multiplying
//! `(m1 * 10^s1 * k)^e1` by `(m2 * 10^s2 * k)^e2` gives
//!
//! ```text
//! (m1^(e1/E) * m2^(e2/E) * 10^((s1*e1 + s2*e2)/E) * k)^E,   E = e1 + e2
//! ```
//!
//! A dimensionless factor adds nothing to `E` but its magnitude is kept.
//! The scale must stay an integer; when `(s1*e1 + s2*e2)/E` is not one the
//! whole power of ten is folded into the multiplier instead.

use bu_core::numeric::{Real, exact_i32, pow10};
use tracing::trace;

use crate::error::{UnitError, UnitResult};
use crate::kind::Kind;
use crate::term::UnitTerm;

/// Whether two terms can collapse into one.
///
/// True for equivalent kinds, and whenever either side is dimensionless or
/// invalid.
pub fn can_merge(a: &UnitTerm, b: &UnitTerm) -> bool {
    Kind::are_equivalent(a.kind(), b.kind())
        || a.is_dimensionless()
        || b.is_dimensionless()
        || a.is_invalid()
        || b.is_invalid()
}

/// Multiply `other` into `target` in place.
///
/// Fails with [`UnitError::InvalidUnitCombination`] (leaving `target`
/// untouched) when the kinds cannot be merged.
pub fn merge(target: &mut UnitTerm, other: &UnitTerm) -> UnitResult<()> {
    if !can_merge(target, other) {
        return Err(UnitError::InvalidUnitCombination {
            what: format!(
                "cannot merge '{}' with '{}': kinds must match or one side must be dimensionless",
                target.kind(),
                other.kind()
            ),
        });
    }
    merge_unchecked(target, other);
    Ok(())
}

/// [`merge`] for callers that already checked [`can_merge`].
pub(crate) fn merge_unchecked(target: &mut UnitTerm, other: &UnitTerm) {
    let format = target.format_version();
    trace!(target = %target.kind(), other = %other.kind(), "merging unit terms");

    if target.is_invalid() || other.is_invalid() {
        *target = UnitTerm::invalid(format);
        return;
    }

    let mut a = target.clone();
    a.remove_offset();
    let mut b = other.clone();
    b.remove_offset();

    let kind = if a.is_dimensionless() { b.kind() } else { a.kind() }.modern_spelling();
    let dim_a = if a.is_dimensionless() { 0.0 } else { a.exponent() };
    let dim_b = if b.is_dimensionless() { 0.0 } else { b.exponent() };
    let exponent = dim_a + dim_b;

    // Total magnitude split into a power of ten and a remaining factor.
    let decades = a.scale() as Real * a.exponent() + b.scale() as Real * b.exponent();
    let factor = a.multiplier().powf(a.exponent()) * b.multiplier().powf(b.exponent());

    let merged = if exponent == 0.0 {
        // Everything cancelled: keep the magnitude on a dimensionless term.
        let (scale, multiplier) = match exact_i32(decades) {
            Some(s) => (s, factor),
            None => (0, factor * pow10(decades)),
        };
        UnitTerm::raw(Kind::Dimensionless, 1.0, scale, multiplier, format)
    } else {
        let (scale, multiplier) = match exact_i32(decades / exponent) {
            Some(s) => (s, root(factor, exponent)),
            None => (0, root(factor * pow10(decades), exponent)),
        };
        UnitTerm::raw(kind, exponent, scale, multiplier, format)
    };

    *target = merged;
    target.remove_multiplier();
}

/// `value^(1/exponent)`, exact for the identity.
fn root(value: Real, exponent: Real) -> Real {
    if value == 1.0 || exponent == 1.0 {
        value
    } else {
        value.powf(1.0 / exponent)
    }
}
