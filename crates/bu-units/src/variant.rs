//! Variant predicates: does an expression measure a given quantity, whatever
//! its prefix or multiplier?
//!
//! From L3V1 on the format also accepts scattered forms such as
//! `metre * radian * metre^2` for a volume. Those are checked on the
//! unreduced SI form, but the normalizer already absorbs dimensionless
//! factors and merges same-kind terms, so in this crate the extra check
//! never changes an answer: L2 expressions of that shape are accepted too.

use core::fmt;

use bu_core::FormatVersion;
use bu_core::numeric::Real;

use crate::error::{UnitError, UnitResult};
use crate::expression::UnitExpression;
use crate::kind::Kind;
use crate::si::{SiOptions, to_si};
use crate::simplify::simplified;
use crate::term::UnitTerm;

/// Quantity classes the model format cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum UnitClass {
    Substance,
    Volume,
    Area,
    Length,
    Time,
    Dimensionless,
    SubstancePerTime,
    SubstancePerArea,
    SubstancePerLength,
    SubstancePerVolume,
}

impl UnitClass {
    pub const ALL: [UnitClass; 10] = [
        UnitClass::Substance,
        UnitClass::Volume,
        UnitClass::Area,
        UnitClass::Length,
        UnitClass::Time,
        UnitClass::Dimensionless,
        UnitClass::SubstancePerTime,
        UnitClass::SubstancePerArea,
        UnitClass::SubstancePerLength,
        UnitClass::SubstancePerVolume,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            UnitClass::Substance => "substance",
            UnitClass::Volume => "volume",
            UnitClass::Area => "area",
            UnitClass::Length => "length",
            UnitClass::Time => "time",
            UnitClass::Dimensionless => "dimensionless",
            UnitClass::SubstancePerTime => "substance per time",
            UnitClass::SubstancePerArea => "substance per area",
            UnitClass::SubstancePerLength => "substance per length",
            UnitClass::SubstancePerVolume => "substance per volume",
        }
    }

    pub fn matches(self, e: &UnitExpression) -> bool {
        match self {
            UnitClass::Substance => is_variant_of_substance(e),
            UnitClass::Volume => is_variant_of_volume(e),
            UnitClass::Area => is_variant_of_area(e),
            UnitClass::Length => is_variant_of_length(e),
            UnitClass::Time => is_variant_of_time(e),
            UnitClass::Dimensionless => is_variant_of_dimensionless(e),
            UnitClass::SubstancePerTime => is_variant_of_substance_per_time(e),
            UnitClass::SubstancePerArea => is_variant_of_substance_per_area(e),
            UnitClass::SubstancePerLength => is_variant_of_substance_per_length(e),
            UnitClass::SubstancePerVolume => is_variant_of_substance_per_volume(e),
        }
    }
}

impl fmt::Display for UnitClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fails with [`UnitError::InvalidUnitCombination`] unless `e` is a variant
/// of `class`.
pub fn expect_class(e: &UnitExpression, class: UnitClass) -> UnitResult<()> {
    if class.matches(e) {
        Ok(())
    } else {
        Err(UnitError::InvalidUnitCombination {
            what: format!("'{e}' is not a variant of {class}"),
        })
    }
}

/// A base kind raised to a fixed power.
#[derive(Clone, Copy)]
struct Power {
    kind: Kind,
    exponent: Real,
}

const LENGTH: Power = Power {
    kind: Kind::Metre,
    exponent: 1.0,
};
const AREA: Power = Power {
    kind: Kind::Metre,
    exponent: 2.0,
};
const VOLUME: Power = Power {
    kind: Kind::Metre,
    exponent: 3.0,
};
const TIME: Power = Power {
    kind: Kind::Second,
    exponent: 1.0,
};

impl Power {
    fn inverse(self) -> Self {
        Power {
            exponent: -self.exponent,
            ..self
        }
    }

    fn accepts(self, t: &UnitTerm) -> bool {
        t.is(self.kind) && t.exponent() == self.exponent && t.offset() == 0.0
    }

    /// Multi-term form: only `self.kind` and dimensionless factors, with the
    /// `self.kind` exponents adding up.
    fn accepts_spread(self, terms: &[&UnitTerm]) -> bool {
        let mut total = 0.0;
        let mut seen = false;
        for t in terms {
            if t.is_dimensionless() {
                continue;
            }
            if !t.is(self.kind) || t.offset() != 0.0 {
                return false;
            }
            total += t.exponent();
            seen = true;
        }
        seen && total == self.exponent
    }
}

/// Simplified SI form, full or substance-preserving.
fn reduced(e: &UnitExpression, keep_substance: bool) -> UnitExpression {
    let options = if keep_substance {
        SiOptions::keep_substance()
    } else {
        SiOptions::default()
    };
    to_si(e, options)
}

fn unreduced(e: &UnitExpression, keep_substance: bool) -> UnitExpression {
    let options = if keep_substance {
        SiOptions::keep_substance()
    } else {
        SiOptions::default()
    };
    to_si(e, options.unreduced())
}

fn allows_spread_forms(fv: FormatVersion) -> bool {
    fv.at_least(3, 1)
}

fn is_variant_of(e: &UnitExpression, power: Power) -> bool {
    let si = reduced(e, false);
    if let [t] = si.terms() {
        if power.accepts(t) {
            return true;
        }
    }
    allows_spread_forms(e.format_version())
        && power.accepts_spread(&unreduced(e, false).iter().collect::<Vec<_>>())
}

pub fn is_variant_of_length(e: &UnitExpression) -> bool {
    is_variant_of(e, LENGTH)
}

pub fn is_variant_of_area(e: &UnitExpression) -> bool {
    is_variant_of(e, AREA)
}

pub fn is_variant_of_volume(e: &UnitExpression) -> bool {
    is_variant_of(e, VOLUME)
}

pub fn is_variant_of_time(e: &UnitExpression) -> bool {
    is_variant_of(e, TIME)
}

/// Kinds that count as an amount of substance in `fv`.
fn is_substance_kind(kind: Kind, fv: FormatVersion) -> bool {
    match kind {
        Kind::Mole | Kind::Item => true,
        Kind::Gram | Kind::Kilogram => fv.at_least(2, 2),
        Kind::Avogadro => fv.level >= 3,
        _ => false,
    }
}

/// Substance exponents other than one are accepted from L3V2 on.
fn substance_exponent_ok(exponent: Real, fv: FormatVersion) -> bool {
    exponent == 1.0 || fv.at_least(3, 2)
}

fn is_substance_term(t: &UnitTerm, fv: FormatVersion) -> bool {
    is_substance_kind(t.kind(), fv) && t.offset() == 0.0 && substance_exponent_ok(t.exponent(), fv)
}

/// Mole, item, gram (L2V2 on) or avogadro (L3 on), with any prefix.
pub fn is_variant_of_substance(e: &UnitExpression) -> bool {
    let fv = e.format_version();

    // Avogadro is dimensionless once reduced; look at it before that.
    if let [t] = simplified(e).terms() {
        if t.kind() == Kind::Avogadro && is_substance_term(t, fv) {
            return true;
        }
    }

    let si = reduced(e, true);
    if let [t] = si.terms() {
        if is_substance_term(t, fv) {
            return true;
        }
    }

    allows_spread_forms(fv) && substance_spread(&unreduced(e, true).iter().collect::<Vec<_>>(), fv)
}

/// Multi-term substance: one substance kind plus dimensionless factors.
fn substance_spread(terms: &[&UnitTerm], fv: FormatVersion) -> bool {
    let mut kind = None;
    let mut total = 0.0;
    for t in terms {
        if t.is_dimensionless() {
            continue;
        }
        if !is_substance_kind(t.kind(), fv) || t.offset() != 0.0 {
            return false;
        }
        match kind {
            None => kind = Some(t.kind()),
            Some(k) if Kind::are_equivalent(k, t.kind()) => {}
            Some(_) => return false,
        }
        total += t.exponent();
    }
    kind.is_some() && substance_exponent_ok(total, fv)
}

fn is_substance_per(e: &UnitExpression, per: Power) -> bool {
    let fv = e.format_version();
    let denominator = per.inverse();

    let si = reduced(e, true);
    if let [a, b] = si.terms() {
        if (is_substance_term(a, fv) && denominator.accepts(b))
            || (is_substance_term(b, fv) && denominator.accepts(a))
        {
            return true;
        }
    }

    if !allows_spread_forms(fv) {
        return false;
    }
    let raw = unreduced(e, true);
    let (substance, rest): (Vec<&UnitTerm>, Vec<&UnitTerm>) = raw
        .iter()
        .partition(|t| is_substance_kind(t.kind(), fv));
    !substance.is_empty() && substance_spread(&substance, fv) && denominator.accepts_spread(&rest)
}

pub fn is_variant_of_substance_per_time(e: &UnitExpression) -> bool {
    is_substance_per(e, TIME)
}

pub fn is_variant_of_substance_per_area(e: &UnitExpression) -> bool {
    is_substance_per(e, AREA)
}

pub fn is_variant_of_substance_per_length(e: &UnitExpression) -> bool {
    is_substance_per(e, LENGTH)
}

pub fn is_variant_of_substance_per_volume(e: &UnitExpression) -> bool {
    is_substance_per(e, VOLUME)
}

/// Dimensionless up to magnitude. The empty expression qualifies.
pub fn is_variant_of_dimensionless(e: &UnitExpression) -> bool {
    if e.is_empty() {
        return true;
    }
    let si = reduced(e, true);
    if let [t] = si.terms() {
        if t.is_dimensionless() {
            return true;
        }
    }
    allows_spread_forms(e.format_version()) && unreduced(e, true).iter().all(UnitTerm::is_dimensionless)
}

impl UnitExpression {
    pub fn is_variant_of_substance(&self) -> bool {
        is_variant_of_substance(self)
    }

    pub fn is_variant_of_volume(&self) -> bool {
        is_variant_of_volume(self)
    }

    pub fn is_variant_of_area(&self) -> bool {
        is_variant_of_area(self)
    }

    pub fn is_variant_of_length(&self) -> bool {
        is_variant_of_length(self)
    }

    pub fn is_variant_of_time(&self) -> bool {
        is_variant_of_time(self)
    }

    pub fn is_variant_of_dimensionless(&self) -> bool {
        is_variant_of_dimensionless(self)
    }

    pub fn is_variant_of_substance_per_time(&self) -> bool {
        is_variant_of_substance_per_time(self)
    }

    pub fn is_variant_of_substance_per_area(&self) -> bool {
        is_variant_of_substance_per_area(self)
    }

    pub fn is_variant_of_substance_per_length(&self) -> bool {
        is_variant_of_substance_per_length(self)
    }

    pub fn is_variant_of_substance_per_volume(&self) -> bool {
        is_variant_of_substance_per_volume(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(kind: Kind, exponent: Real, scale: i32, fv: FormatVersion) -> UnitTerm {
        UnitTerm::new(kind, exponent, scale, 1.0, fv).unwrap()
    }

    fn expr(fv: FormatVersion, terms: impl IntoIterator<Item = UnitTerm>) -> UnitExpression {
        UnitExpression::from_terms(fv, terms)
    }

    const L2: FormatVersion = FormatVersion::L2V4;
    const L3: FormatVersion = FormatVersion::L3V1;

    #[test]
    fn volumes() {
        assert!(is_variant_of_volume(&expr(L2, [t(Kind::Litre, 1.0, -3, L2)])));
        assert!(is_variant_of_volume(&expr(L2, [t(Kind::Metre, 3.0, 0, L2)])));
        assert!(!is_variant_of_volume(&expr(L2, [t(Kind::Metre, 2.0, 0, L2)])));
        assert!(!is_variant_of_volume(&expr(L2, [t(Kind::Litre, 2.0, 0, L2)])));
    }

    #[test]
    fn areas_lengths_times() {
        assert!(is_variant_of_area(&expr(L2, [t(Kind::Metre, 2.0, -2, L2)])));
        assert!(is_variant_of_length(&expr(L2, [t(Kind::Metre, 1.0, 3, L2)])));
        assert!(is_variant_of_time(&expr(L2, [t(Kind::Second, 1.0, 0, L2)])));
        let per_second = expr(L2, [t(Kind::Hertz, -1.0, 0, L2)]);
        assert!(is_variant_of_time(&per_second));
        assert!(!is_variant_of_length(&per_second));
    }

    #[test]
    fn substance_depends_on_version() {
        let gram_l2v1 = expr(FormatVersion::L2V1, [t(Kind::Gram, 1.0, 0, FormatVersion::L2V1)]);
        assert!(!is_variant_of_substance(&gram_l2v1));
        assert!(is_variant_of_substance(&expr(L2, [t(Kind::Gram, 1.0, 0, L2)])));
        assert!(is_variant_of_substance(&expr(L2, [t(Kind::Kilogram, 1.0, 0, L2)])));
        assert!(is_variant_of_substance(&expr(L2, [t(Kind::Mole, 1.0, -6, L2)])));
        assert!(is_variant_of_substance(&expr(L2, [t(Kind::Item, 1.0, 0, L2)])));
        assert!(is_variant_of_substance(&expr(L3, [t(Kind::Avogadro, 1.0, 0, L3)])));
    }

    #[test]
    fn substance_exponent_relaxed_in_l3v2() {
        let v1 = FormatVersion::L3V1;
        let v2 = FormatVersion::L3V2;
        assert!(!is_variant_of_substance(&expr(v1, [t(Kind::Mole, 2.0, 0, v1)])));
        assert!(is_variant_of_substance(&expr(v2, [t(Kind::Mole, 2.0, 0, v2)])));
    }

    #[test]
    fn substance_per_rates() {
        let mol_per_s = expr(L3, [t(Kind::Mole, 1.0, 0, L3), t(Kind::Second, -1.0, 0, L3)]);
        assert!(is_variant_of_substance_per_time(&mol_per_s));
        assert!(!is_variant_of_substance_per_volume(&mol_per_s));

        let molar = expr(L3, [t(Kind::Mole, 1.0, -3, L3), t(Kind::Litre, -1.0, 0, L3)]);
        assert!(is_variant_of_substance_per_volume(&molar));
        assert!(!is_variant_of_substance_per_time(&molar));

        let per_area = expr(L3, [t(Kind::Metre, -2.0, 0, L3), t(Kind::Item, 1.0, 0, L3)]);
        assert!(is_variant_of_substance_per_area(&per_area));
        let per_length = expr(L3, [t(Kind::Metre, -1.0, 0, L3), t(Kind::Mole, 1.0, 0, L3)]);
        assert!(is_variant_of_substance_per_length(&per_length));
    }

    #[test]
    fn dimensionless_variants() {
        assert!(is_variant_of_dimensionless(&UnitExpression::new(L3)));
        assert!(is_variant_of_dimensionless(&expr(L3, [UnitTerm::dimensionless(L3)])));
        assert!(is_variant_of_dimensionless(&expr(L3, [t(Kind::Radian, 1.0, 0, L3)])));
        let ratio = expr(L3, [t(Kind::Metre, 1.0, 0, L3), t(Kind::Metre, -1.0, -3, L3)]);
        assert!(is_variant_of_dimensionless(&ratio));
        assert!(!is_variant_of_dimensionless(&expr(L3, [t(Kind::Item, 1.0, 0, L3)])));
    }

    #[test]
    fn scattered_factors_count_in_every_version() {
        let spread = |fv| {
            expr(
                fv,
                [
                    t(Kind::Metre, 1.0, 0, fv),
                    t(Kind::Radian, 1.0, 0, fv),
                    t(Kind::Metre, 2.0, 0, fv),
                ],
            )
        };
        assert!(is_variant_of_volume(&spread(L3)));
        assert!(is_variant_of_volume(&spread(L2)));
    }

    #[test]
    fn expect_class_reports_mismatch() {
        let metre = expr(L3, [t(Kind::Metre, 1.0, 0, L3)]);
        assert!(expect_class(&metre, UnitClass::Length).is_ok());
        let err = expect_class(&metre, UnitClass::Volume).unwrap_err();
        assert!(matches!(err, UnitError::InvalidUnitCombination { .. }));
        assert!(err.to_string().contains("volume"));
    }

    #[test]
    fn every_class_has_a_member() {
        let samples = [
            (UnitClass::Substance, vec![t(Kind::Mole, 1.0, 0, L3)]),
            (UnitClass::Volume, vec![t(Kind::Litre, 1.0, 0, L3)]),
            (UnitClass::Area, vec![t(Kind::Metre, 2.0, 0, L3)]),
            (UnitClass::Length, vec![t(Kind::Metre, 1.0, 0, L3)]),
            (UnitClass::Time, vec![t(Kind::Second, 1.0, 0, L3)]),
            (UnitClass::Dimensionless, vec![UnitTerm::dimensionless(L3)]),
            (
                UnitClass::SubstancePerTime,
                vec![t(Kind::Mole, 1.0, 0, L3), t(Kind::Second, -1.0, 0, L3)],
            ),
            (
                UnitClass::SubstancePerArea,
                vec![t(Kind::Mole, 1.0, 0, L3), t(Kind::Metre, -2.0, 0, L3)],
            ),
            (
                UnitClass::SubstancePerLength,
                vec![t(Kind::Mole, 1.0, 0, L3), t(Kind::Metre, -1.0, 0, L3)],
            ),
            (
                UnitClass::SubstancePerVolume,
                vec![t(Kind::Mole, 1.0, 0, L3), t(Kind::Litre, -1.0, 0, L3)],
            ),
        ];
        for (class, terms) in samples {
            let e = expr(L3, terms);
            for other in UnitClass::ALL {
                assert_eq!(other.matches(&e), other == class, "{e} as {other}");
            }
        }
    }
}
