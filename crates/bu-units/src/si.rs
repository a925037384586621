//! SI reduction: rewrite every term using base SI kinds only.

use bu_core::numeric::{Real, pow10};
use tracing::debug;

use crate::expression::UnitExpression;
use crate::kind::Kind;
use crate::term::UnitTerm;

/// Avogadro constant, exact since the 2019 SI redefinition.
pub const AVOGADRO_NUMBER: Real = 6.022_140_76e23;

/// Offset between the Celsius and Kelvin scales.
pub const CELSIUS_OFFSET: Real = 273.15;

/// Which kinds the reduction leaves alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SiTarget {
    /// Everything down to base SI kinds.
    #[default]
    Full,
    /// Keep `item` and `gram` so that substance stays recognisable.
    KeepSubstance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SiOptions {
    pub target: SiTarget,
    /// Run the normalizer on the result.
    pub simplify: bool,
}

impl Default for SiOptions {
    fn default() -> Self {
        Self {
            target: SiTarget::Full,
            simplify: true,
        }
    }
}

impl SiOptions {
    pub fn keep_substance() -> Self {
        Self {
            target: SiTarget::KeepSubstance,
            ..Self::default()
        }
    }

    pub fn unreduced(self) -> Self {
        Self {
            simplify: false,
            ..self
        }
    }
}

/// How one kind expands: base factors with their exponents, plus a power
/// of ten the kind itself carries (`litre` is `10^-3 metre^3`).
struct Expansion {
    factors: &'static [(Kind, Real)],
    decades: i32,
}

const fn exp(factors: &'static [(Kind, Real)]) -> Expansion {
    Expansion { factors, decades: 0 }
}

fn expansion(kind: Kind) -> Expansion {
    use Kind::*;
    match kind {
        Becquerel | Hertz => exp(&[(Second, -1.0)]),
        Coulomb => exp(&[(Ampere, 1.0), (Second, 1.0)]),
        Farad => exp(&[(Kilogram, -1.0), (Metre, -2.0), (Second, 4.0), (Ampere, 2.0)]),
        Gram => Expansion {
            factors: &[(Kilogram, 1.0)],
            decades: -3,
        },
        Gray | Sievert => exp(&[(Metre, 2.0), (Second, -2.0)]),
        Henry => exp(&[(Kilogram, 1.0), (Metre, 2.0), (Second, -2.0), (Ampere, -2.0)]),
        Joule => exp(&[(Kilogram, 1.0), (Metre, 2.0), (Second, -2.0)]),
        Katal => exp(&[(Mole, 1.0), (Second, -1.0)]),
        Liter | Litre => Expansion {
            factors: &[(Metre, 3.0)],
            decades: -3,
        },
        Lumen => exp(&[(Candela, 1.0)]),
        Lux => exp(&[(Candela, 1.0), (Metre, -2.0)]),
        Meter => exp(&[(Metre, 1.0)]),
        Newton => exp(&[(Kilogram, 1.0), (Metre, 1.0), (Second, -2.0)]),
        Ohm => exp(&[(Kilogram, 1.0), (Metre, 2.0), (Second, -3.0), (Ampere, -2.0)]),
        Pascal => exp(&[(Kilogram, 1.0), (Metre, -1.0), (Second, -2.0)]),
        Siemens => exp(&[(Kilogram, -1.0), (Metre, -2.0), (Second, 3.0), (Ampere, 2.0)]),
        Tesla => exp(&[(Kilogram, 1.0), (Second, -2.0), (Ampere, -1.0)]),
        Volt => exp(&[(Kilogram, 1.0), (Metre, 2.0), (Second, -3.0), (Ampere, -1.0)]),
        Watt => exp(&[(Kilogram, 1.0), (Metre, 2.0), (Second, -3.0)]),
        Weber => exp(&[(Kilogram, 1.0), (Metre, 2.0), (Second, -2.0), (Ampere, -1.0)]),
        Item | Radian | Steradian => exp(&[(Dimensionless, 1.0)]),
        // Base kinds, dimensionless, and kinds handled before the table.
        Ampere | Avogadro | Candela | Celsius | Dimensionless | Invalid | Kelvin | Kilogram
        | Metre | Mole | Second => exp(&[]),
    }
}

/// Expand one term into base SI kinds.
///
/// The magnitude `m * 10^s` of the term is carried by the first factor of
/// the expansion; the remaining factors are identity terms.
pub fn expand_term(term: &UnitTerm, target: SiTarget) -> Vec<UnitTerm> {
    let format = term.format_version();
    let kind = term.kind();

    if target == SiTarget::KeepSubstance && matches!(kind, Kind::Item | Kind::Gram) {
        return vec![term.clone()];
    }

    match kind {
        Kind::Avogadro => {
            let mut t = term.clone();
            t.set_kind_unchecked(Kind::Dimensionless);
            t.set_multiplier_unchecked(term.multiplier() * AVOGADRO_NUMBER);
            return vec![t];
        }
        Kind::Celsius => {
            let mut t = term.clone();
            t.set_kind_unchecked(Kind::Kelvin);
            t.set_legacy_offset(term.offset() + CELSIUS_OFFSET);
            return vec![t];
        }
        _ => {}
    }

    let Expansion { factors, decades } = expansion(kind);
    let Some(((first_kind, first_exp), rest)) = factors.split_first() else {
        return vec![term.clone()];
    };

    let (scale, multiplier) = match term.scale().checked_add(decades) {
        Some(scale) => distribute(scale, term.multiplier(), *first_exp),
        None => {
            let magnitude = term.multiplier() * pow10(term.scale() as Real + decades as Real);
            distribute(0, magnitude, *first_exp)
        }
    };
    let mut out = Vec::with_capacity(factors.len());
    out.push(UnitTerm::raw(
        *first_kind,
        first_exp * term.exponent(),
        scale,
        multiplier,
        format,
    ));
    out.extend(
        rest.iter()
            .map(|(k, e)| UnitTerm::raw(*k, e * term.exponent(), 0, 1.0, format)),
    );
    out
}

/// Rewrite `(m * 10^s)` as `(m' * 10^s')^f`.
fn distribute(scale: i32, multiplier: Real, factor: Real) -> (i32, Real) {
    if factor == 1.0 {
        return (scale, multiplier);
    }
    let f = factor as i32;
    let divided = match scale.checked_rem(f) {
        Some(0) => scale.checked_div(f),
        _ => None,
    };
    if let Some(scale) = divided {
        let m = if multiplier == 1.0 {
            1.0
        } else {
            multiplier.powf(1.0 / factor)
        };
        (scale, m)
    } else {
        (0, (multiplier * pow10(scale as Real)).powf(1.0 / factor))
    }
}

/// SI form of `e` under `options`; `e` itself is untouched.
pub fn to_si(e: &UnitExpression, options: SiOptions) -> UnitExpression {
    let format = e.format_version();
    let terms = e.iter().flat_map(|t| expand_term(t, options.target));
    let mut out = UnitExpression::from_terms(format, terms);
    if options.simplify {
        out.simplify();
    }
    debug!(from = %e, to = %out, ?options, "reduced to SI");
    out
}

impl UnitExpression {
    /// Replace the expression with its simplified SI form.
    pub fn convert_to_si_units(&mut self) -> &mut Self {
        *self = to_si(self, SiOptions::default());
        self
    }

    /// Like [`Self::convert_to_si_units`] but keeps `item` and `gram`.
    pub fn convert_to_si_and_substance_units(&mut self) -> &mut Self {
        *self = to_si(self, SiOptions::keep_substance());
        self
    }
}
