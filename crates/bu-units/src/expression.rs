//! Unit expression: an ordered product of terms.

use bu_core::FormatVersion;
use bu_core::numeric::Real;
use tracing::debug;

use crate::error::{UnitError, UnitResult};
use crate::kind::Kind;
use crate::merge::{can_merge, merge_unchecked};
use crate::term::UnitTerm;

/// Ordered product of [`UnitTerm`]s, owned by one container.
///
/// An empty expression means "no units declared" and is different from a
/// single dimensionless term.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitExpression {
    terms: Vec<UnitTerm>,
    format: FormatVersion,
}

impl UnitExpression {
    pub fn new(format: FormatVersion) -> Self {
        Self {
            terms: Vec::new(),
            format,
        }
    }

    pub fn from_terms(format: FormatVersion, terms: impl IntoIterator<Item = UnitTerm>) -> Self {
        Self {
            terms: terms.into_iter().collect(),
            format,
        }
    }

    /// One-term expression in the term's own format version.
    pub fn single(term: UnitTerm) -> Self {
        let format = term.format_version();
        Self {
            terms: vec![term],
            format,
        }
    }

    /// The sole `invalid` term.
    pub fn invalid(format: FormatVersion) -> Self {
        Self::single(UnitTerm::invalid(format))
    }

    pub fn format_version(&self) -> FormatVersion {
        self.format
    }

    pub fn terms(&self) -> &[UnitTerm] {
        &self.terms
    }

    pub(crate) fn terms_mut(&mut self) -> &mut Vec<UnitTerm> {
        &mut self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, UnitTerm> {
        self.terms.iter()
    }

    pub fn get(&self, index: usize) -> Option<&UnitTerm> {
        self.terms.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut UnitTerm> {
        self.terms.get_mut(index)
    }

    /// Append a term. The expression takes ownership; push a clone to keep
    /// using the original.
    pub fn push(&mut self, term: UnitTerm) -> &mut Self {
        self.terms.push(term);
        self
    }

    /// Append a fresh identity term of `kind`.
    pub fn push_kind(&mut self, kind: Kind) -> UnitResult<&mut Self> {
        let term = UnitTerm::of(kind, self.format)?;
        Ok(self.push(term))
    }

    pub fn remove(&mut self, index: usize) -> Option<UnitTerm> {
        (index < self.terms.len()).then(|| self.terms.remove(index))
    }

    pub fn clear(&mut self) {
        self.terms.clear();
    }

    /// Reports the first term whose format version differs from the
    /// expression's.
    pub fn check_versions(&self) -> UnitResult<()> {
        match self.terms.iter().find(|t| t.format_version() != self.format) {
            Some(t) => Err(UnitError::VersionMismatch {
                expected: self.format,
                found: t.format_version(),
            }),
            None => Ok(()),
        }
    }

    /// True if the simplified form is the sole `invalid` term.
    pub fn is_invalid(&self) -> bool {
        let simplified = crate::simplify::simplified(self);
        simplified.len() == 1 && simplified.terms[0].is_invalid()
    }

    /// True for a single identity term of a kind legal in this version.
    pub fn is_unit_kind(&self) -> bool {
        match self.terms.as_slice() {
            [t] => {
                t.kind().is_defined_in(self.format)
                    && t.exponent() == 1.0
                    && t.scale() == 0
                    && t.multiplier() == 1.0
                    && t.offset() == 0.0
            }
            _ => false,
        }
    }

    /// Multiply by `other` in place.
    ///
    /// Each incoming term merges into the last mergeable term already
    /// present. A dimensionless partner is taken out and the merged term is
    /// appended instead, so the physical kind survives.
    pub fn multiply_with(&mut self, other: &UnitExpression) -> &mut Self {
        debug!(lhs = %self, rhs = %other, "multiplying unit expressions");
        for incoming in &other.terms {
            let mut incoming = incoming.clone();
            match self.terms.iter().rposition(|t| can_merge(t, &incoming)) {
                Some(i) if self.terms[i].is_dimensionless() => {
                    let dimensionless = self.terms.remove(i);
                    merge_unchecked(&mut incoming, &dimensionless);
                    self.terms.push(incoming);
                }
                Some(i) => merge_unchecked(&mut self.terms[i], &incoming),
                None => self.terms.push(incoming),
            }
        }
        self
    }

    /// Divide by `other` in place.
    pub fn divide_by(&mut self, other: &UnitExpression) -> &mut Self {
        let mut inverse = other.clone();
        inverse.invert();
        self.multiply_with(&inverse)
    }

    /// Raise every term to `exponent`; terms ending up with exponent zero are
    /// dropped.
    pub fn raise_to_power(&mut self, exponent: Real) -> &mut Self {
        for t in &mut self.terms {
            let e = t.exponent() * exponent;
            t.set_exponent_unchecked(e);
        }
        self.terms.retain(|t| t.exponent() != 0.0);
        self
    }

    /// Negate every exponent.
    pub fn invert(&mut self) -> &mut Self {
        for t in &mut self.terms {
            let e = -t.exponent();
            t.set_exponent_unchecked(e);
        }
        self
    }
}

impl<'a> IntoIterator for &'a UnitExpression {
    type Item = &'a UnitTerm;
    type IntoIter = std::slice::Iter<'a, UnitTerm>;

    fn into_iter(self) -> Self::IntoIter {
        self.terms.iter()
    }
}

impl IntoIterator for UnitExpression {
    type Item = UnitTerm;
    type IntoIter = std::vec::IntoIter<UnitTerm>;

    fn into_iter(self) -> Self::IntoIter {
        self.terms.into_iter()
    }
}

/// `a * b` without touching either operand.
pub fn product(a: &UnitExpression, b: &UnitExpression) -> UnitExpression {
    let mut out = a.clone();
    out.multiply_with(b);
    out
}

/// `a / b` without touching either operand.
pub fn quotient(a: &UnitExpression, b: &UnitExpression) -> UnitExpression {
    let mut out = a.clone();
    out.divide_by(b);
    out
}

/// `e^exponent` without touching the operand.
pub fn power(e: &UnitExpression, exponent: Real) -> UnitExpression {
    let mut out = e.clone();
    out.raise_to_power(exponent);
    out
}
