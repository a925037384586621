//! Elementary unit term: one factor `(multiplier * 10^scale * kind)^exponent`.

use bu_core::numeric::{LOG10_NOISE, Real, ensure_finite, pow10, snap_i32};
use bu_core::FormatVersion;

use crate::error::{UnitError, UnitResult};
use crate::kind::Kind;

/// Attributes that only exist in old format versions.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LegacyAttributes {
    /// Additive offset, applied before the exponent (L2V1 only).
    pub offset: Real,
}

/// One factor of a unit product.
///
/// A term is plain owned data; cloning copies every attribute together with
/// the format version. Terms are never shared between expressions.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitTerm {
    kind: Kind,
    exponent: Real,
    scale: i32,
    multiplier: Real,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    legacy: Option<LegacyAttributes>,
    format: FormatVersion,
}

impl UnitTerm {
    /// Term of the given kind with identity exponent, scale and multiplier.
    pub fn of(kind: Kind, format: FormatVersion) -> UnitResult<Self> {
        check_kind(kind, format)?;
        Ok(Self::raw(kind, 1.0, 0, 1.0, format))
    }

    /// Fully specified term, validated against `format`.
    pub fn new(
        kind: Kind,
        exponent: Real,
        scale: i32,
        multiplier: Real,
        format: FormatVersion,
    ) -> UnitResult<Self> {
        check_kind(kind, format)?;
        ensure_finite(exponent, "exponent")?;
        check_multiplier(multiplier, format)?;
        Ok(Self::raw(kind, exponent, scale, multiplier, format))
    }

    /// The unresolved-unit sentinel.
    pub fn invalid(format: FormatVersion) -> Self {
        Self::raw(Kind::Invalid, 1.0, 0, 1.0, format)
    }

    pub fn dimensionless(format: FormatVersion) -> Self {
        Self::raw(Kind::Dimensionless, 1.0, 0, 1.0, format)
    }

    /// Unchecked constructor for values produced by the algebra itself.
    pub(crate) fn raw(
        kind: Kind,
        exponent: Real,
        scale: i32,
        multiplier: Real,
        format: FormatVersion,
    ) -> Self {
        Self {
            kind,
            exponent,
            scale,
            multiplier,
            legacy: None,
            format,
        }
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn exponent(&self) -> Real {
        self.exponent
    }

    pub fn scale(&self) -> i32 {
        self.scale
    }

    pub fn multiplier(&self) -> Real {
        self.multiplier
    }

    /// Legacy offset, `0.0` when none is set.
    pub fn offset(&self) -> Real {
        self.legacy.map_or(0.0, |l| l.offset)
    }

    pub fn legacy(&self) -> Option<LegacyAttributes> {
        self.legacy
    }

    pub fn format_version(&self) -> FormatVersion {
        self.format
    }

    /// Change the kind. Fails without side effects if `kind` is not legal in
    /// this term's format version; `Invalid` is always accepted.
    pub fn set_kind(&mut self, kind: Kind) -> UnitResult<()> {
        check_kind(kind, self.format)?;
        self.kind = kind;
        Ok(())
    }

    pub fn set_exponent(&mut self, exponent: Real) -> UnitResult<()> {
        ensure_finite(exponent, "exponent")?;
        self.exponent = exponent;
        Ok(())
    }

    pub fn set_scale(&mut self, scale: i32) {
        self.scale = scale;
    }

    /// Level 1 has no multiplier attribute; only the identity is accepted there.
    pub fn set_multiplier(&mut self, multiplier: Real) -> UnitResult<()> {
        check_multiplier(multiplier, self.format)?;
        self.multiplier = multiplier;
        Ok(())
    }

    /// The offset attribute exists only in L2V1.
    pub fn set_offset(&mut self, offset: Real) -> UnitResult<()> {
        if self.format != FormatVersion::L2V1 {
            return Err(UnitError::not_available("offset", self.format));
        }
        ensure_finite(offset, "offset")?;
        self.legacy = Some(LegacyAttributes { offset });
        Ok(())
    }

    pub fn unset_offset(&mut self) {
        self.legacy = None;
    }

    pub(crate) fn set_kind_unchecked(&mut self, kind: Kind) {
        self.kind = kind;
    }

    pub(crate) fn set_exponent_unchecked(&mut self, exponent: Real) {
        self.exponent = exponent;
    }

    pub(crate) fn set_multiplier_unchecked(&mut self, multiplier: Real) {
        self.multiplier = multiplier;
    }

    pub(crate) fn set_legacy_offset(&mut self, offset: Real) {
        self.legacy = Some(LegacyAttributes { offset });
    }

    pub fn is_dimensionless(&self) -> bool {
        self.kind == Kind::Dimensionless
    }

    pub fn is_invalid(&self) -> bool {
        self.kind == Kind::Invalid
    }

    /// `kind` up to legacy spellings.
    pub fn is(&self, kind: Kind) -> bool {
        Kind::are_equivalent(self.kind, kind)
    }

    /// `multiplier * 10^scale`, the factor inside the exponent.
    pub fn prefactor(&self) -> Real {
        self.multiplier * pow10(self.scale as Real)
    }

    /// Move the scale into the multiplier so that the scale becomes zero.
    ///
    /// 1 mm is either `(1 * 10^-3 * metre)^1` or `(0.001 * metre)^1`.
    pub fn remove_scale(&mut self) -> &mut Self {
        if self.scale != 0 {
            self.multiplier *= pow10(self.scale as Real);
            self.scale = 0;
        }
        self
    }

    /// Move a power-of-ten multiplier into the scale.
    ///
    /// Multipliers that are not an exact power of ten (within
    /// [`LOG10_NOISE`]) are left alone, as are shifts that would overflow
    /// the scale.
    pub fn remove_multiplier(&mut self) -> &mut Self {
        if self.multiplier != 1.0 && self.multiplier > 0.0 {
            let shifted = snap_i32(self.multiplier.log10(), LOG10_NOISE)
                .and_then(|shift| self.scale.checked_add(shift));
            if let Some(scale) = shifted {
                self.scale = scale;
                self.multiplier = 1.0;
            }
        }
        self
    }

    /// Fold the legacy offset into the multiplier:
    /// `m' = offset / 10^scale + m`.
    pub fn remove_offset(&mut self) -> &mut Self {
        let offset = self.offset();
        if offset != 0.0 {
            self.multiplier += offset / pow10(self.scale as Real);
        }
        self.legacy = None;
        self
    }
}

fn check_kind(kind: Kind, format: FormatVersion) -> UnitResult<()> {
    if kind == Kind::Invalid || kind.is_defined_in(format) {
        Ok(())
    } else {
        Err(UnitError::invalid_kind(kind, format))
    }
}

fn check_multiplier(multiplier: Real, format: FormatVersion) -> UnitResult<()> {
    ensure_finite(multiplier, "multiplier")?;
    if format.level < 2 && multiplier != 1.0 {
        return Err(UnitError::not_available("multiplier", format));
    }
    Ok(())
}
