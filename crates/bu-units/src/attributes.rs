//! Mapping between terms and the attributes of their serialized element.
//!
//! Which attributes exist, and which may be left out, depends on the format
//! version: level 3 requires all of `kind`, `exponent`, `scale` and
//! `multiplier`; earlier levels fall back to defaults, have no multiplier in
//! level 1, take integer exponents only, and know `offset` in L2V1 alone.

use std::collections::BTreeMap;

use bu_core::FormatVersion;
use bu_core::numeric::{Real, exact_i32};
use tracing::warn;

use crate::error::{UnitError, UnitResult};
use crate::expression::UnitExpression;
use crate::kind::Kind;
use crate::term::UnitTerm;

pub type Attributes = BTreeMap<String, String>;

pub const KIND: &str = "kind";
pub const EXPONENT: &str = "exponent";
pub const SCALE: &str = "scale";
pub const MULTIPLIER: &str = "multiplier";
pub const OFFSET: &str = "offset";

/// Attributes for one term. Defaults are omitted below level 3.
pub fn write_attributes(term: &UnitTerm) -> Attributes {
    let fv = term.format_version();
    let explicit = fv.level >= 3;
    let mut out = Attributes::new();

    out.insert(KIND.to_string(), term.kind().as_str().to_string());

    if explicit {
        out.insert(EXPONENT.to_string(), term.exponent().to_string());
    } else if term.exponent() != 1.0 {
        let exponent = term.exponent();
        let written = exponent.trunc();
        if written != exponent {
            warn!(
                exponent,
                written,
                %fv,
                "fractional exponent truncated: this level only allows integer exponents"
            );
        }
        out.insert(EXPONENT.to_string(), (written as i64).to_string());
    }

    if explicit || term.scale() != 0 {
        out.insert(SCALE.to_string(), term.scale().to_string());
    }

    if fv.level > 1 && (explicit || term.multiplier() != 1.0) {
        out.insert(MULTIPLIER.to_string(), term.multiplier().to_string());
    }

    if fv == FormatVersion::L2V1 {
        if let Some(legacy) = term.legacy() {
            out.insert(OFFSET.to_string(), legacy.offset.to_string());
        }
    }
    out
}

/// Rebuild a term from its attributes.
///
/// Unknown attribute names are ignored; they belong to other layers of the
/// document.
pub fn read_attributes(attributes: &Attributes, fv: FormatVersion) -> UnitResult<UnitTerm> {
    let explicit = fv.level >= 3;
    let required = |name: &'static str| -> UnitResult<Option<&String>> {
        match attributes.get(name) {
            None if explicit => Err(UnitError::MissingAttribute { name }),
            value => Ok(value),
        }
    };

    let kind_value = attributes
        .get(KIND)
        .ok_or(UnitError::MissingAttribute { name: KIND })?;
    let kind: Kind = kind_value.parse()?;
    let mut term = UnitTerm::of(kind, fv)?;

    if let Some(raw) = required(EXPONENT)? {
        let exponent = if explicit {
            parse_real(EXPONENT, raw)?
        } else {
            parse_integer(EXPONENT, raw)? as Real
        };
        term.set_exponent(exponent)?;
    }

    if let Some(raw) = required(SCALE)? {
        term.set_scale(parse_integer(SCALE, raw)?);
    }

    if let Some(raw) = required(MULTIPLIER)? {
        term.set_multiplier(parse_real(MULTIPLIER, raw)?)?;
    }

    if let Some(raw) = attributes.get(OFFSET) {
        term.set_offset(parse_real(OFFSET, raw)?)?;
    }

    Ok(term)
}

fn parse_real(name: &'static str, raw: &str) -> UnitResult<Real> {
    raw.trim()
        .parse::<Real>()
        .map_err(|_| UnitError::InvalidAttribute {
            name,
            value: raw.to_string(),
        })
}

fn parse_integer(name: &'static str, raw: &str) -> UnitResult<i32> {
    let invalid = || UnitError::InvalidAttribute {
        name,
        value: raw.to_string(),
    };
    let trimmed = raw.trim();
    match trimmed.parse::<i32>() {
        Ok(n) => Ok(n),
        // "2.0" is an integer written as a real.
        Err(_) => trimmed
            .parse::<Real>()
            .ok()
            .and_then(exact_i32)
            .ok_or_else(invalid),
    }
}

/// One attribute map per term, in order.
pub fn write_expression(e: &UnitExpression) -> Vec<Attributes> {
    e.iter().map(write_attributes).collect()
}

pub fn read_expression(elements: &[Attributes], fv: FormatVersion) -> UnitResult<UnitExpression> {
    let terms = elements
        .iter()
        .map(|a| read_attributes(a, fv))
        .collect::<UnitResult<Vec<_>>>()?;
    Ok(UnitExpression::from_terms(fv, terms))
}
