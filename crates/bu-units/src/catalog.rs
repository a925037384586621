//! Predefined units and the names that refer to them.

use bu_core::FormatVersion;
use tracing::{debug, warn};

use crate::expression::UnitExpression;
use crate::kind::{Kind, is_legal_kind};
use crate::term::UnitTerm;

pub const SUBSTANCE: &str = "substance";
pub const VOLUME: &str = "volume";
pub const AREA: &str = "area";
pub const LENGTH: &str = "length";
pub const TIME: &str = "time";

/// Whether `name` is a built-in unit identifier at `level`.
///
/// Level 1 knows substance, volume and time; level 2 adds area and length;
/// level 3 has no predefined units.
pub fn is_predefined_name(name: &str, level: u32) -> bool {
    match level {
        1 => matches!(name, SUBSTANCE | VOLUME | TIME),
        2 => matches!(name, SUBSTANCE | VOLUME | AREA | LENGTH | TIME),
        _ => false,
    }
}

/// A legal kind name that is not also a predefined unit name.
pub fn is_unit_kind(name: &str, level: u32, version: u32) -> bool {
    !is_predefined_name(name, level) && is_legal_kind(name, level, version)
}

/// The one-term expression a predefined or base-kind name stands for.
///
/// Returns `None` for unknown names, names not available in the given
/// version, and versions the tables do not cover.
pub fn get_predefined_unit(name: &str, level: u32, version: u32) -> Option<UnitExpression> {
    let format = FormatVersion::new(level, version);
    if !format.is_supported() {
        warn!(name, %format, "predefined unit requested for unsupported version");
        return None;
    }

    let (kind, exponent) = if is_predefined_name(name, level) {
        match name {
            SUBSTANCE => (Kind::Mole, 1.0),
            VOLUME => (Kind::Litre, 1.0),
            AREA => (Kind::Metre, 2.0),
            LENGTH => (Kind::Metre, 1.0),
            _ => (Kind::Second, 1.0),
        }
    } else if is_legal_kind(name, level, version) {
        (Kind::parse(name)?, 1.0)
    } else {
        warn!(name, %format, "no predefined unit with this name");
        return None;
    };

    let mut term = UnitTerm::of(kind, format).ok()?;
    term.set_exponent(exponent).ok()?;
    debug!(name, %format, %term, "resolved predefined unit");
    Some(UnitExpression::single(term))
}

impl UnitExpression {
    /// Whether this is exactly the predefined unit `name` in this
    /// expression's format version.
    pub fn matches_predefined(&self, name: &str) -> bool {
        let format = self.format_version();
        get_predefined_unit(name, format.level, format.version).is_some_and(|p| {
            matches!((self.terms(), p.terms()), ([a], [b])
                if a.kind() == b.kind()
                    && a.exponent() == b.exponent()
                    && a.scale() == b.scale()
                    && a.multiplier() == b.multiplier()
                    && a.offset() == 0.0)
        })
    }
}
