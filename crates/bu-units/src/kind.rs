//! Unit kinds and their per-version legality.

use core::fmt;
use core::str::FromStr;

use bu_core::FormatVersion;

use crate::error::UnitError;

/// Every elementary unit identifier known to any level/version of the format.
///
/// Declaration order is the canonical sort order used by the normalizer and
/// must stay alphabetical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Kind {
    Ampere,
    /// Dimensionless multiplied by Avogadro's number (level 3 onward).
    Avogadro,
    Becquerel,
    Candela,
    /// Legacy; removed in L2V2. Carries an offset of 273.15 relative to kelvin.
    Celsius,
    Coulomb,
    Dimensionless,
    Farad,
    Gram,
    Gray,
    Henry,
    Hertz,
    /// Marker for a unit that is not set or could not be resolved.
    Invalid,
    Item,
    Joule,
    Katal,
    Kelvin,
    Kilogram,
    /// Legacy spelling of [`Kind::Litre`] (level 1 only).
    Liter,
    Litre,
    Lumen,
    Lux,
    /// Legacy spelling of [`Kind::Metre`] (level 1 only).
    Meter,
    Metre,
    Mole,
    Newton,
    Ohm,
    Pascal,
    Radian,
    Second,
    Siemens,
    Sievert,
    Steradian,
    Tesla,
    Volt,
    Watt,
    Weber,
}

impl Kind {
    pub const ALL: [Kind; 37] = [
        Kind::Ampere,
        Kind::Avogadro,
        Kind::Becquerel,
        Kind::Candela,
        Kind::Celsius,
        Kind::Coulomb,
        Kind::Dimensionless,
        Kind::Farad,
        Kind::Gram,
        Kind::Gray,
        Kind::Henry,
        Kind::Hertz,
        Kind::Invalid,
        Kind::Item,
        Kind::Joule,
        Kind::Katal,
        Kind::Kelvin,
        Kind::Kilogram,
        Kind::Liter,
        Kind::Litre,
        Kind::Lumen,
        Kind::Lux,
        Kind::Meter,
        Kind::Metre,
        Kind::Mole,
        Kind::Newton,
        Kind::Ohm,
        Kind::Pascal,
        Kind::Radian,
        Kind::Second,
        Kind::Siemens,
        Kind::Sievert,
        Kind::Steradian,
        Kind::Tesla,
        Kind::Volt,
        Kind::Watt,
        Kind::Weber,
    ];

    /// Attribute string form, e.g. `"metre"`.
    pub fn as_str(self) -> &'static str {
        match self {
            Kind::Ampere => "ampere",
            Kind::Avogadro => "avogadro",
            Kind::Becquerel => "becquerel",
            Kind::Candela => "candela",
            Kind::Celsius => "celsius",
            Kind::Coulomb => "coulomb",
            Kind::Dimensionless => "dimensionless",
            Kind::Farad => "farad",
            Kind::Gram => "gram",
            Kind::Gray => "gray",
            Kind::Henry => "henry",
            Kind::Hertz => "hertz",
            Kind::Invalid => "invalid",
            Kind::Item => "item",
            Kind::Joule => "joule",
            Kind::Katal => "katal",
            Kind::Kelvin => "kelvin",
            Kind::Kilogram => "kilogram",
            Kind::Liter => "liter",
            Kind::Litre => "litre",
            Kind::Lumen => "lumen",
            Kind::Lux => "lux",
            Kind::Meter => "meter",
            Kind::Metre => "metre",
            Kind::Mole => "mole",
            Kind::Newton => "newton",
            Kind::Ohm => "ohm",
            Kind::Pascal => "pascal",
            Kind::Radian => "radian",
            Kind::Second => "second",
            Kind::Siemens => "siemens",
            Kind::Sievert => "sievert",
            Kind::Steradian => "steradian",
            Kind::Tesla => "tesla",
            Kind::Volt => "volt",
            Kind::Watt => "watt",
            Kind::Weber => "weber",
        }
    }

    /// Human-readable name. Units named after people are capitalized.
    pub fn name(self) -> String {
        match self {
            Kind::Celsius => "degree Celsius".to_string(),
            Kind::Dimensionless
            | Kind::Gram
            | Kind::Item
            | Kind::Invalid
            | Kind::Kilogram
            | Kind::Lux
            | Kind::Lumen
            | Kind::Liter
            | Kind::Litre
            | Kind::Meter
            | Kind::Metre
            | Kind::Mole
            | Kind::Second => self.as_str().to_string(),
            _ => {
                let s = self.as_str();
                let mut out = String::with_capacity(s.len());
                let mut chars = s.chars();
                if let Some(first) = chars.next() {
                    out.push(first.to_ascii_uppercase());
                }
                out.extend(chars);
                out
            }
        }
    }

    /// Formula symbol. Pseudo-units fall back to their attribute string.
    pub fn symbol(self) -> &'static str {
        match self {
            Kind::Ampere => "A",
            Kind::Becquerel => "Bq",
            Kind::Candela => "cd",
            Kind::Celsius => "\u{00B0}C",
            Kind::Coulomb => "C",
            Kind::Farad => "F",
            Kind::Gram => "g",
            Kind::Gray => "Gy",
            Kind::Henry => "H",
            Kind::Hertz => "Hz",
            Kind::Joule => "J",
            Kind::Katal => "kat",
            Kind::Kelvin => "K",
            Kind::Kilogram => "kg",
            Kind::Liter | Kind::Litre => "l",
            Kind::Lumen => "lm",
            Kind::Lux => "lx",
            Kind::Meter | Kind::Metre => "m",
            Kind::Mole => "mol",
            Kind::Newton => "N",
            Kind::Ohm => "\u{03A9}",
            Kind::Pascal => "Pa",
            Kind::Radian => "rad",
            Kind::Second => "s",
            Kind::Siemens => "S",
            Kind::Sievert => "Sv",
            Kind::Steradian => "sr",
            Kind::Tesla => "T",
            Kind::Volt => "V",
            Kind::Watt => "W",
            Kind::Weber => "Wb",
            Kind::Avogadro | Kind::Dimensionless | Kind::Item | Kind::Invalid => self.as_str(),
        }
    }

    /// Unit ontology term number, where one exists.
    pub fn ontology_number(self) -> Option<u32> {
        let n = match self {
            Kind::Ampere => 11,
            Kind::Becquerel => 132,
            Kind::Candela => 14,
            Kind::Celsius => 27,
            Kind::Coulomb => 220,
            Kind::Dimensionless => 186,
            Kind::Gram => 21,
            Kind::Gray => 134,
            Kind::Hertz => 106,
            Kind::Joule => 112,
            Kind::Katal => 120,
            Kind::Kelvin => 12,
            Kind::Kilogram => 9,
            Kind::Liter | Kind::Litre => 99,
            Kind::Lumen => 118,
            Kind::Lux => 116,
            Kind::Meter | Kind::Metre => 8,
            Kind::Mole => 13,
            Kind::Newton => 108,
            Kind::Pascal => 110,
            Kind::Radian => 123,
            Kind::Second => 10,
            Kind::Siemens => 264,
            Kind::Sievert => 137,
            Kind::Steradian => 125,
            Kind::Tesla => 228,
            Kind::Volt => 218,
            Kind::Watt => 114,
            Kind::Weber => 226,
            Kind::Avogadro
            | Kind::Farad
            | Kind::Henry
            | Kind::Invalid
            | Kind::Item
            | Kind::Ohm => return None,
        };
        Some(n)
    }

    /// Ontology identifier zero-padded to seven digits, e.g. `UO:0000008`.
    pub fn ontology_id(self) -> Option<String> {
        self.ontology_number().map(|n| format!("UO:{n:07}"))
    }

    /// Resolvable URI of the ontology term.
    pub fn ontology_resource(self) -> Option<String> {
        self.ontology_id()
            .map(|id| format!("http://identifiers.org/unit/{id}"))
    }

    /// Same physical unit, allowing for the legacy spellings.
    pub fn are_equivalent(a: Kind, b: Kind) -> bool {
        a.modern_spelling() == b.modern_spelling()
    }

    /// Maps `Meter`/`Liter` to `Metre`/`Litre`, everything else to itself.
    pub fn modern_spelling(self) -> Kind {
        match self {
            Kind::Meter => Kind::Metre,
            Kind::Liter => Kind::Litre,
            k => k,
        }
    }

    /// The kinds the SI reducer emits.
    pub fn is_si_base(self) -> bool {
        matches!(
            self,
            Kind::Ampere
                | Kind::Candela
                | Kind::Dimensionless
                | Kind::Kelvin
                | Kind::Kilogram
                | Kind::Metre
                | Kind::Mole
                | Kind::Second
        )
    }

    /// First version defining this kind and, if it was dropped, the first
    /// version without it. `None` for kinds no version defines.
    fn lifetime(self) -> Option<(FormatVersion, Option<FormatVersion>)> {
        match self {
            Kind::Invalid => None,
            Kind::Avogadro => Some((FormatVersion::L3V1, None)),
            Kind::Celsius => Some((FormatVersion::L1V1, Some(FormatVersion::L2V2))),
            Kind::Liter | Kind::Meter => Some((FormatVersion::L1V1, Some(FormatVersion::L2V1))),
            _ => Some((FormatVersion::L1V1, None)),
        }
    }

    /// Legality table lookup for one (kind, level, version) triple.
    pub fn is_defined_in(self, fv: FormatVersion) -> bool {
        if !fv.is_supported() {
            return false;
        }
        match self.lifetime() {
            None => false,
            Some((since, until)) => fv >= since && until.is_none_or(|u| fv < u),
        }
    }

    /// All kinds legal in the given version, in canonical order.
    pub fn defined_in(fv: FormatVersion) -> Vec<Kind> {
        Kind::ALL
            .iter()
            .copied()
            .filter(|k| k.is_defined_in(fv))
            .collect()
    }

    /// Parse the attribute string form, written all lower case (`litre`)
    /// or all upper case (`LITRE`). Mixed case such as `Litre` is rejected.
    pub fn parse(name: &str) -> Option<Kind> {
        let name = name.trim();
        Kind::ALL.iter().copied().find(|k| {
            let key = k.as_str();
            key == name || key.to_ascii_uppercase() == name
        })
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Kind {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Kind::parse(s).ok_or_else(|| UnitError::UnknownKind {
            name: s.to_string(),
        })
    }
}

/// `true` if `name` is a unit kind legal in the given level and version.
pub fn is_legal_kind(name: &str, level: u32, version: u32) -> bool {
    Kind::parse(name).is_some_and(|k| k.is_defined_in(FormatVersion::new(level, version)))
}

pub fn kinds_defined_in(level: u32, version: u32) -> Vec<Kind> {
    Kind::defined_in(FormatVersion::new(level, version))
}

/// `true` for the level/version pairs the legality tables cover.
pub fn is_valid_format_version(level: u32, version: u32) -> bool {
    FormatVersion::new(level, version).is_supported()
}
