//! Unit document schema definitions.

use serde::{Deserialize, Serialize};

use bu_core::FormatVersion;
use bu_units::{Kind, UnitExpression, UnitResult, UnitTerm};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UnitDocument {
    pub schema_version: u32,
    pub level: u32,
    pub version: u32,
    #[serde(default)]
    pub unit_definitions: Vec<UnitDefinitionDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UnitDefinitionDef {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub units: Vec<UnitDef>,
}

/// One term as written in a document. Absent attributes take the identity
/// value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UnitDef {
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exponent: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multiplier: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<f64>,
}

impl UnitDocument {
    pub fn new(format: FormatVersion) -> Self {
        Self {
            schema_version: crate::migrate::LATEST_SCHEMA_VERSION,
            level: format.level,
            version: format.version,
            unit_definitions: Vec::new(),
        }
    }

    pub fn format_version(&self) -> FormatVersion {
        FormatVersion::new(self.level, self.version)
    }

    pub fn definition(&self, id: &str) -> Option<&UnitDefinitionDef> {
        self.unit_definitions.iter().find(|d| d.id == id)
    }

    /// Append a definition built from an expression.
    pub fn push_definition(&mut self, id: impl Into<String>, expression: &UnitExpression) {
        self.unit_definitions.push(UnitDefinitionDef {
            id: id.into(),
            name: None,
            units: expression.iter().map(UnitDef::from_term).collect(),
        });
    }
}

impl UnitDefinitionDef {
    pub fn to_expression(&self, format: FormatVersion) -> UnitResult<UnitExpression> {
        let terms = self
            .units
            .iter()
            .map(|u| u.to_term(format))
            .collect::<UnitResult<Vec<_>>>()?;
        Ok(UnitExpression::from_terms(format, terms))
    }
}

impl UnitDef {
    pub fn of(kind: Kind) -> Self {
        Self {
            kind: kind.as_str().to_string(),
            exponent: None,
            scale: None,
            multiplier: None,
            offset: None,
        }
    }

    /// Build the term, checking every attribute against `format`.
    pub fn to_term(&self, format: FormatVersion) -> UnitResult<UnitTerm> {
        let kind: Kind = self.kind.parse()?;
        let mut term = UnitTerm::of(kind, format)?;
        if let Some(exponent) = self.exponent {
            term.set_exponent(exponent)?;
        }
        if let Some(scale) = self.scale {
            term.set_scale(scale);
        }
        if let Some(multiplier) = self.multiplier {
            term.set_multiplier(multiplier)?;
        }
        if let Some(offset) = self.offset {
            term.set_offset(offset)?;
        }
        Ok(term)
    }

    /// Document form of a term; identity attributes are left out.
    pub fn from_term(term: &UnitTerm) -> Self {
        Self {
            kind: term.kind().as_str().to_string(),
            exponent: (term.exponent() != 1.0).then(|| term.exponent()),
            scale: (term.scale() != 0).then(|| term.scale()),
            multiplier: (term.multiplier() != 1.0).then(|| term.multiplier()),
            offset: term.legacy().map(|l| l.offset),
        }
    }
}
