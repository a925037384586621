//! bu-document: unit definition documents in YAML or JSON, with
//! validation and conversion to unit expressions.

pub mod migrate;
pub mod schema;
pub mod validate;

use std::path::Path;

use bu_units::{UnitError, UnitExpression, get_predefined_unit};

pub use migrate::{LATEST_SCHEMA_VERSION, migrate_to_latest};
pub use schema::*;
pub use validate::{ValidationError, validate_document};

pub type DocumentResult<T> = Result<T, DocumentError>;

#[derive(thiserror::Error, Debug)]
pub enum DocumentError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Migration error: {what}")]
    Migration { what: String },

    #[error("Unit error: {0}")]
    Unit(#[from] UnitError),

    #[error("Unknown unit: '{id}'")]
    UnknownUnit { id: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn load_yaml(path: &Path) -> DocumentResult<UnitDocument> {
    let content = std::fs::read_to_string(path)?;
    let mut document: UnitDocument = serde_yaml::from_str(&content)?;
    document = migrate_to_latest(document)?;
    validate_document(&document)?;
    Ok(document)
}

pub fn save_yaml(path: &Path, document: &UnitDocument) -> DocumentResult<()> {
    validate_document(document)?;
    let content = serde_yaml::to_string(document)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_json(path: &Path) -> DocumentResult<UnitDocument> {
    let content = std::fs::read_to_string(path)?;
    let mut document: UnitDocument = serde_json::from_str(&content)?;
    document = migrate_to_latest(document)?;
    validate_document(&document)?;
    Ok(document)
}

pub fn save_json(path: &Path, document: &UnitDocument) -> DocumentResult<()> {
    validate_document(document)?;
    let content = serde_json::to_string_pretty(document)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Load by extension: `.json` as JSON, anything else as YAML.
pub fn load(path: &Path) -> DocumentResult<UnitDocument> {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => load_json(path),
        _ => load_yaml(path),
    }
}

impl UnitDocument {
    /// Expression for a unit id: a definition of this document first, then a
    /// predefined unit or base kind of the document's format version.
    pub fn resolve(&self, id: &str) -> DocumentResult<UnitExpression> {
        let format = self.format_version();
        if let Some(definition) = self.definition(id) {
            return Ok(definition.to_expression(format)?);
        }
        get_predefined_unit(id, format.level, format.version)
            .ok_or_else(|| DocumentError::UnknownUnit { id: id.to_string() })
    }

    /// Every definition as `(id, expression)`, in document order.
    pub fn expressions(&self) -> DocumentResult<Vec<(String, UnitExpression)>> {
        let format = self.format_version();
        self.unit_definitions
            .iter()
            .map(|d| Ok((d.id.clone(), d.to_expression(format)?)))
            .collect()
    }
}
