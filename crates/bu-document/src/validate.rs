//! Document validation logic.

use std::collections::HashSet;

use bu_core::FormatVersion;
use bu_units::catalog::{AREA, LENGTH, SUBSTANCE, TIME, VOLUME};
use bu_units::{Kind, UnitClass, UnitError, is_predefined_name};
use tracing::debug;

use crate::migrate::LATEST_SCHEMA_VERSION;
use crate::schema::{UnitDefinitionDef, UnitDocument};

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Duplicate ID: {id} in {context}")]
    DuplicateId { id: String, context: String },

    #[error("Unsupported schema version: {version}")]
    UnsupportedSchema { version: u32 },

    #[error("Unsupported format version: level {level} version {version}")]
    UnsupportedVersion { level: u32, version: u32 },

    #[error("Unit definition '{id}' shadows a base unit kind")]
    ShadowsKind { id: String },

    #[error("Unit definition '{id}' redefines a predefined unit but is not a variant of {class}")]
    Redefinition { id: String, class: UnitClass },

    #[error("Unit {index} of definition '{id}': {source}")]
    Unit {
        id: String,
        index: usize,
        #[source]
        source: UnitError,
    },
}

pub fn validate_document(document: &UnitDocument) -> Result<(), ValidationError> {
    if document.schema_version > LATEST_SCHEMA_VERSION {
        return Err(ValidationError::UnsupportedSchema {
            version: document.schema_version,
        });
    }

    let format = document.format_version();
    if !format.is_supported() {
        return Err(ValidationError::UnsupportedVersion {
            level: document.level,
            version: document.version,
        });
    }

    let mut ids = HashSet::new();
    for definition in &document.unit_definitions {
        if !ids.insert(&definition.id) {
            return Err(ValidationError::DuplicateId {
                id: definition.id.clone(),
                context: "unit_definitions".to_string(),
            });
        }
        validate_definition(definition, format)?;
    }

    debug!(definitions = ids.len(), %format, "validated unit document");
    Ok(())
}

fn validate_definition(
    definition: &UnitDefinitionDef,
    format: FormatVersion,
) -> Result<(), ValidationError> {
    let id = &definition.id;

    if format.at_least(2, 3) && Kind::ALL.iter().any(|k| k.as_str() == id) {
        return Err(ValidationError::ShadowsKind { id: id.clone() });
    }

    for (index, unit) in definition.units.iter().enumerate() {
        unit.to_term(format).map_err(|source| ValidationError::Unit {
            id: id.clone(),
            index,
            source,
        })?;
    }

    let redefined = is_predefined_name(id, format.level)
        .then(|| redefinition_class(id))
        .flatten();
    if let Some(class) = redefined {
        let expression = definition
            .to_expression(format)
            .map_err(|source| ValidationError::Unit {
                id: id.clone(),
                index: 0,
                source,
            })?;
        if !class.matches(&expression) {
            return Err(ValidationError::Redefinition {
                id: id.clone(),
                class,
            });
        }
    }
    Ok(())
}

fn redefinition_class(id: &str) -> Option<UnitClass> {
    match id {
        SUBSTANCE => Some(UnitClass::Substance),
        VOLUME => Some(UnitClass::Volume),
        AREA => Some(UnitClass::Area),
        LENGTH => Some(UnitClass::Length),
        TIME => Some(UnitClass::Time),
        _ => None,
    }
}
