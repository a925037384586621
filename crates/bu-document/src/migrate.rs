//! Schema migration framework.

use crate::DocumentError;
use crate::schema::UnitDocument;

pub const LATEST_SCHEMA_VERSION: u32 = 1;

pub fn migrate_to_latest(mut document: UnitDocument) -> Result<UnitDocument, DocumentError> {
    while document.schema_version < LATEST_SCHEMA_VERSION {
        document = migrate_one_version(document)?;
    }
    Ok(document)
}

fn migrate_one_version(document: UnitDocument) -> Result<UnitDocument, DocumentError> {
    match document.schema_version {
        0 => migrate_v0_to_v1(document),
        v => Err(DocumentError::Migration {
            what: format!("No migration path from schema version {}", v),
        }),
    }
}

/// Schema 0 wrote the level 1 spellings `liter` and `meter` whatever the
/// level. From level 2 on only `litre` and `metre` exist.
fn migrate_v0_to_v1(mut document: UnitDocument) -> Result<UnitDocument, DocumentError> {
    if document.level >= 2 {
        for unit in document
            .unit_definitions
            .iter_mut()
            .flat_map(|d| d.units.iter_mut())
        {
            match unit.kind.to_ascii_lowercase().as_str() {
                "liter" => unit.kind = "litre".to_string(),
                "meter" => unit.kind = "metre".to_string(),
                _ => {}
            }
        }
    }
    document.schema_version = 1;
    Ok(document)
}
