//! Error types for unit construction, algebra and attribute encoding.

use bu_core::{CoreError, FormatVersion};
use thiserror::Error;

use crate::kind::Kind;

/// Errors raised by the unit algebra.
///
/// All of them are local to the call that produced them: the value the call
/// was asked to modify is left as it was.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UnitError {
    #[error("Unit kind '{kind}' is not defined in level {level} version {version}")]
    InvalidUnitKind { kind: Kind, level: u32, version: u32 },

    #[error("Invalid unit combination: {what}")]
    InvalidUnitCombination { what: String },

    #[error("Unknown unit kind: '{name}'")]
    UnknownKind { name: String },

    #[error("Attribute '{property}' is not available in level {level} version {version}")]
    PropertyNotAvailable {
        property: &'static str,
        level: u32,
        version: u32,
    },

    #[error("Format version mismatch: expected {expected}, found {found}")]
    VersionMismatch {
        expected: FormatVersion,
        found: FormatVersion,
    },

    #[error("Missing required attribute '{name}'")]
    MissingAttribute { name: &'static str },

    #[error("Invalid value for attribute '{name}': '{value}'")]
    InvalidAttribute { name: &'static str, value: String },

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type UnitResult<T> = Result<T, UnitError>;

impl UnitError {
    pub(crate) fn invalid_kind(kind: Kind, fv: FormatVersion) -> Self {
        UnitError::InvalidUnitKind {
            kind,
            level: fv.level,
            version: fv.version,
        }
    }

    pub(crate) fn not_available(property: &'static str, fv: FormatVersion) -> Self {
        UnitError::PropertyNotAvailable {
            property,
            level: fv.level,
            version: fv.version,
        }
    }
}
