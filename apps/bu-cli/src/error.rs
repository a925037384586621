use bu_core::CoreError;
use bu_document::DocumentError;
use bu_units::UnitError;

#[derive(thiserror::Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Document(#[from] DocumentError),

    #[error("{0}")]
    Unit(#[from] UnitError),

    #[error("{0}")]
    Core(#[from] CoreError),

    #[error("No predefined unit '{name}' in {format}")]
    NoPredefinedUnit { name: String, format: String },
}

pub type CliResult<T> = Result<T, CliError>;
