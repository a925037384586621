//! bu-core: stable foundation for biounits.
//!
//! Contains:
//! - version (format level/version pair and the supported set)
//! - numeric (Real + tolerances + float helpers)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod version;

// Re-exports: nice ergonomics for downstream crates
pub use error::{CoreError, CoreResult};
pub use numeric::*;
pub use version::FormatVersion;
