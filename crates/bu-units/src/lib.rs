//! Unit algebra for biological model descriptions.
//!
//! A unit is a product of terms `(multiplier * 10^scale * kind)^exponent`.
//! This crate provides the kinds and their per-version legality, the term
//! and expression types, a normalizer, SI reduction, the identical /
//! equivalent / compatible relations, variant predicates for the quantity
//! classes the format cares about, the predefined unit catalog and the
//! attribute encoding of terms.

pub mod attributes;
pub mod catalog;
pub mod compare;
pub mod display;
pub mod error;
pub mod expression;
pub mod kind;
pub mod merge;
pub mod si;
pub mod simplify;
pub mod term;
pub mod variant;

pub use attributes::{Attributes, read_attributes, read_expression, write_attributes, write_expression};
pub use catalog::{get_predefined_unit, is_predefined_name, is_unit_kind};
pub use compare::{are_compatible, are_compatible_derived, are_equivalent, are_identical, derive_units};
pub use display::si_prefix;
pub use error::{UnitError, UnitResult};
pub use expression::{UnitExpression, power, product, quotient};
pub use kind::{Kind, is_legal_kind, is_valid_format_version, kinds_defined_in};
pub use merge::{can_merge, merge};
pub use si::{AVOGADRO_NUMBER, SiOptions, SiTarget, expand_term, to_si};
pub use simplify::simplified;
pub use term::{LegacyAttributes, UnitTerm};
pub use variant::{
    UnitClass, expect_class, is_variant_of_area, is_variant_of_dimensionless, is_variant_of_length,
    is_variant_of_substance, is_variant_of_substance_per_area, is_variant_of_substance_per_length,
    is_variant_of_substance_per_time, is_variant_of_substance_per_volume, is_variant_of_time,
    is_variant_of_volume,
};

pub use bu_core::FormatVersion;
