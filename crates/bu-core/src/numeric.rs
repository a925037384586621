use crate::CoreError;

/// Exponents, multipliers and offsets.
pub type Real = f64;

/// Noise accepted when snapping a base-10 logarithm onto an integer.
///
/// Covers the last-bit error of `log10` on decimal fractions such as `1e-9`
/// that have no exact binary representation.
pub const LOG10_NOISE: Real = 1e-12;

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, CoreError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(CoreError::NonFinite { what, value: v })
    }
}

/// Returns `Some(n)` if `v` is exactly the integer `n` and fits in `i32`.
pub fn exact_i32(v: Real) -> Option<i32> {
    if !v.is_finite() || v.fract() != 0.0 {
        return None;
    }
    if v < i32::MIN as Real || v > i32::MAX as Real {
        return None;
    }
    Some(v as i32)
}

/// Like [`exact_i32`], but accepts values within `noise` of an integer.
pub fn snap_i32(v: Real, noise: Real) -> Option<i32> {
    if let Some(n) = exact_i32(v) {
        return Some(n);
    }
    if !v.is_finite() {
        return None;
    }
    let rounded = v.round();
    if (rounded - v).abs() < noise {
        exact_i32(rounded)
    } else {
        None
    }
}

/// 10^exp as a float.
#[inline]
pub fn pow10(exp: Real) -> Real {
    10f64.powf(exp)
}
