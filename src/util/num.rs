use crate::{error::EvalError, interpreter::evaluator::core::EvalResult};

/// Largest integer value exactly representable as an `f64` (`2^53 - 1`).
pub const MAX_SAFE_U64_INT: u64 = 9_007_199_254_740_991;

/// Safely converts a `usize` to `f64` if and only if it is exactly
/// representable.
///
/// ## Errors
/// Returns `EvalError::Overflow` if the value exceeds `MAX_SAFE_U64_INT`.
///
/// ## Example
/// ```
/// use opcalc::util::num::{MAX_SAFE_U64_INT, usize_to_f64_checked};
///
/// assert_eq!(usize_to_f64_checked(1234).unwrap(), 1234.0);
/// assert!(usize_to_f64_checked((MAX_SAFE_U64_INT + 1) as usize).is_err());
/// ```
#[allow(clippy::cast_precision_loss)]
pub const fn usize_to_f64_checked(value: usize) -> EvalResult<f64> {
    if value as u64 > MAX_SAFE_U64_INT {
        return Err(EvalError::Overflow);
    }

    Ok(value as f64)
}

/// Safely converts an `f64` to `usize` if the value is finite, non-negative,
/// not fractional and exactly representable.
///
/// ## Errors
/// Returns `EvalError::InvalidArgument` for negative or fractional values and
/// `EvalError::Overflow` for values that are too large.
///
/// ## Example
/// ```
/// use opcalc::util::num::f64_to_usize_checked;
///
/// assert_eq!(f64_to_usize_checked(3.0).unwrap(), 3);
/// assert!(f64_to_usize_checked(1.5).is_err());
/// assert!(f64_to_usize_checked(-2.0).is_err());
/// ```
#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_sign_loss)]
#[allow(clippy::cast_precision_loss)]
pub fn f64_to_usize_checked(value: f64) -> EvalResult<usize> {
    if !value.is_finite() || value > MAX_SAFE_U64_INT as f64 {
        return Err(EvalError::Overflow);
    }
    if value < 0.0 || value.fract() != 0.0 {
        return Err(EvalError::invalid_argument(format!("{value} is not a non-negative integer")));
    }

    Ok(value as usize)
}

/// Returns `true` when `value` is finite and has no fractional part.
#[must_use]
pub fn is_integral(value: f64) -> bool {
    value.is_finite() && value.fract() == 0.0
}
