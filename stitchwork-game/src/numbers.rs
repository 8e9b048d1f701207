//! Numeric conversion helpers centralizing safe numeric casts.

use num_traits::cast::cast;
use serde_json::Value;

/// Read a JSON value as a non-negative integer that fits in `u32`.
///
/// Floats with a zero fractional part (`2.0`) are accepted; anything else
/// returns `None`.
#[must_use]
pub fn json_to_u32(value: &Value) -> Option<u32> {
    if let Some(int) = value.as_u64() {
        return cast::<u64, u32>(int);
    }
    let float = value.as_f64()?;
    if !float.is_finite() || float < 0.0 || float.fract() != 0.0 {
        return None;
    }
    cast::<f64, u32>(float)
}

/// Read a JSON value as a finite, non-negative number.
#[must_use]
pub fn json_to_non_negative(value: &Value) -> Option<f64> {
    value.as_f64().filter(|n| n.is_finite() && *n >= 0.0)
}

/// Convert a capacity to `usize` for comparisons against collection lengths.
#[must_use]
pub fn capacity_to_usize(value: u32) -> usize {
    cast::<u32, usize>(value).unwrap_or(usize::MAX)
}
