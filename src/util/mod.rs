
//! Numeric helpers shared by both evaluators.

/// Largest value whose double is still finite.
const HALF_MAX: f64 = f64::MAX / 2.0;
/// Smallest normal value times two. Below this, halving `y` would
/// lose precision.
const TINY: f64 = 4.450_147_717_014_403e-308;

/// Rounds `value` to `places` decimal places, halves away from zero.
///
/// Non-finite values are returned unchanged, as are values too large
/// to be scaled without overflowing.
pub fn round_to_places(value: f64, places: u32) -> f64 {
  if !value.is_finite() {
    return value;
  }
  let factor = 10f64.powi(i32::try_from(places).unwrap_or(i32::MAX));
  let scaled = value * factor;
  if !factor.is_finite() || !scaled.is_finite() {
    return value;
  }
  scaled.round() / factor
}

/// IEEE 754 remainder of `x` and `y`: `x - n * y` where `n` is the
/// integer nearest `x / y`, ties going to the even integer. Unlike
/// Rust's `%`, the result may be negative for positive inputs.
///
/// Special cases:
/// - `remainder(±inf, y)`, `remainder(x, 0)` and any NaN input are NaN.
/// - `remainder(x, ±inf)` is `x`.
pub fn ieee_remainder(x: f64, y: f64) -> f64 {
  if x.is_nan() || y.is_nan() || x.is_infinite() || y == 0.0 {
    return f64::NAN;
  }
  if y.is_infinite() {
    return x;
  }
  let negative = x.is_sign_negative();
  let mut x = x.abs();
  let y = y.abs();
  if x == y {
    return if negative { -0.0 } else { 0.0 };
  }
  if y <= HALF_MAX {
    // Exact; leaves x in [0, 2y).
    x %= y + y;
  }
  if y < TINY {
    if x + x > y {
      x -= y;
      if x + x >= y {
        x -= y;
      }
    }
  } else {
    let y_half = 0.5 * y;
    if x > y_half {
      x -= y;
      if x >= y_half {
        x -= y;
      }
    }
  }
  if negative { -x } else { x }
}
