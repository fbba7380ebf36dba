//! Rounding helpers shared by the rasterizer, blitter and noise generator.
//!
//! Every conversion from continuous coordinates to pixel addresses goes
//! through these functions so that all components agree on tie-breaking and
//! on the behaviour for negative inputs.

/// Round to the nearest integer, ties away from zero.
///
/// `round_i(2.5) == 3`, `round_i(-2.5) == -3`. Values outside the `i32`
/// range saturate; NaN maps to 0.
#[inline]
#[must_use]
pub fn round_i(x: f32) -> i32 {
    x.round() as i32
}

/// Largest integer less than or equal to `x`.
///
/// `floor_i(-0.5) == -1`, unlike a truncating cast.
#[inline]
#[must_use]
pub fn floor_i(x: f32) -> i32 {
    x.floor() as i32
}

/// Fractional part `x - floor(x)`.
///
/// The result is always in `[0, 1)`, including for negative inputs:
/// `frac(-0.25) == 0.75`.
#[inline]
#[must_use]
pub fn frac(x: f32) -> f32 {
    let f = x - x.floor();
    // x - floor(x) can round up to 1.0 for tiny negative x.
    if f >= 1.0 {
        0.0
    } else {
        f
    }
}
