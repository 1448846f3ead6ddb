//! Fixed-point kernel shared by the quantized color types.
//!
//! Channel values live on an unsigned fixed-point scale `[0, UNIT]` that
//! represents the real interval `[0.0, 1.0]`. The product of two fixed-point
//! fractions must be renormalized with `>> UNIT_SHIFT`.
//!
//! With `UNIT_SHIFT = 15` the product of any two in-range values, and the
//! sum of the three weighted terms used by the compositing operators, stays
//! inside `u32`. Paths that mix in an 8-bit weight scale or a reciprocal are
//! widened to `u64`.

// ============================================================================
// Scale constants
// ============================================================================

/// log2 of the fixed-point unit.
pub const UNIT_SHIFT: u32 = 15;
/// Fixed-point representation of `1.0`.
pub const UNIT: u32 = 1 << UNIT_SHIFT;
/// Rounding bias added before a `>> UNIT_SHIFT`.
pub const UNIT_HALF: u32 = UNIT >> 1;

/// Largest 8-bit channel value.
pub const MAX_255: u32 = 255;

// ============================================================================
// 8-bit <-> fixed-point
// ============================================================================

/// Lift an 8-bit channel value onto the fixed-point scale.
///
/// Exact at the ends (`0 -> 0`, `255 -> UNIT`) and monotonic in between.
#[inline]
pub fn from_255(value: u8) -> u32 {
    (value as u32 * UNIT + (MAX_255 >> 1)) / MAX_255
}

/// Lower a fixed-point value back to 8 bits, rounding to nearest.
///
/// Inverse of [`from_255`] on its 256 sample points. Values above `UNIT`
/// saturate at 255.
#[inline]
pub fn to_255(value: u32) -> u8 {
    let v = (value as u64 * MAX_255 as u64 + UNIT_HALF as u64) >> UNIT_SHIFT;
    v.min(MAX_255 as u64) as u8
}

/// Lower a premultiplied fixed-point value to 8 bits, dividing out alpha
/// through a reciprocal obtained from [`unbounded_reciprocal`].
#[inline]
pub fn to_255_with_reciprocal(value: u32, reciprocal: u32) -> u8 {
    to_255(unpremultiply(value, reciprocal))
}

/// Convert a float opacity in `[0, 1]` to fixed-point. Out-of-range and NaN
/// inputs clamp to the nearest end.
#[inline]
pub fn from_float(value: f32) -> u32 {
    let clamped = if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    };
    (clamped * UNIT as f32 + 0.5) as u32
}

// ============================================================================
// Fixed-point products
// ============================================================================

/// Product of two fixed-point fractions, truncated. Both operands must be in
/// `[0, UNIT]`.
#[inline]
pub fn mul(a: u32, b: u32) -> u32 {
    (a * b) >> UNIT_SHIFT
}

/// Product of two fixed-point fractions, rounded to nearest.
#[inline]
pub fn mul_round(a: u32, b: u32) -> u32 {
    (a * b + UNIT_HALF) >> UNIT_SHIFT
}

// ============================================================================
// Interpolation
// ============================================================================

/// Denominator of the 8-bit-weighted interpolation domain.
pub const LERP_255_SCALE: u64 = (UNIT as u64) << 8;

/// Split an 8-bit interpolation weight into `(left, right)` weights on the
/// `UNIT * 256` scale.
///
/// The weight is stretched by `256 / 255` first, so `0` selects the left
/// sample and `255` the right one exactly.
#[inline]
pub fn lerp_weights_255(weight: u8) -> (u64, u64) {
    let w = weight as u64 * 256 / MAX_255 as u64;
    let rx = w * UNIT as u64;
    let lx = LERP_255_SCALE - rx;
    debug_assert_eq!(lx + rx, LERP_255_SCALE);
    (lx, rx)
}

/// Interpolate one channel with weights from [`lerp_weights_255`].
#[inline]
pub fn lerp_255(left: u32, right: u32, lx: u64, rx: u64) -> u32 {
    ((left as u64 * lx + right as u64 * rx) / LERP_255_SCALE) as u32
}

/// Interpolate one channel directly in fixed-point; `amount` is in
/// `[0, UNIT]` and selects `right` at `UNIT`. Both channels must be in
/// `[0, UNIT]`.
#[inline]
pub fn lerp(left: u32, right: u32, amount: u32) -> u32 {
    debug_assert!(amount <= UNIT, "lerp amount {} exceeds UNIT", amount);
    let rx = amount;
    let lx = UNIT - rx;
    debug_assert_eq!(lx + rx, UNIT);
    (left * lx + right * rx) >> UNIT_SHIFT
}

// ============================================================================
// Reciprocal
// ============================================================================

/// Fixed-point reciprocal of `alpha / UNIT`.
///
/// The result is unbounded above (`UNIT / alpha` grows past `UNIT` as alpha
/// shrinks), so that `value * reciprocal >> UNIT_SHIFT` recovers the
/// unpremultiplied component with a single multiply. `alpha` must be non-zero;
/// callers handle the transparent case before asking for a reciprocal.
#[inline]
pub fn unbounded_reciprocal(alpha: u32) -> u32 {
    debug_assert!(alpha != 0, "reciprocal of zero alpha");
    let unit_sq = (UNIT as u64) << UNIT_SHIFT;
    ((unit_sq + (alpha as u64 >> 1)) / alpha as u64) as u32
}

/// Apply a reciprocal to a premultiplied component, clamped to `UNIT`.
#[inline]
pub fn unpremultiply(value: u32, reciprocal: u32) -> u32 {
    let v = (value as u64 * reciprocal as u64 + UNIT_HALF as u64) >> UNIT_SHIFT;
    v.min(UNIT as u64) as u32
}
