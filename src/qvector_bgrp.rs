//! Premultiplied quantized color.
//!
//! `QVectorBgrp` is the canonical space in which all compositing happens.
//! R, G, B are stored already scaled by `A / UNIT`, so `r, g, b <= a` (up to
//! one unit of rounding slack) and a zero alpha always carries zero color.
//!
//! Two read-back views are exposed over the same storage:
//! - `pre_*_q8`: the raw premultiplied channel lowered to 8 bits;
//! - `*_q8`: the unpremultiplied channel, recovered through the reciprocal
//!   of alpha. For `a == 0` this view is defined as `0`, so hue information
//!   of fully transparent pixels is not preserved.
//!
//! The compositing operators live in [`compose`](crate::compose).

use core::ops::{Add, Mul};

use crate::adapter::ValueSetter;
use crate::fixed_math::{self, UNIT, UNIT_SHIFT};
use crate::qvector_bgr::QVectorBgr;

/// Alpha-premultiplied fixed-point color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QVectorBgrp {
    pub r: u32,
    pub g: u32,
    pub b: u32,
    pub a: u32,
}

impl QVectorBgrp {
    pub const TRANSPARENT: Self = Self {
        r: 0,
        g: 0,
        b: 0,
        a: 0,
    };
    pub const BLACK: Self = Self {
        r: 0,
        g: 0,
        b: 0,
        a: UNIT,
    };
    pub const WHITE: Self = Self {
        r: UNIT,
        g: UNIT,
        b: UNIT,
        a: UNIT,
    };

    /// Construct from premultiplied fixed-point channels.
    pub fn new(r: u32, g: u32, b: u32, a: u32) -> Self {
        debug_assert!(a <= UNIT, "alpha {} out of range", a);
        debug_assert!(
            r <= a + 1 && g <= a + 1 && b <= a + 1,
            "premultiplied channel exceeds alpha"
        );
        Self { r, g, b, a }
    }

    // ------------------------------------------------------------------------
    // Construction by source pixel kind
    // ------------------------------------------------------------------------

    /// From an opaque 8-bit RGB pixel; alpha is forced to `UNIT`.
    pub fn from_opaque(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: fixed_math::from_255(r),
            g: fixed_math::from_255(g),
            b: fixed_math::from_255(b),
            a: UNIT,
        }
    }

    /// From a straight-alpha 8-bit RGBA pixel; alpha is applied once here.
    pub fn from_straight(r: u8, g: u8, b: u8, a: u8) -> Self {
        if a == 0 {
            return Self::TRANSPARENT;
        }
        let alpha = fixed_math::from_255(a);
        Self {
            r: fixed_math::mul_round(fixed_math::from_255(r), alpha),
            g: fixed_math::mul_round(fixed_math::from_255(g), alpha),
            b: fixed_math::mul_round(fixed_math::from_255(b), alpha),
            a: alpha,
        }
    }

    /// From an already-premultiplied 8-bit RGBA pixel; copied without
    /// rescaling.
    ///
    /// This is not a pure field-wise copy: channels of a malformed pixel
    /// that exceed its alpha are clamped to it, and a zero alpha yields
    /// [`TRANSPARENT`](Self::TRANSPARENT) whatever the color channels hold.
    pub fn from_premultiplied(r: u8, g: u8, b: u8, a: u8) -> Self {
        if a == 0 {
            return Self::TRANSPARENT;
        }
        let alpha = fixed_math::from_255(a);
        Self {
            r: fixed_math::from_255(r).min(alpha),
            g: fixed_math::from_255(g).min(alpha),
            b: fixed_math::from_255(b).min(alpha),
            a: alpha,
        }
    }

    /// Lift any pixel type that knows how to donate its channels. The pixel
    /// type decides which of the construction rules above applies.
    pub fn from_pixel<P>(pixel: &P) -> Self
    where
        Self: ValueSetter<P>,
    {
        let mut v = Self::default();
        v.set_value(pixel);
        v
    }

    // ------------------------------------------------------------------------
    // Read-back views
    // ------------------------------------------------------------------------

    #[inline]
    pub fn pre_r_q8(&self) -> u8 {
        fixed_math::to_255(self.r)
    }

    #[inline]
    pub fn pre_g_q8(&self) -> u8 {
        fixed_math::to_255(self.g)
    }

    #[inline]
    pub fn pre_b_q8(&self) -> u8 {
        fixed_math::to_255(self.b)
    }

    #[inline]
    pub fn a_q8(&self) -> u8 {
        fixed_math::to_255(self.a)
    }

    #[inline]
    pub fn r_q8(&self) -> u8 {
        self.unpremultiplied_q8(self.r)
    }

    #[inline]
    pub fn g_q8(&self) -> u8 {
        self.unpremultiplied_q8(self.g)
    }

    #[inline]
    pub fn b_q8(&self) -> u8 {
        self.unpremultiplied_q8(self.b)
    }

    /// Unpremultiplied `(r, g, b, a)` in 8 bits, sharing one reciprocal.
    pub fn to_straight_q8(&self) -> (u8, u8, u8, u8) {
        if self.a == 0 {
            return (0, 0, 0, 0);
        }
        let recip = fixed_math::unbounded_reciprocal(self.a);
        (
            fixed_math::to_255_with_reciprocal(self.r, recip),
            fixed_math::to_255_with_reciprocal(self.g, recip),
            fixed_math::to_255_with_reciprocal(self.b, recip),
            self.a_q8(),
        )
    }

    /// Premultiplied `(r, g, b, a)` in 8 bits.
    pub fn to_premultiplied_q8(&self) -> (u8, u8, u8, u8) {
        (self.pre_r_q8(), self.pre_g_q8(), self.pre_b_q8(), self.a_q8())
    }

    #[inline]
    fn unpremultiplied_q8(&self, channel: u32) -> u8 {
        if self.a == 0 {
            return 0;
        }
        fixed_math::to_255_with_reciprocal(channel, fixed_math::unbounded_reciprocal(self.a))
    }

    /// Divide alpha out in fixed-point. Transparent colors map to black.
    pub fn unpremultiplied(&self) -> QVectorBgr {
        if self.a == 0 {
            return QVectorBgr::BLACK;
        }
        let recip = fixed_math::unbounded_reciprocal(self.a);
        QVectorBgr {
            r: fixed_math::unpremultiply(self.r, recip),
            g: fixed_math::unpremultiply(self.g, recip),
            b: fixed_math::unpremultiply(self.b, recip),
        }
    }

    pub fn is_transparent(&self) -> bool {
        self.a == 0
    }

    pub fn is_opaque(&self) -> bool {
        self.a == UNIT
    }

    /// Clamp alpha to `UNIT` and each color channel to alpha.
    ///
    /// The `atop` operators leave color channels on the `UNIT * UNIT` scale.
    /// Every operation that multiplies channels saturates its operands
    /// through here first, so such a value composes as a fully saturated
    /// color instead of overflowing. In-range colors pass through unchanged.
    #[inline]
    pub fn saturated(&self) -> Self {
        let a = self.a.min(UNIT);
        Self {
            r: self.r.min(a),
            g: self.g.min(a),
            b: self.b.min(a),
            a,
        }
    }

    /// Scale all four channels by a float opacity in `[0, 1]`. Out-of-range
    /// channels are [`saturated`](Self::saturated) first.
    pub fn scale_opacity(&mut self, opacity: f32) -> &mut Self {
        let o = fixed_math::from_float(opacity);
        if o == UNIT {
            return self;
        }
        *self = self.saturated();
        self.r = fixed_math::mul(self.r, o);
        self.g = fixed_math::mul(self.g, o);
        self.b = fixed_math::mul(self.b, o);
        self.a = fixed_math::mul(self.a, o);
        self
    }

    // ------------------------------------------------------------------------
    // Interpolation
    // ------------------------------------------------------------------------

    /// Interpolate two 8-bit pixels in premultiplied space.
    ///
    /// Both samples are lifted through their own construction rule first, so
    /// straight-alpha inputs are premultiplied before mixing.
    pub fn lerp_q8<P>(left: &P, right: &P, weight: u8) -> Self
    where
        Self: ValueSetter<P>,
    {
        let l = Self::from_pixel(left);
        let r = Self::from_pixel(right);
        let (lx, rx) = fixed_math::lerp_weights_255(weight);
        Self {
            r: fixed_math::lerp_255(l.r, r.r, lx, rx),
            g: fixed_math::lerp_255(l.g, r.g, lx, rx),
            b: fixed_math::lerp_255(l.b, r.b, lx, rx),
            a: fixed_math::lerp_255(l.a, r.a, lx, rx),
        }
    }

    /// Interpolate two premultiplied colors; `amount` is fixed-point in
    /// `[0, UNIT]`. Both ends are [`saturated`](Self::saturated) first.
    pub fn lerp(left: &Self, right: &Self, amount: u32) -> Self {
        let (left, right) = (left.saturated(), right.saturated());
        Self {
            r: fixed_math::lerp(left.r, right.r, amount),
            g: fixed_math::lerp(left.g, right.g, amount),
            b: fixed_math::lerp(left.b, right.b, amount),
            a: fixed_math::lerp(left.a, right.a, amount),
        }
    }
}

// ============================================================================
// Arithmetic operators
// ============================================================================

impl Mul for QVectorBgrp {
    type Output = Self;

    /// Channel-wise product, alpha included, of the saturated operands.
    fn mul(self, rhs: Self) -> Self {
        let (lhs, rhs) = (self.saturated(), rhs.saturated());
        Self {
            r: (lhs.r * rhs.r) >> UNIT_SHIFT,
            g: (lhs.g * rhs.g) >> UNIT_SHIFT,
            b: (lhs.b * rhs.b) >> UNIT_SHIFT,
            a: (lhs.a * rhs.a) >> UNIT_SHIFT,
        }
    }
}

impl Mul<QVectorBgrp> for QVectorBgr {
    type Output = QVectorBgrp;

    /// Opaque color times premultiplied color; the opaque side has an
    /// implicit alpha of `UNIT`, so the right operand's alpha is kept.
    fn mul(self, rhs: QVectorBgrp) -> QVectorBgrp {
        let rhs = rhs.saturated();
        QVectorBgrp {
            r: (self.r.min(UNIT) * rhs.r) >> UNIT_SHIFT,
            g: (self.g.min(UNIT) * rhs.g) >> UNIT_SHIFT,
            b: (self.b.min(UNIT) * rhs.b) >> UNIT_SHIFT,
            a: rhs.a,
        }
    }
}

impl Add for QVectorBgrp {
    type Output = Self;

    /// Channel-wise sum saturating at `UNIT`.
    fn add(self, rhs: Self) -> Self {
        Self {
            r: self.r.saturating_add(rhs.r).min(UNIT),
            g: self.g.saturating_add(rhs.g).min(UNIT),
            b: self.b.saturating_add(rhs.b).min(UNIT),
            a: self.a.saturating_add(rhs.a).min(UNIT),
        }
    }
}
