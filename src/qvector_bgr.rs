//! Opaque quantized color.
//!
//! `QVectorBgr` accumulates R, G, B on the fixed-point scale of
//! [`fixed_math`](crate::fixed_math) with no alpha channel. It is the
//! accumulation target for pixel formats that carry no alpha, and the
//! background that [`QVectorBgr::apply_blend`] paints premultiplied sources
//! onto.

use crate::adapter::ValueSetter;
use crate::fixed_math::{self, UNIT, UNIT_SHIFT};
use crate::qvector_bgrp::QVectorBgrp;

/// Non-premultiplied, always-opaque fixed-point color.
///
/// Every field is in `[0, UNIT]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QVectorBgr {
    pub r: u32,
    pub g: u32,
    pub b: u32,
}

impl QVectorBgr {
    pub const BLACK: Self = Self { r: 0, g: 0, b: 0 };
    pub const WHITE: Self = Self {
        r: UNIT,
        g: UNIT,
        b: UNIT,
    };

    /// Construct from fixed-point channels.
    pub fn new(r: u32, g: u32, b: u32) -> Self {
        debug_assert!(r <= UNIT && g <= UNIT && b <= UNIT);
        Self { r, g, b }
    }

    /// Construct from 8-bit channels.
    pub fn from_q8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: fixed_math::from_255(r),
            g: fixed_math::from_255(g),
            b: fixed_math::from_255(b),
        }
    }

    /// Lift any pixel type that knows how to donate its channels.
    pub fn from_pixel<P>(pixel: &P) -> Self
    where
        Self: ValueSetter<P>,
    {
        let mut v = Self::default();
        v.set_value(pixel);
        v
    }

    #[inline]
    pub fn r_q8(&self) -> u8 {
        fixed_math::to_255(self.r)
    }

    #[inline]
    pub fn g_q8(&self) -> u8 {
        fixed_math::to_255(self.g)
    }

    #[inline]
    pub fn b_q8(&self) -> u8 {
        fixed_math::to_255(self.b)
    }

    /// Interpolate two 8-bit pixels. `weight == 0` yields `left` and
    /// `weight == 255` yields `right`, both exactly.
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
        }
    }

    /// Interpolate two quantized colors; `amount` is fixed-point in
    /// `[0, UNIT]`.
    pub fn lerp(left: &Self, right: &Self, amount: u32) -> Self {
        Self {
            r: fixed_math::lerp(left.r, right.r, amount),
            g: fixed_math::lerp(left.g, right.g, amount),
            b: fixed_math::lerp(left.b, right.b, amount),
        }
    }

    /// Composite a premultiplied source onto this opaque background.
    ///
    /// The source channels already carry their coverage, so they are added
    /// after the background is scaled by the inverse source alpha.
    pub fn apply_blend(&mut self, src: &QVectorBgrp) {
        if src.a == 0 {
            return;
        }
        let inv = UNIT - src.a;
        self.r = (((self.r * inv) >> UNIT_SHIFT) + src.r).min(UNIT);
        self.g = (((self.g * inv) >> UNIT_SHIFT) + src.g).min(UNIT);
        self.b = (((self.b * inv) >> UNIT_SHIFT) + src.b).min(UNIT);
    }
}

impl From<QVectorBgr> for QVectorBgrp {
    fn from(c: QVectorBgr) -> Self {
        QVectorBgrp::new(c.r, c.g, c.b, UNIT)
    }
}
