//! Porter-Duff compositing on premultiplied quantized colors.
//!
//! Two primitive operators, [`QVectorBgrp::over`] and [`QVectorBgrp::atop`],
//! take the arriving layer `src` and a `blend` term. The blend term only
//! contributes in the region where both layers have coverage; substituting
//! `src`, `dst + src` or `dst * src` there gives the six named operators.
//!
//! Weights follow the classic decomposition of the destination/source
//! coverage into three disjoint regions:
//!
//! ```text
//! wmix = dst.a * src.a        both layers
//! wdst = dst.a - wmix         destination only
//! wsrc = src.a - wmix         source only
//! ```

use crate::fixed_math::{UNIT, UNIT_SHIFT};
use crate::qvector_bgrp::QVectorBgrp;

// ============================================================================
// CompositeMode
// ============================================================================

/// Runtime-selectable compositing operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[repr(u8)]
pub enum CompositeMode {
    #[default]
    SourceOver = 0,
    SourceAtop = 1,
    AddOver = 2,
    AddAtop = 3,
    MultiplyOver = 4,
    MultiplyAtop = 5,
}

impl CompositeMode {
    pub const ALL: [CompositeMode; 6] = [
        CompositeMode::SourceOver,
        CompositeMode::SourceAtop,
        CompositeMode::AddOver,
        CompositeMode::AddAtop,
        CompositeMode::MultiplyOver,
        CompositeMode::MultiplyAtop,
    ];

    /// `true` for the `atop` family, which keeps destination alpha.
    pub fn is_atop(self) -> bool {
        matches!(
            self,
            CompositeMode::SourceAtop | CompositeMode::AddAtop | CompositeMode::MultiplyAtop
        )
    }
}

// ============================================================================
// Operators
// ============================================================================

impl QVectorBgrp {
    /// Porter-Duff "over" with a custom blend term.
    ///
    /// In straight-color terms each channel is
    /// `(dst.c * wdst + src.c * wsrc + blend.c * wmix) >> UNIT_SHIFT` and the
    /// new alpha is `wdst + src.a`. A premultiplied channel already carries
    /// its own coverage, so `dst.c * wdst` is computed as
    /// `dst.pre * (UNIT - src.a)` and `src.c * wsrc` as
    /// `src.pre * (UNIT - dst.a)`; only the blend term is unpremultiplied.
    ///
    /// Both layers are [`saturated`](QVectorBgrp::saturated) on entry, so a
    /// destination left on the `UNIT * UNIT` scale by [`atop`] composes as
    /// a saturated color. A fully transparent `src` leaves `self` untouched.
    ///
    /// [`atop`]: QVectorBgrp::atop
    pub fn over(&mut self, src: &QVectorBgrp, blend: &QVectorBgrp) {
        if src.a == 0 {
            return;
        }
        *self = self.saturated();
        let src = src.saturated();
        let wmix = (self.a * src.a) >> UNIT_SHIFT;
        let wdst = self.a - wmix;
        let a = wdst + src.a;

        let inv_src = UNIT - src.a;
        let inv_dst = UNIT - self.a;
        let mix = blend.unpremultiplied();

        self.r = ((self.r * inv_src + src.r * inv_dst + mix.r * wmix) >> UNIT_SHIFT).min(a);
        self.g = ((self.g * inv_src + src.g * inv_dst + mix.g * wmix) >> UNIT_SHIFT).min(a);
        self.b = ((self.b * inv_src + src.b * inv_dst + mix.b * wmix) >> UNIT_SHIFT).min(a);
        self.a = a;
    }

    /// Porter-Duff "atop" with a custom blend term. Destination alpha is
    /// unchanged.
    ///
    /// The weighted sum is the destination and mix terms of [`over`] without
    /// the final `>> UNIT_SHIFT`, so the color channels come out on the
    /// `UNIT * UNIT` scale rather than `[0, UNIT]`. For an opaque destination
    /// `atop(..) >> UNIT_SHIFT` equals `over(..)` channel for channel.
    ///
    /// Inputs are [`saturated`](QVectorBgrp::saturated) on entry, which
    /// bounds every output channel by `UNIT * UNIT = 1 << 30`.
    ///
    /// [`over`]: QVectorBgrp::over
    pub fn atop(&mut self, src: &QVectorBgrp, blend: &QVectorBgrp) {
        *self = self.saturated();
        let src = src.saturated();
        let wmix = (self.a * src.a) >> UNIT_SHIFT;
        let inv_src = UNIT - src.a;
        let mix = blend.unpremultiplied();

        self.r = self.r * inv_src + mix.r * wmix;
        self.g = self.g * inv_src + mix.g * wmix;
        self.b = self.b * inv_src + mix.b * wmix;
    }

    /// Source over destination; the source itself fills the overlap.
    pub fn source_over(&mut self, src: &QVectorBgrp) {
        self.over(src, src);
    }

    /// Source atop destination; the source itself fills the overlap.
    pub fn source_atop(&mut self, src: &QVectorBgrp) {
        self.atop(src, src);
    }

    /// Over with `dst + src`, saturated at `UNIT`, in the overlap.
    pub fn add_over(&mut self, src: &QVectorBgrp) {
        let blend = *self + *src;
        self.over(src, &blend);
    }

    /// Atop with `dst + src`, saturated at `UNIT`, in the overlap.
    pub fn add_atop(&mut self, src: &QVectorBgrp) {
        let blend = *self + *src;
        self.atop(src, &blend);
    }

    /// Over with `dst * src` in the overlap.
    pub fn multiply_over(&mut self, src: &QVectorBgrp) {
        let blend = *self * *src;
        self.over(src, &blend);
    }

    /// Atop with `dst * src` in the overlap.
    pub fn multiply_atop(&mut self, src: &QVectorBgrp) {
        let blend = *self * *src;
        self.atop(src, &blend);
    }

    /// Dispatch to the operator named by `mode`.
    pub fn compose(&mut self, src: &QVectorBgrp, mode: CompositeMode) {
        match mode {
            CompositeMode::SourceOver => self.source_over(src),
            CompositeMode::SourceAtop => self.source_atop(src),
            CompositeMode::AddOver => self.add_over(src),
            CompositeMode::AddAtop => self.add_atop(src),
            CompositeMode::MultiplyOver => self.multiply_over(src),
            CompositeMode::MultiplyAtop => self.multiply_atop(src),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixed_math;
    use crate::pixel::Rgba32;

    fn half_white() -> QVectorBgrp {
        QVectorBgrp::from_pixel(&Rgba32::new(255, 255, 255, 128))
    }

    #[test]
    fn test_default_mode() {
        assert_eq!(CompositeMode::default(), CompositeMode::SourceOver);
        assert_eq!(CompositeMode::ALL.iter().filter(|m| m.is_atop()).count(), 3);
    }

    #[test]
    fn test_source_over_half_white_on_black() {
        let mut dst = QVectorBgrp::BLACK;
        let src = half_white();
        dst.source_over(&src);
        assert_eq!(dst.a, UNIT);
        assert_eq!(dst.r, src.a);
        assert!(dst.r.abs_diff(UNIT / 2) < UNIT / 128, "r={}", dst.r);
        assert_eq!(dst.g, dst.r);
        assert_eq!(dst.b, dst.r);
        assert_eq!(dst.to_straight_q8(), (128, 128, 128, 255));
    }

    #[test]
    fn test_source_over_transparent_src_is_noop() {
        let mut dst = QVectorBgrp::from_straight(10, 20, 30, 40);
        let before = dst;
        dst.source_over(&QVectorBgrp::TRANSPARENT);
        assert_eq!(dst, before);
    }

    #[test]
    fn test_source_over_opaque_src_replaces() {
        let src = QVectorBgrp::from_opaque(9, 99, 199);
        for dst in [
            QVectorBgrp::TRANSPARENT,
            QVectorBgrp::BLACK,
            QVectorBgrp::from_straight(200, 100, 50, 77),
        ] {
            let mut d = dst;
            d.source_over(&src);
            assert_eq!(d, src);
        }
    }

    #[test]
    fn test_source_over_onto_transparent_copies_src() {
        let src = QVectorBgrp::from_straight(200, 100, 50, 77);
        let mut dst = QVectorBgrp::TRANSPARENT;
        dst.source_over(&src);
        assert_eq!(dst, src);
    }

    #[test]
    fn test_source_over_alpha_accumulates() {
        let mut dst = half_white();
        dst.source_over(&half_white());
        // 1 - (1 - 0.5)^2 = 0.75
        assert!(dst.a.abs_diff(UNIT * 3 / 4) < UNIT / 64, "a={}", dst.a);
        assert!(dst.r <= dst.a);
    }

    #[test]
    fn test_add_over_opaque() {
        let mut dst = QVectorBgrp::from_opaque(100, 200, 0);
        dst.add_over(&QVectorBgrp::from_opaque(100, 100, 30));
        assert_eq!(dst.a, UNIT);
        let (r, g, b, _) = dst.to_straight_q8();
        assert!(r.abs_diff(200) <= 1, "r={}", r);
        assert_eq!(g, 255);
        assert!(b.abs_diff(30) <= 1, "b={}", b);
    }

    #[test]
    fn test_multiply_over_opaque() {
        let mut dst = QVectorBgrp::from_opaque(255, 128, 0);
        dst.multiply_over(&QVectorBgrp::from_opaque(128, 255, 255));
        assert_eq!(dst.a, UNIT);
        let (r, g, b, _) = dst.to_straight_q8();
        assert!(r.abs_diff(128) <= 1, "r={}", r);
        assert!(g.abs_diff(128) <= 1, "g={}", g);
        assert_eq!(b, 0);
    }

    #[test]
    fn test_multiply_over_white_src_is_identity_on_opaque() {
        let mut dst = QVectorBgrp::from_opaque(12, 34, 56);
        let before = dst;
        dst.multiply_over(&QVectorBgrp::WHITE);
        assert_eq!(dst, before);
    }

    #[test]
    fn test_atop_keeps_destination_alpha() {
        let dst = QVectorBgrp::from_straight(10, 20, 30, 99);
        for mode in CompositeMode::ALL.iter().copied().filter(|m| m.is_atop()) {
            let mut d = dst;
            d.compose(&half_white(), mode);
            assert_eq!(d.a, dst.a, "{:?}", mode);
        }
    }

    #[test]
    fn test_atop_is_unshifted_over_on_opaque_destination() {
        let dst = QVectorBgrp::from_opaque(10, 120, 240);
        let src = QVectorBgrp::from_straight(200, 100, 50, 77);
        let pairs = [
            (CompositeMode::SourceAtop, CompositeMode::SourceOver),
            (CompositeMode::AddAtop, CompositeMode::AddOver),
            (CompositeMode::MultiplyAtop, CompositeMode::MultiplyOver),
        ];
        for (atop_mode, over_mode) in pairs {
            let mut atop = dst;
            atop.compose(&src, atop_mode);
            let mut over = dst;
            over.compose(&src, over_mode);
            assert_eq!(atop.r >> UNIT_SHIFT, over.r, "{:?}", atop_mode);
            assert_eq!(atop.g >> UNIT_SHIFT, over.g, "{:?}", atop_mode);
            assert_eq!(atop.b >> UNIT_SHIFT, over.b, "{:?}", atop_mode);
            assert_eq!(atop.a, over.a);
        }
    }

    #[test]
    fn test_atop_leaves_unit_range() {
        // The missing renormalization pushes visible channels past UNIT.
        let mut d = QVectorBgrp::from_opaque(128, 128, 128);
        d.source_atop(&QVectorBgrp::from_opaque(255, 255, 255));
        assert!(d.r > UNIT, "r={}", d.r);
        assert_eq!(d.r, UNIT * UNIT);
        assert_eq!(fixed_math::to_255(d.r), 255);
    }

    fn gray_after_atop() -> QVectorBgrp {
        let mut d = QVectorBgrp::from_opaque(128, 128, 128);
        d.source_atop(&QVectorBgrp::from_opaque(255, 255, 255));
        d
    }

    #[test]
    fn test_over_after_atop_saturates() {
        let src = QVectorBgrp::from_straight(10, 10, 10, 128);
        let mut d = gray_after_atop();
        d.source_over(&src);
        let mut expect = QVectorBgrp::WHITE;
        expect.source_over(&src);
        assert_eq!(d, expect);
    }

    #[test]
    fn test_every_mode_after_atop_stays_bounded() {
        let src = QVectorBgrp::from_straight(200, 100, 50, 77);
        for mode in CompositeMode::ALL {
            let mut d = gray_after_atop();
            d.compose(&src, mode);
            assert!(d.a <= UNIT, "{:?}", mode);
            if mode.is_atop() {
                assert!(d.r <= UNIT * UNIT, "{:?} r={}", mode, d.r);
            } else {
                assert!(d.r <= d.a && d.g <= d.a && d.b <= d.a, "{:?}", mode);
            }
        }
    }

    #[test]
    fn test_multiply_after_atop_treats_destination_as_saturated() {
        let src = QVectorBgrp::from_opaque(128, 64, 32);
        let mut over = gray_after_atop();
        over.multiply_over(&src);
        let mut expect = QVectorBgrp::WHITE;
        expect.multiply_over(&src);
        assert_eq!(over, expect);

        let mut atop = gray_after_atop();
        atop.multiply_atop(&src);
        let mut expect = QVectorBgrp::WHITE;
        expect.multiply_atop(&src);
        assert_eq!(atop, expect);
    }

    #[test]
    fn test_atop_chained_twice() {
        let mut d = gray_after_atop();
        d.source_atop(&QVectorBgrp::from_straight(0, 0, 0, 128));
        assert_eq!(d.a, UNIT);
        assert!(d.r <= UNIT * UNIT);
    }

    #[test]
    fn test_atop_on_transparent_destination_is_zero() {
        let mut d = QVectorBgrp::TRANSPARENT;
        d.source_atop(&half_white());
        assert_eq!(d, QVectorBgrp::TRANSPARENT);
    }

    #[test]
    fn test_compose_dispatch_matches_direct_calls() {
        let dst = QVectorBgrp::from_straight(50, 60, 70, 200);
        let src = QVectorBgrp::from_straight(250, 10, 128, 90);
        let mut a = dst;
        a.compose(&src, CompositeMode::MultiplyOver);
        let mut b = dst;
        b.multiply_over(&src);
        assert_eq!(a, b);
    }

    #[test]
    #[cfg(feature = "serde")]
    fn test_mode_names() {
        let m: CompositeMode = serde_json::from_str("\"multiply_atop\"").unwrap();
        assert_eq!(m, CompositeMode::MultiplyAtop);
        assert_eq!(
            serde_json::to_string(&CompositeMode::AddOver).unwrap(),
            "\"add_over\""
        );
    }
}
