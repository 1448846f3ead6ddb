//! Concrete 8-bit pixel types and their adapters.
//!
//! These are the storage-side inhabitants of the adapter seam: plain
//! `#[repr(C)]` structs whose field order is the memory layout. Each type
//! declares its premultiplication state by the construction rule it picks
//! when lifted into a [`QVectorBgrp`]:
//!
//! | type | kind |
//! |---|---|
//! | `Rgb24`, `Bgr24` | opaque |
//! | `Rgba32`, `Bgra32`, `Argb32` | straight alpha |
//! | `Rgbp32`, `Bgrp32` | premultiplied alpha |
//!
//! Constructors always take channels in `r, g, b[, a]` order regardless of
//! the layout.

use crate::adapter::{FromQuantized, ValueSetter};
use crate::qvector_bgr::QVectorBgr;
use crate::qvector_bgrp::QVectorBgrp;

// ============================================================================
// Opaque layouts
// ============================================================================

/// 24-bit RGB, R first in memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(C)]
pub struct Rgb24 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb24 {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// 24-bit BGR, B first in memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(C)]
pub struct Bgr24 {
    pub b: u8,
    pub g: u8,
    pub r: u8,
}

impl Bgr24 {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { b, g, r }
    }
}

// ============================================================================
// Straight-alpha layouts
// ============================================================================

/// 32-bit RGBA, straight alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(C)]
pub struct Rgba32 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba32 {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// 32-bit BGRA, straight alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(C)]
pub struct Bgra32 {
    pub b: u8,
    pub g: u8,
    pub r: u8,
    pub a: u8,
}

impl Bgra32 {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { b, g, r, a }
    }
}

/// 32-bit ARGB, straight alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(C)]
pub struct Argb32 {
    pub a: u8,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Argb32 {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { a, r, g, b }
    }
}

// ============================================================================
// Premultiplied layouts
// ============================================================================

/// 32-bit RGBA, premultiplied alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(C)]
pub struct Rgbp32 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgbp32 {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// 32-bit BGRA, premultiplied alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(C)]
pub struct Bgrp32 {
    pub b: u8,
    pub g: u8,
    pub r: u8,
    pub a: u8,
}

impl Bgrp32 {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { b, g, r, a }
    }
}

// ============================================================================
// Lifting into QVectorBgr
// ============================================================================

impl ValueSetter<Rgb24> for QVectorBgr {
    fn set_value(&mut self, value: &Rgb24) {
        *self = QVectorBgr::from_q8(value.r, value.g, value.b);
    }
}

impl ValueSetter<Bgr24> for QVectorBgr {
    fn set_value(&mut self, value: &Bgr24) {
        *self = QVectorBgr::from_q8(value.r, value.g, value.b);
    }
}

// ============================================================================
// Lifting into QVectorBgrp
// ============================================================================

impl ValueSetter<Rgb24> for QVectorBgrp {
    fn set_value(&mut self, value: &Rgb24) {
        *self = QVectorBgrp::from_opaque(value.r, value.g, value.b);
    }
}

impl ValueSetter<Bgr24> for QVectorBgrp {
    fn set_value(&mut self, value: &Bgr24) {
        *self = QVectorBgrp::from_opaque(value.r, value.g, value.b);
    }
}

impl ValueSetter<Rgba32> for QVectorBgrp {
    fn set_value(&mut self, value: &Rgba32) {
        *self = QVectorBgrp::from_straight(value.r, value.g, value.b, value.a);
    }
}

impl ValueSetter<Bgra32> for QVectorBgrp {
    fn set_value(&mut self, value: &Bgra32) {
        *self = QVectorBgrp::from_straight(value.r, value.g, value.b, value.a);
    }
}

impl ValueSetter<Argb32> for QVectorBgrp {
    fn set_value(&mut self, value: &Argb32) {
        *self = QVectorBgrp::from_straight(value.r, value.g, value.b, value.a);
    }
}

impl ValueSetter<Rgbp32> for QVectorBgrp {
    fn set_value(&mut self, value: &Rgbp32) {
        *self = QVectorBgrp::from_premultiplied(value.r, value.g, value.b, value.a);
    }
}

impl ValueSetter<Bgrp32> for QVectorBgrp {
    fn set_value(&mut self, value: &Bgrp32) {
        *self = QVectorBgrp::from_premultiplied(value.r, value.g, value.b, value.a);
    }
}

// ============================================================================
// Lowering from QVectorBgr
// ============================================================================

impl FromQuantized<QVectorBgr> for Rgb24 {
    fn create_from(value: &QVectorBgr) -> Self {
        Rgb24::new(value.r_q8(), value.g_q8(), value.b_q8())
    }
}

impl FromQuantized<QVectorBgr> for Bgr24 {
    fn create_from(value: &QVectorBgr) -> Self {
        Bgr24::new(value.r_q8(), value.g_q8(), value.b_q8())
    }
}

impl FromQuantized<QVectorBgr> for Rgba32 {
    fn create_from(value: &QVectorBgr) -> Self {
        Rgba32::new(value.r_q8(), value.g_q8(), value.b_q8(), 255)
    }
}

impl FromQuantized<QVectorBgr> for Bgra32 {
    fn create_from(value: &QVectorBgr) -> Self {
        Bgra32::new(value.r_q8(), value.g_q8(), value.b_q8(), 255)
    }
}

impl FromQuantized<QVectorBgr> for Argb32 {
    fn create_from(value: &QVectorBgr) -> Self {
        Argb32::new(value.r_q8(), value.g_q8(), value.b_q8(), 255)
    }
}

impl FromQuantized<QVectorBgr> for Rgbp32 {
    fn create_from(value: &QVectorBgr) -> Self {
        Rgbp32::new(value.r_q8(), value.g_q8(), value.b_q8(), 255)
    }
}

impl FromQuantized<QVectorBgr> for Bgrp32 {
    fn create_from(value: &QVectorBgr) -> Self {
        Bgrp32::new(value.r_q8(), value.g_q8(), value.b_q8(), 255)
    }
}

// ============================================================================
// Lowering from QVectorBgrp
// ============================================================================

impl FromQuantized<QVectorBgrp> for Rgb24 {
    fn create_from(value: &QVectorBgrp) -> Self {
        let (r, g, b, _) = value.to_straight_q8();
        Rgb24::new(r, g, b)
    }
}

impl FromQuantized<QVectorBgrp> for Bgr24 {
    fn create_from(value: &QVectorBgrp) -> Self {
        let (r, g, b, _) = value.to_straight_q8();
        Bgr24::new(r, g, b)
    }
}

impl FromQuantized<QVectorBgrp> for Rgba32 {
    fn create_from(value: &QVectorBgrp) -> Self {
        let (r, g, b, a) = value.to_straight_q8();
        Rgba32::new(r, g, b, a)
    }
}

impl FromQuantized<QVectorBgrp> for Bgra32 {
    fn create_from(value: &QVectorBgrp) -> Self {
        let (r, g, b, a) = value.to_straight_q8();
        Bgra32::new(r, g, b, a)
    }
}

impl FromQuantized<QVectorBgrp> for Argb32 {
    fn create_from(value: &QVectorBgrp) -> Self {
        let (r, g, b, a) = value.to_straight_q8();
        Argb32::new(r, g, b, a)
    }
}

impl FromQuantized<QVectorBgrp> for Rgbp32 {
    fn create_from(value: &QVectorBgrp) -> Self {
        let (r, g, b, a) = value.to_premultiplied_q8();
        Rgbp32::new(r, g, b, a)
    }
}

impl FromQuantized<QVectorBgrp> for Bgrp32 {
    fn create_from(value: &QVectorBgrp) -> Self {
        let (r, g, b, a) = value.to_premultiplied_q8();
        Bgrp32::new(r, g, b, a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixed_math::UNIT;

    #[test]
    fn test_field_order_is_layout() {
        assert_eq!(core::mem::size_of::<Bgr24>(), 3);
        assert_eq!(core::mem::size_of::<Argb32>(), 4);
        let p = Bgra32::new(1, 2, 3, 4);
        assert_eq!((p.b, p.g, p.r, p.a), (3, 2, 1, 4));
        let p = Argb32::new(1, 2, 3, 4);
        assert_eq!((p.a, p.r, p.g, p.b), (4, 1, 2, 3));
    }

    #[test]
    fn test_opaque_lift_forces_alpha() {
        let q = QVectorBgrp::from_pixel(&Bgr24::new(5, 6, 7));
        assert_eq!(q.a, UNIT);
        assert_eq!(Bgr24::create_from(&q), Bgr24::new(5, 6, 7));
    }

    #[test]
    fn test_straight_layouts_agree() {
        let a = QVectorBgrp::from_pixel(&Rgba32::new(200, 100, 50, 77));
        let b = QVectorBgrp::from_pixel(&Bgra32::new(200, 100, 50, 77));
        let c = QVectorBgrp::from_pixel(&Argb32::new(200, 100, 50, 77));
        assert_eq!(a, b);
        assert_eq!(a, c);
    }

    #[test]
    fn test_straight_and_premultiplied_lift_differently() {
        let s = QVectorBgrp::from_pixel(&Rgba32::new(200, 200, 200, 100));
        let p = QVectorBgrp::from_pixel(&Rgbp32::new(200, 200, 200, 100));
        assert!(s.r < p.r);
        assert_eq!(s.a, p.a);
    }

    #[test]
    fn test_premultiplied_roundtrip_is_exact() {
        let px = Bgrp32::new(60, 30, 10, 90);
        let q = QVectorBgrp::from_pixel(&px);
        assert_eq!(Bgrp32::create_from(&q), px);
    }

    #[test]
    fn test_lower_transparent() {
        let q = QVectorBgrp::TRANSPARENT;
        assert_eq!(Rgba32::create_from(&q), Rgba32::new(0, 0, 0, 0));
        assert_eq!(Rgb24::create_from(&q), Rgb24::new(0, 0, 0));
    }

    #[test]
    fn test_lower_opaque_vector_into_alpha_layouts() {
        let q = QVectorBgr::from_q8(9, 8, 7);
        assert_eq!(Argb32::create_from(&q), Argb32::new(9, 8, 7, 255));
        assert_eq!(Rgbp32::create_from(&q), Rgbp32::new(9, 8, 7, 255));
    }
}
