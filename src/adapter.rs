//! Capability traits connecting concrete 8-bit pixel types to the quantized
//! colors.
//!
//! Pixel formats and quantized colors are joined at compile time: a pixel
//! type implements one small adapter per quantized color it supports, and
//! generic code resolves the right implementation at each call site with no
//! runtime dispatch.
//!
//! - [`ValueSetter`] is implemented *on the quantized color* for each pixel
//!   type it can be filled from.
//! - [`CopyValueTo`] is the reverse view of the same capability; it is
//!   provided for every pixel type through a blanket impl so that generic
//!   code can write `pixel.copy_to(&mut accumulator)`.
//! - [`FromQuantized`] is implemented *on the pixel type* to materialize it
//!   back out of a quantized color.

/// "Settable from `T`": pull channel data out of a pixel value.
pub trait ValueSetter<T> {
    fn set_value(&mut self, value: &T);
}

/// "Copy myself into `T`".
pub trait CopyValueTo<T> {
    fn copy_to(&self, target: &mut T);
}

impl<P, Q> CopyValueTo<Q> for P
where
    Q: ValueSetter<P>,
{
    #[inline]
    fn copy_to(&self, target: &mut Q) {
        target.set_value(self);
    }
}

/// "Build me from a `Q`": lower a quantized color into a storage format.
pub trait FromQuantized<Q>: Sized {
    fn create_from(value: &Q) -> Self;
}

/// Lift `pixel` into a fresh quantized value.
#[inline]
pub fn lift<Q, P>(pixel: &P) -> Q
where
    Q: Default + ValueSetter<P>,
{
    let mut q = Q::default();
    pixel.copy_to(&mut q);
    q
}

/// Lower a quantized value into pixel type `P`.
#[inline]
pub fn lower<P, Q>(value: &Q) -> P
where
    P: FromQuantized<Q>,
{
    P::create_from(value)
}

/// Convert between two pixel types through the quantized color `Q`.
#[inline]
pub fn convert<Q, S, D>(src: &S) -> D
where
    Q: Default + ValueSetter<S>,
    D: FromQuantized<Q>,
{
    lower(&lift::<Q, S>(src))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixel::{Bgr24, Bgra32, Rgb24, Rgba32, Rgbp32};
    use crate::qvector_bgr::QVectorBgr;
    use crate::qvector_bgrp::QVectorBgrp;

    #[test]
    fn test_copy_to_delegates_to_setter() {
        let px = Rgba32::new(10, 20, 30, 255);
        let mut acc = QVectorBgrp::TRANSPARENT;
        px.copy_to(&mut acc);
        assert_eq!(acc, QVectorBgrp::from_opaque(10, 20, 30));
    }

    #[test]
    fn test_lift_lower() {
        let q: QVectorBgr = lift(&Rgb24::new(1, 2, 3));
        let back: Bgr24 = lower(&q);
        assert_eq!(back, Bgr24::new(1, 2, 3));
    }

    #[test]
    fn test_convert_straight_to_premultiplied() {
        let p: Rgbp32 = convert::<QVectorBgrp, _, _>(&Bgra32::new(255, 128, 0, 128));
        assert_eq!(p.a, 128);
        assert_eq!(p.r, 128);
        assert_eq!(p.g, 64);
        assert_eq!(p.b, 0);
    }

    #[test]
    fn test_convert_premultiplied_to_straight() {
        let p: Rgba32 = convert::<QVectorBgrp, _, _>(&Rgbp32::new(64, 32, 0, 128));
        assert_eq!(p.a, 128);
        assert!(p.r.abs_diff(128) <= 1, "r={}", p.r);
        assert!(p.g.abs_diff(64) <= 1, "g={}", p.g);
        assert_eq!(p.b, 0);
    }
}
