//! Scanline helpers over slices of concrete pixels.
//!
//! Each helper lifts pixels through the adapter traits, runs the quantized
//! operation and lowers the result back into the destination slice. The
//! pixel types are resolved at compile time; there is no per-pixel dispatch
//! on format.

use crate::adapter::{FromQuantized, ValueSetter};
use crate::compose::CompositeMode;
use crate::error::{PixelError, PixelResult};
use crate::qvector_bgr::QVectorBgr;
use crate::qvector_bgrp::QVectorBgrp;

fn check_len(expected: usize, actual: usize) -> PixelResult<()> {
    if expected != actual {
        tracing::debug!(expected, actual, "rejecting span with mismatched length");
        return Err(PixelError::length_mismatch(expected, actual));
    }
    Ok(())
}

/// Composite `src` onto `dst` pixel by pixel with `mode`.
///
/// The `*Atop` modes leave color channels on the `UNIT * UNIT` scale, and
/// lowering saturates them. With those modes every non-zero destination
/// channel reads back as 255, even under a fully transparent source.
#[tracing::instrument(level = "trace", skip_all, fields(len = dst.len(), mode = ?mode))]
pub fn compose_span<D, S>(dst: &mut [D], src: &[S], mode: CompositeMode) -> PixelResult<()>
where
    QVectorBgrp: ValueSetter<D> + ValueSetter<S>,
    D: FromQuantized<QVectorBgrp>,
{
    check_len(dst.len(), src.len())?;
    for (d, s) in dst.iter_mut().zip(src) {
        let mut acc = QVectorBgrp::from_pixel(&*d);
        acc.compose(&QVectorBgrp::from_pixel(s), mode);
        *d = D::create_from(&acc);
    }
    Ok(())
}

/// Paint premultiplied sources onto an opaque background span.
#[tracing::instrument(level = "trace", skip_all, fields(len = dst.len()))]
pub fn blend_span_opaque<D, S>(dst: &mut [D], src: &[S]) -> PixelResult<()>
where
    QVectorBgr: ValueSetter<D>,
    QVectorBgrp: ValueSetter<S>,
    D: FromQuantized<QVectorBgr>,
{
    check_len(dst.len(), src.len())?;
    for (d, s) in dst.iter_mut().zip(src) {
        let mut bg = QVectorBgr::from_pixel(&*d);
        bg.apply_blend(&QVectorBgrp::from_pixel(s));
        *d = D::create_from(&bg);
    }
    Ok(())
}

/// Interpolate `left` towards `right` by an 8-bit weight, in premultiplied
/// space, writing into `dst`.
#[tracing::instrument(level = "trace", skip_all, fields(len = dst.len(), weight = weight))]
pub fn lerp_span<D, P>(dst: &mut [D], left: &[P], right: &[P], weight: u8) -> PixelResult<()>
where
    QVectorBgrp: ValueSetter<P>,
    D: FromQuantized<QVectorBgrp>,
{
    check_len(dst.len(), left.len())?;
    check_len(dst.len(), right.len())?;
    for ((d, l), r) in dst.iter_mut().zip(left).zip(right) {
        *d = D::create_from(&QVectorBgrp::lerp_q8(l, r, weight));
    }
    Ok(())
}
