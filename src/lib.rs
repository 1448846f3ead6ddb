//! # pixel-qvector
//!
//! Quantized fixed-point pixel colors and their Porter-Duff compositing
//! algebra.
//!
//! Concrete 8-bit pixels are lifted into one of two quantized accumulators,
//! worked on in fixed-point, and lowered back out:
//!
//! - [`QVectorBgr`]: opaque, non-premultiplied R, G, B.
//! - [`QVectorBgrp`]: alpha-premultiplied R, G, B, A; the space in which all
//!   compositing happens.
//!
//! ## Architecture
//!
//! 1. **Fixed-point kernel** ([`fixed_math`]): scale, 8-bit conversions,
//!    reciprocal-based unpremultiplication
//! 2. **Quantized colors** ([`qvector_bgr`], [`qvector_bgrp`]): constructors,
//!    read-back views, interpolation, arithmetic
//! 3. **Compositing** ([`compose`]): `over` / `atop` with source, additive
//!    and multiplicative blend terms
//! 4. **Adapters** ([`adapter`], [`pixel`]): compile-time seams between
//!    pixel layouts and the quantized colors
//! 5. **Spans** ([`span`]): the same operations over pixel slices
//!
//! ```
//! use pixel_qvector::{CompositeMode, QVectorBgrp, Rgba32};
//! use pixel_qvector::adapter::FromQuantized;
//!
//! let mut dst = QVectorBgrp::BLACK;
//! dst.compose(&QVectorBgrp::from_pixel(&Rgba32::new(255, 255, 255, 128)), CompositeMode::SourceOver);
//! assert_eq!(Rgba32::create_from(&dst), Rgba32::new(128, 128, 128, 255));
//! ```

pub mod adapter;
pub mod compose;
pub mod error;
pub mod fixed_math;
pub mod pixel;
pub mod qvector_bgr;
pub mod qvector_bgrp;
pub mod span;

pub use compose::CompositeMode;
pub use error::{PixelError, PixelResult};
pub use pixel::{Argb32, Bgr24, Bgra32, Bgrp32, Rgb24, Rgba32, Rgbp32};
pub use qvector_bgr::QVectorBgr;
pub use qvector_bgrp::QVectorBgrp;
