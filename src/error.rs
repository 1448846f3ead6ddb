//! Error type for the span-level helpers.
//!
//! Per-pixel arithmetic cannot fail; only operations over caller-supplied
//! slices have a recoverable error path.

/// Convenience result type used by the span helpers.
pub type PixelResult<T> = Result<T, PixelError>;

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum PixelError {
    /// A source span does not have as many pixels as the destination.
    #[error("span length mismatch: destination has {expected} pixels, source has {actual}")]
    LengthMismatch { expected: usize, actual: usize },
}

impl PixelError {
    /// Build a [`PixelError::LengthMismatch`] value.
    pub fn length_mismatch(expected: usize, actual: usize) -> Self {
        Self::LengthMismatch { expected, actual }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let e = PixelError::length_mismatch(4, 3);
        assert_eq!(
            e.to_string(),
            "span length mismatch: destination has 4 pixels, source has 3"
        );
    }
}
