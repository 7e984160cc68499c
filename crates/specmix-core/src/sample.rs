//! Sample data formats for intensity planes.
//!
//! The mixing pipeline works on raw intensity values (a u8 plane carries
//! 0..=255, not a normalized unit range), because the final reconstruction
//! step min-max rescales the result anyway. [`Sample`] converts between the
//! stored representation and the f64 values the transforms operate on.

/// Trait for plane sample types.
///
/// Implemented for `u8` (8-bit display intensities) and `f32`
/// (real-valued working data such as frequency masks).
pub trait Sample: Copy + Clone + Default + Send + Sync + PartialOrd + 'static {
    /// Number of bits per sample.
    const BITS: u32;

    /// Whether this is a floating-point format.
    const IS_FLOAT: bool;

    /// Maximum representable intensity (255 for u8, f32::MAX for f32).
    const MAX_VALUE: f64;

    /// Convert to f64, preserving the raw intensity scale.
    fn to_f64(self) -> f64;

    /// Convert from f64.
    ///
    /// Integer formats clamp to their representable range and round to
    /// nearest; floats cast directly.
    fn from_f64(v: f64) -> Self;

    /// Zero value.
    fn zero() -> Self;

    /// One value.
    fn one() -> Self;
}

impl Sample for u8 {
    const BITS: u32 = 8;
    const IS_FLOAT: bool = false;
    const MAX_VALUE: f64 = 255.0;

    #[inline]
    fn to_f64(self) -> f64 {
        self as f64
    }

    #[inline]
    fn from_f64(v: f64) -> Self {
        v.clamp(0.0, 255.0).round() as u8
    }

    #[inline]
    fn zero() -> Self {
        0
    }

    #[inline]
    fn one() -> Self {
        1
    }
}

impl Sample for f32 {
    const BITS: u32 = 32;
    const IS_FLOAT: bool = true;
    const MAX_VALUE: f64 = f32::MAX as f64;

    #[inline]
    fn to_f64(self) -> f64 {
        self as f64
    }

    #[inline]
    fn from_f64(v: f64) -> Self {
        v as f32
    }

    #[inline]
    fn zero() -> Self {
        0.0
    }

    #[inline]
    fn one() -> Self {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_u8_roundtrip() {
        assert_eq!(u8::from_f64(128.0), 128);
        assert_eq!(200u8.to_f64(), 200.0);
    }

    #[test]
    fn test_u8_clamps_and_rounds() {
        assert_eq!(u8::from_f64(-5.0), 0);
        assert_eq!(u8::from_f64(300.0), 255);
        assert_eq!(u8::from_f64(127.6), 128);
    }

    #[test]
    fn test_f32_passthrough() {
        assert_eq!(f32::from_f64(0.25), 0.25f32);
        assert_eq!(0.5f32.to_f64(), 0.5);
    }
}
