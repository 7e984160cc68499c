//! Gaussian frequency-band masks.
//!
//! A mix call builds one centered 2D Gaussian per call and shares it across
//! all slots. [`RegionMode`] selects how the mask is applied to a shifted
//! spectrum: `Inner` keeps low frequencies (the Gaussian itself), `Outer`
//! keeps high frequencies (its complement), `None` leaves the spectrum
//! untouched.

use crate::OpsError;
use rustfft::num_complex::Complex64;
use specmix_core::Plane;

/// Sigma stabilizer so a zero spread still yields a finite mask.
const SIGMA_EPSILON: f64 = 1e-6;

/// Frequency-band masking policy for one mix call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegionMode {
    /// No masking; the spectrum passes through unchanged.
    #[default]
    None,
    /// Keep low frequencies (multiply by the Gaussian; low-pass).
    Inner,
    /// Keep high frequencies (multiply by `1 - Gaussian`; high-pass).
    Outer,
}

impl RegionMode {
    /// Normalizes a free-form UI label into a region mode.
    ///
    /// Labels containing `"Inner"` map to [`RegionMode::Inner`], labels
    /// containing `"Outer"` map to [`RegionMode::Outer`], anything else
    /// (including `"Off"`) maps to [`RegionMode::None`].
    pub fn from_label(label: &str) -> Self {
        if label.contains("Inner") {
            Self::Inner
        } else if label.contains("Outer") {
            Self::Outer
        } else {
            Self::None
        }
    }
}

impl std::fmt::Display for RegionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "None"),
            Self::Inner => write!(f, "Inner"),
            Self::Outer => write!(f, "Outer"),
        }
    }
}

/// Builds a centered 2D Gaussian low-pass mask.
///
/// `M[y, x] = exp(-((x - cx)^2 + (y - cy)^2) / (2 * (sigma^2 + 1e-6)))`
/// with `cx = width / 2`, `cy = height / 2` (integer centering, matching
/// the frequency-shift convention of [`crate::fft::forward_centered`]).
///
/// The mask depends only on geometry and sigma. Any finite sigma, including
/// zero and negative values, produces a finite mask thanks to the epsilon
/// stabilizer; the result is always in [0, 1].
pub fn gaussian(height: u32, width: u32, sigma: f64) -> Plane<f32> {
    let cx = (width / 2) as f64;
    let cy = (height / 2) as f64;
    let denom = 2.0 * (sigma * sigma + SIGMA_EPSILON);

    Plane::from_fn(width, height, |x, y| {
        let dx = x as f64 - cx;
        let dy = y as f64 - cy;
        (-(dx * dx + dy * dy) / denom).exp() as f32
    })
}

/// Applies the region mask to a center-shifted spectrum in place.
///
/// The spectrum and mask must share dimensions; this is validated by the
/// mixer before any spectrum exists, so here it is a debug assertion only.
pub fn apply_region(mode: RegionMode, spectrum: &mut [Complex64], mask: &Plane<f32>) {
    debug_assert_eq!(spectrum.len(), mask.len(), "spectrum/mask size mismatch");

    match mode {
        RegionMode::None => {}
        RegionMode::Inner => {
            for (v, m) in spectrum.iter_mut().zip(mask.data()) {
                *v = v.scale(*m as f64);
            }
        }
        RegionMode::Outer => {
            for (v, m) in spectrum.iter_mut().zip(mask.data()) {
                *v = v.scale(1.0 - *m as f64);
            }
        }
    }
}

/// Rejects non-finite sigma values.
///
/// Sigma may be any finite real (zero and negative spreads are stabilized),
/// but NaN or infinite values would poison every mask sample.
pub(crate) fn validate_sigma(sigma: f64) -> Result<(), OpsError> {
    if sigma.is_finite() {
        Ok(())
    } else {
        Err(OpsError::InvalidParameter(format!(
            "sigma must be finite, got {}",
            sigma
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_center_is_unity() {
        let mask = gaussian(9, 9, 2.0);
        assert_abs_diff_eq!(mask.sample(4, 4), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_small_sigma_approaches_impulse() {
        let mask = gaussian(7, 7, 0.0);
        for (x, y, m) in mask.samples() {
            if (x, y) == (3, 3) {
                assert_abs_diff_eq!(m, 1.0, epsilon = 1e-6);
            } else {
                assert!(m < 1e-12, "({}, {}) = {}", x, y, m);
            }
        }
    }

    #[test]
    fn test_large_sigma_approaches_ones() {
        let mask = gaussian(8, 8, 1e6);
        for (_, _, m) in mask.samples() {
            assert_abs_diff_eq!(m, 1.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_negative_sigma_matches_positive() {
        // Sigma enters the formula squared, so the sign is irrelevant.
        let pos = gaussian(6, 6, 2.5);
        let neg = gaussian(6, 6, -2.5);
        assert_eq!(pos.data(), neg.data());
    }

    #[test]
    fn test_outer_is_complement_of_inner() {
        let mask = gaussian(16, 12, 3.0);
        let mut inner: Vec<Complex64> = vec![Complex64::new(1.0, 0.0); mask.len()];
        let mut outer = inner.clone();

        apply_region(RegionMode::Inner, &mut inner, &mask);
        apply_region(RegionMode::Outer, &mut outer, &mask);

        for (a, b) in inner.iter().zip(outer.iter()) {
            assert_abs_diff_eq!(a.re + b.re, 1.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_region_none_is_identity() {
        let mask = gaussian(4, 4, 1.0);
        let src: Vec<Complex64> = (0..16).map(|i| Complex64::new(i as f64, -1.0)).collect();
        let mut spectrum = src.clone();
        apply_region(RegionMode::None, &mut spectrum, &mask);
        assert_eq!(src, spectrum);
    }

    #[test]
    fn test_label_normalization() {
        assert_eq!(
            RegionMode::from_label("High-Frequency (Outer)"),
            RegionMode::Outer
        );
        assert_eq!(RegionMode::from_label("Low (Inner) Region"), RegionMode::Inner);
        assert_eq!(RegionMode::from_label("Off"), RegionMode::None);
        assert_eq!(RegionMode::from_label(""), RegionMode::None);
    }

    #[test]
    fn test_sigma_validation() {
        assert!(validate_sigma(0.0).is_ok());
        assert!(validate_sigma(-3.0).is_ok());
        assert!(validate_sigma(f64::NAN).is_err());
        assert!(validate_sigma(f64::INFINITY).is_err());
    }
}
