//! Spectral compositing of up to four source planes.
//!
//! Each active slot is transformed to the frequency domain, band-masked,
//! reduced to one spectral component, and weighted. The weighted
//! contributions are summed into a single composite spectrum, inverse
//! transformed, and min-max normalized into an 8-bit plane.
//!
//! Slot extraction has no cross-slot data dependency and the accumulation
//! is commutative, so under the `parallel` feature the slots are processed
//! with rayon.

use crate::{fft, mask, OpsError, OpsResult, RegionMode};
use rustfft::num_complex::Complex64;
use specmix_core::Plane;
use tracing::debug;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Number of input slots per mix call.
pub const SLOT_COUNT: usize = 4;

/// Side length of the placeholder output when no target dimensions exist.
const PLACEHOLDER_SIZE: u32 = 100;

/// Spectral component extracted from a masked spectrum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Component {
    /// `weight * |v| * exp(i*arg(v))` - full complex value via polar
    /// reconstruction. Numerically equal to `weight * v`; kept in polar
    /// form deliberately, and the equivalence is pinned by tests.
    Magnitude,
    /// `weight * exp(i*arg(v))` - phase only, magnitude normalized to 1.
    /// Note `arg(0) == 0`, so empty bins still contribute `weight`.
    Phase,
    /// `weight * Re(v)` - imaginary part dropped.
    Real,
    /// `weight * i*Im(v)` - real part dropped.
    Imaginary,
}

impl std::str::FromStr for Component {
    type Err = OpsError;

    fn from_str(s: &str) -> OpsResult<Self> {
        match s.to_ascii_lowercase().as_str() {
            "magnitude" | "mag" => Ok(Self::Magnitude),
            "phase" => Ok(Self::Phase),
            "real" | "re" => Ok(Self::Real),
            "imaginary" | "imag" | "im" => Ok(Self::Imaginary),
            other => Err(OpsError::InvalidParameter(format!(
                "unknown component '{}'",
                other
            ))),
        }
    }
}

/// One input slot of a mix call.
///
/// A slot with no image, or a weight of exactly zero, contributes nothing.
#[derive(Debug, Clone, Copy)]
pub struct MixSlot<'a> {
    /// Source plane, if this slot is populated.
    pub image: Option<&'a Plane<u8>>,
    /// Contribution weight; 0.0 disables the slot.
    pub weight: f64,
    /// Spectral component this slot contributes.
    pub component: Component,
}

impl<'a> MixSlot<'a> {
    /// Creates a populated slot.
    pub fn new(image: &'a Plane<u8>, weight: f64, component: Component) -> Self {
        Self {
            image: Some(image),
            weight,
            component,
        }
    }

    /// Creates an empty slot.
    pub fn empty() -> Self {
        Self {
            image: None,
            weight: 0.0,
            component: Component::Magnitude,
        }
    }

    /// Returns `true` if this slot contributes to the mix.
    pub fn is_active(&self) -> bool {
        self.image.is_some() && self.weight != 0.0
    }
}

/// Frequency-domain mixer.
///
/// Stateless per call except for the region mode, which is configuration
/// set between calls (typically from a UI control) and re-read by each
/// [`mix`](Self::mix).
#[derive(Debug, Clone, Default)]
pub struct Mixer {
    region_mode: RegionMode,
}

impl Mixer {
    /// Creates a mixer with region masking disabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current region mode.
    pub fn region_mode(&self) -> RegionMode {
        self.region_mode
    }

    /// Sets the region mode from a free-form control label.
    ///
    /// See [`RegionMode::from_label`] for the normalization rules.
    pub fn set_region_mode(&mut self, label: &str) {
        self.region_mode = RegionMode::from_label(label);
    }

    /// Mixes up to four planes in the frequency domain.
    ///
    /// `target` is the shared working size as `(width, height)`; when it is
    /// `None` (no valid source was ever provided to derive dimensions from)
    /// a 100x100 all-zero placeholder is returned instead of an error. If
    /// every slot is inactive the result is an all-zero plane of the target
    /// size.
    ///
    /// # Errors
    ///
    /// - [`OpsError::SizeMismatch`] if an active plane does not match the
    ///   target dimensions (caller contract violation; resizing is the
    ///   caller's responsibility).
    /// - [`OpsError::InvalidDimensions`] if a target dimension is zero.
    /// - [`OpsError::InvalidParameter`] if sigma is not finite.
    pub fn mix(
        &self,
        slots: &[MixSlot<'_>; SLOT_COUNT],
        sigma: f64,
        target: Option<(u32, u32)>,
    ) -> OpsResult<Plane<u8>> {
        let Some((width, height)) = target else {
            debug!("no target dimensions, returning placeholder");
            return Ok(Plane::new(PLACEHOLDER_SIZE, PLACEHOLDER_SIZE));
        };
        if width == 0 || height == 0 {
            return Err(OpsError::InvalidDimensions(format!(
                "target must be non-empty, got {}x{}",
                width, height
            )));
        }
        mask::validate_sigma(sigma)?;

        let active: Vec<(&Plane<u8>, f64, Component)> = slots
            .iter()
            .filter(|s| s.is_active())
            .filter_map(|s| s.image.map(|image| (image, s.weight, s.component)))
            .collect();
        for (image, _, _) in &active {
            if image.dimensions() != (width, height) {
                return Err(OpsError::SizeMismatch(format!(
                    "slot plane is {}x{}, target is {}x{}",
                    image.width(),
                    image.height(),
                    width,
                    height
                )));
            }
        }

        debug!(
            slots = active.len(),
            region = %self.region_mode,
            sigma,
            width,
            height,
            "mixing"
        );

        let len = width as usize * height as usize;
        if active.is_empty() {
            return Ok(Plane::new(width, height));
        }

        // One Gaussian per call, shared read-only across slots.
        let band_mask = mask::gaussian(height, width, sigma);
        let mode = self.region_mode;

        #[cfg(feature = "parallel")]
        let parts: OpsResult<Vec<Vec<Complex64>>> = active
            .par_iter()
            .map(|&(image, weight, component)| {
                contribution(image, weight, component, mode, &band_mask)
            })
            .collect();
        #[cfg(not(feature = "parallel"))]
        let parts: OpsResult<Vec<Vec<Complex64>>> = active
            .iter()
            .map(|&(image, weight, component)| {
                contribution(image, weight, component, mode, &band_mask)
            })
            .collect();

        let mut combined = vec![Complex64::new(0.0, 0.0); len];
        for part in parts? {
            for (acc, v) in combined.iter_mut().zip(part) {
                *acc += v;
            }
        }

        let spatial = fft::inverse_centered(&combined, width as usize, height as usize)?;
        let magnitudes: Vec<f64> = spatial.iter().map(|v| v.norm()).collect();
        let normalized = normalize_to_u8(&magnitudes);

        Plane::from_data(width, height, normalized)
            .map_err(|e| OpsError::InvalidDimensions(e.to_string()))
    }
}

/// Computes one slot's weighted spectral contribution.
fn contribution(
    image: &Plane<u8>,
    weight: f64,
    component: Component,
    mode: RegionMode,
    band_mask: &Plane<f32>,
) -> OpsResult<Vec<Complex64>> {
    let (width, height) = image.dimensions();

    let mut spectrum =
        fft::forward_centered(&image.to_f64_vec(), width as usize, height as usize)?;
    mask::apply_region(mode, &mut spectrum, band_mask);

    for v in spectrum.iter_mut() {
        *v = match component {
            Component::Magnitude => {
                let (mag, phase) = v.to_polar();
                Complex64::from_polar(mag, phase).scale(weight)
            }
            Component::Phase => Complex64::from_polar(1.0, v.arg()).scale(weight),
            Component::Real => Complex64::new(v.re * weight, 0.0),
            Component::Imaginary => Complex64::new(0.0, v.im * weight),
        };
    }
    Ok(spectrum)
}

/// Min-max rescales magnitudes into [0, 255], rounding to u8.
///
/// A zero value range (which covers the all-slots-skipped case) maps to an
/// all-zero plane rather than dividing by zero.
fn normalize_to_u8(values: &[f64]) -> Vec<u8> {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;

    if range <= 0.0 {
        return vec![0; values.len()];
    }

    debug!(min, max, "normalizing reconstruction");
    values
        .iter()
        .map(|&v| (255.0 * (v - min) / range).round() as u8)
        .collect()
}
