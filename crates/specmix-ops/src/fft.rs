//! Centered 2D frequency transforms.
//!
//! Forward and inverse 2D FFTs over row-major f64 planes, using the same
//! centering convention as the band masks: after [`forward_centered`] the
//! zero-frequency term sits at `(width / 2, height / 2)`, and
//! [`inverse_centered`] undoes the shift before transforming back.
//!
//! Transforms are separable: a row pass followed by a column pass, each
//! planned once per call through [`FftPlanner`]. The inverse transform is
//! normalized by `1 / (width * height)` so that
//! `inverse_centered(forward_centered(x))` round-trips.

use crate::{OpsError, OpsResult};
use rustfft::num_complex::Complex64;
use rustfft::FftPlanner;

fn check_dims(len: usize, width: usize, height: usize) -> OpsResult<()> {
    if width == 0 || height == 0 {
        return Err(OpsError::InvalidDimensions(
            "width and height must be > 0".into(),
        ));
    }
    let expected = width
        .checked_mul(height)
        .ok_or_else(|| OpsError::InvalidDimensions("plane dimensions overflow".into()))?;
    if len != expected {
        return Err(OpsError::InvalidDimensions(format!(
            "expected {} samples, got {}",
            expected, len
        )));
    }
    Ok(())
}

/// Forward 2D FFT with the zero-frequency term shifted to the grid center.
///
/// # Arguments
///
/// * `src` - Row-major real samples
/// * `width` - Plane width
/// * `height` - Plane height
///
/// # Errors
///
/// Returns [`OpsError::InvalidDimensions`] if `src.len() != width * height`
/// or either dimension is zero.
pub fn forward_centered(src: &[f64], width: usize, height: usize) -> OpsResult<Vec<Complex64>> {
    check_dims(src.len(), width, height)?;

    let mut spectrum: Vec<Complex64> = src.iter().map(|&v| Complex64::new(v, 0.0)).collect();
    fft2_in_place(&mut spectrum, width, height, Direction::Forward);
    Ok(fftshift(&spectrum, width, height))
}

/// Inverse 2D FFT of a center-shifted spectrum.
///
/// Undoes the centering shift, applies the inverse transform, and scales by
/// `1 / (width * height)`. The result is complex; callers decide whether to
/// take the real part or the magnitude.
///
/// # Errors
///
/// Returns [`OpsError::InvalidDimensions`] on a length/dimension mismatch.
pub fn inverse_centered(
    spectrum: &[Complex64],
    width: usize,
    height: usize,
) -> OpsResult<Vec<Complex64>> {
    check_dims(spectrum.len(), width, height)?;

    let mut spatial = ifftshift(spectrum, width, height);
    fft2_in_place(&mut spatial, width, height, Direction::Inverse);

    let scale = 1.0 / (width * height) as f64;
    for v in &mut spatial {
        *v = v.scale(scale);
    }
    Ok(spatial)
}

#[derive(Clone, Copy)]
enum Direction {
    Forward,
    Inverse,
}

/// Separable 2D FFT: rows first, then columns via a scratch column buffer.
fn fft2_in_place(data: &mut [Complex64], width: usize, height: usize, dir: Direction) {
    let mut planner = FftPlanner::new();
    let (row_fft, col_fft) = match dir {
        Direction::Forward => (
            planner.plan_fft_forward(width),
            planner.plan_fft_forward(height),
        ),
        Direction::Inverse => (
            planner.plan_fft_inverse(width),
            planner.plan_fft_inverse(height),
        ),
    };

    for y in 0..height {
        row_fft.process(&mut data[y * width..(y + 1) * width]);
    }

    let mut col_buf = vec![Complex64::new(0.0, 0.0); height];
    for x in 0..width {
        for y in 0..height {
            col_buf[y] = data[y * width + x];
        }
        col_fft.process(&mut col_buf);
        for y in 0..height {
            data[y * width + x] = col_buf[y];
        }
    }
}

/// Shifts the zero-frequency term to the grid center.
///
/// Per axis of length `n`, index `k` moves to `(k + n / 2) % n`, so the DC
/// term lands at `n / 2` for both even and odd sizes.
pub fn fftshift(src: &[Complex64], width: usize, height: usize) -> Vec<Complex64> {
    let mut dst = vec![Complex64::new(0.0, 0.0); src.len()];
    for y in 0..height {
        let ty = (y + height / 2) % height;
        for x in 0..width {
            let tx = (x + width / 2) % width;
            dst[ty * width + tx] = src[y * width + x];
        }
    }
    dst
}

/// Inverse of [`fftshift`] (exact inverse for odd sizes as well).
pub fn ifftshift(src: &[Complex64], width: usize, height: usize) -> Vec<Complex64> {
    let mut dst = vec![Complex64::new(0.0, 0.0); src.len()];
    for y in 0..height {
        let sy = (y + height / 2) % height;
        for x in 0..width {
            let sx = (x + width / 2) % width;
            dst[y * width + x] = src[sy * width + sx];
        }
    }
    dst
}
