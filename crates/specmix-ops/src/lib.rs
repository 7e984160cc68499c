//! # specmix-ops
//!
//! Frequency-domain mixing operations for single-channel images.
//!
//! This crate implements the numerical core of the spectral mixer: up to
//! four source planes are transformed to the frequency domain, band-masked,
//! reduced to a chosen spectral component, weighted, accumulated, and
//! reconstructed into one displayable 8-bit plane.
//!
//! # Modules
//!
//! - [`fft`] - Centered 2D forward/inverse frequency transforms
//! - [`mask`] - Gaussian low-pass mask and region modes
//! - [`mixer`] - Slot extraction, accumulation and reconstruction
//!
//! # Example
//!
//! ```rust
//! use specmix_core::Plane;
//! use specmix_ops::{Component, MixSlot, Mixer};
//!
//! let image: Plane<u8> = Plane::from_fn(32, 32, |x, _| (x * 8) as u8);
//! let mut slots = [MixSlot::empty(); 4];
//! slots[0] = MixSlot::new(&image, 1.0, Component::Magnitude);
//!
//! let mixer = Mixer::new();
//! let out = mixer.mix(&slots, 1.0, Some((32, 32))).unwrap();
//! assert_eq!(out.dimensions(), (32, 32));
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod fft;
pub mod mask;
pub mod mixer;

pub use error::{OpsError, OpsResult};
pub use mask::RegionMode;
pub use mixer::{Component, MixSlot, Mixer, SLOT_COUNT};
