//! # specmix-core
//!
//! Core types for frequency-domain image mixing.
//!
//! This crate provides the buffer and sample types shared by the spectral
//! mixing pipeline:
//!
//! - [`Plane`] - Owned single-channel image buffer
//! - [`Sample`] - Trait for sample data types (u8, f32)
//! - [`Error`] - Unified error type
//!
//! # Memory Layout
//!
//! Planes store samples in **row-major** order, top-to-bottom:
//!
//! ```text
//! Memory: [s s s s ...]  ← Row 0
//!         [s s s s ...]  ← Row 1
//!         ...
//! ```
//!
//! # Usage
//!
//! ```rust
//! use specmix_core::Plane;
//!
//! // Create a 256x256 8-bit intensity plane
//! let mut plane: Plane<u8> = Plane::new(256, 256);
//! plane.set_sample(100, 100, 255);
//! assert_eq!(plane.sample(100, 100), 255);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
mod plane;
mod sample;

pub use error::{Error, Result};
pub use plane::Plane;
pub use sample::Sample;
