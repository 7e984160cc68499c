//! Single-channel image buffer for spectral processing.
//!
//! [`Plane`] is the owned container the mixing pipeline reads its inputs
//! from and writes its output to. It stores samples in row-major order in
//! an `Arc<Vec<T>>`, so cloning is zero-copy and mutation is copy-on-write.

use crate::{Error, Result, Sample};
use std::sync::Arc;

/// Owned single-channel image buffer.
///
/// # Memory Management
///
/// The sample buffer is stored in an [`Arc<Vec<T>>`], enabling:
/// - Zero-copy cloning (shares underlying data)
/// - Thread-safe sharing for parallel processing
///
/// Mutating accessors use [`Arc::make_mut`], so a shared buffer is cloned
/// on first write (copy-on-write).
///
/// # Example
///
/// ```rust
/// use specmix_core::Plane;
///
/// let mut plane: Plane<u8> = Plane::filled(64, 64, 128);
/// plane.set_sample(0, 0, 255);
/// assert_eq!(plane.sample(0, 0), 255);
/// assert_eq!(plane.sample(1, 0), 128);
/// ```
#[derive(Clone)]
pub struct Plane<T: Sample> {
    /// Sample data buffer (Arc for cheap cloning)
    data: Arc<Vec<T>>,
    /// Plane width in samples
    width: u32,
    /// Plane height in samples
    height: u32,
}

impl<T: Sample> Plane<T> {
    /// Creates a new plane filled with zeros.
    pub fn new(width: u32, height: u32) -> Self {
        let data = vec![T::zero(); width as usize * height as usize];
        Self {
            data: Arc::new(data),
            width,
            height,
        }
    }

    /// Creates a plane from existing sample data.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if `data.len()` is not exactly
    /// `width * height`.
    pub fn from_data(width: u32, height: u32, data: Vec<T>) -> Result<Self> {
        let expected = width as usize * height as usize;
        if data.len() != expected {
            return Err(Error::invalid_dimensions(
                width,
                height,
                format!("expected {} samples, got {}", expected, data.len()),
            ));
        }
        Ok(Self {
            data: Arc::new(data),
            width,
            height,
        })
    }

    /// Creates a plane filled with a specific sample value.
    pub fn filled(width: u32, height: u32, value: T) -> Self {
        Self {
            data: Arc::new(vec![value; width as usize * height as usize]),
            width,
            height,
        }
    }

    /// Creates a plane by evaluating a function at every (x, y).
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> T) -> Self {
        let mut data = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }
        Self {
            data: Arc::new(data),
            width,
            height,
        }
    }

    /// Returns the plane width in samples.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the plane height in samples.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the plane dimensions as (width, height).
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Returns the total number of samples.
    #[inline]
    pub fn len(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Returns `true` if the plane has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Returns a reference to the raw sample data.
    #[inline]
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Returns a mutable reference to the sample data.
    ///
    /// If the data is shared (Arc refcount > 1), this clones the buffer
    /// to ensure exclusive access (copy-on-write).
    #[inline]
    pub fn data_mut(&mut self) -> &mut [T] {
        Arc::make_mut(&mut self.data).as_mut_slice()
    }

    /// Returns the sample at (x, y).
    ///
    /// # Panics
    ///
    /// Panics in debug builds if (x, y) is out of bounds.
    #[inline]
    pub fn sample(&self, x: u32, y: u32) -> T {
        debug_assert!(x < self.width && y < self.height, "sample out of bounds");
        self.data[y as usize * self.width as usize + x as usize]
    }

    /// Returns the sample at (x, y), or `None` if out of bounds.
    #[inline]
    pub fn get_sample(&self, x: u32, y: u32) -> Option<T> {
        if x < self.width && y < self.height {
            Some(self.sample(x, y))
        } else {
            None
        }
    }

    /// Sets the sample at (x, y).
    ///
    /// # Panics
    ///
    /// Panics in debug builds if (x, y) is out of bounds.
    #[inline]
    pub fn set_sample(&mut self, x: u32, y: u32, value: T) {
        debug_assert!(x < self.width && y < self.height, "sample out of bounds");
        let idx = y as usize * self.width as usize + x as usize;
        Arc::make_mut(&mut self.data)[idx] = value;
    }

    /// Fills the entire plane with a sample value.
    pub fn fill(&mut self, value: T) {
        Arc::make_mut(&mut self.data).fill(value);
    }

    /// Returns a row of samples as a slice.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if y >= height.
    #[inline]
    pub fn row(&self, y: u32) -> &[T] {
        debug_assert!(y < self.height, "row out of bounds");
        let start = y as usize * self.width as usize;
        &self.data[start..start + self.width as usize]
    }

    /// Iterates over all samples with their coordinates.
    pub fn samples(&self) -> impl Iterator<Item = (u32, u32, T)> + '_ {
        (0..self.height)
            .flat_map(move |y| (0..self.width).map(move |x| (x, y, self.sample(x, y))))
    }

    /// Returns the sample data as raw-scale f64 values.
    ///
    /// This is the representation the frequency transforms consume.
    pub fn to_f64_vec(&self) -> Vec<f64> {
        self.data.iter().map(|s| s.to_f64()).collect()
    }

    /// Converts to a different sample format via f64.
    pub fn convert<T2: Sample>(&self) -> Plane<T2> {
        let data = self.data.iter().map(|s| T2::from_f64(s.to_f64())).collect();
        Plane {
            data: Arc::new(data),
            width: self.width,
            height: self.height,
        }
    }
}

impl<T: Sample> std::fmt::Debug for Plane<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Plane")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("format", &std::any::type_name::<T>())
            .finish()
    }
}
