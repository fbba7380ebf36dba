//! In-memory RGB pixel buffer.
//!
//! Pixels are stored tightly packed, row-major, top row first: the byte
//! offset of `(x, y)` is `(y * width + x) * 3`. This is exactly the layout of
//! the PPM P6 raster, so encoding is a single copy.
//!
//! Writes outside the buffer are silently discarded because rasterization
//! routinely runs past the canvas edges. Reads outside the buffer are errors:
//! callers are expected to validate coordinates first.

use std::path::Path;

use trueno::{Backend, Vector};

use crate::color::Rgb;
use crate::error::{Error, Result};
use crate::output::PpmCodec;

/// Bytes per pixel (R, G, B).
pub const CHANNELS: usize = 3;

/// Fixed-size RGB image store.
///
/// Width and height are set at creation and never change. A new buffer is
/// black.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    /// Width in pixels.
    width: u32,
    /// Height in pixels.
    height: u32,
    /// RGB pixels in row-major order, 3 bytes each.
    pixels: Vec<u8>,
}

impl PixelBuffer {
    /// Create a black buffer with the given dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if either dimension is zero or the
    /// byte size overflows, and [`Error::Allocation`] if the storage cannot be
    /// reserved. No partial buffer is returned.
    ///
    /// # Example
    ///
    /// ```
    /// use trueno_raster::pixel_buffer::PixelBuffer;
    ///
    /// let buf = PixelBuffer::new(800, 600).unwrap();
    /// assert_eq!(buf.width(), 800);
    /// assert_eq!(buf.height(), 600);
    /// ```
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let size = byte_len(width, height)?;

        let mut pixels = Vec::new();
        pixels
            .try_reserve_exact(size)
            .map_err(|_| Error::Allocation { width, height })?;
        pixels.resize(size, 0);

        tracing::debug!(width, height, bytes = size, "allocated pixel buffer");

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Wrap existing packed RGB data.
    ///
    /// Bytes beyond `width * height * 3` are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] for zero dimensions and
    /// [`Error::TruncatedData`] if `pixels` is too short.
    pub fn from_raw(width: u32, height: u32, mut pixels: Vec<u8>) -> Result<Self> {
        let expected = byte_len(width, height)?;
        if pixels.len() < expected {
            return Err(Error::TruncatedData {
                expected,
                actual: pixels.len(),
            });
        }
        pixels.truncate(expected);

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Get the width in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Get the height in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Get the total number of pixels.
    #[must_use]
    pub const fn pixel_count(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    /// Get the raw RGB data as a slice.
    #[must_use]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Get the raw RGB data as a mutable slice.
    pub fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    /// Get a row of pixels as a slice.
    #[must_use]
    pub fn row(&self, y: u32) -> Option<&[u8]> {
        if y >= self.height {
            return None;
        }
        let row_bytes = self.row_bytes();
        let start = (y as usize) * row_bytes;
        Some(&self.pixels[start..start + row_bytes])
    }

    /// True if `(x, y)` addresses a pixel of this buffer.
    #[inline]
    #[must_use]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    /// Set the color at a pixel coordinate.
    ///
    /// Returns `false` and leaves the buffer untouched if the coordinate is
    /// out of bounds.
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Rgb) -> bool {
        if !self.contains(x, y) {
            return false;
        }

        let idx = self.pixel_index(x, y);
        self.pixels[idx..idx + CHANNELS].copy_from_slice(&color.to_array());
        true
    }

    /// Get the color at a pixel coordinate.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] if the coordinate is outside the buffer.
    pub fn get_pixel(&self, x: i32, y: i32) -> Result<Rgb> {
        if !self.contains(x, y) {
            return Err(Error::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }

        let idx = self.pixel_index(x, y);
        Ok(Rgb::new(
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
        ))
    }

    /// Clear the buffer to a solid color.
    pub fn clear(&mut self, color: Rgb) {
        let rgb = color.to_array();
        for chunk in self.pixels.chunks_exact_mut(CHANNELS) {
            chunk.copy_from_slice(&rgb);
        }
    }

    /// Fill a rectangular region, given in buffer coordinates (top-left
    /// origin), with a solid color.
    ///
    /// The region is clamped to the buffer bounds.
    pub fn fill_rect(&mut self, x: u32, y: u32, w: u32, h: u32, color: Rgb) {
        let x1 = x.min(self.width);
        let y1 = y.min(self.height);
        let x2 = x.saturating_add(w).min(self.width);
        let y2 = y.saturating_add(h).min(self.height);

        if x1 >= x2 || y1 >= y2 {
            return;
        }

        let rgb = color.to_array();
        let row_bytes = self.row_bytes();
        let span = (x2 - x1) as usize * CHANNELS;

        for row_y in y1..y2 {
            let start = (row_y as usize) * row_bytes + (x1 as usize) * CHANNELS;
            for chunk in self.pixels[start..start + span].chunks_exact_mut(CHANNELS) {
                chunk.copy_from_slice(&rgb);
            }
        }
    }

    /// Blend an entire buffer over this one using SIMD-accelerated operations.
    ///
    /// Every channel becomes `alpha * other + (1 - alpha) * self`, truncated,
    /// the same formula as [`crate::color::blend`].
    ///
    /// # Errors
    ///
    /// Returns an error if the buffers have different dimensions.
    pub fn blend_over(&mut self, other: &PixelBuffer, alpha: f32) -> Result<()> {
        if self.width != other.width || self.height != other.height {
            return Err(Error::InvalidDimensions {
                width: other.width,
                height: other.height,
            });
        }

        let alpha = if alpha.is_nan() { 0.0 } else { alpha.clamp(0.0, 1.0) };
        let inv_alpha = 1.0 - alpha;
        let row_bytes = self.row_bytes();

        // Row by row to bound the size of the temporary f32 vectors.
        for y in 0..self.height as usize {
            let start = y * row_bytes;
            let dst_row = &mut self.pixels[start..start + row_bytes];
            let src_row = &other.pixels[start..start + row_bytes];

            let dst_vec = Vector::from_vec(dst_row.iter().map(|&b| f32::from(b)).collect());
            let src_vec = Vector::from_vec(src_row.iter().map(|&b| f32::from(b)).collect());

            let blended = match (
                src_vec.mul(&Vector::from_vec(vec![alpha; row_bytes])),
                dst_vec.mul(&Vector::from_vec(vec![inv_alpha; row_bytes])),
            ) {
                (Ok(src_scaled), Ok(dst_scaled)) => src_scaled.add(&dst_scaled).ok(),
                _ => None,
            };

            if let Some(result) = blended {
                for (dst, &v) in dst_row.iter_mut().zip(result.as_slice()) {
                    *dst = v.clamp(0.0, 255.0) as u8;
                }
            } else {
                for (dst, &src) in dst_row.iter_mut().zip(src_row) {
                    *dst = (alpha * f32::from(src) + inv_alpha * f32::from(*dst)) as u8;
                }
            }
        }

        Ok(())
    }

    /// Get luminance statistics using SIMD-accelerated reduction.
    ///
    /// Returns `(min, max, mean)` of the ITU-R BT.709 luminance.
    #[must_use]
    pub fn luminance_stats(&self) -> (f32, f32, f32) {
        let luminances: Vec<f32> = self
            .pixels
            .chunks_exact(CHANNELS)
            .map(|px| {
                0.2126 * f32::from(px[0]) + 0.7152 * f32::from(px[1]) + 0.0722 * f32::from(px[2])
            })
            .collect();

        let vec = Vector::from_vec(luminances);

        let min = vec.min().unwrap_or(0.0);
        let max = vec.max().unwrap_or(255.0);
        let mean = vec.mean().unwrap_or(127.5);

        (min, max, mean)
    }

    /// Save the buffer as a binary PPM (P6) file with maximum value 255.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or written.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        PpmCodec::write_to_file(self, path)
    }

    /// Load a binary PPM (P6) file, rescaling channels to `0..=255`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid P6 data.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        PpmCodec::read_from_file(path)
    }

    /// Get the selected SIMD backend.
    #[must_use]
    pub fn backend() -> Backend {
        Backend::select_best()
    }

    #[inline]
    fn row_bytes(&self) -> usize {
        (self.width as usize) * CHANNELS
    }

    /// Byte index of an in-bounds coordinate.
    #[inline]
    fn pixel_index(&self, x: i32, y: i32) -> usize {
        (y as usize * self.width as usize + x as usize) * CHANNELS
    }
}

/// Byte length of a `width` x `height` buffer, validating the dimensions.
fn byte_len(width: u32, height: u32) -> Result<usize> {
    if width == 0 || height == 0 {
        return Err(Error::InvalidDimensions { width, height });
    }

    (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(CHANNELS))
        .ok_or(Error::InvalidDimensions { width, height })
}
