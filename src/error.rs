//! Error types for trueno-raster operations.

use std::io;
use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in trueno-raster operations.
///
/// Writes that fall outside a [`PixelBuffer`](crate::pixel_buffer::PixelBuffer)
/// are not errors; they are discarded. Reads outside the buffer are reported
/// through [`Error::OutOfBounds`].
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error (file operations, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// PNG encoding error.
    #[error("PNG encoding error: {0}")]
    PngEncoding(#[from] png::EncodingError),

    /// Invalid dimensions for a pixel buffer.
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Width value.
        width: u32,
        /// Height value.
        height: u32,
    },

    /// Pixel storage for a buffer could not be reserved.
    #[error("Failed to allocate {width}x{height} pixel buffer")]
    Allocation {
        /// Width value.
        width: u32,
        /// Height value.
        height: u32,
    },

    /// Pixel read outside the buffer.
    #[error("Pixel ({x}, {y}) out of bounds for {width}x{height} buffer")]
    OutOfBounds {
        /// Requested column.
        x: i32,
        /// Requested row.
        y: i32,
        /// Buffer width.
        width: u32,
        /// Buffer height.
        height: u32,
    },

    /// Image data is not binary PPM.
    #[error("Unsupported image format: {0}")]
    UnsupportedFormat(String),

    /// PPM header could not be parsed.
    #[error("Malformed PPM header: {0}")]
    MalformedHeader(String),

    /// Pixel data ended before the declared image size.
    #[error("Truncated pixel data: expected {expected} bytes, found {actual}")]
    TruncatedData {
        /// Bytes required by the header.
        expected: usize,
        /// Bytes actually present.
        actual: usize,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}
