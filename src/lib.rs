//! # Trueno-Raster
//!
//! Software rasterizer for 24-bit RGB pixel buffers.
//!
//! Built on the [trueno](https://crates.io/crates/trueno) core library for
//! whole-buffer compositing, trueno-raster draws points, lines, circles and
//! triangles (opaque or alpha-blended), resamples one buffer into a
//! rectangle of another, and reads and writes binary PPM (P6) images.
//!
//! ## Features
//!
//! - **Pure Rust**: No C image libraries
//! - **Bottom-left origin**: Geometry uses a Cartesian frame, `y` grows upward
//! - **Forgiving writes**: Drawing outside the canvas is silently clipped
//! - **Multiple Outputs**: PPM (read and write) and PNG (write)
//!
//! ## Quick Start
//!
//! ```rust
//! use trueno_raster::prelude::*;
//!
//! let mut fb = PixelBuffer::new(64, 64)?;
//! fb.clear(Rgb::WHITE);
//!
//! Filled(Circle::new(Point2::new(32.0, 32.0), 10.0)).draw(&mut fb, Rgb::RED);
//! draw_line(&mut fb, Point2::new(0.0, 1.0), Point2::new(63.0, 63.0), rgb(0, 0, 300));
//!
//! let bytes = trueno_raster::output::PpmCodec::to_bytes(&fb);
//! assert!(bytes.starts_with(b"P6\n64 64\n255\n"));
//! # Ok::<(), trueno_raster::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `demo`: Build the `raster-demo` command-line renderer (default)
//! - `parallel`: Enable parallel processing in trueno
//!
//! ## Academic References
//!
//! - Bresenham, J. E. (1965). "Algorithm for computer control of a digital plotter."
//! - Porter, T., & Duff, T. (1984). "Compositing Digital Images." SIGGRAPH '84.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
// Allow unwrap() in tests only - banned in production code
#![cfg_attr(test, allow(clippy::unwrap_used))]
// Allow common patterns in graphics code
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Core Modules
// ============================================================================

/// 24-bit RGB colors and alpha blending.
pub mod color;

/// Rounding helpers shared by every rasterizer.
pub mod math;

/// Geometric primitives (vectors, rectangles, lines, circles, triangles).
pub mod geometry;

/// RGB pixel storage.
pub mod pixel_buffer;

// ============================================================================
// Rendering Modules
// ============================================================================

/// Rasterization and blitting.
pub mod render;

/// Output encoders (PPM, PNG).
pub mod output;

/// Value noise and point shaders.
pub mod noise;

/// Demo renderer configuration.
pub mod config;

// ============================================================================
// Error Types
// ============================================================================

/// Error types for trueno-raster operations.
pub mod error;

pub use error::{Error, Result};

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types and traits for convenient imports.
///
/// ```rust
/// use trueno_raster::prelude::*;
/// ```
pub mod prelude {
    pub use crate::color::{blend, rgb, Rgb};
    pub use crate::error::{Error, Result};
    pub use crate::geometry::{Circle, Line, Point2, Rect, Triangle, Vec2, Vec3};
    pub use crate::pixel_buffer::PixelBuffer;
    pub use crate::render::{
        blit, blit_alpha, draw_circle, draw_circle_alpha, draw_line, draw_line_alpha, draw_point,
        draw_point_alpha, draw_triangle, draw_triangle_alpha, Drawable, Filled,
    };
}

// ============================================================================
// Re-exports
// ============================================================================

/// Re-export trueno for direct access to SIMD operations.
pub use trueno;
