//! Rasterization and blitting.
//!
//! Geometry is specified in a Cartesian frame with the origin at the
//! bottom-left of the canvas; pixel buffers are stored top row first. A
//! logical point `(x, y)` is written at buffer row `round(height - y)`.
//!
//! # Algorithms
//!
//! - **Bresenham's Line**: integer error accumulation, endpoint excluded
//! - **Midpoint Circle**: outline with 8-fold symmetry
//! - **Disc scan**: filled circles by squared distance
//! - **Barycentric scan**: filled triangles over the bounding box
//! - **Nearest-neighbor blit**: rectangle-to-rectangle resampling
//!
//! # References
//!
//! - Bresenham, J. E. (1965). "Algorithm for computer control of a digital plotter."

mod blit;
mod primitives;
mod raster;

pub use blit::{blit, blit_alpha};
pub use primitives::{
    draw_circle, draw_circle_alpha, draw_line, draw_line_alpha, draw_point, draw_point_alpha,
    draw_triangle, draw_triangle_alpha, Drawable, Filled,
};
pub use raster::{
    to_buffer_coords, CircleOutline, FilledCircle, LinePixels, TrianglePixels,
};
