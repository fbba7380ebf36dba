//! Primitive rendering functions.
//!
//! Every function takes geometry in the Cartesian frame (origin bottom-left)
//! and writes through [`to_buffer_coords`]. Pixels that land outside the
//! buffer are skipped. Each function returns the number of pixels written.

use crate::color::{blend, Rgb};
use crate::geometry::{Circle, Line, Point2, Triangle};
use crate::pixel_buffer::PixelBuffer;

use super::raster::{to_buffer_coords, CircleOutline, FilledCircle, LinePixels, TrianglePixels};

/// How a color is applied to a destination pixel.
#[derive(Debug, Clone, Copy)]
enum Paint {
    Opaque(Rgb),
    Blend { color: Rgb, alpha: f32 },
}

impl Paint {
    fn blend(color: Rgb, alpha: f32) -> Self {
        Self::Blend { color, alpha }
    }

    /// Apply this paint at a logical point.
    fn plot(self, fb: &mut PixelBuffer, p: Point2) -> bool {
        let (x, y) = to_buffer_coords(fb.height(), p);
        match self {
            Self::Opaque(color) => fb.set_pixel(x, y, color),
            Self::Blend { color, alpha } => match fb.get_pixel(x, y) {
                Ok(bg) => fb.set_pixel(x, y, blend(bg, color, alpha)),
                Err(_) => false,
            },
        }
    }

    fn plot_all(self, fb: &mut PixelBuffer, points: impl Iterator<Item = Point2>) -> usize {
        points.filter(|&p| self.plot(fb, p)).count()
    }
}

/// Trait for drawable primitives.
pub trait Drawable {
    /// Draw this primitive to a pixel buffer.
    fn draw(&self, fb: &mut PixelBuffer, color: Rgb) -> usize;

    /// Draw this primitive blended over the existing pixels.
    fn draw_alpha(&self, fb: &mut PixelBuffer, color: Rgb, alpha: f32) -> usize;
}

/// Marks a closed shape to be drawn filled rather than outlined.
///
/// ```
/// use trueno_raster::prelude::*;
///
/// let mut fb = PixelBuffer::new(32, 32).unwrap();
/// let disc = Filled(Circle::new(Point2::new(16.0, 16.0), 4.0));
/// assert!(disc.draw(&mut fb, Rgb::RED) > 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Filled<T>(pub T);

// ============================================================================
// Point Drawing
// ============================================================================

/// Draw a single point, rounding to the nearest pixel.
///
/// Returns `false` if the point is off the canvas.
pub fn draw_point(fb: &mut PixelBuffer, point: Point2, color: Rgb) -> bool {
    Paint::Opaque(color).plot(fb, point)
}

/// Blend a single point over the pixel beneath it.
pub fn draw_point_alpha(fb: &mut PixelBuffer, point: Point2, color: Rgb, alpha: f32) -> bool {
    Paint::blend(color, alpha).plot(fb, point)
}

impl Drawable for Point2 {
    fn draw(&self, fb: &mut PixelBuffer, color: Rgb) -> usize {
        usize::from(draw_point(fb, *self, color))
    }

    fn draw_alpha(&self, fb: &mut PixelBuffer, color: Rgb, alpha: f32) -> usize {
        usize::from(draw_point_alpha(fb, *self, color, alpha))
    }
}

// ============================================================================
// Line Drawing
// ============================================================================

/// Draw a line using Bresenham's algorithm.
///
/// The endpoint with the larger coordinate along the major axis is not
/// drawn; see [`LinePixels`].
pub fn draw_line(fb: &mut PixelBuffer, p1: Point2, p2: Point2, color: Rgb) -> usize {
    let written = Paint::Opaque(color).plot_all(fb, LinePixels::new(p1, p2));
    tracing::trace!(?p1, ?p2, written, "line");
    written
}

/// Draw a blended line using Bresenham's algorithm.
pub fn draw_line_alpha(
    fb: &mut PixelBuffer,
    p1: Point2,
    p2: Point2,
    color: Rgb,
    alpha: f32,
) -> usize {
    let written = Paint::blend(color, alpha).plot_all(fb, LinePixels::new(p1, p2));
    tracing::trace!(?p1, ?p2, alpha, written, "line (alpha)");
    written
}

impl Drawable for Line {
    fn draw(&self, fb: &mut PixelBuffer, color: Rgb) -> usize {
        draw_line(fb, self.start, self.end, color)
    }

    fn draw_alpha(&self, fb: &mut PixelBuffer, color: Rgb, alpha: f32) -> usize {
        draw_line_alpha(fb, self.start, self.end, color, alpha)
    }
}

// ============================================================================
// Circle Drawing
// ============================================================================

fn circle_points(
    fb: &PixelBuffer,
    center: Point2,
    radius: f32,
    filled: bool,
) -> Box<dyn Iterator<Item = Point2>> {
    if filled {
        Box::new(FilledCircle::new(center, radius).clip_to(fb.width(), fb.height()))
    } else {
        Box::new(CircleOutline::new(center, radius))
    }
}

/// Draw a circle, filled or as a midpoint-algorithm outline.
///
/// # Arguments
///
/// * `fb` - Target pixel buffer
/// * `center` - Center point
/// * `radius` - Circle radius in pixels
/// * `color` - Fill or outline color
/// * `filled` - Fill the disc instead of drawing the outline
pub fn draw_circle(
    fb: &mut PixelBuffer,
    center: Point2,
    radius: f32,
    color: Rgb,
    filled: bool,
) -> usize {
    let points = circle_points(fb, center, radius, filled);
    let written = Paint::Opaque(color).plot_all(fb, points);
    tracing::trace!(?center, radius, filled, written, "circle");
    written
}

/// Draw a blended circle.
///
/// Outline points shared by two octants are blended twice.
pub fn draw_circle_alpha(
    fb: &mut PixelBuffer,
    center: Point2,
    radius: f32,
    color: Rgb,
    alpha: f32,
    filled: bool,
) -> usize {
    let points = circle_points(fb, center, radius, filled);
    let written = Paint::blend(color, alpha).plot_all(fb, points);
    tracing::trace!(?center, radius, alpha, filled, written, "circle (alpha)");
    written
}

impl Drawable for Circle {
    fn draw(&self, fb: &mut PixelBuffer, color: Rgb) -> usize {
        draw_circle(fb, self.center, self.radius, color, false)
    }

    fn draw_alpha(&self, fb: &mut PixelBuffer, color: Rgb, alpha: f32) -> usize {
        draw_circle_alpha(fb, self.center, self.radius, color, alpha, false)
    }
}

impl Drawable for Filled<Circle> {
    fn draw(&self, fb: &mut PixelBuffer, color: Rgb) -> usize {
        draw_circle(fb, self.0.center, self.0.radius, color, true)
    }

    fn draw_alpha(&self, fb: &mut PixelBuffer, color: Rgb, alpha: f32) -> usize {
        draw_circle_alpha(fb, self.0.center, self.0.radius, color, alpha, true)
    }
}

// ============================================================================
// Triangle Drawing
// ============================================================================

/// Draw a triangle: three edges, or a barycentric fill.
///
/// A degenerate (near-zero area) triangle fills nothing.
pub fn draw_triangle(fb: &mut PixelBuffer, tri: Triangle, color: Rgb, filled: bool) -> usize {
    let paint = Paint::Opaque(color);
    let written = if filled {
        let fill = TrianglePixels::new(tri).clip_to(fb.width(), fb.height());
        paint.plot_all(fb, fill)
    } else {
        paint.plot_all(fb, triangle_edges(tri))
    };
    tracing::trace!(?tri, filled, written, "triangle");
    written
}

/// Draw a blended triangle.
pub fn draw_triangle_alpha(
    fb: &mut PixelBuffer,
    tri: Triangle,
    color: Rgb,
    alpha: f32,
    filled: bool,
) -> usize {
    let paint = Paint::blend(color, alpha);
    let written = if filled {
        let fill = TrianglePixels::new(tri).clip_to(fb.width(), fb.height());
        paint.plot_all(fb, fill)
    } else {
        paint.plot_all(fb, triangle_edges(tri))
    };
    tracing::trace!(?tri, alpha, filled, written, "triangle (alpha)");
    written
}

fn triangle_edges(tri: Triangle) -> impl Iterator<Item = Point2> {
    LinePixels::new(tri.p1, tri.p2)
        .chain(LinePixels::new(tri.p2, tri.p3))
        .chain(LinePixels::new(tri.p3, tri.p1))
}

impl Drawable for Triangle {
    fn draw(&self, fb: &mut PixelBuffer, color: Rgb) -> usize {
        draw_triangle(fb, *self, color, false)
    }

    fn draw_alpha(&self, fb: &mut PixelBuffer, color: Rgb, alpha: f32) -> usize {
        draw_triangle_alpha(fb, *self, color, alpha, false)
    }
}

impl Drawable for Filled<Triangle> {
    fn draw(&self, fb: &mut PixelBuffer, color: Rgb) -> usize {
        draw_triangle(fb, self.0, color, true)
    }

    fn draw_alpha(&self, fb: &mut PixelBuffer, color: Rgb, alpha: f32) -> usize {
        draw_triangle_alpha(fb, self.0, color, alpha, true)
    }
}

// ============================================================================
// Tests
// ============================================================================
