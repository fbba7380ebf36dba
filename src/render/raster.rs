//! Pixel sequences for each primitive, in the Cartesian frame.
//!
//! These iterators decide *which* logical pixels a primitive covers. The
//! drawing functions in [`super::primitives`] map every yielded point to a
//! buffer address with [`to_buffer_coords`] and write it.

use crate::geometry::{Point2, Triangle};
use crate::math::{floor_i, round_i};

/// Map a logical point (origin bottom-left, `y` up) to a buffer address
/// (origin top-left, `y` down).
///
/// The row is `round(height - y)`, so logical `y == height` is the top row
/// and logical `y == 0` falls one row below the buffer.
#[inline]
#[must_use]
pub fn to_buffer_coords(height: u32, p: Point2) -> (i32, i32) {
    (round_i(p.x), round_i(height as f32 - p.y))
}

/// Bresenham line from `p1` towards `p2`.
///
/// The line always steps along its axis of greatest extent, left to right
/// after an optional endpoint swap. The rightmost (after swapping: last)
/// endpoint is not yielded, so `(0,0)-(5,0)` covers `x = 0..=4`.
#[derive(Debug, Clone)]
pub struct LinePixels {
    x: i32,
    end_x: i32,
    y: i32,
    dx: i64,
    derr: i64,
    err: i64,
    y_step: i32,
    steep: bool,
}

impl LinePixels {
    /// Create the pixel sequence for the segment `p1`-`p2`.
    #[must_use]
    pub fn new(p1: Point2, p2: Point2) -> Self {
        let (mut a, mut b) = (p1, p2);

        let steep = (a.x - b.x).abs() < (a.y - b.y).abs();
        if steep {
            std::mem::swap(&mut a.x, &mut a.y);
            std::mem::swap(&mut b.x, &mut b.y);
        }
        if a.x > b.x {
            std::mem::swap(&mut a, &mut b);
        }

        let dx = i64::from(round_i(b.x - a.x));
        let dy = i64::from(round_i(b.y - a.y));

        Self {
            x: round_i(a.x),
            end_x: round_i(b.x),
            y: round_i(a.y),
            dx,
            derr: dy.abs() * 2,
            err: 0,
            y_step: if b.y > a.y { 1 } else { -1 },
            steep,
        }
    }
}

impl Iterator for LinePixels {
    type Item = Point2;

    fn next(&mut self) -> Option<Point2> {
        if self.x >= self.end_x {
            return None;
        }

        let point = if self.steep {
            Point2::new(self.y as f32, self.x as f32)
        } else {
            Point2::new(self.x as f32, self.y as f32)
        };

        self.err += self.derr;
        if self.err > self.dx {
            self.y += self.y_step;
            self.err -= self.dx * 2;
        }
        self.x += 1;

        Some(point)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = (i64::from(self.end_x) - i64::from(self.x)).max(0) as usize;
        (n, Some(n))
    }
}

/// Midpoint circle outline.
///
/// Each step yields the eight octant reflections of the current offset, so
/// points on the diagonals and axes may repeat. A negative or NaN radius
/// yields nothing; a zero radius yields the center.
#[derive(Debug, Clone)]
pub struct CircleOutline {
    center: Point2,
    x: i32,
    y: i32,
    decision: i32,
    octant: u8,
}

impl CircleOutline {
    /// Create the outline of the circle at `center` with `radius`.
    #[must_use]
    pub fn new(center: Point2, radius: f32) -> Self {
        let x = if radius >= 0.0 { round_i(radius) } else { -1 };
        Self {
            center,
            x,
            y: 0,
            decision: 1 - x,
            octant: 0,
        }
    }

    fn advance(&mut self) {
        self.y += 1;
        if self.decision <= 0 {
            self.decision += 2 * self.y + 1;
        } else {
            self.x -= 1;
            self.decision += 2 * (self.y - self.x) + 1;
        }
    }
}

impl Iterator for CircleOutline {
    type Item = Point2;

    fn next(&mut self) -> Option<Point2> {
        if self.y > self.x {
            return None;
        }

        let (x, y) = (self.x as f32, self.y as f32);
        let c = self.center;
        let point = match self.octant {
            0 => Point2::new(c.x + x, c.y + y),
            1 => Point2::new(c.x + y, c.y + x),
            2 => Point2::new(c.x - x, c.y + y),
            3 => Point2::new(c.x - y, c.y + x),
            4 => Point2::new(c.x - x, c.y - y),
            5 => Point2::new(c.x - y, c.y - x),
            6 => Point2::new(c.x + x, c.y - y),
            _ => Point2::new(c.x + y, c.y - x),
        };

        self.octant += 1;
        if self.octant == 8 {
            self.octant = 0;
            self.advance();
        }

        Some(point)
    }
}

/// Logical coordinates that can land on a canvas of `size` pixels along
/// one axis, with a pixel of slack on each side for rounding.
fn visible_span(size: u32) -> (i32, i32) {
    (-1, i32::try_from(size).unwrap_or(i32::MAX).saturating_add(1))
}

/// Filled disc: every integer offset `(x, y)` with `x² + y² < radius²`,
/// scanned row by row over the bounding square.
///
/// A radius of zero (or below, or NaN) yields nothing; a radius of one
/// yields only the center.
#[derive(Debug, Clone)]
pub struct FilledCircle {
    center: Point2,
    radius_sq: f32,
    x_min: i32,
    x_max: i32,
    y_max: i32,
    x: i32,
    y: i32,
}

impl FilledCircle {
    /// Create the fill of the circle at `center` with `radius`.
    #[must_use]
    pub fn new(center: Point2, radius: f32) -> Self {
        let extent = if radius > 0.0 {
            radius.ceil() as i32
        } else {
            -1
        };
        Self {
            center,
            radius_sq: radius * radius,
            x_min: -extent,
            x_max: extent,
            y_max: extent,
            x: -extent,
            y: -extent,
        }
    }

    /// Restrict the scan to points that can land on a `width` x `height`
    /// canvas. Points that could not be written are never visited.
    #[must_use]
    pub fn clip_to(mut self, width: u32, height: u32) -> Self {
        let (lo_x, hi_x) = visible_span(width);
        let (lo_y, hi_y) = visible_span(height);

        self.x_min = self.x_min.max(floor_i(lo_x as f32 - self.center.x));
        self.x_max = self.x_max.min((hi_x as f32 - self.center.x).ceil() as i32);
        self.y = self.y.max(floor_i(lo_y as f32 - self.center.y));
        self.y_max = self.y_max.min((hi_y as f32 - self.center.y).ceil() as i32);
        self.x = self.x_min;
        self
    }
}

impl Iterator for FilledCircle {
    type Item = Point2;

    fn next(&mut self) -> Option<Point2> {
        while self.y <= self.y_max && self.x_min <= self.x_max {
            let (x, y) = (self.x, self.y);

            self.x += 1;
            if self.x > self.x_max {
                self.x = self.x_min;
                self.y += 1;
            }

            let dist_sq = (i64::from(x) * i64::from(x) + i64::from(y) * i64::from(y)) as f32;
            if dist_sq < self.radius_sq {
                return Some(Point2::new(self.center.x + x as f32, self.center.y + y as f32));
            }
        }
        None
    }
}

/// Filled triangle: integer points of the bounding box whose barycentric
/// weights are all non-negative.
///
/// The scan covers `round(min) - 1 ..= round(max)` on both axes so rounding
/// of the low corner never clips an edge pixel.
#[derive(Debug, Clone)]
pub struct TrianglePixels {
    triangle: Triangle,
    x_start: i32,
    x_end: i32,
    y_end: i32,
    x: i32,
    y: i32,
}

impl TrianglePixels {
    /// Create the fill of `triangle`.
    #[must_use]
    pub fn new(triangle: Triangle) -> Self {
        let bounds = triangle.bounds();
        let x_start = round_i(bounds.min().x).saturating_sub(1);
        let y_start = round_i(bounds.min().y).saturating_sub(1);

        Self {
            triangle,
            x_start,
            x_end: round_i(bounds.max().x),
            y_end: round_i(bounds.max().y),
            x: x_start,
            y: y_start,
        }
    }

    /// Restrict the scan to points that can land on a `width` x `height`
    /// canvas. Points that could not be written are never visited.
    #[must_use]
    pub fn clip_to(mut self, width: u32, height: u32) -> Self {
        let (lo_x, hi_x) = visible_span(width);
        let (lo_y, hi_y) = visible_span(height);

        self.x_start = self.x_start.max(lo_x);
        self.x_end = self.x_end.min(hi_x);
        self.y = self.y.max(lo_y);
        self.y_end = self.y_end.min(hi_y);
        self.x = self.x_start;
        self
    }
}

impl Iterator for TrianglePixels {
    type Item = Point2;

    fn next(&mut self) -> Option<Point2> {
        while self.y <= self.y_end && self.x_start <= self.x_end {
            let point = Point2::new(self.x as f32, self.y as f32);

            if self.x >= self.x_end {
                self.x = self.x_start;
                self.y += 1;
            } else {
                self.x += 1;
            }

            if self.triangle.contains(point) {
                return Some(point);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coords(points: impl Iterator<Item = Point2>) -> Vec<(i32, i32)> {
        points.map(|p| (p.x as i32, p.y as i32)).collect()
    }

    #[test]
    fn test_buffer_coords_flip() {
        assert_eq!(to_buffer_coords(10, Point2::new(3.0, 10.0)), (3, 0));
        assert_eq!(to_buffer_coords(10, Point2::new(3.0, 1.0)), (3, 9));
        assert_eq!(to_buffer_coords(10, Point2::new(3.0, 0.0)), (3, 10));
        assert_eq!(to_buffer_coords(10, Point2::new(2.5, 7.4)), (3, 3));
    }

    #[test]
    fn test_line_excludes_endpoint() {
        let pts = coords(LinePixels::new(Point2::new(0.0, 0.0), Point2::new(5.0, 0.0)));
        assert_eq!(pts, vec![(0, 0), (1, 0), (2, 0), (3, 0), (4, 0)]);
    }

    #[test]
    fn test_line_reversed_swaps_endpoints() {
        let pts = coords(LinePixels::new(Point2::new(5.0, 0.0), Point2::new(0.0, 0.0)));
        assert_eq!(pts, vec![(0, 0), (1, 0), (2, 0), (3, 0), (4, 0)]);
    }

    #[test]
    fn test_line_steep_steps_along_y() {
        let pts = coords(LinePixels::new(Point2::new(2.0, 0.0), Point2::new(2.0, 4.0)));
        assert_eq!(pts, vec![(2, 0), (2, 1), (2, 2), (2, 3)]);
    }

    #[test]
    fn test_line_diagonal() {
        let pts = coords(LinePixels::new(Point2::new(0.0, 0.0), Point2::new(4.0, 4.0)));
        assert_eq!(pts, vec![(0, 0), (1, 1), (2, 2), (3, 3)]);
    }

    #[test]
    fn test_line_descending_minor_axis() {
        let pts = coords(LinePixels::new(Point2::new(0.0, 3.0), Point2::new(6.0, 0.0)));
        assert_eq!(pts.len(), 6);
        assert_eq!(pts[0], (0, 3));
        // y never increases and never drops below the end point
        assert!(pts.windows(2).all(|w| w[1].1 <= w[0].1));
        assert!(pts.iter().all(|&(_, y)| (0..=3).contains(&y)));
    }

    #[test]
    fn test_line_degenerate_is_empty() {
        let p = Point2::new(3.0, 3.0);
        assert_eq!(LinePixels::new(p, p).count(), 0);
    }

    #[test]
    fn test_line_size_hint() {
        let line = LinePixels::new(Point2::new(1.0, 1.0), Point2::new(9.0, 3.0));
        assert_eq!(line.size_hint(), (8, Some(8)));
        assert_eq!(line.count(), 8);
    }

    #[test]
    fn test_filled_circle_radius_zero() {
        assert_eq!(FilledCircle::new(Point2::new(5.0, 5.0), 0.0).count(), 0);
        assert_eq!(FilledCircle::new(Point2::new(5.0, 5.0), -2.0).count(), 0);
        assert_eq!(FilledCircle::new(Point2::new(5.0, 5.0), f32::NAN).count(), 0);
    }

    #[test]
    fn test_filled_circle_radius_one_is_center() {
        let pts = coords(FilledCircle::new(Point2::new(5.0, 5.0), 1.0));
        assert_eq!(pts, vec![(5, 5)]);
    }

    #[test]
    fn test_filled_circle_strict_inequality() {
        let center = Point2::new(0.0, 0.0);
        let pts = coords(FilledCircle::new(center, 2.0));
        // offsets with x² + y² < 4
        assert_eq!(pts.len(), 9);
        assert!(!pts.contains(&(2, 0)));
        assert!(pts.contains(&(1, 1)));
        assert!(pts.iter().all(|&(x, y)| x * x + y * y < 4));
    }

    #[test]
    fn test_filled_circle_symmetric() {
        let pts = coords(FilledCircle::new(Point2::new(0.0, 0.0), 2.4));
        for &(x, y) in &pts {
            assert!(pts.contains(&(-x, y)));
            assert!(pts.contains(&(x, -y)));
        }
        assert!(pts.contains(&(2, 0)));
    }

    #[test]
    fn test_circle_outline_points_on_radius() {
        let pts = coords(CircleOutline::new(Point2::new(0.0, 0.0), 5.0));
        assert!(pts.contains(&(5, 0)));
        assert!(pts.contains(&(0, 5)));
        assert!(pts.contains(&(-5, 0)));
        assert!(pts.contains(&(0, -5)));
        assert!(!pts.contains(&(0, 0)));
        for &(x, y) in &pts {
            let d = ((x * x + y * y) as f32).sqrt();
            assert!((d - 5.0).abs() < 1.0, "({x}, {y}) is {d} from center");
        }
    }

    #[test]
    fn test_circle_outline_eightfold() {
        assert_eq!(CircleOutline::new(Point2::new(0.0, 0.0), 5.0).count() % 8, 0);
    }

    #[test]
    fn test_circle_outline_degenerate_radius() {
        let pts = coords(CircleOutline::new(Point2::new(4.0, 4.0), 0.0));
        assert_eq!(pts.len(), 8);
        assert!(pts.iter().all(|&p| p == (4, 4)));
        assert_eq!(CircleOutline::new(Point2::new(4.0, 4.0), -1.0).count(), 0);
    }

    #[test]
    fn test_triangle_pixels_inside() {
        let tri = Triangle::new(
            Point2::new(0.0, 0.0),
            Point2::new(4.0, 0.0),
            Point2::new(0.0, 4.0),
        );
        let pts = coords(TrianglePixels::new(tri));
        // x, y >= 0 and x + y <= 4
        assert_eq!(pts.len(), 15);
        assert!(pts.contains(&(0, 0)));
        assert!(pts.contains(&(4, 0)));
        assert!(pts.contains(&(2, 2)));
        assert!(!pts.contains(&(3, 2)));
        assert!(!pts.contains(&(-1, 0)));
    }

    #[test]
    fn test_triangle_pixels_colinear_is_empty() {
        let tri = Triangle::new(
            Point2::new(0.0, 0.0),
            Point2::new(5.0, 5.0),
            Point2::new(10.0, 10.0),
        );
        assert_eq!(TrianglePixels::new(tri).count(), 0);
    }

    #[test]
    fn test_filled_circle_clip_matches_unclipped_on_canvas() {
        let center = Point2::new(3.0, 18.0);
        let on_canvas = |p: &Point2| {
            let (x, y) = to_buffer_coords(20, *p);
            (0..20).contains(&x) && (0..20).contains(&y)
        };

        let full: Vec<_> = FilledCircle::new(center, 7.5).filter(on_canvas).collect();
        let clipped: Vec<_> = FilledCircle::new(center, 7.5).clip_to(20, 20).collect();

        assert!(clipped.len() < FilledCircle::new(center, 7.5).count());
        assert_eq!(clipped.iter().filter(|p| on_canvas(p)).copied().collect::<Vec<_>>(), full);
    }

    #[test]
    fn test_huge_fills_clip_to_canvas() {
        let disc = FilledCircle::new(Point2::new(512.0, 512.0), 1e5).clip_to(16, 16);
        // Logical -1..=17 on both axes.
        assert_eq!(disc.count(), 19 * 19);

        let tri = Triangle::new(
            Point2::new(-1e6, -1e6),
            Point2::new(1e6, -1e6),
            Point2::new(0.0, 1e6),
        );
        assert_eq!(TrianglePixels::new(tri).clip_to(16, 16).count(), 19 * 19);
    }

    #[test]
    fn test_fills_far_off_canvas_are_empty() {
        assert_eq!(
            FilledCircle::new(Point2::new(-500.0, 8.0), 10.0).clip_to(16, 16).count(),
            0
        );
        let tri = Triangle::new(
            Point2::new(100.0, 100.0),
            Point2::new(120.0, 100.0),
            Point2::new(110.0, 120.0),
        );
        assert_eq!(TrianglePixels::new(tri).clip_to(16, 16).count(), 0);
    }
}
