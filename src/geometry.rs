//! Geometric primitives for rasterization.
//!
//! All coordinates are in the Cartesian frame used by the rasterizer: the
//! origin is the bottom-left corner of the canvas and `y` grows upwards.

use std::ops::{Add, Mul, Neg, Sub};

/// A 2D vector with floating-point components.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    /// X component.
    pub x: f32,
    /// Y component.
    pub y: f32,
}

/// A position in the plane. Structurally identical to [`Vec2`]; differences
/// of two points are displacements.
pub type Point2 = Vec2;

impl Vec2 {
    /// Origin (0, 0).
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Create a new vector.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Multiply both components by `s`.
    #[must_use]
    pub fn scale(self, s: f32) -> Self {
        Self::new(self.x * s, self.y * s)
    }

    /// Dot product.
    #[must_use]
    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y
    }

    /// Euclidean length.
    #[must_use]
    pub fn magnitude(self) -> f32 {
        self.magnitude_squared().sqrt()
    }

    /// Squared length, for comparisons that don't need the square root.
    #[must_use]
    pub fn magnitude_squared(self) -> f32 {
        self.dot(self)
    }

    /// Calculate the distance to another point.
    #[must_use]
    pub fn distance(self, other: Self) -> f32 {
        (self - other).magnitude()
    }
}

impl Add for Vec2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        self.scale(rhs)
    }
}

impl Neg for Vec2 {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

/// A 3D vector. Also carries barycentric weights (see [`Triangle::barycentric`]).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec3 {
    /// X component.
    pub x: f32,
    /// Y component.
    pub y: f32,
    /// Z component.
    pub z: f32,
}

impl Vec3 {
    /// Create a new vector.
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Multiply all components by `s`.
    #[must_use]
    pub fn scale(self, s: f32) -> Self {
        Self::new(self.x * s, self.y * s, self.z * s)
    }

    /// Dot product.
    #[must_use]
    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Right-handed cross product.
    #[must_use]
    pub fn cross(self, other: Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    /// Euclidean length.
    #[must_use]
    pub fn magnitude(self) -> f32 {
        self.magnitude_squared().sqrt()
    }

    /// Squared length.
    #[must_use]
    pub fn magnitude_squared(self) -> f32 {
        self.dot(self)
    }

    /// True if all three components are non-negative.
    ///
    /// For barycentric weights this is the inside-or-on-edge test.
    #[must_use]
    pub fn is_non_negative(self) -> bool {
        self.x >= 0.0 && self.y >= 0.0 && self.z >= 0.0
    }
}

impl Add for Vec3 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f32> for Vec3 {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        self.scale(rhs)
    }
}

impl Neg for Vec3 {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

/// Axis-aligned rectangle stored as its minimum and maximum corners.
///
/// The corners are normalized on construction, so `min.x <= max.x` and
/// `min.y <= max.y` always hold and the extents are never negative.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    min: Point2,
    max: Point2,
}

impl Rect {
    /// Create a rectangle from any two diagonally opposite corners.
    #[must_use]
    pub fn new(a: Point2, b: Point2) -> Self {
        Self {
            min: Point2::new(a.x.min(b.x), a.y.min(b.y)),
            max: Point2::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    /// Create a rectangle from coordinates of two opposite corners.
    #[must_use]
    pub fn from_coords(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self::new(Point2::new(x0, y0), Point2::new(x1, y1))
    }

    /// Minimum (bottom-left) corner.
    #[must_use]
    pub const fn min(&self) -> Point2 {
        self.min
    }

    /// Maximum (top-right) corner.
    #[must_use]
    pub const fn max(&self) -> Point2 {
        self.max
    }

    /// Horizontal extent.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    /// Vertical extent.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Check if a point is inside the rectangle (edges included).
    #[must_use]
    pub fn contains(&self, point: Point2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }
}

/// A line segment between two points.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Line {
    /// Start point.
    pub start: Point2,
    /// End point (not plotted by the rasterizer).
    pub end: Point2,
}

impl Line {
    /// Create a new line segment.
    #[must_use]
    pub const fn new(start: Point2, end: Point2) -> Self {
        Self { start, end }
    }

    /// Create a line from coordinates.
    #[must_use]
    pub const fn from_coords(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self::new(Point2::new(x0, y0), Point2::new(x1, y1))
    }

    /// Get the length of the line.
    #[must_use]
    pub fn length(&self) -> f32 {
        self.start.distance(self.end)
    }
}

/// A circle given by its center and radius.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Circle {
    /// Center point.
    pub center: Point2,
    /// Radius in pixels.
    pub radius: f32,
}

impl Circle {
    /// Create a circle.
    #[must_use]
    pub const fn new(center: Point2, radius: f32) -> Self {
        Self { center, radius }
    }
}

/// A triangle given by three ordered vertices.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Triangle {
    /// First vertex.
    pub p1: Point2,
    /// Second vertex.
    pub p2: Point2,
    /// Third vertex.
    pub p3: Point2,
}

/// Barycentric result for degenerate triangles. One weight is negative so
/// every query point is classified as outside.
pub const DEGENERATE_BARYCENTRIC: Vec3 = Vec3::new(-1.0, 1.0, 1.0);

impl Triangle {
    /// Create a triangle.
    #[must_use]
    pub const fn new(p1: Point2, p2: Point2, p3: Point2) -> Self {
        Self { p1, p2, p3 }
    }

    /// Component-wise bounding box of the three vertices.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        let min = Point2::new(
            self.p1.x.min(self.p2.x).min(self.p3.x),
            self.p1.y.min(self.p2.y).min(self.p3.y),
        );
        let max = Point2::new(
            self.p1.x.max(self.p2.x).max(self.p3.x),
            self.p1.y.max(self.p2.y).max(self.p3.y),
        );
        Rect { min, max }
    }

    /// Barycentric coordinates of `point` with respect to this triangle.
    ///
    /// The result `(u, v, w)` weights `p1`, `p2` and `p3` respectively. The
    /// point is inside (or on an edge) iff all three are non-negative.
    ///
    /// The weights come from the cross product of the x and y edge-difference
    /// vectors. Its z component is twice the signed area; when its magnitude
    /// is below 1 the triangle is treated as degenerate and
    /// [`DEGENERATE_BARYCENTRIC`] is returned instead of dividing.
    #[must_use]
    pub fn barycentric(&self, point: Point2) -> Vec3 {
        let v = Vec3::new(
            self.p3.x - self.p1.x,
            self.p2.x - self.p1.x,
            self.p1.x - point.x,
        );
        let u = Vec3::new(
            self.p3.y - self.p1.y,
            self.p2.y - self.p1.y,
            self.p1.y - point.y,
        );
        let r = v.cross(u);

        if r.z.abs() < 1.0 {
            return DEGENERATE_BARYCENTRIC;
        }

        Vec3::new(1.0 - (r.x + r.y) / r.z, r.y / r.z, r.x / r.z)
    }

    /// True if `point` is inside the triangle or on its boundary.
    #[must_use]
    pub fn contains(&self, point: Point2) -> bool {
        self.barycentric(point).is_non_negative()
    }
}
