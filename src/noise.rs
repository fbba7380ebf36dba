//! Procedural value noise and point shaders.
//!
//! Not used by the rasterizer itself. A [`Shader`] turns a point into a
//! color; [`shade`] fills a whole buffer from one, which is how the demo
//! renders its heightmap background.

use std::f32::consts::PI;

use crate::color::{blend, Rgb};
use crate::geometry::Point2;
use crate::math::{floor_i, frac, round_i};
use crate::pixel_buffer::PixelBuffer;

/// Something that produces a color for a point.
pub trait Shader {
    /// Color at `point`.
    fn color_at(&self, point: Point2) -> Rgb;
}

impl<F: Fn(Point2) -> Rgb> Shader for F {
    fn color_at(&self, point: Point2) -> Rgb {
        self(point)
    }
}

/// Fill every pixel of `fb` from `shader`.
///
/// Each pixel's logical coordinate (origin bottom-left, buffer row 0 is
/// logical `y == height`) is passed through `to_sample` before shading.
pub fn shade<S, M>(fb: &mut PixelBuffer, shader: &S, to_sample: M)
where
    S: Shader + ?Sized,
    M: Fn(Point2) -> Point2,
{
    let height = fb.height() as i32;
    for row in 0..height {
        for x in 0..fb.width() as i32 {
            let logical = Point2::new(x as f32, (height - row) as f32);
            fb.set_pixel(x, row, shader.color_at(to_sample(logical)));
        }
    }
}

/// Multi-octave value noise over an integer hash lattice.
///
/// Each octave doubles the frequency and multiplies the amplitude by
/// `persistence`. A single octave is in `[-1, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueNoise {
    persistence: f32,
    octaves: u32,
}

impl Default for ValueNoise {
    fn default() -> Self {
        Self::new(0.5, 10)
    }
}

impl ValueNoise {
    /// Create a noise generator.
    #[must_use]
    pub const fn new(persistence: f32, octaves: u32) -> Self {
        Self {
            persistence,
            octaves,
        }
    }

    /// Sum of all octaves at `(x, y)`.
    #[must_use]
    pub fn sample(&self, x: f32, y: f32) -> f32 {
        let mut total = 0.0;
        let mut frequency = 1.0;
        let mut amplitude = 1.0;

        for _ in 0..self.octaves {
            total += interpolated(x * frequency, y * frequency) * amplitude;
            frequency *= 2.0;
            amplitude *= self.persistence;
        }

        total
    }

    /// [`ValueNoise::sample`] clamped to `[0, 1]`.
    #[must_use]
    pub fn sample_unit(&self, point: Point2) -> f32 {
        let v = self.sample(point.x, point.y);
        if v.is_nan() {
            0.0
        } else {
            v.clamp(0.0, 1.0)
        }
    }
}

/// Pseudo-random value in `[-1, 1]` for a lattice point.
fn lattice(x: i32, y: i32) -> f32 {
    let n = x.wrapping_add(y.wrapping_mul(57));
    let n = n.wrapping_shl(13) ^ n;
    let m = n
        .wrapping_mul(n.wrapping_mul(n).wrapping_mul(15731).wrapping_add(789_221))
        .wrapping_add(1_376_312_589)
        & 0x7fff_ffff;
    1.0 - (m as f32 / 1_073_741_824.0)
}

/// Lattice value averaged with its 8 neighbours (weights 1/4, 1/8, 1/16).
fn smoothed(x: i32, y: i32) -> f32 {
    let (x0, x1) = (x.wrapping_sub(1), x.wrapping_add(1));
    let (y0, y1) = (y.wrapping_sub(1), y.wrapping_add(1));

    let corners = (lattice(x0, y0) + lattice(x1, y0) + lattice(x0, y1) + lattice(x1, y1)) / 16.0;
    let sides = (lattice(x0, y) + lattice(x1, y) + lattice(x, y0) + lattice(x, y1)) / 8.0;
    let center = lattice(x, y) / 4.0;

    corners + sides + center
}

fn interpolated(x: f32, y: f32) -> f32 {
    let (ix, iy) = (floor_i(x), floor_i(y));
    let (fx, fy) = (frac(x), frac(y));

    let v1 = smoothed(ix, iy);
    let v2 = smoothed(ix.wrapping_add(1), iy);
    let v3 = smoothed(ix, iy.wrapping_add(1));
    let v4 = smoothed(ix.wrapping_add(1), iy.wrapping_add(1));

    let top = cosine_interp(v1, v2, fx);
    let bottom = cosine_interp(v3, v4, fx);
    cosine_interp(top, bottom, fy)
}

fn cosine_interp(a: f32, b: f32, t: f32) -> f32 {
    let f = (1.0 - (t * PI).cos()) * 0.5;
    a * (1.0 - f) + b * f
}

/// Greyscale heightmap: noise in `[0, 1]` mapped onto 256 grey levels.
#[derive(Debug, Clone)]
pub struct Heightmap {
    noise: ValueNoise,
    palette: [Rgb; 256],
}

impl Heightmap {
    /// Create a heightmap shader. The palette is built here, once.
    #[must_use]
    pub fn new(noise: ValueNoise) -> Self {
        Self {
            noise,
            palette: std::array::from_fn(|i| Rgb::grey(i as u8)),
        }
    }
}

impl Shader for Heightmap {
    fn color_at(&self, point: Point2) -> Rgb {
        let level = round_i(self.noise.sample_unit(point) * 255.0).clamp(0, 255);
        self.palette[level as usize]
    }
}

/// Stops of the [`ColorField`] gradient, from deep blue to white.
const COLOR_FIELD_STOPS: [Rgb; 21] = [
    Rgb::new(0, 0, 64),
    Rgb::new(128, 0, 128),
    Rgb::new(128, 0, 255),
    Rgb::new(128, 64, 255),
    Rgb::new(64, 64, 255),
    Rgb::new(0, 128, 255),
    Rgb::new(0, 192, 255),
    Rgb::new(0, 255, 255),
    Rgb::new(0, 255, 128),
    Rgb::new(0, 255, 64),
    Rgb::new(64, 255, 64),
    Rgb::new(64, 255, 0),
    Rgb::new(128, 255, 0),
    Rgb::new(255, 255, 0),
    Rgb::new(255, 128, 0),
    Rgb::new(128, 0, 0),
    Rgb::new(255, 0, 0),
    Rgb::new(255, 64, 64),
    Rgb::new(255, 128, 128),
    Rgb::new(255, 192, 192),
    Rgb::new(255, 255, 255),
];

/// False-color field: noise in `[0, 1]` mapped along a 21-stop gradient.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColorField {
    noise: ValueNoise,
}

impl ColorField {
    /// Create a color field shader.
    #[must_use]
    pub const fn new(noise: ValueNoise) -> Self {
        Self { noise }
    }

    /// Gradient color at `t` in `[0, 1]`, blending the two nearest stops.
    #[must_use]
    pub fn gradient(t: f32) -> Rgb {
        let last = COLOR_FIELD_STOPS.len() - 1;
        let pos = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) } * last as f32;

        let lo = (floor_i(pos).max(0) as usize).min(last);
        let hi = (lo + 1).min(last);
        blend(COLOR_FIELD_STOPS[lo], COLOR_FIELD_STOPS[hi], frac(pos))
    }
}

impl Shader for ColorField {
    fn color_at(&self, point: Point2) -> Rgb {
        Self::gradient(self.noise.sample_unit(point))
    }
}
