//! RGB color type and alpha blending.
//!
//! Colors are three 8-bit channels. Construction from wider integers clamps
//! each channel independently, so `rgb(-10, 300, 128)` is `(0, 255, 128)`.

/// RGB color with 8-bit components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(C)]
pub struct Rgb {
    /// Red component (0-255).
    pub r: u8,
    /// Green component (0-255).
    pub g: u8,
    /// Blue component (0-255).
    pub b: u8,
}

impl Rgb {
    /// Black.
    pub const BLACK: Self = Self::new(0, 0, 0);
    /// White.
    pub const WHITE: Self = Self::new(255, 255, 255);
    /// Red.
    pub const RED: Self = Self::new(255, 0, 0);
    /// Green.
    pub const GREEN: Self = Self::new(0, 255, 0);
    /// Blue.
    pub const BLUE: Self = Self::new(0, 0, 255);

    /// Create a color from in-range channels.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a color, clamping each channel to `[0, 255]`.
    ///
    /// ```
    /// use trueno_raster::color::Rgb;
    ///
    /// assert_eq!(Rgb::clamped(-10, 300, 128), Rgb::new(0, 255, 128));
    /// ```
    #[must_use]
    pub fn clamped(r: i32, g: i32, b: i32) -> Self {
        Self::new(clamp_channel(r), clamp_channel(g), clamp_channel(b))
    }

    /// Grey level with all channels equal.
    #[must_use]
    pub const fn grey(level: u8) -> Self {
        Self::new(level, level, level)
    }

    /// Convert to array representation.
    #[must_use]
    pub const fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Create from array representation.
    #[must_use]
    pub const fn from_array(arr: [u8; 3]) -> Self {
        Self::new(arr[0], arr[1], arr[2])
    }

    /// Blend `fg` over `self` (the background) with weight `alpha`.
    ///
    /// See [`blend`].
    #[must_use]
    pub fn blend(self, fg: Self, alpha: f32) -> Self {
        blend(self, fg, alpha)
    }
}

impl From<[u8; 3]> for Rgb {
    fn from(arr: [u8; 3]) -> Self {
        Self::from_array(arr)
    }
}

impl From<Rgb> for [u8; 3] {
    fn from(color: Rgb) -> Self {
        color.to_array()
    }
}

/// Create a color, clamping each channel to `[0, 255]`.
#[must_use]
pub fn rgb(r: i32, g: i32, b: i32) -> Rgb {
    Rgb::clamped(r, g, b)
}

#[inline]
fn clamp_channel(v: i32) -> u8 {
    v.clamp(0, 255) as u8
}

/// Per-channel linear blend: `alpha * fg + (1 - alpha) * bg`, truncated.
///
/// `alpha` is clamped to `[0, 1]`; a NaN alpha is treated as 0. With
/// `alpha == 0` the result is `bg`, with `alpha == 1` it is `fg`.
#[must_use]
pub fn blend(bg: Rgb, fg: Rgb, alpha: f32) -> Rgb {
    let alpha = if alpha.is_nan() { 0.0 } else { alpha.clamp(0.0, 1.0) };
    let inv = 1.0 - alpha;
    let mix = |b: u8, f: u8| (alpha * f32::from(f) + inv * f32::from(b)) as u8;

    Rgb::new(mix(bg.r, fg.r), mix(bg.g, fg.g), mix(bg.b, fg.b))
}
