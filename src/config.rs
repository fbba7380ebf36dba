//! Configuration for the demo renderer.
//!
//! Supports YAML configuration; every field falls back to its default, so an
//! empty document is a valid configuration.

use crate::error::{Error, Result};
use crate::geometry::{Point2, Rect};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Which shader paints the demo canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShaderKind {
    /// Greyscale value-noise heightmap.
    #[default]
    Heightmap,
    /// Value noise mapped along a multi-stop color gradient.
    ColorField,
}

/// Demo renderer settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemoConfig {
    /// Canvas width in pixels.
    #[serde(default = "default_canvas_size")]
    pub width: u32,

    /// Canvas height in pixels.
    #[serde(default = "default_canvas_size")]
    pub height: u32,

    /// Width and height of the overlay image.
    #[serde(default = "default_overlay_size")]
    pub overlay_size: u32,

    /// Lower-left corner of the overlay destination, in logical coordinates.
    #[serde(default = "default_overlay_min")]
    pub overlay_min: [f32; 2],

    /// Upper-right corner of the overlay destination.
    #[serde(default = "default_overlay_max")]
    pub overlay_max: [f32; 2],

    /// Opacity of the overlay when blended onto the canvas.
    #[serde(default = "default_overlay_alpha")]
    pub overlay_alpha: f32,

    /// Amplitude falloff between noise octaves.
    #[serde(default = "default_persistence")]
    pub persistence: f32,

    /// Number of noise octaves.
    #[serde(default = "default_octaves")]
    pub octaves: u32,

    /// Noise periods across one image.
    #[serde(default = "default_sample_scale")]
    pub sample_scale: f32,

    /// Offset added to every pixel coordinate before sampling noise.
    #[serde(default = "default_sample_offset")]
    pub sample_offset: f32,

    /// Canvas shader.
    #[serde(default)]
    pub shader: ShaderKind,

    /// PPM output path.
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Optional PNG output path.
    #[serde(default)]
    pub png_output: Option<PathBuf>,
}

fn default_canvas_size() -> u32 {
    1024
}
fn default_overlay_size() -> u32 {
    128
}
fn default_overlay_min() -> [f32; 2] {
    [128.0, 128.0]
}
fn default_overlay_max() -> [f32; 2] {
    [448.0, 448.0]
}
fn default_overlay_alpha() -> f32 {
    0.1
}
fn default_persistence() -> f32 {
    0.5
}
fn default_octaves() -> u32 {
    10
}
fn default_sample_scale() -> f32 {
    8.0
}
fn default_sample_offset() -> f32 {
    512.0
}
fn default_output() -> PathBuf {
    PathBuf::from("overlay.ppm")
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            width: default_canvas_size(),
            height: default_canvas_size(),
            overlay_size: default_overlay_size(),
            overlay_min: default_overlay_min(),
            overlay_max: default_overlay_max(),
            overlay_alpha: default_overlay_alpha(),
            persistence: default_persistence(),
            octaves: default_octaves(),
            sample_scale: default_sample_scale(),
            sample_offset: default_sample_offset(),
            shader: ShaderKind::default(),
            output: default_output(),
            png_output: None,
        }
    }
}

impl DemoConfig {
    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("cannot read {}: {e}", path.display())))?;

        Self::parse(&content)
    }

    /// Parses configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error with line number if parsing fails.
    pub fn parse(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml_ng::from_str(yaml).map_err(|e| {
            let line = e.location().map_or(0, |l| l.line());
            Error::Config(format!("line {line}: {e}"))
        })
    }

    /// Loads configuration with fallback to defaults.
    #[must_use]
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        Self::load(path).unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), error = %e, "using default configuration");
            Self::default()
        })
    }

    /// Checks that the settings can produce an image.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::Config(format!(
                "canvas size must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        if self.overlay_size == 0 {
            return Err(Error::Config("overlay_size must be positive".to_string()));
        }
        if !(0.0..=1.0).contains(&self.overlay_alpha) {
            return Err(Error::Config(format!(
                "overlay_alpha must be in [0, 1], got {}",
                self.overlay_alpha
            )));
        }
        if self.octaves == 0 {
            return Err(Error::Config("octaves must be at least 1".to_string()));
        }
        if !self.sample_scale.is_finite() || self.sample_scale <= 0.0 {
            return Err(Error::Config(format!(
                "sample_scale must be positive, got {}",
                self.sample_scale
            )));
        }
        Ok(())
    }

    /// Overlay destination rectangle.
    #[must_use]
    pub fn overlay_rect(&self) -> Rect {
        Rect::new(
            Point2::new(self.overlay_min[0], self.overlay_min[1]),
            Point2::new(self.overlay_max[0], self.overlay_max[1]),
        )
    }
}
