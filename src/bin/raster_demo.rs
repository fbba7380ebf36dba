//! raster-demo - render a noise canvas with a blended overlay.
//!
//! Paints a value-noise background, renders a smaller overlay with a few
//! primitives on top of its own noise field, blends the overlay into a
//! rectangle of the canvas and writes the result as PPM (and optionally PNG).

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use trueno_raster::config::{DemoConfig, ShaderKind};
use trueno_raster::noise::{shade, ColorField, Heightmap, Shader, ValueNoise};
use trueno_raster::output::PngEncoder;
use trueno_raster::prelude::*;

/// Render a value-noise canvas with an alpha-blended overlay.
#[derive(Parser, Debug)]
#[command(name = "raster-demo")]
#[command(author = "PAIML Team")]
#[command(version)]
#[command(about = "Software rasterizer demo: noise, primitives and alpha blit", long_about = None)]
struct Cli {
    /// Config file path (YAML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// PPM output path (overrides the config file)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Also write a PNG to this path
    #[arg(long)]
    png: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let mut config = match &cli.config {
        Some(path) => DemoConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => DemoConfig::default(),
    };
    if let Some(output) = cli.output {
        config.output = output;
    }
    if cli.png.is_some() {
        config.png_output = cli.png;
    }
    config.validate()?;

    tracing::info!(backend = ?PixelBuffer::backend(), "selected SIMD backend");

    let canvas = render(&config)?;

    let (min, max, mean) = canvas.luminance_stats();
    tracing::info!(min, max, mean, "canvas luminance");

    canvas
        .save(&config.output)
        .with_context(|| format!("writing {}", config.output.display()))?;
    tracing::info!(path = %config.output.display(), "wrote PPM");

    if let Some(png) = &config.png_output {
        PngEncoder::write_to_file(&canvas, png)
            .with_context(|| format!("writing {}", png.display()))?;
        tracing::info!(path = %png.display(), "wrote PNG");
    }

    Ok(())
}

/// Build the finished canvas described by `config`.
fn render(config: &DemoConfig) -> Result<PixelBuffer> {
    let noise = ValueNoise::new(config.persistence, config.octaves);
    let (background, foreground): (Box<dyn Shader>, Box<dyn Shader>) = match config.shader {
        ShaderKind::Heightmap => (
            Box::new(Heightmap::new(noise)),
            Box::new(ColorField::new(noise)),
        ),
        ShaderKind::ColorField => (
            Box::new(ColorField::new(noise)),
            Box::new(Heightmap::new(noise)),
        ),
    };

    let mut canvas = PixelBuffer::new(config.width, config.height)?;
    let canvas_scale = config.width.max(config.height) as f32 / config.sample_scale;
    shade(&mut canvas, background.as_ref(), |p| {
        (p + Point2::new(config.sample_offset, config.sample_offset)).scale(1.0 / canvas_scale)
    });
    tracing::debug!(width = config.width, height = config.height, "shaded canvas");

    let size = config.overlay_size;
    let mut overlay = PixelBuffer::new(size, size)?;
    let overlay_scale = size as f32 / config.sample_scale;
    shade(&mut overlay, foreground.as_ref(), |p| p.scale(1.0 / overlay_scale));
    decorate(&mut overlay);

    let full = Rect::from_coords(0.0, 0.0, size as f32, size as f32);
    let written = blit_alpha(
        &mut canvas,
        config.overlay_rect(),
        &overlay,
        full,
        config.overlay_alpha,
    );
    tracing::debug!(written, alpha = config.overlay_alpha, "blended overlay");

    Ok(canvas)
}

/// Draw a small set of primitives across the overlay.
fn decorate(overlay: &mut PixelBuffer) {
    let s = overlay.width() as f32;
    let c = s / 2.0;

    let drawn = Filled(Circle::new(Point2::new(c, c), s / 4.0)).draw(overlay, Rgb::RED)
        + Circle::new(Point2::new(c, c), s * 0.375).draw(overlay, Rgb::WHITE)
        + Filled(Triangle::new(
            Point2::new(s * 0.1, s * 0.1),
            Point2::new(s * 0.9, s * 0.1),
            Point2::new(c, s * 0.45),
        ))
        .draw_alpha(overlay, Rgb::BLUE, 0.5)
        + draw_line(overlay, Point2::new(0.0, 1.0), Point2::new(s, s), Rgb::BLACK)
        + draw_line(overlay, Point2::new(0.0, s), Point2::new(s, 1.0), Rgb::BLACK);

    tracing::debug!(drawn, "decorated overlay");
}
