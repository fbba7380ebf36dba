//! Nearest-neighbor blitting between pixel buffers.
//!
//! Rectangles are given in the Cartesian frame. A rectangle `(min, max)`
//! covers the columns `min.x..max.x` and the logical rows
//! `min.y + 1 ..= max.y`, so `(0, 0)-(width, height)` is a whole buffer.
//! Corners are rounded to whole pixels first.
//!
//! Destination pixels are visited top to bottom, left to right. Each one is
//! sampled at its centre, mapped proportionally into the source rectangle,
//! and copied if the source pixel exists. Destination pixels that fall off
//! the canvas are skipped.

use crate::color::{blend, Rgb};
use crate::geometry::Rect;
use crate::math::round_i;
use crate::pixel_buffer::PixelBuffer;

/// Integer pixel extent of a rectangle.
#[derive(Debug, Clone, Copy)]
struct PixelRect {
    min_x: i64,
    max_y: i64,
    width: i64,
    height: i64,
}

impl PixelRect {
    fn from_rect(rect: Rect) -> Self {
        let min_x = i64::from(round_i(rect.min().x));
        let min_y = i64::from(round_i(rect.min().y));
        let max_x = i64::from(round_i(rect.max().x));
        let max_y = i64::from(round_i(rect.max().y));

        Self {
            min_x,
            max_y,
            width: max_x - min_x,
            height: max_y - min_y,
        }
    }

    fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }
}

/// Copy `src_rect` of `src` into `dest_rect` of `dest`, resizing with
/// nearest-neighbor sampling.
///
/// Returns the number of destination pixels written.
pub fn blit(dest: &mut PixelBuffer, dest_rect: Rect, src: &PixelBuffer, src_rect: Rect) -> usize {
    let written = resample(dest, dest_rect, src, src_rect, |_, fg| fg);
    tracing::debug!(?dest_rect, ?src_rect, written, "blit");
    written
}

/// Like [`blit`], but blends each source pixel over the destination with
/// `alpha * src + (1 - alpha) * dest`.
pub fn blit_alpha(
    dest: &mut PixelBuffer,
    dest_rect: Rect,
    src: &PixelBuffer,
    src_rect: Rect,
    alpha: f32,
) -> usize {
    let written = resample(dest, dest_rect, src, src_rect, |bg, fg| blend(bg, fg, alpha));
    tracing::debug!(?dest_rect, ?src_rect, alpha, written, "blit (alpha)");
    written
}

fn resample(
    dest: &mut PixelBuffer,
    dest_rect: Rect,
    src: &PixelBuffer,
    src_rect: Rect,
    compose: impl Fn(Rgb, Rgb) -> Rgb,
) -> usize {
    let d = PixelRect::from_rect(dest_rect);
    let s = PixelRect::from_rect(src_rect);
    if d.is_empty() || s.is_empty() {
        return 0;
    }

    let dest_w = i64::from(dest.width());
    let dest_h = i64::from(dest.height());
    let src_h = i64::from(src.height());

    // Only visit offsets that land on the destination canvas. Offset `row`
    // is logical y `d.max_y - row`, buffer row `dest_h - d.max_y + row`.
    let rows = (d.max_y - dest_h).max(0)..d.height.min(d.max_y);
    let cols = (-d.min_x).max(0)..d.width.min(dest_w - d.min_x);

    let mut written = 0;
    for row in rows {
        let src_offset = sample_offset(row, s.height, d.height);
        let src_row = src_h - (s.max_y - src_offset);
        let dest_row = dest_h - d.max_y + row;

        for col in cols.clone() {
            let src_col = s.min_x + sample_offset(col, s.width, d.width);
            let dest_col = d.min_x + col;

            let (Ok(sx), Ok(sy)) = (i32::try_from(src_col), i32::try_from(src_row)) else {
                continue;
            };
            let Ok(fg) = src.get_pixel(sx, sy) else {
                continue;
            };

            // dest_col/dest_row are inside the canvas by construction of the ranges.
            let (x, y) = (dest_col as i32, dest_row as i32);
            let Ok(bg) = dest.get_pixel(x, y) else {
                continue;
            };
            if dest.set_pixel(x, y, compose(bg, fg)) {
                written += 1;
            }
        }
    }

    written
}

/// `floor((offset + 0.5) / dest_extent * src_extent)` in integers.
///
/// Widened to `i128`: rect extents near the `i32` limits overflow `i64`
/// products. The result is below `src_extent`, so it fits back in `i64`.
#[inline]
fn sample_offset(offset: i64, src_extent: i64, dest_extent: i64) -> i64 {
    let scaled = (2 * i128::from(offset) + 1) * i128::from(src_extent) / (2 * i128::from(dest_extent));
    scaled as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 2x2 source with distinct colors; buffer row 0 is the top.
    fn quad() -> PixelBuffer {
        let mut src = PixelBuffer::new(2, 2).unwrap();
        src.set_pixel(0, 0, Rgb::RED);
        src.set_pixel(1, 0, Rgb::GREEN);
        src.set_pixel(0, 1, Rgb::BLUE);
        src.set_pixel(1, 1, Rgb::WHITE);
        src
    }

    #[test]
    fn test_blit_identity() {
        let src = quad();
        let mut dest = PixelBuffer::new(2, 2).unwrap();
        let full = Rect::from_coords(0.0, 0.0, 2.0, 2.0);

        assert_eq!(blit(&mut dest, full, &src, full), 4);
        assert_eq!(dest, src);
    }

    #[test]
    fn test_blit_upscale_nearest_neighbor() {
        let src = quad();
        let mut dest = PixelBuffer::new(4, 4).unwrap();

        let written = blit(
            &mut dest,
            Rect::from_coords(0.0, 0.0, 4.0, 4.0),
            &src,
            Rect::from_coords(0.0, 0.0, 2.0, 2.0),
        );

        assert_eq!(written, 16);
        let expected = [
            [Rgb::RED, Rgb::RED, Rgb::GREEN, Rgb::GREEN],
            [Rgb::RED, Rgb::RED, Rgb::GREEN, Rgb::GREEN],
            [Rgb::BLUE, Rgb::BLUE, Rgb::WHITE, Rgb::WHITE],
            [Rgb::BLUE, Rgb::BLUE, Rgb::WHITE, Rgb::WHITE],
        ];
        for (y, row) in expected.iter().enumerate() {
            for (x, &color) in row.iter().enumerate() {
                assert_eq!(dest.get_pixel(x as i32, y as i32).unwrap(), color, "({x}, {y})");
            }
        }
    }

    #[test]
    fn test_blit_into_subrect() {
        let src = quad();
        let mut dest = PixelBuffer::new(6, 6).unwrap();

        // Logical rows 3..=4 are buffer rows 2 and 3.
        blit(
            &mut dest,
            Rect::from_coords(1.0, 2.0, 3.0, 4.0),
            &src,
            Rect::from_coords(0.0, 0.0, 2.0, 2.0),
        );

        assert_eq!(dest.get_pixel(1, 2).unwrap(), Rgb::RED);
        assert_eq!(dest.get_pixel(2, 2).unwrap(), Rgb::GREEN);
        assert_eq!(dest.get_pixel(1, 3).unwrap(), Rgb::BLUE);
        assert_eq!(dest.get_pixel(2, 3).unwrap(), Rgb::WHITE);
        assert_eq!(dest.get_pixel(0, 2).unwrap(), Rgb::BLACK);
        assert_eq!(dest.get_pixel(1, 4).unwrap(), Rgb::BLACK);
    }

    #[test]
    fn test_blit_source_subrect() {
        let src = quad();
        let mut dest = PixelBuffer::new(2, 2).unwrap();

        // Bottom-right source pixel (logical row 1) stretched over everything.
        blit(
            &mut dest,
            Rect::from_coords(0.0, 0.0, 2.0, 2.0),
            &src,
            Rect::from_coords(1.0, 0.0, 2.0, 1.0),
        );

        assert!(dest.pixels().chunks_exact(3).all(|px| px == [255, 255, 255]));
    }

    #[test]
    fn test_blit_swapped_corners_are_normalized() {
        let src = quad();
        let mut dest = PixelBuffer::new(2, 2).unwrap();

        blit(
            &mut dest,
            Rect::from_coords(2.0, 2.0, 0.0, 0.0),
            &src,
            Rect::from_coords(2.0, 0.0, 0.0, 2.0),
        );
        assert_eq!(dest, src);
    }

    #[test]
    fn test_blit_clips_to_destination() {
        let src = quad();
        let mut dest = PixelBuffer::new(2, 2).unwrap();

        let written = blit(
            &mut dest,
            Rect::from_coords(-1.0, -1.0, 3.0, 3.0),
            &src,
            Rect::from_coords(0.0, 0.0, 2.0, 2.0),
        );

        // 4x4 destination rect, only the centre 2x2 is on the canvas
        assert_eq!(written, 4);
        assert_eq!(dest.get_pixel(0, 0).unwrap(), Rgb::RED);
        assert_eq!(dest.get_pixel(1, 1).unwrap(), Rgb::WHITE);
    }

    #[test]
    fn test_blit_skips_missing_source_pixels() {
        let src = quad();
        let mut dest = PixelBuffer::new(4, 2).unwrap();

        // Source rect extends two columns past the right edge of `src`.
        let written = blit(
            &mut dest,
            Rect::from_coords(0.0, 0.0, 4.0, 2.0),
            &src,
            Rect::from_coords(0.0, 0.0, 4.0, 2.0),
        );

        assert_eq!(written, 4);
        assert_eq!(dest.get_pixel(1, 0).unwrap(), Rgb::GREEN);
        assert_eq!(dest.get_pixel(2, 0).unwrap(), Rgb::BLACK);
    }

    #[test]
    fn test_blit_empty_rect() {
        let src = quad();
        let mut dest = PixelBuffer::new(2, 2).unwrap();
        let full = Rect::from_coords(0.0, 0.0, 2.0, 2.0);

        assert_eq!(blit(&mut dest, Rect::from_coords(1.0, 0.0, 1.0, 2.0), &src, full), 0);
        assert_eq!(blit(&mut dest, full, &src, Rect::from_coords(0.0, 1.0, 2.0, 1.0)), 0);
    }

    #[test]
    fn test_blit_alpha() {
        let mut src = PixelBuffer::new(2, 2).unwrap();
        src.clear(Rgb::WHITE);
        let mut dest = PixelBuffer::new(2, 2).unwrap();
        let full = Rect::from_coords(0.0, 0.0, 2.0, 2.0);

        assert_eq!(blit_alpha(&mut dest, full, &src, full, 0.5), 4);
        assert!(dest.pixels().iter().all(|&b| b == 127));
    }

    #[test]
    fn test_blit_alpha_endpoints() {
        let src = quad();
        let mut dest = PixelBuffer::new(2, 2).unwrap();
        dest.clear(Rgb::grey(50));
        let before = dest.clone();
        let full = Rect::from_coords(0.0, 0.0, 2.0, 2.0);

        blit_alpha(&mut dest, full, &src, full, 0.0);
        assert_eq!(dest, before);

        blit_alpha(&mut dest, full, &src, full, 1.0);
        assert_eq!(dest, src);
    }

    #[test]
    fn test_blit_huge_rects_do_not_overflow() {
        let src = quad();
        let mut dest = PixelBuffer::new(4, 4).unwrap();

        // Only the bottom four logical rows of a 4e9-tall rect land on the
        // canvas; they sample the last two source rows.
        let written = blit(
            &mut dest,
            Rect::from_coords(0.0, -2e9, 4.0, 2e9),
            &src,
            Rect::from_coords(0.0, -2e9, 2.0, 2e9),
        );

        assert_eq!(written, 8);
        assert_eq!(dest.get_pixel(0, 0).unwrap(), Rgb::BLACK);
        assert_eq!(dest.get_pixel(0, 2).unwrap(), Rgb::RED);
        assert_eq!(dest.get_pixel(3, 3).unwrap(), Rgb::WHITE);
    }

    #[test]
    fn test_sample_offset_extremes() {
        assert_eq!(sample_offset(0, 2, 4), 0);
        assert_eq!(sample_offset(3, 2, 4), 1);
        let big = i64::from(u32::MAX);
        assert_eq!(sample_offset(big - 1, big, big), big - 1);
    }
}
