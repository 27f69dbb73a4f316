//! Visual verification overlays.
//!
//! [`annotate_gap`] copies the source color grid, paints a filled disc at
//! every edge point and a full-height vertical band at the gap column.
//! Styling is presentation only and never affects detection.

use sg_core::{Error, Image, ImageView, ImageViewMut, Rgb8};
use sg_gap::GapResult;

pub const HIGHLIGHT: Rgb8 = [255, 255, 0];
pub const MAX_MARKER_RADIUS: usize = 255;
pub const MAX_LINE_WIDTH: usize = 255;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnnotateStyle {
    pub color: Rgb8,
    /// Disc radius in pixels; `0` paints a single pixel.
    pub marker_radius: usize,
    /// Width of the vertical band, at least one pixel.
    pub line_width: usize,
}

impl Default for AnnotateStyle {
    fn default() -> Self {
        Self {
            color: HIGHLIGHT,
            marker_radius: 2,
            line_width: 2,
        }
    }
}

impl AnnotateStyle {
    pub fn validate(&self) -> Result<(), Error> {
        if self.marker_radius > MAX_MARKER_RADIUS {
            return Err(Error::OutOfRange {
                what: "marker radius",
                value: self.marker_radius as i64,
                min: 0,
                max: MAX_MARKER_RADIUS as i64,
            });
        }
        if self.line_width == 0 || self.line_width > MAX_LINE_WIDTH {
            return Err(Error::OutOfRange {
                what: "line width",
                value: self.line_width as i64,
                min: 1,
                max: MAX_LINE_WIDTH as i64,
            });
        }
        Ok(())
    }
}

/// Builds a color from integer channels, each of which must lie in `[0, 255]`.
pub fn color_from_channels(channels: [i64; 3]) -> Result<Rgb8, Error> {
    let mut out = [0u8; 3];
    for (dst, v) in out.iter_mut().zip(channels) {
        *dst = u8::try_from(v).map_err(|_| Error::OutOfRange {
            what: "color channel",
            value: v,
            min: 0,
            max: 255,
        })?;
    }
    Ok(out)
}

pub fn annotate_gap(
    src: &ImageView<'_, Rgb8>,
    gap: &GapResult,
    style: &AnnotateStyle,
) -> Result<Image<Rgb8>, Error> {
    style.validate()?;
    src.ensure_non_empty()?;
    if gap.gap_column >= src.width() {
        return Err(Error::OutOfBounds);
    }

    let mut out = src.to_image();
    let mut view = out.as_view_mut();

    for p in &gap.edge_points {
        fill_disc(&mut view, p.x, p.y, style.marker_radius, style.color);
    }
    draw_vertical_band(&mut view, gap.gap_column, style.line_width, style.color);

    Ok(out)
}

fn fill_disc(img: &mut ImageViewMut<'_, Rgb8>, cx: usize, cy: usize, radius: usize, color: Rgb8) {
    let r = radius as isize;
    for dy in -r..=r {
        for dx in -r..=r {
            if dx * dx + dy * dy > r * r {
                continue;
            }
            let nx = cx as isize + dx;
            let ny = cy as isize + dy;
            if nx < 0 || ny < 0 {
                continue;
            }
            if let Some(px) = img.get_mut(nx as usize, ny as usize) {
                *px = color;
            }
        }
    }
}

// Band covers columns `x - (w - 1) / 2 ..= x + w / 2`, clipped to the grid.
fn draw_vertical_band(img: &mut ImageViewMut<'_, Rgb8>, x: usize, width: usize, color: Rgb8) {
    let x0 = x.saturating_sub((width - 1) / 2);
    let x1 = (x + width / 2).min(img.width() - 1);
    for y in 0..img.height() {
        img.row_mut(y)[x0..=x1].fill(color);
    }
}
