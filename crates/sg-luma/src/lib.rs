//! RGB to luma conversion.
//!
//! Luma uses fixed Rec. 709 weights evaluated in `f64` and truncated toward
//! zero:
//!
//! `luma = floor(R * 0.2126 + G * 0.7152 + B * 0.0722)`
//!
//! The weights sum to one, so any valid 8-bit pixel maps into `[0, 255]` and
//! no clamping is performed. Stored fixtures depend on this exact formula.

use log::debug;
use sg_core::{Error, Image, ImageView, Rgb8};

pub const LUMA_WEIGHTS: [f64; 3] = [0.2126, 0.7152, 0.0722];

#[inline]
pub fn luma_of(px: Rgb8) -> u8 {
    let [r, g, b] = px;
    let v = r as f64 * LUMA_WEIGHTS[0] + g as f64 * LUMA_WEIGHTS[1] + b as f64 * LUMA_WEIGHTS[2];
    v as u8
}

/// Converts a color grid into a luma grid of identical dimensions.
pub fn rgb_to_luma_u8(src: &ImageView<'_, Rgb8>) -> Result<Image<u8>, Error> {
    src.ensure_non_empty()?;

    let mut out = Vec::with_capacity(src.width() * src.height());
    for row in src.rows() {
        out.extend(row.iter().map(|&px| luma_of(px)));
    }

    debug!("luma conversion done: {}x{}", src.width(), src.height());
    Image::from_vec(src.width(), src.height(), out)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LumaStats {
    pub min: u8,
    pub max: u8,
    pub mean: f64,
}

/// Summary statistics of a luma grid, `None` when the grid is empty.
pub fn luma_stats(src: &ImageView<'_, u8>) -> Option<LumaStats> {
    if src.is_empty() {
        return None;
    }

    let mut min = u8::MAX;
    let mut max = u8::MIN;
    let mut sum = 0u64;
    for row in src.rows() {
        for &v in row {
            min = min.min(v);
            max = max.max(v);
            sum += v as u64;
        }
    }

    let count = (src.width() * src.height()) as f64;
    Some(LumaStats {
        min,
        max,
        mean: sum as f64 / count,
    })
}
