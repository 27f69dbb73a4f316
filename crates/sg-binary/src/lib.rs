//! Global-threshold binary masks.
//!
//! A cell is foreground iff `luma > threshold` (strict). Outputs are `255`
//! (foreground) or `0` (background) in `u8`, and each cell depends only on
//! the luma value at the same position.

use log::debug;
use sg_core::{Error, Image, ImageView};

pub const FOREGROUND: u8 = 255;
pub const BACKGROUND: u8 = 0;
pub const DEFAULT_THRESHOLD: i32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaskCell {
    Foreground,
    Background,
}

impl MaskCell {
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            FOREGROUND => Some(Self::Foreground),
            BACKGROUND => Some(Self::Background),
            _ => None,
        }
    }

    pub fn to_u8(self) -> u8 {
        match self {
            Self::Foreground => FOREGROUND,
            Self::Background => BACKGROUND,
        }
    }
}

/// A non-empty grid whose cells are all [`FOREGROUND`] or [`BACKGROUND`].
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryMask {
    img: Image<u8>,
}

impl BinaryMask {
    /// Adopts raw `0`/`255` cells, rejecting empty grids and any other value.
    pub fn from_image(img: Image<u8>) -> Result<Self, Error> {
        img.as_view().ensure_non_empty()?;

        let width = img.width();
        if let Some(idx) = img
            .data()
            .iter()
            .position(|&v| MaskCell::from_u8(v).is_none())
        {
            return Err(Error::InvalidMaskValue {
                x: idx % width,
                y: idx / width,
                value: img.data()[idx],
            });
        }

        Ok(Self { img })
    }

    pub fn from_vec(width: usize, height: usize, data: Vec<u8>) -> Result<Self, Error> {
        Self::from_image(Image::from_vec(width, height, data)?)
    }

    pub fn width(&self) -> usize {
        self.img.width()
    }

    pub fn height(&self) -> usize {
        self.img.height()
    }

    pub fn as_view(&self) -> ImageView<'_, u8> {
        self.img.as_view()
    }

    pub fn as_image(&self) -> &Image<u8> {
        &self.img
    }

    pub fn into_image(self) -> Image<u8> {
        self.img
    }

    pub fn cell(&self, x: usize, y: usize) -> Option<MaskCell> {
        self.img
            .as_view()
            .get(x, y)
            .and_then(|&v| MaskCell::from_u8(v))
    }

    pub fn stats(&self) -> MaskStats {
        let foreground = self.img.data().iter().filter(|&&v| v == FOREGROUND).count();
        MaskStats {
            foreground,
            background: self.img.data().len() - foreground,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaskStats {
    pub foreground: usize,
    pub background: usize,
}

impl MaskStats {
    pub fn total(&self) -> usize {
        self.foreground + self.background
    }

    pub fn foreground_percent(&self) -> f64 {
        percent(self.foreground, self.total())
    }

    pub fn background_percent(&self) -> f64 {
        percent(self.background, self.total())
    }
}

fn percent(part: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    part as f64 * 100.0 / total as f64
}

/// Fails with [`Error::OutOfRange`] unless `threshold` lies in `[0, 255]`.
pub fn validate_threshold(threshold: i32) -> Result<u8, Error> {
    u8::try_from(threshold).map_err(|_| Error::OutOfRange {
        what: "threshold",
        value: threshold as i64,
        min: 0,
        max: 255,
    })
}

/// Thresholds a luma grid into a [`BinaryMask`] of the same shape.
pub fn threshold_u8(src: &ImageView<'_, u8>, threshold: i32) -> Result<BinaryMask, Error> {
    let t = validate_threshold(threshold)?;
    src.ensure_non_empty()?;

    let mut out = Vec::with_capacity(src.width() * src.height());
    for row in src.rows() {
        out.extend(
            row.iter()
                .map(|&v| if v > t { FOREGROUND } else { BACKGROUND }),
        );
    }

    let mask = BinaryMask {
        img: Image::from_vec(src.width(), src.height(), out)?,
    };

    if log::log_enabled!(log::Level::Debug) {
        let stats = mask.stats();
        debug!(
            "threshold {}: foreground={} ({:.2}%), background={} ({:.2}%)",
            t,
            stats.foreground,
            stats.foreground_percent(),
            stats.background,
            stats.background_percent()
        );
    }

    Ok(mask)
}

#[cfg(test)]
mod tests {
    use sg_core::{Error, Image};

    use crate::{BACKGROUND, BinaryMask, FOREGROUND, MaskCell, threshold_u8, validate_threshold};

    fn ramp() -> Image<u8> {
        Image::from_vec(16, 16, (0..=255u8).collect()).expect("valid image")
    }

    #[test]
    fn comparison_is_strict() {
        let img = Image::from_vec(3, 1, vec![99u8, 100, 101]).expect("valid image");
        let mask = threshold_u8(&img.as_view(), 100).expect("valid threshold");
        assert_eq!(mask.as_view().row(0), &[BACKGROUND, BACKGROUND, FOREGROUND]);
    }

    #[test]
    fn every_cell_matches_its_luma() {
        let img = ramp();
        for t in [0, 1, 100, 254, 255] {
            let mask = threshold_u8(&img.as_view(), t).expect("valid threshold");
            for (&luma, &cell) in img.data().iter().zip(mask.as_image().data()) {
                assert!(cell == FOREGROUND || cell == BACKGROUND);
                assert_eq!(cell == FOREGROUND, luma as i32 > t);
            }
        }
    }

    #[test]
    fn foreground_count_is_non_increasing_in_threshold() {
        let img = ramp();
        let mut prev = usize::MAX;
        for t in 0..=255 {
            let fg = threshold_u8(&img.as_view(), t)
                .expect("valid threshold")
                .stats()
                .foreground;
            assert!(fg <= prev, "threshold {t}: {fg} > {prev}");
            prev = fg;
        }
        assert_eq!(prev, 0);
    }

    #[test]
    fn threshold_out_of_range_is_rejected_before_shape_check() {
        let empty = Image::new_fill(0, 0, 0u8);
        for t in [-1, 256, i32::MAX] {
            let err = threshold_u8(&empty.as_view(), t).expect_err("out of range");
            assert!(err.is_range_error());
        }
        assert_eq!(validate_threshold(255), Ok(255));
    }

    #[test]
    fn empty_luma_is_shape_error() {
        let empty = Image::new_fill(4, 0, 0u8);
        let err = threshold_u8(&empty.as_view(), 100).expect_err("empty");
        assert_eq!(
            err,
            Error::EmptyImage {
                width: 4,
                height: 0
            }
        );
    }

    #[test]
    fn adopting_raw_cells_validates_values() {
        let mask = BinaryMask::from_vec(2, 1, vec![0, 255]).expect("two-valued");
        assert_eq!(mask.cell(0, 0), Some(MaskCell::Background));
        assert_eq!(mask.cell(1, 0), Some(MaskCell::Foreground));
        assert_eq!(mask.cell(2, 0), None);

        let err = BinaryMask::from_vec(2, 2, vec![0, 255, 255, 7]).expect_err("bad cell");
        assert_eq!(
            err,
            Error::InvalidMaskValue {
                x: 1,
                y: 1,
                value: 7
            }
        );
    }

    #[test]
    fn stats_percentages() {
        let mask = BinaryMask::from_vec(4, 1, vec![255, 0, 0, 0]).expect("two-valued");
        let stats = mask.stats();
        assert_eq!(stats.foreground, 1);
        assert_eq!(stats.background, 3);
        assert!((stats.foreground_percent() - 25.0).abs() < 1e-12);
        assert!((stats.background_percent() - 75.0).abs() < 1e-12);
        assert_eq!(MaskCell::Foreground.to_u8(), 255);
    }
}
