use std::fs;
use std::io::{self, Cursor};
use std::path::Path;

use image::{GrayImage, ImageReader, RgbImage};
use log::debug;
use sg_core::{Error, Image, ImageView, Rgb8};

use crate::IoError;

#[derive(Debug, Clone, PartialEq)]
pub struct LoadedImage {
    pub pixels: Image<Rgb8>,
    /// Decoder color type before conversion, e.g. `Rgba8` or `L8`.
    pub source_color: String,
}

impl LoadedImage {
    pub fn width(&self) -> usize {
        self.pixels.width()
    }

    pub fn height(&self) -> usize {
        self.pixels.height()
    }
}

/// Reads and decodes an image file, normalizing it to 3-channel color.
///
/// Alpha is dropped without compositing; palette and grey sources are
/// expanded.
pub fn load_rgb(path: &Path) -> Result<LoadedImage, IoError> {
    let bytes = fs::read(path).map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => IoError::NotFound {
            path: path.to_path_buf(),
        },
        _ => IoError::Decode {
            path: path.to_path_buf(),
            message: err.to_string(),
        },
    })?;
    debug!("read {} bytes from {}", bytes.len(), path.display());

    let decode_err = |message: String| IoError::Decode {
        path: path.to_path_buf(),
        message,
    };
    let dyn_img = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|err| decode_err(err.to_string()))?
        .decode()
        .map_err(|err| decode_err(err.to_string()))?;

    let source_color = format!("{:?}", dyn_img.color());
    let rgb = dyn_img.into_rgb8();
    let (w, h) = rgb.dimensions();
    debug!(
        "decoded {}: {}x{}, source color {}",
        path.display(),
        w,
        h,
        source_color
    );

    let pixels = Image::from_interleaved(w as usize, h as usize, rgb.as_raw())?;
    Ok(LoadedImage {
        pixels,
        source_color,
    })
}

/// Encodes a single-channel grid; the format follows the path extension.
pub fn save_luma(path: &Path, src: &ImageView<'_, u8>) -> Result<(), IoError> {
    let expected = src.width() * src.height();
    let gray = GrayImage::from_raw(
        src.width() as u32,
        src.height() as u32,
        src.to_image().into_vec(),
    )
    .ok_or(Error::SizeMismatch {
        expected,
        actual: 0,
    })?;

    gray.save(path).map_err(|err| IoError::Write {
        path: path.to_path_buf(),
        message: err.to_string(),
    })
}

/// Encodes a color grid; the format follows the path extension.
pub fn save_rgb(path: &Path, src: &ImageView<'_, Rgb8>) -> Result<(), IoError> {
    let expected = src.width() * src.height() * 3;
    let rgb = RgbImage::from_raw(
        src.width() as u32,
        src.height() as u32,
        src.to_image().to_interleaved(),
    )
    .ok_or(Error::SizeMismatch {
        expected,
        actual: 0,
    })?;

    rgb.save(path).map_err(|err| IoError::Write {
        path: path.to_path_buf(),
        message: err.to_string(),
    })
}
