//! File-facing collaborators of the detection pipeline.
//!
//! - [`load_rgb`] decodes any format the `image` crate recognizes and
//!   normalizes it to 3-channel color.
//! - [`save_luma`] / [`save_rgb`] encode grids back to disk; the format is
//!   chosen from the file extension.
//! - [`write_matrix`] exports a `u8` grid as aligned text, CSV, or a NumPy
//!   `.npy` array.
//! - [`write_edge_report`] renders an [`sg_gap::EdgeProfile`] as a text bar
//!   chart.
//!
//! All failures are reported as [`IoError`].

mod error;
mod image_io;
mod matrix;
mod preview;
mod report;

pub use error::IoError;
pub use image_io::{LoadedImage, load_rgb, save_luma, save_rgb};
pub use matrix::{MatrixFormat, MatrixKind, encode_matrix, write_matrix};
pub use preview::{render_luma_preview, render_mask_preview};
pub use report::{encode_edge_report, write_edge_report};
