//! Foundational primitives for slide-puzzle gap detection.
//!
//! ## Image Layout
//! Every grid is a flat, row-major buffer with the origin at the top-left.
//! Views use element stride (not byte stride). `stride` is the distance, in
//! elements, between adjacent row starts and may be greater than `width`.
//!
//! ## Pixel Types
//! Color grids store one [`Rgb8`] (`[r, g, b]`) per element, so a
//! height x width x 3 grid is an `Image<Rgb8>` and the channel count is part
//! of the type. Luma grids and binary masks are `Image<u8>`.
//!
//! ## Errors
//! [`Error`] carries two classes of failure: shape errors (zero-sized,
//! mismatched, or malformed grids) and range errors (scalar parameters
//! outside their valid bounds). Both are terminal for a pipeline run.

mod error;
mod geom;
mod image;

pub use error::Error;
pub use geom::Point2u;
pub use image::{Image, ImageView, ImageViewMut, Rgb8};
