//! Umbrella crate for the `slide-gap` workspace.
//!
//! Re-exports the stage crates and adds [`detect_gap_rgb`], which runs
//! luma conversion, thresholding and gap location in one call. File I/O
//! lives in [`io`].

mod pipeline;

pub use pipeline::{PipelineConfig, PipelineOutput, detect_gap_rgb};
pub use sg_annotate::*;
pub use sg_binary::*;
pub use sg_core::*;
pub use sg_gap::*;
pub use sg_io as io;
pub use sg_luma::*;
