//! Gap column detection on binary masks.
//!
//! An edge transition is a vertically adjacent pair of cells where the upper
//! cell is foreground (`255`) and the lower cell is background (`0`). The
//! [`EdgeProfile`] holds one transition count per column, and the gap column
//! is the first column holding the maximum count.
//!
//! Selection policy:
//! - Ties resolve to the smallest column index (left-to-right scan with a
//!   strict `>` update of the running maximum).
//! - A uniform mask has an all-zero profile; the gap column is then `0` and
//!   no edge points are reported.
//! - There is no search window, smoothing or clustering of neighboring
//!   columns. The raw maximum wins.
//!
//! With the `parallel` feature the profile scan is split into row bands
//! processed with rayon. The counts are identical to the sequential scan.

mod locate;
mod profile;

pub use locate::{GapDetection, GapResult, column_edge_points, locate_gap, locate_gap_u8};
pub use profile::{ColumnEdges, EdgeProfile, is_transition};
