use log::debug;
use sg_binary::BinaryMask;
use sg_core::{Error, ImageView, Point2u};

use crate::profile::{EdgeProfile, is_transition};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GapResult {
    pub gap_column: usize,
    /// Transition coordinates within `gap_column`, in increasing `y`. Each
    /// point is the lower (background) cell of its pair.
    pub edge_points: Vec<Point2u>,
}

impl GapResult {
    pub fn transitions(&self) -> usize {
        self.edge_points.len()
    }
}

/// Gap result together with the profile it was selected from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GapDetection {
    pub result: GapResult,
    pub profile: EdgeProfile,
}

/// Lower cell of every foreground-to-background pair in column `x`.
///
/// Returns an empty list when `x` is outside the grid or the grid has fewer
/// than two rows.
pub fn column_edge_points(src: &ImageView<'_, u8>, x: usize) -> Vec<Point2u> {
    if x >= src.width() {
        return Vec::new();
    }

    let mut points = Vec::new();
    for y in 1..src.height() {
        let above = src.row(y - 1)[x];
        let below = src.row(y)[x];
        if is_transition(above, below) {
            points.push(Point2u::new(x, y));
        }
    }
    points
}

pub fn locate_gap(mask: &BinaryMask) -> GapDetection {
    let profile = EdgeProfile::from_mask(mask);
    select_gap(&mask.as_view(), profile)
}

/// Same as [`locate_gap`] for a raw `u8` grid; fails on an empty grid.
pub fn locate_gap_u8(src: &ImageView<'_, u8>) -> Result<GapDetection, Error> {
    let profile = EdgeProfile::from_view(src)?;
    Ok(select_gap(src, profile))
}

fn select_gap(src: &ImageView<'_, u8>, profile: EdgeProfile) -> GapDetection {
    let best = profile.argmax().unwrap_or_default();
    let edge_points = if best.count == 0 {
        Vec::new()
    } else {
        column_edge_points(src, best.x)
    };
    debug_assert_eq!(edge_points.len(), best.count);

    debug!(
        "gap column x={} with {} transitions over {} columns",
        best.x,
        best.count,
        profile.len()
    );

    GapDetection {
        result: GapResult {
            gap_column: best.x,
            edge_points,
        },
        profile,
    }
}

#[cfg(test)]
mod tests {
    use sg_binary::BinaryMask;
    use sg_core::{Image, Point2u};

    use crate::locate::{column_edge_points, locate_gap, locate_gap_u8};

    fn mask_from_columns(width: usize, height: usize, cols: &[(usize, &[u8])]) -> BinaryMask {
        let mut data = vec![0u8; width * height];
        for &(x, col) in cols {
            assert_eq!(col.len(), height);
            for (y, &v) in col.iter().enumerate() {
                data[y * width + x] = v;
            }
        }
        BinaryMask::from_vec(width, height, data).expect("two-valued")
    }

    #[test]
    fn step_in_single_column() {
        // Rows 0..5 foreground, rows 5..10 background in column 3 only.
        let col: Vec<u8> = (0..10).map(|y| if y < 5 { 255 } else { 0 }).collect();
        let mask = mask_from_columns(10, 10, &[(3, col.as_slice())]);

        let det = locate_gap(&mask);
        assert_eq!(det.result.gap_column, 3);
        assert_eq!(det.result.edge_points, vec![Point2u::new(3, 5)]);
        assert_eq!(det.profile.count(3), Some(1));
    }

    #[test]
    fn ties_resolve_to_leftmost_column() {
        let striped: &[u8] = &[255, 0, 255, 0, 255, 0, 0];
        let single: &[u8] = &[255, 0, 0, 0, 0, 0, 0];
        let mask = mask_from_columns(5, 7, &[(1, striped), (2, striped), (4, single)]);

        let det = locate_gap(&mask);
        assert_eq!(det.profile.counts(), &[0, 3, 3, 0, 1]);
        assert_eq!(det.result.gap_column, 1);
        assert_eq!(
            det.result.edge_points,
            vec![Point2u::new(1, 1), Point2u::new(1, 3), Point2u::new(1, 5)]
        );
    }

    #[test]
    fn uniform_masks_yield_column_zero_without_points() {
        for fill in [0u8, 255] {
            for (w, h) in [(1, 1), (4, 1), (1, 9), (12, 7)] {
                let mask =
                    BinaryMask::from_image(Image::new_fill(w, h, fill)).expect("two-valued");
                let det = locate_gap(&mask);
                assert_eq!(det.result.gap_column, 0, "fill={fill} {w}x{h}");
                assert!(det.result.edge_points.is_empty());
                assert_eq!(det.result.transitions(), 0);
            }
        }
    }

    #[test]
    fn edge_points_ascend_and_match_count() {
        let col: &[u8] = &[255, 255, 0, 0, 255, 0];
        let mask = mask_from_columns(2, 6, &[(1, col)]);

        let det = locate_gap(&mask);
        assert_eq!(det.result.gap_column, 1);
        assert_eq!(
            det.result.edge_points,
            vec![Point2u::new(1, 2), Point2u::new(1, 5)]
        );
        assert_eq!(det.result.transitions(), det.profile.count(1).unwrap_or(0));
    }

    #[test]
    fn column_points_outside_grid_are_empty() {
        let img = Image::from_vec(1, 2, vec![255u8, 0]).expect("valid image");
        assert_eq!(
            column_edge_points(&img.as_view(), 0),
            vec![Point2u::new(0, 1)]
        );
        assert!(column_edge_points(&img.as_view(), 1).is_empty());
    }

    #[test]
    fn raw_empty_grid_is_shape_error() {
        let img = Image::new_fill(3, 0, 0u8);
        let err = locate_gap_u8(&img.as_view()).expect_err("empty");
        assert!(err.is_shape_error());
    }

    #[test]
    fn repeated_runs_are_identical() {
        let col: &[u8] = &[255, 0, 255, 0];
        let mask = mask_from_columns(3, 4, &[(2, col)]);
        assert_eq!(locate_gap(&mask), locate_gap(&mask));
    }
}
