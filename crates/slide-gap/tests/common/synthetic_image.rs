use slide_gap::{Image, Rgb8};

pub const BACKGROUND: Rgb8 = [196, 204, 188];
pub const NOTCH_FILL: Rgb8 = [36, 40, 44];
pub const RIDGE_LIGHT: Rgb8 = [232, 232, 232];

/// Rows of the jagged left edge of the notch.
pub const EDGE_ROWS: core::ops::Range<usize> = 10..50;

/// Bright puzzle background with a dark notch whose left edge at `notch_x`
/// alternates light and dark every two rows, like a stamped puzzle outline.
pub fn puzzle_rgb(width: usize, height: usize, notch_x: usize) -> Image<Rgb8> {
    assert!(notch_x + 21 <= width, "notch must fit in the image");
    assert!(EDGE_ROWS.end <= height, "edge rows must fit in the image");

    let mut img = Image::new_fill(width, height, BACKGROUND);
    let mut view = img.as_view_mut();

    for y in 20..40 {
        for x in (notch_x + 1)..(notch_x + 21) {
            *view.get_mut(x, y).expect("in bounds") = NOTCH_FILL;
        }
    }
    for y in EDGE_ROWS {
        let px = if (y / 2) % 2 == 0 { RIDGE_LIGHT } else { NOTCH_FILL };
        *view.get_mut(notch_x, y).expect("in bounds") = px;
    }

    img
}

/// Rows where the notch edge column flips from light to dark.
pub fn expected_edge_rows() -> Vec<usize> {
    EDGE_ROWS.filter(|y| y % 4 == 2).collect()
}
