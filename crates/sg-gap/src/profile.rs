use sg_binary::{BACKGROUND, BinaryMask, FOREGROUND};
use sg_core::{Error, ImageView};

#[inline]
pub fn is_transition(above: u8, below: u8) -> bool {
    above == FOREGROUND && below == BACKGROUND
}

/// Transition count of a single column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ColumnEdges {
    pub x: usize,
    pub count: usize,
}

/// Per-column foreground-to-background transition counts.
///
/// `counts()[x]` is the number of rows `y` in `1..height` with
/// `mask[y - 1][x] == 255 && mask[y][x] == 0`, so every count lies in
/// `[0, height - 1]`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EdgeProfile {
    counts: Vec<usize>,
}

impl EdgeProfile {
    pub fn from_mask(mask: &BinaryMask) -> Self {
        Self {
            counts: scan_counts(&mask.as_view()),
        }
    }

    /// Profiles a raw `u8` grid; cells other than `0`/`255` never form a
    /// transition.
    pub fn from_view(src: &ImageView<'_, u8>) -> Result<Self, Error> {
        src.ensure_non_empty()?;
        Ok(Self {
            counts: scan_counts(src),
        })
    }

    pub fn from_counts(counts: Vec<usize>) -> Self {
        Self { counts }
    }

    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn count(&self, x: usize) -> Option<usize> {
        self.counts.get(x).copied()
    }

    /// First column holding the maximum count, `None` for an empty profile.
    pub fn argmax(&self) -> Option<ColumnEdges> {
        let mut best: Option<ColumnEdges> = None;
        for (x, &count) in self.counts.iter().enumerate() {
            if best.is_none_or(|b| count > b.count) {
                best = Some(ColumnEdges { x, count });
            }
        }
        best
    }

    pub fn nonzero(&self) -> impl Iterator<Item = ColumnEdges> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|&(_, &count)| count > 0)
            .map(|(x, &count)| ColumnEdges { x, count })
    }

    /// Columns with `count >= min_changes`, strongest first.
    ///
    /// Ties keep ascending column order. This is a reporting view only and
    /// does not influence gap column selection.
    pub fn significant_columns(&self, min_changes: usize) -> Vec<ColumnEdges> {
        let mut cols: Vec<ColumnEdges> = self
            .counts
            .iter()
            .enumerate()
            .filter(|&(_, &count)| count >= min_changes)
            .map(|(x, &count)| ColumnEdges { x, count })
            .collect();
        cols.sort_by(|a, b| b.count.cmp(&a.count));
        cols
    }
}

fn scan_counts(src: &ImageView<'_, u8>) -> Vec<usize> {
    if src.height() < 2 {
        return vec![0; src.width()];
    }

    #[cfg(feature = "parallel")]
    {
        scan_counts_parallel(src)
    }
    #[cfg(not(feature = "parallel"))]
    {
        let mut counts = vec![0usize; src.width()];
        accumulate_rows(src, 1..src.height(), &mut counts);
        counts
    }
}

// Walks row pairs rather than columns so each pass reads two contiguous rows.
fn accumulate_rows(src: &ImageView<'_, u8>, ys: core::ops::Range<usize>, counts: &mut [usize]) {
    for y in ys {
        let above = src.row(y - 1);
        let below = src.row(y);
        for ((dst, &a), &b) in counts.iter_mut().zip(above).zip(below) {
            *dst += is_transition(a, b) as usize;
        }
    }
}

#[cfg(feature = "parallel")]
fn scan_counts_parallel(src: &ImageView<'_, u8>) -> Vec<usize> {
    use rayon::prelude::*;

    const BAND_ROWS: usize = 64;

    let width = src.width();
    let height = src.height();
    let bands: Vec<core::ops::Range<usize>> = (1..height)
        .step_by(BAND_ROWS)
        .map(|start| start..(start + BAND_ROWS).min(height))
        .collect();

    bands
        .into_par_iter()
        .map(|ys| {
            let mut partial = vec![0usize; width];
            accumulate_rows(src, ys, &mut partial);
            partial
        })
        .reduce(
            || vec![0usize; width],
            |mut acc, partial| {
                for (a, p) in acc.iter_mut().zip(partial) {
                    *a += p;
                }
                acc
            },
        )
}
