use log::{debug, info};
use sg_binary::{BinaryMask, DEFAULT_THRESHOLD, threshold_u8, validate_threshold};
use sg_core::{Error, Image, ImageView, Rgb8};
use sg_gap::{ColumnEdges, GapDetection, GapResult, locate_gap};
use sg_luma::rgb_to_luma_u8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Luma strictly above this value is foreground. Must lie in `[0, 255]`.
    pub threshold: i32,
    /// Minimum transition count for a column to be listed as significant.
    pub min_changes: usize,
    /// Number of significant columns kept for reporting.
    pub top_n: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            min_changes: 5,
            top_n: 5,
        }
    }
}

impl PipelineConfig {
    pub fn validate(&self) -> Result<(), Error> {
        validate_threshold(self.threshold).map(|_| ())
    }
}

/// Every intermediate of one pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutput {
    pub luma: Image<u8>,
    pub mask: BinaryMask,
    pub detection: GapDetection,
    /// Strongest columns first, at most `top_n` entries.
    pub significant: Vec<ColumnEdges>,
}

impl PipelineOutput {
    pub fn gap(&self) -> &GapResult {
        &self.detection.result
    }

    pub fn max_transitions(&self) -> usize {
        self.detection.result.transitions()
    }
}

/// Runs luma conversion, thresholding and gap location over a color grid.
///
/// The configuration is validated before any pixel is touched. Errors are
/// terminal for the run and no partial output is returned.
pub fn detect_gap_rgb(
    src: &ImageView<'_, Rgb8>,
    cfg: &PipelineConfig,
) -> Result<PipelineOutput, Error> {
    cfg.validate()?;

    let luma = rgb_to_luma_u8(src)?;
    let mask = threshold_u8(&luma.as_view(), cfg.threshold)?;
    let detection = locate_gap(&mask);

    let mut significant = detection.profile.significant_columns(cfg.min_changes);
    debug!(
        "{} columns with at least {} transitions",
        significant.len(),
        cfg.min_changes
    );
    significant.truncate(cfg.top_n);

    info!(
        "gap at x={} ({} transitions, {}x{}, threshold {})",
        detection.result.gap_column,
        detection.result.transitions(),
        src.width(),
        src.height(),
        cfg.threshold
    );

    Ok(PipelineOutput {
        luma,
        mask,
        detection,
        significant,
    })
}
