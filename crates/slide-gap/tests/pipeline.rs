mod common;

use common::synthetic_image::{expected_edge_rows, puzzle_rgb};
use slide_gap::{
    AnnotateStyle, BinaryMask, HIGHLIGHT, Image, PipelineConfig, Point2u, annotate_gap,
    detect_gap_rgb, locate_gap,
};

#[test]
fn finds_jagged_notch_edge() {
    let _ = env_logger::builder().is_test(true).try_init();
    let notch_x = 71;
    let img = puzzle_rgb(120, 60, notch_x);

    let out = detect_gap_rgb(&img.as_view(), &PipelineConfig::default()).expect("valid run");

    let expected: Vec<Point2u> = expected_edge_rows()
        .into_iter()
        .map(|y| Point2u::new(notch_x, y))
        .collect();
    assert_eq!(out.gap().gap_column, notch_x);
    assert_eq!(out.gap().edge_points, expected);
    assert_eq!(out.max_transitions(), 10);

    // Notch interior columns only have the single top edge.
    assert_eq!(out.detection.profile.count(notch_x + 5), Some(1));
    assert_eq!(out.detection.profile.count(0), Some(0));
}

#[test]
fn significant_columns_respect_min_changes() {
    let img = puzzle_rgb(120, 60, 40);
    let cfg = PipelineConfig {
        min_changes: 2,
        ..PipelineConfig::default()
    };

    let out = detect_gap_rgb(&img.as_view(), &cfg).expect("valid run");
    assert_eq!(out.significant.len(), 1);
    assert_eq!(out.significant[0].x, 40);
    assert_eq!(out.significant[0].count, 10);
}

#[test]
fn threshold_above_background_turns_mask_uniform() {
    let img = puzzle_rgb(120, 60, 40);
    let cfg = PipelineConfig {
        threshold: 255,
        ..PipelineConfig::default()
    };

    let out = detect_gap_rgb(&img.as_view(), &cfg).expect("valid run");
    assert_eq!(out.mask.stats().foreground, 0);
    assert_eq!(out.gap().gap_column, 0);
    assert!(out.gap().edge_points.is_empty());
}

#[test]
fn repeated_runs_are_identical() {
    let img = puzzle_rgb(96, 64, 33);
    let cfg = PipelineConfig::default();

    let a = detect_gap_rgb(&img.as_view(), &cfg).expect("first run");
    let b = detect_gap_rgb(&img.as_view(), &cfg).expect("second run");

    assert_eq!(a.luma.data(), b.luma.data());
    assert_eq!(a.mask.as_image().data(), b.mask.as_image().data());
    assert_eq!(a.detection, b.detection);
}

#[test]
fn hand_built_mask_with_single_step() {
    let (w, h) = (10usize, 10usize);
    let mut data = vec![0u8; w * h];
    for y in 0..5 {
        data[y * w + 3] = 255;
    }
    let mask = BinaryMask::from_vec(w, h, data).expect("two-valued");

    let det = locate_gap(&mask);
    assert_eq!(det.result.gap_column, 3);
    assert_eq!(det.result.edge_points, vec![Point2u::new(3, 5)]);
}

#[test]
fn annotation_marks_gap_column_over_full_height() {
    let notch_x = 50;
    let img = puzzle_rgb(120, 60, notch_x);
    let out = detect_gap_rgb(&img.as_view(), &PipelineConfig::default()).expect("valid run");

    let marked: Image<_> =
        annotate_gap(&img.as_view(), out.gap(), &AnnotateStyle::default()).expect("annotate");
    let view = marked.as_view();

    for y in 0..view.height() {
        assert_eq!(view.get(notch_x, y), Some(&HIGHLIGHT), "row {y}");
    }
    for p in &out.gap().edge_points {
        assert_eq!(view.get(p.x - 2, p.y), Some(&HIGHLIGHT));
    }
    assert_eq!(view.get(0, 0), img.as_view().get(0, 0));
}
