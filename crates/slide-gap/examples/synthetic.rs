//! Example: detect the gap in a generated slide-puzzle background.
//!
//! Renders a textured background with a notch at a chosen column, runs the
//! detection pipeline and writes the annotated overlay next to a copy of the
//! generated input.
//!
//! Run from the workspace root:
//!   cargo run -p slide-gap --example synthetic -- --help
//!   cargo run -p slide-gap --example synthetic -- --notch-x 180

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result, ensure};
use clap::Parser;
use slide_gap::{AnnotateStyle, Image, PipelineConfig, Rgb8, annotate_gap, detect_gap_rgb, io};

#[derive(Parser, Debug)]
#[command(about = "Generate a slide-puzzle image and locate its notch")]
struct Args {
    #[arg(long, default_value_t = 320)]
    width: usize,

    #[arg(long, default_value_t = 160)]
    height: usize,

    /// Column of the notch's jagged left edge
    #[arg(long, default_value_t = 180)]
    notch_x: usize,

    /// Notch side length in pixels
    #[arg(long, default_value_t = 48)]
    notch_size: usize,

    #[arg(long, default_value_t = 100)]
    threshold: i32,

    /// Output directory for input.png and detected.png
    #[arg(long, default_value = "target/synthetic")]
    out: PathBuf,
}

fn render_puzzle(args: &Args) -> Result<Image<Rgb8>> {
    ensure!(
        args.notch_x + args.notch_size < args.width,
        "notch [{}, {}) does not fit in width {}",
        args.notch_x,
        args.notch_x + args.notch_size,
        args.width
    );
    ensure!(
        args.notch_size < args.height,
        "notch size {} does not fit in height {}",
        args.notch_size,
        args.height
    );

    let top = (args.height - args.notch_size) / 2;
    let bottom = top + args.notch_size;

    let mut data = Vec::with_capacity(args.width * args.height);
    for y in 0..args.height {
        for x in 0..args.width {
            // Soft diagonal gradient so the background is not flat.
            let shade = 150 + ((x + 2 * y) % 80) as u8;
            let mut px: Rgb8 = [shade, shade.saturating_add(10), shade];

            if (top..bottom).contains(&y) {
                if x == args.notch_x {
                    px = if (y / 2) % 2 == 0 { [240; 3] } else { [30; 3] };
                } else if x > args.notch_x && x < args.notch_x + args.notch_size {
                    px = [shade / 4; 3];
                }
            }
            data.push(px);
        }
    }

    Image::from_vec(args.width, args.height, data).context("building synthetic image")
}

fn main() -> Result<()> {
    let args = Args::parse();

    let img = render_puzzle(&args)?;
    std::fs::create_dir_all(&args.out)
        .with_context(|| format!("creating {}", args.out.display()))?;
    io::save_rgb(&args.out.join("input.png"), &img.as_view())?;

    let cfg = PipelineConfig {
        threshold: args.threshold,
        ..PipelineConfig::default()
    };

    let t0 = Instant::now();
    let out = detect_gap_rgb(&img.as_view(), &cfg)?;
    let elapsed_ms = t0.elapsed().as_secs_f64() * 1e3;

    println!(
        "{}x{} image, notch drawn at x={}",
        args.width, args.height, args.notch_x
    );
    println!(
        "detected gap at x={} with {} transitions ({elapsed_ms:.2} ms)",
        out.gap().gap_column,
        out.max_transitions()
    );
    for col in &out.significant {
        println!("  x={:4}  transitions={}", col.x, col.count);
    }

    let marked = annotate_gap(&img.as_view(), out.gap(), &AnnotateStyle::default())?;
    let marked_path = args.out.join("detected.png");
    io::save_rgb(&marked_path, &marked.as_view())?;
    println!("overlay written to {}", marked_path.display());

    Ok(())
}
