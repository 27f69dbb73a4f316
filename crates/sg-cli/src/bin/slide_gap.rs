use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use log::{error, info};
use serde::{Deserialize, Serialize};
use slide_gap::io::{
    IoError, LoadedImage, MatrixFormat, MatrixKind, load_rgb, render_luma_preview,
    render_mask_preview, save_luma, save_rgb, write_edge_report, write_matrix,
};
use slide_gap::{
    AnnotateStyle, Error as CoreError, PipelineConfig, annotate_gap, color_from_channels,
    detect_gap_rgb, luma_stats, rgb_to_luma_u8, threshold_u8,
};

#[derive(Parser, Debug)]
#[command(name = "slide_gap")]
#[command(about = "Locate the notch of a slide-puzzle verification image")]
#[command(version)]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert to luma and export the luma matrix.
    #[command(name = "grayscale")]
    Grayscale(GrayscaleArgs),
    /// Threshold into a 0/255 mask and export the mask matrix.
    #[command(name = "binarize")]
    Binarize(BinarizeArgs),
    /// Locate the gap column, write an overlay, report and result json.
    #[command(name = "detect")]
    Detect(DetectArgs),
}

#[derive(Args, Debug, Clone)]
struct CommonArgs {
    #[arg(long, required = true)]
    input: PathBuf,
    #[arg(long, default_value = "out")]
    out: PathBuf,
}

#[derive(Args, Debug, Clone)]
struct ExportArgs {
    /// Matrix formats to export: text, csv, binary.
    #[arg(long, value_delimiter = ',', default_value = "text,csv,binary")]
    formats: Vec<String>,
    /// Print the top-left corner of the matrix.
    #[arg(long)]
    preview: bool,
}

#[derive(Args, Debug, Clone)]
struct GrayscaleArgs {
    #[command(flatten)]
    common: CommonArgs,
    #[command(flatten)]
    export: ExportArgs,
}

#[derive(Args, Debug, Clone)]
struct BinarizeArgs {
    #[command(flatten)]
    common: CommonArgs,
    #[command(flatten)]
    export: ExportArgs,
    #[arg(long, default_value_t = 100, allow_negative_numbers = true)]
    threshold: i32,
}

#[derive(Args, Debug, Clone)]
struct DetectArgs {
    #[command(flatten)]
    common: CommonArgs,
    /// JSON file with any of: threshold, min_changes, top_n, marker_color,
    /// marker_radius, line_width. Flags take precedence.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long, allow_negative_numbers = true)]
    threshold: Option<i32>,
    #[arg(long)]
    min_changes: Option<usize>,
    #[arg(long)]
    top_n: Option<usize>,
    /// Marker color as `r,g,b`.
    #[arg(long)]
    marker_color: Option<String>,
    #[arg(long)]
    marker_radius: Option<usize>,
    #[arg(long)]
    line_width: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct DetectConfigFile {
    threshold: Option<i32>,
    min_changes: Option<usize>,
    top_n: Option<usize>,
    marker_color: Option<[i64; 3]>,
    marker_radius: Option<usize>,
    line_width: Option<usize>,
}

#[derive(Debug, Clone, Serialize)]
struct PointDto {
    x: usize,
    y: usize,
}

#[derive(Debug, Clone, Serialize)]
struct ColumnDto {
    x: usize,
    transitions: usize,
}

#[derive(Debug, Clone, Serialize)]
struct DetectResultDto {
    gap_column: usize,
    max_transitions: usize,
    width: usize,
    height: usize,
    threshold: i32,
    source_color: String,
    edge_points: Vec<PointDto>,
    significant_columns: Vec<ColumnDto>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let res = match cli.cmd {
        Command::Grayscale(args) => run_grayscale(args),
        Command::Binarize(args) => run_binarize(args),
        Command::Detect(args) => run_detect(args),
    };

    match res {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            ExitCode::from(exit_code(&err))
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn exit_code(err: &anyhow::Error) -> u8 {
    for cause in err.chain() {
        if let Some(io) = cause.downcast_ref::<IoError>() {
            return match io {
                IoError::NotFound { .. } => 2,
                IoError::Decode { .. } => 3,
                IoError::Core(core) => core_exit_code(core),
                IoError::UnsupportedFormat { .. } => 6,
                IoError::Write { .. } => 7,
            };
        }
        if let Some(core) = cause.downcast_ref::<CoreError>() {
            return core_exit_code(core);
        }
    }
    1
}

fn core_exit_code(err: &CoreError) -> u8 {
    if err.is_range_error() { 5 } else { 4 }
}

fn run_grayscale(args: GrayscaleArgs) -> Result<()> {
    let formats = parse_formats(&args.export.formats)?;
    let img = load_input(&args.common.input)?;
    let out_dir = prepare_out_dir(&args.common.out)?;

    let luma = rgb_to_luma_u8(&img.pixels.as_view()).context("converting to luma")?;
    if let Some(stats) = luma_stats(&luma.as_view()) {
        info!(
            "luma range [{}, {}], mean {:.2}",
            stats.min, stats.max, stats.mean
        );
    }

    save_luma(&out_dir.join("grayscale.png"), &luma.as_view())?;
    for format in formats {
        let path = out_dir.join(format!("gray_matrix.{}", format.extension()));
        write_matrix(&path, &luma.as_view(), format, MatrixKind::Luma)?;
        info!("luma matrix written to {}", path.display());
    }

    if args.export.preview {
        print!("{}", render_luma_preview(&luma.as_view(), 10, 10));
    }
    Ok(())
}

fn run_binarize(args: BinarizeArgs) -> Result<()> {
    let formats = parse_formats(&args.export.formats)?;
    let img = load_input(&args.common.input)?;
    let out_dir = prepare_out_dir(&args.common.out)?;

    let luma = rgb_to_luma_u8(&img.pixels.as_view()).context("converting to luma")?;
    let mask = threshold_u8(&luma.as_view(), args.threshold)
        .with_context(|| format!("thresholding at {}", args.threshold))?;

    let stats = mask.stats();
    info!(
        "threshold {}: foreground {} ({:.2}%), background {} ({:.2}%)",
        args.threshold,
        stats.foreground,
        stats.foreground_percent(),
        stats.background,
        stats.background_percent()
    );

    save_luma(&out_dir.join("binary.png"), &mask.as_view())?;
    for format in formats {
        let path = out_dir.join(format!("binary_matrix.{}", format.extension()));
        write_matrix(&path, &mask.as_view(), format, MatrixKind::Mask)?;
        info!("binary matrix written to {}", path.display());
    }

    if args.export.preview {
        print!("{}", render_mask_preview(&mask.as_view(), 20, 60));
    }
    Ok(())
}

fn run_detect(args: DetectArgs) -> Result<()> {
    let file_cfg = match &args.config {
        Some(path) => read_json::<DetectConfigFile>(path)?,
        None => DetectConfigFile::default(),
    };

    let defaults = PipelineConfig::default();
    let cfg = PipelineConfig {
        threshold: args
            .threshold
            .or(file_cfg.threshold)
            .unwrap_or(defaults.threshold),
        min_changes: args
            .min_changes
            .or(file_cfg.min_changes)
            .unwrap_or(defaults.min_changes),
        top_n: args.top_n.or(file_cfg.top_n).unwrap_or(defaults.top_n),
    };
    let style = resolve_style(&args, &file_cfg)?;
    cfg.validate().context("validating detection config")?;
    style.validate().context("validating marker style")?;

    let img = load_input(&args.common.input)?;
    let out_dir = prepare_out_dir(&args.common.out)?;

    let out = detect_gap_rgb(&img.pixels.as_view(), &cfg).context("running gap detection")?;
    let gap = out.gap();

    info!(
        "gap column x={} ({} edge points); slide distance {} px",
        gap.gap_column,
        gap.transitions(),
        gap.gap_column
    );
    for col in &out.significant {
        info!("  significant column x={} transitions={}", col.x, col.count);
    }
    for (i, p) in gap.edge_points.iter().take(10).enumerate() {
        info!("  edge point {}: ({}, {})", i + 1, p.x, p.y);
    }
    if gap.edge_points.len() > 10 {
        info!("  ... {} more", gap.edge_points.len() - 10);
    }

    let marked = annotate_gap(&img.pixels.as_view(), gap, &style).context("annotating image")?;
    save_rgb(&out_dir.join("detected.png"), &marked.as_view())?;

    write_edge_report(&out_dir.join("edge_analysis.txt"), &out.detection.profile)?;

    write_json(
        &out_dir.join("result.json"),
        &DetectResultDto {
            gap_column: gap.gap_column,
            max_transitions: gap.transitions(),
            width: img.width(),
            height: img.height(),
            threshold: cfg.threshold,
            source_color: img.source_color.clone(),
            edge_points: gap
                .edge_points
                .iter()
                .map(|p| PointDto { x: p.x, y: p.y })
                .collect(),
            significant_columns: out
                .significant
                .iter()
                .map(|c| ColumnDto {
                    x: c.x,
                    transitions: c.count,
                })
                .collect(),
        },
    )?;

    info!("outputs written to {}", out_dir.display());
    Ok(())
}

fn resolve_style(args: &DetectArgs, file_cfg: &DetectConfigFile) -> Result<AnnotateStyle> {
    let defaults = AnnotateStyle::default();

    let channels = match (&args.marker_color, file_cfg.marker_color) {
        (Some(text), _) => Some(parse_channels(text)?),
        (None, file) => file,
    };
    let color = match channels {
        Some(ch) => color_from_channels(ch).context("parsing marker color")?,
        None => defaults.color,
    };

    Ok(AnnotateStyle {
        color,
        marker_radius: args
            .marker_radius
            .or(file_cfg.marker_radius)
            .unwrap_or(defaults.marker_radius),
        line_width: args
            .line_width
            .or(file_cfg.line_width)
            .unwrap_or(defaults.line_width),
    })
}

fn parse_channels(text: &str) -> Result<[i64; 3]> {
    let parts: Vec<&str> = text.split(',').map(str::trim).collect();
    if parts.len() != 3 {
        bail!("marker color must be 'r,g,b', got '{text}'");
    }

    let mut out = [0i64; 3];
    for (dst, part) in out.iter_mut().zip(parts) {
        *dst = part
            .parse()
            .with_context(|| format!("marker color channel '{part}' is not an integer"))?;
    }
    Ok(out)
}

fn parse_formats(tokens: &[String]) -> Result<Vec<MatrixFormat>> {
    let mut out = Vec::with_capacity(tokens.len());
    for token in tokens {
        let format: MatrixFormat = token.trim().parse()?;
        if !out.contains(&format) {
            out.push(format);
        }
    }
    Ok(out)
}

fn load_input(path: &Path) -> Result<LoadedImage> {
    let img = load_rgb(path).with_context(|| format!("loading input image {}", path.display()))?;
    info!(
        "loaded {}: {}x{}, source color {}",
        path.display(),
        img.width(),
        img.height(),
        img.source_color
    );
    Ok(img)
}

fn prepare_out_dir(out: &Path) -> Result<PathBuf> {
    fs::create_dir_all(out).map_err(|err| IoError::Write {
        path: out.to_path_buf(),
        message: err.to_string(),
    })?;
    Ok(out.to_path_buf())
}

fn write_json(path: &Path, value: &impl Serialize) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(value).context("serializing json")?;
    fs::write(path, bytes)
        .map_err(|err| IoError::Write {
            path: path.to_path_buf(),
            message: err.to_string(),
        })
        .with_context(|| format!("writing json {}", path.display()))
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T> {
    let data = fs::read(path).map_err(|err| match err.kind() {
        std::io::ErrorKind::NotFound => IoError::NotFound {
            path: path.to_path_buf(),
        },
        _ => IoError::Decode {
            path: path.to_path_buf(),
            message: err.to_string(),
        },
    })?;
    serde_json::from_slice(&data).with_context(|| format!("parsing json {}", path.display()))
}
