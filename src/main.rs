use anyhow::{Context, Result, bail};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

use isolines::config::{ContourConfig, FileConfig, ShortLinePolicy};
use isolines::contour::{RoundingPolicy, levels_from_interval, parse_thresholds};
use isolines::geojson::{Normalizer, encode_features, parse_points, to_json_string};
use isolines::{ContourError, ContourPipeline, Point3D};

/// Generate smoothed contour lines (isolines) from GeoJSON elevation points
///
/// The input is a GeoJSON Feature whose geometry is a MultiPoint of
/// [longitude, latitude, value] positions. The output is a FeatureCollection
/// of LineString contours.
///
/// Examples:
///   # Contours at fixed values
///   isolines -i heights.geojson -t "[100, 200, 300]" -o contours.geojson
///
///   # A contour every 50 units across the data range, printed to stdout
///   isolines -i heights.geojson --interval 50
///
///   # Use a config file
///   isolines --config my-settings.toml
#[derive(Parser, Debug)]
#[command(name = "isolines")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to config file (optional, auto-searches isolines.toml if not provided)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Input GeoJSON file with a MultiPoint of [lon, lat, value] positions
    #[arg(short = 'i', long)]
    input: Option<PathBuf>,

    /// Threshold values, e.g. "[10, 20, 30]" or "10,20,30"
    #[arg(short = 't', long, allow_hyphen_values = true)]
    thresholds: Option<String>,

    /// Place a threshold at every multiple of this step within the value range
    #[arg(long, conflicts_with = "thresholds")]
    interval: Option<f64>,

    /// Output GeoJSON file (defaults to stdout)
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Coordinate rounding: ceil (legacy), nearest, or none
    #[arg(long)]
    rounding: Option<RoundingPolicy>,

    /// Lines too short to smooth: keep or drop
    #[arg(long)]
    short_lines: Option<ShortLinePolicy>,

    /// Number of worker threads (defaults to one per core)
    #[arg(long)]
    threads: Option<usize>,

    /// Record each line's threshold in its feature properties
    #[arg(long)]
    threshold_property: bool,

    /// Pretty-print the output JSON
    #[arg(long)]
    pretty: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let total_start = Instant::now();

    let file_config = if let Some(ref config_path) = args.config {
        if config_path.exists() {
            let contents = std::fs::read_to_string(config_path)
                .context(format!("Failed to read config file: {:?}", config_path))?;
            Some(FileConfig::from_toml(&contents).context("Failed to parse config file")?)
        } else {
            bail!("Config file not found: {:?}", config_path);
        }
    } else {
        FileConfig::load()
    };

    let verbose = args.verbose || file_config.as_ref().map(|c| c.verbose).unwrap_or(false);
    init_logging(verbose);

    let input = args
        .input
        .clone()
        .or_else(|| file_config.as_ref().and_then(|c| c.input.clone()));
    let output = args
        .output
        .clone()
        .or_else(|| file_config.as_ref().and_then(|c| c.output.clone()));
    let interval = args
        .interval
        .or_else(|| file_config.as_ref().and_then(|c| c.interval));

    let mut contour_config = file_config
        .as_ref()
        .and_then(|c| c.contour.clone())
        .unwrap_or_default();
    if let Some(rounding) = args.rounding {
        contour_config = contour_config.with_rounding(rounding);
    }
    if let Some(policy) = args.short_lines {
        contour_config = contour_config.with_short_lines(policy);
    }
    if args.threads.is_some() {
        contour_config = contour_config.with_threads(args.threads);
    }
    if args.threshold_property {
        contour_config = contour_config.with_threshold_property(true);
    }

    let Some(input) = input else {
        bail!("Must provide an input file with --input/-i");
    };

    // Progress output only when the contours are not going to stdout
    let show_progress = output.is_some();

    let spinner = create_spinner(show_progress, "Reading input points...");
    let start = Instant::now();
    let contents = std::fs::read_to_string(&input)
        .with_context(|| format!("Failed to read input file: {}", input.display()))?;
    let points = parse_points(&contents, &Normalizer::from_config(&contour_config))
        .map_err(describe_error)
        .context("Failed to read input points")?;
    spinner.finish_with_message(format!(
        "Read {} points [{:.1}s]",
        points.len(),
        start.elapsed().as_secs_f32()
    ));

    let thresholds = if let Some(ref text) = args.thresholds {
        parse_thresholds(text).map_err(describe_error)?
    } else if let Some(step) = interval {
        let levels = interval_levels(&points, step);
        if levels.is_empty() {
            bail!("No thresholds fall within the value range for interval {}", step);
        }
        levels
    } else if let Some(list) = file_config.as_ref().and_then(|c| c.thresholds.clone()) {
        list
    } else {
        bail!("Must provide either --thresholds/-t or --interval");
    };

    if verbose {
        print_configuration(&input, output.as_ref(), &thresholds, &contour_config);
    }

    let spinner = create_spinner(show_progress, "Generating contours...");
    let start = Instant::now();
    let pipeline = ContourPipeline::new(contour_config.clone());
    let result = pipeline
        .run(points, &thresholds)
        .map_err(describe_error)
        .context("Contour generation failed")?;
    spinner.finish_with_message(format!(
        "Traced {} thresholds over {} triangles: {} segments -> {} lines [{:.1}s]",
        result.stats.thresholds,
        result.stats.triangles,
        result.stats.segments,
        result.stats.lines,
        start.elapsed().as_secs_f32()
    ));

    let collection = encode_features(&result.lines, contour_config.threshold_property);
    let json = to_json_string(&collection, args.pretty).context("Failed to encode GeoJSON")?;

    match output {
        Some(ref path) => {
            std::fs::write(path, &json)
                .with_context(|| format!("Failed to write output file: {}", path.display()))?;
            println!();
            println!(
                "Done! {} contour lines in {:.1}s",
                collection.len(),
                total_start.elapsed().as_secs_f32()
            );
            println!("Output: {}", path.display());
        }
        None => println!("{}", json),
    }

    Ok(())
}

/// Turn library errors into user-facing messages, keeping input problems
/// distinct from internal failures.
fn describe_error(err: ContourError) -> anyhow::Error {
    if err.is_validation() {
        anyhow::anyhow!("Invalid input: {}", err)
    } else {
        anyhow::Error::new(err)
    }
}

fn interval_levels(points: &[Point3D], step: f64) -> Vec<f64> {
    let (min, max) = points
        .iter()
        .map(|p| p.z)
        .filter(|z| z.is_finite())
        .fold((f64::MAX, f64::MIN), |(lo, hi), z| (lo.min(z), hi.max(z)));
    levels_from_interval(min, max, step)
}

fn print_configuration(
    input: &std::path::Path,
    output: Option<&PathBuf>,
    thresholds: &[f64],
    config: &ContourConfig,
) {
    eprintln!("Configuration:");
    eprintln!("  Input: {}", input.display());
    match output {
        Some(path) => eprintln!("  Output: {}", path.display()),
        None => eprintln!("  Output: stdout"),
    }
    eprintln!("  Thresholds: {:?}", thresholds);
    eprintln!("  Rounding: {:?} ({} decimals)", config.rounding, config.precision);
    eprintln!("  Merge tolerance: {}", config.merge_tolerance);
    eprintln!("  Smooth tolerance: {}", config.smooth_tolerance);
    eprintln!("  Short lines: {:?}", config.short_lines);
    if let Some(threads) = config.threads {
        eprintln!("  Threads: {}", threads);
    }
    eprintln!();
}

fn init_logging(verbose: bool) {
    let default = if verbose { "warn,isolines=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn create_spinner(visible: bool, message: &str) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}
