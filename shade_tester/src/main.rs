use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};
use shade_vision::{
    ClassifierConfig, DEFAULT_DARK_PIXEL_BUDGET, DEFAULT_LUMINANCE_CUTOFF, DarknessClassifier,
    ParallelClassifier,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "shade_tester")]
#[command(version, about = "Classify images as dark or light", long_about = None)]
struct Cli {
    /// Images to classify
    #[arg(value_name = "IMAGE", required = true)]
    images: Vec<PathBuf>,

    /// Luminance (0-255) below which a pixel counts as dark
    #[arg(long, value_name = "LUMA", default_value_t = DEFAULT_LUMINANCE_CUTOFF)]
    cutoff: f64,

    /// Fraction of pixels (0-1) the dark count must exceed
    #[arg(long, value_name = "FRACTION", default_value_t = DEFAULT_DARK_PIXEL_BUDGET)]
    budget: f64,

    /// Scan each image on all available cores
    #[arg(long)]
    parallel: bool,
}

enum Scanner {
    Serial(DarknessClassifier),
    Parallel(ParallelClassifier),
}

impl Scanner {
    fn is_dark(&self, bytes: &[u8], width: u32, height: u32) -> bool {
        match self {
            Scanner::Serial(classifier) => classifier.is_dark(bytes, width, height),
            Scanner::Parallel(classifier) => classifier.is_dark(bytes, width, height),
        }
    }
}

fn classify_file(scanner: &Scanner, path: &Path) -> Result<bool> {
    let image = image::open(path)
        .with_context(|| format!("failed to decode {}", path.display()))?
        .to_rgba8();
    let (width, height) = image.dimensions();
    info!("{}: {width}x{height}", path.display());
    Ok(scanner.is_dark(image.as_raw(), width, height))
}

fn main() -> Result<ExitCode> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = ClassifierConfig::new(cli.cutoff, cli.budget).context("invalid classifier policy")?;
    let scanner = if cli.parallel {
        let classifier = ParallelClassifier::new(config)?;
        info!("scanning with {} workers", classifier.workers());
        Scanner::Parallel(classifier)
    } else {
        Scanner::Serial(DarknessClassifier::new(config)?)
    };

    let mut failures = 0usize;
    for path in &cli.images {
        match classify_file(&scanner, path) {
            Ok(dark) => println!("{}\t{}", path.display(), if dark { "dark" } else { "light" }),
            Err(error) => {
                failures += 1;
                eprintln!("{}\terror: {error:#}", path.display());
            }
        }
    }

    if failures > 0 {
        warn!("{failures} of {} images could not be classified", cli.images.len());
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
