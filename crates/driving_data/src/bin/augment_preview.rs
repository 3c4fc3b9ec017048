//! Pulls a few batches from a driving log and writes them to disk, so the
//! augmentation settings can be checked by eye before training.
//!
//! ```bash
//! RUST_LOG=info augment_preview --log data/driving_log.csv --header \
//!     --batches 2 --batch-size 16 --seed 7 --out preview/
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use driving_data::generator::{BatchGenerator, GeneratorConfig};
use driving_data::readers::DrivingLogReader;
use log::info;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "augment_preview", about = "Write augmented training batches to disk")]
struct Args {
    /// Driving log CSV (center,left,right,steering,throttle,brake,speed)
    #[arg(long)]
    log: PathBuf,

    /// The log's first line is a header row
    #[arg(long)]
    header: bool,

    /// Directory frame paths are relative to (defaults to the log's directory)
    #[arg(long)]
    image_root: Option<PathBuf>,

    /// JSON generator config; command-line flags override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of batches to write
    #[arg(long, default_value_t = 1)]
    batches: usize,

    #[arg(long)]
    batch_size: Option<usize>,

    #[arg(long)]
    seed: Option<u64>,

    /// Only crop and resize; skip random augmentation
    #[arg(long)]
    no_augment: bool,

    /// Output directory for frames and labels.csv
    #[arg(long, default_value = "preview")]
    out: PathBuf,
}

#[derive(Serialize)]
struct LabelRecord {
    batch: usize,
    index: usize,
    file: String,
    steering: f64,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => GeneratorConfig::from_json_file(path)?,
        None => GeneratorConfig::default(),
    };
    if let Some(batch_size) = args.batch_size {
        config.batch_size = batch_size;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if args.no_augment {
        config.augment = false;
    }

    let log = DrivingLogReader::new(&args.log)
        .has_headers(args.header)
        .read()?;
    let root = args
        .image_root
        .clone()
        .or_else(|| args.log.parent().map(PathBuf::from))
        .unwrap_or_default();
    let log = log.rebase(&root);

    let generator = BatchGenerator::new(log, config)?;

    std::fs::create_dir_all(&args.out)
        .with_context(|| format!("Failed to create output directory: {}", args.out.display()))?;
    let labels_path = args.out.join("labels.csv");
    let mut labels = csv::Writer::from_path(&labels_path)
        .with_context(|| format!("Failed to create {}", labels_path.display()))?;

    for (b, batch) in generator.iter().take(args.batches).enumerate() {
        let batch = batch?;
        for (i, sample) in batch.into_samples().enumerate() {
            let file = format!("batch{b}_{i}.png");
            let path = args.out.join(&file);
            sample
                .image
                .save(&path)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            labels.serialize(LabelRecord {
                batch: b,
                index: i,
                file,
                steering: sample.steering,
            })?;
        }
    }
    labels.flush()?;

    info!(
        "Wrote {} batches to {}",
        args.batches,
        args.out.display()
    );
    Ok(())
}
