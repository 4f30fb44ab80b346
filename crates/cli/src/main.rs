//! Spotset CLI - training-set builder for patch-based spot classifiers

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use spotset_algorithms::masks::{category_masks, Category};
use spotset_algorithms::sampling::SamplerParams;
use spotset_dataset::{
    build_datasets, training_ids, SimulatedSource, StoreReader, TiffSource, TRAINING_ID_PREFIX,
    TRAINING_IMAGE_COUNT, WINDOW_WIDTH,
};

// ─── CLI structure ──────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "spotset")]
#[command(author, version, about = "Training-set builder for spot classifiers", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build training and test window databases from simulated images
    Build {
        /// Directory holding the simulated TIFF pairs
        input: PathBuf,
        /// Destination directory of the training database
        train: PathBuf,
        /// Destination directory of the test database
        test: PathBuf,
        /// Side length of exported windows
        #[arg(short, long, default_value_t = WINDOW_WIDTH)]
        width: usize,
        /// File-identifier prefix of the simulated image set
        #[arg(long, default_value = TRAINING_ID_PREFIX)]
        prefix: String,
        /// Number of simulated images to consume
        #[arg(long, default_value_t = TRAINING_IMAGE_COUNT)]
        count: usize,
        /// Fraction of samples assigned to the test set
        #[arg(long, default_value_t = 0.1)]
        test_split: f64,
        /// Seed for the sampling RNG (fresh entropy when omitted)
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Show per-category pixel counts for one simulated image
    Categories {
        /// Directory holding the simulated TIFF pairs
        input: PathBuf,
        /// File identifier of the image to inspect
        id: String,
    },
    /// Show information about a window database
    Info {
        /// Database directory
        database: PathBuf,
    },
}

// ─── Helpers ────────────────────────────────────────────────────────────

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");
}

fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

// ─── Main ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match cli.command {
        // ── Build ────────────────────────────────────────────────────
        Commands::Build {
            input,
            train,
            test,
            width,
            prefix,
            count,
            test_split,
            seed,
        } => {
            let source = TiffSource::new(&input);
            let ids = training_ids(&prefix, count);
            let params = SamplerParams {
                test_split,
                ..SamplerParams::default()
            };
            let mut rng = make_rng(seed);

            info!(
                images = ids.len(),
                width, test_split, "building window databases"
            );

            let pb = spinner("Building datasets...");
            let start = Instant::now();
            let summary = build_datasets(&source, &ids, width, &params, &mut rng, &train, &test)
                .context("Failed to build datasets")?;
            let elapsed = start.elapsed();
            pb.finish_and_clear();

            println!("Training database: {}", train.display());
            println!("  Windows: {}", summary.training_count);
            println!("Test database: {}", test.display());
            println!("  Windows: {}", summary.test_count);
            println!("  Processing time: {:.2?}", elapsed);
        }

        // ── Categories ───────────────────────────────────────────────
        Commands::Categories { input, id } => {
            let source = TiffSource::new(&input);
            let pb = spinner("Reading image...");
            let simulated = source.load(&id).context("Failed to load simulated image")?;
            pb.finish_and_clear();

            let (rows, cols) = simulated.truth.shape();
            let masks = category_masks(&simulated.truth)
                .context("Failed to derive category masks")?;

            println!("Image: {}", id);
            println!("Dimensions: {} x {} ({} pixels)", cols, rows, rows * cols);
            println!("\nCategory pixel counts:");
            for (category, mask) in masks.iter() {
                let count = mask.data().iter().filter(|&&v| v).count();
                println!(
                    "  {:<16} {:>10} (label {})",
                    category.name(),
                    count,
                    category.label()
                );
            }
        }

        // ── Info ─────────────────────────────────────────────────────
        Commands::Info { database } => {
            let reader = StoreReader::open(&database).context("Failed to open database")?;

            println!("Database: {}", database.display());
            println!("Windows: {}", reader.len());
            println!("Window width: {}", reader.width());
            let positive = reader.label_count(Category::Inside.label());
            let negative = reader.label_count(Category::Outside.label());
            println!(
                "Labels: {} positive, {} negative ({:.1}% positive)",
                positive,
                negative,
                if reader.is_empty() {
                    0.0
                } else {
                    100.0 * positive as f64 / reader.len() as f64
                }
            );
        }
    }

    Ok(())
}
