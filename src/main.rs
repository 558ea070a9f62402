//! `imgtransform` CLI - apply one transformation to an image and save it as JPEG.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use imgtransform::processor::{
    DEFAULT_BRIGHTEN_FACTOR, DEFAULT_CROP_FRACTION, DEFAULT_DARKEN_FACTOR, DEFAULT_NOISE_MEAN,
    DEFAULT_NOISE_SCALE, DEFAULT_OUTPUT_DIR, DEFAULT_RESIZE_MULTIPLIER, DEFAULT_ROTATION_DEGREES,
};
use imgtransform::{Config, ImageProcessor, Operation};

/// Apply a single transformation to an image and save the result as JPEG.
#[derive(Parser, Debug)]
#[command(name = "imgtransform")]
#[command(version, about, long_about = None)]
struct Args {
    /// Input image path.
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Directory for the processed image.
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR, value_name = "DIR")]
    out_dir: PathBuf,

    /// Output file name without extension. Defaults to "{operation}_{input stem}".
    #[arg(short, long, value_name = "NAME")]
    name: Option<String>,

    /// Output JPEG quality (1-100).
    #[arg(short, long, default_value = "75", value_name = "INT")]
    quality: u8,

    /// Random seed for noise and crop placement.
    #[arg(long, value_name = "INT")]
    seed: Option<u64>,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert to single-channel grayscale.
    Grayscale,

    /// Stretch pixel values to the full 0-255 range.
    Normalize,

    /// Multiply pixel values by a factor.
    Brighten {
        #[arg(long, default_value_t = DEFAULT_BRIGHTEN_FACTOR, value_name = "FLOAT")]
        factor: f64,
    },

    /// Multiply pixel values by a factor below one.
    Darken {
        #[arg(long, default_value_t = DEFAULT_DARKEN_FACTOR, value_name = "FLOAT")]
        factor: f64,
    },

    /// Apply a fixed sharpening kernel.
    Sharpen,

    /// Scale both sides by a multiplier (0.5 halves the image).
    Resize {
        #[arg(long, default_value_t = DEFAULT_RESIZE_MULTIPLIER, value_name = "FLOAT")]
        multiplier: f64,
    },

    /// Mirror left-right.
    Flip,

    /// Rotate counter-clockwise, keeping the canvas size.
    Rotate {
        #[arg(
            long,
            default_value_t = DEFAULT_ROTATION_DEGREES,
            allow_negative_numbers = true,
            value_name = "FLOAT"
        )]
        degrees: f32,
    },

    /// Add Gaussian noise to every sample.
    Noise {
        #[arg(
            long,
            default_value_t = DEFAULT_NOISE_MEAN,
            allow_negative_numbers = true,
            value_name = "FLOAT"
        )]
        mean: f64,

        /// Standard deviation of the noise.
        #[arg(long, default_value_t = DEFAULT_NOISE_SCALE, value_name = "FLOAT")]
        scale: f64,
    },

    /// Cut a randomly placed box sized as fractions of the image.
    RandomCrop {
        #[arg(long, default_value_t = DEFAULT_CROP_FRACTION.0, value_name = "FLOAT")]
        width_fraction: f64,

        #[arg(long, default_value_t = DEFAULT_CROP_FRACTION.1, value_name = "FLOAT")]
        height_fraction: f64,
    },
}

impl From<&Command> for Operation {
    fn from(command: &Command) -> Self {
        match *command {
            Command::Grayscale => Self::Grayscale,
            Command::Normalize => Self::Normalize,
            Command::Brighten { factor } => Self::Brighten { factor },
            Command::Darken { factor } => Self::Darken { factor },
            Command::Sharpen => Self::Sharpen,
            Command::Resize { multiplier } => Self::Resize { multiplier },
            Command::Flip => Self::Flip,
            Command::Rotate { degrees } => Self::Rotate { degrees },
            Command::Noise { mean, scale } => Self::GaussianNoise { mean, scale },
            Command::RandomCrop {
                width_fraction,
                height_fraction,
            } => Self::RandomCrop {
                width_fraction,
                height_fraction,
            },
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("imgtransform={log_level}").into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    if let Err(err) = run(&args) {
        tracing::error!("{err:#}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn run(args: &Args) -> Result<()> {
    let config = Config {
        jpeg_quality: args.quality,
        seed: args.seed,
    };
    let processor =
        ImageProcessor::with_config(&args.input, config).context("Invalid configuration")?;

    let operation = Operation::from(&args.command);
    let processed = processor
        .apply(&operation)
        .with_context(|| format!("Failed to apply {operation} to {}", args.input.display()))?;

    let name = args
        .name
        .clone()
        .unwrap_or_else(|| processor.default_output_name(&operation));
    let saved = processor
        .save_processed_image(&processed, &args.out_dir, &name)
        .context("Failed to save processed image")?;

    println!("{}", saved.display());

    Ok(())
}
