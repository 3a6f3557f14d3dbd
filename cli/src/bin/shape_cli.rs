use clap::{Parser, Subcommand};
use cli::{load_rgba, ConfigFile, Overrides};
use color_eyre::eyre::Result;
use shapes::{BoundaryStrategy, DetectionResult, DetectorConfig, Pipeline, ShapeType};
use std::path::{Path, PathBuf};
use strum::IntoEnumIterator;
use tracing::{info, warn};
use tracing_subscriber::{self, EnvFilter};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect shapes in one or more image files
    Detect {
        /// Images to process (PNG or JPEG)
        #[arg(required = true)]
        images: Vec<PathBuf>,
        /// Detector configuration (.toml or .json)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Mean RGB value below which a pixel is dark
        #[arg(long)]
        threshold: Option<u8>,
        /// Douglas-Peucker tolerance in pixels
        #[arg(long)]
        tolerance: Option<f64>,
        /// Boundary ordering strategy
        #[arg(long)]
        strategy: Option<BoundaryStrategy>,
        /// Write JSON here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the JSON schema of the detector configuration
    Schema,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info"))
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Detect { images, config, threshold, tolerance, strategy, output } => {
            let overrides = Overrides { threshold, tolerance, strategy };
            detect(&images, config.as_deref(), &overrides, output.as_deref())?;
        }
        Commands::Schema => {
            println!("{}", serde_json::to_string_pretty(&DetectorConfig::schema())?);
        }
    }

    Ok(())
}

fn detect(images: &[PathBuf], config_path: Option<&Path>, overrides: &Overrides, output: Option<&Path>) -> Result<()> {
    let config = match config_path {
        Some(path) => DetectorConfig::from_file(path)?,
        None => DetectorConfig::default(),
    };
    let config = overrides.apply(config)?;
    info!("Boundary ordering: {}", config.boundary_strategy.description());

    let pipeline = Pipeline::from_config(&config)?;
    info!("{}", pipeline.info());

    let mut results: Vec<DetectionResult> = Vec::with_capacity(images.len());
    for path in images {
        let image = load_rgba(path)?;
        let result = pipeline.detect_image(&image)?;
        if result.shapes.is_empty() {
            warn!("No shapes found in {:?}", path);
        } else {
            let counts: Vec<String> = ShapeType::iter()
                .map(|shape_type| (shape_type, result.count_of(shape_type)))
                .filter(|&(_, count)| count > 0)
                .map(|(shape_type, count)| format!("{count} {shape_type}"))
                .collect();
            info!("{:?}: {} in {:.1} ms", path, counts.join(", "), result.processing_time_ms);
        }
        results.push(result);
    }

    match (results.as_slice(), output) {
        ([single], Some(path)) => {
            single.save_json(path)?;
            info!("Results saved to: {:?}", path);
        }
        ([single], None) => println!("{}", single.to_json()?),
        (_, Some(path)) => {
            std::fs::write(path, serde_json::to_string_pretty(&results)?)?;
            info!("Results saved to: {:?}", path);
        }
        (_, None) => println!("{}", serde_json::to_string_pretty(&results)?),
    }

    Ok(())
}
