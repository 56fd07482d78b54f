use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mapfill::models::{AppConfig, ColorKey};
use mapfill::services::MapPipeline;

#[derive(Parser)]
#[command(name = "mapfill")]
#[command(about = "Turn an indexed image into an ordered list of /fill commands")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Plan the paint commands for an image
    Plan {
        /// Source PNG or BMP (must be grid_size x grid_size)
        image: PathBuf,

        /// Color key file with `r,g,b,name` lines
        #[arg(short, long)]
        key: PathBuf,

        /// Output file for the /fill commands
        #[arg(short, long)]
        output: PathBuf,

        /// Also write a PNG preview of the replayed commands
        #[arg(short, long)]
        preview: Option<PathBuf>,

        /// Also write the palette index of every cell
        #[arg(long)]
        indices: Option<PathBuf>,

        /// Largest quad painted as a single rectangle (overrides config)
        #[arg(short, long)]
        detail_limit: Option<usize>,

        /// Skip the merge pass (overrides config)
        #[arg(long)]
        no_optimize: bool,

        /// YAML config file (defaults to $CONFIG_FILE)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Log pass details
        #[arg(short, long)]
        verbose: bool,
    },
    /// List the entries of a color key
    Palette {
        /// Color key file with `r,g,b,name` lines
        #[arg(short, long)]
        key: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Plan {
            image,
            key,
            output,
            preview,
            indices,
            detail_limit,
            no_optimize,
            config,
            verbose,
        }) => {
            init_logging(verbose);
            let options = PlanOptions {
                detail_limit,
                no_optimize,
                config,
            };
            run_plan_command(
                &image,
                &key,
                &output,
                preview.as_deref(),
                indices.as_deref(),
                options,
            )
        }
        Some(Commands::Palette { key }) => {
            init_logging(false);
            run_palette_command(&key)
        }
        None => {
            run_status_command();
            Ok(())
        }
    }
}

/// Minimal logging for CLI
fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "mapfill=debug,quad_paint=debug"
    } else {
        "mapfill=info,quad_paint=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();
}

/// Config overrides given on the command line
struct PlanOptions {
    detail_limit: Option<usize>,
    no_optimize: bool,
    config: Option<PathBuf>,
}

fn resolve_config(options: PlanOptions) -> anyhow::Result<AppConfig> {
    let path = options
        .config
        .or_else(|| std::env::var("CONFIG_FILE").ok().map(PathBuf::from));
    let mut config = AppConfig::load(path.as_deref()).context("Failed to load config")?;

    if let Some(limit) = options.detail_limit {
        config.detail_limit = limit;
    }
    if options.no_optimize {
        config.optimize = false;
    }
    config.validate()?;
    Ok(config)
}

/// Plan an image and write the commands (plus optional preview and indices)
fn run_plan_command(
    image: &Path,
    key: &Path,
    output: &Path,
    preview: Option<&Path>,
    indices: Option<&Path>,
    options: PlanOptions,
) -> anyhow::Result<()> {
    let config = resolve_config(options)?;
    let key = ColorKey::load(key)
        .with_context(|| format!("Failed to load color key {}", key.display()))?;
    let pipeline = MapPipeline::new(config, key);

    let result = pipeline
        .plan_image(image)
        .with_context(|| format!("Failed to plan {}", image.display()))?;

    if let Some(path) = indices {
        pipeline
            .write_indices(&result, path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }

    let count = pipeline
        .write_commands(&result, output)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    if let Some(path) = preview {
        pipeline
            .write_preview(&result, path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }

    let stats = result.plan.stats();
    println!(
        "{count} commands written to {} ({} extracted, {} after merge)",
        output.display(),
        stats.extracted,
        stats.merged
    );
    Ok(())
}

/// Print the color key entries with their indices
fn run_palette_command(key: &Path) -> anyhow::Result<()> {
    let key = ColorKey::load(key)
        .with_context(|| format!("Failed to load color key {}", key.display()))?;

    println!("{} colors:", key.len());
    for (index, entry) in key.entries().iter().enumerate() {
        let (r, g, b) = entry.rgb;
        println!("  {index:>3}  #{r:02X}{g:02X}{b:02X}  {}", entry.name);
    }
    Ok(())
}

/// Show the configuration overview when no subcommand is given
fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let config_file = std::env::var("CONFIG_FILE").ok();

    // Header
    println!("mapfill v{VERSION}");
    println!("Turns an indexed image into ordered /fill commands\n");

    // Environment variables section
    println!("Environment Variables:");
    println!(
        "  CONFIG_FILE = {}",
        config_file.as_deref().unwrap_or("(not set)")
    );
    println!(
        "  RUST_LOG    = {}",
        std::env::var("RUST_LOG")
            .ok()
            .as_deref()
            .unwrap_or("(not set)")
    );

    // Effective configuration section
    println!("\nConfiguration:");
    match AppConfig::load(config_file.as_deref().map(Path::new)) {
        Ok(config) => {
            let source = config_file.as_deref().unwrap_or("defaults");
            println!("  Source:        {source}");
            println!("  Grid size:     {0}x{0}", config.grid_size);
            println!("  Detail limit:  {}", config.detail_limit);
            println!("  Optimize:      {}", config.optimize);
            println!("  Namespace:     {}", config.namespace);
            println!("  Y offset:      {}", config.y_offset);
            println!("  Preview scale: {}", config.preview_scale);
        }
        Err(e) => println!("  Error: {e}"),
    }

    // Commands section
    println!("\nCommands:");
    println!("  mapfill plan <IMAGE> --key <KEY> --output <FILE>");
    println!("                       Plan /fill commands for an image");
    println!("  mapfill palette --key <KEY>");
    println!("                       List the color key entries");
    println!("\nRun 'mapfill --help' for more options.");
}
