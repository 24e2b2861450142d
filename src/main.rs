//! Texforge CLI
//!
//! Command-line interface for manifest-driven texture export sessions.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::{info, warn, Level};
use tracing_subscriber::{fmt, EnvFilter};

use texforge_core::AssetCategory;
use texforge_export::{
    AssetPathRegistry, Destination, ExportOutcome, FsDestination, Manifest, MemoryDestination,
    TextureExporter,
};

/// Texforge - PBR texture workflow converter and asset export pipeline
#[derive(Parser)]
#[command(name = "texforge")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Output format for structured data
    #[arg(long, global = true, default_value = "text")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Run an export session from a manifest
    Export(ExportArgs),

    /// Show the assets a manifest describes
    Info(InfoArgs),
}

#[derive(Args)]
struct ExportArgs {
    /// Path to the export manifest (JSON)
    #[arg(short, long)]
    manifest: PathBuf,

    /// Output directory
    #[arg(short, long)]
    output: PathBuf,

    /// Overwrite existing files
    #[arg(long)]
    overwrite: bool,

    /// Dry run - convert in memory and show what would be written
    #[arg(long)]
    dry_run: bool,
}

#[derive(Args)]
struct InfoArgs {
    /// Path to the export manifest (JSON)
    #[arg(short, long)]
    manifest: PathBuf,
}

fn setup_logging(verbosity: u8) {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    fmt()
        .with_env_filter(filter)
        .with_target(verbosity >= 2)
        .with_file(verbosity >= 3)
        .with_line_number(verbosity >= 3)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match cli.command {
        Commands::Export(args) => cmd_export(args),
        Commands::Info(args) => cmd_info(args, cli.format),
    }
}

fn cmd_export(args: ExportArgs) -> Result<()> {
    info!("Loading manifest: {:?}", args.manifest);

    let manifest = Manifest::load(&args.manifest).context("Failed to load manifest")?;
    let assets = manifest.source_assets();
    let resolver = manifest.resolver();
    let mut registry = AssetPathRegistry::new(assets.clone());

    let memory = MemoryDestination::new();
    let destination: Box<dyn Destination> = if args.dry_run {
        Box::new(memory.clone())
    } else {
        Box::new(FsDestination::new(&args.output).with_overwrite(args.overwrite))
    };

    let textures: Vec<_> = assets
        .iter()
        .filter(|asset| asset.category == AssetCategory::Texture)
        .collect();
    info!("Found {} texture assets to export", textures.len());

    let mut transformed = 0;
    let mut copied = 0;
    let mut skipped = 0;

    let mut exporter = TextureExporter::new(&mut registry, &resolver, destination.as_ref());
    for asset in textures {
        match exporter
            .export_asset(asset)
            .with_context(|| format!("Failed to export {}", asset.key))?
        {
            ExportOutcome::Transformed { outputs, .. } => transformed += outputs,
            ExportOutcome::PassThroughCopied => copied += 1,
            ExportOutcome::Skipped => {
                warn!(asset = %asset.key, "Asset skipped");
                skipped += 1;
            }
        }
    }

    if args.dry_run {
        println!("Dry run - would write {} files:", memory.written_names().len());
        for name in memory.written_names() {
            println!("  {}", name);
        }
        for (source, name) in memory.copies() {
            println!("  {} (copy of {})", name, source.display());
        }
        return Ok(());
    }

    println!(
        "Export complete: {} converted, {} copied, {} skipped",
        transformed, copied, skipped
    );

    Ok(())
}

fn cmd_info(args: InfoArgs, format: OutputFormat) -> Result<()> {
    let manifest = Manifest::load(&args.manifest).context("Failed to load manifest")?;

    match format {
        OutputFormat::Json => {
            let entries: Vec<_> = manifest
                .assets
                .iter()
                .map(|asset| {
                    serde_json::json!({
                        "container": asset.container,
                        "name": asset.name,
                        "category": format!("{:?}", asset.category),
                        "output_name": asset.output_name,
                        "references": asset.references.len(),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
        OutputFormat::Text => {
            println!("{:<10} {:<24} {:<40} {}", "Category", "Name", "Output", "Refs");
            println!("{:-<10} {:-<24} {:-<40} {:-<4}", "", "", "", "");
            for asset in &manifest.assets {
                println!(
                    "{:<10} {:<24} {:<40} {}",
                    format!("{:?}", asset.category),
                    asset.name,
                    asset.output_name,
                    asset.references.len()
                );
            }
            println!("\nTotal: {} assets", manifest.assets.len());
        }
    }

    Ok(())
}
