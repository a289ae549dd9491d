use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;

use asset_catalog_packer::{AssetCatalog, LogLevel, RuleSet, SwiftTarget};

#[derive(Parser)]
#[command(name = "asset-catalog-packer")]
#[command(about = "Pack loose raster image variants into an Xcode-style asset catalog")]
#[command(long_about = "\
Pack loose raster image variants into an Xcode-style asset catalog

Filenames encode the variant metadata: a trailing @2x/@3x marker sets the
scale, and size suffixes such as -38, -42, -60 or -1024 classify watch,
app icon and marketing images. All variants of one image are merged into a
single .imageset (or .appiconset) group carrying a generated Contents.json,
and an optional Swift file exposes one accessor per image set.")]
#[command(version)]
struct Cli {
    /// Folder of source images
    #[arg(short, long)]
    input: PathBuf,

    /// Output file or folder; a folder receives an Assets.xcassets package
    #[arg(short, long)]
    output: PathBuf,

    /// JSON configuration file; sensible defaults apply when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write generated Swift accessors to this file or folder
    #[arg(long)]
    swift: Option<PathBuf>,

    /// Swift platform flavor for generated accessors
    #[arg(long, default_value = "ios", value_parser = parse_target)]
    target: SwiftTarget,

    /// Overwrite an existing asset catalog
    #[arg(short, long)]
    force: bool,

    /// Compute manifests and the copy plan without writing anything
    #[arg(long)]
    dry_run: bool,

    /// Print a manifest record for every packed image
    #[arg(short, long)]
    verbose: bool,
}

fn parse_target(value: &str) -> Result<SwiftTarget, String> {
    value.parse()
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let rules = match &cli.config {
        Some(path) => RuleSet::load_from_path(path)?,
        None => RuleSet::default(),
    };

    let start = Instant::now();

    let catalog = AssetCatalog::from_directory(
        &cli.input,
        &cli.output,
        cli.swift.as_deref(),
        cli.target,
        cli.force,
        rules,
    )
    .with_context(|| format!("failed to scan {}", cli.input.display()))?;

    let log_level = if cli.verbose {
        LogLevel::Detailed
    } else {
        LogLevel::Fast
    };

    let log = catalog
        .apply_changes(log_level, cli.dry_run)
        .context("failed to apply changes")?;

    if cli.verbose {
        for image in &log.images {
            println!("{}", serde_json::to_string(image)?);
        }
    }

    let action = if cli.dry_run { "Planned" } else { "Created" };
    println!(
        "{action} assets package {} with {} images in {:.3} seconds",
        catalog.destination().display(),
        log.image_count,
        start.elapsed().as_secs_f64()
    );

    Ok(())
}
