//! # featuremap
//!
//! Command-line front end: scans a features root (or a single component) and
//! prints JSON on stdout. Logs go to stderr.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::{debug, info};

use featuremap::config::FeaturemapConfig;
use featuremap::error::read_source;
use featuremap::types::ElementStats;
use featuremap::ui::element_stats;
use featuremap::{FeatureScanner, UiElementDetector, analyze_component_source};

#[derive(Parser, Debug)]
#[command(name = "featuremap")]
#[command(about = "Map a front-end's features, components and UI elements to JSON")]
#[command(version)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scan every feature directory under ROOT
    Scan(ScanArgs),
    /// Analyze and classify a single component file
    Component(ComponentArgs),
}

#[derive(Args, Debug)]
struct ScanArgs {
    /// Features root (each subdirectory is one feature)
    #[arg(default_value = ".")]
    root: PathBuf,

    /// Only include features touched by this path (repeatable)
    #[arg(long = "changed", value_name = "PATH")]
    changed: Vec<String>,

    /// Read changed paths from a file, one per line
    #[arg(long, value_name = "FILE")]
    changed_from: Option<PathBuf>,

    /// Configuration file (default: ROOT/.featuremap/config.toml)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Single-line JSON
    #[arg(long)]
    compact: bool,

    /// Print per-feature UI element statistics instead of full records
    #[arg(long)]
    stats: bool,
}

#[derive(Args, Debug)]
struct ComponentArgs {
    /// Component source file (.tsx, .jsx, .ts, .js, .vue)
    file: PathBuf,

    /// Configuration file with UI catalog extensions
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Single-line JSON
    #[arg(long)]
    compact: bool,
}

#[derive(Serialize)]
struct FeatureStats<'a> {
    name: &'a str,
    #[serde(flatten)]
    stats: ElementStats,
}

fn load_config(explicit: Option<&Path>, root: &Path) -> Result<FeaturemapConfig> {
    match explicit {
        Some(path) => FeaturemapConfig::load_strict(path)
            .with_context(|| format!("loading config {}", path.display())),
        None => Ok(FeaturemapConfig::load(root)),
    }
}

/// `None` when no change list was given at all, so that an empty
/// `--changed-from` file still selects nothing.
fn changed_paths(args: &ScanArgs) -> Result<Option<Vec<String>>> {
    if args.changed.is_empty() && args.changed_from.is_none() {
        return Ok(None);
    }
    let mut changed = args.changed.clone();
    if let Some(list) = &args.changed_from {
        let content = std::fs::read_to_string(list)
            .with_context(|| format!("reading change list {}", list.display()))?;
        changed.extend(
            content
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string),
        );
    }
    Ok(Some(changed))
}

fn print_json<T: Serialize>(value: &T, compact: bool) -> Result<()> {
    let json = if compact {
        serde_json::to_string(value)
    } else {
        serde_json::to_string_pretty(value)
    }
    .context("serializing output")?;
    println!("{json}");
    Ok(())
}

fn run_scan(args: &ScanArgs) -> Result<()> {
    let config = load_config(args.config.as_deref(), &args.root)?;
    let catalog = config.catalog().context("building UI element catalog")?;
    if config.has_ui_overrides() {
        debug!("UI catalog extended from configuration");
    }
    let changed = changed_paths(args)?;

    let scanner = FeatureScanner::new(UiElementDetector::new(&catalog), &config);
    let features = scanner.scan(&args.root, changed.as_deref());
    info!(features = features.len(), "featuremap scan finished");

    if args.stats {
        let stats: Vec<FeatureStats> = features
            .iter()
            .map(|f| FeatureStats {
                name: &f.name,
                stats: element_stats(&f.ui_elements),
            })
            .collect();
        print_json(&stats, args.compact)
    } else {
        print_json(&features, args.compact)
    }
}

fn run_component(args: &ComponentArgs) -> Result<()> {
    let root = args.file.parent().unwrap_or(Path::new("."));
    let config = load_config(args.config.as_deref(), root)?;
    let catalog = config.catalog().context("building UI element catalog")?;

    let source = read_source(&args.file).context("analyzing component")?;
    let mut component = analyze_component_source(&source, &args.file);
    component.ui_elements = UiElementDetector::new(&catalog).detect_in_source(&source, &component);
    print_json(&component, args.compact)
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| cli.log_level.parse().unwrap_or_default()),
        )
        .init();

    match &cli.command {
        Command::Scan(args) => run_scan(args),
        Command::Component(args) => run_component(args),
    }
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("[featuremap] Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
