//! gzembed CLI - embed gzip-compressed web assets in firmware sources
//!
//! Usage: gzembed <COMMAND>
//!
//! Commands:
//!   extract   Print the hex listing of every configured asset
//!   assemble  Write generated sources from a hex listing file
//!   manifest  Write or print the JSON manifest of compressed assets
//!   build     Compress sources and write generated files
//!   check     Verify generated files are up to date

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use gzembed::config::{Config, DEFAULT_CONFIG_FILE};
use gzembed::fs::{FileSystem, LocalFs};
use gzembed::manifest::Manifest;
use gzembed::pipeline::{OutputState, PlannedOutput};

/// Legacy intermediate listing file
const DEFAULT_LISTING_FILE: &str = "web_assets_gzipped_fix.txt";

/// gzembed - embed gzip-compressed web assets in firmware sources
#[derive(Parser, Debug)]
#[command(name = "gzembed")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Output format for CI
    #[arg(long, global = true)]
    json: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the hex listing of every configured asset
    Extract {
        /// Read every asset from this file instead of the configured sources
        #[arg(short, long)]
        source: Option<PathBuf>,
    },

    /// Write generated sources from a hex listing file
    Assemble {
        /// Hex listing produced by `extract`
        #[arg(short, long, default_value = DEFAULT_LISTING_FILE)]
        input: PathBuf,

        /// Write every asset to this file instead of the configured outputs
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Write or print the JSON manifest of compressed assets
    Manifest {
        /// Write the manifest here instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Compress sources and write generated files
    Build {
        /// Render from a saved manifest instead of the sources
        #[arg(short, long)]
        manifest: Option<PathBuf>,

        /// Dry run - show what would be written
        #[arg(long)]
        dry_run: bool,
    },

    /// Verify generated files are up to date (exits non-zero if not)
    Check {
        /// Show a unified diff for stale files
        #[arg(long)]
        diff: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = load_config(&cli.config)?;
    let fs = LocalFs::new();

    match cli.command {
        Commands::Extract { source } => cmd_extract(&config, &fs, source, cli.json),
        Commands::Assemble { input, output } => {
            cmd_assemble(&config, &fs, &input, output.as_deref(), cli.json)
        }
        Commands::Manifest { out } => cmd_manifest(&config, &fs, out.as_deref(), cli.json),
        Commands::Build { manifest, dry_run } => {
            cmd_build(&config, &fs, manifest.as_deref(), dry_run, cli.json)
        }
        Commands::Check { diff } => cmd_check(&config, &fs, diff, cli.json),
    }
}

/// Log filter from GZEMBED_LOG, otherwise from the -v count
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_env("GZEMBED_LOG").unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: &Path) -> Result<Config> {
    let (config, _warnings) = Config::load_or_default(path)
        .with_context(|| format!("failed to load config {}", path.display()))?;
    Ok(config.with_env_overrides())
}

fn cmd_extract(config: &Config, fs: &dyn FileSystem, source: Option<PathBuf>, json: bool) -> Result<()> {
    let mut config = config.clone();
    if let Some(source) = source {
        // CLI paths are relative to the working directory, not the config file
        let source = std::env::current_dir()?.join(source);
        for asset in &mut config.assets {
            asset.source = source.clone();
        }
    }

    let manifest = gzembed::compress_assets(&config, fs)?;

    if json {
        print!("{}", manifest.to_json()?);
        return Ok(());
    }

    let assets: Vec<_> = manifest
        .decode_all()?
        .into_iter()
        .map(|(_, compressed)| compressed)
        .collect();
    print!(
        "{}",
        gzembed::render_listing(&assets, config.listing.bytes_per_line)
    );

    Ok(())
}

fn cmd_assemble(
    config: &Config,
    fs: &dyn FileSystem,
    input: &Path,
    output: Option<&Path>,
    json: bool,
) -> Result<()> {
    let output = output
        .map(|path| std::env::current_dir().map(|cwd| cwd.join(path)))
        .transpose()?;
    let plans = gzembed::assemble(config, fs, input, output.as_deref())
        .with_context(|| format!("failed to assemble {}", input.display()))?;
    let written = gzembed::write_outputs(fs, &plans)?;

    if json {
        let output = serde_json::json!({
            "event": "assemble",
            "input": input.display().to_string(),
            "written": written.iter().map(|p| p.display().to_string()).collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string(&output)?);
    } else {
        print_written(&plans);
        println!("Generated sources updated successfully with gzipped assets.");
    }

    Ok(())
}

fn cmd_manifest(config: &Config, fs: &dyn FileSystem, out: Option<&Path>, json: bool) -> Result<()> {
    let manifest = gzembed::compress_assets(config, fs)?;
    let content = manifest.to_json()?;

    match out {
        Some(path) => {
            fs.write_atomic(path, &content)
                .with_context(|| format!("failed to write manifest {}", path.display()))?;
            if json {
                let output = serde_json::json!({
                    "event": "manifest",
                    "path": path.display().to_string(),
                    "assets": manifest.assets.len(),
                });
                println!("{}", serde_json::to_string(&output)?);
            } else {
                println!(
                    "✓ Wrote manifest {} ({} assets)",
                    path.display(),
                    manifest.assets.len()
                );
            }
        }
        None => print!("{content}"),
    }

    Ok(())
}

fn cmd_build(
    config: &Config,
    fs: &dyn FileSystem,
    manifest_path: Option<&Path>,
    dry_run: bool,
    json: bool,
) -> Result<()> {
    let assets = match manifest_path {
        Some(path) => {
            let content = fs
                .read_to_string(path)
                .with_context(|| format!("failed to read manifest {}", path.display()))?;
            Manifest::from_json(&content, path)?.select(config, path)?
        }
        None => gzembed::compress_assets(config, fs)?.decode_all()?,
    };

    let plans = gzembed::plan_outputs(config, &assets);
    let written = if dry_run {
        Vec::new()
    } else {
        gzembed::write_outputs(fs, &plans)?
    };

    if json {
        let output = serde_json::json!({
            "event": "build",
            "dry_run": dry_run,
            "planned": plans.iter().map(|p| p.path.display().to_string()).collect::<Vec<_>>(),
            "written": written.len(),
        });
        println!("{}", serde_json::to_string(&output)?);
    } else if dry_run {
        for plan in &plans {
            println!(
                "Would write {} ({})",
                plan.path.display(),
                plan.assets.join(", ")
            );
        }
    } else {
        print_written(&plans);
    }

    Ok(())
}

fn cmd_check(config: &Config, fs: &dyn FileSystem, show_diff: bool, json: bool) -> Result<()> {
    let manifest = gzembed::compress_assets(config, fs)?;
    let plans = gzembed::plan_outputs(config, &manifest.decode_all()?);
    let statuses = gzembed::check_outputs(fs, &plans)?;

    let outdated = statuses
        .iter()
        .filter(|s| s.state != OutputState::UpToDate)
        .count();

    if json {
        let files: Vec<_> = statuses
            .iter()
            .map(|s| {
                serde_json::json!({
                    "path": s.path.display().to_string(),
                    "state": state_label(s.state),
                })
            })
            .collect();
        let output = serde_json::json!({
            "event": "check",
            "files": files,
            "success": outdated == 0,
        });
        println!("{}", serde_json::to_string(&output)?);
    } else {
        for status in &statuses {
            let icon = match status.state {
                OutputState::UpToDate => "✓",
                OutputState::Stale => "✗",
                OutputState::Missing => "⚠",
            };
            println!("{} {} ({})", icon, status.path.display(), state_label(status.state));
            if show_diff {
                if let Some(diff) = &status.diff {
                    print!("{diff}");
                }
            }
        }
    }

    if outdated > 0 {
        if !json {
            println!();
            println!("{outdated} generated file(s) out of date. Run `gzembed build`.");
        }
        std::process::exit(1);
    }

    Ok(())
}

fn state_label(state: OutputState) -> &'static str {
    match state {
        OutputState::UpToDate => "up to date",
        OutputState::Stale => "stale",
        OutputState::Missing => "missing",
    }
}

fn print_written(plans: &[PlannedOutput]) {
    for plan in plans {
        println!("✓ Wrote {} ({})", plan.path.display(), plan.assets.join(", "));
    }
}
