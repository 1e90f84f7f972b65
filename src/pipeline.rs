//! Asset pipeline
//!
//! extract → compress → manifest → render → persist. Each stage is a plain
//! function so commands can stop after any of them.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use similar::TextDiff;
use tracing::{debug, info};

use crate::compress::compress_asset;
use crate::config::{AssetConfig, Config};
use crate::error::GzembedResult;
use crate::extract::extract_asset;
use crate::fs::FileSystem;
use crate::manifest::{Manifest, ManifestEntry};
use crate::models::CompressedAsset;
use crate::render::render_source;

/// A generated file ready to be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedOutput {
    pub path: PathBuf,
    pub content: String,
    /// Names of the assets in `content`, in order
    pub assets: Vec<String>,
}

/// State of a generated file on disk compared to its planned content
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputState {
    UpToDate,
    Stale,
    Missing,
}

/// Result of checking one planned output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputStatus {
    pub path: PathBuf,
    pub state: OutputState,
    /// Unified diff from the current file to the planned content (stale only)
    pub diff: Option<String>,
}

/// Extract and compress every configured asset
///
/// Each source file is read once even when several assets live in it. Fails
/// on the first missing asset; no partial manifest is returned.
pub fn compress_assets(config: &Config, fs: &dyn FileSystem) -> GzembedResult<Manifest> {
    let mut sources: HashMap<PathBuf, String> = HashMap::new();
    let mut manifest = Manifest::new(config.compression.level);

    for asset in &config.assets {
        let source_path = config.resolve(&asset.source);
        if !sources.contains_key(&source_path) {
            debug!(path = %source_path.display(), "reading source");
            let content = fs.read_to_string(&source_path)?;
            sources.insert(source_path.clone(), content);
        }
        let content = &sources[&source_path];

        let text = extract_asset(content, &asset.name, &config.extract.delimiter, &source_path)?;
        let compressed = compress_asset(&text, config.compression.level)?;
        manifest.push(ManifestEntry::new(asset, &text, &compressed));
    }

    Ok(manifest)
}

/// Group assets by output file and render each file
///
/// Files appear in order of their first asset; assets keep their relative
/// order inside a file.
pub fn plan_outputs(
    config: &Config,
    assets: &[(AssetConfig, CompressedAsset)],
) -> Vec<PlannedOutput> {
    let mut groups: Vec<(PathBuf, Vec<CompressedAsset>)> = Vec::new();

    for (asset_config, compressed) in assets {
        let path = config.resolve(&asset_config.output);
        match groups.iter_mut().find(|(p, _)| *p == path) {
            Some((_, group)) => group.push(compressed.clone()),
            None => groups.push((path, vec![compressed.clone()])),
        }
    }

    groups
        .into_iter()
        .map(|(path, group)| PlannedOutput {
            content: render_source(&group, &config.output, config.listing.bytes_per_line),
            assets: group.iter().map(|a| a.name.clone()).collect(),
            path,
        })
        .collect()
}

/// Persist planned outputs, replacing existing files
pub fn write_outputs(fs: &dyn FileSystem, plans: &[PlannedOutput]) -> GzembedResult<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(plans.len());
    for plan in plans {
        fs.write_atomic(&plan.path, &plan.content)?;
        info!(path = %plan.path.display(), assets = ?plan.assets, "wrote generated source");
        written.push(plan.path.clone());
    }
    Ok(written)
}

/// Compare planned outputs with what is on disk
pub fn check_outputs(
    fs: &dyn FileSystem,
    plans: &[PlannedOutput],
) -> GzembedResult<Vec<OutputStatus>> {
    plans
        .iter()
        .map(|plan| {
            if !fs.exists(&plan.path) {
                return Ok(OutputStatus {
                    path: plan.path.clone(),
                    state: OutputState::Missing,
                    diff: None,
                });
            }

            let current = fs.read_to_string(&plan.path)?;
            let status = if current == plan.content {
                OutputStatus {
                    path: plan.path.clone(),
                    state: OutputState::UpToDate,
                    diff: None,
                }
            } else {
                OutputStatus {
                    path: plan.path.clone(),
                    state: OutputState::Stale,
                    diff: Some(unified_diff(&plan.path, &current, &plan.content)),
                }
            };
            Ok(status)
        })
        .collect()
}

fn unified_diff(path: &Path, old: &str, new: &str) -> String {
    let path = path.display();
    TextDiff::from_lines(old, new)
        .unified_diff()
        .header(&format!("a/{path}"), &format!("b/{path}"))
        .to_string()
}
