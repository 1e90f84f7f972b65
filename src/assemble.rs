//! Listing assembler
//!
//! Turns a hex listing document (the output of `extract`, possibly pasted
//! by hand) back into generated source files.

use std::path::Path;

use tracing::debug;

use crate::compress::verify_gzip;
use crate::config::{AssetConfig, Config};
use crate::error::GzembedResult;
use crate::fs::FileSystem;
use crate::listing::parse_listing;
use crate::models::CompressedAsset;
use crate::pipeline::{plan_outputs, PlannedOutput};

/// Decode the configured assets from a listing document
///
/// Every block must be present, its declared length must match, and its
/// bytes must be a complete gzip stream. With `output` set, all assets go
/// to that file instead of their configured outputs.
pub fn decode_listing(
    config: &Config,
    content: &str,
    listing_path: &Path,
    output: Option<&Path>,
) -> GzembedResult<Vec<(AssetConfig, CompressedAsset)>> {
    let names = config.asset_names();
    let assets = parse_listing(content, &names, listing_path)?;

    config
        .assets
        .iter()
        .zip(assets)
        .map(|(asset_config, compressed)| {
            let text = verify_gzip(&compressed)?;
            debug!(
                asset = %compressed.name,
                compressed = compressed.len(),
                raw = text.len(),
                "decoded listing block"
            );

            let mut asset_config = asset_config.clone();
            if let Some(path) = output {
                asset_config.output = path.to_path_buf();
            }
            Ok((asset_config, compressed))
        })
        .collect()
}

/// Read a listing file and plan the generated sources
pub fn assemble(
    config: &Config,
    fs: &dyn FileSystem,
    listing_path: &Path,
    output: Option<&Path>,
) -> GzembedResult<Vec<PlannedOutput>> {
    let content = fs.read_to_string(listing_path)?;
    let assets = decode_listing(config, &content, listing_path, output)?;
    Ok(plan_outputs(config, &assets))
}
