//! Gzip compression of asset text
//!
//! Output is deterministic for a given level: the gzip header carries no
//! file name and a zero modification time.

use std::io::{Read, Write};

use flate2::read::GzDecoder;
use flate2::{Compression, GzBuilder};
use tracing::debug;

use crate::error::{GzembedError, GzembedResult};
use crate::models::{CompressedAsset, NamedTextAsset};

/// Gzip-compress `bytes` at `level` (0..=9)
pub fn gzip(bytes: &[u8], level: u32) -> GzembedResult<Vec<u8>> {
    let mut encoder = GzBuilder::new()
        .mtime(0)
        .write(Vec::new(), Compression::new(level));
    encoder.write_all(bytes)?;
    Ok(encoder.finish()?)
}

/// Decompress a complete gzip stream
pub fn gunzip(bytes: &[u8]) -> GzembedResult<Vec<u8>> {
    let mut decoder = GzDecoder::new(bytes);
    let mut out = Vec::new();
    decoder.read_to_end(&mut out)?;
    Ok(out)
}

/// Compress one extracted asset
pub fn compress_asset(asset: &NamedTextAsset, level: u32) -> GzembedResult<CompressedAsset> {
    let bytes = gzip(asset.raw_text.as_bytes(), level)?;
    debug!(
        asset = %asset.name,
        raw = asset.raw_text.len(),
        compressed = bytes.len(),
        level,
        "compressed asset"
    );
    Ok(CompressedAsset::new(asset.name.clone(), bytes))
}

/// Check that `asset` is a well-formed gzip stream and return its contents
pub fn verify_gzip(asset: &CompressedAsset) -> GzembedResult<Vec<u8>> {
    gunzip(&asset.bytes)
        .map_err(|e| GzembedError::mismatch(&asset.name, format!("bytes are not valid gzip: {e}")))
}
