//! Compressed asset manifest
//!
//! JSON intermediate representation between compression and rendering.
//! Each entry carries the gzip bytes as a lowercase hex string together
//! with enough metadata to verify them on load:
//!
//! ```json
//! {
//!   "version": 1,
//!   "compression_level": 6,
//!   "assets": [
//!     {
//!       "name": "htmlPage",
//!       "source": "src/web_pages.cpp",
//!       "output": "src/web_pages_gz.cpp",
//!       "length": 31,
//!       "sha256": "sha256:…",
//!       "gzip": "1f8b0800…"
//!     }
//!   ]
//! }
//! ```

use std::collections::HashSet;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::compress::verify_gzip;
use crate::config::{is_c_identifier, AssetConfig, Config};
use crate::error::{GzembedError, GzembedResult};
use crate::models::{CompressedAsset, NamedTextAsset};

/// Current manifest format version
pub const MANIFEST_VERSION: u32 = 1;

/// Prefix for SHA-256 digests
const HASH_PREFIX: &str = "sha256:";

/// One compressed asset and where it belongs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub name: String,
    pub source: PathBuf,
    pub output: PathBuf,
    /// Compressed byte count
    pub length: usize,
    /// Digest of the uncompressed text
    pub sha256: String,
    /// Compressed bytes, lowercase hex
    pub gzip: String,
}

impl ManifestEntry {
    pub fn new(
        asset: &AssetConfig,
        text: &NamedTextAsset,
        compressed: &CompressedAsset,
    ) -> Self {
        Self {
            name: asset.name.clone(),
            source: asset.source.clone(),
            output: asset.output.clone(),
            length: compressed.len(),
            sha256: content_hash(text.raw_text.as_bytes()),
            gzip: encode_hex(&compressed.bytes),
        }
    }

    /// Decode and verify the entry's bytes
    ///
    /// Checks, in order: hex well-formedness, `length`, gzip validity and
    /// the digest of the decompressed text.
    pub fn decode(&self) -> GzembedResult<CompressedAsset> {
        let bytes = decode_hex(&self.name, &self.gzip)?;
        if bytes.len() != self.length {
            return Err(GzembedError::mismatch(
                &self.name,
                format!("declared length {}, found {} bytes", self.length, bytes.len()),
            ));
        }

        let asset = CompressedAsset::new(self.name.clone(), bytes);
        let text = verify_gzip(&asset)?;
        let actual = content_hash(&text);
        if actual != self.sha256 {
            return Err(GzembedError::mismatch(
                &self.name,
                format!("content digest {actual} does not match {}", self.sha256),
            ));
        }

        Ok(asset)
    }

    pub fn asset_config(&self) -> AssetConfig {
        AssetConfig::new(self.name.clone(), self.source.clone(), self.output.clone())
    }
}

/// Ordered set of compressed assets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub version: u32,
    pub compression_level: u32,
    pub assets: Vec<ManifestEntry>,
}

impl Manifest {
    pub fn new(compression_level: u32) -> Self {
        Self {
            version: MANIFEST_VERSION,
            compression_level,
            assets: Vec::new(),
        }
    }

    pub fn push(&mut self, entry: ManifestEntry) {
        self.assets.push(entry);
    }

    /// Pretty JSON with a trailing newline
    pub fn to_json(&self) -> GzembedResult<String> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        Ok(json)
    }

    /// Parse and structurally validate a manifest
    ///
    /// Byte-level checks happen in [`ManifestEntry::decode`].
    pub fn from_json(content: &str, file: &Path) -> GzembedResult<Self> {
        let invalid = |message: String| GzembedError::InvalidManifest {
            file: file.to_path_buf(),
            message,
        };

        let manifest: Manifest =
            serde_json::from_str(content).map_err(|e| invalid(e.to_string()))?;

        if manifest.version != MANIFEST_VERSION {
            return Err(invalid(format!(
                "unsupported version {}, expected {MANIFEST_VERSION}",
                manifest.version
            )));
        }
        if manifest.assets.is_empty() {
            return Err(invalid("no assets".into()));
        }
        let mut seen = HashSet::new();
        for entry in &manifest.assets {
            if !is_c_identifier(&entry.name) {
                return Err(invalid(format!(
                    "asset name '{}' is not a C identifier",
                    entry.name
                )));
            }
            if !seen.insert(entry.name.as_str()) {
                return Err(invalid(format!("asset '{}' is listed twice", entry.name)));
            }
        }

        Ok(manifest)
    }

    /// Decode the configured assets, in config order
    ///
    /// Every configured name must have an entry; entries the config does not
    /// name are ignored. `file` is the manifest path used in `NotFound`.
    pub fn select(
        &self,
        config: &Config,
        file: &Path,
    ) -> GzembedResult<Vec<(AssetConfig, CompressedAsset)>> {
        config
            .assets
            .iter()
            .map(|asset| {
                let mut matches = self.assets.iter().filter(|e| e.name == asset.name);
                let entry = match (matches.next(), matches.next()) {
                    (Some(entry), None) => entry,
                    (None, _) => {
                        return Err(GzembedError::NotFound {
                            name: asset.name.clone(),
                            path: file.to_path_buf(),
                        })
                    }
                    (Some(_), Some(_)) => {
                        return Err(GzembedError::AmbiguousAsset {
                            name: asset.name.clone(),
                            path: file.to_path_buf(),
                            count: 2 + matches.count(),
                        })
                    }
                };
                Ok((entry.asset_config(), entry.decode()?))
            })
            .collect()
    }

    /// Decode every entry, keeping manifest order
    pub fn decode_all(&self) -> GzembedResult<Vec<(AssetConfig, CompressedAsset)>> {
        self.assets
            .iter()
            .map(|entry| Ok((entry.asset_config(), entry.decode()?)))
            .collect()
    }
}

/// `sha256:<hex>` digest of `bytes`
pub fn content_hash(bytes: &[u8]) -> String {
    format!("{}{:x}", HASH_PREFIX, Sha256::digest(bytes))
}

fn encode_hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        let _ = write!(out, "{byte:02x}");
    }
    out
}

fn decode_hex(name: &str, hex: &str) -> GzembedResult<Vec<u8>> {
    if hex.len() % 2 != 0 || !hex.is_ascii() {
        return Err(GzembedError::mismatch(name, "gzip field is not a hex string"));
    }

    (0..hex.len())
        .step_by(2)
        .map(|i| {
            let pair = &hex[i..i + 2];
            let invalid = || GzembedError::mismatch(name, format!("invalid hex '{pair}'"));
            if !pair.bytes().all(|b| b.is_ascii_hexdigit()) {
                return Err(invalid());
            }
            u8::from_str_radix(pair, 16).map_err(|_| invalid())
        })
        .collect()
}
