//! Configuration type definitions

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{GzembedError, GzembedResult};

use super::loader::{self, ConfigWarning};

/// Default config file name, looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "gzembed.toml";

/// Highest gzip level accepted by deflate
pub const MAX_LEVEL: u32 = 9;

/// Compression configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompressionConfig {
    /// Deflate level, 0..=9. Different levels give different bytes for
    /// the same text, so the level is pinned here rather than left to the
    /// library default.
    #[serde(default = "default_level")]
    pub level: u32,
}

impl Default for CompressionConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

fn default_level() -> u32 {
    6
}

/// Hex listing layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingConfig {
    #[serde(default = "default_bytes_per_line")]
    pub bytes_per_line: usize,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            bytes_per_line: default_bytes_per_line(),
        }
    }
}

fn default_bytes_per_line() -> usize {
    12
}

/// Source literal syntax
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractConfig {
    /// Raw string delimiter, as in `R"rawliteral(...)rawliteral"`
    #[serde(default = "default_delimiter")]
    pub delimiter: String,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            delimiter: default_delimiter(),
        }
    }
}

fn default_delimiter() -> String {
    "rawliteral".to_string()
}

/// Generated file template settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Interface header, included with quotes
    #[serde(default = "default_header")]
    pub header: String,

    /// Platform runtime header, included with angle brackets
    #[serde(default = "default_platform_header")]
    pub platform_header: String,

    /// Storage qualifier placing arrays in flash
    #[serde(default = "default_storage")]
    pub storage: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            header: default_header(),
            platform_header: default_platform_header(),
            storage: default_storage(),
        }
    }
}

fn default_header() -> String {
    "web_pages.h".to_string()
}

fn default_platform_header() -> String {
    "Arduino.h".to_string()
}

fn default_storage() -> String {
    "PROGMEM".to_string()
}

/// One embedded asset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetConfig {
    /// C identifier of the raw literal in `source`
    pub name: String,

    /// File holding the raw literal
    pub source: PathBuf,

    /// Generated file receiving `<name>_gz` and `<name>_gz_len`
    pub output: PathBuf,
}

impl AssetConfig {
    pub fn new(
        name: impl Into<String>,
        source: impl Into<PathBuf>,
        output: impl Into<PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
            output: output.into(),
        }
    }
}

fn default_assets() -> Vec<AssetConfig> {
    vec![
        AssetConfig::new("htmlPage", "src/web_pages.cpp", "src/web_pages_gz.cpp"),
        AssetConfig::new("apHtmlPage", "src/web_pages.cpp", "src/web_pages_gz.cpp"),
    ]
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub compression: CompressionConfig,

    #[serde(default)]
    pub listing: ListingConfig,

    #[serde(default)]
    pub extract: ExtractConfig,

    #[serde(default)]
    pub output: OutputConfig,

    /// Assets in output order: primary page first
    #[serde(default = "default_assets")]
    pub assets: Vec<AssetConfig>,

    /// Directory relative paths resolve against
    #[serde(skip)]
    pub base_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            compression: CompressionConfig::default(),
            listing: ListingConfig::default(),
            extract: ExtractConfig::default(),
            output: OutputConfig::default(),
            assets: default_assets(),
            base_dir: PathBuf::new(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> GzembedResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> GzembedResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Load from `path` if it exists, otherwise built-in defaults
    pub fn load_or_default(path: &Path) -> GzembedResult<(Self, Vec<ConfigWarning>)> {
        loader::load_or_default(path)
    }

    /// Apply environment variable overrides (GZEMBED_* prefix)
    pub fn with_env_overrides(self) -> Self {
        loader::with_env_overrides(self)
    }

    /// Resolve a configured path against the config directory
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }

    /// Configured asset names, in output order
    pub fn asset_names(&self) -> Vec<&str> {
        self.assets.iter().map(|a| a.name.as_str()).collect()
    }

    /// Check values serde cannot express
    pub fn validate(&self, file: &Path) -> GzembedResult<()> {
        let invalid = |message: String| GzembedError::InvalidConfig {
            file: file.to_path_buf(),
            message,
        };

        if self.compression.level > MAX_LEVEL {
            return Err(invalid(format!(
                "compression.level must be 0..={MAX_LEVEL}, got {}",
                self.compression.level
            )));
        }
        if self.listing.bytes_per_line == 0 {
            return Err(invalid("listing.bytes_per_line must be at least 1".into()));
        }
        if !is_raw_delimiter(&self.extract.delimiter) {
            return Err(invalid(format!(
                "extract.delimiter '{}' is not a valid raw string delimiter",
                self.extract.delimiter
            )));
        }
        if self.assets.is_empty() {
            return Err(invalid("at least one [[assets]] entry is required".into()));
        }

        let mut seen = HashSet::new();
        for asset in &self.assets {
            if !is_c_identifier(&asset.name) {
                return Err(invalid(format!(
                    "asset name '{}' is not a C identifier",
                    asset.name
                )));
            }
            if !seen.insert(asset.name.as_str()) {
                return Err(invalid(format!("asset '{}' is listed twice", asset.name)));
            }
        }

        Ok(())
    }
}

pub(crate) fn is_c_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

// C++ raw string d-char-sequence: at most 16 chars, no parens, backslash or whitespace
fn is_raw_delimiter(delimiter: &str) -> bool {
    delimiter.len() <= 16
        && delimiter
            .chars()
            .all(|c| c.is_ascii_graphic() && !matches!(c, '(' | ')' | '\\' | '"'))
}
