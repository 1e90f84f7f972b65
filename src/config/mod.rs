//! Configuration module for gzembed
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (GZEMBED_*)
//! 3. Config file (gzembed.toml)
//! 4. Built-in defaults (lowest priority)

mod loader;
mod types;

pub use loader::{with_overrides_from, ConfigWarning};
pub use types::{
    AssetConfig, CompressionConfig, Config, ExtractConfig, ListingConfig, OutputConfig,
    DEFAULT_CONFIG_FILE, MAX_LEVEL,
};
pub(crate) use types::is_c_identifier;
