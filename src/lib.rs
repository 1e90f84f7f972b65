//! gzembed - embed gzip-compressed web assets in firmware sources
//!
//! Extracts HTML pages stored as raw string literals in a firmware source
//! file, gzip-compresses them, and renders them as `PROGMEM` byte arrays in a
//! generated source file.

pub mod assemble;
pub mod compress;
pub mod config;
pub mod error;
pub mod extract;
pub mod fs;
pub mod listing;
pub mod manifest;
pub mod models;
pub mod pipeline;
pub mod render;
pub mod writer;

// Re-exports for convenience
pub use assemble::{assemble, decode_listing};
pub use compress::{compress_asset, gunzip, gzip, verify_gzip};
pub use config::{AssetConfig, Config};
pub use error::{GzembedError, GzembedResult};
pub use extract::{extract_asset, extract_assets};
pub use fs::{FileSystem, LocalFs, MockFileSystem};
pub use listing::{parse_hex, parse_listing, render_hex, render_listing};
pub use manifest::{Manifest, ManifestEntry};
pub use models::{CompressedAsset, NamedTextAsset};
pub use pipeline::{
    check_outputs, compress_assets, plan_outputs, write_outputs, OutputState, OutputStatus,
    PlannedOutput,
};
pub use render::render_source;
