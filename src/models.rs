//! Core data models for gzembed
//!
//! - `NamedTextAsset`: raw text pulled out of a firmware source literal
//! - `CompressedAsset`: the gzip bytes of one asset, ready for embedding

use std::path::PathBuf;

/// Suffix appended to an asset name for its byte array identifier
pub const ARRAY_SUFFIX: &str = "_gz";

/// Suffix appended to an asset name for its length constant identifier
pub const LEN_SUFFIX: &str = "_gz_len";

/// Raw text of one asset, as extracted from a source file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedTextAsset {
    /// C identifier of the literal (e.g. `htmlPage`)
    pub name: String,

    /// Path of the file the literal was found in
    pub source_path: PathBuf,

    /// Literal body, byte-for-byte
    pub raw_text: String,
}

impl NamedTextAsset {
    pub fn new(
        name: impl Into<String>,
        source_path: impl Into<PathBuf>,
        raw_text: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            source_path: source_path.into(),
            raw_text: raw_text.into(),
        }
    }
}

/// Gzip-compressed bytes of one asset
///
/// The length is always `bytes.len()`; it is not stored separately so it
/// cannot drift.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressedAsset {
    /// C identifier of the source literal
    pub name: String,

    /// Gzip container bytes
    pub bytes: Vec<u8>,
}

impl CompressedAsset {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    /// Byte count of the compressed data
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Identifier of the generated byte array (`<name>_gz`)
    pub fn array_ident(&self) -> String {
        format!("{}{}", self.name, ARRAY_SUFFIX)
    }

    /// Identifier of the generated length constant (`<name>_gz_len`)
    pub fn len_ident(&self) -> String {
        format!("{}{}", self.name, LEN_SUFFIX)
    }
}
