//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{GzembedError, GzembedResult};

use super::types::Config;

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> GzembedResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let mut config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| GzembedError::InvalidConfig {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    config.base_dir = base_dir_of(path);
    config.validate(path)?;

    let warnings: Vec<ConfigWarning> = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    for warning in &warnings {
        warn!(
            key = %warning.key,
            file = %warning.file.display(),
            line = ?warning.line,
            suggestion = ?warning.suggestion,
            "unknown config key"
        );
    }

    Ok((config, warnings))
}

/// Load `path` when present, otherwise fall back to built-in defaults
///
/// A present but broken file is an error; only absence selects defaults.
pub fn load_or_default(path: &Path) -> GzembedResult<(Config, Vec<ConfigWarning>)> {
    if path.exists() {
        return load_with_warnings(path);
    }

    debug!(path = %path.display(), "config file absent, using defaults");
    let config = Config {
        base_dir: base_dir_of(path),
        ..Config::default()
    };
    Ok((config, Vec::new()))
}

/// Apply environment variable overrides (GZEMBED_* prefix)
pub fn with_env_overrides(config: Config) -> Config {
    with_overrides_from(config, |key| std::env::var(key).ok())
}

/// Apply overrides from an arbitrary variable source
///
/// Unparseable or out-of-range values are ignored.
pub fn with_overrides_from(mut config: Config, var: impl Fn(&str) -> Option<String>) -> Config {
    // GZEMBED_LEVEL
    if let Some(level) = var("GZEMBED_LEVEL").and_then(|v| v.trim().parse::<u32>().ok()) {
        if level <= super::types::MAX_LEVEL {
            config.compression.level = level;
        }
    }

    // GZEMBED_BYTES_PER_LINE
    if let Some(n) = var("GZEMBED_BYTES_PER_LINE").and_then(|v| v.trim().parse::<usize>().ok()) {
        if n > 0 {
            config.listing.bytes_per_line = n;
        }
    }

    config
}

fn base_dir_of(path: &Path) -> PathBuf {
    path.parent().map(Path::to_path_buf).unwrap_or_default()
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    for (i, line) in content.lines().enumerate() {
        if line.contains(needle) {
            return Some(i + 1);
        }
    }
    None
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "compression",
        "level",
        "listing",
        "bytes_per_line",
        "extract",
        "delimiter",
        "output",
        "header",
        "platform_header",
        "storage",
        "assets",
        "name",
        "source",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            curr[j + 1] =
                std::cmp::min(std::cmp::min(prev[j + 1] + 1, curr[j] + 1), prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
