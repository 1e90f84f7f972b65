//! Raw literal extraction
//!
//! Pulls the body of `const char <name>[] PROGMEM = R"<delim>(...)<delim>";`
//! declarations out of a firmware source file.

use std::path::Path;

use regex::Regex;
use tracing::debug;

use crate::error::{GzembedError, GzembedResult};
use crate::models::NamedTextAsset;

/// Build the pattern matching one named raw literal
///
/// The body capture is non-greedy and spans lines, so it stops at the first
/// closing `)<delim>"`.
pub fn literal_pattern(name: &str, delimiter: &str) -> GzembedResult<Regex> {
    let name = regex::escape(name);
    let delim = regex::escape(delimiter);
    let pattern = format!(
        r#"(?s)const\s+char\s+{name}\s*\[\s*\]\s*PROGMEM\s*=\s*R"{delim}\((.*?)\){delim}"\s*;"#
    );
    Ok(Regex::new(&pattern)?)
}

/// Extract one asset literal from `content`
///
/// Exactly one declaration must exist: zero is `NotFound`, more than one is
/// `AmbiguousAsset`.
pub fn extract_asset(
    content: &str,
    name: &str,
    delimiter: &str,
    source_path: &Path,
) -> GzembedResult<NamedTextAsset> {
    let re = literal_pattern(name, delimiter)?;
    let mut bodies = re
        .captures_iter(content)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()));

    let body = bodies.next().ok_or_else(|| GzembedError::NotFound {
        name: name.to_string(),
        path: source_path.to_path_buf(),
    })?;

    let extra = bodies.count();
    if extra > 0 {
        return Err(GzembedError::AmbiguousAsset {
            name: name.to_string(),
            path: source_path.to_path_buf(),
            count: extra + 1,
        });
    }

    debug!(asset = name, bytes = body.len(), "extracted literal");
    Ok(NamedTextAsset::new(name, source_path, body))
}

/// Extract every asset in `names`, preserving order
///
/// Fails on the first missing asset rather than returning a partial list.
pub fn extract_assets(
    content: &str,
    names: &[&str],
    delimiter: &str,
    source_path: &Path,
) -> GzembedResult<Vec<NamedTextAsset>> {
    names
        .iter()
        .map(|name| extract_asset(content, name, delimiter, source_path))
        .collect()
}
