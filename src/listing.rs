//! Hex listings
//!
//! A hex listing renders bytes as `0xhh` tokens joined by `", "`, wrapped
//! every N entries, each line indented by two spaces:
//!
//! ```text
//!   0x1f, 0x8b, 0x08, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xff, 0xb3, 0xc9,
//!   0x30, 0xb4, 0xf3
//! ```
//!
//! The listing document printed by `extract` and consumed by `assemble`
//! wraps each listing between a `// <name>_gz` marker and a
//! `const size_t <name>_gz_len = <n>;` line.

use std::fmt::Write as _;
use std::path::Path;

use regex::Regex;

use crate::error::{GzembedError, GzembedResult};
use crate::models::{CompressedAsset, ARRAY_SUFFIX, LEN_SUFFIX};

/// Render `bytes` as a wrapped hex listing
pub fn render_hex(bytes: &[u8], bytes_per_line: usize) -> String {
    let per_line = bytes_per_line.max(1);
    let mut out = String::with_capacity(bytes.len() * 6 + bytes.len() / per_line * 4);

    for (i, chunk) in bytes.chunks(per_line).enumerate() {
        if i > 0 {
            out.push_str(",\n");
        }
        out.push_str("  ");
        for (j, byte) in chunk.iter().enumerate() {
            if j > 0 {
                out.push_str(", ");
            }
            let _ = write!(out, "0x{byte:02x}");
        }
    }

    out
}

/// Parse a hex listing back into bytes
///
/// Accepts any whitespace layout and a trailing comma. Anything that is not
/// a `0x` token of one or two hex digits is a `FormatMismatch`.
pub fn parse_hex(name: &str, text: &str) -> GzembedResult<Vec<u8>> {
    text.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| parse_token(name, token))
        .collect()
}

fn parse_token(name: &str, token: &str) -> GzembedResult<u8> {
    let digits = token
        .strip_prefix("0x")
        .or_else(|| token.strip_prefix("0X"))
        .filter(|d| (1..=2).contains(&d.len()) && d.bytes().all(|b| b.is_ascii_hexdigit()))
        .ok_or_else(|| GzembedError::mismatch(name, format!("invalid byte token '{token}'")))?;

    u8::from_str_radix(digits, 16)
        .map_err(|_| GzembedError::mismatch(name, format!("invalid byte token '{token}'")))
}

/// Render the listing block for one asset
pub fn render_block(asset: &CompressedAsset, bytes_per_line: usize) -> String {
    format!(
        "// {}\n{}\nconst size_t {} = {};\n",
        asset.array_ident(),
        render_hex(&asset.bytes, bytes_per_line),
        asset.len_ident(),
        asset.len()
    )
}

/// Render the full listing document; every block ends with a blank line
pub fn render_listing(assets: &[CompressedAsset], bytes_per_line: usize) -> String {
    assets
        .iter()
        .map(|asset| render_block(asset, bytes_per_line) + "\n")
        .collect()
}

/// Pattern matching one listing block; group 1 is the byte text, group 2
/// the declared length
pub fn block_pattern(name: &str) -> GzembedResult<Regex> {
    let array = regex::escape(&format!("{name}{ARRAY_SUFFIX}"));
    let len = regex::escape(&format!("{name}{LEN_SUFFIX}"));
    let pattern = format!(
        r"(?s)//\s*{array}\b\s*(.*?)\s*const\s+size_t\s+{len}\s*=\s*(\d+)\s*;"
    );
    Ok(Regex::new(&pattern)?)
}

/// Locate and decode one asset's block in a listing document
///
/// The declared length must equal the number of parsed bytes.
pub fn parse_block(content: &str, name: &str, listing_path: &Path) -> GzembedResult<CompressedAsset> {
    let re = block_pattern(name)?;
    let mut matches = re.captures_iter(content);

    let caps = matches.next().ok_or_else(|| GzembedError::NotFound {
        name: name.to_string(),
        path: listing_path.to_path_buf(),
    })?;

    let extra = matches.count();
    if extra > 0 {
        return Err(GzembedError::AmbiguousAsset {
            name: name.to_string(),
            path: listing_path.to_path_buf(),
            count: extra + 1,
        });
    }

    let body = caps.get(1).map_or("", |m| m.as_str()).trim();
    let declared_str = caps.get(2).map_or("", |m| m.as_str());
    let declared: usize = declared_str.parse().map_err(|_| {
        GzembedError::mismatch(name, format!("length '{declared_str}' is out of range"))
    })?;

    let bytes = parse_hex(name, body)?;
    if bytes.len() != declared {
        return Err(GzembedError::mismatch(
            name,
            format!("declared length {declared}, found {} bytes", bytes.len()),
        ));
    }

    Ok(CompressedAsset::new(name, bytes))
}

/// Decode every named block, in the order of `names`
pub fn parse_listing(
    content: &str,
    names: &[&str],
    listing_path: &Path,
) -> GzembedResult<Vec<CompressedAsset>> {
    names
        .iter()
        .map(|name| parse_block(content, name, listing_path))
        .collect()
}
