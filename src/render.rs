//! Generated source file template

use crate::config::OutputConfig;
use crate::listing::render_hex;
use crate::models::CompressedAsset;

/// Render the embedded asset source file
///
/// Assets appear in slice order. The result is a pure function of its
/// inputs, which keeps regeneration byte-identical.
pub fn render_source(
    assets: &[CompressedAsset],
    output: &OutputConfig,
    bytes_per_line: usize,
) -> String {
    let mut out = format!(
        "#include \"{}\"\n#include <{}>\n\n// Gzipped web assets to save memory\n",
        output.header, output.platform_header
    );

    for asset in assets {
        out.push('\n');
        out.push_str(&render_array(asset, &output.storage, bytes_per_line));
    }

    out
}

fn render_array(asset: &CompressedAsset, storage: &str, bytes_per_line: usize) -> String {
    let listing = render_hex(&asset.bytes, bytes_per_line);
    let body = if listing.is_empty() {
        String::new()
    } else {
        format!("{listing}\n")
    };

    format!(
        "// Gzipped version of {name}\nconst uint8_t {array}[] {storage} = {{\n{body}}};\nconst size_t {len} = {count};\n",
        name = asset.name,
        array = asset.array_ident(),
        len = asset.len_ident(),
        count = asset.len(),
    )
}
