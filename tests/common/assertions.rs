//! Helpers that read generated sources back into bytes.

use regex::Regex;

/// Bytes of the `<name>_gz` array in a generated source
pub fn generated_array(source: &str, name: &str) -> Vec<u8> {
    let re = Regex::new(&format!(
        r"(?s)const uint8_t {}_gz\[\] \w+ = \{{(.*?)\}};",
        regex::escape(name)
    ))
    .unwrap();
    let caps = re
        .captures(source)
        .unwrap_or_else(|| panic!("no {name}_gz array in generated source:\n{source}"));
    gzembed::parse_hex(name, &caps[1]).unwrap()
}

/// Value of the `<name>_gz_len` constant in a generated source
pub fn generated_len(source: &str, name: &str) -> usize {
    let re = Regex::new(&format!(
        r"const size_t {}_gz_len = (\d+);",
        regex::escape(name)
    ))
    .unwrap();
    let caps = re
        .captures(source)
        .unwrap_or_else(|| panic!("no {name}_gz_len in generated source:\n{source}"));
    caps[1].parse().unwrap()
}

/// Decompressed text of the `<name>_gz` array
pub fn generated_text(source: &str, name: &str) -> String {
    let bytes = generated_array(source, name);
    String::from_utf8(gzembed::gunzip(&bytes).unwrap()).unwrap()
}

/// Assert a generated source embeds `name` with the given text and a
/// length constant matching the array.
#[macro_export]
macro_rules! assert_embedded {
    ($source:expr, $name:expr, $text:expr) => {
        let bytes = $crate::common::generated_array(&$source, $name);
        assert_eq!(
            $crate::common::generated_len(&$source, $name),
            bytes.len(),
            "length constant for {} does not match its array",
            $name
        );
        assert_eq!(
            $crate::common::generated_text(&$source, $name),
            $text,
            "decompressed {} differs from the original literal",
            $name
        );
    };
}
