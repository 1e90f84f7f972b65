//! Property tests for the hex listing format.

use std::path::Path;

use proptest::prelude::*;

use gzembed::listing::render_block;
use gzembed::{parse_hex, parse_listing, render_hex, CompressedAsset};

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: rendered hex parses back to the same bytes.
    #[test]
    fn property_hex_round_trip(
        bytes in proptest::collection::vec(any::<u8>(), 0..512),
        per_line in 1usize..32,
    ) {
        let text = render_hex(&bytes, per_line);
        prop_assert_eq!(parse_hex("page", &text).unwrap(), bytes);
    }

    /// PROPERTY: every line holds `per_line` entries except possibly the last.
    #[test]
    fn property_hex_wraps_every_n(
        bytes in proptest::collection::vec(any::<u8>(), 1..512),
        per_line in 1usize..32,
    ) {
        let text = render_hex(&bytes, per_line);
        let lines: Vec<&str> = text.lines().collect();

        prop_assert_eq!(lines.len(), bytes.len().div_ceil(per_line));
        for line in &lines[..lines.len() - 1] {
            prop_assert_eq!(line.matches("0x").count(), per_line);
            prop_assert!(line.starts_with("  0x"));
            prop_assert!(line.ends_with(','));
        }
        prop_assert!(!lines[lines.len() - 1].ends_with(','));
    }

    /// PROPERTY: a listing block declares exactly as many bytes as it lists.
    #[test]
    fn property_block_length_matches(
        bytes in proptest::collection::vec(any::<u8>(), 0..256),
        per_line in 1usize..24,
    ) {
        let asset = CompressedAsset::new("htmlPage", bytes.clone());
        let block = render_block(&asset, per_line);

        let declared = format!("const size_t htmlPage_gz_len = {};", bytes.len());
        prop_assert!(block.contains(&declared));
        prop_assert_eq!(block.matches("0x").count(), bytes.len());
    }

    /// PROPERTY: parse_listing returns requested order regardless of block order.
    #[test]
    fn property_listing_order_follows_names(
        primary in proptest::collection::vec(any::<u8>(), 1..128),
        secondary in proptest::collection::vec(any::<u8>(), 1..128),
        swap in any::<bool>(),
    ) {
        let a = CompressedAsset::new("htmlPage", primary.clone());
        let b = CompressedAsset::new("apHtmlPage", secondary.clone());
        let content = if swap {
            format!("{}\n{}", render_block(&b, 12), render_block(&a, 12))
        } else {
            format!("{}\n{}", render_block(&a, 12), render_block(&b, 12))
        };

        let parsed = parse_listing(&content, &["htmlPage", "apHtmlPage"], Path::new("listing.txt"))
            .unwrap();
        prop_assert_eq!(&parsed[0].bytes, &primary);
        prop_assert_eq!(&parsed[1].bytes, &secondary);
    }

    /// PROPERTY: `parse_hex` never panics on arbitrary input.
    #[test]
    fn property_parse_hex_never_panics(text in "(?s).{0,256}") {
        let _ = parse_hex("page", &text);
    }
}
