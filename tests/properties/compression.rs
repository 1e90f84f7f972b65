//! Property tests for gzip compression and the generated source.

use std::path::PathBuf;

use proptest::prelude::*;

use gzembed::{
    compress_assets, gunzip, gzip, plan_outputs, render_listing, CompressedAsset, Config,
    FileSystem, MockFileSystem,
};

fn page_text() -> impl Strategy<Value = String> {
    // Literal bodies never contain the closing delimiter
    proptest::string::string_regex("[A-Za-z0-9 <>/=\"'\\n\\t#{}();:.-]{0,400}")
        .unwrap()
        .prop_filter("no raw delimiter", |s| !s.contains(")rawliteral\""))
}

fn web_pages(primary: &str, secondary: &str) -> String {
    format!(
        "#include \"web_pages.h\"\n\n\
         const char htmlPage[] PROGMEM = R\"rawliteral({primary})rawliteral\";\n\n\
         const char apHtmlPage[] PROGMEM = R\"rawliteral({secondary})rawliteral\";\n"
    )
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: gunzip(gzip(x)) == x at every level.
    #[test]
    fn property_gzip_round_trip(
        bytes in proptest::collection::vec(any::<u8>(), 0..2048),
        level in 0u32..=9,
    ) {
        let compressed = gzip(&bytes, level).unwrap();
        prop_assert_eq!(compressed[..2].to_vec(), vec![0x1f_u8, 0x8b]);
        prop_assert_eq!(gunzip(&compressed).unwrap(), bytes);
    }

    /// PROPERTY: compressing the same input twice yields identical bytes.
    #[test]
    fn property_gzip_deterministic(bytes in proptest::collection::vec(any::<u8>(), 0..1024)) {
        prop_assert_eq!(gzip(&bytes, 6).unwrap(), gzip(&bytes, 6).unwrap());
    }

    /// PROPERTY: extracted pages decompress back to their literal text.
    #[test]
    fn property_pipeline_preserves_text(primary in page_text(), secondary in page_text()) {
        let config = Config::default();
        let fs = MockFileSystem::new()
            .with_file("src/web_pages.cpp", web_pages(&primary, &secondary));

        let manifest = compress_assets(&config, &fs).unwrap();
        let decoded = manifest.decode_all().unwrap();

        prop_assert_eq!(decoded.len(), 2);
        prop_assert_eq!(gunzip(&decoded[0].1.bytes).unwrap(), primary.into_bytes());
        prop_assert_eq!(gunzip(&decoded[1].1.bytes).unwrap(), secondary.into_bytes());
    }

    /// PROPERTY: building twice from the same sources gives identical output.
    #[test]
    fn property_build_is_idempotent(primary in page_text(), secondary in page_text()) {
        let config = Config::default();
        let fs = MockFileSystem::new()
            .with_file("src/web_pages.cpp", web_pages(&primary, &secondary));

        let first = plan_outputs(&config, &compress_assets(&config, &fs).unwrap().decode_all().unwrap());
        let second = plan_outputs(&config, &compress_assets(&config, &fs).unwrap().decode_all().unwrap());

        prop_assert_eq!(first.len(), 1);
        prop_assert_eq!(&first[0].path, &PathBuf::from("src/web_pages_gz.cpp"));
        prop_assert_eq!(&first[0].content, &second[0].content);
        prop_assert!(!fs.exists(&first[0].path));
    }

    /// PROPERTY: a listing assembled from extracted bytes decodes unchanged.
    #[test]
    fn property_listing_assemble_round_trip(primary in page_text(), secondary in page_text()) {
        let config = Config::default();
        let assets = vec![
            CompressedAsset::new("htmlPage", gzip(primary.as_bytes(), 6).unwrap()),
            CompressedAsset::new("apHtmlPage", gzip(secondary.as_bytes(), 6).unwrap()),
        ];
        let listing = render_listing(&assets, config.listing.bytes_per_line);

        let decoded = gzembed::decode_listing(
            &config,
            &listing,
            std::path::Path::new("web_assets_gzipped_fix.txt"),
            None,
        )
        .unwrap();

        prop_assert_eq!(&decoded[0].1.bytes, &assets[0].bytes);
        prop_assert_eq!(&decoded[1].1.bytes, &assets[1].bytes);
    }
}
