//! Property tests for raw literal extraction.

use std::path::Path;

use proptest::prelude::*;

use gzembed::extract_asset;

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 96,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: the body between the delimiters comes back verbatim.
    #[test]
    fn property_extract_returns_body(
        body in proptest::string::string_regex("(?s).{0,200}")
            .unwrap()
            .prop_filter("no raw delimiter", |s| !s.contains(")rawliteral\"")),
        prefix in "[a-z /\\n]{0,40}",
    ) {
        let content = format!(
            "{prefix}\nconst char htmlPage[] PROGMEM = R\"rawliteral({body})rawliteral\";\n"
        );

        let asset = extract_asset(&content, "htmlPage", "rawliteral", Path::new("web_pages.cpp"))
            .unwrap();
        prop_assert_eq!(asset.raw_text, body);
    }

    /// PROPERTY: extraction never panics on arbitrary input.
    #[test]
    fn property_extract_never_panics(content in "(?s).{0,512}") {
        let _ = extract_asset(&content, "htmlPage", "rawliteral", Path::new("web_pages.cpp"));
    }
}
