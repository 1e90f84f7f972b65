//! Scenario: an asset literal or listing block is missing.
//!
//! Success Criteria:
//! - Non-zero exit with the asset name in the diagnostic
//! - No generated file and no partial listing

use crate::common::*;

/// SCENARIO: extract fails when the access-point literal is absent.
#[test]
fn scenario_extract_missing_ap_page() {
    let env = TestEnv::with_web_pages(WEB_PAGES_CPP_NO_AP);

    let result = env.run(&["extract"]);

    assert!(!result.success, "extract should fail");
    assert!(
        result.stderr.contains("apHtmlPage"),
        "diagnostic should name the asset; got:\n{}",
        result.stderr
    );
    assert!(
        result.stdout.is_empty(),
        "no partial listing expected; got:\n{}",
        result.stdout
    );
}

/// SCENARIO: build fails and leaves no output with one asset missing.
#[test]
fn scenario_build_missing_ap_page_writes_nothing() {
    let env = TestEnv::with_web_pages(WEB_PAGES_CPP_NO_AP);

    let result = env.run(&["build"]);

    assert!(!result.success);
    assert!(result.stderr.contains("not found"), "stderr:\n{}", result.stderr);
    assert!(!env.exists("src/web_pages_gz.cpp"));
}

/// SCENARIO: assemble fails on a listing holding only one block.
#[test]
fn scenario_assemble_partial_listing() {
    let env = TestEnv::with_web_pages(WEB_PAGES_CPP);
    let extract = env.run(&["extract"]);
    let primary_only = extract
        .stdout
        .split("// apHtmlPage_gz")
        .next()
        .unwrap()
        .to_string();
    env.write_project_file("web_assets_gzipped_fix.txt", &primary_only);

    let result = env.run(&["assemble"]);

    assert!(!result.success);
    assert!(result.stderr.contains("apHtmlPage"), "stderr:\n{}", result.stderr);
    assert!(!env.exists("src/web_pages_gz.cpp"));
}

/// SCENARIO: a listing whose length line was not updated is rejected.
#[test]
fn scenario_assemble_length_mismatch() {
    let env = TestEnv::with_web_pages(WEB_PAGES_CPP);
    let extract = env.run(&["extract"]);
    let tampered = extract
        .stdout
        .replacen("const size_t htmlPage_gz_len = ", "const size_t htmlPage_gz_len = 1", 1);
    env.write_project_file("web_assets_gzipped_fix.txt", &tampered);

    let result = env.run(&["assemble"]);

    assert!(!result.success);
    assert!(
        result.stderr.contains("format mismatch"),
        "stderr:\n{}",
        result.stderr
    );
    assert!(!env.exists("src/web_pages_gz.cpp"));
}

/// SCENARIO: assemble without the intermediate file reports the IO error.
#[test]
fn scenario_assemble_without_listing_file() {
    let env = TestEnv::with_web_pages(WEB_PAGES_CPP);

    let result = env.run(&["assemble"]);

    assert!(!result.success);
    assert!(
        result.stderr.contains("web_assets_gzipped_fix.txt"),
        "stderr:\n{}",
        result.stderr
    );
}
