//! Layering guardrails between the workspace crates.
//!
//! - `quartz_core` is vocabulary only and has no dependencies at all.
//! - `quartz_syntax` may depend on `quartz_core`, never on the compiler crate.
//! - Test-only crates stay out of the compiler's `[dependencies]`.

/// Dependency names declared in the `[dependencies]` table of a manifest.
fn dependencies(manifest: &str) -> Vec<String> {
    let mut in_dependencies = false;
    let mut names = Vec::new();

    for raw_line in manifest.lines() {
        let line = raw_line.trim();
        // Track when we enter/exit the `[dependencies]` table.
        if line.starts_with('[') {
            in_dependencies = line == "[dependencies]";
            continue;
        }
        if !in_dependencies || line.is_empty() || line.starts_with('#') {
            continue;
        }
        // Strip inline comments for robustness.
        let line_no_comment = line.split('#').next().unwrap_or("").trim();
        if let Some((name, _)) = line_no_comment.split_once('=') {
            names.push(name.trim().to_string());
        }
    }
    names
}

#[test]
fn core_has_no_dependencies() {
    let deps = dependencies(include_str!("../crates/quartz_core/Cargo.toml"));
    assert!(deps.is_empty(), "quartz_core must stay dependency-free, found: {deps:?}");
}

#[test]
fn syntax_does_not_depend_on_compiler() {
    let deps = dependencies(include_str!("../crates/quartz_syntax/Cargo.toml"));
    assert!(deps.iter().any(|d| d == "quartz_core"));
    assert!(
        !deps.iter().any(|d| d == "quartz"),
        "quartz_syntax must not depend on the compiler crate"
    );
}

#[test]
fn compiler_keeps_test_crates_in_dev_dependencies() {
    let deps = dependencies(include_str!("../Cargo.toml"));
    for dev_only in ["insta", "proptest", "tempfile"] {
        assert!(
            !deps.iter().any(|d| d == dev_only),
            "`{dev_only}` must not appear in [dependencies]; use [dev-dependencies] instead"
        );
    }
}
