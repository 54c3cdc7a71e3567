//! Generate Markdown reference docs from `quartz_core::lang` registries.
//!
//! This binary renders the vocabulary registries (keywords, punctuation, representation tags, builtin types)
//! into human-readable Markdown tables under `docs/reference/`.
//!
//! ## Notes
//! - The generated file is a derived artifact. Do not edit it by hand; update the registries instead.
//!
//! ## Examples
//! Run from the workspace root:
//! ```bash
//! cargo run -p quartz_core --bin generate_lang_reference
//! ```
//!
//! ## Panics
//! - If the workspace root cannot be resolved.
//! - If output files cannot be written.

use std::fs;
use std::path::{Path, PathBuf};

use quartz_core::Target;
use quartz_core::lang::types::builtins;
use quartz_core::lang::{keywords, punctuation, repr};

fn start_section(out: &mut String, heading: &str) {
    if !out.is_empty() && !out.ends_with("\n\n") {
        out.push('\n');
    }
    out.push_str(heading);
    out.push_str("\n\n");
}

fn main() {
    let root = workspace_root();

    let out_dir = root.join("docs/reference");
    fs::create_dir_all(&out_dir).expect("create docs/reference/");

    write_language_reference(&out_dir.join("language.md"));
}

/// Write `docs/reference/language.md`.
fn write_language_reference(path: &Path) {
    let mut out = String::new();
    out.push_str("# Quartz declaration reference\n\n");
    out.push_str("Generated file. Regenerate with: `cargo run -p quartz_core --bin generate_lang_reference`\n\n");

    render_keywords_section(&mut out);
    render_punctuation_section(&mut out);
    render_repr_section(&mut out);
    render_types_section(&mut out);

    fs::write(path, out).expect("write language.md");
}

fn render_keywords_section(out: &mut String) {
    start_section(out, "## Keywords");

    out.push_str("| Id | Canonical | Category | Description |\n");
    out.push_str("|----|---|---|---|\n");
    for k in keywords::KEYWORDS {
        out.push_str(&format!(
            "| {:?} | `{}` | {:?} | {} |\n",
            k.id, k.canonical, k.category, k.description
        ));
    }
}

fn render_punctuation_section(out: &mut String) {
    start_section(out, "## Punctuation");

    out.push_str("| Id | Canonical | Category |\n");
    out.push_str("|----|---|---|\n");
    for p in punctuation::PUNCTUATION {
        out.push_str(&format!("| {:?} | `{}` | {:?} |\n", p.id, p.canonical, p.category));
    }
}

fn render_repr_section(out: &mut String) {
    start_section(out, "## Representation tags");

    let target = Target::default();
    out.push_str(&format!(
        "Sizes are for the default target ({}-byte pointers).\n\n",
        target.pointer_size
    ));
    out.push_str("| Id | Spelling | Bytes | Description |\n");
    out.push_str("|----|---|---|---|\n");
    for r in repr::REPRS {
        out.push_str(&format!(
            "| {:?} | `{}` | {} | {} |\n",
            r.id,
            r.canonical,
            r.id.storage_size(target),
            r.description
        ));
    }
}

fn render_types_section(out: &mut String) {
    start_section(out, "## Builtin types");

    out.push_str("| Id | Name | Kind | Description |\n");
    out.push_str("|----|---|---|---|\n");
    for t in builtins::BUILTIN_TYPES {
        out.push_str(&format!(
            "| {:?} | `{}` | {:?} | {} |\n",
            t.id, t.canonical, t.kind, t.description
        ));
    }
}

fn workspace_root() -> PathBuf {
    // crates/quartz_core -> crates -> workspace root
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .and_then(|p| p.parent())
        .map(|p| p.to_path_buf())
        .expect("workspace root (two levels above crates/quartz_core)")
}
