//! Test utilities: metadata fixtures and emission shortcuts.

use std::io::Write;

use dtsgen_core::{ClassMetadata, MetaDb};

use crate::typegen::typescript::{self, Config};

/// Root directory fixture databases claim to be loaded from.
pub const FIXTURE_ROOT: &str = "source/class";

/// Deserialize a metadata record written with `serde_json::json!`.
pub fn meta(value: serde_json::Value) -> ClassMetadata {
    serde_json::from_value(value).expect("fixture metadata must deserialize")
}

/// Database over the given records.
pub fn db(records: impl IntoIterator<Item = serde_json::Value>) -> MetaDb {
    MetaDb::from_classes(FIXTURE_ROOT, records.into_iter().map(meta))
        .expect("fixture classes must be unique")
}

/// Emit `db` with a one-line base template, returning the output with the
/// header and template stripped so snapshots show only class declarations.
pub fn emit_classes(db: &MetaDb, config: Config) -> String {
    let mut template = tempfile::NamedTempFile::new().expect("temp file");
    write!(template, "// base").expect("write template");

    let config = config.timestamp("TIMESTAMP").base_template(template.path());
    let output = typescript::emit(db, &config).expect("emission succeeds");

    output
        .strip_prefix("// Generated declaration file at TIMESTAMP\n// base\n")
        .expect("header and template come first")
        .to_string()
}

/// Declaration lines of one emitted class: the constructor, member
/// signatures (suppressed ones included) and mixin markers. Doc blocks are
/// left out.
pub fn class_body<'o>(output: &'o str, class_name: &str) -> Vec<&'o str> {
    let marker = format!("  // {class_name}");
    output
        .lines()
        .skip_while(|line| *line != marker)
        .skip(2)
        .take_while(|line| *line != "  }")
        .filter(|line| {
            line.strip_prefix("    ")
                .is_some_and(|rest| !rest.starts_with(' ') && !rest.starts_with("/**"))
        })
        .map(str::trim)
        .collect()
}
