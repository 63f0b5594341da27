//! Compiles every positive conformance fixture and validates the resulting
//! document against the schema at docs/document-schema.json.

use graphlang_core::{compile_file, CompileOptions};
use std::path::{Path, PathBuf};

fn manifest_path(rel: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join(rel)
}

fn load_validator() -> jsonschema::Validator {
    let schema_path = manifest_path("../../docs/document-schema.json");
    let schema_src = std::fs::read_to_string(&schema_path)
        .unwrap_or_else(|e| panic!("Failed to read schema at {}: {}", schema_path.display(), e));
    let schema_value: serde_json::Value = serde_json::from_str(&schema_src).unwrap();
    jsonschema::validator_for(&schema_value)
        .unwrap_or_else(|e| panic!("Failed to compile schema: {}", e))
}

fn collect_sources(dir: &Path) -> Vec<PathBuf> {
    let mut paths: Vec<_> = std::fs::read_dir(dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.extension().is_some_and(|e| e == "graphlang"))
        .collect();
    paths.sort();
    paths
}

#[test]
fn validate_all_positive_outputs_against_schema() {
    let validator = load_validator();
    let options = CompileOptions {
        stdlib_dir: manifest_path("../../conformance/stdlib"),
        ..CompileOptions::default()
    };

    let mut tested = 0usize;
    let mut failures = Vec::new();
    for path in collect_sources(&manifest_path("../../conformance/positive")) {
        match compile_file(&path, &options) {
            Ok(doc) => {
                if let Err(error) = validator.validate(&doc.to_json_value()) {
                    failures.push(format!("{}: {}", path.display(), error));
                }
            }
            Err(e) => failures.push(format!("{}: compile failed: {}", path.display(), e)),
        }
        tested += 1;
    }

    assert!(tested > 0, "No conformance sources found -- check paths");
    assert!(
        failures.is_empty(),
        "Schema validation failed for {} of {} files:\n{}",
        failures.len(),
        tested,
        failures.join("\n")
    );
}

#[test]
fn schema_rejects_malformed_documents() {
    let validator = load_validator();
    let mut doc = graphlang_core::Document::new().to_json_value();
    doc["version"] = serde_json::json!(10);
    assert!(validator.validate(&doc).is_err());

    let mut doc = graphlang_core::compile("a = 1", &CompileOptions::default())
        .unwrap()
        .to_json_value();
    doc["expressions"]["list"][0]["folderId"] = serde_json::json!("0");
    assert!(validator.validate(&doc).is_err());
}

#[test]
fn negative_fixtures_fail_with_expected_message() {
    let dir = manifest_path("../../conformance/negative");
    let options = CompileOptions {
        stdlib_dir: manifest_path("../../conformance/stdlib"),
        ..CompileOptions::default()
    };

    let mut tested = 0usize;
    for path in collect_sources(&dir) {
        let expected_path = path.with_extension("expected-error.txt");
        let expected = std::fs::read_to_string(&expected_path)
            .unwrap_or_else(|e| panic!("Missing {}: {}", expected_path.display(), e));
        let err = compile_file(&path, &options)
            .expect_err(&format!("{} should fail", path.display()));
        assert!(
            err.message.contains(expected.trim()),
            "{}: expected error containing {:?}, got {:?}",
            path.display(),
            expected.trim(),
            err.message
        );
        assert!(err.line > 0, "{}: error has no line", path.display());
        tested += 1;
    }
    assert!(tested > 0, "No negative fixtures found -- check paths");
}
