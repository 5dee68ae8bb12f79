//! CLI end-to-end tests.
//!
//! These tests spawn the actual `decode` binary against a temporary project
//! and validate stdout and exit codes.
//!
//! Exit code expectations:
//! - 0: Success
//! - 2: Invalid arguments or configuration
//! - 3: Resolution error (reference not found)
//! - 4: Coverage below threshold

use std::fs;
use std::path::Path;
use std::process::Command;

use serde_json::Value;
use tempfile::TempDir;

/// Run decode in `dir` and return (stdout, stderr, exit_code).
fn run_decode(dir: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_decode"))
        .args(args)
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to execute decode");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let exit_code = output.status.code().unwrap_or(-1);

    (stdout, stderr, exit_code)
}

fn json(stdout: &str) -> Value {
    serde_json::from_str(stdout).expect("stdout should be valid JSON")
}

/// A small project with one undocumented method.
fn project() -> TempDir {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("lib/store")).unwrap();
    fs::write(
        temp.path().join("lib/store.rb"),
        "\
# Persistent storage.
module Store
  # A key value table.
  class Table
    # Fetch a value, see {Table#put}.
    # @parameter key [String] The key.
    # @returns [Object | Nil] The stored value.
    def get(key)
    end

    def put(key, value)
    end
  end
end
",
    )
    .unwrap();
    fs::write(
        temp.path().join("lib/store/version.rb"),
        "module Store\n  # The release.\n  VERSION = \"1.0.0\"\nend\n",
    )
    .unwrap();
    temp
}

// ============================================================================
// Coverage
// ============================================================================

#[test]
fn coverage_below_threshold_exits_4() {
    let temp = project();
    let (stdout, _stderr, exit_code) = run_decode(temp.path(), &["--format", "json", "coverage"]);

    assert_eq!(exit_code, 4, "expected exit code 4, got {}", exit_code);
    let report = json(&stdout);
    assert_eq!(report["status"], "insufficient");
    assert_eq!(report["total"], 5);
    assert_eq!(report["documented"], 4);
    assert_eq!(report["missing"][0]["qualified_name"], "Store::Table#put");
    assert_eq!(report["missing"][0]["location"]["line"], 11);
}

#[test]
fn coverage_meeting_threshold_exits_0() {
    let temp = project();
    let (stdout, _stderr, exit_code) = run_decode(temp.path(), &["coverage", "--threshold", "80"]);

    assert_eq!(exit_code, 0);
    assert!(stdout.contains("missing documentation for method Store::Table#put"));
    assert!(stdout.contains("4/5 definitions documented (80.0%)"));
}

#[test]
fn coverage_threshold_from_config_file() {
    let temp = project();
    fs::write(temp.path().join("decode.toml"), "[coverage]\nthreshold = 50\n").unwrap();
    let (_stdout, _stderr, exit_code) =
        run_decode(temp.path(), &["--config", "decode.toml", "coverage"]);
    assert_eq!(exit_code, 0);
}

#[test]
fn invalid_config_exits_2() {
    let temp = project();
    fs::create_dir_all(temp.path().join(".decode")).unwrap();
    fs::write(temp.path().join(".decode/config.toml"), "[coverage\n").unwrap();
    let (stdout, _stderr, exit_code) = run_decode(temp.path(), &["--format", "json", "coverage"]);

    assert_eq!(exit_code, 2);
    let error = json(&stdout);
    assert_eq!(error["status"], "error");
    assert_eq!(error["error"]["code"], 2);
}

// ============================================================================
// Lookup, List, Docs
// ============================================================================

#[test]
fn lookup_resolves_reference() {
    let temp = project();
    let (stdout, _stderr, exit_code) = run_decode(
        temp.path(),
        &["--format", "json", "lookup", "put", "--relative-to", "Store::Table#get"],
    );

    assert_eq!(exit_code, 0);
    let response = json(&stdout);
    assert_eq!(response["definition"]["qualified_name"], "Store::Table#put");
    assert_eq!(response["definition"]["kind"], "method");
}

#[test]
fn lookup_missing_reference_exits_3() {
    let temp = project();
    let (stdout, stderr, exit_code) = run_decode(temp.path(), &["lookup", "ruby Store::Nothing"]);

    assert_eq!(exit_code, 3);
    assert!(stdout.is_empty());
    assert!(stderr.contains("no definition found for ruby Store::Nothing"));
}

/// `lib/store/version.rb` sorts before `lib/store.rb`, so its `Store` and
/// `VERSION` are published first.
#[test]
fn list_merges_reopened_modules() {
    let temp = project();
    let (stdout, _stderr, exit_code) = run_decode(temp.path(), &["--format", "json", "list"]);

    assert_eq!(exit_code, 0);
    let response = json(&stdout);
    let names: Vec<&str> = response["definitions"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|d| d["qualified_name"].as_str())
        .collect();
    assert_eq!(
        names,
        vec![
            "Store",
            "Store",
            "Store::VERSION",
            "Store::Table",
            "Store::Table#get",
            "Store::Table#put",
        ]
    );
}

#[test]
fn docs_shows_parsed_tags() {
    let temp = project();
    let (stdout, _stderr, exit_code) =
        run_decode(temp.path(), &["--format", "json", "docs", "Store::Table#get"]);

    assert_eq!(exit_code, 0);
    let response = json(&stdout);
    assert_eq!(response["text"], "Fetch a value, see Store::Table#put.");
    assert_eq!(response["links"][0]["target"], "Store::Table#put");
    assert_eq!(response["children"].as_array().map(Vec::len), Some(3));
}

#[test]
fn docs_text_format() {
    let temp = project();
    let (stdout, _stderr, exit_code) = run_decode(temp.path(), &["docs", "Store::Table#get"]);

    assert_eq!(exit_code, 0);
    assert!(stdout.starts_with("def Store::Table#get(key)"));
    assert!(stdout.contains("@parameter key [String] The key."));
    assert!(stdout.contains("@returns [Object | Nil] The stored value."));
}
