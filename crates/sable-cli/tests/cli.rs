//! Integration tests for the `sable` binary.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

fn sable(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_sable"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to run sable")
}

fn write(dir: &Path, name: &str, source: &str) -> String {
    let path = dir.join(name);
    fs::write(&path, source).expect("Failed to write input");
    path.display().to_string()
}

fn stdout_json(output: &Output) -> serde_json::Value {
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(&stdout).expect("stdout should be valid JSON")
}

#[test]
fn test_check_clean_file() {
    let dir = tempfile::tempdir().unwrap();
    let file = write(dir.path(), "ok.js", "let a = 1;\nfunction f() { return a; }\n");

    let output = sable(&["--json", "check", &file]);
    assert!(output.status.success());
    let json = stdout_json(&output);
    assert_eq!(json["error_count"].as_u64(), Some(0));
    assert_eq!(json["files"][0]["source_type"], "script");
}

#[test]
fn test_check_reports_every_error() {
    let dir = tempfile::tempdir().unwrap();
    let file = write(dir.path(), "bad.js", "a = ;\nb;\nc = );\nd;\n");

    let output = sable(&["--json", "check", &file]);
    assert_eq!(output.status.code(), Some(1));
    let json = stdout_json(&output);
    assert_eq!(json["error_count"].as_u64(), Some(2));
    let errors = json["files"][0]["errors"].as_array().unwrap();
    assert_eq!(errors[0]["code"], "UnexpectedToken");
    assert_eq!(errors[0]["line"].as_u64(), Some(1));
    assert_eq!(errors[0]["column"].as_u64(), Some(5));
    assert_eq!(errors[1]["line"].as_u64(), Some(3));
}

#[test]
fn test_check_human_output_goes_to_stderr() {
    let dir = tempfile::tempdir().unwrap();
    let file = write(dir.path(), "bad.js", "try {}\n");

    let output = sable(&["check", &file]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("IllegalCatchlessTry"), "stderr: {stderr}");
    assert!(output.stdout.is_empty());
}

#[test]
fn test_module_selection() {
    let dir = tempfile::tempdir().unwrap();
    let source = "import a from 'm';\nexport default a;\n";
    let script = write(dir.path(), "m.js", source);
    let module = write(dir.path(), "m.mjs", source);

    assert_eq!(sable(&["check", &script]).status.code(), Some(1));
    assert!(sable(&["check", "--module", &script]).status.success());
    assert!(sable(&["check", &module]).status.success());
}

#[test]
fn test_parse_summary_json() {
    let dir = tempfile::tempdir().unwrap();
    let file = write(dir.path(), "f.js", "function f(a) { return a + 1; }\nclass C {}\n");

    let output = sable(&["--json", "parse", &file]);
    assert!(output.status.success());
    let json = stdout_json(&output);
    assert_eq!(json["complete"], true);
    assert_eq!(json["counts"]["statements"].as_u64(), Some(3));
    assert_eq!(json["counts"]["functions"].as_u64(), Some(1));
    assert!(json.get("ast").is_none());
}

#[test]
fn test_parse_with_ast() {
    let dir = tempfile::tempdir().unwrap();
    let file = write(dir.path(), "f.js", "1 + 2 * 3;");

    let output = sable(&["--json", "parse", "--ast", &file]);
    let json = stdout_json(&output);
    let expr = &json["ast"]["body"][0]["kind"]["Expr"]["kind"]["Binary"];
    assert_eq!(expr["op"], "Add");
    assert_eq!(expr["right"]["kind"]["Binary"]["op"], "Mul");
}

#[test]
fn test_parse_fatal_error() {
    let dir = tempfile::tempdir().unwrap();
    let file = write(dir.path(), "f.js", "let a = `unterminated");

    let output = sable(&["--json", "parse", &file]);
    assert_eq!(output.status.code(), Some(1));
    let json = stdout_json(&output);
    assert_eq!(json["complete"], false);
    assert!(json["counts"].is_null());
    assert_eq!(json["errors"][0]["code"], "LexError");
}

#[test]
fn test_print_reformats() {
    let dir = tempfile::tempdir().unwrap();
    let file = write(dir.path(), "f.js", "if(a){b( 1,2 )}else c");

    let output = sable(&["print", "--indent", "4", &file]);
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "if (a) {\n    b(1, 2);\n} else c;\n");
}

#[test]
fn test_print_refuses_broken_input() {
    let dir = tempfile::tempdir().unwrap();
    let file = write(dir.path(), "f.js", "a = ;");

    let output = sable(&["print", &file]);
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_max_depth_flag() {
    let dir = tempfile::tempdir().unwrap();
    let file = write(dir.path(), "deep.js", "[[[[[[[[[[1]]]]]]]]]];");

    assert!(sable(&["check", &file]).status.success());
    let output = sable(&["--json", "check", "--max-depth", "4", &file]);
    assert_eq!(output.status.code(), Some(1));
    let json = stdout_json(&output);
    assert_eq!(json["files"][0]["errors"][0]["code"], "NestingTooDeep");
}

#[test]
fn test_missing_file() {
    let output = sable(&["check", "/nonexistent/input.js"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to read"), "stderr: {stderr}");
}
