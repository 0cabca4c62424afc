//! CLI-level tests for the shared entry point.

use solrecon::entry_point::run_with_args_to;
use std::io::Write;
use tempfile::tempdir;

fn run(args: &[&str]) -> (i32, String) {
    let mut out = Vec::new();
    let code = run_with_args_to(
        args.iter().map(|s| (*s).to_owned()).collect(),
        &mut out,
    )
    .unwrap();
    (code, String::from_utf8(out).unwrap())
}

#[test]
fn help_exits_zero_and_prints_usage() {
    let (code, out) = run(&["--help"]);
    assert_eq!(code, 0);
    assert!(out.contains("solrecon"));
    assert!(out.contains("--include-libraries"));
}

#[test]
fn missing_scope_path_exits_one() {
    let (code, _) = run(&["/nonexistent/scope/dir"]);
    assert_eq!(code, 1);
}

#[test]
fn unreachable_solc_still_produces_a_report() {
    let dir = tempdir().unwrap();
    let mut file = std::fs::File::create(dir.path().join("a.sol")).unwrap();
    writeln!(file, "contract C {{}}").unwrap();

    // A solc binary that cannot be spawned must not abort the run; the
    // report is empty but the exit is clean.
    let (code, out) = run(&[
        dir.path().to_str().unwrap(),
        "--backend",
        "solc",
        "--solc-bin",
        "/nonexistent/solc-binary",
    ]);
    assert_eq!(code, 0);
    assert!(out.contains("# Entrypoint & Sink Report"));
    assert!(out.contains("No entrypoints or sinks found"));
    assert!(out.contains("failed to spawn"));
}

#[test]
fn report_file_extension_selects_renderer() {
    let dir = tempdir().unwrap();
    let mut file = std::fs::File::create(dir.path().join("a.sol")).unwrap();
    writeln!(file, "contract C {{}}").unwrap();
    let out_path = dir.path().join("report.json");

    let (code, _) = run(&[
        dir.path().to_str().unwrap(),
        "--backend",
        "solc",
        "--solc-bin",
        "/nonexistent/solc-binary",
        "--out",
        out_path.to_str().unwrap(),
    ]);
    assert_eq!(code, 0);
    let written = std::fs::read_to_string(&out_path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert!(parsed.get("toc").is_some());
}
