//! External engine invocation.
//!
//! The only blocking work in the whole tool happens here, before the
//! canonical model is constructed. Both invocations are best-effort: the
//! caller decides whether diagnostics warrant falling back from solc to
//! the fallback indexer.

use super::fallback::RawIndexedContract;
use crate::errors::ReconError;
use crate::model::SourceTexts;
use rustc_hash::FxHashMap;
use serde_json::{json, Value};
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

/// Parsed solc standard-json response.
#[derive(Debug, Default)]
pub struct SolcOutput {
    /// Per-file ASTs, keyed by the absolute paths used as source keys.
    pub ast_by_file: FxHashMap<PathBuf, Value>,
    /// Severe (`error` / `fatal`) compiler diagnostics. Non-empty
    /// diagnostics do not imply an unusable AST; the caller decides.
    pub diagnostics: Vec<String>,
}

impl SolcOutput {
    /// True when no file produced an AST.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ast_by_file.is_empty()
    }
}

/// Runs `solc --standard-json` over the given files and parses the response.
///
/// Source keys are the files' paths as supplied, which the scope resolver
/// already made absolute; that keeps the AST-to-file mapping collision-free
/// and stable across runs.
///
/// # Errors
///
/// Fails when solc cannot be spawned or does not return valid JSON. Compile
/// errors inside a valid response are returned as diagnostics, not errors.
pub fn run_solc(
    files: &[PathBuf],
    texts: &SourceTexts,
    solc_bin: &str,
) -> Result<SolcOutput, ReconError> {
    if files.is_empty() {
        return Ok(SolcOutput::default());
    }

    let mut sources = serde_json::Map::new();
    for file in files {
        let content = texts.get(file).unwrap_or("");
        sources.insert(
            file.to_string_lossy().into_owned(),
            json!({ "content": content }),
        );
    }
    let input = json!({
        "language": "Solidity",
        "sources": Value::Object(sources),
        "settings": { "outputSelection": { "*": { "": ["ast"] } } },
    });

    let mut child = Command::new(solc_bin)
        .arg("--standard-json")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| ReconError::BackendInvocation(format!("failed to spawn {solc_bin}: {e}")))?;

    if let Some(stdin) = child.stdin.as_mut() {
        stdin.write_all(input.to_string().as_bytes())?;
    }
    let output = child.wait_with_output()?;

    let raw_out = String::from_utf8_lossy(&output.stdout);
    let raw_err = String::from_utf8_lossy(&output.stderr);

    let parsed: Value = serde_json::from_str(raw_out.trim()).map_err(|_| {
        // Without valid JSON there is no AST to recover; include both
        // streams so the failure is actionable.
        let mut msg = format!("{solc_bin} did not return valid JSON.");
        if !raw_out.trim().is_empty() {
            msg.push_str(&format!("\nstdout:\n{}", raw_out.trim()));
        }
        if !raw_err.trim().is_empty() {
            msg.push_str(&format!("\nstderr:\n{}", raw_err.trim()));
        }
        ReconError::BackendInvocation(msg)
    })?;

    let mut result = SolcOutput::default();

    // solc prints warnings and notes too; only error/fatal block an AST.
    if let Some(errors) = parsed.get("errors").and_then(Value::as_array) {
        for err in errors {
            let severity = err.get("severity").and_then(Value::as_str).unwrap_or("");
            if severity == "error" || severity == "fatal" {
                let msg = err
                    .get("formattedMessage")
                    .or_else(|| err.get("message"))
                    .and_then(Value::as_str)
                    .unwrap_or("unknown solc error");
                result.diagnostics.push(msg.to_owned());
            }
        }
    }

    if let Some(sources) = parsed.get("sources").and_then(Value::as_object) {
        for (key, entry) in sources {
            if let Some(ast) = entry.get("ast") {
                result
                    .ast_by_file
                    .insert(PathBuf::from(key), ast.clone());
            }
        }
    }

    Ok(result)
}

/// Runs the fallback indexer command against a target path and parses the
/// JSON contract index from its stdout.
///
/// The command is split on whitespace; the target path is appended as the
/// final argument.
///
/// # Errors
///
/// Fails when the command cannot be spawned, exits unsuccessfully, or does
/// not print a valid JSON index.
pub fn run_fallback_indexer(
    command: &str,
    target: &std::path::Path,
) -> Result<Vec<RawIndexedContract>, ReconError> {
    let mut parts = command.split_whitespace();
    let program = parts.next().ok_or_else(|| {
        ReconError::BackendInvocation("fallback indexer command is empty".to_owned())
    })?;

    let output = Command::new(program)
        .args(parts)
        .arg(target)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .map_err(|e| {
            ReconError::BackendInvocation(format!("failed to spawn {program}: {e}"))
        })?;

    if !output.status.success() {
        return Err(ReconError::BackendInvocation(format!(
            "{program} exited with {}: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }

    serde_json::from_slice(&output.stdout).map_err(|e| {
        ReconError::BackendInvocation(format!("{program} printed an invalid index: {e}"))
    })
}
