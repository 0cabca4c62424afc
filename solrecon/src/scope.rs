//! Scope resolution.
//!
//! Turns a scope argument into the deterministic, deduplicated file list
//! the rest of the pipeline consumes. Accepted shapes: one `.sol` file, a
//! directory (recursive), or a `.txt` list of files/directories.

use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Outcome of scope resolution with an optional out-of-scope subtraction.
#[derive(Debug, Clone)]
pub struct ScopeResult {
    /// Everything the scope argument matched, sorted.
    pub included: Vec<PathBuf>,
    /// Everything the out-of-scope argument matched, sorted.
    pub excluded: Vec<PathBuf>,
    /// `included` minus `excluded`, sorted. This is what the pipeline runs on.
    pub final_files: Vec<PathBuf>,
}

/// Resolves a scope path into a sorted, deduplicated list of `.sol` files.
///
/// # Errors
///
/// Fails when the path does not exist, is an unsupported file type, or a
/// listed path cannot be read.
pub fn resolve_scope(scope: &Path) -> io::Result<Vec<PathBuf>> {
    let scope = absolutize(scope)?;
    if !scope.exists() {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("scope path does not exist: {}", scope.display()),
        ));
    }

    if scope.is_dir() {
        return collect_sol_files(&scope);
    }

    match scope.extension().and_then(|e| e.to_str()) {
        Some("sol") => Ok(vec![scope]),
        Some("txt") => {
            let mut out = BTreeSet::new();
            for item in read_list_file(&scope)? {
                if item.is_dir() {
                    out.extend(collect_sol_files(&item)?);
                } else if item.extension().and_then(|e| e.to_str()) == Some("sol") {
                    out.insert(item);
                }
            }
            Ok(out.into_iter().collect())
        }
        _ => Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!(
                "unsupported scope type: {} (expected .sol, directory, or .txt)",
                scope.display()
            ),
        )),
    }
}

/// Resolves the in-scope set and subtracts an optional out-of-scope set.
///
/// # Errors
///
/// Fails when either path fails to resolve.
pub fn subtract_out_of_scope(
    scope: &Path,
    out_of_scope: Option<&Path>,
) -> io::Result<ScopeResult> {
    let included = resolve_scope(scope)?;
    let excluded = match out_of_scope {
        Some(path) => resolve_scope(path)?,
        None => Vec::new(),
    };

    let excluded_set: BTreeSet<&PathBuf> = excluded.iter().collect();
    let final_files = included
        .iter()
        .filter(|p| !excluded_set.contains(p))
        .cloned()
        .collect();

    Ok(ScopeResult {
        included,
        excluded,
        final_files,
    })
}

/// Drops files whose path contains any of the given substrings.
///
/// This is the `.solrecon.toml` `exclude` filter; it runs after scope
/// resolution and out-of-scope subtraction, so excluded paths never reach
/// the backends.
#[must_use]
pub fn apply_exclude_substrings(files: Vec<PathBuf>, patterns: &[String]) -> Vec<PathBuf> {
    if patterns.is_empty() {
        return files;
    }
    files
        .into_iter()
        .filter(|file| {
            let path = file.to_string_lossy();
            !patterns.iter().any(|pattern| path.contains(pattern.as_str()))
        })
        .collect()
}

/// Reads a `.txt` list of paths: blank lines and `#` comments are ignored,
/// relative entries resolve against the list file's directory.
fn read_list_file(list: &Path) -> io::Result<Vec<PathBuf>> {
    let base = list.parent().unwrap_or_else(|| Path::new("."));
    let content = fs::read_to_string(list)?;

    let mut out = Vec::new();
    for raw in content.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let path = PathBuf::from(line);
        let path = if path.is_absolute() {
            path
        } else {
            base.join(path)
        };
        out.push(absolutize(&path)?);
    }
    Ok(out)
}

/// Recursively collects `.sol` files under a directory, sorted.
fn collect_sol_files(root: &Path) -> io::Result<Vec<PathBuf>> {
    let mut out = BTreeSet::new();
    let mut stack = vec![root.to_path_buf()];
    while let Some(dir) = stack.pop() {
        for entry in fs::read_dir(&dir)? {
            let path = entry?.path();
            if path.is_dir() {
                stack.push(path);
            } else if path.extension().and_then(|e| e.to_str()) == Some("sol") {
                out.insert(path);
            }
        }
    }
    Ok(out.into_iter().collect())
}

/// Makes a path absolute without requiring it to exist (unlike
/// `fs::canonicalize`, which would fail on not-yet-checked list entries).
fn absolutize(path: &Path) -> io::Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}
