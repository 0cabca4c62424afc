use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use std::path::{Path, PathBuf};

use crate::backend::{self, TranslationOutcome};
use crate::cli::{BackendChoice, Cli};
use crate::entry_point::config::{setup_configuration, AppConfig};
use crate::model::SourceTexts;
use crate::pipeline::Pipeline;
use crate::report;

/// Runs the tool with the given arguments using stdout as the writer.
///
/// # Errors
///
/// Returns an error if writing the report fails.
pub fn run_with_args(args: Vec<String>) -> Result<i32> {
    run_with_args_to(args, &mut std::io::stdout())
}

/// Runs the tool with the given arguments, writing output to the specified
/// writer. This is the testable version of `run_with_args`.
///
/// # Errors
///
/// Returns an error if writing the report fails.
pub fn run_with_args_to<W: std::io::Write>(args: Vec<String>, writer: &mut W) -> Result<i32> {
    let mut program_args = vec!["solrecon".to_owned()];
    program_args.extend(args);
    let cli = match Cli::try_parse_from(program_args) {
        Ok(c) => c,
        Err(e) => {
            match e.kind() {
                clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                    write!(writer, "{e}")?;
                    writer.flush()?;
                    return Ok(0);
                }
                _ => {
                    eprint!("{e}");
                    return Ok(1);
                }
            }
        }
    };

    let scope = match crate::scope::subtract_out_of_scope(&cli.scope, cli.out_of_scope.as_deref())
    {
        Ok(scope) => scope,
        Err(e) => {
            eprintln!("{}", format!("ERROR: {e}").red().bold());
            return Ok(1);
        }
    };
    if scope.final_files.is_empty() {
        eprintln!(
            "{}",
            "WARNING: scope resolved to zero .sol files".yellow().bold()
        );
    }

    let app = setup_configuration(&cli.scope, &cli);
    let files = crate::scope::apply_exclude_substrings(scope.final_files, &app.exclude);

    if cli.verbose {
        eprintln!("[VERBOSE] solrecon v{}", env!("CARGO_PKG_VERSION"));
        eprintln!("[VERBOSE] Scope: {} files", files.len());
        for file in &files {
            eprintln!("[VERBOSE]   {}", file.display());
        }
        eprintln!("[VERBOSE] Backend: {:?}", cli.backend);
    }

    let mut texts = SourceTexts::new();
    for file in &files {
        match std::fs::read_to_string(file) {
            Ok(content) => texts.insert(file.clone(), content),
            Err(e) => {
                // Unreadable files drop out of the run; everything else
                // still produces a report.
                eprintln!(
                    "{}",
                    format!("WARNING: cannot read {}: {e}", file.display()).yellow()
                );
            }
        }
    }

    let mut warnings = Vec::new();
    let outcome = acquire_model(&cli, &app, &files, &texts, &mut warnings);
    for (file, err) in &outcome.failures {
        warnings.push(format!("{}: {err}", file.display()));
    }
    if cli.verbose {
        eprintln!("[VERBOSE] Translated {} file(s)", outcome.units.len());
    }

    let pipeline = Pipeline::new()
        .with_libraries(app.include_libraries)
        .with_interfaces(app.include_interfaces);
    let output = pipeline.analyze(&outcome.units, &texts, warnings);

    if let Some(note) = &output.sink_note {
        eprintln!("{}", format!("NOTE: {note}").yellow());
    }

    match &cli.out {
        Some(path) => {
            let rendered = match path.extension().and_then(|e| e.to_str()) {
                Some("json") => report::json::render(&output.tree),
                // Markdown is the default for .md and anything unrecognized.
                _ => report::md::render(&output.tree),
            };
            std::fs::write(path, rendered)?;
            if cli.verbose {
                eprintln!("[VERBOSE] Report written to {}", path.display());
            }
        }
        None => {
            let rendered = if cli.json {
                report::json::render(&output.tree)
            } else {
                report::md::render(&output.tree)
            };
            write!(writer, "{rendered}")?;
            writer.flush()?;
        }
    }

    Ok(0)
}

/// Acquires trees from the selected backend(s) and translates them into
/// the canonical model. In `auto` mode a solc failure or an AST-less solc
/// response falls back to the fallback indexer.
fn acquire_model(
    cli: &Cli,
    app: &AppConfig,
    files: &[PathBuf],
    texts: &SourceTexts,
    warnings: &mut Vec<String>,
) -> TranslationOutcome {
    let try_solc = matches!(cli.backend, BackendChoice::Auto | BackendChoice::Solc);
    if try_solc {
        match backend::invoke::run_solc(files, texts, &app.solc_bin) {
            Ok(solc_out) => {
                warnings.extend(solc_out.diagnostics.iter().cloned());
                if !solc_out.is_empty() {
                    return backend::solc::translate(files, &solc_out.ast_by_file, texts);
                }
                warnings.push("solc produced no AST output".to_owned());
            }
            Err(e) => warnings.push(e.to_string()),
        }
        if cli.backend == BackendChoice::Solc {
            return TranslationOutcome::default();
        }
    }

    // Fallback indexer path: one invocation per scope target, coarse offsets.
    let target = fallback_target(&cli.scope, files);
    match backend::invoke::run_fallback_indexer(&app.fallback_cmd, &target) {
        Ok(index) => backend::fallback::translate(&index),
        Err(e) => {
            warnings.push(e.to_string());
            TranslationOutcome::default()
        }
    }
}

/// The fallback indexer wants a compilation target, not a file list: hand
/// it the scope path when it is a file or directory, otherwise the first
/// resolved file.
fn fallback_target(scope: &Path, files: &[PathBuf]) -> PathBuf {
    if scope.is_dir() || scope.extension().and_then(|e| e.to_str()) == Some("sol") {
        scope.to_path_buf()
    } else {
        files.first().cloned().unwrap_or_else(|| scope.to_path_buf())
    }
}
