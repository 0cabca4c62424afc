//! Command line interface configuration using `clap`.

use clap::Parser;
use std::path::PathBuf;

/// Help text for configuration file options, shown at the bottom of --help.
const CONFIG_HELP: &str = "\
CONFIGURATION FILE (.solrecon.toml):
  Create this file in your project root to set defaults.

  [solrecon]
  include_libraries = false   # Analyze library declarations
  include_interfaces = false  # Analyze interface declarations
  solc_bin = \"solc\"           # Compiler binary to invoke
  fallback_cmd = \"solrecon-index\"  # Fallback indexer command
  exclude = [\"node_modules\"]      # Path substrings to drop from scope
";

/// Which backend engine supplies the trees.
#[derive(Debug, Clone, Copy, clap::ValueEnum, Default, PartialEq, Eq)]
pub enum BackendChoice {
    /// Try solc first, fall back to the fallback indexer when solc yields
    /// no usable AST.
    #[default]
    Auto,
    /// solc standard-json only (exact byte offsets).
    Solc,
    /// Fallback indexer only (line-level offsets; no sink analysis).
    Fallback,
}

/// This struct defines the arguments and flags accepted by the program.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "solrecon - structural entrypoint/sink reconnaissance for Solidity sources",
    long_about = None,
    after_help = CONFIG_HELP
)]
pub struct Cli {
    /// Scope to analyze: a .sol file, a directory (recursive), or a .txt
    /// list of files/directories.
    pub scope: PathBuf,

    /// Paths to subtract from scope (same shapes as the scope argument).
    #[arg(long)]
    pub out_of_scope: Option<PathBuf>,

    /// Output file; format is chosen by extension (.md or .json).
    /// Without this flag the Markdown report goes to stdout.
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Analyze library declarations too.
    #[arg(long)]
    pub include_libraries: bool,

    /// Analyze interface declarations too.
    #[arg(long)]
    pub include_interfaces: bool,

    /// Backend engine selection.
    #[arg(long, value_enum, default_value_t = BackendChoice::Auto)]
    pub backend: BackendChoice,

    /// Path to the solc binary.
    #[arg(long)]
    pub solc_bin: Option<String>,

    /// Fallback indexer command line (target path is appended).
    #[arg(long)]
    pub fallback_cmd: Option<String>,

    /// Print the JSON report to stdout instead of Markdown.
    #[arg(long)]
    pub json: bool,

    /// Enable verbose output for debugging (shows files being analyzed).
    #[arg(short, long)]
    pub verbose: bool,
}
