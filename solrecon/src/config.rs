//! Project configuration (`.solrecon.toml`).
//!
//! Discovered by walking upward from the scope path; CLI flags override
//! file values (the merge happens in `entry_point::config`).

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration file name searched for in the scope directory and its
/// ancestors.
pub const CONFIG_FILENAME: &str = ".solrecon.toml";

/// Top-level configuration struct.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct Config {
    /// The main configuration section.
    #[serde(default)]
    pub solrecon: SolreconConfig,
    /// The path to the configuration file this was loaded from.
    /// `None` when using defaults or programmatic config.
    #[serde(skip)]
    pub config_file_path: Option<PathBuf>,
}

/// Configuration options.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct SolreconConfig {
    /// Whether to analyze `library` declarations.
    pub include_libraries: Option<bool>,
    /// Whether to analyze `interface` declarations.
    pub include_interfaces: Option<bool>,
    /// Path to the solc binary.
    pub solc_bin: Option<String>,
    /// Fallback indexer command line.
    pub fallback_cmd: Option<String>,
    /// Path substrings to drop from the resolved scope
    /// (e.g. `node_modules`).
    pub exclude: Option<Vec<String>>,
}

impl Config {
    /// Loads configuration from the current directory upward.
    #[must_use]
    pub fn load() -> Self {
        Self::load_from_path(Path::new("."))
    }

    /// Loads configuration starting from a specific path and traversing up.
    /// Returns defaults when no config file is found or it fails to parse.
    #[must_use]
    pub fn load_from_path(path: &Path) -> Self {
        let mut current = path.to_path_buf();
        if current.is_file() {
            current.pop();
        }

        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                if let Ok(content) = fs::read_to_string(&candidate) {
                    if let Ok(mut config) = toml::from_str::<Self>(&content) {
                        config.config_file_path = Some(candidate);
                        return config;
                    }
                }
            }
            if !current.pop() {
                break;
            }
        }

        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn loads_from_scope_directory() {
        let dir = tempdir().unwrap();
        let mut file = std::fs::File::create(dir.path().join(CONFIG_FILENAME)).unwrap();
        writeln!(file, "[solrecon]").unwrap();
        writeln!(file, "include_libraries = true").unwrap();
        writeln!(file, "solc_bin = \"solc-0.8.24\"").unwrap();

        let config = Config::load_from_path(dir.path());
        assert_eq!(config.solrecon.include_libraries, Some(true));
        assert_eq!(config.solrecon.solc_bin.as_deref(), Some("solc-0.8.24"));
        assert!(config.config_file_path.is_some());
    }

    #[test]
    fn walks_up_to_parent_directories() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("contracts/src");
        std::fs::create_dir_all(&nested).unwrap();
        let mut file = std::fs::File::create(dir.path().join(CONFIG_FILENAME)).unwrap();
        writeln!(file, "[solrecon]").unwrap();
        writeln!(file, "include_interfaces = true").unwrap();

        let config = Config::load_from_path(&nested);
        assert_eq!(config.solrecon.include_interfaces, Some(true));
    }

    #[test]
    fn missing_config_yields_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load_from_path(dir.path());
        assert!(config.solrecon.include_libraries.is_none());
        assert!(config.config_file_path.is_none());
    }
}
