use crate::cli::Cli;
use crate::config::Config;

pub(crate) struct AppConfig {
    pub(crate) include_libraries: bool,
    pub(crate) include_interfaces: bool,
    pub(crate) solc_bin: String,
    pub(crate) fallback_cmd: String,
    pub(crate) exclude: Vec<String>,
}

/// Loads project configuration and merges it with CLI flags.
/// CLI flags override config file values so runs stay reproducible from
/// the command line alone.
pub(crate) fn setup_configuration(scope: &std::path::Path, cli: &Cli) -> AppConfig {
    let config = Config::load_from_path(scope);

    let include_libraries =
        cli.include_libraries || config.solrecon.include_libraries.unwrap_or(false);
    let include_interfaces =
        cli.include_interfaces || config.solrecon.include_interfaces.unwrap_or(false);

    let solc_bin = cli
        .solc_bin
        .clone()
        .or_else(|| config.solrecon.solc_bin.clone())
        .unwrap_or_else(|| "solc".to_owned());

    let fallback_cmd = cli
        .fallback_cmd
        .clone()
        .or_else(|| config.solrecon.fallback_cmd.clone())
        .unwrap_or_else(|| "solrecon-index".to_owned());

    // Config-file only; there is no CLI counterpart (--out-of-scope covers
    // the command-line case).
    let exclude = config.solrecon.exclude.clone().unwrap_or_default();

    AppConfig {
        include_libraries,
        include_interfaces,
        solc_bin,
        fallback_cmd,
        exclude,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn cli_flags_override_config_file() {
        let dir = tempdir().unwrap();
        let mut file =
            std::fs::File::create(dir.path().join(crate::config::CONFIG_FILENAME)).unwrap();
        writeln!(file, "[solrecon]").unwrap();
        writeln!(file, "include_libraries = false").unwrap();
        writeln!(file, "solc_bin = \"solc-from-config\"").unwrap();

        let cli = Cli::parse_from([
            "solrecon",
            "contracts",
            "--include-libraries",
            "--solc-bin",
            "solc-from-cli",
        ]);
        let app = setup_configuration(dir.path(), &cli);
        assert!(app.include_libraries);
        assert!(!app.include_interfaces);
        assert_eq!(app.solc_bin, "solc-from-cli");
    }

    #[test]
    fn exclude_substrings_load_from_config_file() {
        let dir = tempdir().unwrap();
        let mut file =
            std::fs::File::create(dir.path().join(crate::config::CONFIG_FILENAME)).unwrap();
        writeln!(file, "[solrecon]").unwrap();
        writeln!(file, "exclude = [\"node_modules\", \"mocks\"]").unwrap();

        let cli = Cli::parse_from(["solrecon", "contracts"]);
        let app = setup_configuration(dir.path(), &cli);
        assert_eq!(
            app.exclude,
            vec!["node_modules".to_owned(), "mocks".to_owned()]
        );
    }

    #[test]
    fn config_file_fills_cli_gaps() {
        let dir = tempdir().unwrap();
        let mut file =
            std::fs::File::create(dir.path().join(crate::config::CONFIG_FILENAME)).unwrap();
        writeln!(file, "[solrecon]").unwrap();
        writeln!(file, "include_interfaces = true").unwrap();
        writeln!(file, "solc_bin = \"solc-0.8.24\"").unwrap();

        let cli = Cli::parse_from(["solrecon", "contracts"]);
        let app = setup_configuration(dir.path(), &cli);
        assert!(app.include_interfaces);
        assert_eq!(app.solc_bin, "solc-0.8.24");
        assert_eq!(app.fallback_cmd, "solrecon-index");
    }
}
