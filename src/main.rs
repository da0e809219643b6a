//! Client simulator configuration inspector
//!
//! Loads a simulator configuration the same way the simulator does and
//! prints what it resolves to.

use clap::{Parser, Subcommand};
use clientsim_config::{
    ConfigLoader, PathField, Result, TracingSink,
    config::expand_tilde,
    logging::init_tracing,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// Inspect a test client simulator configuration
#[derive(Parser, Debug)]
#[command(name = "clientsim-config")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the JSON configuration file
    #[arg(short, long, env = "CLIENTSIM_CONFIG")]
    config: String,

    /// Directory path entries are resolved against (default: the config file's directory)
    #[arg(short, long, env = "CLIENTSIM_TESTS_DIR")]
    tests_dir: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "CLIENTSIM_LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long, env = "CLIENTSIM_LOG_JSON")]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the value of one entry as JSON
    Get {
        /// Entry name
        key: String,
    },
    /// Print every resolved path entry
    Paths,
    /// Print the whole resolved configuration
    Dump,
}

#[derive(Serialize)]
struct ResolvedPath<'a> {
    field: PathField,
    path: &'a str,
    directory: bool,
}

/// Tests directory to use when none is given on the command line
fn default_tests_dir(config_path: &Path) -> PathBuf {
    match config_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Text printed for `command`
fn render(command: &Command, config: &ConfigLoader) -> Result<String> {
    let output = match command {
        Command::Get { key } => serde_json::to_string_pretty(config.get(key)?)?,
        Command::Paths => {
            let paths: Vec<_> = config
                .resolved_paths()
                .map(|(field, path)| ResolvedPath {
                    field,
                    path,
                    directory: field.is_directory(),
                })
                .collect();
            serde_json::to_string_pretty(&paths)?
        }
        Command::Dump => serde_json::to_string_pretty(config.as_map())?,
    };

    Ok(output)
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    init_tracing(&args.log_level, args.log_json);

    let config_path = expand_tilde(&args.config);
    let tests_dir = args
        .tests_dir
        .as_deref()
        .map(expand_tilde)
        .unwrap_or_else(|| default_tests_dir(&config_path));

    info!(
        config = %config_path.display(),
        tests_dir = %tests_dir.display(),
        "Loading simulator configuration"
    );

    let config = ConfigLoader::load(&config_path, &tests_dir, TracingSink::shared())
        .inspect_err(|e| error!(error = %e, "Failed to load configuration"))?;

    let output = render(&args.command, &config)?;

    println!("{output}");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clientsim_config::{AppError, ConfigError, MemorySink};
    use serde_json::{Value, json};
    use std::sync::Arc;

    const CONFIG: &str = r#"{
        "Retries": 3,
        "CoverageDir": "coverage",
        "Name": "sim",
        "LogFile": "log/client.log"
    }"#;

    fn loader() -> ConfigLoader {
        ConfigLoader::from_json_str(CONFIG, "/tests", Arc::new(MemorySink::new())).unwrap()
    }

    #[test]
    fn test_render_get() {
        let output = render(
            &Command::Get {
                key: "LogFile".into(),
            },
            &loader(),
        )
        .unwrap();
        assert_eq!(output, "\"/tests/log/client.log\"");
    }

    #[test]
    fn test_render_get_missing_key() {
        let result = render(
            &Command::Get {
                key: "Timeout".into(),
            },
            &loader(),
        );
        assert!(matches!(
            result,
            Err(AppError::Config(ConfigError::KeyNotFound { ref key })) if key == "Timeout"
        ));
    }

    #[test]
    fn test_render_paths_in_table_order() {
        let output = render(&Command::Paths, &loader()).unwrap();
        let paths: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(
            paths,
            json!([
                {"field": "LogFile", "path": "/tests/log/client.log", "directory": false},
                {"field": "CoverageDir", "path": "/tests/coverage", "directory": true},
            ])
        );
    }

    #[test]
    fn test_render_dump_keeps_document_order() {
        let output = render(&Command::Dump, &loader()).unwrap();
        let dumped: serde_json::Map<String, Value> = serde_json::from_str(&output).unwrap();

        assert_eq!(
            dumped.keys().map(String::as_str).collect::<Vec<_>>(),
            vec!["Retries", "CoverageDir", "Name", "LogFile"]
        );
        assert_eq!(dumped["CoverageDir"], json!("/tests/coverage"));
        assert_eq!(dumped["Retries"], json!(3));
    }

    #[test]
    #[serial_test::serial]
    fn test_args_env_fallbacks() {
        unsafe {
            std::env::set_var("CLIENTSIM_CONFIG", "/srv/suite/conf.json");
            std::env::set_var("CLIENTSIM_TESTS_DIR", "/srv/suite");
            std::env::set_var("CLIENTSIM_LOG_LEVEL", "debug");
        }

        let args = Args::try_parse_from(["clientsim-config", "dump"]);

        unsafe {
            std::env::remove_var("CLIENTSIM_CONFIG");
            std::env::remove_var("CLIENTSIM_TESTS_DIR");
            std::env::remove_var("CLIENTSIM_LOG_LEVEL");
        }

        let args = args.unwrap();
        assert_eq!(args.config, "/srv/suite/conf.json");
        assert_eq!(args.tests_dir.as_deref(), Some("/srv/suite"));
        assert_eq!(args.log_level, "debug");
        assert!(matches!(args.command, Command::Dump));
    }

    #[test]
    fn test_default_tests_dir_is_config_parent() {
        assert_eq!(
            default_tests_dir(Path::new("/srv/suite/conf.json")),
            PathBuf::from("/srv/suite")
        );
        assert_eq!(default_tests_dir(Path::new("conf.json")), PathBuf::from("."));
    }

    #[test]
    #[serial_test::serial]
    fn test_args_parse_get() {
        let args = Args::try_parse_from([
            "clientsim-config",
            "--config",
            "conf.json",
            "--tests-dir",
            "/tests",
            "get",
            "LogFile",
        ])
        .unwrap();

        assert_eq!(args.config, "conf.json");
        assert_eq!(args.tests_dir.as_deref(), Some("/tests"));
        assert!(matches!(args.command, Command::Get { ref key } if key == "LogFile"));
    }
}
