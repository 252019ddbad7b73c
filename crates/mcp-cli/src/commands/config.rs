//! `config`: manage the settings file.

use crate::actions::ConfigAction;
use crate::commands::common::print_output;
use crate::settings::{self, Settings};
use anyhow::Result;
use mcp_toolgen_core::cli::{ExitCode, OutputFormat};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

/// Result of `config init`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct InitResult {
    /// Whether a file was written
    pub created: bool,
    /// Status message
    pub message: String,
    /// Config file path
    pub path: String,
}

/// Writes default settings to `path`.
///
/// An existing file is kept unless `force` is set.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn init_config(path: &Path, force: bool) -> Result<InitResult> {
    let display_path = path.display().to_string();

    if path.exists() && !force {
        return Ok(InitResult {
            created: false,
            message: "configuration file already exists (use --force to overwrite)".to_string(),
            path: display_path,
        });
    }

    Settings::default().save(path)?;
    info!("Wrote default configuration to {display_path}");

    Ok(InitResult {
        created: true,
        message: "configuration file created with default values".to_string(),
        path: display_path,
    })
}

/// Runs the config command.
///
/// `effective` is the loaded configuration with overrides applied; it is
/// what `show` prints.
///
/// # Errors
///
/// Returns an error if the config location cannot be determined or the file
/// cannot be written.
pub fn run(
    action: &ConfigAction,
    explicit_path: Option<&Path>,
    effective: &Settings,
    output_format: OutputFormat,
) -> Result<ExitCode> {
    let path = match explicit_path {
        Some(path) => path.to_path_buf(),
        None => settings::default_path()?,
    };

    match action {
        ConfigAction::Init { force } => {
            print_output(&init_config(&path, *force)?, output_format)?;
        }
        ConfigAction::Show => {
            if output_format == OutputFormat::Json {
                print_output(effective, output_format)?;
            } else {
                print!("{}", effective.to_toml()?);
            }
        }
        ConfigAction::Path => print_path(&path, output_format)?,
    }

    Ok(ExitCode::SUCCESS)
}

fn print_path(path: &Path, output_format: OutputFormat) -> Result<()> {
    #[derive(Serialize)]
    struct ConfigPath {
        path: PathBuf,
        exists: bool,
    }

    if output_format == OutputFormat::Json {
        print_output(
            &ConfigPath {
                path: path.to_path_buf(),
                exists: path.exists(),
            },
            output_format,
        )
    } else {
        println!("{}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_creates_then_keeps() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("mcp-toolgen").join("config.toml");

        let first = init_config(&path, false).unwrap();
        assert!(first.created);
        assert_eq!(Settings::load_from(&path).unwrap(), Settings::default());

        std::fs::write(&path, "[general]\ntimeout_seconds = 9\n").unwrap();
        let second = init_config(&path, false).unwrap();
        assert!(!second.created);
        assert_eq!(Settings::load_from(&path).unwrap().general.timeout_seconds, 9);

        let forced = init_config(&path, true).unwrap();
        assert!(forced.created);
        assert_eq!(Settings::load_from(&path).unwrap(), Settings::default());
    }

    #[test]
    fn test_run_with_explicit_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");

        let code = run(
            &ConfigAction::Init { force: false },
            Some(&path),
            &Settings::default(),
            OutputFormat::Json,
        )
        .unwrap();
        assert_eq!(code, ExitCode::SUCCESS);
        assert!(path.exists());

        let code = run(&ConfigAction::Path, Some(&path), &Settings::default(), OutputFormat::Text)
            .unwrap();
        assert_eq!(code, ExitCode::SUCCESS);
    }
}
