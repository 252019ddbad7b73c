//! CLI settings file and command-line overrides.
//!
//! Settings are stored in TOML format at:
//! - Linux: `~/.config/mcp-toolgen/config.toml`
//! - macOS: `~/Library/Application Support/mcp-toolgen/config.toml`
//! - Windows: `%APPDATA%\mcp-toolgen\config.toml`
//!
//! ```toml
//! [general]
//! timeout_seconds = 30
//!
//! [client]
//! transport = "http"
//! url = "http://localhost:3000/mcp"
//!
//! [codegen]
//! output_dir = "sandbox/tools"
//! generate_interfaces = true
//! use_camel_case = true
//! ```

use anyhow::{Context, Result, bail};
use clap::Args;
use mcp_toolgen_core::{ClientConfig, CodegenConfig, TransportType};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Default per-command timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const MAX_TIMEOUT_SECS: u64 = 600;

/// Complete CLI settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// General settings
    #[serde(default)]
    pub general: GeneralSettings,

    /// Tool host connection
    #[serde(default)]
    pub client: ClientConfig,

    /// Code generation
    #[serde(default)]
    pub codegen: CodegenConfig,
}

/// General settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Timeout for commands that talk to the tool host, in seconds
    pub timeout_seconds: u64,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Overrides taken from flags and environment variables.
///
/// Every field is optional; unset fields leave the file value untouched.
#[derive(Debug, Clone, Default, Args)]
pub struct Overrides {
    /// Tool host URL (HTTP transport)
    #[arg(long, global = true, env = "MCP_TOOLGEN_URL")]
    pub url: Option<String>,

    /// Transport kind (http, stdio)
    #[arg(long, global = true, env = "MCP_TOOLGEN_TRANSPORT")]
    pub transport: Option<TransportType>,

    /// Executable for the stdio transport
    #[arg(long = "server-command", global = true)]
    pub command: Option<String>,

    /// Argument for the stdio executable (repeatable)
    #[arg(long = "server-arg", global = true, num_args = 1)]
    pub args: Vec<String>,

    /// Root directory for generated modules
    #[arg(long, global = true, env = "MCP_TOOLGEN_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Emit untyped stubs without interfaces
    #[arg(long, global = true)]
    pub no_interfaces: bool,

    /// Keep raw tool names as function names
    #[arg(long, global = true)]
    pub raw_names: bool,

    /// Timeout in seconds for commands that talk to the tool host
    #[arg(long, global = true, env = "MCP_TOOLGEN_TIMEOUT")]
    pub timeout: Option<u64>,
}

impl Settings {
    /// Validates every section.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first invalid value.
    pub fn validate(&self) -> Result<()> {
        if self.general.timeout_seconds == 0 {
            bail!("general.timeout_seconds must be greater than 0");
        }
        if self.general.timeout_seconds > MAX_TIMEOUT_SECS {
            bail!("general.timeout_seconds cannot exceed {MAX_TIMEOUT_SECS} seconds");
        }

        self.client.validate().context("invalid [client] settings")?;
        self.codegen
            .validate()
            .context("invalid [codegen] settings")?;
        Ok(())
    }

    /// Applies command-line overrides on top of the loaded values.
    #[must_use]
    pub fn with_overrides(mut self, overrides: &Overrides) -> Self {
        if let Some(url) = &overrides.url {
            self.client.url.clone_from(url);
        }
        if let Some(command) = &overrides.command {
            self.client.command = Some(command.clone());
            if overrides.transport.is_none() {
                self.client.transport = TransportType::Stdio;
            }
        }
        if let Some(transport) = overrides.transport {
            self.client.transport = transport;
        }
        if !overrides.args.is_empty() {
            self.client.args.clone_from(&overrides.args);
        }
        if let Some(dir) = &overrides.output_dir {
            self.codegen.output_dir.clone_from(dir);
        }
        if overrides.no_interfaces {
            self.codegen.generate_interfaces = false;
        }
        if overrides.raw_names {
            self.codegen.use_camel_case = false;
        }
        if let Some(timeout) = overrides.timeout {
            self.general.timeout_seconds = timeout;
        }
        self
    }

    /// Timeout for tool host round trips.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.general.timeout_seconds)
    }

    /// Loads settings from `explicit`, or from the default location.
    ///
    /// A missing file at the default location yields defaults; a missing
    /// explicit file is an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => {
                if !path.exists() {
                    bail!("config file not found: {}", path.display());
                }
                path.to_path_buf()
            }
            None => {
                let path = default_path()?;
                if !path.exists() {
                    debug!("Config file not found, using defaults");
                    return Ok(Self::default());
                }
                path
            }
        };

        Self::load_from(&path)
    }

    /// Loads and validates settings from `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let settings: Self = toml::from_str(&content)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        settings.validate()?;

        debug!("Loaded config from {}", path.display());
        Ok(settings)
    }

    /// Writes settings to `path`, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if validation, serialization or the write fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("failed to create config directory")?;
        }

        fs::write(path, self.to_toml()?).context("failed to write config file")?;
        debug!("Saved config to {}", path.display());
        Ok(())
    }

    /// Renders settings as TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("failed to serialize config")
    }
}

/// Platform-specific config file path.
///
/// # Errors
///
/// Returns an error if the platform has no config directory.
pub fn default_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir().context("failed to determine config directory")?;
    Ok(config_dir.join("mcp-toolgen").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.timeout(), Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert_eq!(settings.client.url, "http://localhost:3000/mcp");
    }

    #[test]
    fn test_save_then_load() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("config.toml");

        let mut settings = Settings::default();
        settings.codegen.output_dir = PathBuf::from("generated/tools");
        settings.general.timeout_seconds = 5;
        settings.save(&path).unwrap();

        let loaded = Settings::load(Some(&path)).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "[codegen]\nuse_camel_case = false\n").unwrap();

        let settings = Settings::load_from(&path).unwrap();
        assert!(!settings.codegen.use_camel_case);
        assert!(settings.codegen.generate_interfaces);
        assert_eq!(settings.general.timeout_seconds, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_missing_explicit_file() {
        let temp = TempDir::new().unwrap();
        let err = Settings::load(Some(&temp.path().join("absent.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "[general]\ntimeout_seconds = 0\n").unwrap();
        assert!(Settings::load_from(&path).is_err());

        fs::write(&path, "[codegen]\nfile_extension = \".ts\"\n").unwrap();
        assert!(Settings::load_from(&path).is_err());
    }

    #[test]
    fn test_overrides() {
        let overrides = Overrides {
            command: Some("node".to_string()),
            args: vec!["server.js".to_string()],
            output_dir: Some(PathBuf::from("out")),
            no_interfaces: true,
            raw_names: true,
            timeout: Some(3),
            ..Overrides::default()
        };

        let settings = Settings::default().with_overrides(&overrides);
        assert_eq!(settings.client.transport, TransportType::Stdio);
        assert_eq!(settings.client.command.as_deref(), Some("node"));
        assert_eq!(settings.client.args, ["server.js"]);
        assert_eq!(settings.codegen.output_dir, PathBuf::from("out"));
        assert!(!settings.codegen.generate_interfaces);
        assert!(!settings.codegen.use_camel_case);
        assert_eq!(settings.timeout(), Duration::from_secs(3));
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_explicit_transport_wins() {
        let overrides = Overrides {
            command: Some("node".to_string()),
            transport: Some(TransportType::Http),
            ..Overrides::default()
        };
        let settings = Settings::default().with_overrides(&overrides);
        assert_eq!(settings.client.transport, TransportType::Http);
    }
}
