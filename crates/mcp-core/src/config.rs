//! Configuration for the tool registry client and the code generator.
//!
//! [`ClientConfig`] describes how to reach the tool host and how the client
//! introduces itself during the handshake. [`CodegenConfig`] describes where
//! generated modules go and how they are shaped.
//!
//! Both types deserialize from TOML or JSON with every field optional, so a
//! partial file overrides only the keys it names.
//!
//! # Examples
//!
//! ```
//! use mcp_toolgen_core::{ClientConfig, CodegenConfig, TransportType};
//!
//! let client = ClientConfig::default();
//! assert_eq!(client.transport, TransportType::Http);
//! assert_eq!(client.url, "http://localhost:3000/mcp");
//!
//! let codegen = CodegenConfig::default();
//! assert!(codegen.generate_interfaces);
//! assert!(codegen.use_camel_case);
//! ```

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Default tool host endpoint.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:3000/mcp";

/// Default module specifier that generated files import the runtime from.
///
/// Resolves from `<root>/<tool>/<tool>.ts` to `services/mcp.service` two
/// levels above the output root's parent.
pub const DEFAULT_RUNTIME_IMPORT: &str = "../../services/mcp.service";

const DEFAULT_CLIENT_NAME: &str = "mcp-toolgen";
const DEFAULT_OUTPUT_DIR: &str = "sandbox/tools";
const DEFAULT_FILE_EXTENSION: &str = "ts";

/// Transport used to reach the tool host.
///
/// # Examples
///
/// ```
/// use mcp_toolgen_core::TransportType;
///
/// let transport: TransportType = "stdio".parse().unwrap();
/// assert_eq!(transport, TransportType::Stdio);
/// assert_eq!(TransportType::default().as_str(), "http");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportType {
    /// Streamable HTTP (the default)
    #[default]
    Http,
    /// Child process speaking over stdin/stdout
    Stdio,
}

impl TransportType {
    /// Returns the configuration name of the transport.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Http => "http",
            Self::Stdio => "stdio",
        }
    }
}

impl fmt::Display for TransportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransportType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "http" => Ok(Self::Http),
            "stdio" => Ok(Self::Stdio),
            _ => Err(Error::InvalidArgument(format!(
                "invalid transport: '{s}' (expected: http or stdio)"
            ))),
        }
    }
}

/// Connection settings for the tool registry client.
///
/// For [`TransportType::Http`] only `url` is used. For
/// [`TransportType::Stdio`] the host is spawned from `command`, `args` and
/// `env`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Transport kind
    pub transport: TransportType,
    /// Tool host endpoint for the HTTP transport
    pub url: String,
    /// Executable for the stdio transport
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    /// Arguments for the stdio executable
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,
    /// Extra environment for the stdio executable
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub env: HashMap<String, String>,
    /// Client name sent in the handshake
    pub client_name: String,
    /// Client version sent in the handshake
    pub client_version: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            transport: TransportType::default(),
            url: DEFAULT_SERVER_URL.to_string(),
            command: None,
            args: Vec::new(),
            env: HashMap::new(),
            client_name: DEFAULT_CLIENT_NAME.to_string(),
            client_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

impl ClientConfig {
    /// Creates a configuration builder seeded with defaults.
    ///
    /// # Examples
    ///
    /// ```
    /// use mcp_toolgen_core::{ClientConfig, TransportType};
    ///
    /// let config = ClientConfig::builder()
    ///     .stdio("node")
    ///     .arg("dist/server.js")
    ///     .env("LOG_LEVEL", "debug")
    ///     .build()?;
    ///
    /// assert_eq!(config.transport, TransportType::Stdio);
    /// assert_eq!(config.args, vec!["dist/server.js"]);
    /// # Ok::<(), mcp_toolgen_core::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Human-readable address of the tool host, used in error messages.
    ///
    /// # Examples
    ///
    /// ```
    /// use mcp_toolgen_core::ClientConfig;
    ///
    /// let config = ClientConfig::builder()
    ///     .stdio("node")
    ///     .arg("server.js")
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(config.endpoint(), "node server.js");
    /// ```
    #[must_use]
    pub fn endpoint(&self) -> String {
        match self.transport {
            TransportType::Http => self.url.clone(),
            TransportType::Stdio => {
                let mut parts = vec![self.command.clone().unwrap_or_default()];
                parts.extend(self.args.iter().cloned());
                parts.join(" ")
            }
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if:
    /// - The HTTP transport has an empty URL or one without an `http(s)://` scheme
    /// - The stdio transport has no command or an empty one
    /// - The client name or version is empty
    pub fn validate(&self) -> Result<()> {
        match self.transport {
            TransportType::Http => {
                if self.url.trim().is_empty() {
                    return Err(config_error("server url cannot be empty"));
                }
                if !(self.url.starts_with("http://") || self.url.starts_with("https://")) {
                    return Err(config_error(format!(
                        "server url must start with http:// or https://, got '{}'",
                        self.url
                    )));
                }
            }
            TransportType::Stdio => match &self.command {
                Some(command) if !command.trim().is_empty() => {}
                _ => return Err(config_error("stdio transport requires a command")),
            },
        }

        if self.client_name.trim().is_empty() {
            return Err(config_error("client name cannot be empty"));
        }
        if self.client_version.trim().is_empty() {
            return Err(config_error("client version cannot be empty"));
        }

        Ok(())
    }
}

/// Builder for [`ClientConfig`].
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Uses the HTTP transport against `url`.
    #[must_use]
    pub fn http(mut self, url: impl Into<String>) -> Self {
        self.config.transport = TransportType::Http;
        self.config.url = url.into();
        self
    }

    /// Uses the stdio transport, spawning `command`.
    #[must_use]
    pub fn stdio(mut self, command: impl Into<String>) -> Self {
        self.config.transport = TransportType::Stdio;
        self.config.command = Some(command.into());
        self
    }

    /// Appends one argument for the stdio command.
    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.config.args.push(arg.into());
        self
    }

    /// Appends several arguments for the stdio command.
    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Sets one environment variable for the stdio command.
    #[must_use]
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.env.insert(key.into(), value.into());
        self
    }

    /// Sets the client identity sent in the handshake.
    #[must_use]
    pub fn client_info(mut self, name: impl Into<String>, version: impl Into<String>) -> Self {
        self.config.client_name = name.into();
        self.config.client_version = version.into();
        self
    }

    /// Validates and returns the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if [`ClientConfig::validate`] fails.
    pub fn build(self) -> Result<ClientConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

/// Settings for generating and materializing proxy modules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodegenConfig {
    /// Root directory that receives one subdirectory per tool
    pub output_dir: PathBuf,
    /// Emit input/output interfaces; when off the stub is typed `any`
    pub generate_interfaces: bool,
    /// Name the generated function in camelCase instead of the raw tool name
    pub use_camel_case: bool,
    /// Module specifier that exports `callMCPTool`
    pub runtime_import: String,
    /// Extension of generated files, without the dot
    pub file_extension: String,
}

impl Default for CodegenConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            generate_interfaces: true,
            use_camel_case: true,
            runtime_import: DEFAULT_RUNTIME_IMPORT.to_string(),
            file_extension: DEFAULT_FILE_EXTENSION.to_string(),
        }
    }
}

impl CodegenConfig {
    /// Creates a default configuration writing under `output_dir`.
    #[must_use]
    pub fn with_output_dir(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            ..Self::default()
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the output directory is empty, the
    /// runtime import is empty or contains a quote, backslash or line break, or the file
    /// extension is empty, starts with a dot, or contains a path separator.
    ///
    /// # Examples
    ///
    /// ```
    /// use mcp_toolgen_core::CodegenConfig;
    ///
    /// assert!(CodegenConfig::default().validate().is_ok());
    ///
    /// let bad = CodegenConfig {
    ///     file_extension: ".ts".to_string(),
    ///     ..CodegenConfig::default()
    /// };
    /// assert!(bad.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<()> {
        if self.output_dir.as_os_str().is_empty() {
            return Err(config_error("output directory cannot be empty"));
        }

        if self.runtime_import.trim().is_empty() {
            return Err(config_error("runtime import cannot be empty"));
        }
        if self
            .runtime_import
            .contains(['\'', '"', '\\', '\n', '\r', '\u{2028}', '\u{2029}'])
        {
            return Err(config_error(
                "runtime import cannot contain quotes, backslashes or line breaks",
            ));
        }

        let ext = &self.file_extension;
        if ext.is_empty() {
            return Err(config_error("file extension cannot be empty"));
        }
        if ext.starts_with('.') || ext.contains(['/', '\\']) {
            return Err(config_error(format!(
                "file extension must be a bare extension like 'ts', got '{ext}'"
            )));
        }

        Ok(())
    }
}

fn config_error(message: impl Into<String>) -> Error {
    Error::ConfigError {
        message: message.into(),
    }
}
