//! Error types for MCP tool proxy generation.
//!
//! Every component-level operation either returns a value or fails with
//! exactly one variant of [`Error`]. No component swallows an error and
//! returns a sentinel in its place.
//!
//! # Examples
//!
//! ```
//! use mcp_toolgen_core::{Error, Result};
//!
//! fn lookup(name: &str) -> Result<()> {
//!     if name.is_empty() {
//!         return Err(Error::ToolNotFound {
//!             tool: name.to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//!
//! let err = lookup("").unwrap_err();
//! assert!(err.is_not_found());
//! ```

use serde::Serialize;
use thiserror::Error;

/// Main error type for MCP tool proxy generation.
///
/// All errors in the system use this type, providing consistent error handling
/// across all crates in the workspace.
#[derive(Error, Debug)]
pub enum Error {
    /// Tool host connection failed.
    ///
    /// The transport could not be established, the handshake was rejected,
    /// or an established transport broke while a call was in flight.
    #[error("MCP server connection failed: {server}")]
    ConnectionFailed {
        /// URL or command of the tool host
        server: String,
        /// Underlying error cause
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The host answered with a payload that does not match the expected shape.
    #[error("Protocol error: {message}")]
    ProtocolError {
        /// Description of the mismatch
        message: String,
        /// Raw payload as received, kept for diagnosis
        payload: String,
    },

    /// The host reports that no tool with this name exists.
    #[error("Tool not found: {tool}")]
    ToolNotFound {
        /// Requested tool name
        tool: String,
    },

    /// The host reports that the tool handler failed.
    #[error("Tool '{tool}' failed: {message}")]
    ToolExecutionFailed {
        /// Tool name
        tool: String,
        /// Message reported by the host
        message: String,
    },

    /// Neither a structured payload nor a parseable text entry was found.
    #[error("Malformed tool response: {reason}")]
    MalformedResponse {
        /// Why extraction failed
        reason: String,
    },

    /// Configuration error.
    ///
    /// Raised when configuration is invalid, missing required fields,
    /// or contains contradictory settings.
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration problem
        message: String,
    },

    /// Invalid argument error.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Validation error for domain values such as tool names.
    #[error("Validation error in {field}: {reason}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// Detailed reason for the validation failure
        reason: String,
    },

    /// Serialization, deserialization or template rendering failed.
    #[error("Serialization error: {message}")]
    SerializationError {
        /// Description of the serialization failure
        message: String,
        /// Underlying serde error
        #[source]
        source: Option<serde_json::Error>,
    },

    /// A filesystem operation failed.
    #[error("Filesystem error at {path}: {source}")]
    FilesystemError {
        /// Path the operation was applied to
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// One or more tools could not be generated.
    ///
    /// Tools that succeeded stay on disk; this error only lists the failures.
    #[error(
        "Code generation failed for {} tool(s): {}",
        .failures.len(),
        ToolFailure::join_names(.failures)
    )]
    GenerationFailed {
        /// Per-tool failures, in input order
        failures: Vec<ToolFailure>,
    },
}

/// A single tool that failed during a generation pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolFailure {
    /// Tool name
    pub tool: String,
    /// Human-readable failure message
    pub message: String,
}

impl ToolFailure {
    fn join_names(failures: &[Self]) -> String {
        failures
            .iter()
            .map(|f| f.tool.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// JSON error body handed to front ends.
///
/// Carries a stable kind and a human-readable message, never source chains
/// or raw payloads.
///
/// # Examples
///
/// ```
/// use mcp_toolgen_core::Error;
///
/// let body = Error::ToolNotFound { tool: "add".to_string() }.to_error_body();
/// assert_eq!(body.error, "tool_not_found");
/// assert_eq!(body.message, "Tool not found: add");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    /// Stable error kind
    pub error: &'static str,
    /// Human-readable message
    pub message: String,
}

impl Error {
    /// Returns `true` if this is a connection error.
    ///
    /// # Examples
    ///
    /// ```
    /// use mcp_toolgen_core::Error;
    ///
    /// let err = Error::ConnectionFailed {
    ///     server: "http://localhost:3000/mcp".to_string(),
    ///     source: "connection refused".into(),
    /// };
    /// assert!(err.is_connection_error());
    /// ```
    #[must_use]
    pub const fn is_connection_error(&self) -> bool {
        matches!(self, Self::ConnectionFailed { .. })
    }

    /// Returns `true` if this is a protocol error.
    #[must_use]
    pub const fn is_protocol_error(&self) -> bool {
        matches!(self, Self::ProtocolError { .. })
    }

    /// Returns `true` if the host reported an unknown tool.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::ToolNotFound { .. })
    }

    /// Returns `true` if the host reported a tool handler failure.
    #[must_use]
    pub const fn is_execution_error(&self) -> bool {
        matches!(self, Self::ToolExecutionFailed { .. })
    }

    /// Returns `true` if the response codec could not extract a payload.
    ///
    /// # Examples
    ///
    /// ```
    /// use mcp_toolgen_core::Error;
    ///
    /// let err = Error::MalformedResponse {
    ///     reason: "no text content".to_string(),
    /// };
    /// assert!(err.is_malformed_response());
    /// ```
    #[must_use]
    pub const fn is_malformed_response(&self) -> bool {
        matches!(self, Self::MalformedResponse { .. })
    }

    /// Returns `true` if this is a configuration error.
    #[must_use]
    pub const fn is_config_error(&self) -> bool {
        matches!(self, Self::ConfigError { .. })
    }

    /// Returns `true` if this is a validation error.
    #[must_use]
    pub const fn is_validation_error(&self) -> bool {
        matches!(self, Self::ValidationError { .. })
    }

    /// Returns `true` if this is an aggregate generation failure.
    #[must_use]
    pub const fn is_generation_failure(&self) -> bool {
        matches!(self, Self::GenerationFailed { .. })
    }

    /// Stable machine-readable kind of this error.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::ConnectionFailed { .. } => "connection_error",
            Self::ProtocolError { .. } => "protocol_error",
            Self::ToolNotFound { .. } => "tool_not_found",
            Self::ToolExecutionFailed { .. } => "tool_execution_error",
            Self::MalformedResponse { .. } => "malformed_response",
            Self::ConfigError { .. } => "config_error",
            Self::InvalidArgument(_) => "invalid_argument",
            Self::ValidationError { .. } => "validation_error",
            Self::SerializationError { .. } => "serialization_error",
            Self::FilesystemError { .. } => "filesystem_error",
            Self::GenerationFailed { .. } => "generation_failed",
        }
    }

    /// HTTP-equivalent status code for front ends.
    ///
    /// # Examples
    ///
    /// ```
    /// use mcp_toolgen_core::Error;
    ///
    /// let err = Error::ToolNotFound { tool: "nope".to_string() };
    /// assert_eq!(err.status_code(), 404);
    /// ```
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::InvalidArgument(_) | Self::ValidationError { .. } => 400,
            Self::ToolNotFound { .. } => 404,
            Self::ProtocolError { .. } | Self::MalformedResponse { .. } => 502,
            Self::ConnectionFailed { .. } => 503,
            Self::ToolExecutionFailed { .. }
            | Self::ConfigError { .. }
            | Self::SerializationError { .. }
            | Self::FilesystemError { .. }
            | Self::GenerationFailed { .. } => 500,
        }
    }

    /// Converts the error into a JSON-ready body.
    #[must_use]
    pub fn to_error_body(&self) -> ErrorBody {
        ErrorBody {
            error: self.kind(),
            message: self.to_string(),
        }
    }
}

/// Result type alias for MCP tool proxy generation.
///
/// # Examples
///
/// ```
/// use mcp_toolgen_core::{Error, Result};
///
/// fn parse_port(value: i64) -> Result<u16> {
///     u16::try_from(value).map_err(|_| Error::ConfigError {
///         message: format!("port out of range: {value}"),
///     })
/// }
///
/// assert!(parse_port(8000).is_ok());
/// assert!(parse_port(-1).is_err());
/// ```
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_error_detection() {
        let err = Error::ConnectionFailed {
            server: "http://localhost:3000/mcp".to_string(),
            source: "network error".into(),
        };
        assert!(err.is_connection_error());
        assert!(!err.is_protocol_error());
        assert_eq!(err.status_code(), 503);
    }

    #[test]
    fn test_protocol_error_keeps_payload_out_of_message() {
        let err = Error::ProtocolError {
            message: "tool listing is not an array".to_string(),
            payload: r#"{"tools": 42}"#.to_string(),
        };
        let body = err.to_error_body();
        assert_eq!(body.error, "protocol_error");
        assert!(!body.message.contains("42"));
    }

    #[test]
    fn test_tool_errors() {
        let missing = Error::ToolNotFound {
            tool: "add".to_string(),
        };
        assert!(missing.is_not_found());
        assert!(!missing.is_execution_error());

        let failed = Error::ToolExecutionFailed {
            tool: "divide".to_string(),
            message: "Division by zero is not allowed".to_string(),
        };
        assert!(failed.is_execution_error());
        assert_eq!(
            failed.to_string(),
            "Tool 'divide' failed: Division by zero is not allowed"
        );
    }

    #[test]
    fn test_generation_failed_lists_tools() {
        let err = Error::GenerationFailed {
            failures: vec![
                ToolFailure {
                    tool: "listFiles".to_string(),
                    message: "permission denied".to_string(),
                },
                ToolFailure {
                    tool: "readFile".to_string(),
                    message: "permission denied".to_string(),
                },
            ],
        };

        assert!(err.is_generation_failure());
        assert_eq!(
            err.to_string(),
            "Code generation failed for 2 tool(s): listFiles, readFile"
        );
    }

    #[test]
    fn test_error_body_serialization() {
        let err = Error::MalformedResponse {
            reason: "no structured content and no text entry".to_string(),
        };
        let json = serde_json::to_value(err.to_error_body()).unwrap();
        assert_eq!(json["error"], "malformed_response");
        assert!(
            json["message"]
                .as_str()
                .unwrap()
                .starts_with("Malformed tool response")
        );
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(Error::InvalidArgument("x".to_string()).status_code(), 400);
        assert_eq!(
            Error::MalformedResponse {
                reason: String::new()
            }
            .status_code(),
            502
        );
        assert_eq!(
            Error::GenerationFailed { failures: vec![] }.status_code(),
            500
        );
    }

    #[test]
    fn test_filesystem_error_display() {
        let err = Error::FilesystemError {
            path: "/tmp/tools/add".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let display = format!("{err}");
        assert!(display.contains("/tmp/tools/add"));
        assert!(display.contains("denied"));
    }
}
