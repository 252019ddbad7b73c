//! Strong domain types.
//!
//! Tool names travel through every layer of the pipeline: they address the
//! remote tool, name the generated directory and file, and seed the generated
//! type and function names. A newtype keeps them from being confused with the
//! other strings flowing through the same code.
//!
//! # Examples
//!
//! ```
//! use mcp_toolgen_core::ToolName;
//!
//! let tool = ToolName::new("listFiles");
//! assert_eq!(tool.as_str(), "listFiles");
//! assert!(tool.validate_path_segment().is_ok());
//! ```

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Tool name identifier (newtype over String).
///
/// # Examples
///
/// ```
/// use mcp_toolgen_core::ToolName;
///
/// let tool = ToolName::new("write_file");
/// assert_eq!(tool.to_string(), "write_file");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ToolName(String);

impl ToolName {
    /// Creates a new tool name.
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the tool name as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `ToolName` and returns the inner `String`.
    #[inline]
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Checks that the name can be used as a single directory or file name.
    ///
    /// Generated modules live at `<root>/<name>/<name>.<ext>`, so a name must
    /// not be empty, must not contain path separators or NUL, and must not be
    /// `.` or `..`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ValidationError`] describing the first violation.
    ///
    /// # Examples
    ///
    /// ```
    /// use mcp_toolgen_core::ToolName;
    ///
    /// assert!(ToolName::new("add").validate_path_segment().is_ok());
    /// assert!(ToolName::new("../etc").validate_path_segment().is_err());
    /// assert!(ToolName::new("").validate_path_segment().is_err());
    /// ```
    pub fn validate_path_segment(&self) -> Result<()> {
        let reason = if self.0.is_empty() {
            Some("tool name cannot be empty")
        } else if self.0 == "." || self.0 == ".." {
            Some("tool name cannot be a relative directory reference")
        } else if self.0.contains(['/', '\\']) {
            Some("tool name cannot contain path separators")
        } else if self.0.contains('\0') {
            Some("tool name cannot contain NUL bytes")
        } else {
            None
        };

        match reason {
            Some(reason) => Err(Error::ValidationError {
                field: format!("tool name '{}'", self.0.escape_debug()),
                reason: reason.to_string(),
            }),
            None => Ok(()),
        }
    }
}

impl fmt::Display for ToolName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ToolName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ToolName {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for ToolName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
