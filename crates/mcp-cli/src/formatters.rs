//! Output formatters for CLI commands.
//!
//! Every command hands a serializable value to [`format_output`]; the chosen
//! [`OutputFormat`] only changes presentation:
//!
//! - `json`: pretty-printed JSON, stable for scripts
//! - `text`: plain `key: value` lines without color
//! - `pretty`: indented, colorized tree for terminals

use anyhow::Result;
use colored::Colorize;
use mcp_toolgen_core::cli::OutputFormat;
use mcp_toolgen_core::{Error, ErrorBody};
use serde::Serialize;
use serde_json::Value;

/// Formats `data` according to `format`.
///
/// # Errors
///
/// Returns an error if `data` cannot be serialized.
///
/// # Examples
///
/// ```
/// use mcp_toolgen_cli::formatters::format_output;
/// use mcp_toolgen_core::cli::OutputFormat;
/// use serde_json::json;
///
/// let report = json!({ "count": 2, "tools": ["add", "listFiles"] });
///
/// let text = format_output(&report, OutputFormat::Text)?;
/// assert_eq!(text, "count: 2\ntools:\n  - add\n  - listFiles");
///
/// let json = format_output(&report, OutputFormat::Json)?;
/// assert!(json.contains("\"count\": 2"));
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn format_output<T: Serialize>(data: &T, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(data)?),
        OutputFormat::Text => Ok(render(&serde_json::to_value(data)?, &Plain)),
        OutputFormat::Pretty => Ok(render(&serde_json::to_value(data)?, &Colored)),
    }
}

/// Formats a command failure for stderr.
///
/// Library errors keep their stable kind; anything else is reported as a
/// generic `error`.
#[must_use]
pub fn format_error(err: &anyhow::Error, format: OutputFormat) -> String {
    let body = err.downcast_ref::<Error>().map_or_else(
        || ErrorBody {
            error: "error",
            message: format!("{err:#}"),
        },
        Error::to_error_body,
    );

    match format {
        OutputFormat::Json => serde_json::to_string_pretty(&body)
            .unwrap_or_else(|_| format!("{{\"error\":\"{}\"}}", body.error)),
        OutputFormat::Text => format!("error: {}", body.message),
        OutputFormat::Pretty => format!("{} {}", "error:".red().bold(), body.message),
    }
}

trait Style {
    fn key(&self, key: &str) -> String;
    fn scalar(&self, value: &Value) -> String;
}

struct Plain;

impl Style for Plain {
    fn key(&self, key: &str) -> String {
        key.to_string()
    }

    fn scalar(&self, value: &Value) -> String {
        match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

struct Colored;

impl Style for Colored {
    fn key(&self, key: &str) -> String {
        key.blue().bold().to_string()
    }

    fn scalar(&self, value: &Value) -> String {
        match value {
            Value::Null => "null".dimmed().to_string(),
            Value::Bool(b) => b.to_string().yellow().to_string(),
            Value::Number(n) => n.to_string().cyan().to_string(),
            Value::String(s) => s.green().to_string(),
            other => other.to_string(),
        }
    }
}

fn render(value: &Value, style: &dyn Style) -> String {
    let mut lines = Vec::new();
    match value {
        Value::Object(map) if map.is_empty() => return "{}".to_string(),
        Value::Array(items) if items.is_empty() => return "[]".to_string(),
        Value::Object(_) | Value::Array(_) => push_value(value, 0, style, &mut lines),
        scalar => return style.scalar(scalar),
    }
    lines.join("\n")
}

fn push_value(value: &Value, depth: usize, style: &dyn Style, lines: &mut Vec<String>) {
    let pad = "  ".repeat(depth);
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                if is_nested(child) {
                    lines.push(format!("{pad}{}:", style.key(key)));
                    push_value(child, depth + 1, style, lines);
                } else {
                    lines.push(format!("{pad}{}: {}", style.key(key), inline(child, style)));
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                if is_nested(item) {
                    lines.push(format!("{pad}-"));
                    push_value(item, depth + 1, style, lines);
                } else {
                    lines.push(format!("{pad}- {}", inline(item, style)));
                }
            }
        }
        scalar => lines.push(format!("{pad}{}", style.scalar(scalar))),
    }
}

fn is_nested(value: &Value) -> bool {
    match value {
        Value::Object(map) => !map.is_empty(),
        Value::Array(items) => !items.is_empty(),
        _ => false,
    }
}

fn inline(value: &Value, style: &dyn Style) -> String {
    match value {
        Value::Object(_) => "{}".to_string(),
        Value::Array(_) => "[]".to_string(),
        scalar => style.scalar(scalar),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_is_pretty() {
        let out = format_output(&json!({ "a": 1 }), OutputFormat::Json).unwrap();
        assert_eq!(out, "{\n  \"a\": 1\n}");
    }

    #[test]
    fn test_text_nested_layout() {
        let value = json!({
            "tools": [
                { "name": "add", "size": 120 },
                { "name": "listFiles", "modified": null }
            ],
            "empty": {}
        });

        let out = format_output(&value, OutputFormat::Text).unwrap();
        let expected = "\
tools:
  -
    name: add
    size: 120
  -
    name: listFiles
    modified: null
empty: {}";
        assert_eq!(out, expected);
    }

    #[test]
    fn test_text_scalars_and_empties() {
        assert_eq!(format_output(&"plain", OutputFormat::Text).unwrap(), "plain");
        assert_eq!(format_output(&42, OutputFormat::Text).unwrap(), "42");
        assert_eq!(
            format_output(&Vec::<String>::new(), OutputFormat::Text).unwrap(),
            "[]"
        );
    }

    #[test]
    fn test_pretty_contains_values() {
        colored::control::set_override(false);
        let out = format_output(&json!({ "count": 2, "ok": true }), OutputFormat::Pretty).unwrap();
        assert!(out.contains("count"));
        assert!(out.contains('2'));
        assert!(out.contains("true"));
    }

    #[test]
    fn test_format_error_keeps_kind() {
        let err = anyhow::Error::new(Error::ToolNotFound {
            tool: "add".to_string(),
        });
        let out = format_error(&err, OutputFormat::Json);
        let body: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(body["error"], "tool_not_found");
        assert_eq!(body["message"], "Tool not found: add");

        assert_eq!(format_error(&err, OutputFormat::Text), "error: Tool not found: add");
    }

    #[test]
    fn test_format_error_generic() {
        let err = anyhow::anyhow!("boom").context("failed to load config");
        let out = format_error(&err, OutputFormat::Text);
        assert_eq!(out, "error: failed to load config: boom");
    }
}
