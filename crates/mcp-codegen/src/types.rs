//! Types for code generation.
//!
//! A [`ToolGenerationContext`] is derived from one [`ToolSchema`] for the
//! duration of a single generation pass and handed to the template. The
//! rendered text comes back as a [`GeneratedModule`].

use crate::compiler::{compile_interface, string_literal};
use crate::naming::{function_name, input_type_name, output_type_name};
use mcp_toolgen_core::{CodegenConfig, ToolName, ToolSchema};
use serde::Serialize;
use std::path::PathBuf;

/// Template context for one generated module.
///
/// Every field is always serialized (absent values as `null`) so the
/// template can run in strict mode.
///
/// # Examples
///
/// ```
/// use mcp_toolgen_codegen::ToolGenerationContext;
/// use mcp_toolgen_core::{CodegenConfig, ToolSchema};
/// use serde_json::json;
///
/// let tool: ToolSchema = serde_json::from_value(json!({
///     "name": "list_files",
///     "description": "List files in a directory",
///     "inputSchema": { "type": "object", "properties": { "dirPath": { "type": "string" } } }
/// }))
/// .unwrap();
///
/// let context = ToolGenerationContext::from_tool(&tool, &CodegenConfig::default());
/// assert_eq!(context.function_name, "listFiles");
/// assert_eq!(context.input_type, "ListFilesInput");
/// assert_eq!(context.return_type, "unknown");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolGenerationContext {
    /// Raw tool name as the host knows it
    pub tool_name: String,
    /// Tool name as a TypeScript string literal
    pub tool_literal: String,
    /// Name of the exported function
    pub function_name: String,
    /// Leading comment lines, already prefixed with `//`
    pub comment_lines: Vec<String>,
    /// Module specifier of the runtime helpers
    pub runtime_import: String,
    /// Compiled input interface, when interfaces are enabled
    pub input_interface: Option<String>,
    /// Compiled output interface, when enabled and an output schema exists
    pub output_interface: Option<String>,
    /// Type of the function parameter
    pub input_type: String,
    /// Type the returned promise resolves to
    pub return_type: String,
}

impl ToolGenerationContext {
    /// Derives the context for `tool` under `config`.
    #[must_use]
    pub fn from_tool(tool: &ToolSchema, config: &CodegenConfig) -> Self {
        let name = tool.name.as_str();

        let (input_interface, output_interface, input_type, return_type) =
            if config.generate_interfaces {
                let input_type = input_type_name(name);
                let input = compile_interface(&input_type, &tool.input_schema);

                match &tool.output_schema {
                    Some(schema) => {
                        let output_type = output_type_name(name);
                        let output = compile_interface(&output_type, schema);
                        (Some(input), Some(output), input_type, output_type)
                    }
                    None => (Some(input), None, input_type, "unknown".to_string()),
                }
            } else {
                (None, None, "any".to_string(), "any".to_string())
            };

        Self {
            tool_name: name.to_string(),
            tool_literal: string_literal(name),
            function_name: function_name(name, config.use_camel_case),
            comment_lines: comment_lines(&tool.description),
            runtime_import: config.runtime_import.clone(),
            input_interface,
            output_interface,
            input_type,
            return_type,
        }
    }
}

/// Characters that end a line in TypeScript source.
const LINE_TERMINATORS: [char; 4] = ['\n', '\r', '\u{2028}', '\u{2029}'];

fn comment_lines(description: &str) -> Vec<String> {
    if description.trim().is_empty() {
        return Vec::new();
    }

    description
        .replace("\r\n", "\n")
        .trim_end()
        .split(LINE_TERMINATORS)
        .map(|line| match line.trim_end() {
            "" => "//".to_string(),
            text => format!("// {text}"),
        })
        .collect()
}

/// Rendered module for one tool.
///
/// Created fresh on every generation pass; never versioned or diffed.
///
/// # Examples
///
/// ```
/// use mcp_toolgen_codegen::GeneratedModule;
/// use mcp_toolgen_core::ToolName;
/// use std::path::PathBuf;
///
/// let module = GeneratedModule::new(ToolName::new("add"), "ts", "export {}\n".to_string());
/// assert_eq!(module.file_name, "add.ts");
/// assert_eq!(module.relative_path(), PathBuf::from("add").join("add.ts"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedModule {
    /// Tool the module proxies
    pub tool_name: ToolName,
    /// File name, `<tool>.<ext>`
    pub file_name: String,
    /// Module source text
    pub content: String,
}

impl GeneratedModule {
    /// Creates a module named after `tool_name` with the given extension.
    #[must_use]
    pub fn new(tool_name: ToolName, extension: &str, content: String) -> Self {
        let file_name = format!("{}.{extension}", tool_name.as_str());
        Self {
            tool_name,
            file_name,
            content,
        }
    }

    /// Path of the module relative to the output root: `<tool>/<tool>.<ext>`.
    #[must_use]
    pub fn relative_path(&self) -> PathBuf {
        PathBuf::from(self.tool_name.as_str()).join(&self.file_name)
    }

    /// Size of the module text in bytes.
    #[must_use]
    pub fn size(&self) -> usize {
        self.content.len()
    }
}
