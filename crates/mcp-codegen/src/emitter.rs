//! Proxy module emitter.
//!
//! [`CodeEmitter`] turns one [`ToolSchema`] into the text of one TypeScript
//! module. It never touches the filesystem; writing is left to the caller.

use crate::naming::{is_identifier, is_valid_function_name};
use crate::template_engine::{TOOL_TEMPLATE, TemplateEngine};
use crate::types::{GeneratedModule, ToolGenerationContext};
use mcp_toolgen_core::{CodegenConfig, Error, Result, ToolSchema};

/// Renders proxy modules for discovered tools.
///
/// # Examples
///
/// ```
/// use mcp_toolgen_codegen::CodeEmitter;
/// use mcp_toolgen_core::{CodegenConfig, ToolSchema};
/// use serde_json::json;
///
/// let tool: ToolSchema = serde_json::from_value(json!({
///     "name": "add",
///     "description": "Add two numbers",
///     "inputSchema": {
///         "type": "object",
///         "properties": { "a": { "type": "number" }, "b": { "type": "number" } },
///         "required": ["a", "b"]
///     }
/// }))
/// .unwrap();
///
/// let emitter = CodeEmitter::new(CodegenConfig::default()).unwrap();
/// let module = emitter.generate(&tool).unwrap();
///
/// assert_eq!(module.file_name, "add.ts");
/// assert!(module.content.contains("export async function add(input: AddInput)"));
/// ```
#[derive(Debug)]
pub struct CodeEmitter<'a> {
    engine: TemplateEngine<'a>,
    config: CodegenConfig,
}

impl CodeEmitter<'_> {
    /// Creates an emitter for `config`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`](mcp_toolgen_core::Error::ConfigError) if
    /// the configuration is invalid, or a serialization error if the built-in
    /// template fails to register.
    pub fn new(config: CodegenConfig) -> Result<Self> {
        config.validate()?;
        let engine = TemplateEngine::new()?;
        Ok(Self { engine, config })
    }

    /// Configuration in use.
    #[must_use]
    pub const fn config(&self) -> &CodegenConfig {
        &self.config
    }

    /// Derives the template context for `tool`.
    #[must_use]
    pub fn build_context(&self, tool: &ToolSchema) -> ToolGenerationContext {
        ToolGenerationContext::from_tool(tool, &self.config)
    }

    /// Renders a module from a prepared context.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ValidationError`] if the function or type names cannot
    /// be declared in TypeScript, or a serialization error if rendering fails.
    pub fn emit_module(&self, context: &ToolGenerationContext) -> Result<String> {
        if !is_valid_function_name(&context.function_name) {
            return Err(invalid_name("function_name", &context.function_name));
        }
        for (field, name) in [
            ("input_type", &context.input_type),
            ("return_type", &context.return_type),
        ] {
            if !is_identifier(name) {
                return Err(invalid_name(field, name));
            }
        }
        self.engine.render(TOOL_TEMPLATE, context)
    }

    /// Generates the module for `tool`.
    ///
    /// Output depends only on the tool and the configuration, so repeated
    /// calls produce byte-identical text.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the tool name does not yield a valid
    /// function name, or a serialization error if rendering fails.
    pub fn generate(&self, tool: &ToolSchema) -> Result<GeneratedModule> {
        let context = self.build_context(tool);
        let content = self.emit_module(&context)?;

        tracing::debug!(
            tool = %tool.name,
            function = %context.function_name,
            bytes = content.len(),
            "rendered proxy module"
        );

        Ok(GeneratedModule::new(
            tool.name.clone(),
            &self.config.file_extension,
            content,
        ))
    }
}

fn invalid_name(field: &str, name: &str) -> Error {
    Error::ValidationError {
        field: field.to_string(),
        reason: format!("'{name}' is not a valid TypeScript identifier"),
    }
}
