//! Template engine for module generation using Handlebars.
//!
//! The engine runs in strict mode and ships with one built-in template,
//! [`TOOL_TEMPLATE`], which renders a single proxy module from a
//! [`ToolGenerationContext`](crate::ToolGenerationContext).
//!
//! # Examples
//!
//! ```
//! use mcp_toolgen_codegen::template_engine::TemplateEngine;
//! use serde_json::json;
//!
//! let mut engine = TemplateEngine::new().unwrap();
//! engine.register_template_string("greeting", "// {{name}}").unwrap();
//! assert_eq!(engine.render("greeting", &json!({"name": "add"})).unwrap(), "// add");
//! ```

use handlebars::Handlebars;
use mcp_toolgen_core::{Error, Result};
use serde::Serialize;

/// Name of the built-in proxy module template.
pub const TOOL_TEMPLATE: &str = "tool";

/// Template engine for code generation.
///
/// # Thread Safety
///
/// This type is `Send` and `Sync`.
#[derive(Debug)]
pub struct TemplateEngine<'a> {
    handlebars: Handlebars<'a>,
}

impl TemplateEngine<'_> {
    /// Creates an engine with the built-in templates registered.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SerializationError`] if a built-in template fails to
    /// parse.
    pub fn new() -> Result<Self> {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(true);

        let mut engine = Self { handlebars };
        engine.register_template_string(TOOL_TEMPLATE, include_str!("../templates/tool.ts.hbs"))?;
        Ok(engine)
    }

    /// Renders `template_name` with `context`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SerializationError`] if the template is unknown, the
    /// context cannot be serialized, or a referenced field is missing.
    pub fn render<T: Serialize>(&self, template_name: &str, context: &T) -> Result<String> {
        self.handlebars
            .render(template_name, context)
            .map_err(|e| Error::SerializationError {
                message: format!("Template rendering failed: {e}"),
                source: None,
            })
    }

    /// Registers an additional template.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SerializationError`] if the template string is invalid.
    pub fn register_template_string(&mut self, name: &str, template: &str) -> Result<()> {
        self.handlebars
            .register_template_string(name, template)
            .map_err(|e| Error::SerializationError {
                message: format!("Failed to register template '{name}': {e}"),
                source: None,
            })
    }

    /// Whether a template named `name` is registered.
    #[must_use]
    pub fn has_template(&self, name: &str) -> bool {
        self.handlebars.has_template(name)
    }
}
