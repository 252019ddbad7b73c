//! `show`: print one generated module.

use crate::commands::common::print_output;
use crate::settings::Settings;
use anyhow::Result;
use mcp_toolgen_core::ToolName;
use mcp_toolgen_core::cli::{ExitCode, OutputFormat};
use mcp_toolgen_files::GeneratedInventory;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct ShownModule<'a> {
    tool: &'a str,
    content: &'a str,
}

/// Runs the show command.
///
/// JSON output wraps the module text; other formats print it verbatim.
///
/// # Errors
///
/// Returns an error if no module exists for `tool` or it cannot be read.
pub fn run(settings: &Settings, tool: &str, output_format: OutputFormat) -> Result<ExitCode> {
    let inventory = GeneratedInventory::from_config(&settings.codegen);
    let content = inventory.read_generated(&ToolName::new(tool))?;

    if output_format == OutputFormat::Json {
        print_output(&ShownModule { tool, content: &content }, output_format)?;
    } else {
        print!("{content}");
    }
    Ok(ExitCode::SUCCESS)
}
