//! `generated`: list the modules currently on disk.

use crate::commands::common::print_output;
use crate::settings::Settings;
use anyhow::Result;
use mcp_toolgen_core::cli::{ExitCode, OutputFormat};
use mcp_toolgen_files::GeneratedInventory;

/// Runs the generated command.
///
/// # Errors
///
/// Returns an error if the output root cannot be inspected.
pub fn run(settings: &Settings, output_format: OutputFormat) -> Result<ExitCode> {
    let inventory = GeneratedInventory::from_config(&settings.codegen);
    let entries = inventory.list_generated()?;

    if entries.is_empty() && output_format != OutputFormat::Json {
        println!(
            "No generated tools under {} (run `mcp-toolgen refresh`)",
            inventory.root().display()
        );
        return Ok(ExitCode::SUCCESS);
    }

    print_output(&entries, output_format)?;
    Ok(ExitCode::SUCCESS)
}
