//! `list`: show the tools the host currently exposes.

use crate::commands::common::{print_output, registry_client, with_timeout};
use crate::settings::Settings;
use anyhow::{Context, Result};
use mcp_toolgen_client::ToolRegistryClient;
use mcp_toolgen_core::cli::{ExitCode, OutputFormat};
use mcp_toolgen_core::ToolSchema;
use serde::Serialize;
use std::time::Duration;

/// One discovered tool as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolSummary {
    /// Tool name
    pub name: String,
    /// Tool description
    pub description: String,
    /// Input property names, in source order
    pub inputs: Vec<String>,
    /// Whether the tool declares an output schema
    pub has_output_schema: bool,
}

impl From<&ToolSchema> for ToolSummary {
    fn from(tool: &ToolSchema) -> Self {
        Self {
            name: tool.name.to_string(),
            description: tool.description.clone(),
            inputs: tool
                .input_schema
                .property_names()
                .map(ToString::to_string)
                .collect(),
            has_output_schema: tool.output_schema.is_some(),
        }
    }
}

/// Lists tools through `client`.
///
/// # Errors
///
/// Returns an error if discovery fails or times out.
pub async fn execute(client: &ToolRegistryClient, timeout: Duration) -> Result<Vec<ToolSummary>> {
    let tools = with_timeout(timeout, client.endpoint(), client.list_all_tools())
        .await
        .with_context(|| format!("failed to list tools from {}", client.endpoint()))?;

    Ok(tools.iter().map(ToolSummary::from).collect())
}

/// Runs the list command.
///
/// # Errors
///
/// Returns an error if the settings are invalid or discovery fails.
pub async fn run(settings: &Settings, output_format: OutputFormat) -> Result<ExitCode> {
    let client = registry_client(settings)?;
    let result = execute(&client, settings.timeout()).await;
    client.disconnect().await;

    print_output(&result?, output_format)?;
    Ok(ExitCode::SUCCESS)
}
