//! `refresh`: discover every tool and regenerate its proxy module.

use crate::commands::common::{print_output, registry_client, with_timeout};
use crate::settings::Settings;
use anyhow::{Context, Result};
use mcp_toolgen_client::ToolRegistryClient;
use mcp_toolgen_core::cli::{ExitCode, OutputFormat};
use mcp_toolgen_files::{FileMaterializer, GenerationReport};
use std::time::Duration;
use tracing::info;

/// Lists tools through `client` and writes one module per tool.
///
/// # Errors
///
/// Returns an error if discovery fails or times out, or if any module
/// cannot be generated.
pub async fn execute(
    client: &ToolRegistryClient,
    materializer: &FileMaterializer<'_>,
    timeout: Duration,
) -> Result<GenerationReport> {
    let tools = with_timeout(timeout, client.endpoint(), client.list_all_tools())
        .await
        .with_context(|| format!("failed to list tools from {}", client.endpoint()))?;

    info!("Discovered {} tools", tools.len());

    let report = materializer
        .process_tools(&tools)
        .await
        .with_context(|| {
            format!(
                "failed to generate modules under {}",
                materializer.root().display()
            )
        })?;

    Ok(report)
}

/// Runs the refresh command.
///
/// # Errors
///
/// Returns an error if the settings are invalid or the refresh fails.
pub async fn run(settings: &Settings, output_format: OutputFormat) -> Result<ExitCode> {
    let client = registry_client(settings)?;
    let materializer = FileMaterializer::new(settings.codegen.clone())?;

    info!("Refreshing tools from {}", client.endpoint());
    let result = execute(&client, &materializer, settings.timeout()).await;
    client.disconnect().await;

    print_output(&result?, output_format)?;
    Ok(ExitCode::SUCCESS)
}
