//! `call`: invoke one tool and print its decoded result.

use crate::commands::common::{print_output, registry_client, with_timeout};
use crate::settings::Settings;
use anyhow::{Context, Result};
use mcp_toolgen_client::ToolRegistryClient;
use mcp_toolgen_core::cli::{ExitCode, OutputFormat};
use mcp_toolgen_core::{Error, ToolName};
use serde_json::Value;
use std::time::Duration;
use tracing::info;

/// Input used when `--input` is not given.
pub const DEFAULT_INPUT: &str = "{}";

/// Parses the `--input` argument.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] if `raw` is not a JSON object.
///
/// # Examples
///
/// ```
/// use mcp_toolgen_cli::commands::call::parse_input;
/// use serde_json::json;
///
/// assert_eq!(parse_input(r#"{"a": 2}"#).unwrap(), json!({ "a": 2 }));
/// assert!(parse_input("[1, 2]").is_err());
/// ```
pub fn parse_input(raw: &str) -> mcp_toolgen_core::Result<Value> {
    let value: Value = serde_json::from_str(raw)
        .map_err(|e| Error::InvalidArgument(format!("--input is not valid JSON: {e}")))?;

    if !value.is_object() {
        return Err(Error::InvalidArgument(
            "--input must be a JSON object".to_string(),
        ));
    }
    Ok(value)
}

/// Invokes `tool` through `client` and decodes the response.
///
/// # Errors
///
/// Returns an error if the call fails, times out, or the response cannot be
/// decoded.
pub async fn execute(
    client: &ToolRegistryClient,
    tool: &ToolName,
    input: Value,
    timeout: Duration,
) -> Result<Value> {
    let value = with_timeout(
        timeout,
        client.endpoint(),
        client.invoke_and_extract(tool, input),
    )
    .await
    .with_context(|| format!("failed to call tool '{tool}'"))?;

    Ok(value)
}

/// Runs the call command.
///
/// # Errors
///
/// Returns an error if the input is invalid or the call fails.
pub async fn run(
    settings: &Settings,
    tool: String,
    input: &str,
    output_format: OutputFormat,
) -> Result<ExitCode> {
    let tool = ToolName::new(tool);
    let input = parse_input(input)?;
    let client = registry_client(settings)?;

    info!("Calling tool '{}' on {}", tool, client.endpoint());
    let result = execute(&client, &tool, input, settings.timeout()).await;
    client.disconnect().await;

    print_output(&result?, output_format)?;
    Ok(ExitCode::SUCCESS)
}
