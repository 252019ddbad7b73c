//! Helpers shared by the commands.

use crate::formatters::format_output;
use crate::settings::Settings;
use anyhow::Result;
use mcp_toolgen_client::ToolRegistryClient;
use mcp_toolgen_core::cli::{ExitCode, OutputFormat};
use mcp_toolgen_core::Error;
use serde::Serialize;
use std::future::Future;
use std::time::Duration;
use tokio::time::error::Elapsed;

/// Builds a registry client for the configured tool host.
///
/// No connection is made until the first call.
///
/// # Errors
///
/// Returns [`Error::ConfigError`] if the client settings are invalid.
pub fn registry_client(settings: &Settings) -> mcp_toolgen_core::Result<ToolRegistryClient> {
    ToolRegistryClient::from_config(settings.client.clone())
}

/// Runs `future` against the tool host with a deadline.
///
/// Expiry is reported as [`Error::ConnectionFailed`] with the
/// [`Elapsed`] error as its source.
///
/// # Errors
///
/// Returns the future's own error, or a connection error on expiry.
pub async fn with_timeout<T, F>(
    timeout: Duration,
    endpoint: String,
    future: F,
) -> mcp_toolgen_core::Result<T>
where
    F: Future<Output = mcp_toolgen_core::Result<T>>,
{
    tokio::time::timeout(timeout, future)
        .await
        .unwrap_or_else(|elapsed| {
            Err(Error::ConnectionFailed {
                server: endpoint,
                source: Box::new(elapsed),
            })
        })
}

/// Prints `data` to stdout in `format`.
///
/// # Errors
///
/// Returns an error if `data` cannot be serialized.
pub fn print_output<T: Serialize>(data: &T, format: OutputFormat) -> Result<()> {
    println!("{}", format_output(data, format)?);
    Ok(())
}

/// Process exit code for a failed command.
///
/// Deadlines map to [`ExitCode::TIMEOUT`]; other library errors use
/// [`ExitCode::for_error`].
#[must_use]
pub fn exit_code_for(err: &anyhow::Error) -> ExitCode {
    if err.chain().any(|cause| cause.is::<Elapsed>()) {
        return ExitCode::TIMEOUT;
    }

    err.downcast_ref::<Error>()
        .map_or(ExitCode::ERROR, ExitCode::for_error)
}
