//! Tool registry client and response codec for MCP tool hosts.
//!
//! This crate owns the connection to a remote tool host. It provides:
//!
//! - [`ToolRegistryClient`]: connect, list tools, invoke tools, disconnect
//! - [`codec`]: structured-first extraction of tool response payloads
//! - [`Connector`] / [`ToolHost`]: the transport seam, with an `rmcp`-backed
//!   implementation in [`RmcpConnector`]
//!
//! # Architecture
//!
//! The registry client holds at most one live session. Sessions are opened
//! through a [`Connector`] and shared between concurrent callers. Tool
//! listings and responses are converted from `rmcp` wire types into the
//! schema model of `mcp-toolgen-core`.
//!
//! # Examples
//!
//! ```no_run
//! use mcp_toolgen_client::{ToolRegistryClient, codec};
//! use mcp_toolgen_core::{ClientConfig, ToolName};
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ToolRegistryClient::from_config(ClientConfig::default())?;
//!
//! let envelope = client
//!     .invoke(&ToolName::new("listFiles"), json!({"dirPath": "."}))
//!     .await?;
//! let files = codec::extract(&envelope)?;
//! println!("{files}");
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod codec;
mod host;
mod registry;
mod rmcp_host;

pub use host::{Connector, ToolHost};
pub use registry::ToolRegistryClient;
pub use rmcp_host::{RmcpConnector, RmcpSession};
