//! Transport seam between the registry client and a concrete tool host.
//!
//! [`Connector`] opens sessions; [`ToolHost`] is one live session. The
//! production pair is [`RmcpConnector`](crate::RmcpConnector) and its session
//! type, but anything that speaks these traits can back a
//! [`ToolRegistryClient`](crate::ToolRegistryClient).

use async_trait::async_trait;
use mcp_toolgen_core::{Result, ToolName, ToolResponseEnvelope, ToolSchema};
use serde_json::{Map, Value};

/// A live session with a tool host.
///
/// Implementations must be thread-safe; the registry shares one session
/// between concurrent callers.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ToolHost: Send + Sync {
    /// Lists every tool the host advertises, in host order.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectionFailed`](mcp_toolgen_core::Error::ConnectionFailed)
    /// on transport failure and
    /// [`ProtocolError`](mcp_toolgen_core::Error::ProtocolError) when the
    /// listing cannot be read as tool schemas.
    async fn list_tools(&self) -> Result<Vec<ToolSchema>>;

    /// Invokes `name` with `arguments` and returns the raw envelope.
    ///
    /// # Errors
    ///
    /// Returns [`ToolNotFound`](mcp_toolgen_core::Error::ToolNotFound),
    /// [`ToolExecutionFailed`](mcp_toolgen_core::Error::ToolExecutionFailed)
    /// or [`ConnectionFailed`](mcp_toolgen_core::Error::ConnectionFailed)
    /// depending on how the host answered.
    async fn call_tool(
        &self,
        name: &ToolName,
        arguments: Map<String, Value>,
    ) -> Result<ToolResponseEnvelope>;

    /// Closes the session. Calling it more than once is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying transport did not shut down cleanly.
    async fn close(&self) -> Result<()>;
}

/// Opens sessions with a tool host.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Connector: Send + Sync {
    /// Establishes a transport and performs the protocol handshake.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectionFailed`](mcp_toolgen_core::Error::ConnectionFailed)
    /// if the transport cannot be established or the handshake is rejected.
    async fn connect(&self) -> Result<Box<dyn ToolHost>>;

    /// Human-readable address of the host, used in logs and errors.
    fn endpoint(&self) -> String;
}
