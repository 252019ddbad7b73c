//! Tool registry client: connection lifecycle, discovery and invocation.

use crate::codec;
use crate::host::{Connector, ToolHost};
use crate::rmcp_host::RmcpConnector;
use mcp_toolgen_core::{ClientConfig, Error, Result, ToolName, ToolResponseEnvelope, ToolSchema};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Owns the single connection to a tool host.
///
/// Construct one per process and share it by reference or `Arc`. The session
/// is opened lazily by the first call that needs it and reused afterwards.
/// A call that fails with a connection error drops the session, so the next
/// call reconnects. There are no retries: every call makes one attempt.
///
/// # Thread Safety
///
/// The session slot is guarded by an async mutex held across the connect
/// attempt, so concurrent callers never open more than one connection.
/// Requests themselves run on a shared session without holding the lock.
///
/// # Examples
///
/// ```no_run
/// use mcp_toolgen_client::ToolRegistryClient;
/// use mcp_toolgen_core::{ClientConfig, ToolName};
/// use serde_json::json;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = ToolRegistryClient::from_config(ClientConfig::default())?;
///
/// for tool in client.list_all_tools().await? {
///     println!("{}: {}", tool.name, tool.description);
/// }
///
/// let sum = client
///     .invoke_and_extract(&ToolName::new("add"), json!({"a": 2, "b": 2}))
///     .await?;
/// println!("{sum}");
///
/// client.disconnect().await;
/// # Ok(())
/// # }
/// ```
pub struct ToolRegistryClient {
    connector: Box<dyn Connector>,
    session: Mutex<Option<Arc<dyn ToolHost>>>,
}

impl ToolRegistryClient {
    /// Creates a client that opens sessions through `connector`.
    #[must_use]
    pub fn new(connector: impl Connector + 'static) -> Self {
        Self {
            connector: Box::new(connector),
            session: Mutex::new(None),
        }
    }

    /// Creates a client backed by the `rmcp` SDK.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if `config` is invalid.
    pub fn from_config(config: ClientConfig) -> Result<Self> {
        Ok(Self::new(RmcpConnector::new(config)?))
    }

    /// Human-readable address of the tool host.
    #[must_use]
    pub fn endpoint(&self) -> String {
        self.connector.endpoint()
    }

    /// Establishes the connection, or reuses the live one.
    ///
    /// A second call while connected returns without renegotiating.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConnectionFailed`] if the transport cannot be
    /// established or the handshake is rejected.
    pub async fn connect(&self) -> Result<()> {
        self.session().await.map(|_| ())
    }

    /// Returns `true` if a live session is held.
    pub async fn is_connected(&self) -> bool {
        self.session.lock().await.is_some()
    }

    /// Lists the tools the host currently advertises, in host order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConnectionFailed`] if no connection can be
    /// established and [`Error::ProtocolError`] if the listing cannot be
    /// parsed into tool schemas.
    pub async fn list_all_tools(&self) -> Result<Vec<ToolSchema>> {
        let session = self.session().await?;
        let result = session.list_tools().await;
        self.forget_on_connection_error(&session, result.as_ref().err())
            .await;

        let tools = result?;
        tracing::info!("Discovered {} tool(s) at {}", tools.len(), self.endpoint());
        Ok(tools)
    }

    /// Invokes `name` with `input` and returns the raw response envelope.
    ///
    /// `input` must be a JSON object; it becomes the tool's argument map.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidArgument`] if `input` is not an object (no I/O is done)
    /// - [`Error::ToolNotFound`] if the host has no such tool
    /// - [`Error::ToolExecutionFailed`] if the handler failed, including
    ///   envelopes flagged `isError`
    /// - [`Error::ConnectionFailed`] on transport failure
    pub async fn invoke(&self, name: &ToolName, input: Value) -> Result<ToolResponseEnvelope> {
        let Value::Object(arguments) = input else {
            return Err(Error::InvalidArgument(format!(
                "input for tool '{name}' must be a JSON object"
            )));
        };

        let session = self.session().await?;
        tracing::debug!("Invoking tool {name}");
        let result = session.call_tool(name, arguments).await;
        self.forget_on_connection_error(&session, result.as_ref().err())
            .await;

        let envelope = result?;
        if envelope.is_error() {
            let message = envelope
                .first_text()
                .unwrap_or("tool reported an error")
                .to_string();
            tracing::warn!("Tool {name} reported failure: {message}");
            return Err(Error::ToolExecutionFailed {
                tool: name.to_string(),
                message,
            });
        }

        Ok(envelope)
    }

    /// Invokes `name` and extracts the payload with the response codec.
    ///
    /// This is the path a generated proxy takes at runtime.
    ///
    /// # Errors
    ///
    /// Any error of [`invoke`](Self::invoke), plus
    /// [`Error::MalformedResponse`] if no payload can be extracted.
    pub async fn invoke_and_extract(&self, name: &ToolName, input: Value) -> Result<Value> {
        let envelope = self.invoke(name, input).await?;
        codec::extract(&envelope)
    }

    /// Releases the connection. Later calls are no-ops until the next
    /// operation reconnects.
    pub async fn disconnect(&self) {
        let session = self.session.lock().await.take();
        if let Some(session) = session {
            if let Err(e) = session.close().await {
                tracing::warn!("Error while closing session: {e}");
            }
            tracing::info!("Disconnected from {}", self.endpoint());
        }
    }

    async fn session(&self) -> Result<Arc<dyn ToolHost>> {
        let mut slot = self.session.lock().await;
        if let Some(session) = slot.as_ref() {
            return Ok(Arc::clone(session));
        }

        let session: Arc<dyn ToolHost> = Arc::from(self.connector.connect().await?);
        *slot = Some(Arc::clone(&session));
        drop(slot);

        tracing::info!("Connected to {}", self.endpoint());
        Ok(session)
    }

    async fn forget_on_connection_error(&self, session: &Arc<dyn ToolHost>, err: Option<&Error>) {
        if !err.is_some_and(Error::is_connection_error) {
            return;
        }

        let mut slot = self.session.lock().await;
        if slot.as_ref().is_some_and(|current| Arc::ptr_eq(current, session)) {
            *slot = None;
            tracing::warn!("Dropped broken session with {}", self.endpoint());
        }
    }
}

impl std::fmt::Debug for ToolRegistryClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistryClient")
            .field("endpoint", &self.connector.endpoint())
            .finish_non_exhaustive()
    }
}
