//! Tool host backed by the official `rmcp` SDK.
//!
//! Supports the streamable HTTP client transport (the default) and a child
//! process speaking MCP over stdio. Wire types from `rmcp::model` are
//! converted into the workspace schema model by round-tripping through
//! `serde_json`, so any field the host adds is tolerated and any missing
//! required field surfaces as a protocol error.

use crate::host::{Connector, ToolHost};
use async_trait::async_trait;
use mcp_toolgen_core::{
    ClientConfig, Error, Result, ToolName, ToolResponseEnvelope, ToolSchema, TransportType,
};
use rmcp::model::{
    CallToolRequestParam, CallToolResult, ClientCapabilities, ClientInfo, ErrorCode, ErrorData,
    Implementation, ProtocolVersion, Tool,
};
use rmcp::service::{Peer, RunningService, ServiceError};
use rmcp::transport::{ConfigureCommandExt, StreamableHttpClientTransport, TokioChildProcess};
use rmcp::{RoleClient, ServiceExt};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::borrow::Cow;
use tokio::sync::Mutex;

type ClientService = RunningService<RoleClient, ClientInfo>;

/// Opens `rmcp` sessions according to a [`ClientConfig`].
///
/// # Examples
///
/// ```
/// use mcp_toolgen_client::RmcpConnector;
/// use mcp_toolgen_core::ClientConfig;
///
/// let connector = RmcpConnector::new(ClientConfig::default()).unwrap();
/// assert_eq!(connector.config().url, "http://localhost:3000/mcp");
/// ```
#[derive(Debug, Clone)]
pub struct RmcpConnector {
    config: ClientConfig,
}

impl RmcpConnector {
    /// Creates a connector for `config`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the configuration is invalid.
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Returns the connection settings.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn client_info(&self) -> ClientInfo {
        ClientInfo {
            protocol_version: ProtocolVersion::default(),
            capabilities: ClientCapabilities::default(),
            client_info: Implementation {
                name: self.config.client_name.clone(),
                version: self.config.client_version.clone(),
                ..Implementation::default()
            },
        }
    }

    async fn serve_stdio(&self, info: ClientInfo) -> Result<ClientService> {
        let endpoint = self.config.endpoint();
        let command = self
            .config
            .command
            .as_deref()
            .ok_or_else(|| Error::ConfigError {
                message: "stdio transport requires a command".to_string(),
            })?;

        let args = &self.config.args;
        let env = &self.config.env;
        let transport =
            TokioChildProcess::new(tokio::process::Command::new(command).configure(|cmd| {
                cmd.args(args).envs(env);
            }))
            .map_err(|e| connection_failed(&endpoint, e))?;

        info.serve(transport)
            .await
            .map_err(|e| connection_failed(&endpoint, e))
    }

    async fn serve_http(&self, info: ClientInfo) -> Result<ClientService> {
        let transport = StreamableHttpClientTransport::from_uri(self.config.url.as_str());
        info.serve(transport)
            .await
            .map_err(|e| connection_failed(&self.config.url, e))
    }
}

#[async_trait]
impl Connector for RmcpConnector {
    async fn connect(&self) -> Result<Box<dyn ToolHost>> {
        let endpoint = self.endpoint();
        tracing::info!(transport = %self.config.transport, "Connecting to tool host: {endpoint}");

        let info = self.client_info();
        let service = match self.config.transport {
            TransportType::Http => self.serve_http(info).await?,
            TransportType::Stdio => self.serve_stdio(info).await?,
        };

        if let Some(server) = service.peer_info() {
            tracing::info!(
                "Connected to {} {}",
                server.server_info.name,
                server.server_info.version
            );
        }

        Ok(Box::new(RmcpSession::new(endpoint, service)))
    }

    fn endpoint(&self) -> String {
        self.config.endpoint()
    }
}

/// A live `rmcp` client session.
///
/// Requests go through a cloned [`Peer`], so concurrent calls never wait on
/// each other; the running service is only locked to shut it down.
pub struct RmcpSession {
    endpoint: String,
    peer: Peer<RoleClient>,
    service: Mutex<Option<ClientService>>,
}

impl RmcpSession {
    fn new(endpoint: String, service: ClientService) -> Self {
        Self {
            endpoint,
            peer: service.peer().clone(),
            service: Mutex::new(Some(service)),
        }
    }
}

impl std::fmt::Debug for RmcpSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RmcpSession")
            .field("endpoint", &self.endpoint)
            .field("service", &"RunningService{..}")
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl ToolHost for RmcpSession {
    async fn list_tools(&self) -> Result<Vec<ToolSchema>> {
        let tools = self
            .peer
            .list_all_tools()
            .await
            .map_err(|e| classify_list_error(&self.endpoint, e))?;

        tracing::debug!("Host listed {} tool(s)", tools.len());
        tools.iter().map(tool_to_schema).collect()
    }

    async fn call_tool(
        &self,
        name: &ToolName,
        arguments: Map<String, Value>,
    ) -> Result<ToolResponseEnvelope> {
        let result = self
            .peer
            .call_tool(CallToolRequestParam {
                name: Cow::Owned(name.as_str().to_owned()),
                arguments: Some(arguments),
            })
            .await
            .map_err(|e| classify_call_error(&self.endpoint, name, e))?;

        result_to_envelope(&result)
    }

    async fn close(&self) -> Result<()> {
        let service = self.service.lock().await.take();
        if let Some(service) = service {
            service
                .cancel()
                .await
                .map_err(|e| connection_failed(&self.endpoint, e))?;
            tracing::debug!("Closed session with {}", self.endpoint);
        }
        Ok(())
    }
}

fn connection_failed(
    endpoint: &str,
    source: impl std::error::Error + Send + Sync + 'static,
) -> Error {
    Error::ConnectionFailed {
        server: endpoint.to_string(),
        source: Box::new(source),
    }
}

fn protocol_error(message: String, payload: String) -> Error {
    tracing::error!(payload = %payload, "{message}");
    Error::ProtocolError { message, payload }
}

fn is_unknown_tool(data: &ErrorData) -> bool {
    if data.code.0 == ErrorCode::METHOD_NOT_FOUND.0 {
        return true;
    }
    let message = data.message.to_lowercase();
    message.contains("unknown tool") || (message.contains("tool") && message.contains("not found"))
}

fn classify_call_error(endpoint: &str, tool: &ToolName, err: ServiceError) -> Error {
    match err {
        ServiceError::McpError(data) if is_unknown_tool(&data) => Error::ToolNotFound {
            tool: tool.to_string(),
        },
        ServiceError::McpError(data) => Error::ToolExecutionFailed {
            tool: tool.to_string(),
            message: data.message.into_owned(),
        },
        ServiceError::UnexpectedResponse => protocol_error(
            format!("unexpected response to tools/call for '{tool}'"),
            String::new(),
        ),
        other => connection_failed(endpoint, other),
    }
}

fn classify_list_error(endpoint: &str, err: ServiceError) -> Error {
    match err {
        ServiceError::McpError(data) => protocol_error(
            format!("tool listing rejected: {}", data.message),
            data.data.map(|d| d.to_string()).unwrap_or_default(),
        ),
        ServiceError::UnexpectedResponse => {
            protocol_error("unexpected response to tools/list".to_string(), String::new())
        }
        other => connection_failed(endpoint, other),
    }
}

fn convert<S: Serialize, T: DeserializeOwned>(wire: &S, what: &str) -> Result<T> {
    let raw = serde_json::to_value(wire).map_err(|e| Error::SerializationError {
        message: format!("failed to serialize {what}"),
        source: Some(e),
    })?;

    T::deserialize(&raw).map_err(|e| {
        protocol_error(
            format!("{what} does not match the expected shape: {e}"),
            raw.to_string(),
        )
    })
}

pub(crate) fn tool_to_schema(tool: &Tool) -> Result<ToolSchema> {
    convert(tool, "tool listing entry")
}

pub(crate) fn result_to_envelope(result: &CallToolResult) -> Result<ToolResponseEnvelope> {
    convert(result, "tool response")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tool_conversion() {
        let tool: Tool = serde_json::from_value(json!({
            "name": "add",
            "description": "Add two numbers",
            "inputSchema": {
                "type": "object",
                "properties": { "a": { "type": "number" }, "b": { "type": "number" } },
                "required": ["a", "b"]
            },
            "outputSchema": {
                "type": "object",
                "properties": { "result": { "type": "number" } }
            }
        }))
        .unwrap();

        let schema = tool_to_schema(&tool).unwrap();
        assert_eq!(schema.name.as_str(), "add");
        assert_eq!(schema.description, "Add two numbers");
        let names: Vec<&str> = schema.input_schema.property_names().collect();
        assert_eq!(names, ["a", "b"]);
        assert!(schema.output_schema.is_some());
    }

    #[test]
    fn test_tool_conversion_without_description() {
        let tool: Tool = serde_json::from_value(json!({
            "name": "ping",
            "inputSchema": { "type": "object" }
        }))
        .unwrap();

        let schema = tool_to_schema(&tool).unwrap();
        assert_eq!(schema.description, "");
        assert!(schema.input_schema.is_empty());
    }

    #[test]
    fn test_result_conversion() {
        let result: CallToolResult = serde_json::from_value(json!({
            "content": [{ "type": "text", "text": "{\"result\":4}" }],
            "structuredContent": { "result": 4 },
            "isError": false
        }))
        .unwrap();

        let envelope = result_to_envelope(&result).unwrap();
        assert_eq!(envelope.first_text(), Some("{\"result\":4}"));
        assert_eq!(envelope.structured_content, Some(json!({ "result": 4 })));
        assert!(!envelope.is_error());
    }

    #[test]
    fn test_unknown_tool_classification() {
        let tool = ToolName::new("nope");

        let err = classify_call_error(
            "http://localhost:3000/mcp",
            &tool,
            ServiceError::McpError(ErrorData::invalid_params("tool not found", None)),
        );
        assert!(err.is_not_found());

        let err = classify_call_error(
            "http://localhost:3000/mcp",
            &tool,
            ServiceError::McpError(ErrorData::new(
                ErrorCode::METHOD_NOT_FOUND,
                "no such method",
                None,
            )),
        );
        assert!(err.is_not_found());
    }

    #[test]
    fn test_handler_failure_classification() {
        let err = classify_call_error(
            "http://localhost:3000/mcp",
            &ToolName::new("divide"),
            ServiceError::McpError(ErrorData::internal_error(
                "Division by zero is not allowed",
                None,
            )),
        );
        assert!(err.is_execution_error());
        assert!(err.to_string().contains("Division by zero"));
    }

    #[test]
    fn test_transport_failure_classification() {
        let err = classify_call_error(
            "http://localhost:3000/mcp",
            &ToolName::new("add"),
            ServiceError::TransportClosed,
        );
        assert!(err.is_connection_error());

        let err = classify_list_error("node server.js", ServiceError::TransportClosed);
        assert!(err.is_connection_error());

        let err = classify_list_error("node server.js", ServiceError::UnexpectedResponse);
        assert!(err.is_protocol_error());
    }

    #[test]
    fn test_connector_rejects_invalid_config() {
        let config = ClientConfig {
            url: "localhost".to_string(),
            ..ClientConfig::default()
        };
        assert!(RmcpConnector::new(config).unwrap_err().is_config_error());
    }

    #[test]
    fn test_client_info_carries_identity() {
        let config = ClientConfig::builder()
            .client_info("proxy-generator", "1.0.0")
            .build()
            .unwrap();
        let info = RmcpConnector::new(config).unwrap().client_info();
        assert_eq!(info.client_info.name, "proxy-generator");
        assert_eq!(info.client_info.version, "1.0.0");
    }

    #[tokio::test]
    async fn test_connect_to_missing_command_fails() {
        let config = ClientConfig::builder()
            .stdio("/nonexistent/mcp-toolgen-test-server")
            .build()
            .unwrap();
        let connector = RmcpConnector::new(config).unwrap();

        let Err(err) = connector.connect().await else {
            panic!("connecting to a missing command should fail");
        };
        assert!(err.is_connection_error());
    }
}
