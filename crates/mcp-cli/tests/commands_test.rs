//! Integration tests for the CLI commands against an in-memory tool host.

use async_trait::async_trait;
use mcp_toolgen_cli::commands::common::exit_code_for;
use mcp_toolgen_cli::commands::{call, list, refresh};
use mcp_toolgen_client::{Connector, ToolHost, ToolRegistryClient};
use mcp_toolgen_core::cli::ExitCode;
use mcp_toolgen_core::{
    CodegenConfig, Error, Result, ToolName, ToolResponseEnvelope, ToolSchema,
};
use mcp_toolgen_files::FileMaterializer;
use serde_json::{Map, Value, json};
use std::future::pending;
use std::time::Duration;
use tempfile::TempDir;

#[derive(Debug)]
struct ArithmeticHost {
    hang: bool,
}

#[async_trait]
impl ToolHost for ArithmeticHost {
    async fn list_tools(&self) -> Result<Vec<ToolSchema>> {
        if self.hang {
            pending::<()>().await;
        }
        Ok(serde_json::from_value(json!([
            {
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
            },
            {
                "name": "listFiles",
                "description": "List files in a directory",
                "inputSchema": {
                    "type": "object",
                    "properties": { "dirPath": { "type": "string" } }
                }
            }
        ]))
        .unwrap())
    }

    async fn call_tool(
        &self,
        name: &ToolName,
        arguments: Map<String, Value>,
    ) -> Result<ToolResponseEnvelope> {
        match name.as_str() {
            "add" => {
                let a = arguments.get("a").and_then(Value::as_i64).unwrap_or(0);
                let b = arguments.get("b").and_then(Value::as_i64).unwrap_or(0);
                Ok(ToolResponseEnvelope::text(
                    json!({ "result": a + b }).to_string(),
                ))
            }
            _ => Err(Error::ToolNotFound {
                tool: name.to_string(),
            }),
        }
    }

    async fn close(&self) -> Result<()> {
        Ok(())
    }
}

#[derive(Debug, Default)]
struct ArithmeticConnector {
    hang: bool,
}

#[async_trait]
impl Connector for ArithmeticConnector {
    async fn connect(&self) -> Result<Box<dyn ToolHost>> {
        Ok(Box::new(ArithmeticHost { hang: self.hang }))
    }

    fn endpoint(&self) -> String {
        "memory://arithmetic".to_string()
    }
}

const TIMEOUT: Duration = Duration::from_secs(5);

#[tokio::test]
async fn test_refresh_writes_modules() {
    let temp = TempDir::new().unwrap();
    let client = ToolRegistryClient::new(ArithmeticConnector::default());
    let materializer =
        FileMaterializer::new(CodegenConfig::with_output_dir(temp.path())).unwrap();

    let report = refresh::execute(&client, &materializer, TIMEOUT)
        .await
        .unwrap();

    assert_eq!(report.count, 2);
    assert_eq!(
        serde_json::to_value(&report).unwrap(),
        json!({ "count": 2, "tools": ["add", "listFiles"] })
    );
    assert!(temp.path().join("add/add.ts").exists());
    assert!(temp.path().join("listFiles/listFiles.ts").exists());
}

#[tokio::test]
async fn test_list_summaries() {
    let client = ToolRegistryClient::new(ArithmeticConnector::default());
    let tools = list::execute(&client, TIMEOUT).await.unwrap();

    assert_eq!(tools.len(), 2);
    assert_eq!(tools[0].name, "add");
    assert_eq!(tools[0].inputs, ["a", "b"]);
    assert!(tools[0].has_output_schema);
    assert!(!tools[1].has_output_schema);
}

#[tokio::test]
async fn test_call_decodes_text_result() {
    let client = ToolRegistryClient::new(ArithmeticConnector::default());
    let input = call::parse_input(r#"{"a": 2, "b": 2}"#).unwrap();

    let value = call::execute(&client, &ToolName::new("add"), input, TIMEOUT)
        .await
        .unwrap();
    assert_eq!(value, json!({ "result": 4 }));
}

#[tokio::test]
async fn test_call_unknown_tool_exit_code() {
    let client = ToolRegistryClient::new(ArithmeticConnector::default());

    let err = call::execute(&client, &ToolName::new("divide"), json!({}), TIMEOUT)
        .await
        .unwrap_err();

    assert!(err.to_string().contains("failed to call tool 'divide'"));
    assert_eq!(exit_code_for(&err), ExitCode::INVALID_INPUT);
}

#[tokio::test(start_paused = true)]
async fn test_refresh_times_out() {
    let temp = TempDir::new().unwrap();
    let client = ToolRegistryClient::new(ArithmeticConnector { hang: true });
    let materializer =
        FileMaterializer::new(CodegenConfig::with_output_dir(temp.path())).unwrap();

    let err = refresh::execute(&client, &materializer, Duration::from_secs(1))
        .await
        .unwrap_err();

    assert_eq!(exit_code_for(&err), ExitCode::TIMEOUT);
    assert!(!temp.path().join("add").exists());
}
