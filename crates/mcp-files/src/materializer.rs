//! Writes generated proxy modules to disk.
//!
//! Layout under the configured root:
//!
//! ```text
//! <root>/
//! ├── add/
//! │   └── add.ts
//! └── listFiles/
//!     └── listFiles.ts
//! ```
//!
//! Every tool is processed independently. A failure for one tool does not
//! roll back the others; failures are collected and reported together once
//! every tool has been attempted.
//!
//! # Examples
//!
//! ```
//! use mcp_toolgen_core::{CodegenConfig, ToolSchema};
//! use mcp_toolgen_files::FileMaterializer;
//! use serde_json::json;
//! # use tempfile::TempDir;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! # let temp = TempDir::new().unwrap();
//! let tool: ToolSchema = serde_json::from_value(json!({
//!     "name": "add",
//!     "inputSchema": { "properties": { "a": { "type": "number" } } }
//! }))
//! .unwrap();
//!
//! let config = CodegenConfig::with_output_dir(temp.path());
//! let materializer = FileMaterializer::new(config).unwrap();
//! let report = materializer.process_tools(&[tool]).await.unwrap();
//!
//! assert_eq!(report.count, 1);
//! assert!(temp.path().join("add/add.ts").exists());
//! # }
//! ```

use crate::inventory::GeneratedInventory;
use futures::future::join_all;
use mcp_toolgen_codegen::CodeEmitter;
use mcp_toolgen_core::{CodegenConfig, Error, Result, ToolFailure, ToolSchema};
use serde::Serialize;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Outcome of a successful generation pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationReport {
    /// Number of modules written
    pub count: usize,
    /// Tool names, in input order
    pub tools: Vec<String>,
    /// Paths of the written modules, joined onto the root
    #[serde(skip_serializing)]
    pub written: Vec<PathBuf>,
}

/// Generates and writes one module per tool under the output root.
#[derive(Debug)]
pub struct FileMaterializer<'a> {
    emitter: CodeEmitter<'a>,
}

impl FileMaterializer<'_> {
    /// Creates a materializer writing under `config.output_dir`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the configuration is invalid.
    pub fn new(config: CodegenConfig) -> Result<Self> {
        Ok(Self {
            emitter: CodeEmitter::new(config)?,
        })
    }

    /// Output root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.emitter.config().output_dir
    }

    /// Read-only view of what is currently on disk under the root.
    #[must_use]
    pub fn inventory(&self) -> GeneratedInventory {
        GeneratedInventory::from_config(self.emitter.config())
    }

    /// Generates a module for every tool and writes it to disk.
    ///
    /// Existing modules are overwritten in full. Running twice with the same
    /// tools leaves byte-identical files.
    ///
    /// # Errors
    ///
    /// - [`Error::FilesystemError`] if the root directory cannot be created;
    ///   no tool is attempted in that case.
    /// - [`Error::GenerationFailed`] listing every tool that failed, in input
    ///   order. Tools that succeeded remain on disk.
    pub async fn process_tools(&self, tools: &[ToolSchema]) -> Result<GenerationReport> {
        let root = self.root();
        tracing::info!(root = %root.display(), tools = tools.len(), "generating proxy modules");

        fs::create_dir_all(root)
            .await
            .map_err(|e| filesystem_error(root, e))?;

        let outcomes = join_all(tools.iter().map(|tool| self.process_tool(tool))).await;

        let mut report = GenerationReport {
            count: 0,
            tools: Vec::with_capacity(tools.len()),
            written: Vec::with_capacity(tools.len()),
        };
        let mut failures = Vec::new();

        for (tool, outcome) in tools.iter().zip(outcomes) {
            match outcome {
                Ok(path) => {
                    report.tools.push(tool.name.to_string());
                    report.written.push(path);
                }
                Err(e) => {
                    tracing::warn!(tool = %tool.name, error = %e, "failed to generate module");
                    failures.push(ToolFailure {
                        tool: tool.name.to_string(),
                        message: e.to_string(),
                    });
                }
            }
        }
        report.count = report.written.len();

        if !failures.is_empty() {
            return Err(Error::GenerationFailed { failures });
        }

        tracing::info!(count = report.count, "generated proxy modules");
        Ok(report)
    }

    async fn process_tool(&self, tool: &ToolSchema) -> Result<PathBuf> {
        tool.name.validate_path_segment()?;

        let module = self.emitter.generate(tool)?;
        let tool_dir = self.root().join(tool.name.as_str());

        fs::create_dir_all(&tool_dir)
            .await
            .map_err(|e| filesystem_error(&tool_dir, e))?;

        let path = tool_dir.join(&module.file_name);
        write_file_atomic(&path, &module.content).await?;

        tracing::debug!(tool = %tool.name, path = %path.display(), "wrote module");
        Ok(path)
    }
}

/// Writes `content` to a sibling temp file, then renames it over `path`.
async fn write_file_atomic(path: &Path, content: &str) -> Result<()> {
    let temp_path = path.with_extension("tmp");

    let mut file = fs::File::create(&temp_path)
        .await
        .map_err(|e| filesystem_error(&temp_path, e))?;
    file.write_all(content.as_bytes())
        .await
        .map_err(|e| filesystem_error(&temp_path, e))?;
    file.sync_all()
        .await
        .map_err(|e| filesystem_error(&temp_path, e))?;
    drop(file);

    if let Err(e) = fs::rename(&temp_path, path).await {
        match fs::remove_file(&temp_path).await {
            Err(cleanup) if cleanup.kind() != ErrorKind::NotFound => {
                tracing::warn!(path = %temp_path.display(), error = %cleanup, "failed to remove temp file");
            }
            _ => {}
        }
        return Err(filesystem_error(path, e));
    }

    Ok(())
}

fn filesystem_error(path: &Path, source: std::io::Error) -> Error {
    Error::FilesystemError {
        path: path.display().to_string(),
        source,
    }
}
