//! On-disk materialization of generated proxy modules.
//!
//! [`FileMaterializer`] writes one module per tool into `<root>/<tool>/`,
//! and [`GeneratedInventory`] lists and reads what is already there.
//!
//! # Examples
//!
//! ```
//! use mcp_toolgen_core::{CodegenConfig, ToolName, ToolSchema};
//! use mcp_toolgen_files::FileMaterializer;
//! use serde_json::json;
//! # use tempfile::TempDir;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! # let temp = TempDir::new().unwrap();
//! let tools: Vec<ToolSchema> = serde_json::from_value(json!([
//!     { "name": "add", "inputSchema": {} },
//!     { "name": "listFiles", "inputSchema": {} }
//! ]))
//! .unwrap();
//!
//! let materializer = FileMaterializer::new(CodegenConfig::with_output_dir(temp.path())).unwrap();
//! materializer.process_tools(&tools).await.unwrap();
//!
//! let inventory = materializer.inventory();
//! assert_eq!(inventory.list_generated().unwrap().len(), 2);
//! assert!(inventory.read_generated(&ToolName::new("add")).unwrap().contains("export async function add"));
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

mod inventory;
mod materializer;

pub use inventory::{GeneratedEntry, GeneratedInventory};
pub use materializer::{FileMaterializer, GenerationReport};
