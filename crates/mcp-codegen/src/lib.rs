//! TypeScript proxy generation for MCP tools.
//!
//! Each discovered tool becomes one self-contained module that declares
//! its input and output interfaces and exports an async function forwarding
//! the call to a shared runtime (`callMCPTool`). The function decodes the
//! response itself: `structuredContent` first, then the first text part.
//!
//! The crate is pure: it renders text and leaves writing to the caller.
//!
//! # Examples
//!
//! ```
//! use mcp_toolgen_codegen::CodeEmitter;
//! use mcp_toolgen_core::{CodegenConfig, ToolSchema};
//! use serde_json::json;
//!
//! let tool: ToolSchema = serde_json::from_value(json!({
//!     "name": "listFiles",
//!     "description": "List files in a directory",
//!     "inputSchema": {
//!         "type": "object",
//!         "properties": { "dirPath": { "type": "string" } }
//!     }
//! }))
//! .unwrap();
//!
//! let emitter = CodeEmitter::new(CodegenConfig::default()).unwrap();
//! let module = emitter.generate(&tool).unwrap();
//! assert_eq!(module.relative_path().to_str(), Some("listFiles/listFiles.ts"));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod compiler;
mod emitter;
pub mod naming;
pub mod template_engine;
mod types;

pub use emitter::CodeEmitter;
pub use types::{GeneratedModule, ToolGenerationContext};
