//! Core types, schema model, and errors for MCP tool proxy generation.
//!
//! This crate provides the foundational types shared by every other crate in
//! the workspace: the client that discovers tools, the code generator that
//! turns their schemas into TypeScript, and the materializer that writes the
//! generated modules to disk.
//!
//! # Architecture
//!
//! The core consists of:
//! - Strong domain types (`ToolName`)
//! - The schema model (`ToolSchema`, `SchemaFragment`, `PropertySchema`)
//! - The tool response envelope (`ToolResponseEnvelope`, `ContentPart`)
//! - Error hierarchy with contextual information
//! - Configuration types for the client and the code generator

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

mod config;
mod error;
mod schema;
mod types;

pub mod cli;

pub use config::{
    ClientConfig, ClientConfigBuilder, CodegenConfig, DEFAULT_RUNTIME_IMPORT, DEFAULT_SERVER_URL,
    TransportType,
};
pub use error::{Error, ErrorBody, Result, ToolFailure};
pub use schema::{
    ContentPart, PrimitiveType, PropertySchema, SchemaFragment, ToolResponseEnvelope, ToolSchema,
};
pub use types::ToolName;
