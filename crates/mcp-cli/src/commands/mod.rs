//! Command implementations for the CLI.
//!
//! Commands that talk to the tool host split into a pure `execute` step,
//! which takes an already-built client and is exercised by tests, and a
//! `run` step that builds the client from settings and prints the result.

pub mod call;
pub mod common;
pub mod completions;
pub mod config;
pub mod generated;
pub mod list;
pub mod refresh;
pub mod show;
