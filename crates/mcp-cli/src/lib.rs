//! mcp-toolgen CLI library.
//!
//! Exposes settings, formatters and command implementations so they can be
//! tested without spawning the binary.

pub mod actions;
pub mod commands;
pub mod formatters;
pub mod settings;

pub use actions::ConfigAction;
pub use settings::{Overrides, Settings};
