//! mcp-toolgen: discover MCP tools and generate TypeScript proxies.
//!
//! # Examples
//!
//! ```bash
//! # Regenerate every proxy module from the default host
//! mcp-toolgen refresh
//!
//! # Same, against a stdio server
//! mcp-toolgen refresh --server-command node --server-arg server.js
//!
//! # Call a tool directly
//! mcp-toolgen call add --input '{"a": 2, "b": 2}'
//!
//! # Inspect what is on disk
//! mcp-toolgen generated
//! mcp-toolgen show add
//! ```

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use mcp_toolgen_cli::commands::{self, common::exit_code_for};
use mcp_toolgen_cli::formatters::format_error;
use mcp_toolgen_cli::{ConfigAction, Overrides, Settings};
use mcp_toolgen_core::cli::{ExitCode, OutputFormat};
use std::path::{Path, PathBuf};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Discover MCP tools and generate typed TypeScript proxies for them.
#[derive(Parser, Debug)]
#[command(name = "mcp-toolgen")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    /// Output format (json, text, pretty)
    #[arg(long = "format", global = true, default_value = "pretty")]
    format: String,

    /// Config file (default: platform config dir)
    #[arg(long, global = true, env = "MCP_TOOLGEN_CONFIG")]
    config: Option<PathBuf>,

    #[command(flatten)]
    overrides: Overrides,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Discover all tools and regenerate their proxy modules.
    Refresh,

    /// List the tools the host exposes.
    List,

    /// Invoke a tool and print its decoded result.
    Call {
        /// Tool name
        tool: String,

        /// Tool input as a JSON object
        #[arg(long, default_value = commands::call::DEFAULT_INPUT)]
        input: String,
    },

    /// List generated modules on disk.
    Generated,

    /// Print a generated module.
    Show {
        /// Tool name
        tool: String,
    },

    /// Manage the config file.
    Config {
        /// Config action
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions.
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.log_json);

    let output_format = cli
        .format
        .parse::<OutputFormat>()
        .map_err(|e| anyhow::anyhow!("{e}"))?;

    let exit_code = match execute_command(cli, output_format).await {
        Ok(code) => code,
        Err(err) => {
            tracing::debug!("command failed: {err:?}");
            eprintln!("{}", format_error(&err, output_format));
            exit_code_for(&err)
        }
    };

    std::process::exit(exit_code.as_i32());
}

/// Initializes logging on stderr.
///
/// `RUST_LOG` wins unless `--verbose` is given.
fn init_logging(verbose: bool, json: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

/// Routes a parsed command line to its handler.
async fn execute_command(cli: Cli, output_format: OutputFormat) -> Result<ExitCode> {
    let config_path = cli.config.as_deref();
    let settings = || effective_settings(config_path, &cli.overrides);

    match cli.command {
        Commands::Refresh => commands::refresh::run(&settings()?, output_format).await,
        Commands::List => commands::list::run(&settings()?, output_format).await,
        Commands::Call { tool, input } => {
            commands::call::run(&settings()?, tool, &input, output_format).await
        }
        Commands::Generated => commands::generated::run(&settings()?, output_format),
        Commands::Show { tool } => commands::show::run(&settings()?, &tool, output_format),
        // init must work even when the existing file is broken
        Commands::Config {
            action: action @ ConfigAction::Init { .. },
        } => commands::config::run(&action, config_path, &Settings::default(), output_format),
        Commands::Config { action } => {
            commands::config::run(&action, config_path, &settings()?, output_format)
        }
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            commands::completions::run(shell, &mut cmd)
        }
    }
}

/// Loads the config file, then applies flag and environment overrides.
fn effective_settings(config_path: Option<&Path>, overrides: &Overrides) -> Result<Settings> {
    let settings = Settings::load(config_path)?.with_overrides(overrides);
    settings.validate()?;
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mcp_toolgen_core::TransportType;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_parsing_refresh() {
        let cli = Cli::parse_from(["mcp-toolgen", "refresh"]);
        assert!(matches!(cli.command, Commands::Refresh));
        assert_eq!(cli.format, "pretty");
    }

    #[test]
    fn test_cli_parsing_call_default_input() {
        let cli = Cli::parse_from(["mcp-toolgen", "call", "listFiles"]);
        if let Commands::Call { tool, input } = cli.command {
            assert_eq!(tool, "listFiles");
            assert_eq!(input, "{}");
        } else {
            panic!("Expected Call command");
        }
    }

    #[test]
    fn test_cli_parsing_call_with_input() {
        let cli = Cli::parse_from(["mcp-toolgen", "call", "add", "--input", r#"{"a":1,"b":2}"#]);
        if let Commands::Call { input, .. } = cli.command {
            assert_eq!(input, r#"{"a":1,"b":2}"#);
        } else {
            panic!("Expected Call command");
        }
    }

    #[test]
    fn test_cli_global_overrides() {
        let cli = Cli::parse_from([
            "mcp-toolgen",
            "refresh",
            "--transport",
            "stdio",
            "--server-command",
            "node",
            "--server-arg=server.js",
            "--output-dir",
            "/tmp/tools",
            "--no-interfaces",
            "--timeout",
            "5",
        ]);

        assert_eq!(cli.overrides.transport, Some(TransportType::Stdio));
        assert_eq!(cli.overrides.command.as_deref(), Some("node"));
        assert_eq!(cli.overrides.args, vec!["server.js"]);
        assert_eq!(cli.overrides.output_dir, Some(PathBuf::from("/tmp/tools")));
        assert!(cli.overrides.no_interfaces);
        assert_eq!(cli.overrides.timeout, Some(5));
    }

    #[test]
    fn test_cli_parsing_config_actions() {
        let cli = Cli::parse_from(["mcp-toolgen", "config", "init", "--force"]);
        assert!(matches!(
            cli.command,
            Commands::Config {
                action: ConfigAction::Init { force: true }
            }
        ));

        let cli = Cli::parse_from(["mcp-toolgen", "config", "show"]);
        assert!(matches!(
            cli.command,
            Commands::Config {
                action: ConfigAction::Show
            }
        ));
    }

    #[test]
    fn test_cli_parsing_completions() {
        let cli = Cli::parse_from(["mcp-toolgen", "completions", "zsh"]);
        if let Commands::Completions { shell } = cli.command {
            assert_eq!(shell, Shell::Zsh);
        } else {
            panic!("Expected Completions command");
        }
    }

    #[test]
    fn test_cli_flags() {
        let cli = Cli::parse_from(["mcp-toolgen", "--verbose", "--log-json", "--format", "json", "list"]);
        assert!(cli.verbose);
        assert!(cli.log_json);
        assert_eq!(cli.format, "json");
    }
}
