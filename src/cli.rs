//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Top-level CLI parser for `codemodel`.
#[derive(Debug, Parser)]
#[command(name = "codemodel", version, about = "List build targets from a CMake file-API reply")]
pub struct Cli {
    /// Build directory containing `.cmake/api/v1`.
    #[arg(long, global = true, default_value = ".")]
    pub build_dir: PathBuf,

    /// Log filter directive, e.g. `info` or `codemodel=debug`.
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// How target data is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
    /// YAML.
    Yaml,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the targets of the first configuration, in codemodel order.
    Targets {
        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
        /// Only list targets of this type, e.g. `EXECUTABLE`.
        #[arg(long = "type", value_name = "TYPE")]
        target_type: Option<String>,
    },
    /// Show the artifacts and sources of one target.
    Show {
        /// Target name.
        name: String,
        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Write the codemodel query file so the next configure run emits a reply.
    Query,
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command, OutputFormat};
    use clap::Parser;

    #[test]
    fn parses_targets_with_filter_and_format() {
        let cli =
            Cli::parse_from(["codemodel", "targets", "--type", "EXECUTABLE", "--format", "json"]);
        match cli.command {
            Command::Targets { format, target_type } => {
                assert_eq!(format, OutputFormat::Json);
                assert_eq!(target_type.as_deref(), Some("EXECUTABLE"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn build_dir_is_global_and_defaults_to_cwd() {
        let cli = Cli::parse_from(["codemodel", "query"]);
        assert_eq!(cli.build_dir, std::path::PathBuf::from("."));
        assert_eq!(cli.log_level, "warn");

        let cli = Cli::parse_from(["codemodel", "show", "app", "--build-dir", "out"]);
        assert_eq!(cli.build_dir, std::path::PathBuf::from("out"));
        assert!(matches!(cli.command, Command::Show { ref name, .. } if name == "app"));
    }
}
