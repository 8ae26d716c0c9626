//! Core library entry for the `codemodel` CLI.
//!
//! [`codemodel::read`] flattens a file-API codemodel into [`codemodel::Target`]
//! records; [`reply`] finds and loads the documents inside a build tree.

pub mod adapters;
pub mod cassette;
pub mod cli;
pub mod codemodel;
pub mod commands;
pub mod context;
pub mod ports;
pub mod reply;

use clap::Parser;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or command execution fails.
pub fn run<I, T>(args: I) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = match cli::Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) if !err.use_stderr() => {
            // --help and --version
            print!("{err}");
            return Ok(());
        }
        Err(err) => return Err(err.to_string()),
    };
    init_logging(&cli.log_level);
    commands::dispatch(&cli)
}

/// Installs a stderr `fmt` subscriber. Later calls are no-ops.
fn init_logging(level: &str) {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .try_init();
}
