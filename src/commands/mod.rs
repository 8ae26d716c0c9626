//! Command dispatch and handlers.

pub mod query;
pub mod show;
pub mod targets;

use std::env;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::cli::{Cli, Command};
use crate::context::ServiceContext;

/// Dispatch a parsed command to its handler.
///
/// When `CODEMODEL_RECORD` is set to a file path, every filesystem
/// interaction is recorded to a cassette at that path.
///
/// # Errors
///
/// Returns an error string if the selected command handler fails.
pub fn dispatch(cli: &Cli) -> Result<(), String> {
    let ctx = match env::var_os("CODEMODEL_RECORD") {
        Some(path) => ServiceContext::recording(&PathBuf::from(path)),
        None => ServiceContext::live(),
    };
    dispatch_with_context(&cli.command, &cli.build_dir, &ctx)
}

/// Dispatch a command with the given service context.
///
/// # Errors
///
/// Returns an error string if the selected command handler fails.
pub fn dispatch_with_context(
    command: &Command,
    build_dir: &Path,
    ctx: &ServiceContext,
) -> Result<(), String> {
    let output = match command {
        Command::Targets { format, target_type } => {
            targets::run(ctx, build_dir, *format, target_type.as_deref())?
        }
        Command::Show { name, format } => show::run(ctx, build_dir, name, *format)?,
        Command::Query => query::run(ctx, build_dir)?,
    };
    print!("{output}");
    Ok(())
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, String> {
    serde_json::to_string_pretty(value)
        .map(|json| json + "\n")
        .map_err(|e| format!("Failed to serialize JSON: {e}"))
}

fn to_yaml<T: Serialize + ?Sized>(value: &T) -> Result<String, String> {
    serde_yaml::to_string(value).map_err(|e| format!("Failed to serialize YAML: {e}"))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::adapters::memory::MemoryFileSystem;
    use crate::cli::OutputFormat;

    fn context() -> ServiceContext {
        let reply = "/b/.cmake/api/v1/reply";
        let fs = MemoryFileSystem::new()
            .with_file(
                format!("{reply}/codemodel-v2-1.json"),
                json!({
                    "configurations": [ {
                        "name": "Debug",
                        "targets": [ { "name": "app", "jsonFile": "target-app.json" } ]
                    } ]
                })
                .to_string(),
            )
            .with_file(
                format!("{reply}/target-app.json"),
                json!({ "type": "EXECUTABLE", "sources": [ { "path": "main.c" } ] }).to_string(),
            );
        ServiceContext::with_fs(Box::new(fs))
    }

    #[test]
    fn targets_yaml_uses_type_key() {
        let out = targets::run(&context(), Path::new("/b"), OutputFormat::Yaml, None).unwrap();
        assert!(out.contains("name: app"));
        assert!(out.contains("type: EXECUTABLE"));
    }

    #[test]
    fn show_json_is_a_single_record() {
        let out = show::run(&context(), Path::new("/b"), "app", OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(
            value,
            json!({ "name": "app", "type": "EXECUTABLE", "artifacts": [], "sources": ["main.c"] })
        );
    }

    #[test]
    fn query_then_targets_still_needs_a_reply() {
        let ctx = ServiceContext::with_fs(Box::new(MemoryFileSystem::new()));
        assert!(dispatch_with_context(&Command::Query, Path::new("/fresh"), &ctx).is_ok());
        let err = targets::run(&ctx, Path::new("/fresh"), OutputFormat::Text, None).unwrap_err();
        assert!(err.contains("no file-API reply"));
    }
}
