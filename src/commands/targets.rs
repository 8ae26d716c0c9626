//! `codemodel targets` command.

use std::fmt::Write as _;
use std::path::Path;

use crate::cli::OutputFormat;
use crate::codemodel::Target;
use crate::context::ServiceContext;
use crate::reply::{self, TargetSet};

/// Execute the `targets` command and return the rendered output.
///
/// Lists the first configuration's targets in codemodel order, optionally
/// keeping only those whose type equals `target_type` (case-insensitive).
///
/// # Errors
///
/// Returns an error string if the reply cannot be loaded or serialized.
pub fn run(
    ctx: &ServiceContext,
    build_dir: &Path,
    format: OutputFormat,
    target_type: Option<&str>,
) -> Result<String, String> {
    let mut set = reply::load_targets(ctx.fs.as_ref(), build_dir).map_err(|e| e.to_string())?;
    if let Some(wanted) = target_type {
        set.targets.retain(|t| t.target_type().eq_ignore_ascii_case(wanted));
    }

    match format {
        OutputFormat::Text => Ok(render_table(&set)),
        OutputFormat::Json => super::to_json(&set.targets),
        OutputFormat::Yaml => super::to_yaml(&set.targets),
    }
}

fn render_table(set: &TargetSet) -> String {
    let mut out = String::new();
    if let Some(name) = &set.configuration {
        let _ = writeln!(out, "Configuration: {name}");
    }
    if set.targets.is_empty() {
        out.push_str("No targets found.\n");
        return out;
    }

    let name_width = column_width(&set.targets, "NAME", |t| t.name().len());
    let type_width = column_width(&set.targets, "TYPE", |t| t.target_type().len());

    let _ = writeln!(
        out,
        "{:<name_width$}  {:<type_width$}  {:>9}  {:>7}",
        "NAME", "TYPE", "ARTIFACTS", "SOURCES",
    );
    let _ = writeln!(out, "{:-<name_width$}  {:-<type_width$}  {:->9}  {:->7}", "", "", "", "");
    for target in &set.targets {
        let _ = writeln!(
            out,
            "{:<name_width$}  {:<type_width$}  {:>9}  {:>7}",
            target.name(),
            target.target_type(),
            target.artifacts().len(),
            target.sources().len(),
        );
    }
    out
}

fn column_width(targets: &[Target], header: &str, len: impl Fn(&Target) -> usize) -> usize {
    targets.iter().map(len).max().unwrap_or(0).max(header.len())
}
