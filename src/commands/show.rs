//! `codemodel show` command.

use std::fmt::Write as _;
use std::path::Path;

use crate::cli::OutputFormat;
use crate::codemodel::Target;
use crate::context::ServiceContext;
use crate::reply;

/// Execute the `show` command and return the rendered output.
///
/// # Errors
///
/// Returns an error string if the reply cannot be loaded or no target in
/// the first configuration is called `name`.
pub fn run(
    ctx: &ServiceContext,
    build_dir: &Path,
    name: &str,
    format: OutputFormat,
) -> Result<String, String> {
    let set = reply::load_targets(ctx.fs.as_ref(), build_dir).map_err(|e| e.to_string())?;
    let Some(target) = set.targets.iter().find(|t| t.name() == name) else {
        let available: Vec<&str> = set.targets.iter().map(Target::name).collect();
        return Err(format!("Target '{name}' not found. Available: {}", available.join(", ")));
    };

    match format {
        OutputFormat::Text => Ok(render_target(target)),
        OutputFormat::Json => super::to_json(target),
        OutputFormat::Yaml => super::to_yaml(target),
    }
}

fn render_target(target: &Target) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Target: {}", target.name());
    let _ = writeln!(out, "Type: {}", target.target_type());
    render_list(&mut out, "Artifacts", target.artifacts());
    render_list(&mut out, "Sources", target.sources());
    out
}

fn render_list(out: &mut String, title: &str, items: &[String]) {
    let _ = writeln!(out, "\n{title}:");
    if items.is_empty() {
        out.push_str("  (none)\n");
    }
    for item in items {
        let _ = writeln!(out, "  {item}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_lists_and_empty_marker() {
        let sources = vec!["a.c".into(), "b.c".into()];
        let target = Target::new("core", "STATIC_LIBRARY", vec![], sources);
        let text = render_target(&target);

        assert!(text.starts_with("Target: core\nType: STATIC_LIBRARY\n"));
        assert!(text.contains("Artifacts:\n  (none)\n"));
        assert!(text.contains("Sources:\n  a.c\n  b.c\n"));
    }
}
