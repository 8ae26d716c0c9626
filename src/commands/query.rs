//! `codemodel query` command.

use std::path::Path;

use crate::context::ServiceContext;
use crate::reply;

/// Execute the `query` command and return the rendered output.
///
/// # Errors
///
/// Returns an error string if the query file cannot be written.
pub fn run(ctx: &ServiceContext, build_dir: &Path) -> Result<String, String> {
    let path = reply::write_query(ctx.fs.as_ref(), build_dir).map_err(|e| e.to_string())?;
    Ok(format!(
        "Query written to {}\nRe-run the configure step to generate a codemodel reply.\n",
        path.display()
    ))
}
