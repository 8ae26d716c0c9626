//! Stateless codemodel query.

use std::path::{Path, PathBuf};

use tracing::info;

use super::ReplyError;
use crate::ports::FileSystem;

/// Query file relative to the build directory. Its presence asks the build
/// tool to write a codemodel reply on the next configure run.
pub const QUERY_FILE: &str = ".cmake/api/v1/query/codemodel-v2";

/// Writes the empty codemodel query file into `build_dir`.
///
/// Returns the path written. Existing query files are left as they are.
///
/// # Errors
///
/// Returns [`ReplyError::Io`] if the file cannot be written.
pub fn write_query(fs: &dyn FileSystem, build_dir: &Path) -> Result<PathBuf, ReplyError> {
    let path = build_dir.join(QUERY_FILE);
    if fs.exists(&path) {
        info!(query = %path.display(), "query file already present");
        return Ok(path);
    }
    fs.write(&path, "").map_err(|source| ReplyError::Io { path: path.clone(), source })?;
    info!(query = %path.display(), "wrote codemodel query");
    Ok(path)
}
