//! File-API reply directory access.
//!
//! The build tool answers queries by writing JSON documents under
//! `<build>/.cmake/api/v1/reply`:
//!
//! ```text
//! reply/
//!   ├── index-<timestamp>.json        points at the current replies
//!   ├── codemodel-v2-<hash>.json      root document read by `codemodel::read`
//!   └── target-<name>-<hash>.json     one detail document per target
//! ```
//!
//! All I/O goes through the `FileSystem` port.

mod query;

pub use query::{write_query, QUERY_FILE};

use std::path::{Component, Path, PathBuf};

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::codemodel::{self, BoxError, ReadError, ResolveSecondary, Target};
use crate::ports::FileSystem;

/// Reply directory relative to the build directory.
pub const REPLY_DIR: &str = ".cmake/api/v1/reply";

const CODEMODEL_KIND: &str = "codemodel-v2";

/// Failures while locating or loading reply documents.
#[derive(Debug, Error)]
pub enum ReplyError {
    /// The build directory has no reply directory yet.
    #[error(
        "no file-API reply at {}; run `codemodel query` and re-run the configure step",
        .0.display()
    )]
    MissingReplyDir(PathBuf),

    /// Neither an index nor a bare codemodel document names a codemodel reply.
    #[error("no codemodel-v2 reply in {}", .0.display())]
    NoCodemodel(PathBuf),

    /// The build tool answered the codemodel query with an error.
    #[error("build tool rejected the codemodel-v2 query: {0}")]
    Rejected(String),

    /// A `jsonFile` reference points outside the reply directory.
    #[error("reference {0:?} escapes the reply directory")]
    EscapingReference(String),

    /// Filesystem access failed.
    #[error("failed to access {}: {source}", .path.display())]
    Io {
        /// Path being accessed.
        path: PathBuf,
        /// Error from the filesystem port.
        #[source]
        source: BoxError,
    },

    /// A reply document is not valid JSON.
    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        /// Path of the document.
        path: PathBuf,
        /// Parser error.
        #[source]
        source: serde_json::Error,
    },

    /// The codemodel could not be flattened.
    #[error(transparent)]
    Read(#[from] ReadError),
}

/// The flattened targets of one codemodel reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetSet {
    /// Name of the configuration the targets were read from.
    pub configuration: Option<String>,
    /// Targets in codemodel order.
    pub targets: Vec<Target>,
}

/// A reply directory inside a build tree.
pub struct ReplyDirectory<'a> {
    fs: &'a dyn FileSystem,
    dir: PathBuf,
}

impl<'a> ReplyDirectory<'a> {
    /// Opens the reply directory of `build_dir`.
    ///
    /// # Errors
    ///
    /// Returns [`ReplyError::MissingReplyDir`] if the directory does not exist.
    pub fn open(fs: &'a dyn FileSystem, build_dir: &Path) -> Result<Self, ReplyError> {
        let dir = build_dir.join(REPLY_DIR);
        if !fs.exists(&dir) {
            return Err(ReplyError::MissingReplyDir(dir));
        }
        Ok(Self { fs, dir })
    }

    /// The reply directory path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.dir
    }

    /// Finds the current codemodel document.
    ///
    /// Uses the lexicographically greatest `index-*.json`, which is the one the
    /// build tool wrote last. Without any index file, falls back to the
    /// greatest `codemodel-v2-*.json`.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be listed, the index cannot be
    /// read, or no codemodel reply exists.
    pub fn locate_codemodel(&self) -> Result<PathBuf, ReplyError> {
        let entries = self
            .fs
            .list_dir(&self.dir)
            .map_err(|source| ReplyError::Io { path: self.dir.clone(), source })?;

        if let Some(index) = newest(&entries, "index-") {
            let index_path = self.dir.join(index);
            debug!(index = %index_path.display(), "reading reply index");
            let json_file = codemodel_reference(&self.read_json(&index_path)?)?
                .ok_or_else(|| ReplyError::NoCodemodel(self.dir.clone()))?;
            return self.join(&json_file);
        }

        let fallback = newest(&entries, "codemodel-v2-")
            .ok_or_else(|| ReplyError::NoCodemodel(self.dir.clone()))?;
        warn!(file = fallback, "no reply index found, using newest codemodel file");
        Ok(self.dir.join(fallback))
    }

    /// Locates and parses the codemodel root document.
    ///
    /// # Errors
    ///
    /// See [`ReplyDirectory::locate_codemodel`]; also fails if the document
    /// cannot be read or parsed.
    pub fn load_codemodel(&self) -> Result<Value, ReplyError> {
        let path = self.locate_codemodel()?;
        info!(
            reply_dir = %self.path().display(),
            codemodel = %path.display(),
            "loading codemodel"
        );
        self.read_json(&path)
    }

    /// Loads the codemodel and flattens its first configuration.
    ///
    /// # Errors
    ///
    /// Fails if the codemodel cannot be loaded or any target cannot be read.
    pub fn load_targets(&self) -> Result<TargetSet, ReplyError> {
        let root = self.load_codemodel()?;
        let targets = codemodel::read(&root, self)?;
        let configuration = codemodel::selected_configuration_name(&root).map(str::to_string);
        Ok(TargetSet { configuration, targets })
    }

    fn join(&self, json_file: &str) -> Result<PathBuf, ReplyError> {
        let relative = Path::new(json_file);
        let plain = relative.components().all(|c| matches!(c, Component::Normal(_)));
        if !plain {
            return Err(ReplyError::EscapingReference(json_file.to_string()));
        }
        Ok(self.dir.join(relative))
    }

    fn read_json(&self, path: &Path) -> Result<Value, ReplyError> {
        let text = self
            .fs
            .read_to_string(path)
            .map_err(|source| ReplyError::Io { path: path.to_path_buf(), source })?;
        serde_json::from_str(&text)
            .map_err(|source| ReplyError::Parse { path: path.to_path_buf(), source })
    }
}

impl ResolveSecondary for ReplyDirectory<'_> {
    fn resolve(&self, json_file: &str) -> Result<Value, BoxError> {
        let path = self.join(json_file)?;
        Ok(self.read_json(&path)?)
    }
}

/// Opens the reply directory of `build_dir` and flattens its codemodel.
///
/// # Errors
///
/// See [`ReplyDirectory::open`] and [`ReplyDirectory::load_targets`].
pub fn load_targets(fs: &dyn FileSystem, build_dir: &Path) -> Result<TargetSet, ReplyError> {
    ReplyDirectory::open(fs, build_dir)?.load_targets()
}

fn newest<'e>(entries: &'e [String], prefix: &str) -> Option<&'e str> {
    entries
        .iter()
        .map(String::as_str)
        .filter(|name| name.starts_with(prefix) && name.ends_with(".json"))
        .max()
}

/// Reads `reply["codemodel-v2"].jsonFile` from an index document.
fn codemodel_reference(index: &Value) -> Result<Option<String>, ReplyError> {
    let Some(entry) = index.get("reply").and_then(|reply| reply.get(CODEMODEL_KIND)) else {
        return Ok(None);
    };
    if let Some(message) = entry.get("error").and_then(Value::as_str) {
        return Err(ReplyError::Rejected(message.to_string()));
    }
    Ok(entry.get("jsonFile").and_then(Value::as_str).map(str::to_string))
}
