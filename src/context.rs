//! Service context bundling the port trait objects.

use std::path::Path;
use std::sync::{Arc, Mutex};

use tracing::warn;

use crate::adapters::live::LiveFileSystem;
use crate::adapters::recording::RecordingFileSystem;
use crate::adapters::replaying::ReplayingFileSystem;
use crate::cassette::recorder::CassetteRecorder;
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::filesystem::FileSystem;

/// Bundles the port trait objects a command needs.
///
/// Constructors wire up different adapter implementations (live, recording,
/// replaying).
pub struct ServiceContext {
    /// Filesystem for reply-directory and query I/O.
    pub fs: Box<dyn FileSystem>,
    /// Recorder shared with the recording adapter; saved on drop.
    recorder: Option<Arc<Mutex<CassetteRecorder>>>,
}

impl ServiceContext {
    /// Creates a live context backed by the real disk.
    #[must_use]
    pub fn live() -> Self {
        Self { fs: Box::new(LiveFileSystem), recorder: None }
    }

    /// Creates a live context that also records every filesystem call.
    ///
    /// The cassette is written to `path` when the context is dropped. This is
    /// the mechanism behind the `CODEMODEL_RECORD` environment variable.
    #[must_use]
    pub fn recording(path: &Path) -> Self {
        let recorder = Arc::new(Mutex::new(CassetteRecorder::new(
            path,
            "codemodel-session",
            env!("CARGO_PKG_VERSION"),
        )));
        Self {
            fs: Box::new(RecordingFileSystem::new(Box::new(LiveFileSystem), Arc::clone(&recorder))),
            recorder: Some(recorder),
        }
    }

    /// Creates a context whose filesystem is served from a cassette file.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be read or parsed.
    pub fn replaying(path: &Path) -> Result<Self, String> {
        let replayer = CassetteReplayer::load(path)?;
        Ok(Self { fs: Box::new(ReplayingFileSystem::new(replayer)), recorder: None })
    }

    /// Wraps an arbitrary filesystem implementation.
    #[must_use]
    pub fn with_fs(fs: Box<dyn FileSystem>) -> Self {
        Self { fs, recorder: None }
    }
}

impl Drop for ServiceContext {
    fn drop(&mut self) {
        let Some(recorder) = self.recorder.take() else {
            return;
        };
        let Ok(guard) = recorder.lock() else {
            warn!("cassette recorder lock poisoned, recording discarded");
            return;
        };
        if let Err(e) = guard.save() {
            warn!(error = %e, "failed to write cassette");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::Cassette;

    #[test]
    fn recording_context_saves_on_drop_and_replays() {
        let dir = std::env::temp_dir().join("codemodel_ctx_record_test");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        let data = dir.join("index-1.json");
        std::fs::write(&data, "{\"reply\":{}}").unwrap();
        let cassette_path = dir.join("session.cassette.yaml");

        {
            let ctx = ServiceContext::recording(&cassette_path);
            assert!(ctx.fs.exists(&data));
            assert_eq!(ctx.fs.read_to_string(&data).unwrap(), "{\"reply\":{}}");
        }

        let cassette: Cassette =
            serde_yaml::from_str(&std::fs::read_to_string(&cassette_path).unwrap()).unwrap();
        assert_eq!(cassette.interactions.len(), 2);

        std::fs::remove_file(&data).unwrap();
        let ctx = ServiceContext::replaying(&cassette_path).unwrap();
        assert!(ctx.fs.exists(&data));
        assert_eq!(ctx.fs.read_to_string(&data).unwrap(), "{\"reply\":{}}");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn replaying_missing_cassette_is_an_error() {
        let result = ServiceContext::replaying(Path::new("/nonexistent/fs.cassette.yaml"));
        assert!(result.is_err());
    }
}
