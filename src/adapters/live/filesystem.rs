//! Live filesystem adapter using `std::fs`.

use std::path::Path;

use crate::ports::filesystem::FileSystem;

/// Live filesystem adapter backed by real disk I/O.
pub struct LiveFileSystem;

impl FileSystem for LiveFileSystem {
    fn read_to_string(
        &self,
        path: &Path,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        std::fs::read_to_string(path)
            .map_err(|e| format!("{}: {e}", path.display()).into())
    }

    fn write(
        &self,
        path: &Path,
        contents: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(std::fs::write(path, contents)?)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn list_dir(
        &self,
        path: &Path,
    ) -> Result<Vec<String>, Box<dyn std::error::Error + Send + Sync>> {
        let in_dir = |e: std::io::Error| format!("{}: {e}", path.display());
        let mut entries = Vec::new();
        for entry in std::fs::read_dir(path).map_err(in_dir)? {
            let entry = entry.map_err(in_dir)?;
            // Non-UTF-8 names are kept lossily so they still show up in listings.
            entries.push(entry.file_name().to_string_lossy().into_owned());
        }
        entries.sort();
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_creates_parents_and_list_dir_sorts() {
        let dir = std::env::temp_dir().join("codemodel_live_fs_test");
        let _ = std::fs::remove_dir_all(&dir);

        let fs = LiveFileSystem;
        fs.write(&dir.join("reply/index-b.json"), "{}").unwrap();
        fs.write(&dir.join("reply/index-a.json"), "{}").unwrap();

        assert!(fs.exists(&dir.join("reply")));
        assert_eq!(fs.list_dir(&dir.join("reply")).unwrap(), ["index-a.json", "index-b.json"]);
        assert_eq!(fs.read_to_string(&dir.join("reply/index-a.json")).unwrap(), "{}");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn read_error_names_the_path() {
        let err = LiveFileSystem
            .read_to_string(Path::new("/nonexistent/codemodel-v2.json"))
            .unwrap_err();
        assert!(err.to_string().contains("/nonexistent/codemodel-v2.json"));
    }

    #[test]
    fn list_dir_error_names_the_path() {
        let err = LiveFileSystem
            .list_dir(Path::new("/nonexistent/.cmake/api/v1/reply"))
            .unwrap_err();
        assert!(err.to_string().contains("/nonexistent/.cmake/api/v1/reply"));
    }
}
