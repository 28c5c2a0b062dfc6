use crate::storage::LocalStorage;
use anyhow::{bail, Context, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, error};

/// Durable key/value storage backed by one file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileSystemStorage {
    data_dir: PathBuf,
}

impl FileSystemStorage {
    /// Creates a new FileSystemStorage instance.
    /// Ensures the data directory exists.
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Self {
        let path_buf = data_dir.as_ref().to_path_buf();
        if let Err(e) = fs::create_dir_all(&path_buf) {
            // Writes retry the creation and report the failure there
            error!(path = %path_buf.display(), error = %e, "Failed to create data directory during initialization");
        }
        Self { data_dir: path_buf }
    }

    fn get_key_path(&self, key: &str) -> Result<PathBuf> {
        if key.is_empty() || key.contains(['/', '\\']) || key.starts_with('.') {
            bail!("Invalid storage key '{}'", key);
        }
        Ok(self.data_dir.join(key))
    }
}

impl LocalStorage for FileSystemStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.get_key_path(key)?;
        match fs::read(&path) {
            // Invalid UTF-8 is left for the decoder to reject as corrupt
            Ok(bytes) => Ok(Some(String::from_utf8_lossy(&bytes).into_owned())),
            Err(ref e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("Failed to read storage file: {}", path.display())),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.get_key_path(key)?;

        // Ensure directory exists before writing
        if !self.data_dir.exists() {
            fs::create_dir_all(&self.data_dir)
                .with_context(|| format!("Failed to create data directory '{}'", self.data_dir.display()))?;
        }

        // Write beside the target then rename, so readers never see half a value
        let tmp_path = path.with_extension("tmp");
        fs::write(&tmp_path, value.as_bytes())
            .with_context(|| format!("Failed to write storage file: {}", tmp_path.display()))?;
        if let Err(e) = fs::rename(&tmp_path, &path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(e).with_context(|| format!("Failed to replace storage file: {}", path.display()));
        }
        debug!(path = %path.display(), bytes = value.len(), "Stored value");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn round_trips_and_survives_reopen() -> Result<()> {
        let dir = tempdir()?;
        let mut storage = FileSystemStorage::new(dir.path().join("data"));
        assert_eq!(storage.get("prompts_v1")?, None);

        storage.set("prompts_v1", "[1]")?;
        storage.set("prompts_v1", "[2]")?;
        assert_eq!(storage.get("prompts_v1")?.as_deref(), Some("[2]"));

        let reopened = FileSystemStorage::new(dir.path().join("data"));
        assert_eq!(reopened.get("prompts_v1")?.as_deref(), Some("[2]"));
        assert!(!dir.path().join("data").join("prompts_v1.tmp").exists());
        Ok(())
    }

    #[test]
    fn non_utf8_file_reads_as_replacement_text() -> Result<()> {
        let dir = tempdir()?;
        std::fs::write(dir.path().join("ui_theme_v1"), [0xff, 0xfe])?;
        let storage = FileSystemStorage::new(dir.path());
        assert_eq!(storage.get("ui_theme_v1")?.as_deref(), Some("\u{FFFD}\u{FFFD}"));
        Ok(())
    }

    #[test]
    fn rejects_path_like_keys() {
        let dir = tempdir().unwrap();
        let mut storage = FileSystemStorage::new(dir.path());
        assert!(storage.set("../escape", "x").is_err());
        assert!(storage.get("").is_err());
    }
}
