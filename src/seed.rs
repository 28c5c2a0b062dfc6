//! The read-only static catalog that seeds the gallery at startup.

use crate::error::{GalleryError, Result};
use crate::models::PromptRecord;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// Default location of the seed catalog, relative to the working directory.
pub const DEFAULT_SEED_PATH: &str = "prompts.json";

/// Trait for sources of the static seed catalog.
///
/// Failures are reported as [`GalleryError::SourceUnavailable`]; the caller
/// decides whether to fall back.
#[async_trait]
pub trait SeedSource: Send + Sync {
    async fn fetch(&self) -> Result<Vec<PromptRecord>>;
}

/// Seed catalog read from a JSON file.
#[derive(Debug, Clone)]
pub struct FileSeed {
    path: PathBuf,
}

impl FileSeed {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl SeedSource for FileSeed {
    async fn fetch(&self) -> Result<Vec<PromptRecord>> {
        let contents = fs::read_to_string(&self.path).await.map_err(|e| {
            GalleryError::SourceUnavailable(format!(
                "Failed to read seed file '{}': {}",
                self.path.display(),
                e
            ))
        })?;
        let records: Vec<PromptRecord> = serde_json::from_str(&contents).map_err(|e| {
            GalleryError::SourceUnavailable(format!(
                "Failed to parse seed file '{}': {}",
                self.path.display(),
                e
            ))
        })?;
        debug!(path = %self.path.display(), count = records.len(), "Fetched seed prompts");
        Ok(records)
    }
}

/// Seed catalog held in memory. `None` behaves like an unreachable source.
#[derive(Debug, Clone, Default)]
pub struct StaticSeed(pub Option<Vec<PromptRecord>>);

#[async_trait]
impl SeedSource for StaticSeed {
    async fn fetch(&self) -> Result<Vec<PromptRecord>> {
        self.0
            .clone()
            .ok_or_else(|| GalleryError::SourceUnavailable("no static catalog".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn reads_seed_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("prompts.json");
        std::fs::write(&path, r#"[{"title":"A","prompt":"p","tags":["x"]}]"#).unwrap();

        let records = FileSeed::new(&path).fetch().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].tags, ["x"]);
    }

    #[tokio::test]
    async fn missing_or_malformed_seed_is_unavailable() {
        let dir = tempdir().unwrap();
        let missing = FileSeed::new(dir.path().join("nope.json"));
        assert!(matches!(
            missing.fetch().await,
            Err(GalleryError::SourceUnavailable(_))
        ));

        let path = dir.path().join("bad.json");
        std::fs::write(&path, "<html>404</html>").unwrap();
        assert!(matches!(
            FileSeed::new(&path).fetch().await,
            Err(GalleryError::SourceUnavailable(_))
        ));
    }
}
