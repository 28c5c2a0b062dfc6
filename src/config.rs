use crate::error::Result;
use crate::gallery::Gallery;
use crate::seed::{FileSeed, DEFAULT_SEED_PATH};
use crate::storage::FileSystemStorage;
use std::path::PathBuf;

/// Default directory for locally saved prompts and preferences.
pub const DEFAULT_DATA_DIR: &str = "./.prompt-gallery";

/// Where the gallery finds its seed catalog and keeps its local state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryConfig {
    pub data_dir: PathBuf,
    pub seed_path: PathBuf,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            seed_path: PathBuf::from(DEFAULT_SEED_PATH),
        }
    }
}

impl GalleryConfig {
    /// Opens a file-backed gallery seeded from `seed_path`.
    pub async fn open(&self) -> Result<Gallery<FileSystemStorage>> {
        let seed = FileSeed::new(&self.seed_path);
        Gallery::open(&seed, FileSystemStorage::new(&self.data_dir)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PromptFields;
    use tempfile::tempdir;

    #[tokio::test]
    async fn edits_survive_reopen() {
        let dir = tempdir().unwrap();
        let seed_path = dir.path().join("prompts.json");
        std::fs::write(
            &seed_path,
            r#"[{"title":"A","prompt":"seed a"},{"title":"B","prompt":"seed b","tags":["x"]}]"#,
        )
        .unwrap();
        let config = GalleryConfig {
            data_dir: dir.path().join("data"),
            seed_path,
        };

        let mut gallery = config.open().await.unwrap();
        assert_eq!(gallery.len(), 2);
        gallery
            .update(1, PromptFields::new("B", "edited", "b.png", "x, y"))
            .unwrap();
        gallery.toggle_theme().unwrap();
        drop(gallery);

        let gallery = config.open().await.unwrap();
        let titles: Vec<_> = gallery.records().iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, ["A", "B"]);
        assert_eq!(gallery.records()[1].prompt, "edited");
        assert_eq!(gallery.theme(), crate::models::Theme::Dark);
    }

    #[test]
    fn defaults_point_at_working_directory() {
        let config = GalleryConfig::default();
        assert_eq!(config.seed_path, PathBuf::from("prompts.json"));
        assert_eq!(config.data_dir, PathBuf::from(DEFAULT_DATA_DIR));
    }
}
