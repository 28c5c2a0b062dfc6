use crate::error::{GalleryError, Result};
use crate::models::{PromptRecord, Theme};
use tracing::{debug, warn};

pub mod filesystem;
pub mod memory;

pub use filesystem::FileSystemStorage;
pub use memory::MemoryStorage;

/// Key holding the JSON array of saved prompts.
pub const PROMPTS_KEY: &str = "prompts_v1";
/// Key holding the UI theme label.
pub const THEME_KEY: &str = "ui_theme_v1";

/// Trait defining a durable string key/value backend.
pub trait LocalStorage {
    /// Returns the stored value, or `None` if the key was never written.
    fn get(&self, key: &str) -> anyhow::Result<Option<String>>;

    /// Overwrites the value for `key`. A failed write leaves the previous value intact.
    fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()>;
}

/// Saves and loads the whole prompt collection and the theme preference.
#[derive(Debug, Clone)]
pub struct PromptPersistence<S> {
    storage: S,
}

impl<S: LocalStorage> PromptPersistence<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Overwrites the saved collection with `records`.
    pub fn save(&mut self, records: &[PromptRecord]) -> Result<()> {
        let blob = serde_json::to_string(records)
            .map_err(|e| GalleryError::Storage(format!("Failed to serialize prompts: {}", e)))?;
        self.storage
            .set(PROMPTS_KEY, &blob)
            .map_err(|e| GalleryError::Storage(format!("{:#}", e)))?;
        debug!(count = records.len(), "Saved prompts");
        Ok(())
    }

    /// Returns the saved collection. Missing or undecodable data yields an empty list.
    pub fn load(&self) -> Result<Vec<PromptRecord>> {
        match self.try_load() {
            Ok(records) => Ok(records),
            Err(e @ GalleryError::StorageCorrupt(_)) => {
                warn!(error = %e, "Ignoring unreadable saved prompts");
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }

    /// Like [`load`](Self::load) but reports a corrupt snapshot instead of hiding it.
    pub fn try_load(&self) -> Result<Vec<PromptRecord>> {
        let Some(blob) = self.read(PROMPTS_KEY)? else {
            return Ok(Vec::new());
        };
        serde_json::from_str(&blob).map_err(|e| GalleryError::StorageCorrupt(e.to_string()))
    }

    pub fn save_theme(&mut self, theme: Theme) -> Result<()> {
        self.storage
            .set(THEME_KEY, theme.as_str())
            .map_err(|e| GalleryError::Storage(format!("{:#}", e)))
    }

    /// Stored theme, defaulting to light for absent or unknown labels.
    pub fn load_theme(&self) -> Result<Theme> {
        let Some(label) = self.read(THEME_KEY)? else {
            return Ok(Theme::default());
        };
        Ok(label.parse::<Theme>().unwrap_or_else(|e| {
            warn!(error = %e, "Ignoring stored theme");
            Theme::default()
        }))
    }

    fn read(&self, key: &str) -> Result<Option<String>> {
        self.storage
            .get(key)
            .map_err(|e| GalleryError::Storage(format!("{:#}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(title: &str, tags: &[&str]) -> PromptRecord {
        PromptRecord::new(
            title.into(),
            format!("{} prompt", title),
            "img.png".into(),
            tags.iter().map(|t| t.to_string()).collect(),
        )
    }

    #[test]
    fn save_then_load_round_trips() {
        let mut persistence = PromptPersistence::new(MemoryStorage::new());
        let records = vec![record("a", &["x"]), record("b", &[])];
        persistence.save(&records).unwrap();
        persistence.save(&records).unwrap();
        assert_eq!(persistence.load().unwrap(), records);
    }

    #[test]
    fn load_without_saved_data_is_empty() {
        let persistence = PromptPersistence::new(MemoryStorage::new());
        assert!(persistence.load().unwrap().is_empty());
    }

    #[test]
    fn corrupt_blob_loads_as_empty() {
        let mut storage = MemoryStorage::new();
        storage.set(PROMPTS_KEY, "{not json").unwrap();
        let persistence = PromptPersistence::new(storage);
        assert!(matches!(
            persistence.try_load(),
            Err(GalleryError::StorageCorrupt(_))
        ));
        assert!(persistence.load().unwrap().is_empty());
    }

    #[test]
    fn wrong_shape_loads_as_empty() {
        let mut storage = MemoryStorage::new();
        storage.set(PROMPTS_KEY, r#"{"title":"not an array"}"#).unwrap();
        assert!(PromptPersistence::new(storage).load().unwrap().is_empty());
    }

    #[test]
    fn theme_defaults_and_round_trips() {
        let mut persistence = PromptPersistence::new(MemoryStorage::new());
        assert_eq!(persistence.load_theme().unwrap(), Theme::Light);
        persistence.save_theme(Theme::Dark).unwrap();
        assert_eq!(persistence.load_theme().unwrap(), Theme::Dark);

        let mut storage = MemoryStorage::new();
        storage.set(THEME_KEY, "neon").unwrap();
        assert_eq!(
            PromptPersistence::new(storage).load_theme().unwrap(),
            Theme::Light
        );
    }
}
