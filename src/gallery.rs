//! The gallery facade: startup load, queries, and the only sanctioned
//! way to create, edit and delete prompts.

use crate::error::{GalleryError, Result};
use crate::merge::load_merged;
use crate::models::{PromptFields, PromptRecord, Theme};
use crate::query;
use crate::seed::SeedSource;
use crate::storage::{LocalStorage, PromptPersistence};
use crate::store::RecordStore;
use tracing::{debug, info, instrument, warn};

/// Owns the record list and its persisted copy, keeping the two in step.
#[derive(Debug)]
pub struct Gallery<S> {
    store: RecordStore,
    persistence: PromptPersistence<S>,
    theme: Theme,
}

impl<S: LocalStorage> Gallery<S> {
    /// An empty gallery over `storage`, without loading anything.
    pub fn new(storage: S) -> Self {
        Self {
            store: RecordStore::new(),
            persistence: PromptPersistence::new(storage),
            theme: Theme::default(),
        }
    }

    /// Loads saved prompts and the theme from `storage` and merges in `seed`.
    pub async fn open(seed: &dyn SeedSource, storage: S) -> Result<Self> {
        let mut gallery = Self::new(storage);
        let records = load_merged(seed, &gallery.persistence).await?;
        gallery.store.replace_all(records);
        gallery.theme = gallery.persistence.load_theme()?;
        info!(count = gallery.store.len(), theme = %gallery.theme, "Gallery opened");
        Ok(gallery)
    }

    pub fn records(&self) -> &[PromptRecord] {
        self.store.all()
    }

    pub fn get(&self, index: usize) -> Result<&PromptRecord> {
        self.store.check(index)?;
        Ok(&self.store.all()[index])
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn persistence(&self) -> &PromptPersistence<S> {
        &self.persistence
    }

    pub fn filter_by_tag(&self, tag: &str) -> Vec<&PromptRecord> {
        query::filter_by_tag(self.records(), tag)
    }

    pub fn search(&self, query: &str) -> Vec<&PromptRecord> {
        query::search(self.records(), query)
    }

    pub fn distinct_tags(&self) -> Vec<String> {
        query::distinct_tags(self.records())
    }

    /// Positions of records matching both the tag filter and the search query,
    /// paired with the records, so callers can address them in later edits.
    pub fn view(&self, tag: &str, search: &str) -> Vec<(usize, &PromptRecord)> {
        self.records()
            .iter()
            .enumerate()
            .filter(|(_, r)| query::has_tag_or_all(r, tag))
            .filter(|(_, r)| query::matches(r, search))
            .collect()
    }

    /// Adds a prompt at the front of the list and returns its position.
    #[instrument(skip(self, form), fields(title = %form.title.trim()))]
    pub fn create(&mut self, form: PromptFields) -> Result<usize> {
        let record = form.into_record();
        require("title", &record.title)?;
        require("prompt", &record.prompt)?;
        require("image", &record.image)?;

        self.store.insert_at(0, record)?;
        if let Err(e) = self.persist() {
            self.store.remove_at(0)?;
            return Err(e);
        }
        info!("Prompt created");
        Ok(0)
    }

    /// Replaces the prompt at `index`. The image may be cleared.
    #[instrument(skip(self, form), fields(title = %form.title.trim()))]
    pub fn update(&mut self, index: usize, form: PromptFields) -> Result<()> {
        self.store.check(index)?;
        let record = form.into_record();
        require("title", &record.title)?;
        require("prompt", &record.prompt)?;

        let previous = self.store.update_at(index, record)?;
        if let Err(e) = self.persist() {
            self.store.update_at(index, previous)?;
            return Err(e);
        }
        info!("Prompt updated");
        Ok(())
    }

    /// Removes the prompt at `index` for good and returns it.
    #[instrument(skip(self))]
    pub fn delete(&mut self, index: usize) -> Result<PromptRecord> {
        let removed = self.store.remove_at(index)?;
        if let Err(e) = self.persist() {
            self.store.insert_at(index, removed)?;
            return Err(e);
        }
        info!(title = %removed.title, "Prompt deleted");
        Ok(removed)
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) -> Result<()> {
        self.persistence.save_theme(theme)?;
        self.theme = theme;
        debug!(theme = %theme, "Theme saved");
        Ok(())
    }

    pub fn toggle_theme(&mut self) -> Result<Theme> {
        let next = self.theme.toggled();
        self.set_theme(next)?;
        Ok(next)
    }

    fn persist(&mut self) -> Result<()> {
        self.persistence.save(self.store.all()).map_err(|e| {
            warn!(error = %e, "Failed to save prompts, change rolled back");
            e
        })
    }
}

fn require(field: &'static str, value: &str) -> Result<()> {
    if value.is_empty() {
        Err(GalleryError::validation(field))
    } else {
        Ok(())
    }
}
