use crate::error::{GalleryError, Result};
use crate::models::PromptRecord;

/// The single authoritative, ordered list of prompt records.
///
/// No validation happens here; callers check fields before mutating.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordStore {
    records: Vec<PromptRecord>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn all(&self) -> &[PromptRecord] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&PromptRecord> {
        self.records.get(index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn replace_all(&mut self, records: Vec<PromptRecord>) {
        self.records = records;
    }

    /// Inserts before `index`; `index == len()` appends.
    pub fn insert_at(&mut self, index: usize, record: PromptRecord) -> Result<()> {
        if index > self.records.len() {
            return Err(self.out_of_range(index));
        }
        self.records.insert(index, record);
        Ok(())
    }

    pub fn remove_at(&mut self, index: usize) -> Result<PromptRecord> {
        self.check(index)?;
        Ok(self.records.remove(index))
    }

    /// Replaces the record at `index`, returning the previous one.
    pub fn update_at(&mut self, index: usize, record: PromptRecord) -> Result<PromptRecord> {
        self.check(index)?;
        Ok(std::mem::replace(&mut self.records[index], record))
    }

    pub(crate) fn check(&self, index: usize) -> Result<()> {
        if index < self.records.len() {
            Ok(())
        } else {
            Err(self.out_of_range(index))
        }
    }

    fn out_of_range(&self, index: usize) -> GalleryError {
        GalleryError::IndexOutOfRange {
            index,
            len: self.records.len(),
        }
    }
}

impl From<Vec<PromptRecord>> for RecordStore {
    fn from(records: Vec<PromptRecord>) -> Self {
        Self { records }
    }
}
