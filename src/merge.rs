//! Startup reconciliation of the seed catalog with locally saved prompts.

use crate::error::Result;
use crate::models::PromptRecord;
use crate::seed::SeedSource;
use crate::storage::{LocalStorage, PromptPersistence};
use std::collections::HashMap;
use tracing::{info, warn};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum MergeKey {
    Title(String),
    // Untitled records never collide with anything
    Generated(Uuid),
}

impl MergeKey {
    fn of(record: &PromptRecord) -> Self {
        if record.title.is_empty() {
            MergeKey::Generated(Uuid::new_v4())
        } else {
            MergeKey::Title(record.title.clone())
        }
    }
}

/// Combines seed and local records into one list with unique titles.
///
/// Seed records keep their order. A local record whose title matches an
/// earlier entry replaces it in place; the rest are appended in order.
pub fn merge(seed: Vec<PromptRecord>, local: Vec<PromptRecord>) -> Vec<PromptRecord> {
    let mut merged: Vec<PromptRecord> = Vec::with_capacity(seed.len() + local.len());
    let mut positions: HashMap<MergeKey, usize> = HashMap::new();

    for record in seed.into_iter().chain(local) {
        let key = MergeKey::of(&record);
        match positions.get(&key) {
            Some(&at) => merged[at] = record,
            None => {
                positions.insert(key, merged.len());
                merged.push(record);
            }
        }
    }
    merged
}

/// Fetches the seed, loads saved prompts and merges them.
///
/// An unavailable seed is logged and the saved prompts are used alone.
pub async fn load_merged<S: LocalStorage>(
    seed: &dyn SeedSource,
    persistence: &PromptPersistence<S>,
) -> Result<Vec<PromptRecord>> {
    let local = persistence.load()?;
    match seed.fetch().await {
        Ok(seed_records) => {
            let seed_count = seed_records.len();
            let local_count = local.len();
            let merged = merge(seed_records, local);
            info!(seed = seed_count, local = local_count, merged = merged.len(), "Merged prompt sources");
            Ok(merged)
        }
        Err(e) if e.is_recoverable() => {
            warn!(error = %e, "Could not load seed prompts, using saved prompts only");
            Ok(local)
        }
        Err(e) => Err(e),
    }
}
