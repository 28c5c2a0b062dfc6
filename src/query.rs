//! Read-only views over a prompt list.
//!
//! Every function here is pure and returns borrowed records in input order.
//! Views are snapshots: request a new one after any mutation.

use crate::models::PromptRecord;
use std::collections::BTreeSet;
use std::ops::Range;

/// Tag filter value meaning "no filter". A real tag named `all` cannot be
/// selected on its own.
pub const ALL_TAGS: &str = "all";

/// Records carrying `tag`. [`ALL_TAGS`] returns every record.
pub fn filter_by_tag<'a>(records: &'a [PromptRecord], tag: &str) -> Vec<&'a PromptRecord> {
    records.iter().filter(|r| has_tag_or_all(r, tag)).collect()
}

/// Whether a single record passes [`filter_by_tag`] for `tag`.
pub fn has_tag_or_all(record: &PromptRecord, tag: &str) -> bool {
    tag == ALL_TAGS || record.has_tag(tag)
}

/// Case-insensitive substring search over title, prompt text and tags.
///
/// The query is trimmed first; a blank query returns every record.
pub fn search<'a>(records: &'a [PromptRecord], query: &str) -> Vec<&'a PromptRecord> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return records.iter().collect();
    }
    records.iter().filter(|r| contains_needle(r, &needle)).collect()
}

/// Whether a single record passes [`search`] for `query`.
pub fn matches(record: &PromptRecord, query: &str) -> bool {
    contains_needle(record, &query.trim().to_lowercase())
}

fn contains_needle(record: &PromptRecord, needle: &str) -> bool {
    needle.is_empty() || haystack(record).contains(needle)
}

fn haystack(record: &PromptRecord) -> String {
    format!("{} {} {}", record.title, record.prompt, record.tags.join(" ")).to_lowercase()
}

/// All tags in use, deduplicated and sorted.
pub fn distinct_tags(records: &[PromptRecord]) -> Vec<String> {
    records
        .iter()
        .flat_map(|r| r.tags.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Byte range of the first case-insensitive occurrence of `query` in `text`,
/// for highlighting. Returns `None` for a blank query.
///
/// Uses the same lowercasing as [`search`]. A hit that covers part of a
/// character's lowercase form is widened to the whole character.
pub fn find_match(text: &str, query: &str) -> Option<Range<usize>> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }
    let lowered = text.to_lowercase();
    let hit = lowered.find(&needle)?;
    let hit_end = hit + needle.len();

    // (offset in `lowered`, offset in `text`) for every char of `text`.
    // Final sigma and plain sigma have the same UTF-8 length, so per-char
    // lengths add up to the whole-string lowercase.
    let mut offsets = Vec::with_capacity(text.len());
    let mut lowered_at = 0;
    for (i, c) in text.char_indices() {
        offsets.push((lowered_at, i));
        lowered_at += c.to_lowercase().map(char::len_utf8).sum::<usize>();
    }

    let begin = offsets
        .iter()
        .rev()
        .find(|(l, _)| *l <= hit)
        .map_or(0, |(_, i)| *i);
    let end = offsets
        .iter()
        .find(|(l, _)| *l >= hit_end)
        .map_or(text.len(), |(_, i)| *i);
    (begin < end).then_some(begin..end)
}

/// Splits comma separated tag input, trimming and dropping empties.
pub fn parse_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect()
}

/// Inverse of [`parse_tags`] for pre-filling forms.
pub fn join_tags(tags: &[String]) -> String {
    tags.join(", ")
}
