//! Pure derivations over a [`Collection`] for list and detail views.

use crate::collection::Collection;
use crate::model::project::Project;
use chrono::{DateTime, Local, Utc};

/// Marker appended by [`truncate`].
pub const ELLIPSIS: char = '…';

/// Default width for list-row descriptions.
pub const DEFAULT_SUMMARY_WIDTH: usize = 160;

/// Case-insensitive substring match against name, client name, or status.
#[must_use]
pub fn matches_query(project: &Project, needle_lower: &str) -> bool {
    project.name.to_lowercase().contains(needle_lower)
        || project.client_name.to_lowercase().contains(needle_lower)
        || project.status.as_str().to_lowercase().contains(needle_lower)
}

/// Filter `collection` down to projects matching `query`.
///
/// A blank query returns the input as-is, sharing its records.
#[must_use]
pub fn search(collection: &Collection, query: &str) -> Collection {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return collection.clone();
    }
    collection
        .iter()
        .filter(|p| matches_query(p, &needle))
        .cloned()
        .collect::<Vec<_>>()
        .into()
}

/// Most recently updated first; equal timestamps order by id ascending.
#[must_use]
pub fn sort_by_recency(collection: &Collection) -> Collection {
    let mut projects = collection.as_slice().to_vec();
    projects.sort_by(|a, b| {
        b.last_updated
            .cmp(&a.last_updated)
            .then_with(|| a.id.cmp(&b.id))
    });
    projects.into()
}

/// Shorten `text` to at most `max` characters.
///
/// Text that already fits is returned unchanged; otherwise the first
/// `max - 1` characters are kept and [`ELLIPSIS`] appended.
#[must_use]
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut out: String = text.chars().take(max - 1).collect();
    out.push(ELLIPSIS);
    out
}

/// Trim surrounding whitespace, then [`truncate`].
#[must_use]
pub fn clamp_summary(text: &str, max: usize) -> String {
    truncate(text.trim(), max)
}

/// Short local date like `Jan 05, 2026`.
#[must_use]
pub fn format_date(ts: DateTime<Utc>) -> String {
    ts.with_timezone(&Local).format("%b %d, %Y").to_string()
}
