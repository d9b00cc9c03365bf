//! Recently used documents.
//!
//! The window is bounded and in-memory only. Entries are kept in MRU (most recently used)
//! order; re-adding a document moves it to the front.

use crate::document::LightTextDocument;
use std::collections::VecDeque;

/// Default number of entries kept by [`RecentDocuments`].
pub const DEFAULT_HISTORY_CAPACITY: usize = 50;

/// A recency list of documents.
pub trait History {
    /// Record `item` as the most recently used document.
    fn add_item(&mut self, item: LightTextDocument);

    /// Up to `n` most recent documents, optionally restricted to `language_id` and skipping
    /// any URI in `ignore_uris`.
    fn last_n(
        &self,
        n: usize,
        language_id: Option<&str>,
        ignore_uris: &[String],
    ) -> Vec<LightTextDocument>;
}

/// Bounded MRU window of documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentDocuments {
    items: VecDeque<LightTextDocument>,
    capacity: usize,
}

impl RecentDocuments {
    /// Create an empty window holding at most `capacity` documents.
    pub fn new(capacity: usize) -> Self {
        Self {
            items: VecDeque::with_capacity(capacity.min(DEFAULT_HISTORY_CAPACITY)),
            capacity,
        }
    }

    /// Number of documents in the window.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if no document has been recorded.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Maximum number of documents kept.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Forget `uri`.
    pub fn remove(&mut self, uri: &str) {
        self.items.retain(|item| item.uri != uri);
    }

    /// Iterate from most to least recent.
    pub fn iter(&self) -> impl Iterator<Item = &LightTextDocument> {
        self.items.iter()
    }
}

impl Default for RecentDocuments {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

impl History for RecentDocuments {
    fn add_item(&mut self, item: LightTextDocument) {
        if self.capacity == 0 {
            return;
        }
        self.remove(&item.uri);
        self.items.push_front(item);
        self.items.truncate(self.capacity);
    }

    fn last_n(
        &self,
        n: usize,
        language_id: Option<&str>,
        ignore_uris: &[String],
    ) -> Vec<LightTextDocument> {
        self.items
            .iter()
            .filter(|item| language_id.is_none_or(|id| item.language_id == id))
            .filter(|item| !ignore_uris.iter().any(|uri| *uri == item.uri))
            .take(n)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn doc(uri: &str, language_id: &str) -> LightTextDocument {
        LightTextDocument::new(uri, language_id)
    }

    #[test]
    fn test_most_recent_first_and_readd_moves_to_front() {
        let mut history = RecentDocuments::new(10);
        history.add_item(doc("file:///a.rs", "rust"));
        history.add_item(doc("file:///b.rs", "rust"));
        history.add_item(doc("file:///a.rs", "rust"));

        assert_eq!(history.len(), 2);
        assert_eq!(
            history.last_n(10, None, &[]),
            vec![doc("file:///a.rs", "rust"), doc("file:///b.rs", "rust")]
        );
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let mut history = RecentDocuments::new(2);
        history.add_item(doc("file:///a.rs", "rust"));
        history.add_item(doc("file:///b.rs", "rust"));
        history.add_item(doc("file:///c.rs", "rust"));

        let uris = history.iter().map(|d| d.uri.as_str()).collect::<Vec<_>>();
        assert_eq!(uris, vec!["file:///c.rs", "file:///b.rs"]);

        let mut disabled = RecentDocuments::new(0);
        disabled.add_item(doc("file:///a.rs", "rust"));
        assert!(disabled.is_empty());
    }

    #[test]
    fn test_filters() {
        let mut history = RecentDocuments::default();
        history.add_item(doc("file:///a.rs", "rust"));
        history.add_item(doc("file:///b.ts", "typescript"));
        history.add_item(doc("file:///c.rs", "rust"));
        history.add_item(doc("file:///d.rs", "rust"));

        assert_eq!(
            history.last_n(5, Some("rust"), &["file:///d.rs".to_string()]),
            vec![doc("file:///c.rs", "rust"), doc("file:///a.rs", "rust")]
        );
        assert_eq!(history.last_n(1, None, &[]), vec![doc("file:///d.rs", "rust")]);
    }
}
