//! Text document snapshots.
//!
//! A [`TextDocument`] is an immutable snapshot: content, index, and the joint ranges resolved
//! against that index travel together. Every change produces a new value, so a reader holding
//! a snapshot can never observe content from one version and cached offsets from another.

use crate::edit::{TextEdit, apply_text_edits};
use crate::error::Result;
use crate::offsets::DocumentOffsets;
use crate::position::{JointRange, OffsetRange, Range};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A document reference without its content.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LightTextDocument {
    /// Document URI.
    pub uri: String,
    /// Language identifier (e.g. `rust`, `typescript`).
    pub language_id: String,
}

impl LightTextDocument {
    /// Create a light document.
    pub fn new(uri: impl Into<String>, language_id: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            language_id: language_id.into(),
        }
    }
}

/// A full document snapshot.
#[derive(Debug, Clone)]
pub struct TextDocument {
    uri: String,
    language_id: String,
    repo_name: Option<String>,
    revision: Option<String>,
    visible: Option<JointRange>,
    selection: Option<JointRange>,
    offsets: Arc<DocumentOffsets>,
}

impl TextDocument {
    /// Create a snapshot of `content` with no repository info, viewport, or selection.
    pub fn new(
        uri: impl Into<String>,
        language_id: impl Into<String>,
        content: impl Into<Arc<str>>,
    ) -> Self {
        Self::from_offsets(uri, language_id, Arc::new(DocumentOffsets::new(content)))
    }

    /// Create a snapshot around an index that was already built for its content.
    pub fn from_offsets(
        uri: impl Into<String>,
        language_id: impl Into<String>,
        offsets: Arc<DocumentOffsets>,
    ) -> Self {
        Self {
            uri: uri.into(),
            language_id: language_id.into(),
            repo_name: None,
            revision: None,
            visible: None,
            selection: None,
            offsets,
        }
    }

    /// Attach repository name and revision.
    pub fn with_repo(mut self, repo_name: Option<String>, revision: Option<String>) -> Self {
        self.repo_name = repo_name;
        self.revision = revision;
        self
    }

    /// Replace the selection; its offsets are resolved against this snapshot.
    pub fn with_selection(mut self, selection: Option<Range>) -> Self {
        self.selection = selection.map(|range| JointRange::resolved(range, &self.offsets));
        self
    }

    /// Replace the visible range; its offsets are resolved against this snapshot.
    pub fn with_visible(mut self, visible: Option<Range>) -> Self {
        self.visible = visible.map(|range| JointRange::resolved(range, &self.offsets));
        self
    }

    /// A new snapshot with `content`.
    ///
    /// Selection and visible ranges keep their line/character positions, but their cached
    /// offsets are dropped because they belonged to the previous snapshot.
    pub fn with_content(mut self, content: impl Into<Arc<str>>) -> Self {
        self.offsets = Arc::new(DocumentOffsets::new(content));
        self.selection = self.selection.map(|joint| JointRange::new(joint.range));
        self.visible = self.visible.map(|joint| JointRange::new(joint.range));
        self
    }

    /// A new snapshot with `edits` applied.
    pub fn apply_edits(&self, edits: &[TextEdit]) -> Result<Self> {
        let content = apply_text_edits(&self.offsets, edits)?;
        Ok(self.clone().with_content(content))
    }

    /// Document URI.
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Language identifier.
    pub fn language_id(&self) -> &str {
        &self.language_id
    }

    /// Repository name, if known.
    pub fn repo_name(&self) -> Option<&str> {
        self.repo_name.as_deref()
    }

    /// Revision, if known.
    pub fn revision(&self) -> Option<&str> {
        self.revision.as_deref()
    }

    /// Full content.
    pub fn content(&self) -> &str {
        self.offsets.text()
    }

    /// Index of this snapshot's content.
    pub fn offsets(&self) -> &DocumentOffsets {
        &self.offsets
    }

    /// Shared handle to the index.
    pub fn shared_offsets(&self) -> Arc<DocumentOffsets> {
        Arc::clone(&self.offsets)
    }

    /// Selection, if the host reported one.
    pub fn selection(&self) -> Option<&JointRange> {
        self.selection.as_ref()
    }

    /// Visible viewport, if the host reported one.
    pub fn visible(&self) -> Option<&JointRange> {
        self.visible.as_ref()
    }

    /// Offsets of the selection in this snapshot.
    pub fn selection_offsets(&self) -> Option<OffsetRange> {
        self.selection
            .and_then(|joint| joint.offsets(&self.offsets).ok())
    }

    /// Project to a [`LightTextDocument`].
    pub fn light(&self) -> LightTextDocument {
        LightTextDocument::new(self.uri.clone(), self.language_id.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::Position;

    fn range(sl: usize, sc: usize, el: usize, ec: usize) -> Range {
        Range::new(Position::new(sl, sc), Position::new(el, ec))
    }

    #[test]
    fn test_selection_offsets_resolved_on_construction() {
        let doc = TextDocument::new("file:///a.rs", "rust", "abc\ndef")
            .with_selection(Some(range(1, 1, 1, 3)));
        assert_eq!(doc.selection().unwrap().offset, Some(OffsetRange::new(5, 7)));
        assert_eq!(doc.selection_offsets(), Some(OffsetRange::new(5, 7)));
    }

    #[test]
    fn test_new_content_clears_cached_offsets() {
        let doc = TextDocument::new("file:///a.rs", "rust", "abc\ndef")
            .with_selection(Some(range(1, 1, 1, 3)))
            .with_visible(Some(range(0, 0, 1, 3)));
        let next = doc.clone().with_content("xyz\n\nuvw");

        assert_eq!(next.selection().unwrap().offset, None);
        assert_eq!(next.visible().unwrap().offset, None);
        // Recomputed against the new snapshot, not the old one.
        assert_eq!(next.selection_offsets(), Some(OffsetRange::new(4, 4)));
        // The old snapshot is untouched.
        assert_eq!(doc.content(), "abc\ndef");
        assert_eq!(doc.selection_offsets(), Some(OffsetRange::new(5, 7)));
    }

    #[test]
    fn test_unresolvable_selection_has_no_offsets() {
        let doc = TextDocument::new("file:///a.rs", "rust", "one line")
            .with_selection(Some(range(4, 0, 4, 1)));
        assert!(doc.selection().is_some());
        assert_eq!(doc.selection_offsets(), None);
    }

    #[test]
    fn test_apply_edits_produces_new_snapshot() {
        let doc = TextDocument::new("file:///a.rs", "rust", "let x = 1;")
            .with_selection(Some(range(0, 4, 0, 5)));
        let edited = doc
            .apply_edits(&[TextEdit::new(range(0, 4, 0, 5), "value")])
            .unwrap();
        assert_eq!(edited.content(), "let value = 1;");
        assert_eq!(edited.selection().unwrap().offset, None);
        assert_eq!(doc.content(), "let x = 1;");
    }

    #[test]
    fn test_light_projection() {
        let doc = TextDocument::new("file:///a.rs", "rust", "fn main() {}")
            .with_repo(Some("github.com/acme/app".into()), Some("abc123".into()));
        assert_eq!(doc.light(), LightTextDocument::new("file:///a.rs", "rust"));
        assert_eq!(doc.repo_name(), Some("github.com/acme/app"));
        assert_eq!(doc.revision(), Some("abc123"));
    }
}
