//! The agent's document table.
//!
//! All state lives in one immutable [`TableState`] behind an [`ArcSwap`]. A notification
//! builds the next state and publishes it with a single pointer swap, and a reader loads one
//! state and answers its whole query from it. Readers therefore see the table either before
//! or after an update, never halfway, and a document's content is always paired with the
//! offsets resolved against it.
//!
//! Notifications arrive on one connection and are applied in receipt order. Concurrent
//! writers are still safe (`rcu` retries), but ordering between them is not defined.

use crate::protocol::{AgentNotification, AgentTextDocument};
use arc_swap::ArcSwap;
use editor_context::{
    DocumentOffsets, History, JointRange, LightTextDocument, Range, RecentDocuments,
    TextDocument, language_id_for_path, path_to_file_uri,
};
use indexmap::IndexMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, warn};

/// A document held by the agent backend.
#[derive(Debug, Clone)]
pub struct OpenDocument {
    file_path: PathBuf,
    uri: String,
    language_id: String,
    offsets: Option<Arc<DocumentOffsets>>,
    selection: Option<JointRange>,
    visible: Option<JointRange>,
    generation: u64,
}

fn resolve(range: Option<Range>, offsets: Option<&DocumentOffsets>) -> Option<JointRange> {
    range.map(|range| match offsets {
        Some(offsets) => JointRange::resolved(range, offsets),
        None => JointRange::new(range),
    })
}

impl OpenDocument {
    fn opened(
        document: &AgentTextDocument,
        offsets: Option<Arc<DocumentOffsets>>,
        generation: u64,
    ) -> Self {
        let uri = path_to_file_uri(&document.file_path).unwrap_or_else(|| {
            warn!(path = %document.file_path.display(), "document path has no file URI");
            document.file_path.to_string_lossy().into_owned()
        });
        let language_id = document
            .language_id
            .clone()
            .unwrap_or_else(|| language_id_for_path(&document.file_path).to_string());

        Self {
            file_path: document.file_path.clone(),
            uri,
            language_id,
            selection: resolve(document.selection, offsets.as_deref()),
            visible: resolve(document.visible, offsets.as_deref()),
            offsets,
            generation,
        }
    }

    fn changed(
        &self,
        document: &AgentTextDocument,
        offsets: Option<Arc<DocumentOffsets>>,
        generation: u64,
    ) -> Self {
        let (offsets, generation) = match offsets {
            Some(offsets) => (Some(offsets), generation),
            None => (self.offsets.clone(), self.generation),
        };
        Self {
            file_path: self.file_path.clone(),
            uri: self.uri.clone(),
            language_id: document
                .language_id
                .clone()
                .unwrap_or_else(|| self.language_id.clone()),
            selection: resolve(document.selection, offsets.as_deref()),
            visible: resolve(document.visible, offsets.as_deref()),
            offsets,
            generation,
        }
    }

    fn with_selection(&self, selection: Option<Range>) -> Self {
        Self {
            selection: resolve(selection, self.offsets.as_deref()),
            ..self.clone()
        }
    }

    fn with_offsets(&self, offsets: Arc<DocumentOffsets>, generation: u64) -> Self {
        Self {
            selection: resolve(self.selection.map(|joint| joint.range), Some(&offsets)),
            visible: resolve(self.visible.map(|joint| joint.range), Some(&offsets)),
            offsets: Some(offsets),
            generation,
            ..self.clone()
        }
    }

    /// Filesystem path.
    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// `file://` URI derived from the path.
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Language identifier.
    pub fn language_id(&self) -> &str {
        &self.language_id
    }

    /// Display name used in selection context.
    pub fn file_name(&self) -> String {
        self.file_path.to_string_lossy().into_owned()
    }

    /// Content, if the host sent it.
    pub fn content(&self) -> Option<&str> {
        self.offsets.as_deref().map(DocumentOffsets::text)
    }

    /// Index of the content, if the host sent it.
    pub fn offsets(&self) -> Option<&DocumentOffsets> {
        self.offsets.as_deref()
    }

    /// Selection with offsets resolved against [`OpenDocument::content`].
    pub fn selection(&self) -> Option<&JointRange> {
        self.selection.as_ref()
    }

    /// Visible range with offsets resolved against [`OpenDocument::content`].
    pub fn visible(&self) -> Option<&JointRange> {
        self.visible.as_ref()
    }

    /// Content generation; changes whenever the content is replaced.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Project to a light document.
    pub fn light(&self) -> LightTextDocument {
        LightTextDocument::new(self.uri.clone(), self.language_id.clone())
    }

    /// Snapshot as a [`TextDocument`]; missing content becomes empty text.
    pub fn to_text_document(&self) -> TextDocument {
        let offsets = self
            .offsets
            .clone()
            .unwrap_or_else(|| Arc::new(DocumentOffsets::new("")));
        TextDocument::from_offsets(self.uri.clone(), self.language_id.clone(), offsets)
            .with_selection(self.selection.map(|joint| joint.range))
            .with_visible(self.visible.map(|joint| joint.range))
    }
}

/// One published version of the table.
#[derive(Debug, Clone)]
pub struct TableState {
    documents: IndexMap<PathBuf, Arc<OpenDocument>>,
    active: Option<PathBuf>,
    workspace_root: Option<PathBuf>,
    recent: Arc<RecentDocuments>,
}

impl TableState {
    fn new(history_capacity: usize) -> Self {
        Self {
            documents: IndexMap::new(),
            active: None,
            workspace_root: None,
            recent: Arc::new(RecentDocuments::new(history_capacity)),
        }
    }

    /// Document stored under `path`.
    pub fn document(&self, path: &Path) -> Option<&Arc<OpenDocument>> {
        self.documents.get(path)
    }

    /// Open documents in the order they were opened.
    pub fn documents(&self) -> impl Iterator<Item = &Arc<OpenDocument>> {
        self.documents.values()
    }

    /// Number of open documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Returns `true` if no document is open.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Path of the active document.
    pub fn active_path(&self) -> Option<&Path> {
        self.active.as_deref()
    }

    /// The active document.
    pub fn active_document(&self) -> Option<&Arc<OpenDocument>> {
        self.active.as_ref().and_then(|path| self.documents.get(path))
    }

    /// Workspace root path.
    pub fn workspace_root(&self) -> Option<&Path> {
        self.workspace_root.as_deref()
    }

    /// Recently opened or focused documents.
    pub fn recent(&self) -> &RecentDocuments {
        &self.recent
    }
}

/// Snapshot-published document table.
#[derive(Debug)]
pub struct DocumentTable {
    state: ArcSwap<TableState>,
    last_generation: AtomicU64,
}

impl DocumentTable {
    /// An empty table: no documents, no active path, no workspace root.
    pub fn new(history_capacity: usize) -> Self {
        Self {
            state: ArcSwap::from_pointee(TableState::new(history_capacity)),
            last_generation: AtomicU64::new(0),
        }
    }

    /// The current state.
    pub fn snapshot(&self) -> Arc<TableState> {
        self.state.load_full()
    }

    /// Apply one notification.
    pub fn apply(&self, notification: AgentNotification) {
        match notification {
            AgentNotification::DocumentOpened(params) => {
                self.document_opened(params.document, params.focus)
            }
            AgentNotification::DocumentChanged(document) => self.document_changed(document),
            AgentNotification::SelectionChanged(params) => {
                self.selection_changed(&params.file_path, params.selection);
            }
            AgentNotification::DocumentFocused(params) => {
                self.document_focused(&params.file_path);
            }
            AgentNotification::DocumentClosed(params) => {
                self.document_closed(&params.file_path);
            }
            AgentNotification::WorkspaceChanged(params) => {
                self.workspace_changed(params.root_path)
            }
        }
    }

    /// Insert or replace a document. It becomes active if `focus` is set or nothing is
    /// active yet.
    pub fn document_opened(&self, document: AgentTextDocument, focus: bool) {
        let offsets = document
            .content
            .as_deref()
            .map(|content| Arc::new(DocumentOffsets::new(content)));
        let opened = Arc::new(OpenDocument::opened(
            &document,
            offsets,
            self.next_generation(),
        ));
        debug!(path = %opened.file_path.display(), focus, "document opened");

        self.update(|state| {
            let path = opened.file_path.clone();
            state.documents.insert(path.clone(), Arc::clone(&opened));
            if focus || state.active.is_none() {
                state.active = Some(path);
            }
            Arc::make_mut(&mut state.recent).add_item(opened.light());
            true
        });
    }

    /// Replace a document's content and ranges.
    ///
    /// Without content, only the ranges and language are replaced. An unknown path is
    /// inserted without becoming active.
    pub fn document_changed(&self, document: AgentTextDocument) {
        let offsets = document
            .content
            .as_deref()
            .map(|content| Arc::new(DocumentOffsets::new(content)));
        let generation = self.next_generation();
        debug!(path = %document.file_path.display(), "document changed");

        self.update(|state| {
            let next = match state.documents.get(&document.file_path) {
                Some(existing) => existing.changed(&document, offsets.clone(), generation),
                None => OpenDocument::opened(&document, offsets.clone(), generation),
            };
            state
                .documents
                .insert(document.file_path.clone(), Arc::new(next));
            true
        });
    }

    /// Replace a document's selection. Returns `false` if the path is unknown.
    pub fn selection_changed(&self, path: &Path, selection: Option<Range>) -> bool {
        let changed = self.update(|state| {
            let Some(existing) = state.documents.get(path) else {
                return false;
            };
            let next = Arc::new(existing.with_selection(selection));
            state.documents.insert(path.to_path_buf(), next);
            true
        });
        if !changed {
            debug!(path = %path.display(), "selection change for unknown document ignored");
        }
        changed
    }

    /// Make `path` the active document. Returns `false` (and changes nothing) if the path is
    /// unknown.
    pub fn document_focused(&self, path: &Path) -> bool {
        let focused = self.update(|state| {
            let Some(document) = state.documents.get(path) else {
                return false;
            };
            let light = document.light();
            state.active = Some(path.to_path_buf());
            Arc::make_mut(&mut state.recent).add_item(light);
            true
        });
        if !focused {
            debug!(path = %path.display(), "focus on unknown document ignored");
        }
        focused
    }

    /// Remove a document, clearing the active path if it pointed at it. Returns `false` if
    /// the path is unknown.
    pub fn document_closed(&self, path: &Path) -> bool {
        let closed = self.update(|state| {
            if state.documents.shift_remove(path).is_none() {
                return false;
            }
            if state.active.as_deref() == Some(path) {
                state.active = None;
            }
            true
        });
        debug!(path = %path.display(), closed, "document closed");
        closed
    }

    /// Replace the workspace root.
    pub fn workspace_changed(&self, root: Option<PathBuf>) {
        debug!(root = ?root, "workspace root changed");
        self.update(|state| {
            state.workspace_root = root.clone();
            true
        });
    }

    /// Replace a document's content only if its content generation is still `generation`.
    ///
    /// Used to land the result of a request that started from that generation. Returns
    /// `false` when the document was closed or changed in the meantime; the result is then
    /// dropped.
    pub fn replace_if_current(&self, path: &Path, generation: u64, content: &str) -> bool {
        let offsets = Arc::new(DocumentOffsets::new(content));
        let next_generation = self.next_generation();
        self.update(|state| match state.documents.get(path) {
            Some(existing) if existing.generation == generation => {
                let next = Arc::new(existing.with_offsets(Arc::clone(&offsets), next_generation));
                state.documents.insert(path.to_path_buf(), next);
                true
            }
            _ => false,
        })
    }

    fn next_generation(&self) -> u64 {
        self.last_generation.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Publish the state produced by `f`, unless `f` reports no change.
    fn update(&self, f: impl Fn(&mut TableState) -> bool) -> bool {
        let mut changed = false;
        self.state.rcu(|current| {
            let mut next = TableState::clone(current);
            changed = f(&mut next);
            if changed {
                Arc::new(next)
            } else {
                Arc::clone(current)
            }
        });
        changed
    }
}

impl Default for DocumentTable {
    fn default() -> Self {
        Self::new(editor_context::DEFAULT_HISTORY_CAPACITY)
    }
}
