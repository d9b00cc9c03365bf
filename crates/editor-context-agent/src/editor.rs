//! [`Editor`] implementation backed by the document table.

use crate::host::AgentHost;
use crate::protocol::AgentNotification;
use crate::table::{DocumentTable, OpenDocument, TableState};
use async_trait::async_trait;
use editor_context::{
    Editor, EditorConfig, EditorError, FixupState, Indentation, LightTextDocument,
    RecentDocuments, Result, SelectionContext, TextDocument, TextEdit, VisibleContent,
    Workspace, apply_text_edits, file_uri_to_path, selection_context, selection_or_entire_file,
    truncate_utf16, visible_content,
};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// An editor whose state is reported by an external agent.
///
/// Queries read one [`TableState`] snapshot each. Interactive requests are forwarded to the
/// attached [`AgentHost`]; without one they fail with [`EditorError::NotImplemented`].
#[derive(Clone)]
pub struct AgentEditor {
    table: Arc<DocumentTable>,
    host: Option<Arc<dyn AgentHost>>,
    config: EditorConfig,
}

impl fmt::Debug for AgentEditor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AgentEditor")
            .field("table", &self.table)
            .field("host", &self.host.is_some())
            .field("config", &self.config)
            .finish()
    }
}

/// Documents are keyed by path, so any spelling of the same `file:` URI finds them. Other
/// schemes must match the stored URI exactly.
fn find_by_uri<'a>(state: &'a TableState, uri: &str) -> Option<&'a Arc<OpenDocument>> {
    match file_uri_to_path(uri) {
        Some(path) => state.document(&path),
        None => state.documents().find(|document| document.uri() == uri),
    }
}

impl AgentEditor {
    /// An editor with an empty table and no host.
    pub fn new(config: EditorConfig) -> Self {
        let table = Arc::new(DocumentTable::new(config.history_capacity));
        Self::with_table(table, config)
    }

    /// An editor reading from an existing table.
    pub fn with_table(table: Arc<DocumentTable>, config: EditorConfig) -> Self {
        Self {
            table,
            host: None,
            config,
        }
    }

    /// Attach the host that serves interactive requests.
    pub fn with_host(mut self, host: Arc<dyn AgentHost>) -> Self {
        self.host = Some(host);
        self
    }

    /// The document table; feed notifications into it.
    pub fn table(&self) -> &Arc<DocumentTable> {
        &self.table
    }

    /// Apply one notification to the table.
    pub fn apply(&self, notification: AgentNotification) {
        self.table.apply(notification);
    }

    /// Recently opened or focused documents.
    pub fn recent_documents(&self) -> RecentDocuments {
        self.table.snapshot().recent().clone()
    }

    fn host(&self, operation: &'static str) -> Result<&Arc<dyn AgentHost>> {
        self.host
            .as_ref()
            .ok_or(EditorError::NotImplemented(operation))
    }

    fn workspace(state: &TableState) -> Option<Workspace> {
        let root = state.workspace_root()?;
        let workspace = Workspace::from_path(root);
        if workspace.is_none() {
            warn!(root = %root.display(), "workspace root has no file URI");
        }
        workspace
    }
}

#[async_trait]
impl Editor for AgentEditor {
    fn get_active_workspace(&self) -> Option<Workspace> {
        Self::workspace(&self.table.snapshot())
    }

    fn get_workspace_of(&self, _uri: &str) -> Option<Workspace> {
        // Single root: every document resolves against it.
        self.get_active_workspace()
    }

    fn get_active_light_text_document(&self) -> Option<LightTextDocument> {
        self.table
            .snapshot()
            .active_document()
            .map(|document| document.light())
    }

    fn get_open_light_text_documents(&self) -> Vec<LightTextDocument> {
        self.table
            .snapshot()
            .documents()
            .map(|document| document.light())
            .collect()
    }

    async fn get_text_document(&self, uri: &str) -> Option<TextDocument> {
        let state = self.table.snapshot();
        find_by_uri(&state, uri).map(|document| document.to_text_document())
    }

    async fn edit(&self, uri: &str, edits: Vec<TextEdit>) -> Result<()> {
        let host = self.host("edit")?;

        let (path, document_uri, generation, next) = {
            let state = self.table.snapshot();
            let document = find_by_uri(&state, uri)
                .ok_or_else(|| EditorError::DocumentNotFound(uri.to_string()))?;
            let next = match document.offsets() {
                Some(offsets) => Some(apply_text_edits(offsets, &edits)?),
                None => None,
            };
            (
                document.file_path().to_path_buf(),
                document.uri().to_string(),
                document.generation(),
                next,
            )
        };

        if !host.apply_edits(&document_uri, &edits).await? {
            warn!(uri, "host rejected edit");
            return Err(EditorError::EditRejected(uri.to_string()));
        }

        if let Some(next) = next
            && !self.table.replace_if_current(&path, generation, &next)
        {
            debug!(uri, generation, "document moved on during edit; discarding local result");
        }
        Ok(())
    }

    async fn quick_pick(&self, labels: Vec<String>) -> Result<Option<String>> {
        self.host("quick_pick")?.show_quick_pick(&labels).await
    }

    async fn warn(&self, message: &str) -> Result<()> {
        self.host("warn")?.show_warning(message).await
    }

    async fn prompt(&self, prompt: Option<&str>) -> Result<Option<String>> {
        self.host("prompt")?.show_input_box(prompt).await
    }

    fn get_indentation(&self) -> Indentation {
        self.config.indentation
    }

    async fn did_receive_fixup_text(
        &self,
        _id: &str,
        _text: &str,
        _state: FixupState,
    ) -> Result<()> {
        Err(EditorError::NotImplemented("did_receive_fixup_text"))
    }

    fn truncation_limit(&self) -> usize {
        self.config.truncation_limit
    }

    async fn get_document_text_truncated(&self, uri: &str) -> Option<String> {
        let state = self.table.snapshot();
        let content = find_by_uri(&state, uri)?.content()?;
        if content.is_empty() {
            return None;
        }
        Some(truncate_utf16(content, self.truncation_limit()).to_string())
    }

    async fn get_active_text_editor_selection(&self) -> Option<SelectionContext> {
        let state = self.table.snapshot();
        let document = state.active_document()?;
        selection_context(
            &document.file_name(),
            document.offsets(),
            document.selection(),
        )
    }

    async fn get_active_text_editor_selection_or_entire_file(&self) -> Option<SelectionContext> {
        let state = self.table.snapshot();
        let document = state.active_document()?;
        selection_or_entire_file(
            &document.file_name(),
            document.offsets(),
            document.selection(),
        )
    }

    async fn get_active_text_editor_visible_content(&self) -> Option<VisibleContent> {
        let state = self.table.snapshot();
        let document = state.active_document()?;
        visible_content(&document.file_name(), document.offsets())
    }
}
