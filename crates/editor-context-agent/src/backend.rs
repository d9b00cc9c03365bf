//! Backend selection.
//!
//! The set of backends is closed: [`EditorBackend`] is chosen once from a [`BackendConfig`]
//! and dispatches every [`Editor`] operation to the selected variant.

use crate::editor::AgentEditor;
use async_trait::async_trait;
use editor_context::{
    ConfigError, Editor, EditorConfig, FixupState, Indentation, LightTextDocument, NoopEditor,
    Result, SelectionContext, TextDocument, TextEdit, VisibleContent, Workspace,
};
use serde::{Deserialize, Serialize};

/// Which backend to run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// No host attached.
    #[default]
    Noop,
    /// State reported by an agent connection.
    Agent,
}

/// Backend selection plus shared editor settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Backend variant.
    pub kind: BackendKind,
    /// Settings passed to the backend.
    pub editor: EditorConfig,
}

impl BackendConfig {
    /// Parse a backend configuration from JSON.
    pub fn from_json(json: &str) -> std::result::Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// One of the available editor backends.
#[derive(Debug, Clone)]
pub enum EditorBackend {
    /// See [`NoopEditor`].
    Noop(NoopEditor),
    /// See [`AgentEditor`].
    Agent(AgentEditor),
}

impl EditorBackend {
    /// Build the backend named by `config`.
    pub fn from_config(config: BackendConfig) -> Self {
        match config.kind {
            BackendKind::Noop => Self::Noop(NoopEditor::new()),
            BackendKind::Agent => Self::Agent(AgentEditor::new(config.editor)),
        }
    }

    /// The selected variant.
    pub fn kind(&self) -> BackendKind {
        match self {
            Self::Noop(_) => BackendKind::Noop,
            Self::Agent(_) => BackendKind::Agent,
        }
    }

    /// The agent backend, if selected.
    pub fn as_agent(&self) -> Option<&AgentEditor> {
        match self {
            Self::Agent(editor) => Some(editor),
            Self::Noop(_) => None,
        }
    }
}

impl From<AgentEditor> for EditorBackend {
    fn from(editor: AgentEditor) -> Self {
        Self::Agent(editor)
    }
}

macro_rules! dispatch {
    ($self:ident, $editor:ident => $body:expr) => {
        match $self {
            EditorBackend::Noop($editor) => $body,
            EditorBackend::Agent($editor) => $body,
        }
    };
}

#[async_trait]
impl Editor for EditorBackend {
    fn get_active_workspace(&self) -> Option<Workspace> {
        dispatch!(self, editor => editor.get_active_workspace())
    }

    fn get_workspace_of(&self, uri: &str) -> Option<Workspace> {
        dispatch!(self, editor => editor.get_workspace_of(uri))
    }

    fn get_active_light_text_document(&self) -> Option<LightTextDocument> {
        dispatch!(self, editor => editor.get_active_light_text_document())
    }

    fn get_open_light_text_documents(&self) -> Vec<LightTextDocument> {
        dispatch!(self, editor => editor.get_open_light_text_documents())
    }

    async fn get_text_document(&self, uri: &str) -> Option<TextDocument> {
        dispatch!(self, editor => editor.get_text_document(uri).await)
    }

    async fn edit(&self, uri: &str, edits: Vec<TextEdit>) -> Result<()> {
        dispatch!(self, editor => editor.edit(uri, edits).await)
    }

    async fn quick_pick(&self, labels: Vec<String>) -> Result<Option<String>> {
        dispatch!(self, editor => editor.quick_pick(labels).await)
    }

    async fn warn(&self, message: &str) -> Result<()> {
        dispatch!(self, editor => editor.warn(message).await)
    }

    async fn prompt(&self, prompt: Option<&str>) -> Result<Option<String>> {
        dispatch!(self, editor => editor.prompt(prompt).await)
    }

    fn get_indentation(&self) -> Indentation {
        dispatch!(self, editor => editor.get_indentation())
    }

    async fn did_receive_fixup_text(
        &self,
        id: &str,
        text: &str,
        state: FixupState,
    ) -> Result<()> {
        dispatch!(self, editor => editor.did_receive_fixup_text(id, text, state).await)
    }

    fn truncation_limit(&self) -> usize {
        dispatch!(self, editor => editor.truncation_limit())
    }

    async fn get_full_text_document(&self, light: &LightTextDocument) -> Result<TextDocument> {
        dispatch!(self, editor => editor.get_full_text_document(light).await)
    }

    async fn get_document_text_truncated(&self, uri: &str) -> Option<String> {
        dispatch!(self, editor => editor.get_document_text_truncated(uri).await)
    }

    async fn get_document_relative_path(&self, uri: &str) -> Option<String> {
        dispatch!(self, editor => editor.get_document_relative_path(uri).await)
    }

    async fn get_active_text_editor_selection(&self) -> Option<SelectionContext> {
        dispatch!(self, editor => editor.get_active_text_editor_selection().await)
    }

    async fn get_active_text_editor_selection_or_entire_file(&self) -> Option<SelectionContext> {
        dispatch!(self, editor => editor.get_active_text_editor_selection_or_entire_file().await)
    }

    async fn get_active_text_editor_visible_content(&self) -> Option<VisibleContent> {
        dispatch!(self, editor => editor.get_active_text_editor_visible_content().await)
    }
}
