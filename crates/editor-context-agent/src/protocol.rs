//! Inbound notifications from the agent protocol connection.
//!
//! Messages use the `{"method": ..., "params": ...}` envelope. Documents are identified by
//! filesystem path; the backend derives `file://` URIs from those paths.

use editor_context::Range;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A document as the agent reports it.
///
/// `content` is optional: a host may announce a document before sending its text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentTextDocument {
    /// Filesystem path of the document.
    pub file_path: PathBuf,
    /// Full text, if sent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Selection, if the host has a cursor in this document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selection: Option<Range>,
    /// Visible viewport, if the host reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible: Option<Range>,
    /// Language identifier; guessed from the extension when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_id: Option<String>,
}

impl AgentTextDocument {
    /// A document with no content, selection, or language.
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
            content: None,
            selection: None,
            visible: None,
            language_id: None,
        }
    }

    /// Set the content.
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Set the selection.
    pub fn with_selection(mut self, selection: Range) -> Self {
        self.selection = Some(selection);
        self
    }

    /// Set the visible range.
    pub fn with_visible(mut self, visible: Range) -> Self {
        self.visible = Some(visible);
        self
    }

    /// Set the language identifier.
    pub fn with_language_id(mut self, language_id: impl Into<String>) -> Self {
        self.language_id = Some(language_id.into());
        self
    }
}

/// Parameters of `textDocument/didOpen`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DidOpenParams {
    /// The opened document.
    #[serde(flatten)]
    pub document: AgentTextDocument,
    /// Make the document active even if another one is.
    #[serde(default)]
    pub focus: bool,
}

/// Parameters of `textDocument/didChangeSelection`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DidChangeSelectionParams {
    /// Document path.
    pub file_path: PathBuf,
    /// New selection; `None` clears it.
    #[serde(default)]
    pub selection: Option<Range>,
}

/// Parameters naming a single document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilePathParams {
    /// Document path.
    pub file_path: PathBuf,
}

/// Parameters of `workspace/didChangeRoot`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceRootParams {
    /// New root path; `None` means no workspace.
    #[serde(default)]
    pub root_path: Option<PathBuf>,
}

/// A state-changing notification from the agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method", content = "params")]
pub enum AgentNotification {
    /// A document was opened.
    #[serde(rename = "textDocument/didOpen")]
    DocumentOpened(DidOpenParams),
    /// A document's content (and optionally its ranges) changed.
    #[serde(rename = "textDocument/didChange")]
    DocumentChanged(AgentTextDocument),
    /// A document's selection changed.
    #[serde(rename = "textDocument/didChangeSelection")]
    SelectionChanged(DidChangeSelectionParams),
    /// The user switched to a document.
    #[serde(rename = "textDocument/didFocus")]
    DocumentFocused(FilePathParams),
    /// A document was closed.
    #[serde(rename = "textDocument/didClose")]
    DocumentClosed(FilePathParams),
    /// The workspace root changed.
    #[serde(rename = "workspace/didChangeRoot")]
    WorkspaceChanged(WorkspaceRootParams),
}

impl AgentNotification {
    /// Parse a notification from its JSON envelope.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Parse a notification from an already-decoded JSON value.
    pub fn from_value(value: serde_json::Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }
}
