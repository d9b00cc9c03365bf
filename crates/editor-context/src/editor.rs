//! The editor capability interface.
//!
//! [`Editor`] is what a host environment can do for assistant features: report the active
//! workspace and documents, hand out document snapshots, and (on interactive hosts) edit,
//! prompt, pick, and warn.
//!
//! Implementations provide the primitives; the derived operations (full-document lookup,
//! truncated text, relative paths, selection context) have default bodies built on those
//! primitives and only need overriding when a backend can answer them more directly.
//!
//! Informational queries never fail: absence is `None` or empty. Operations a backend cannot
//! support fail with [`EditorError::NotImplemented`].

use crate::document::{LightTextDocument, TextDocument};
use crate::edit::TextEdit;
use crate::error::{EditorError, Result};
use crate::offsets::truncate_utf16;
use crate::selection::{
    SelectionContext, VisibleContent, selection_context, selection_or_entire_file,
    visible_content,
};
use crate::uri::display_name_for_uri;
use crate::workspace::Workspace;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Upper bound on the text returned by [`Editor::get_document_text_truncated`], in UTF-16
/// code units.
pub const MAX_DOCUMENT_TEXT_CHARS: usize = 100_000;

/// Whether indentation uses spaces or tabs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndentationKind {
    /// Indent with spaces.
    #[default]
    Space,
    /// Indent with tabs.
    Tab,
}

/// Indentation settings reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Indentation {
    /// Spaces or tabs.
    pub kind: IndentationKind,
    /// In `kind` units (2 tabs, 4 spaces, etc.).
    pub size: usize,
}

impl Indentation {
    /// Indent with `size` spaces.
    pub fn spaces(size: usize) -> Self {
        Self {
            kind: IndentationKind::Space,
            size,
        }
    }

    /// Indent with `size` tabs.
    pub fn tabs(size: usize) -> Self {
        Self {
            kind: IndentationKind::Tab,
            size,
        }
    }
}

impl Default for Indentation {
    fn default() -> Self {
        Self::spaces(4)
    }
}

/// Progress of streamed fixup text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FixupState {
    /// More text will follow.
    Streaming,
    /// The text is final.
    Complete,
}

/// What a host environment can do.
#[async_trait]
pub trait Editor: Send + Sync {
    /// The active workspace, if any.
    fn get_active_workspace(&self) -> Option<Workspace>;

    /// The workspace `uri` belongs to, if any.
    fn get_workspace_of(&self, uri: &str) -> Option<Workspace>;

    /// The document the user is looking at.
    fn get_active_light_text_document(&self) -> Option<LightTextDocument>;

    /// All open documents.
    fn get_open_light_text_documents(&self) -> Vec<LightTextDocument>;

    /// A snapshot of the document at `uri`, or `None` if it is not open.
    async fn get_text_document(&self, uri: &str) -> Option<TextDocument>;

    /// Apply `edits` to the document at `uri`.
    async fn edit(&self, uri: &str, edits: Vec<TextEdit>) -> Result<()>;

    /// Ask the user to pick one of `labels`.
    async fn quick_pick(&self, labels: Vec<String>) -> Result<Option<String>>;

    /// Show a warning.
    async fn warn(&self, message: &str) -> Result<()>;

    /// Ask the user for free-form input.
    async fn prompt(&self, prompt: Option<&str>) -> Result<Option<String>>;

    /// Indentation settings; backends that do not know report four spaces.
    fn get_indentation(&self) -> Indentation;

    /// Receive streamed text for the fixup task `id`.
    async fn did_receive_fixup_text(&self, id: &str, text: &str, state: FixupState)
    -> Result<()>;

    /// Cap used by [`Editor::get_document_text_truncated`].
    fn truncation_limit(&self) -> usize {
        MAX_DOCUMENT_TEXT_CHARS
    }

    /// Resolve a light document to its snapshot.
    async fn get_full_text_document(&self, light: &LightTextDocument) -> Result<TextDocument> {
        self.get_text_document(&light.uri)
            .await
            .ok_or_else(|| EditorError::DocumentNotFound(light.uri.clone()))
    }

    /// The first [`Editor::truncation_limit`] characters of the document at `uri`.
    async fn get_document_text_truncated(&self, uri: &str) -> Option<String> {
        let document = self.get_text_document(uri).await?;
        Some(truncate_utf16(document.content(), self.truncation_limit()).to_string())
    }

    /// Path of `uri` relative to its workspace root.
    async fn get_document_relative_path(&self, uri: &str) -> Option<String> {
        self.get_workspace_of(uri)?.relative_to(uri)
    }

    /// Text around the active document's selection.
    async fn get_active_text_editor_selection(&self) -> Option<SelectionContext> {
        let light = self.get_active_light_text_document()?;
        let document = self.get_text_document(&light.uri).await?;
        selection_context(
            &display_name_for_uri(document.uri()),
            Some(document.offsets()),
            document.selection(),
        )
    }

    /// Like [`Editor::get_active_text_editor_selection`], treating the whole file as
    /// selected when there is no selection.
    async fn get_active_text_editor_selection_or_entire_file(&self) -> Option<SelectionContext> {
        let light = self.get_active_light_text_document()?;
        let document = self.get_text_document(&light.uri).await?;
        selection_or_entire_file(
            &display_name_for_uri(document.uri()),
            Some(document.offsets()),
            document.selection(),
        )
    }

    /// Content of the active document.
    async fn get_active_text_editor_visible_content(&self) -> Option<VisibleContent> {
        let light = self.get_active_light_text_document()?;
        let document = self.get_text_document(&light.uri).await?;
        visible_content(&display_name_for_uri(document.uri()), Some(document.offsets()))
    }
}
