//! The backend used when no host is attached.

use crate::document::{LightTextDocument, TextDocument};
use crate::edit::TextEdit;
use crate::editor::{Editor, FixupState, Indentation};
use crate::error::Result;
use crate::workspace::Workspace;
use async_trait::async_trait;

/// An editor with nothing open.
///
/// Every query reports absence and every interactive request resolves immediately with no
/// answer. Useful for tests and headless batch runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopEditor;

impl NoopEditor {
    /// Create a no-op editor.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Editor for NoopEditor {
    fn get_active_workspace(&self) -> Option<Workspace> {
        None
    }

    fn get_workspace_of(&self, _uri: &str) -> Option<Workspace> {
        None
    }

    fn get_active_light_text_document(&self) -> Option<LightTextDocument> {
        None
    }

    fn get_open_light_text_documents(&self) -> Vec<LightTextDocument> {
        Vec::new()
    }

    async fn get_text_document(&self, _uri: &str) -> Option<TextDocument> {
        None
    }

    async fn edit(&self, _uri: &str, _edits: Vec<TextEdit>) -> Result<()> {
        Ok(())
    }

    async fn quick_pick(&self, _labels: Vec<String>) -> Result<Option<String>> {
        Ok(None)
    }

    async fn warn(&self, _message: &str) -> Result<()> {
        Ok(())
    }

    async fn prompt(&self, _prompt: Option<&str>) -> Result<Option<String>> {
        Ok(None)
    }

    fn get_indentation(&self) -> Indentation {
        Indentation::default()
    }

    async fn did_receive_fixup_text(
        &self,
        _id: &str,
        _text: &str,
        _state: FixupState,
    ) -> Result<()> {
        Ok(())
    }
}
