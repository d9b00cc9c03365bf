//! Text slices around a selection.
//!
//! All functions take the content as an optional index: a document the host opened without
//! content has no text context at all, and every function returns `None` for it. The same
//! precondition holds for the whole-file fallback, so "no content" never turns into an empty
//! selection.

use crate::offsets::DocumentOffsets;
use crate::position::JointRange;
use serde::{Deserialize, Serialize};

/// The text before, inside, and after a selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionContext {
    /// Display name of the file.
    pub file_name: String,
    /// Text from the start of the buffer up to the selection.
    pub preceding_text: String,
    /// Selected text.
    pub selected_text: String,
    /// Text from the end of the selection to the end of the buffer.
    pub following_text: String,
}

/// The content of a document as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisibleContent {
    /// Display name of the file.
    pub file_name: String,
    /// Document content.
    pub content: String,
}

/// Split the content around an explicit selection.
///
/// Returns `None` when content or selection is missing, or when the selection refers to a
/// line the content does not have.
pub fn selection_context(
    file_name: &str,
    content: Option<&DocumentOffsets>,
    selection: Option<&JointRange>,
) -> Option<SelectionContext> {
    let offsets = content?;
    let selection = selection?;
    let range = match selection.offsets(offsets) {
        Ok(range) => range,
        Err(err) => {
            tracing::debug!(file_name, %err, "selection does not resolve against content");
            return None;
        }
    };

    let text = offsets.text();
    let from = offsets.byte_offset(range.start);
    let to = offsets.byte_offset(range.end).max(from);
    Some(SelectionContext {
        file_name: file_name.to_string(),
        preceding_text: text[..from].to_string(),
        selected_text: text[from..to].to_string(),
        following_text: text[to..].to_string(),
    })
}

/// Like [`selection_context`], but with no selection the whole file counts as selected.
pub fn selection_or_entire_file(
    file_name: &str,
    content: Option<&DocumentOffsets>,
    selection: Option<&JointRange>,
) -> Option<SelectionContext> {
    let offsets = content?;
    if selection.is_none() {
        return Some(SelectionContext {
            file_name: file_name.to_string(),
            preceding_text: String::new(),
            selected_text: offsets.text().to_string(),
            following_text: String::new(),
        });
    }
    selection_context(file_name, Some(offsets), selection)
}

/// The document's content with its display name.
pub fn visible_content(
    file_name: &str,
    content: Option<&DocumentOffsets>,
) -> Option<VisibleContent> {
    content.map(|offsets| VisibleContent {
        file_name: file_name.to_string(),
        content: offsets.text().to_string(),
    })
}
