//! Applying text edits to a snapshot.

use crate::error::{EditorError, Result};
use crate::offsets::DocumentOffsets;
use crate::position::{OffsetRange, Range};
use ropey::Rope;
use serde::{Deserialize, Serialize};

/// Replace the text in `range` with `new_text`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextEdit {
    /// The range to replace (UTF-16 based line/character positions).
    pub range: Range,
    /// Replacement text (may contain newlines).
    pub new_text: String,
}

impl TextEdit {
    /// Create a text edit.
    pub fn new(range: Range, new_text: impl Into<String>) -> Self {
        Self {
            range,
            new_text: new_text.into(),
        }
    }
}

/// Apply `edits` to the snapshot indexed by `offsets` and return the new text.
///
/// All ranges refer to the original snapshot. Edits at the same offset are inserted in array
/// order. Overlapping edits are rejected.
pub fn apply_text_edits(offsets: &DocumentOffsets, edits: &[TextEdit]) -> Result<String> {
    let mut resolved = edits
        .iter()
        .enumerate()
        .map(|(idx, edit)| Ok((offsets.offset_range(edit.range)?, idx, edit.new_text.as_str())))
        .collect::<Result<Vec<(OffsetRange, usize, &str)>>>()?;

    resolved.sort_by_key(|(range, idx, _)| (range.start, range.end, *idx));
    if resolved
        .windows(2)
        .any(|pair| pair[1].0.start < pair[0].0.end)
    {
        return Err(EditorError::OverlappingEdits);
    }

    let mut rope = Rope::from_str(offsets.text());
    // Back to front so earlier offsets stay valid.
    for (range, _, new_text) in resolved.iter().rev() {
        let start = rope.utf16_cu_to_char(range.start);
        let end = rope.utf16_cu_to_char(range.end);
        if start < end {
            rope.remove(start..end);
        }
        if !new_text.is_empty() {
            rope.insert(start, new_text);
        }
    }

    Ok(rope.to_string())
}
