//! Position/offset indexing for one buffer snapshot.
//!
//! [`DocumentOffsets`] scans the text once and records where every line starts, both in UTF-16
//! code units (the unit hosts use for [`Position::character`]) and in UTF-8 bytes (the unit
//! needed to slice a Rust `str`). Lookups binary-search the line table, so converting in
//! either direction is O(log N) in the number of lines, plus a walk along one line when that
//! line contains non-ASCII text.
//!
//! Line terminators are `\n` and `\r\n`. A terminator belongs to the line it ends and is never
//! part of the line's length, so a position past the end of a line clamps to just before its
//! terminator.
//!
//! An index is built for exactly one snapshot and is never updated in place: a new snapshot
//! gets a new index.

use crate::error::{EditorError, Result};
use crate::position::{OffsetRange, Position, Range};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LineSpan {
    /// UTF-16 offset of the first character.
    start: usize,
    /// Byte offset of the first character.
    byte_start: usize,
    /// Length in UTF-16 code units, terminator excluded.
    len: usize,
    /// Length in bytes, terminator excluded.
    byte_len: usize,
    /// Fast path flag: UTF-16 columns equal byte columns.
    is_pure_ascii: bool,
}

/// Line-start table for a text snapshot.
#[derive(Debug, Clone)]
pub struct DocumentOffsets {
    text: Arc<str>,
    lines: Vec<LineSpan>,
    len_utf16: usize,
}

impl DocumentOffsets {
    /// Build the index for `text`.
    pub fn new(text: impl Into<Arc<str>>) -> Self {
        let text: Arc<str> = text.into();
        let lines = compute_line_spans(&text);
        let len_utf16 = lines
            .last()
            .map(|last| last.start + last.len)
            .unwrap_or_default();
        Self {
            text,
            lines,
            len_utf16,
        }
    }

    /// The indexed text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// A shared handle to the indexed text.
    pub fn shared_text(&self) -> Arc<str> {
        Arc::clone(&self.text)
    }

    /// Number of lines. An empty buffer has one (empty) line, and a trailing terminator
    /// opens a final empty line.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Total length in UTF-16 code units.
    pub fn len_utf16(&self) -> usize {
        self.len_utf16
    }

    /// Returns `true` if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Length of `line` in UTF-16 code units, terminator excluded.
    pub fn line_len(&self, line: usize) -> Option<usize> {
        self.lines.get(line).map(|span| span.len)
    }

    /// Text of `line`, terminator excluded.
    pub fn line_text(&self, line: usize) -> Option<&str> {
        let span = self.lines.get(line)?;
        Some(&self.text[span.byte_start..span.byte_start + span.byte_len])
    }

    /// Convert a position to an absolute UTF-16 offset.
    ///
    /// A `character` past the end of its line clamps to the line's length, which keeps stale
    /// cursors on shortened lines usable. A `line` past the end of the buffer is an error.
    pub fn offset(&self, position: Position) -> Result<usize> {
        let span = self
            .lines
            .get(position.line)
            .ok_or(EditorError::OutOfRange {
                line: position.line,
                line_count: self.lines.len(),
            })?;
        Ok(span.start + position.character.min(span.len))
    }

    /// Convert an absolute UTF-16 offset to a position.
    ///
    /// Offsets past the end of the buffer clamp to the last position. Offsets inside a `\r\n`
    /// terminator resolve to the end of the line's content.
    pub fn position(&self, offset: usize) -> Position {
        let offset = offset.min(self.len_utf16);
        let line = self.line_of_offset(offset);
        let span = &self.lines[line];
        Position::new(line, (offset - span.start).min(span.len))
    }

    /// Convert a range to offsets. Inverted ranges become empty at their start.
    pub fn offset_range(&self, range: Range) -> Result<OffsetRange> {
        let range = range.normalized();
        Ok(OffsetRange::new(
            self.offset(range.start)?,
            self.offset(range.end)?,
        ))
    }

    /// Convert an absolute UTF-16 offset to a byte index into [`DocumentOffsets::text`].
    ///
    /// The result is always a `char` boundary: an offset between the two halves of a
    /// surrogate pair floors to the start of that character.
    pub fn byte_offset(&self, offset: usize) -> usize {
        let offset = offset.min(self.len_utf16);
        let span = &self.lines[self.line_of_offset(offset)];
        let column = (offset - span.start).min(span.len);
        if span.is_pure_ascii {
            return span.byte_start + column;
        }
        let line = &self.text[span.byte_start..span.byte_start + span.byte_len];
        span.byte_start + utf16_column_to_byte(line, column)
    }

    /// Text covered by `range`.
    pub fn slice(&self, range: OffsetRange) -> &str {
        let start = self.byte_offset(range.start);
        let end = self.byte_offset(range.end).max(start);
        &self.text[start..end]
    }

    /// Text covered by a line/character range.
    pub fn range_slice(&self, range: Range) -> Result<&str> {
        Ok(self.slice(self.offset_range(range)?))
    }

    fn line_of_offset(&self, offset: usize) -> usize {
        // `lines[0].start == 0`, so at least one line satisfies the predicate.
        self.lines
            .partition_point(|span| span.start <= offset)
            .saturating_sub(1)
    }
}

/// Length of `text` in UTF-16 code units.
pub fn utf16_len(text: &str) -> usize {
    text.encode_utf16().count()
}

/// The longest prefix of `text` holding at most `limit` UTF-16 code units.
///
/// Surrogate pairs are never split; the prefix stops before a pair that would straddle the
/// limit.
pub fn truncate_utf16(text: &str, limit: usize) -> &str {
    // Every UTF-8 byte sequence encodes to at most as many UTF-16 units as it has bytes.
    if text.len() <= limit {
        return text;
    }
    &text[..utf16_column_to_byte(text, limit)]
}

fn utf16_column_to_byte(text: &str, column: usize) -> usize {
    let mut units = 0;
    for (idx, ch) in text.char_indices() {
        let next = units + ch.len_utf16();
        if next > column {
            return idx;
        }
        units = next;
    }
    text.len()
}

fn compute_line_spans(text: &str) -> Vec<LineSpan> {
    let bytes = text.as_bytes();
    let mut lines = Vec::new();
    let mut start = 0;
    let mut byte_start = 0;

    loop {
        let newline = bytes[byte_start..]
            .iter()
            .position(|&b| b == b'\n')
            .map(|idx| byte_start + idx);

        let (content_end, terminator_len) = match newline {
            Some(nl) if nl > byte_start && bytes[nl - 1] == b'\r' => (nl - 1, 2),
            Some(nl) => (nl, 1),
            None => (bytes.len(), 0),
        };

        let line = &text[byte_start..content_end];
        let is_pure_ascii = line.is_ascii();
        let len = if is_pure_ascii {
            line.len()
        } else {
            utf16_len(line)
        };
        lines.push(LineSpan {
            start,
            byte_start,
            len,
            byte_len: line.len(),
            is_pure_ascii,
        });

        let Some(nl) = newline else {
            break;
        };
        start += len + terminator_len;
        byte_start = nl + 1;
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_buffer_has_one_line() {
        let offsets = DocumentOffsets::new("");
        assert_eq!(offsets.line_count(), 1);
        assert_eq!(offsets.len_utf16(), 0);
        assert_eq!(offsets.offset(Position::new(0, 5)).unwrap(), 0);
        assert_eq!(offsets.position(10), Position::new(0, 0));
    }

    #[test]
    fn test_line_starts_lf() {
        let offsets = DocumentOffsets::new("ABC\nDEF\nGHI");
        assert_eq!(offsets.line_count(), 3);
        assert_eq!(offsets.offset(Position::new(0, 2)).unwrap(), 2);
        assert_eq!(offsets.offset(Position::new(1, 0)).unwrap(), 4);
        assert_eq!(offsets.offset(Position::new(2, 0)).unwrap(), 8);
        assert_eq!(offsets.position(4), Position::new(1, 0));
        assert_eq!(offsets.position(8), Position::new(2, 0));
    }

    #[test]
    fn test_crlf_counts_as_one_terminator() {
        let offsets = DocumentOffsets::new("ab\r\ncd\r\n");
        assert_eq!(offsets.line_count(), 3);
        assert_eq!(offsets.line_len(0), Some(2));
        assert_eq!(offsets.line_text(0), Some("ab"));
        assert_eq!(offsets.offset(Position::new(1, 0)).unwrap(), 4);
        assert_eq!(offsets.offset(Position::new(2, 0)).unwrap(), 8);
        assert_eq!(offsets.len_utf16(), 8);

        // Inside the terminator: the end of the line's content.
        assert_eq!(offsets.position(2), Position::new(0, 2));
        assert_eq!(offsets.position(3), Position::new(0, 2));
        assert_eq!(offsets.position(4), Position::new(1, 0));
    }

    #[test]
    fn test_lone_cr_is_text() {
        let offsets = DocumentOffsets::new("a\rb\nc");
        assert_eq!(offsets.line_count(), 2);
        assert_eq!(offsets.line_len(0), Some(3));
    }

    #[test]
    fn test_character_clamps_to_line_length() {
        let offsets = DocumentOffsets::new("short\nlonger line");
        assert_eq!(offsets.offset(Position::new(0, 99)).unwrap(), 5);
        assert_eq!(
            offsets.position(offsets.offset(Position::new(0, 99)).unwrap()),
            Position::new(0, 5)
        );
    }

    #[test]
    fn test_line_past_end_is_out_of_range() {
        let offsets = DocumentOffsets::new("one\ntwo");
        assert_eq!(
            offsets.offset(Position::new(2, 0)),
            Err(EditorError::OutOfRange {
                line: 2,
                line_count: 2
            })
        );
    }

    #[test]
    fn test_offset_past_end_clamps_to_last_position() {
        let offsets = DocumentOffsets::new("one\ntwo");
        assert_eq!(offsets.position(1_000), Position::new(1, 3));
    }

    #[test]
    fn test_utf16_columns() {
        // 'é' is one UTF-16 unit (two bytes), '😀' is two units (four bytes).
        let offsets = DocumentOffsets::new("é😀x\n你好");
        assert_eq!(offsets.line_len(0), Some(4));
        assert_eq!(offsets.offset(Position::new(1, 1)).unwrap(), 6);
        assert_eq!(offsets.position(3), Position::new(0, 3));
        assert_eq!(offsets.byte_offset(3), "é😀".len());
        assert_eq!(offsets.slice(OffsetRange::new(1, 3)), "😀");
        assert_eq!(offsets.slice(OffsetRange::new(5, 7)), "你好");
    }

    #[test]
    fn test_byte_offset_floors_inside_surrogate_pair() {
        let offsets = DocumentOffsets::new("a😀b");
        assert_eq!(offsets.byte_offset(2), 1);
        assert_eq!(offsets.byte_offset(3), 5);
    }

    #[test]
    fn test_range_slice() {
        let offsets = DocumentOffsets::new("fn main() {\n    body();\n}");
        let range = Range::new(Position::new(1, 4), Position::new(1, 8));
        assert_eq!(offsets.range_slice(range).unwrap(), "body");

        let inverted = Range::new(Position::new(1, 8), Position::new(0, 0));
        assert_eq!(offsets.range_slice(inverted).unwrap(), "");
    }

    #[test]
    fn test_truncate_utf16() {
        assert_eq!(truncate_utf16("hello", 10), "hello");
        assert_eq!(truncate_utf16("hello", 3), "hel");
        assert_eq!(truncate_utf16("ab😀cd", 3), "ab");
        assert_eq!(truncate_utf16("ab😀cd", 4), "ab😀");
        assert_eq!(truncate_utf16("你好世界", 2), "你好");
    }
}
