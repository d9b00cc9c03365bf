//! Positions, ranges, and offset ranges.
//!
//! Positions are 0-based `(line, character)` pairs where `character` counts UTF-16 code units,
//! matching what editor hosts send over the wire. [`OffsetRange`] is the linear counterpart,
//! expressed in absolute UTF-16 offsets into one buffer snapshot.

use crate::error::Result;
use crate::offsets::DocumentOffsets;
use serde::{Deserialize, Serialize};

/// A 0-based position in a text buffer.
///
/// Ordering is lexicographic: line first, then character.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Position {
    /// Line number (0-based).
    pub line: usize,
    /// Character offset within the line (UTF-16 code units, 0-based).
    pub character: usize,
}

impl Position {
    /// Create a new position.
    pub fn new(line: usize, character: usize) -> Self {
        Self { line, character }
    }
}

/// A span between two positions (end exclusive).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Range {
    /// Range start position (inclusive).
    pub start: Position,
    /// Range end position (exclusive).
    pub end: Position,
}

impl Range {
    /// Create a new range.
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Create an empty range at `position`.
    pub fn empty(position: Position) -> Self {
        Self::new(position, position)
    }

    /// Returns `true` if the range covers no text.
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Returns this range, or an empty range at `start` if `start` sorts after `end`.
    ///
    /// Hosts are not trusted to send ordered ranges.
    pub fn normalized(self) -> Self {
        if self.start <= self.end {
            self
        } else {
            Self::empty(self.start)
        }
    }
}

/// A half-open span of absolute UTF-16 offsets into one buffer snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OffsetRange {
    /// Start offset (inclusive).
    pub start: usize,
    /// End offset (exclusive), never less than `start`.
    pub end: usize,
}

impl OffsetRange {
    /// Create a new offset range; `end` is raised to `start` if it would precede it.
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start,
            end: end.max(start),
        }
    }

    /// Length in UTF-16 code units.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns `true` if the span is empty.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// A [`Range`] paired with its offsets, when they have already been computed.
///
/// The cached offsets are only ever filled in against the snapshot that owns this range.
/// Constructing a new snapshot goes through [`JointRange::new`] or [`JointRange::resolved`],
/// so a stale cache cannot survive an edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct JointRange {
    /// Line/character range.
    #[serde(rename = "position")]
    pub range: Range,
    /// Offsets of `range` in the owning snapshot, if computed.
    pub offset: Option<OffsetRange>,
}

impl JointRange {
    /// Wrap a range without computing its offsets.
    pub fn new(range: Range) -> Self {
        Self {
            range: range.normalized(),
            offset: None,
        }
    }

    /// Wrap a range and compute its offsets against `offsets`.
    ///
    /// If the range cannot be resolved (line out of range) the cache stays empty and the
    /// error resurfaces from [`JointRange::offsets`].
    pub fn resolved(range: Range, offsets: &DocumentOffsets) -> Self {
        let range = range.normalized();
        Self {
            range,
            offset: offsets.offset_range(range).ok(),
        }
    }

    /// Offsets of this range, using the cache when present.
    pub fn offsets(&self, offsets: &DocumentOffsets) -> Result<OffsetRange> {
        match self.offset {
            Some(cached) => Ok(cached),
            None => offsets.offset_range(self.range),
        }
    }
}

impl From<Range> for JointRange {
    fn from(range: Range) -> Self {
        Self::new(range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_ordering_is_lexicographic() {
        assert!(Position::new(0, 10) < Position::new(1, 0));
        assert!(Position::new(2, 3) < Position::new(2, 4));
        assert_eq!(Position::new(1, 1), Position::new(1, 1));
    }

    #[test]
    fn test_inverted_range_normalizes_to_empty_start() {
        let range = Range::new(Position::new(3, 2), Position::new(1, 0));
        let normalized = range.normalized();
        assert_eq!(normalized, Range::empty(Position::new(3, 2)));
        assert!(normalized.is_empty());
    }

    #[test]
    fn test_offset_range_end_never_precedes_start() {
        let range = OffsetRange::new(5, 2);
        assert_eq!(range, OffsetRange::new(5, 5));
        assert!(range.is_empty());
        assert_eq!(OffsetRange::new(2, 7).len(), 5);
    }

    #[test]
    fn test_joint_range_uses_cache() {
        let offsets = DocumentOffsets::new("abc\ndef");
        let range = Range::new(Position::new(1, 0), Position::new(1, 2));

        let joint = JointRange::resolved(range, &offsets);
        assert_eq!(joint.offset, Some(OffsetRange::new(4, 6)));

        let uncached = JointRange::new(range);
        assert_eq!(uncached.offset, None);
        assert_eq!(uncached.offsets(&offsets).unwrap(), OffsetRange::new(4, 6));
    }

    #[test]
    fn test_joint_range_serializes_host_shape() {
        let joint = JointRange::new(Range::new(Position::new(0, 1), Position::new(0, 2)));
        let value = serde_json::to_value(joint).unwrap();
        assert_eq!(value["position"]["start"]["character"], 1);
        assert!(value["offset"].is_null());
    }
}
