//! Error types shared by every editor backend.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Errors produced by indexing, document lookup, and editor capability requests.
///
/// Absence is not an error: a missing active document, selection, or workspace is reported as
/// `None`/empty by the query that was asked, never through this type.
pub enum EditorError {
    #[error("line {line} is out of range (document has {line_count} lines)")]
    /// A position referenced a line past the end of the buffer.
    OutOfRange {
        /// Requested line (0-based).
        line: usize,
        /// Number of lines in the buffer.
        line_count: usize,
    },

    #[error("attempted to get text document that does not exist with URI '{0}'")]
    /// A light document could not be resolved to a full document.
    DocumentNotFound(String),

    #[error("{0} is not implemented by this editor backend")]
    /// The backend has no support for an interactive or mutating operation.
    NotImplemented(&'static str),

    #[error("invalid uri '{0}'")]
    /// A URI could not be parsed.
    InvalidUri(String),

    #[error("text edits overlap")]
    /// Two edits in one batch touch the same span of text.
    OverlappingEdits,

    #[error("host rejected edit for '{0}'")]
    /// The host declined to apply an edit.
    EditRejected(String),

    #[error("host request failed: {0}")]
    /// The host connection failed while serving a request.
    Host(String),
}

/// Result alias used across `editor-context`.
pub type Result<T> = std::result::Result<T, EditorError>;
