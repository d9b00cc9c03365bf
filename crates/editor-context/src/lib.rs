#![warn(missing_docs)]
//! Editor Context - headless editor abstraction for assistant integrations
//!
//! # Overview
//!
//! `editor-context` describes "an editor" to assistant features: which workspace is open,
//! which documents are open, and what text surrounds the user's selection. It does not render
//! anything and does not talk to a host by itself; concrete backends (a no-op backend here,
//! an agent-driven one in `editor-context-agent`) implement the [`Editor`] capability trait.
//!
//! # Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  Editor capability trait + backends         │  ← Public API
//! ├─────────────────────────────────────────────┤
//! │  Workspace resolver (URI → relative path)   │  ← File identity
//! ├─────────────────────────────────────────────┤
//! │  Documents + selection context              │  ← Snapshots
//! ├─────────────────────────────────────────────┤
//! │  Position/offset index (UTF-16)             │  ← Coordinates
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use editor_context::{DocumentOffsets, JointRange, Position, Range, selection_context};
//!
//! let offsets = DocumentOffsets::new("fn main() {\n    run();\n}");
//! let selection = JointRange::resolved(
//!     Range::new(Position::new(1, 4), Position::new(1, 7)),
//!     &offsets,
//! );
//!
//! let ctx = selection_context("main.rs", Some(&offsets), Some(&selection)).unwrap();
//! assert_eq!(ctx.selected_text, "run");
//! assert_eq!(offsets.position(16), Position::new(1, 4));
//! ```
//!
//! # Module Description
//!
//! - [`offsets`] - line-start index, position ↔ offset conversion
//! - [`position`] - positions, ranges, offset ranges, joint ranges
//! - [`document`] - immutable document snapshots
//! - [`edit`] - applying text edits to a snapshot
//! - [`selection`] - preceding/selected/following text
//! - [`workspace`] - workspace roots and relative paths
//! - [`uri`] - path/URI conversion
//! - [`history`] - bounded recency window
//! - [`editor`] - the capability trait
//! - [`noop`] - the no-op backend
//! - [`config`] - backend settings
//!
//! # Unicode Support
//!
//! - Text is stored as UTF-8
//! - `character` and offsets count UTF-16 code units, as editor hosts do
//! - Line terminators are `\n` and `\r\n`

pub mod config;
pub mod document;
pub mod edit;
pub mod editor;
pub mod error;
pub mod history;
pub mod language;
pub mod noop;
pub mod offsets;
pub mod position;
pub mod selection;
pub mod uri;
pub mod workspace;

pub use config::{ConfigError, EditorConfig};
pub use document::{LightTextDocument, TextDocument};
pub use edit::{TextEdit, apply_text_edits};
pub use editor::{Editor, FixupState, Indentation, IndentationKind, MAX_DOCUMENT_TEXT_CHARS};
pub use error::{EditorError, Result};
pub use history::{DEFAULT_HISTORY_CAPACITY, History, RecentDocuments};
pub use language::language_id_for_path;
pub use noop::NoopEditor;
pub use offsets::{DocumentOffsets, truncate_utf16, utf16_len};
pub use position::{JointRange, OffsetRange, Position, Range};
pub use selection::{
    SelectionContext, VisibleContent, selection_context, selection_or_entire_file,
    visible_content,
};
pub use uri::{display_name_for_uri, file_uri_to_path, path_to_file_uri};
pub use workspace::Workspace;
