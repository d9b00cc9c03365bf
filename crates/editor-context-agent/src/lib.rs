#![warn(missing_docs)]
//! `editor-context-agent` - agent-driven backend for `editor-context`.
//!
//! An external agent (an editor plugin speaking a small JSON protocol) reports which
//! documents are open, what they contain, and where the user's selection is. This crate keeps
//! that state in a [`DocumentTable`] and answers the `editor_context::Editor` capability trait
//! from it. Interactive requests (edits, pickers, prompts, warnings) go back to the host
//! through an [`AgentHost`] when one is attached.
//!
//! ```rust
//! use editor_context::{Editor, EditorConfig};
//! use editor_context_agent::{AgentEditor, AgentNotification};
//!
//! let editor = AgentEditor::new(EditorConfig::default());
//! editor.apply(
//!     AgentNotification::from_json(
//!         r#"{ "method": "textDocument/didOpen",
//!              "params": { "filePath": "/repo/main.rs", "content": "fn main() {}" } }"#,
//!     )
//!     .unwrap(),
//! );
//!
//! let active = editor.get_active_light_text_document().unwrap();
//! assert_eq!(active.uri, "file:///repo/main.rs");
//! assert_eq!(active.language_id, "rust");
//! ```

pub mod backend;
pub mod editor;
pub mod host;
pub mod protocol;
pub mod table;

pub use backend::{BackendConfig, BackendKind, EditorBackend};
pub use editor::AgentEditor;
pub use host::AgentHost;
pub use protocol::{
    AgentNotification, AgentTextDocument, DidChangeSelectionParams, DidOpenParams,
    FilePathParams, WorkspaceRootParams,
};
pub use table::{DocumentTable, OpenDocument, TableState};
