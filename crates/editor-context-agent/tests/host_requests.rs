#![cfg(unix)]

use async_trait::async_trait;
use editor_context::{Editor, EditorConfig, EditorError, Position, Range, Result, TextEdit};
use editor_context_agent::{AgentEditor, AgentHost, AgentTextDocument};
use pretty_assertions::assert_eq;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

const URI: &str = "file:///repo/a.txt";
const PATH: &str = "/repo/a.txt";

/// Holds every edit request until the test opens the gate.
struct GatedHost {
    accept: bool,
    started: Notify,
    gate: Notify,
    requests: Mutex<Vec<(String, Vec<TextEdit>)>>,
    warnings: Mutex<Vec<String>>,
}

impl GatedHost {
    fn new(accept: bool) -> Arc<Self> {
        Arc::new(Self {
            accept,
            started: Notify::new(),
            gate: Notify::new(),
            requests: Mutex::new(Vec::new()),
            warnings: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl AgentHost for GatedHost {
    async fn apply_edits(&self, uri: &str, edits: &[TextEdit]) -> Result<bool> {
        self.requests
            .lock()
            .unwrap()
            .push((uri.to_string(), edits.to_vec()));
        self.started.notify_one();
        self.gate.notified().await;
        Ok(self.accept)
    }

    async fn show_quick_pick(&self, labels: &[String]) -> Result<Option<String>> {
        Ok(labels.first().cloned())
    }

    async fn show_input_box(&self, prompt: Option<&str>) -> Result<Option<String>> {
        Ok(prompt.map(|prompt| format!("answer to {prompt}")))
    }

    async fn show_warning(&self, message: &str) -> Result<()> {
        self.warnings.lock().unwrap().push(message.to_string());
        Ok(())
    }
}

fn editor_with(host: &Arc<GatedHost>, content: &str) -> AgentEditor {
    let editor = AgentEditor::new(EditorConfig::default()).with_host(host.clone());
    editor
        .table()
        .document_opened(AgentTextDocument::new(PATH).with_content(content), true);
    editor
}

fn insert_at_start(text: &str) -> Vec<TextEdit> {
    vec![TextEdit::new(
        Range::empty(Position::new(0, 0)),
        text.to_string(),
    )]
}

async fn content(editor: &AgentEditor) -> Option<String> {
    editor
        .get_text_document(URI)
        .await
        .map(|document| document.content().to_string())
}

#[tokio::test]
async fn test_accepted_edit_updates_snapshot() {
    let host = GatedHost::new(true);
    let editor = editor_with(&host, "world");

    let (result, ()) = tokio::join!(editor.edit(URI, insert_at_start("hello ")), async {
        host.started.notified().await;
        host.gate.notify_one();
    });

    assert_eq!(result, Ok(()));
    assert_eq!(content(&editor).await.as_deref(), Some("hello world"));
    assert_eq!(
        host.requests.lock().unwrap().clone(),
        vec![(URI.to_string(), insert_at_start("hello "))]
    );
}

#[tokio::test]
async fn test_edit_through_equivalent_uri_uses_stored_uri() {
    let host = GatedHost::new(true);
    let editor = editor_with(&host, "world");

    let (result, ()) = tokio::join!(
        editor.edit("file://localhost/repo/%61.txt", insert_at_start("hello ")),
        async {
            host.started.notified().await;
            host.gate.notify_one();
        }
    );

    assert_eq!(result, Ok(()));
    assert_eq!(content(&editor).await.as_deref(), Some("hello world"));
    assert_eq!(host.requests.lock().unwrap()[0].0, URI);
}

#[tokio::test]
async fn test_stale_resolution_is_discarded() {
    let host = GatedHost::new(true);
    let editor = editor_with(&host, "world");

    let (result, ()) = tokio::join!(editor.edit(URI, insert_at_start("hello ")), async {
        host.started.notified().await;
        editor
            .table()
            .document_changed(AgentTextDocument::new(PATH).with_content("newer"));
        host.gate.notify_one();
    });

    // The request itself resolved once; its local result lost to the newer content.
    assert_eq!(result, Ok(()));
    assert_eq!(content(&editor).await.as_deref(), Some("newer"));
}

#[tokio::test]
async fn test_close_during_edit_is_not_resurrected() {
    let host = GatedHost::new(true);
    let editor = editor_with(&host, "world");

    let (result, ()) = tokio::join!(editor.edit(URI, insert_at_start("hello ")), async {
        host.started.notified().await;
        editor.table().document_closed(Path::new(PATH));
        host.gate.notify_one();
    });

    assert_eq!(result, Ok(()));
    assert_eq!(content(&editor).await, None);
    assert!(editor.get_open_light_text_documents().is_empty());
}

#[tokio::test]
async fn test_rejected_edit_leaves_snapshot() {
    let host = GatedHost::new(false);
    let editor = editor_with(&host, "world");

    let (result, ()) = tokio::join!(editor.edit(URI, insert_at_start("hello ")), async {
        host.started.notified().await;
        host.gate.notify_one();
    });

    assert_eq!(result, Err(EditorError::EditRejected(URI.to_string())));
    assert_eq!(content(&editor).await.as_deref(), Some("world"));
}

#[tokio::test]
async fn test_invalid_edits_never_reach_host() {
    let host = GatedHost::new(true);
    let editor = editor_with(&host, "abc");

    let overlapping = vec![
        TextEdit::new(
            Range::new(Position::new(0, 0), Position::new(0, 2)),
            "x".to_string(),
        ),
        TextEdit::new(
            Range::new(Position::new(0, 1), Position::new(0, 3)),
            "y".to_string(),
        ),
    ];
    assert_eq!(
        editor.edit(URI, overlapping).await,
        Err(EditorError::OverlappingEdits)
    );
    assert_eq!(
        editor
            .edit("file:///repo/missing.txt", insert_at_start("x"))
            .await,
        Err(EditorError::DocumentNotFound(
            "file:///repo/missing.txt".to_string()
        ))
    );
    assert!(host.requests.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_dialogs_are_forwarded() {
    let host = GatedHost::new(true);
    let editor = editor_with(&host, "");

    assert_eq!(
        editor
            .quick_pick(vec!["first".to_string(), "second".to_string()])
            .await,
        Ok(Some("first".to_string()))
    );
    assert_eq!(
        editor.prompt(Some("name?")).await,
        Ok(Some("answer to name?".to_string()))
    );
    assert_eq!(editor.prompt(None).await, Ok(None));
    assert_eq!(editor.warn("careful").await, Ok(()));
    assert_eq!(
        host.warnings.lock().unwrap().clone(),
        vec!["careful".to_string()]
    );
}
