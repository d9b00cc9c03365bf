//! Requests the backend sends back to the host.

use async_trait::async_trait;
use editor_context::{Result, TextEdit};

/// The host side of the agent connection.
///
/// Notifications flow into the [`crate::DocumentTable`]; everything that needs the host to
/// act or to ask the user goes through this trait. Transport failures surface as
/// [`editor_context::EditorError::Host`].
#[async_trait]
pub trait AgentHost: Send + Sync {
    /// Ask the host to apply `edits` to the document at `uri`.
    ///
    /// Returns `Ok(false)` if the host declined, for example because the buffer changed.
    async fn apply_edits(&self, uri: &str, edits: &[TextEdit]) -> Result<bool>;

    /// Show a pick list; `None` if the user dismissed it.
    async fn show_quick_pick(&self, labels: &[String]) -> Result<Option<String>>;

    /// Show an input box; `None` if the user dismissed it.
    async fn show_input_box(&self, prompt: Option<&str>) -> Result<Option<String>>;

    /// Show a warning message.
    async fn show_warning(&self, message: &str) -> Result<()>;
}
