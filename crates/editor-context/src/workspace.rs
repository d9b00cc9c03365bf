//! Workspace roots and workspace-relative paths.
//!
//! A [`Workspace`] is a single root URI. Membership of a document is never stored; it is
//! decided on demand from the document URI: same scheme, and a relative path from the root
//! that does not climb out of it.
//!
//! Only one root is modelled. A backend answers [`crate::Editor::get_workspace_of`] with the
//! same root for every document.

use crate::error::{EditorError, Result};
use crate::uri::decoded_path;
use std::fmt;
use std::path::Path;
use url::Url;

/// A workspace rooted at one URI.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Workspace {
    root: Url,
}

impl Workspace {
    /// Create a workspace from a root URI.
    pub fn new(root: &str) -> Result<Self> {
        Url::parse(root)
            .map(|root| Self { root })
            .map_err(|_| EditorError::InvalidUri(root.to_string()))
    }

    /// Create a workspace from an absolute filesystem path.
    pub fn from_path(path: &Path) -> Option<Self> {
        Url::from_file_path(path).ok().map(|root| Self { root })
    }

    /// The root URI.
    pub fn root(&self) -> &str {
        self.root.as_str()
    }

    /// Path of `uri` relative to the workspace root.
    ///
    /// Returns `None` if `uri` does not parse or uses a different scheme than the root, even
    /// when the paths overlap textually. Documents outside the root produce `..` segments;
    /// use [`Workspace::contains`] to tell those apart. The root itself maps to `""`.
    pub fn relative_to(&self, uri: &str) -> Option<String> {
        let document = Url::parse(uri).ok()?;
        if document.scheme() != self.root.scheme() {
            return None;
        }
        Some(relative_path(
            &decoded_path(&self.root),
            &decoded_path(&document),
        ))
    }

    /// Returns `true` if `uri` lies under the workspace root.
    pub fn contains(&self, uri: &str) -> bool {
        self.relative_to(uri)
            .is_some_and(|relative| relative != ".." && !relative.starts_with("../"))
    }
}

impl fmt::Display for Workspace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.root.as_str())
    }
}

/// POSIX relative path from directory `from` to `to`.
///
/// Both inputs are treated as absolute `/`-separated paths; `.` and `..` segments are
/// resolved first and trailing separators are ignored.
pub fn relative_path(from: &str, to: &str) -> String {
    fn segments(path: &str) -> Vec<&str> {
        let mut out = Vec::new();
        for segment in path.split('/') {
            match segment {
                "" | "." => {}
                ".." => {
                    out.pop();
                }
                segment => out.push(segment),
            }
        }
        out
    }

    let from = segments(from);
    let to = segments(to);
    let common = from
        .iter()
        .zip(to.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut parts = vec![".."; from.len() - common];
    parts.extend_from_slice(&to[common..]);
    parts.join("/")
}
