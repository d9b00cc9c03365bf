//! Path/URI helpers.
//!
//! Agents identify documents by filesystem path while the capability interface speaks URIs.
//! These helpers convert between the two without touching the filesystem.

use percent_encoding::percent_decode_str;
use std::path::{Path, PathBuf};
use url::Url;

/// Convert an absolute filesystem path to a `file://` URI.
///
/// Returns `None` for relative paths, which have no URI form.
pub fn path_to_file_uri(path: &Path) -> Option<String> {
    Url::from_file_path(path).ok().map(String::from)
}

/// Convert a `file://` URI back into a filesystem path.
pub fn file_uri_to_path(uri: &str) -> Option<PathBuf> {
    let url = Url::parse(uri).ok()?;
    if url.scheme() != "file" {
        return None;
    }
    url.to_file_path().ok()
}

/// The decoded path component of a parsed URI.
pub fn decoded_path(url: &Url) -> String {
    percent_decode_path(url.path())
}

/// Percent-decode a URI path component.
///
/// Malformed escapes are kept literally and invalid UTF-8 is replaced.
pub fn percent_decode_path(path: &str) -> String {
    percent_decode_str(path).decode_utf8_lossy().into_owned()
}

/// A human-readable name for a document: its filesystem path for `file:` URIs, the URI
/// itself otherwise.
pub fn display_name_for_uri(uri: &str) -> String {
    match file_uri_to_path(uri) {
        Some(path) => path.to_string_lossy().into_owned(),
        None => uri.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_decode() {
        assert_eq!(percent_decode_path("/tmp/hello%20world.txt"), "/tmp/hello world.txt");
        assert_eq!(percent_decode_path("/a/%E4%BD%A0.rs"), "/a/你.rs");
        assert_eq!(percent_decode_path("/bad%2"), "/bad%2");
        assert_eq!(percent_decode_path("/bad%zz"), "/bad%zz");
        assert_eq!(percent_decode_path("/a/%FF.rs"), "/a/\u{FFFD}.rs");
    }

    #[cfg(unix)]
    #[test]
    fn test_file_uri_roundtrip() {
        let path = Path::new("/tmp/hello world.txt");
        let uri = path_to_file_uri(path).unwrap();
        assert_eq!(uri, "file:///tmp/hello%20world.txt");
        assert_eq!(file_uri_to_path(&uri).unwrap(), path);
    }

    #[test]
    fn test_relative_path_has_no_uri() {
        assert_eq!(path_to_file_uri(Path::new("src/main.rs")), None);
    }

    #[test]
    fn test_non_file_uri_has_no_path() {
        assert_eq!(file_uri_to_path("https://example.com/a.ts"), None);
        assert_eq!(file_uri_to_path("not a uri"), None);
        assert_eq!(
            display_name_for_uri("untitled:Untitled-1"),
            "untitled:Untitled-1"
        );
    }
}
