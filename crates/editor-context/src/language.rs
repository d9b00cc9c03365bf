//! Language identifiers for documents the host did not label.

use std::path::Path;

/// Identifier used when nothing better is known.
pub const PLAINTEXT: &str = "plaintext";

const EXTENSIONS: &[(&str, &str)] = &[
    ("c", "c"),
    ("h", "c"),
    ("cc", "cpp"),
    ("cpp", "cpp"),
    ("hpp", "cpp"),
    ("cs", "csharp"),
    ("css", "css"),
    ("go", "go"),
    ("html", "html"),
    ("java", "java"),
    ("js", "javascript"),
    ("mjs", "javascript"),
    ("cjs", "javascript"),
    ("jsx", "javascriptreact"),
    ("json", "json"),
    ("kt", "kotlin"),
    ("md", "markdown"),
    ("php", "php"),
    ("py", "python"),
    ("rb", "ruby"),
    ("rs", "rust"),
    ("scala", "scala"),
    ("sh", "shellscript"),
    ("sql", "sql"),
    ("svelte", "svelte"),
    ("swift", "swift"),
    ("toml", "toml"),
    ("ts", "typescript"),
    ("tsx", "typescriptreact"),
    ("yaml", "yaml"),
    ("yml", "yaml"),
];

/// Guess a language identifier from the file extension of `path`.
pub fn language_id_for_path(path: &Path) -> &'static str {
    let Some(ext) = path.extension().and_then(|ext| ext.to_str()) else {
        return PLAINTEXT;
    };
    EXTENSIONS
        .iter()
        .find(|(candidate, _)| candidate.eq_ignore_ascii_case(ext))
        .map(|(_, id)| *id)
        .unwrap_or(PLAINTEXT)
}
