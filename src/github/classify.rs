// src/github/classify.rs
// =============================================================================
// Decides whether a repository path is worth fetching as text.
//
// The decision is made from the file extension alone - we never look at the
// bytes. Files without an extension (Makefile, LICENSE, .gitignore) count as
// text. Anything whose extension is not on the allow-list is treated as binary
// and skipped, which means uncommon text formats can be missed unless they're
// added with `extend`.
// =============================================================================

use std::collections::HashSet;

/// Extensions treated as text when no custom list is configured.
pub const DEFAULT_TEXT_EXTENSIONS: &[&str] = &[
    ".txt",
    ".md",
    ".py",
    ".js",
    ".html",
    ".css",
    ".json",
    ".xml",
    ".csv",
    ".yml",
    ".yaml",
    ".toml",
    ".ini",
    ".cfg",
    ".conf",
    ".sh",
    ".bat",
    ".sql",
    ".c",
    ".cpp",
    ".h",
    ".hpp",
    ".java",
    ".go",
    ".rs",
    ".ts",
    ".jsx",
    ".tsx",
    ".vue",
    ".rb",
    ".php",
    ".pl",
    ".kt",
    ".swift",
    ".gitignore",
    ".env",
    ".lock",
    ".config",
    ".r",
    ".scala",
];

/// Extension allow-list. Cheap to clone and safe to share between tasks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextClassifier {
    extensions: HashSet<String>,
}

impl Default for TextClassifier {
    fn default() -> Self {
        Self::with_extensions(DEFAULT_TEXT_EXTENSIONS.iter().copied())
    }
}

impl TextClassifier {
    /// Builds a classifier that accepts exactly the given extensions.
    ///
    /// Entries are normalised, so "RS", "rs" and ".rs" all mean the same thing.
    pub fn with_extensions<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut classifier = Self {
            extensions: HashSet::new(),
        };
        classifier.extend(extensions);
        classifier
    }

    /// Adds more extensions to the allow-list.
    pub fn extend<I, S>(&mut self, extensions: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for extension in extensions {
            if let Some(normalized) = normalize_extension(extension.as_ref()) {
                self.extensions.insert(normalized);
            }
        }
    }

    /// Returns true if `path` should be fetched as text.
    pub fn is_text(&self, path: &str) -> bool {
        let lower = path.to_lowercase();
        let extension = extension_of(&lower);
        extension.is_empty() || self.extensions.contains(extension)
    }
}

// "RS" -> ".rs", ".Md" -> ".md", "" -> None
fn normalize_extension(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let lower = trimmed.to_lowercase();
    if lower.starts_with('.') {
        Some(lower)
    } else {
        Some(format!(".{}", lower))
    }
}

// Extension of the last path component, including the dot.
//
// Leading dots belong to the name, so ".gitignore" and ".env" have no
// extension, while "notes." has the extension ".".
fn extension_of(path: &str) -> &str {
    let file_name = path.rsplit('/').next().unwrap_or(path);
    let stem_start = file_name.len() - file_name.trim_start_matches('.').len();

    match file_name[stem_start..].rfind('.') {
        Some(dot) => &file_name[stem_start + dot..],
        None => "",
    }
}
