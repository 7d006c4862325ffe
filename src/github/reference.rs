// src/github/reference.rs
// =============================================================================
// This module turns a GitHub URL into the coordinates we need for the API.
//
// Recognised shapes:
//   https://github.com/owner/repo                      -> whole repository
//   https://github.com/owner/repo/tree/main/src        -> whole repository
//   https://github.com/owner/repo/blob/main/src/lib.rs -> single file "src/lib.rs"
//
// The authority must be exactly "github.com" as written: no port, no
// user info, no uppercase letters (the url crate would normalise those away).
//
// This is a heuristic, not the full GitHub URL grammar:
// - Branch names containing '/' are not understood (the first segment after
//   "blob" is always treated as the branch)
// - "tree" URLs pointing at a directory fetch the whole repository
//
// Rust concepts:
// - Option<T>: file_path is only present for file URLs
// - Iterators: splitting and re-joining path segments
// =============================================================================

use url::Url;

/// The host we accept. Anything else (including www.github.com) is rejected.
const GITHUB_HOST: &str = "github.com";

/// Owner/repo coordinates, plus a file path when the URL names one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitHubReference {
    pub owner: String,
    pub repo: String,
    /// Path inside the repository as written in the URL, e.g. "src/main.rs"
    /// or "docs/my%20notes.md". None for repository URLs.
    pub file_path: Option<String>,
}

impl GitHubReference {
    /// Parses a GitHub URL.
    ///
    /// Returns None for anything we can't interpret: unparseable input, a host
    /// other than github.com, or a path without both an owner and a repo.
    pub fn parse(github_url: &str) -> Option<Self> {
        let parsed = Url::parse(github_url).ok()?;

        // Url drops default ports and lowercases the host, so the authority
        // is also compared as written
        let host_matches = parsed.host_str() == Some(GITHUB_HOST);
        if !host_matches || raw_authority(github_url) != Some(GITHUB_HOST) {
            return None;
        }

        // "/owner/repo/blob/main/a%20b.md" -> ["owner", "repo", "blob", "main", "a%20b.md"]
        let segments: Vec<&str> = parsed.path().trim_matches('/').split('/').collect();

        if segments.len() < 2 {
            return None;
        }

        let owner = decode_segment(segments[0]);
        let repo = decode_segment(segments[1]);

        if owner.is_empty() || repo.is_empty() {
            return None;
        }

        // owner / repo / "blob" / branch / path...
        let is_file_url = segments.len() > 4 && segments[2] == "blob";

        let file_path = if is_file_url {
            Some(segments[4..].join("/"))
        } else {
            None
        };

        Some(Self {
            owner,
            repo,
            file_path,
        })
    }

    /// The file path with percent-escapes decoded: the real repository path
    /// the contents API expects.
    pub fn api_file_path(&self) -> Option<String> {
        self.file_path.as_deref().map(|path| {
            path.split('/')
                .map(decode_segment)
                .collect::<Vec<_>>()
                .join("/")
        })
    }
}

// "https://user@github.com:8080/a?b" -> "user@github.com:8080"
fn raw_authority(input: &str) -> Option<&str> {
    let (_, rest) = input.trim().split_once("://")?;
    let end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    Some(&rest[..end])
}

// Percent-decodes one path segment, keeping the raw text if it isn't valid UTF-8
fn decode_segment(segment: &str) -> String {
    urlencoding::decode(segment)
        .map(|decoded| decoded.into_owned())
        .unwrap_or_else(|_| segment.to_string())
}
