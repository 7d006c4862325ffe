// src/github/outcome.rs
// =============================================================================
// The result of fetching a GitHub URL.
//
// Every fetch ends in one of three ways: we got text, we deliberately skipped
// something, or the upstream said no. Callers in Rust can match on the enum;
// the MCP tool renders it with Display, which produces the exact messages the
// tool has always returned ("Invalid GitHub URL", "Skipped binary file: ...").
//
// Transport failures (DNS, TLS, bad JSON) are NOT outcomes - those travel as
// anyhow errors so the caller decides how to report them.
// =============================================================================

use serde::Serialize;
use std::fmt;

/// What a fetch produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "detail", rename_all = "snake_case")]
pub enum FetchOutcome {
    /// Decoded file text, or the combined sections of a repository
    Text(String),
    /// Nothing was returned on purpose
    Skipped(SkipReason),
    /// The URL or the upstream response was unusable
    Failed(Failure),
}

/// Why a file was skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum SkipReason {
    /// The extension is not on the text allow-list (no request was made)
    Binary { path: String },
    /// The body was fetched but isn't valid UTF-8
    NotUtf8 { path: String },
}

/// Why a fetch failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Failure {
    /// Not a github.com URL with at least owner/repo
    InvalidUrl,
    /// Contents API answered with something other than 200
    FileStatus { status: u16 },
    /// Both the main and master tree lookups failed; holds the last status
    TreeStatus { status: u16 },
    /// Contents API response had no "content" field
    NoContent,
    /// Tree API response had no "tree" field
    NoTree,
}

impl FetchOutcome {
    /// True only for `Text`.
    pub fn is_text(&self) -> bool {
        matches!(self, FetchOutcome::Text(_))
    }
}

impl fmt::Display for FetchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchOutcome::Text(text) => f.write_str(text),
            FetchOutcome::Skipped(reason) => fmt::Display::fmt(reason, f),
            FetchOutcome::Failed(failure) => fmt::Display::fmt(failure, f),
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Binary { path } => write!(f, "Skipped binary file: {}", path),
            SkipReason::NotUtf8 { path } => {
                write!(f, "Skipped binary or non-UTF-8 file: {}", path)
            }
        }
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Failure::InvalidUrl => f.write_str("Invalid GitHub URL"),
            Failure::FileStatus { status } => write!(f, "Error fetching file: {}", status),
            Failure::TreeStatus { status } => {
                write!(f, "Error fetching repository structure: {}", status)
            }
            Failure::NoContent => f.write_str("No content found in file"),
            Failure::NoTree => f.write_str("No files found in repository"),
        }
    }
}
