// src/github/fetch.rs
// =============================================================================
// This module fetches text content from GitHub.
//
// Strategy:
// - Parse the URL into owner / repo / optional file path
// - Single file: one call to the contents API, then base64 + UTF-8 decode
// - Whole repository: list every file with the recursive git-trees API
//   (trying the "main" branch, then "master"), then fetch each text file
//   and join them into one document with a header per file
//
// Files whose extension isn't on the text allow-list are never requested.
//
// Rust concepts:
// - async functions: for network I/O
// - Streams: `buffered(n)` runs up to n fetches at once but yields results in
//   input order, so the output doesn't depend on network timing
// - Arc<dyn Trait>: shared ownership of the API client
// =============================================================================

use super::api::{ApiResponse, GitHubApi, TreeEntry, TreeResponse};
use super::classify::TextClassifier;
use super::outcome::{FetchOutcome, Failure, SkipReason};
use super::reference::GitHubReference;
use anyhow::{Context, Result};
use base64::{engine::general_purpose, Engine as _};
use futures::stream::{self, StreamExt};
use log::{debug, info, warn};
use std::fmt;
use std::sync::Arc;

/// Branches tried, in order, when listing a repository.
///
/// The repository's real default branch is not looked up, so repositories
/// using any other name fail with the status of the last attempt.
pub const TREE_BRANCHES: [&str; 2] = ["main", "master"];

/// Fetches files and repositories through a GitHubApi.
pub struct Fetcher {
    api: Arc<dyn GitHubApi>,
    classifier: TextClassifier,
    concurrency: usize,
}

impl Fetcher {
    /// Creates a fetcher that downloads repository files one at a time.
    pub fn new(api: Arc<dyn GitHubApi>, classifier: TextClassifier) -> Self {
        Self {
            api,
            classifier,
            concurrency: 1,
        }
    }

    /// Allows up to `concurrency` file requests in flight during a repository
    /// fetch. Zero is treated as one.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Fetches whatever `github_url` points at.
    ///
    /// Returns Ok for every answer GitHub gives (including 404s, which become
    /// `FetchOutcome::Failed`). Err means the request itself broke.
    pub async fn fetch_url(&self, github_url: &str) -> Result<FetchOutcome> {
        let reference = match GitHubReference::parse(github_url) {
            Some(reference) => reference,
            None => {
                debug!("Rejected URL: {}", github_url);
                return Ok(FetchOutcome::Failed(Failure::InvalidUrl));
            }
        };

        match (&reference.file_path, reference.api_file_path()) {
            (Some(shown), Some(path)) => {
                info!("Fetching file {}/{}: {}", reference.owner, reference.repo, path);
                self.fetch_named_file(&reference.owner, &reference.repo, &path, shown).await
            }
            _ => {
                info!("Fetching repository {}/{}", reference.owner, reference.repo);
                self.fetch_repository(&reference.owner, &reference.repo).await
            }
        }
    }

    /// Fetches and decodes a single file.
    pub async fn fetch_file(&self, owner: &str, repo: &str, path: &str) -> Result<FetchOutcome> {
        self.fetch_named_file(owner, repo, path, path).await
    }

    // `path` is the real repository path sent to the API; `shown` is the path as
    // the caller wrote it (still percent-encoded for URLs) and is what gets
    // classified and reported.
    async fn fetch_named_file(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        shown: &str,
    ) -> Result<FetchOutcome> {
        if !self.classifier.is_text(shown) {
            debug!("Skipping binary file {}", shown);
            return Ok(FetchOutcome::Skipped(SkipReason::Binary {
                path: shown.to_string(),
            }));
        }

        let response = self
            .api
            .get_contents(owner, repo, path)
            .await
            .with_context(|| format!("Failed to fetch {}", shown))?;

        let body = match response {
            ApiResponse::Ok(body) => body,
            ApiResponse::Status(status) => {
                warn!("Contents API returned HTTP {} for {}", status, shown);
                return Ok(FetchOutcome::Failed(Failure::FileStatus { status }));
            }
        };

        // A directory answers with a listing, which has no content either
        let encoded = match body.content() {
            Some(encoded) => encoded,
            None => return Ok(FetchOutcome::Failed(Failure::NoContent)),
        };

        let bytes = decode_base64(encoded)
            .with_context(|| format!("Invalid base64 content for {}", shown))?;

        match String::from_utf8(bytes) {
            Ok(text) => Ok(FetchOutcome::Text(text)),
            Err(_) => {
                debug!("Skipping non-UTF-8 file {}", shown);
                Ok(FetchOutcome::Skipped(SkipReason::NotUtf8 {
                    path: shown.to_string(),
                }))
            }
        }
    }

    /// Fetches every text file in the repository and joins them together.
    ///
    /// Each file becomes a section:
    ///
    /// ```text
    /// --- File: src/lib.rs ---
    /// <content>
    /// ```
    ///
    /// Sections appear in the order the tree API lists them.
    pub async fn fetch_repository(&self, owner: &str, repo: &str) -> Result<FetchOutcome> {
        let tree = match self.fetch_tree(owner, repo).await? {
            ApiResponse::Ok(tree) => tree,
            ApiResponse::Status(status) => {
                return Ok(FetchOutcome::Failed(Failure::TreeStatus { status }));
            }
        };

        let entries = match tree.tree {
            Some(entries) => entries,
            None => return Ok(FetchOutcome::Failed(Failure::NoTree)),
        };

        let text_paths = self.text_paths(entries);
        info!(
            "Fetching {} text file(s) from {}/{} (concurrency {})",
            text_paths.len(),
            owner,
            repo,
            self.concurrency
        );

        let sections: Vec<FileSection> = stream::iter(text_paths)
            .map(move |path| async move {
                let body = match self.fetch_file(owner, repo, &path).await {
                    Ok(outcome) => SectionBody::Fetched(outcome),
                    Err(e) => {
                        warn!("Error fetching {}: {:#}", path, e);
                        SectionBody::Error(format!("{:#}", e))
                    }
                };
                FileSection { path, body }
            })
            .buffered(self.concurrency)
            .collect()
            .await;

        let combined = sections
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n");

        Ok(FetchOutcome::Text(combined))
    }

    // Looks up the recursive tree on each candidate branch until one answers 200
    async fn fetch_tree(&self, owner: &str, repo: &str) -> Result<ApiResponse<TreeResponse>> {
        let mut last = ApiResponse::Status(0);

        for branch in TREE_BRANCHES {
            let response = self
                .api
                .get_tree(owner, repo, branch)
                .await
                .with_context(|| format!("Failed to list {}/{} on {}", owner, repo, branch))?;

            match response {
                ApiResponse::Ok(tree) => return Ok(ApiResponse::Ok(tree)),
                ApiResponse::Status(status) => {
                    warn!(
                        "Tree lookup for {}/{} on '{}' returned HTTP {}",
                        owner, repo, branch, status
                    );
                    last = ApiResponse::Status(status);
                }
            }
        }

        Ok(last)
    }

    // Blob entries that pass the text filter, in tree order
    fn text_paths(&self, entries: Vec<TreeEntry>) -> Vec<String> {
        entries
            .into_iter()
            .filter(|entry| entry.is_blob() && self.classifier.is_text(&entry.path))
            .map(|entry| entry.path)
            .collect()
    }
}

// GitHub wraps base64 bodies at 60 columns; whitespace is not part of the data
fn decode_base64(encoded: &str) -> Result<Vec<u8>, base64::DecodeError> {
    let compact: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();
    general_purpose::STANDARD.decode(compact)
}

// One file's part of a repository document
struct FileSection {
    path: String,
    body: SectionBody,
}

enum SectionBody {
    Fetched(FetchOutcome),
    // The request for this file broke; the rest of the repository still goes out
    Error(String),
}

impl fmt::Display for FileSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.body {
            SectionBody::Fetched(outcome) => {
                write!(f, "--- File: {} ---\n{}\n", self.path, outcome)
            }
            SectionBody::Error(message) => {
                write!(f, "--- File: {} ---\nError: {}\n", self.path, message)
            }
        }
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. buffered vs buffer_unordered
//    - Both run up to N futures at once
//    - buffer_unordered yields whichever finishes first
//    - buffered yields in input order, which we need so the combined document
//      always lists files in tree order
//
// 2. Why does fetch_file return Result<FetchOutcome>?
//    - A 404 is an answer from GitHub, so it's an Ok(FetchOutcome::Failed)
//    - A dropped connection means we got no answer at all, so it's an Err
//    - The repository loop turns those Errs into "Error: ..." sections and
//      carries on with the next file
//
// 3. What is `move |path| async move { ... }`?
//    - A closure that builds one future per path
//    - `self`, `owner` and `repo` are references, so copying them into every
//      future is free
// -----------------------------------------------------------------------------
