// src/github/api.rs
// =============================================================================
// This module talks to the GitHub REST API.
//
// Two endpoints are used:
//   GET /repos/{owner}/{repo}/contents/{path}
//       -> JSON with a base64 "content" field (or, for a directory, an
//          array listing its entries)
//   GET /repos/{owner}/{repo}/git/trees/{branch}?recursive=1
//       -> JSON with a "tree" array of {path, type}
//
// The fetcher only sees the GitHubApi trait, so tests can plug in an
// in-memory fake instead of hitting the network.
//
// No token is sent: requests are subject to GitHub's unauthenticated rate
// limit (60 requests per hour per IP).
//
// Rust concepts:
// - Traits: an interface the fetcher depends on instead of a concrete client
// - async-trait: lets trait methods be async
// - serde: turns JSON responses into typed structs
// =============================================================================

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::debug;
use reqwest::{header, Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use url::Url;

/// Body of a contents API response. We only care about the encoded file body.
///
/// A path naming a directory answers 200 with an array instead of an object,
/// so anything that isn't a file object still parses and simply has no
/// content.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ContentResponse {
    File {
        #[serde(default)]
        content: Option<String>,
    },
    /// A directory listing, or any other body without a string "content"
    Listing(serde_json::Value),
}

impl ContentResponse {
    /// Wraps an encoded file body.
    pub fn file(content: impl Into<String>) -> Self {
        ContentResponse::File {
            content: Some(content.into()),
        }
    }

    /// The base64 file body, if the response carried one.
    pub fn content(&self) -> Option<&str> {
        match self {
            ContentResponse::File { content } => content.as_deref(),
            ContentResponse::Listing(_) => None,
        }
    }
}

/// Body of a git-trees API response.
#[derive(Debug, Clone, Deserialize)]
pub struct TreeResponse {
    #[serde(default)]
    pub tree: Option<Vec<TreeEntry>>,
}

/// One entry in a recursive tree listing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TreeEntry {
    pub path: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
}

/// Git object type of a tree entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// A file
    Blob,
    /// A directory
    Tree,
    /// A submodule
    Commit,
    #[serde(other)]
    Other,
}

impl TreeEntry {
    pub fn is_blob(&self) -> bool {
        self.kind == EntryKind::Blob
    }
}

/// What came back from an API call.
///
/// Anything other than 200 is reported by status code only; the body of an
/// error response is never read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiResponse<T> {
    Ok(T),
    Status(u16),
}

/// The subset of the GitHub API the fetcher needs.
///
/// `Err` is reserved for transport failures and unreadable bodies. A non-200
/// answer is a normal `ApiResponse::Status`.
#[async_trait]
pub trait GitHubApi: Send + Sync {
    async fn get_contents(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
    ) -> Result<ApiResponse<ContentResponse>>;

    async fn get_tree(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
    ) -> Result<ApiResponse<TreeResponse>>;
}

/// Production GitHubApi backed by reqwest.
#[derive(Debug, Clone)]
pub struct HttpGitHubApi {
    client: Client,
    base_url: Url,
}

impl HttpGitHubApi {
    /// Creates a client for the API rooted at `base_url` (normally https://api.github.com).
    ///
    /// `timeout` of None keeps reqwest's default of waiting indefinitely.
    pub fn new(base_url: &str, user_agent: &str, timeout: Option<Duration>) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .with_context(|| format!("Invalid GitHub API URL '{}'", base_url))?;

        if base_url.cannot_be_a_base() {
            anyhow::bail!("GitHub API URL '{}' cannot be used as a base", base_url);
        }

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/vnd.github+json"),
        );

        let mut builder = Client::builder()
            .user_agent(user_agent)
            .default_headers(headers);

        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder.build().context("Failed to create HTTP client")?;

        Ok(Self { client, base_url })
    }

    // {base}/repos/{owner}/{repo}/contents/{path...}
    pub(crate) fn contents_url(&self, owner: &str, repo: &str, path: &str) -> Result<Url> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| anyhow::anyhow!("GitHub API URL cannot be a base"))?;
            segments
                .pop_if_empty()
                .extend(["repos", owner, repo, "contents"])
                .extend(path.split('/'));
        }
        Ok(url)
    }

    // {base}/repos/{owner}/{repo}/git/trees/{branch}?recursive=1
    pub(crate) fn tree_url(&self, owner: &str, repo: &str, branch: &str) -> Result<Url> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| anyhow::anyhow!("GitHub API URL cannot be a base"))?;
            segments
                .pop_if_empty()
                .extend(["repos", owner, repo, "git", "trees", branch]);
        }
        url.query_pairs_mut().append_pair("recursive", "1");
        Ok(url)
    }

    // Sends a GET and decodes a 200 body as T
    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<ApiResponse<T>> {
        debug!("GET {}", url);

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("Request to {} failed", url))?;

        let status = response.status();
        if status != StatusCode::OK {
            debug!("GET {} -> HTTP {}", url, status.as_u16());
            return Ok(ApiResponse::Status(status.as_u16()));
        }

        let body = response
            .json::<T>()
            .await
            .with_context(|| format!("Invalid JSON from {}", url))?;

        Ok(ApiResponse::Ok(body))
    }
}

#[async_trait]
impl GitHubApi for HttpGitHubApi {
    async fn get_contents(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
    ) -> Result<ApiResponse<ContentResponse>> {
        let url = self.contents_url(owner, repo, path)?;
        self.get_json(url).await
    }

    async fn get_tree(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
    ) -> Result<ApiResponse<TreeResponse>> {
        let url = self.tree_url(owner, repo, branch)?;
        self.get_json(url).await
    }
}
