// src/github/fake.rs
// =============================================================================
// In-memory GitHubApi used by the tests.
//
// Responses are registered up front; every call is recorded so tests can
// assert how many requests were made (and in what order).
// =============================================================================

use super::api::{ApiResponse, ContentResponse, EntryKind, GitHubApi, TreeEntry, TreeResponse};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Default)]
pub struct FakeGitHubApi {
    contents: HashMap<String, Result<ApiResponse<ContentResponse>, String>>,
    trees: HashMap<String, ApiResponse<TreeResponse>>,
    calls: Mutex<Vec<String>>,
}

impl FakeGitHubApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serves `text` base64-encoded, wrapped at 60 columns like GitHub does.
    pub fn with_file(self, path: &str, text: &str) -> Self {
        self.with_raw_file(path, text.as_bytes())
    }

    pub fn with_raw_file(mut self, path: &str, bytes: &[u8]) -> Self {
        let encoded = general_purpose::STANDARD.encode(bytes);
        let wrapped = encoded
            .as_bytes()
            .chunks(60)
            .map(|chunk| String::from_utf8_lossy(chunk).into_owned())
            .collect::<Vec<_>>()
            .join("\n");

        self.contents.insert(
            path.to_string(),
            Ok(ApiResponse::Ok(ContentResponse::file(wrapped))),
        );
        self
    }

    pub fn with_file_response(
        mut self,
        path: &str,
        response: ApiResponse<ContentResponse>,
    ) -> Self {
        self.contents.insert(path.to_string(), Ok(response));
        self
    }

    /// Serves a raw JSON body with status 200, e.g. a directory listing.
    pub fn with_file_body(self, path: &str, json: &str) -> Self {
        let body: ContentResponse =
            serde_json::from_str(json).expect("fixture body should be valid JSON");
        self.with_file_response(path, ApiResponse::Ok(body))
    }

    /// Makes the contents call for `path` fail at the transport level.
    pub fn with_file_error(mut self, path: &str, message: &str) -> Self {
        self.contents.insert(path.to_string(), Err(message.to_string()));
        self
    }

    /// Registers a tree for `branch`. Entries ending in '/' are directories.
    pub fn with_tree(mut self, branch: &str, paths: &[&str]) -> Self {
        let tree = paths
            .iter()
            .map(|path| match path.strip_suffix('/') {
                Some(dir) => TreeEntry {
                    path: dir.to_string(),
                    kind: EntryKind::Tree,
                },
                None => TreeEntry {
                    path: path.to_string(),
                    kind: EntryKind::Blob,
                },
            })
            .collect();

        self.trees.insert(
            branch.to_string(),
            ApiResponse::Ok(TreeResponse { tree: Some(tree) }),
        );
        self
    }

    pub fn with_tree_response(mut self, branch: &str, response: ApiResponse<TreeResponse>) -> Self {
        self.trees.insert(branch.to_string(), response);
        self
    }

    /// Every request made so far, as "contents:<path>" or "tree:<branch>".
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl GitHubApi for FakeGitHubApi {
    async fn get_contents(
        &self,
        _owner: &str,
        _repo: &str,
        path: &str,
    ) -> Result<ApiResponse<ContentResponse>> {
        self.record(format!("contents:{}", path));
        match self.contents.get(path) {
            Some(Ok(response)) => Ok(response.clone()),
            Some(Err(message)) => Err(anyhow!(message.clone())),
            None => Ok(ApiResponse::Status(404)),
        }
    }

    async fn get_tree(
        &self,
        _owner: &str,
        _repo: &str,
        branch: &str,
    ) -> Result<ApiResponse<TreeResponse>> {
        self.record(format!("tree:{}", branch));
        Ok(self
            .trees
            .get(branch)
            .cloned()
            .unwrap_or(ApiResponse::Status(404)))
    }
}
