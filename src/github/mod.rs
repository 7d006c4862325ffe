// src/github/mod.rs
// =============================================================================
// This module handles fetching text from GitHub repositories.
//
// Submodules:
// - reference: Parsing GitHub URLs into owner / repo / file path
// - classify: Deciding from the extension whether a file is text
// - api: The GitHub REST API (contents + git trees) behind a trait
// - outcome: The typed result of a fetch and its message rendering
// - fetch: Single-file and whole-repository fetching
//
// No authentication is used, so only public repositories work and the
// unauthenticated rate limit applies.
// =============================================================================

mod api;
mod classify;
mod fetch;
mod outcome;
mod reference;

#[cfg(test)]
pub(crate) mod fake;

pub use api::{GitHubApi, HttpGitHubApi};
pub use classify::TextClassifier;
pub use fetch::Fetcher;
pub use outcome::FetchOutcome;
