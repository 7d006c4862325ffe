// src/config.rs
// =============================================================================
// Runtime settings shared by every subcommand.
//
// Each setting can come from a command-line flag or an environment variable
// (flags win). Nothing is required: with no configuration at all we talk to
// api.github.com, fetch one file at a time, and never time out - the same
// behaviour the tool has always had.
// =============================================================================

use crate::github::{Fetcher, GitHubApi, HttpGitHubApi, TextClassifier};
use anyhow::Result;
use clap::Args;
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// GitHub rejects API requests that don't carry a User-Agent.
pub const USER_AGENT: &str = concat!("github-extractor/", env!("CARGO_PKG_VERSION"));

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the GitHub REST API
    #[arg(long, env = "GITHUB_EXTRACTOR_API_URL", default_value = DEFAULT_API_URL, global = true)]
    pub api_url: String,

    /// Maximum number of files fetched at once from a repository
    ///
    /// 1 (the default) fetches files strictly one after another
    #[arg(long, env = "GITHUB_EXTRACTOR_CONCURRENCY", default_value_t = 1, global = true)]
    pub concurrency: usize,

    /// Per-request timeout in seconds (no timeout when unset)
    #[arg(long, env = "GITHUB_EXTRACTOR_TIMEOUT_SECS", global = true)]
    pub timeout_secs: Option<u64>,

    /// Extra file extensions to treat as text, e.g. --text-extension proto
    ///
    /// Can be repeated, or given as a comma-separated list in the environment
    #[arg(
        long = "text-extension",
        env = "GITHUB_EXTRACTOR_TEXT_EXTENSIONS",
        value_delimiter = ',',
        global = true
    )]
    pub text_extensions: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            concurrency: 1,
            timeout_secs: None,
            text_extensions: Vec::new(),
        }
    }
}

impl Config {
    /// The default allow-list plus any extensions added by the user.
    pub fn classifier(&self) -> TextClassifier {
        let mut classifier = TextClassifier::default();
        classifier.extend(&self.text_extensions);
        classifier
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Builds a fetcher backed by the real GitHub API.
    pub fn build_fetcher(&self) -> Result<Fetcher> {
        let api: Arc<dyn GitHubApi> =
            Arc::new(HttpGitHubApi::new(&self.api_url, USER_AGENT, self.timeout())?);
        Ok(self.fetcher_with(api))
    }

    /// Builds a fetcher on top of any GitHubApi implementation.
    pub fn fetcher_with(&self, api: Arc<dyn GitHubApi>) -> Fetcher {
        Fetcher::new(api, self.classifier()).with_concurrency(self.concurrency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.api_url, "https://api.github.com");
        assert_eq!(config.concurrency, 1);
        assert_eq!(config.timeout(), None);
        assert!(config.build_fetcher().is_ok());
    }

    #[test]
    fn test_extra_extensions_extend_defaults() {
        let config = Config {
            text_extensions: vec!["proto".to_string(), ".Graphql".to_string()],
            ..Config::default()
        };
        let classifier = config.classifier();
        assert!(classifier.is_text("api.proto"));
        assert!(classifier.is_text("schema.graphql"));
        assert!(classifier.is_text("main.rs"));
        assert!(!classifier.is_text("logo.png"));
    }

    #[test]
    fn test_bad_api_url_is_rejected() {
        let config = Config {
            api_url: "::not a url::".to_string(),
            ..Config::default()
        };
        assert!(config.build_fetcher().is_err());
    }

    #[test]
    fn test_timeout() {
        let config = Config {
            timeout_secs: Some(30),
            ..Config::default()
        };
        assert_eq!(config.timeout(), Some(Duration::from_secs(30)));
    }
}
