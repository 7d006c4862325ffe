// src/mcp/server.rs
// =============================================================================
// A Model Context Protocol server exposing one tool: `github_context`.
//
// How it works:
// 1. Describe the server (name, version, the one tool and its input schema)
// 2. Register a handler for the tool with mcpr's Server
// 3. Let mcpr run the JSON-RPC conversation over stdin/stdout
//
// mcpr answers initialize, ping and tools/list from the configuration and
// routes tools/call to our handler. A failed fetch like a 404 is still a
// successful call whose text explains what happened. Only a raised error
// (bad arguments, a broken connection) becomes a JSON-RPC error.
// Logging goes to stderr so it can't corrupt the protocol stream.
// =============================================================================

use crate::github::Fetcher;
use log::{error, info};
use mcpr::{
    error::MCPError,
    schema::common::{Tool, ToolInputSchema},
    server::{Server, ServerConfig},
    transport::stdio::StdioTransport,
};
use serde_json::{json, Value};
use std::sync::Arc;

/// Name the server reports to the host.
pub const SERVER_NAME: &str = "Github Extractor";

/// The single tool this server registers.
pub const TOOL_NAME: &str = "github_context";

/// Serves `github_context` over this process's stdin/stdout until the host
/// closes the connection.
pub async fn serve_stdio(fetcher: Fetcher) -> Result<(), MCPError> {
    let fetcher = Arc::new(fetcher);
    let mut server = Server::new(server_config());

    server.register_tool_handler(TOOL_NAME, move |params: Value| {
        let fetcher = Arc::clone(&fetcher);
        async move { github_context(&fetcher, params).await }
    })?;

    info!("{} ready on stdio", SERVER_NAME);
    server.serve(StdioTransport::new()).await
}

/// Server name, version and the tool list reported during the handshake.
pub fn server_config() -> ServerConfig {
    ServerConfig::new()
        .with_name(SERVER_NAME)
        .with_version(env!("CARGO_PKG_VERSION"))
        .with_tool(github_context_tool())
}

fn github_context_tool() -> Tool {
    Tool {
        name: TOOL_NAME.to_string(),
        description: Some(
            "Fetch the text content of a GitHub file URL \
             (https://github.com/owner/repo/blob/branch/path) or of every text \
             file in a repository URL (https://github.com/owner/repo)"
                .to_string(),
        ),
        input_schema: ToolInputSchema {
            r#type: "object".to_string(),
            properties: Some(
                [(
                    "url".to_string(),
                    json!({
                        "type": "string",
                        "description": "GitHub file or repository URL"
                    }),
                )]
                .into_iter()
                .collect(),
            ),
            required: Some(vec!["url".to_string()]),
        },
    }
}

/// The tool itself: fetch the `url` argument and return the text the host
/// will see.
pub async fn github_context(fetcher: &Fetcher, params: Value) -> Result<Value, MCPError> {
    let url = params
        .get("url")
        .and_then(Value::as_str)
        .ok_or_else(|| MCPError::Protocol("missing string argument 'url'".to_string()))?;

    info!("Tool call: {}({})", TOOL_NAME, url);

    match fetcher.fetch_url(url).await {
        Ok(outcome) => Ok(Value::String(outcome.to_string())),
        Err(e) => {
            error!("Fetching {} failed: {:#}", url, e);
            Err(MCPError::Protocol(format!("{:#}", e)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::fake::FakeGitHubApi;
    use crate::github::TextClassifier;

    fn fetcher(api: FakeGitHubApi) -> Fetcher {
        Fetcher::new(Arc::new(api), TextClassifier::default())
    }

    #[test]
    fn test_server_config_registers_one_tool() {
        let config = server_config();

        assert_eq!(config.name, "Github Extractor");
        assert_eq!(config.version, env!("CARGO_PKG_VERSION"));
        assert_eq!(config.tools.len(), 1);

        let tool = &config.tools[0];
        assert_eq!(tool.name, "github_context");
        assert_eq!(tool.input_schema.r#type, "object");
        assert_eq!(tool.input_schema.required, Some(vec!["url".to_string()]));

        let properties = tool.input_schema.properties.as_ref().unwrap();
        assert_eq!(properties["url"]["type"], "string");
    }

    #[test]
    fn test_handler_registers_against_config() {
        let mut server: Server<StdioTransport> = Server::new(server_config());
        let result = server.register_tool_handler(TOOL_NAME, |_params: Value| async move {
            Ok(Value::Null)
        });
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_github_context_returns_file_text() {
        let fetcher = fetcher(FakeGitHubApi::new().with_file("lib.rs", "pub fn hi() {}\n"));
        let result = github_context(
            &fetcher,
            json!({ "url": "https://github.com/u/r/blob/main/lib.rs" }),
        )
        .await
        .unwrap();

        assert_eq!(result, Value::String("pub fn hi() {}\n".to_string()));
    }

    #[tokio::test]
    async fn test_github_context_repository() {
        let api = FakeGitHubApi::new()
            .with_tree("main", &["a.py", "b.png"])
            .with_file("a.py", "print(1)\n");
        let result = github_context(&fetcher(api), json!({ "url": "https://github.com/u/r" }))
            .await
            .unwrap();

        assert_eq!(result, "--- File: a.py ---\nprint(1)\n\n");
    }

    #[tokio::test]
    async fn test_github_context_invalid_url_is_not_an_error() {
        let result = github_context(
            &fetcher(FakeGitHubApi::new()),
            json!({ "url": "https://example.com/u/r" }),
        )
        .await
        .unwrap();

        assert_eq!(result, "Invalid GitHub URL");
    }

    #[tokio::test]
    async fn test_github_context_transport_error() {
        let fetcher = fetcher(FakeGitHubApi::new().with_file_error("a.md", "dns failure"));
        let error = github_context(
            &fetcher,
            json!({ "url": "https://github.com/u/r/blob/main/a.md" }),
        )
        .await
        .unwrap_err();

        assert_eq!(
            error.to_string(),
            "Protocol error: Failed to fetch a.md: dns failure"
        );
    }

    #[tokio::test]
    async fn test_github_context_missing_url() {
        let error = github_context(&fetcher(FakeGitHubApi::new()), json!({}))
            .await
            .unwrap_err();
        assert!(matches!(error, MCPError::Protocol(_)));

        let error = github_context(&fetcher(FakeGitHubApi::new()), json!({ "url": 7 }))
            .await
            .unwrap_err();
        assert!(matches!(error, MCPError::Protocol(_)));
    }
}
