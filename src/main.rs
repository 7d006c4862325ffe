// src/main.rs
// =============================================================================
// This is the entry point of github-extractor.
//
// What happens here:
// 1. Set up logging (to stderr - stdout belongs to the MCP protocol)
// 2. Parse command-line arguments using clap
// 3. Build the fetcher from the configuration
// 4. Either serve MCP on stdin/stdout, or fetch one URL and print it
// 5. Exit with a proper code (0 = text returned, 1 = skipped/failed, 2 = error)
// =============================================================================

mod cli;
mod config;
mod github;
mod mcp;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use github::{FetchOutcome, Fetcher};
use log::error;
use serde::Serialize;

#[tokio::main]
async fn main() {
    env_logger::init_from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, "info"),
    );

    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            error!("{:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Returns:
//   Ok(0) = text returned (or the server shut down cleanly)
//   Ok(1) = the URL was skipped or the upstream refused it
//   Err   = unexpected error (exit code 2)
async fn run() -> Result<i32> {
    let cli = Cli::parse();
    let fetcher = cli.config.build_fetcher()?;

    match cli.command() {
        Commands::Serve => {
            mcp::serve_stdio(fetcher).await?;
            Ok(0)
        }
        Commands::Fetch { url, json } => handle_fetch(&fetcher, &url, json).await,
    }
}

// Handles the 'fetch' subcommand
async fn handle_fetch(fetcher: &Fetcher, url: &str, json: bool) -> Result<i32> {
    let outcome = fetcher.fetch_url(url).await?;

    print_outcome(url, &outcome, json)?;

    if outcome.is_text() {
        Ok(0)
    } else {
        Ok(1)
    }
}

#[derive(Serialize)]
struct FetchReport<'a> {
    url: &'a str,
    result: &'a FetchOutcome,
    message: String,
}

// Prints the outcome either as raw text or as a JSON report
fn print_outcome(url: &str, outcome: &FetchOutcome, json: bool) -> Result<()> {
    if json {
        let report = FetchReport {
            url,
            result: outcome,
            message: outcome.to_string(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", outcome);
    }
    Ok(())
}
