// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Two ways to run:
//   github-extractor                 -> MCP server on stdin/stdout (what agent
//   github-extractor serve              hosts launch)
//   github-extractor fetch <url>     -> one-off fetch printed to the terminal
//
// The settings in config.rs are flattened in, so they work with either
// subcommand and can also be set through GITHUB_EXTRACTOR_* variables.
// =============================================================================

use crate::config::Config;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "github-extractor",
    version,
    about = "Fetch the text content of GitHub files and repositories",
    long_about = "github-extractor returns the text of a single GitHub file, or of every text file \
                  in a repository joined into one document. It runs as an MCP server exposing the \
                  `github_context` tool, or fetches a URL directly from the command line."
)]
pub struct Cli {
    // No subcommand means `serve`, so hosts can launch the bare binary
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub config: Config,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Run the MCP server on stdin/stdout (the default)
    Serve,

    /// Fetch a GitHub URL once and print the result
    ///
    /// Example: github-extractor fetch https://github.com/rust-lang/log/blob/master/README.md
    Fetch {
        /// GitHub file or repository URL
        url: String,

        /// Print a JSON report instead of the raw text
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    /// The subcommand to run, defaulting to `serve`.
    pub fn command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Serve)
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why is `command` an Option?
//    - MCP hosts usually launch a server binary with no arguments
//    - Making the subcommand optional lets `github-extractor` alone mean `serve`
//
// 2. What does #[command(flatten)] do?
//    - It pulls the fields of another Args struct (Config) into this one
//    - Those flags are declared `global`, so they're accepted after the
//      subcommand too: `github-extractor fetch <url> --concurrency 4`
//
// 3. What does env = "..." on an argument do?
//    - If the flag isn't given, clap reads the environment variable instead
//    - Handy for MCP host configs, which often only let you set env vars
// -----------------------------------------------------------------------------
