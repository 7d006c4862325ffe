// src/mcp/mod.rs
// =============================================================================
// This module exposes the fetcher to agent hosts over the Model Context
// Protocol (JSON-RPC 2.0 on stdin/stdout), using the mcpr crate.
//
// Submodules:
// - server: Server configuration and the `github_context` tool handler
// =============================================================================

mod server;

pub use server::serve_stdio;
