//! Model Context Protocol (MCP) server implementation for ResearchBook.
//!
//! This module exposes the research actions (person lookup, expert finder,
//! field brief, researcher matching, database overview) as MCP tools so AI
//! assistants can query both research graphs.
//!
//! ## Architecture
//!
//! The server uses compile-time dependency injection via the `Context` struct.
//! Services are resolved at tool execution time using `FromRef`.
//!
//! ## Modules
//!
//! - `server`: MCP server implementation with tool router
//! - `protocol`: JSON/TOON response helpers
//! - `tools`: Tool implementations

pub mod protocol;
pub(crate) mod server;
mod tools;

pub use server::McpServer;
