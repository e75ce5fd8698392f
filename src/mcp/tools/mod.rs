//! MCP tool implementations.

pub mod research;
