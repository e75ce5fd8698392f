//! MCP server implementation for ResearchBook.

use std::sync::Arc;

use rmcp::{
    handler::server::{router::tool::ToolRouter, ServerHandler},
    model::{Implementation, ProtocolVersion, ServerCapabilities, ServerInfo},
    tool_handler,
};

use crate::context::Context;
use crate::di::FromRef;

/// ResearchBook MCP server for academic intelligence.
///
/// This server provides AI assistants with tools to:
/// - Look up people across the research and thesis databases
/// - Find experts on a topic and rank them
/// - Brief on a research field and its recent activity
/// - Match researchers by shared thesis keywords
#[derive(Clone)]
pub struct McpServer {
    pub(crate) ctx: Arc<Context>,
    tool_router: ToolRouter<McpServer>,
}

impl McpServer {
    /// Create a new ResearchBook MCP server with the given context.
    pub fn new(ctx: Context) -> Self {
        tracing::info!("Initializing ResearchBook MCP server");

        Self {
            ctx: Arc::new(ctx),
            tool_router: Self::tool_router(),
        }
    }

    fn tool_router() -> ToolRouter<Self> {
        Self::research_tools()
    }

    /// Resolve a dependency from the context.
    pub fn resolve<T: FromRef<Context>>(&self) -> T {
        T::from_ref(&self.ctx)
    }
}

// ============================================================================
// Server Handler
// ============================================================================

#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(
                r#"ResearchBook - Academic Intelligence MCP Server

Answers questions about researchers using two graph databases.

## Databases

- **research database (db1)**: people, publications, organizations, ORCID data
- **thesis database (db2)**: theses, keywords, supervisor/examiner roles

## Tools

- **lookup_person** - Find a person by name in both databases, with an analysis
- **find_experts** - Experts on a topic from both databases, ranked (limit 1-20)
- **field_brief** - Most active researchers in a field and yearly thesis activity
- **match_researchers** - Researchers sharing thesis keywords with a person
- **database_overview** - Node, label and relationship counts of both databases

## Reading results

- `found_in_db1` / `found_in_db2` false means the person is not in that database.
- `sources.*.status = unavailable` means the database could not be queried;
  its part of the result is empty, not absent.
- Narrative fields have `status`: `generated`, `unavailable` (model call
  failed) or `skipped` (nothing to summarize).

All tools accept `format: "toon"` for compact output.
"#
                .to_string(),
            ),
        }
    }
}
