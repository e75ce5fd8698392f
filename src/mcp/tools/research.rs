//! Research tools - lookup, experts, field briefs, matching, overview.

use rmcp::{
    handler::server::wrapper::Parameters,
    model::CallToolResult,
    schemars::{self, JsonSchema},
    tool, tool_router, ErrorData as McpError,
};
use serde::Deserialize;

use crate::mcp::protocol::{OutputFormat, Response};
use crate::mcp::server::McpServer;
use crate::services::ResearchService;

// ============================================================================
// Parameter Types
// ============================================================================

/// Parameters for lookup_person and match_researchers.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct PersonParams {
    /// Full or partial name, matched case-insensitively.
    pub name: String,
    /// Output format (json or toon).
    #[serde(default)]
    pub format: Option<OutputFormat>,
}

/// Parameters for find_experts.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct FindExpertsParams {
    /// Topic to search publications, roles and theses for.
    pub topic: String,
    /// Maximum number of experts (default 10, at most 20).
    #[serde(default)]
    pub limit: Option<usize>,
    /// Output format (json or toon).
    #[serde(default)]
    pub format: Option<OutputFormat>,
}

/// Parameters for field_brief.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct FieldBriefParams {
    /// Research field, e.g. "sustainability".
    pub field: String,
    /// Output format (json or toon).
    #[serde(default)]
    pub format: Option<OutputFormat>,
}

/// Parameters for database_overview.
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct OverviewParams {
    /// Output format (json or toon).
    #[serde(default)]
    pub format: Option<OutputFormat>,
}

// ============================================================================
// Tool Router
// ============================================================================

#[tool_router(router = research_tools, vis = "pub(crate)")]
impl McpServer {
    #[tool(
        description = "Look up a person by name in the research and thesis databases. Returns profiles, thesis roles and a short analysis."
    )]
    pub async fn lookup_person(
        &self,
        Parameters(params): Parameters<PersonParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!(name = %params.name, "Running lookup_person tool");

        let lookup = self
            .resolve::<ResearchService>()
            .lookup_person(&params.name)
            .await?;

        tracing::info!(
            db1 = lookup.found_in_db1,
            db2 = lookup.found_in_db2,
            "Person lookup complete"
        );

        Response(lookup, params.format).into()
    }

    /// Experts from both databases, merged and ranked by the model.
    #[tool(
        description = "Find experts on a topic across both databases. Returns at most `limit` experts (default 10, max 20) with a ranking."
    )]
    pub async fn find_experts(
        &self,
        Parameters(params): Parameters<FindExpertsParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!(topic = %params.topic, limit = ?params.limit, "Running find_experts tool");

        let search = self
            .resolve::<ResearchService>()
            .find_expert(&params.topic, params.limit)
            .await?;

        tracing::info!(experts = search.experts_found, "Expert search complete");

        Response(search, params.format).into()
    }

    #[tool(
        description = "Intelligence brief for a research field: most active thesis researchers, yearly activity since 2020 and a written brief."
    )]
    pub async fn field_brief(
        &self,
        Parameters(params): Parameters<FieldBriefParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!(field = %params.field, "Running field_brief tool");

        let brief = self
            .resolve::<ResearchService>()
            .generate_field_brief(&params.field)
            .await?;

        tracing::info!(
            researchers = brief.researchers_found,
            total_recent = brief.trends.total_recent,
            "Field brief complete"
        );

        Response(brief, params.format).into()
    }

    /// Collaboration candidates by shared thesis keywords.
    ///
    /// Fails with `NO_THESIS_DATA` when the person has no keyword-bearing theses.
    #[tool(
        description = "Find researchers who share thesis keywords with a person, as collaboration candidates."
    )]
    pub async fn match_researchers(
        &self,
        Parameters(params): Parameters<PersonParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!(name = %params.name, "Running match_researchers tool");

        let matches = self
            .resolve::<ResearchService>()
            .match_researchers(&params.name)
            .await?;

        tracing::info!(matches = matches.matches_found, "Researcher matching complete");

        Response(matches, params.format).into()
    }

    #[tool(
        description = "Overview of both databases: node and relationship totals, top labels and relationship types, ORCID coverage."
    )]
    pub async fn database_overview(
        &self,
        Parameters(params): Parameters<OverviewParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!("Running database_overview tool");

        let overview = self.resolve::<ResearchService>().database_overview().await;

        Response(overview, params.format).into()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rmcp::model::ErrorCode;
    use serde_json::json;

    use super::*;
    use crate::config::Config;
    use crate::context::Context;
    use crate::graph::testing::ScriptedExecutor;
    use crate::llm::testing::StubLlm;

    fn server(thesis: ScriptedExecutor) -> McpServer {
        McpServer::new(Context::new(
            Arc::new(ScriptedExecutor::new()),
            Arc::new(thesis),
            Arc::new(StubLlm::replying("Analysis.")),
            Config::for_tests(),
        ))
    }

    #[tokio::test]
    async fn test_lookup_person_tool_returns_report() {
        let result = server(ScriptedExecutor::new())
            .lookup_person(Parameters(PersonParams {
                name: "Nobody".to_string(),
                format: None,
            }))
            .await
            .unwrap();

        assert_eq!(result.is_error, Some(false));
    }

    #[tokio::test]
    async fn test_match_researchers_tool_maps_no_thesis_data() {
        let thesis = ScriptedExecutor::new().with_rows(
            crate::repositories::TARGET_KEYWORDS_QUERY,
            vec![json!({"keywords": []})],
        );

        let err = server(thesis)
            .match_researchers(Parameters(PersonParams {
                name: "Anders".to_string(),
                format: Some(OutputFormat::Toon),
            }))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::RESOURCE_NOT_FOUND);
        assert!(err.message.contains("NO_THESIS_DATA"));
    }

    #[tokio::test]
    async fn test_blank_topic_is_invalid_params() {
        let err = server(ScriptedExecutor::new())
            .find_experts(Parameters(FindExpertsParams {
                topic: " ".to_string(),
                limit: None,
                format: None,
            }))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
    }
}
