//! Integration tests against live Neo4j databases.
//!
//! These tests need both databases and the model endpoint configured through
//! `.researchbook.toml` or `RESEARCHBOOK_*` environment variables.
//! Run with: `cargo test --features integration --test neo4j_integration`

#![cfg(feature = "integration")]

use researchbook::config::Config;
use researchbook::context::Context;
use researchbook::error::AppError;
use researchbook::graph::backends::neo4j::Neo4jClient;
use researchbook::graph::{CypherExecutor, QueryExt};
use researchbook::services::{DiagnosticsService, ResearchService};
use researchbook::FromRef;
use serial_test::serial;

const UNLIKELY_NAME: &str = "Zyxwvutsr Qponmlkj";

fn load_config() -> Config {
    Config::load().expect("Failed to load configuration")
}

async fn research_client() -> Neo4jClient {
    Neo4jClient::connect(&load_config().research_db)
        .await
        .expect("Failed to connect to research database")
}

async fn context() -> Context {
    Context::connect(load_config())
        .await
        .expect("Failed to build context")
}

#[serial]
mod gateway_tests {
    use super::*;

    #[tokio::test]
    async fn test_read_query_returns_rows() {
        let client = research_client().await;

        let row = client
            .query("RETURN 1 AS one, 'x' AS letter")
            .fetch_one()
            .await
            .expect("Query failed")
            .expect("Expected a row");

        assert_eq!(row.get::<i64>("one").unwrap(), 1);
        assert_eq!(row.get::<String>("letter").unwrap(), "x");
    }

    #[tokio::test]
    async fn test_parameters_round_trip() {
        let client = research_client().await;

        let row = client
            .query("RETURN $names AS names, $limit AS limit")
            .param("names", vec!["a", "b"])
            .param("limit", 3)
            .fetch_one()
            .await
            .expect("Query failed")
            .expect("Expected a row");

        assert_eq!(row.get::<Vec<String>>("names").unwrap(), vec!["a", "b"]);
        assert_eq!(row.get::<i64>("limit").unwrap(), 3);
    }

    #[tokio::test]
    async fn test_write_query_is_rejected() {
        let client = research_client().await;

        let result = client
            .execute_cypher("CREATE (n:IntegrationTest) RETURN n", Default::default())
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}

#[serial]
mod service_tests {
    use super::*;

    #[tokio::test]
    async fn test_connectivity_check() {
        let ctx = context().await;

        let report = DiagnosticsService::from_ref(&ctx).check().await;

        assert!(report.research_db.is_available());
        assert!(report.thesis_db.is_available());
    }

    #[tokio::test]
    async fn test_lookup_unknown_person() {
        let ctx = context().await;

        let lookup = ResearchService::from_ref(&ctx)
            .lookup_person(UNLIKELY_NAME)
            .await
            .expect("Lookup failed");

        assert!(!lookup.found_in_db1);
        assert!(!lookup.found_in_db2);
        assert!(lookup.researcher_profiles.is_empty());
        assert!(lookup.thesis_activities.is_empty());
    }

    #[tokio::test]
    async fn test_expert_limit_respected() {
        let ctx = context().await;

        let search = ResearchService::from_ref(&ctx)
            .find_expert("learning", Some(3))
            .await
            .expect("Expert search failed");

        assert!(search.expert_list.len() <= 3);
    }

    #[tokio::test]
    async fn test_match_unknown_person_has_no_thesis_data() {
        let ctx = context().await;

        let result = ResearchService::from_ref(&ctx)
            .match_researchers(UNLIKELY_NAME)
            .await;

        assert!(matches!(result, Err(AppError::NoThesisData(_))));
    }

    #[tokio::test]
    async fn test_overview_counts_nodes() {
        let ctx = context().await;

        let overview = ResearchService::from_ref(&ctx).database_overview().await;

        assert!(overview.research_db.status.is_available());
        assert!(overview.research_db.total_nodes > 0);
        assert!(overview.research_db.orcid_coverage.is_some());
    }
}
