//! Research database: people, publications, organizations.

use crate::config::Limits;
use crate::context::{Context, ResearchDb};
use crate::di::FromContext;
use crate::error::AppError;
use crate::graph::{QueryExt, Row};
use crate::models::{
    real_orcid, DatabaseStats, OrcidCoverage, ResearchExpert, ResearcherProfile, ORCID_NOT_FOUND,
};

use super::{decode_rows, stats};

pub(crate) const RESEARCH_PROFILES_QUERY: &str = "
MATCH (p:Person)
WHERE toLower(p.name) CONTAINS toLower($name)
WITH p LIMIT $limit
OPTIONAL MATCH (p)-[w:WORKED_AT]->(org:Organization)
WITH p, collect(CASE WHEN org IS NULL THEN NULL ELSE {
         organization: org.name,
         role: w.role,
         department: w.department,
         start_year: w.start_year,
         end_year: w.end_year
     } END) AS affiliations
OPTIONAL MATCH (p)-[:AUTHORED]->(pub:Publication)
RETURN p.name AS name,
       p.orcid_id AS orcid_id,
       p.orcid_given_names AS given_names,
       p.orcid_family_name AS family_name,
       p.orcid_publication_count AS orcid_publication_count,
       toString(p.orcid_search_date) AS search_date,
       count(DISTINCT pub) AS total_publications,
       affiliations";

pub(crate) const RESEARCH_EXPERTS_QUERY: &str = "
MATCH (p:Person)
WHERE p.name IS NOT NULL
  AND (EXISTS {
        MATCH (p)-[:AUTHORED]->(pub:Publication)
        WHERE toLower(pub.title) CONTAINS toLower($topic)
      }
   OR EXISTS {
        MATCH (p)-[w:WORKED_AT]->(:Organization)
        WHERE toLower(w.role) CONTAINS toLower($topic)
           OR toLower(w.department) CONTAINS toLower($topic)
      })
OPTIONAL MATCH (p)-[:AUTHORED]->(pub:Publication)
WHERE toLower(pub.title) CONTAINS toLower($topic)
WITH p, count(DISTINCT pub) AS relevant_publications
OPTIONAL MATCH (p)-[w:WORKED_AT]->(org:Organization)
WITH p, relevant_publications,
     collect(DISTINCT org.name) AS organizations,
     collect(DISTINCT w.role) AS roles
RETURN p.name AS name,
       p.orcid_id AS orcid_id,
       relevant_publications,
       organizations[..3] AS organizations,
       roles[..3] AS roles
ORDER BY relevant_publications DESC
LIMIT $limit";

/// Repository for the research database ("db1").
#[derive(FromContext, Clone)]
pub struct ResearchRepository {
    db: ResearchDb,
    #[from_context(with = "Context::limits")]
    limits: Limits,
}

impl ResearchRepository {
    /// Researchers whose name contains `name`, case-insensitively.
    pub async fn find_profiles(&self, name: &str) -> Result<Vec<ResearcherProfile>, AppError> {
        let rows = self
            .db
            .query(RESEARCH_PROFILES_QUERY)
            .param("name", name)
            .param("limit", self.limits.profile_limit)
            .fetch_all()
            .await?;

        tracing::debug!(name = %name, rows = rows.len(), "Research profiles fetched");

        Ok(decode_rows(&rows, "researcher_profile")
            .into_iter()
            .map(ResearcherProfile::normalized)
            .collect())
    }

    /// People with publications on the topic or a matching employment role or department.
    pub async fn find_experts(
        &self,
        topic: &str,
        limit: usize,
    ) -> Result<Vec<ResearchExpert>, AppError> {
        let rows = self
            .db
            .query(RESEARCH_EXPERTS_QUERY)
            .param("topic", topic)
            .param("limit", limit)
            .fetch_all()
            .await?;

        tracing::debug!(topic = %topic, rows = rows.len(), "Research experts fetched");

        let mut experts: Vec<ResearchExpert> = decode_rows(&rows, "research_expert");
        for expert in &mut experts {
            expert.orcid_id = real_orcid(expert.orcid_id.take());
        }
        Ok(experts)
    }

    /// Database shape plus ORCID coverage.
    pub async fn stats(&self) -> Result<DatabaseStats, AppError> {
        let mut stats = stats::collect_stats(&self.db, self.limits.overview_limit).await?;

        let coverage = self
            .db
            .query(stats::ORCID_COVERAGE_QUERY)
            .param("not_found", ORCID_NOT_FOUND)
            .fetch_one()
            .await?;
        stats.orcid_coverage = coverage
            .as_ref()
            .map(Row::decode::<OrcidCoverage>)
            .transpose()?;

        Ok(stats)
    }

    pub async fn ping(&self) -> Result<(), AppError> {
        stats::ping(&self.db).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::graph::testing::ScriptedExecutor;
    use crate::repositories::{
        LABEL_COUNTS_QUERY, ORCID_COVERAGE_QUERY, RELATIONSHIP_TYPES_QUERY,
        RELATIONSHIP_TYPE_COUNT_QUERY, TOTALS_QUERY,
    };

    fn repository(executor: Arc<ScriptedExecutor>) -> ResearchRepository {
        ResearchRepository {
            db: ResearchDb(executor),
            limits: Limits::default(),
        }
    }

    #[tokio::test]
    async fn test_find_profiles_normalizes_orcid_and_affiliations() {
        let executor = Arc::new(ScriptedExecutor::new().with_rows(
            RESEARCH_PROFILES_QUERY,
            vec![json!({
                "name": "Anders Svensson",
                "orcid_id": "NOT_FOUND",
                "given_names": null,
                "family_name": null,
                "orcid_publication_count": null,
                "search_date": "2024-05-02T10:00:00Z",
                "total_publications": 12,
                "affiliations": [
                    {"organization": "KTH Royal Institute of Technology", "role": "Lecturer",
                     "department": null, "start_year": 2015, "end_year": null}
                ]
            })],
        ));
        let repo = repository(executor.clone());

        let profiles = repo.find_profiles("anders").await.unwrap();

        assert_eq!(profiles.len(), 1);
        assert_eq!(profiles[0].orcid_id, None);
        assert_eq!(profiles[0].total_publications, 12);
        assert_eq!(profiles[0].affiliations[0].start_year, Some(2015));

        let params = executor.params_for(RESEARCH_PROFILES_QUERY).unwrap();
        assert_eq!(params["name"], json!("anders"));
        assert_eq!(params["limit"], json!(10));
    }

    #[tokio::test]
    async fn test_find_experts_binds_topic_and_limit() {
        let executor = Arc::new(ScriptedExecutor::new().with_rows(
            RESEARCH_EXPERTS_QUERY,
            vec![json!({
                "name": "Maria Andersson",
                "orcid_id": "0000-0002-1825-0097",
                "relevant_publications": 7,
                "organizations": ["Chalmers University of Technology"],
                "roles": ["Professor"]
            })],
        ));
        let repo = repository(executor.clone());

        let experts = repo.find_experts("machine learning", 5).await.unwrap();

        assert_eq!(experts[0].relevant_publications, 7);
        assert_eq!(experts[0].orcid_id.as_deref(), Some("0000-0002-1825-0097"));
        let params = executor.params_for(RESEARCH_EXPERTS_QUERY).unwrap();
        assert_eq!(params["topic"], json!("machine learning"));
        assert_eq!(params["limit"], json!(5));
    }

    #[tokio::test]
    async fn test_find_experts_skips_person_without_name() {
        let executor = Arc::new(ScriptedExecutor::new().with_rows(
            RESEARCH_EXPERTS_QUERY,
            vec![
                json!({"name": "Maria Andersson", "orcid_id": null, "relevant_publications": 4,
                       "organizations": [], "roles": []}),
                json!({"name": null, "orcid_id": null, "relevant_publications": 2,
                       "organizations": [], "roles": []}),
            ],
        ));
        let repo = repository(executor);

        let experts = repo.find_experts("ai", 10).await.unwrap();

        assert_eq!(experts.len(), 1);
        assert_eq!(experts[0].name, "Maria Andersson");
    }

    #[tokio::test]
    async fn test_stats_include_orcid_coverage() {
        let executor = Arc::new(
            ScriptedExecutor::new()
                .with_rows(
                    TOTALS_QUERY,
                    vec![json!({"total_nodes": 500, "total_relationships": 1200})],
                )
                .with_rows(
                    LABEL_COUNTS_QUERY,
                    vec![
                        json!({"label": "Person", "count": 300}),
                        json!({"label": "Publication", "count": 150}),
                    ],
                )
                .with_rows(
                    RELATIONSHIP_TYPES_QUERY,
                    vec![json!({"relationship_type": "AUTHORED", "count": 900})],
                )
                .with_rows(
                    RELATIONSHIP_TYPE_COUNT_QUERY,
                    vec![json!({"relationship_type_count": 3})],
                )
                .with_rows(
                    ORCID_COVERAGE_QUERY,
                    vec![json!({"total_persons": 300, "with_orcid": 120})],
                ),
        );
        let repo = repository(executor.clone());

        let stats = repo.stats().await.unwrap();

        assert_eq!(stats.total_nodes, 500);
        assert_eq!(stats.labels.len(), 2);
        assert_eq!(stats.relationship_type_count, 3);
        assert_eq!(stats.orcid_coverage.map(|c| c.with_orcid), Some(120));
        assert_eq!(
            executor.params_for(ORCID_COVERAGE_QUERY).unwrap()["not_found"],
            json!("NOT_FOUND")
        );
        assert_eq!(
            executor.params_for(LABEL_COUNTS_QUERY).unwrap()["limit"],
            json!(15)
        );
    }
}
