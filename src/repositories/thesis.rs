//! Thesis database: theses and the people holding roles on them.

use crate::config::Limits;
use crate::context::{Context, ThesisDb};
use crate::di::FromContext;
use crate::error::AppError;
use crate::graph::QueryExt;
use crate::models::{
    DatabaseStats, FieldResearcher, ResearcherMatch, ThesisActivity, ThesisExpert, YearlyActivity,
};

use super::{decode_rows, stats};

pub(crate) const THESIS_ACTIVITIES_QUERY: &str = "
MATCH (p:Person)-[r]->(t:Thesis)
WHERE toLower(p.name) CONTAINS toLower($name)
RETURN p.name AS name,
       type(r) AS role,
       t.title AS thesis_title,
       t.keywords AS keywords,
       toString(t.created_date) AS created_date
LIMIT $limit";

pub(crate) const THESIS_EXPERTS_QUERY: &str = "
MATCH (p:Person)-[r]->(t:Thesis)
WHERE p.name IS NOT NULL
  AND (toLower(t.title) CONTAINS toLower($topic)
       OR any(keyword IN t.keywords WHERE toLower(keyword) CONTAINS toLower($topic)))
WITH p, count(DISTINCT t) AS relevant_theses, collect(DISTINCT type(r)) AS roles
RETURN p.name AS name, relevant_theses, roles
ORDER BY relevant_theses DESC
LIMIT $limit";

pub(crate) const FIELD_RESEARCHERS_QUERY: &str = "
MATCH (p:Person)-[r]->(t:Thesis)
WHERE p.name IS NOT NULL
  AND (toLower(t.title) CONTAINS toLower($field)
       OR any(keyword IN t.keywords WHERE toLower(keyword) CONTAINS toLower($field)))
WITH p,
     collect(DISTINCT type(r)) AS thesis_roles,
     count(DISTINCT t) AS thesis_count,
     collect(DISTINCT t.title) AS titles
RETURN p.name AS name,
       thesis_roles,
       thesis_count,
       titles[..$sample_titles] AS sample_titles
ORDER BY thesis_count DESC
LIMIT $limit";

pub(crate) const FIELD_TRENDS_QUERY: &str = "
MATCH (t:Thesis)
WHERE toLower(t.title) CONTAINS toLower($field)
   OR any(keyword IN t.keywords WHERE toLower(keyword) CONTAINS toLower($field))
WITH t.created_date.year AS year, count(t) AS count
WHERE year IS NOT NULL AND year >= $since_year
RETURN year, count
ORDER BY year DESC
LIMIT $limit";

pub(crate) const TARGET_KEYWORDS_QUERY: &str = "
MATCH (p:Person)-[]->(t:Thesis)
WHERE toLower(p.name) CONTAINS toLower($name)
UNWIND coalesce(t.keywords, []) AS keyword
WITH keyword
WHERE keyword IS NOT NULL AND trim(keyword) <> ''
RETURN collect(DISTINCT keyword)[..$limit] AS keywords";

pub(crate) const KEYWORD_MATCHES_QUERY: &str = "
MATCH (p:Person)-[r]->(t:Thesis)
WHERE p.name IS NOT NULL
  AND any(keyword IN t.keywords WHERE keyword IN $keywords)
  AND NOT toLower(p.name) CONTAINS toLower($target_name)
WITH p,
     count(DISTINCT t) AS relevance,
     collect(DISTINCT type(r)) AS roles,
     collect(DISTINCT t.title) AS titles
RETURN p.name AS name, relevance, roles, titles[..$sample_titles] AS sample_work
ORDER BY relevance DESC
LIMIT $limit";

/// Repository for the thesis database ("db2").
#[derive(FromContext, Clone)]
pub struct ThesisRepository {
    db: ThesisDb,
    #[from_context(with = "Context::limits")]
    limits: Limits,
}

impl ThesisRepository {
    /// Thesis roles held by people whose name contains `name`.
    pub async fn find_activities(&self, name: &str) -> Result<Vec<ThesisActivity>, AppError> {
        let rows = self
            .db
            .query(THESIS_ACTIVITIES_QUERY)
            .param("name", name)
            .param("limit", self.limits.activity_limit)
            .fetch_all()
            .await?;

        tracing::debug!(name = %name, rows = rows.len(), "Thesis activities fetched");
        Ok(decode_rows(&rows, "thesis_activity"))
    }

    /// People whose theses mention the topic in title or keywords.
    pub async fn find_experts(&self, topic: &str, limit: usize) -> Result<Vec<ThesisExpert>, AppError> {
        let rows = self
            .db
            .query(THESIS_EXPERTS_QUERY)
            .param("topic", topic)
            .param("limit", limit)
            .fetch_all()
            .await?;

        tracing::debug!(topic = %topic, rows = rows.len(), "Thesis experts fetched");
        Ok(decode_rows(&rows, "thesis_expert"))
    }

    /// Most active people in a field, by number of matching theses.
    pub async fn field_researchers(&self, field: &str) -> Result<Vec<FieldResearcher>, AppError> {
        let rows = self
            .db
            .query(FIELD_RESEARCHERS_QUERY)
            .param("field", field)
            .param("sample_titles", self.limits.sample_titles)
            .param("limit", self.limits.field_researchers_limit)
            .fetch_all()
            .await?;

        tracing::debug!(field = %field, rows = rows.len(), "Field researchers fetched");
        Ok(decode_rows(&rows, "field_researcher"))
    }

    /// Matching theses per creation year, newest first.
    pub async fn field_trends(&self, field: &str) -> Result<Vec<YearlyActivity>, AppError> {
        let rows = self
            .db
            .query(FIELD_TRENDS_QUERY)
            .param("field", field)
            .param("since_year", self.limits.trend_since_year)
            .param("limit", self.limits.trend_years)
            .fetch_all()
            .await?;

        let mut years: Vec<YearlyActivity> = decode_rows(&rows, "yearly_activity");
        years.retain(|y| y.year >= self.limits.trend_since_year);
        years.sort_by(|a, b| b.year.cmp(&a.year));
        years.truncate(self.limits.trend_years);
        Ok(years)
    }

    /// Distinct non-blank keywords across every thesis linked to people
    /// matching `name`, at most [`Limits::target_keywords`].
    pub async fn target_keywords(&self, name: &str) -> Result<Vec<String>, AppError> {
        let cap = self.limits.target_keywords();
        let row = self
            .db
            .query(TARGET_KEYWORDS_QUERY)
            .param("name", name)
            .param("limit", cap)
            .fetch_one()
            .await?;

        let mut keywords: Vec<String> = match row {
            Some(row) => row.get_opt("keywords")?.unwrap_or_default(),
            None => Vec::new(),
        };
        keywords.retain(|k| !k.trim().is_empty());
        keywords.truncate(cap);
        Ok(keywords)
    }

    /// People sharing at least one keyword with the target, excluding the target.
    ///
    /// Sorted by relevance, descending. Ties keep the store's order.
    pub async fn keyword_matches(
        &self,
        target_name: &str,
        keywords: &[String],
    ) -> Result<Vec<ResearcherMatch>, AppError> {
        let rows = self
            .db
            .query(KEYWORD_MATCHES_QUERY)
            .param("keywords", keywords)
            .param("target_name", target_name)
            .param("sample_titles", self.limits.sample_titles)
            .param("limit", self.limits.match_limit)
            .fetch_all()
            .await?;

        let mut matches: Vec<ResearcherMatch> = decode_rows(&rows, "researcher_match");
        matches.sort_by(|a, b| b.relevance.cmp(&a.relevance));
        matches.truncate(self.limits.match_limit);

        tracing::debug!(target = %target_name, matches = matches.len(), "Keyword matches fetched");
        Ok(matches)
    }

    pub async fn stats(&self) -> Result<DatabaseStats, AppError> {
        stats::collect_stats(&self.db, self.limits.overview_limit).await
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

    fn repository(executor: Arc<ScriptedExecutor>) -> ThesisRepository {
        ThesisRepository {
            db: ThesisDb(executor),
            limits: Limits::default(),
        }
    }

    #[tokio::test]
    async fn test_field_trends_filters_and_orders_years() {
        let executor = Arc::new(ScriptedExecutor::new().with_rows(
            FIELD_TRENDS_QUERY,
            vec![
                json!({"year": 2021, "count": 2}),
                json!({"year": 2023, "count": 1}),
                json!({"year": 2019, "count": 9}),
                json!({"year": 2022, "count": 5}),
            ],
        ));
        let repo = repository(executor.clone());

        let years = repo.field_trends("sustainability").await.unwrap();

        assert_eq!(
            years,
            vec![
                YearlyActivity { year: 2023, count: 1 },
                YearlyActivity { year: 2022, count: 5 },
                YearlyActivity { year: 2021, count: 2 },
            ]
        );
        let params = executor.params_for(FIELD_TRENDS_QUERY).unwrap();
        assert_eq!(params["since_year"], json!(2020));
        assert_eq!(params["limit"], json!(10));
    }

    #[tokio::test]
    async fn test_target_keywords_are_capped() {
        let many: Vec<String> = (0..25).map(|i| format!("keyword-{i}")).collect();
        let executor = Arc::new(
            ScriptedExecutor::new().with_rows(TARGET_KEYWORDS_QUERY, vec![json!({"keywords": many})]),
        );
        let repo = repository(executor);

        let keywords = repo.target_keywords("Anders").await.unwrap();

        assert_eq!(keywords.len(), 10);
        assert_eq!(keywords[0], "keyword-0");
    }

    #[tokio::test]
    async fn test_target_keywords_cap_ignores_oversized_config() {
        let many: Vec<String> = (0..25).map(|i| format!("keyword-{i}")).collect();
        let executor = Arc::new(
            ScriptedExecutor::new().with_rows(TARGET_KEYWORDS_QUERY, vec![json!({"keywords": many})]),
        );
        let repo = ThesisRepository {
            db: ThesisDb(executor.clone()),
            limits: Limits {
                keyword_cap: 40,
                ..Limits::default()
            },
        };

        let keywords = repo.target_keywords("Anders").await.unwrap();

        assert_eq!(keywords.len(), 10);
        assert_eq!(
            executor.params_for(TARGET_KEYWORDS_QUERY).unwrap()["limit"],
            json!(10)
        );
    }

    #[test]
    fn test_target_keywords_query_drops_blanks_before_limit() {
        let filter = TARGET_KEYWORDS_QUERY.find("trim(keyword) <> ''").unwrap();
        let collect = TARGET_KEYWORDS_QUERY.find("collect(DISTINCT keyword)").unwrap();
        assert!(filter < collect);
    }

    #[tokio::test]
    async fn test_keyword_matches_skip_rows_without_name() {
        let executor = Arc::new(ScriptedExecutor::new().with_rows(
            KEYWORD_MATCHES_QUERY,
            vec![
                json!({"name": null, "relevance": 9, "roles": [], "sample_work": []}),
                json!({"name": "Eva Holm", "relevance": 3, "roles": ["EXAMINER"], "sample_work": []}),
            ],
        ));
        let repo = repository(executor);

        let matches = repo
            .keyword_matches("Anders", &["energy".to_string()])
            .await
            .unwrap();

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].name, "Eva Holm");
    }

    #[tokio::test]
    async fn test_target_keywords_empty_when_no_rows() {
        let repo = repository(Arc::new(ScriptedExecutor::new()));
        assert!(repo.target_keywords("Nobody").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_keyword_matches_sort_is_stable() {
        let executor = Arc::new(ScriptedExecutor::new().with_rows(
            KEYWORD_MATCHES_QUERY,
            vec![
                json!({"name": "B", "relevance": 2, "roles": ["EXAMINER"], "sample_work": ["t1"]}),
                json!({"name": "A", "relevance": 5, "roles": [], "sample_work": []}),
                json!({"name": "C", "relevance": 2, "roles": null, "sample_work": null}),
            ],
        ));
        let repo = repository(executor.clone());
        let keywords = vec!["robotics".to_string()];

        let matches = repo.keyword_matches("Anders", &keywords).await.unwrap();

        let names: Vec<_> = matches.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
        let params = executor.params_for(KEYWORD_MATCHES_QUERY).unwrap();
        assert_eq!(params["keywords"], json!(["robotics"]));
        assert_eq!(params["target_name"], json!("Anders"));
    }

    #[tokio::test]
    async fn test_activities_decode_role_and_keywords() {
        let executor = Arc::new(ScriptedExecutor::new().with_rows(
            THESIS_ACTIVITIES_QUERY,
            vec![json!({
                "name": "Anders Lindqvist",
                "role": "SUPERVISOR",
                "thesis_title": "Energy-aware scheduling",
                "keywords": ["scheduling", "energy"],
                "created_date": "2022-06-01"
            })],
        ));
        let repo = repository(executor);

        let activities = repo.find_activities("anders").await.unwrap();

        assert_eq!(activities[0].role, "SUPERVISOR");
        assert_eq!(activities[0].keywords, vec!["scheduling", "energy"]);
    }
}
