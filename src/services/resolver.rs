//! Cross-database resolver: every user-facing action lives here.

use crate::config::Limits;
use crate::context::Context;
use crate::di::FromContext;
use crate::error::AppError;
use crate::models::{
    merge_experts, DataSource, DatabaseOverview, DatabaseStats, ExpertSearch, FieldBrief,
    FieldTrends, Narrative, PersonLookup, ResearcherMatches, SourceReport, SourceStatus,
};
use crate::repositories::{ResearchRepository, ThesisRepository};

use super::NarrativeSynthesizer;

/// Queries both databases, merges the answers and asks for prose.
///
/// The two lookups of an action run concurrently. A database that fails is
/// reported as `unavailable` and contributes no rows; the other database's
/// results are still returned.
#[derive(FromContext, Clone)]
pub struct ResearchService {
    research: ResearchRepository,
    thesis: ThesisRepository,
    synthesizer: NarrativeSynthesizer,
    #[from_context(with = "Context::limits")]
    limits: Limits,
}

impl ResearchService {
    /// Finds a person by case-insensitive name substring in both databases.
    pub async fn lookup_person(&self, name: &str) -> Result<PersonLookup, AppError> {
        let name = required("name", name)?;
        tracing::info!(name = %name, "Looking up person");

        let (profiles, activities) = tokio::join!(
            self.research.find_profiles(name),
            self.thesis.find_activities(name)
        );

        let mut sources = SourceReport::default();
        let researcher_profiles = degrade(DataSource::ResearchDb, profiles, &mut sources);
        let thesis_activities = degrade(DataSource::ThesisDb, activities, &mut sources);

        let found_in_db1 = !researcher_profiles.is_empty();
        let found_in_db2 = !thesis_activities.is_empty();

        let ai_analysis = if found_in_db1 || found_in_db2 {
            self.synthesizer
                .profile_analysis(name, &researcher_profiles, &thesis_activities)
                .await
        } else {
            Narrative::Skipped {
                reason: format!("No records found for {}", name),
            }
        };

        Ok(PersonLookup {
            name: name.to_string(),
            found_in_db1,
            found_in_db2,
            researcher_profiles,
            thesis_activities,
            sources,
            ai_analysis,
        })
    }

    /// Experts on a topic from both databases, merged into at most `limit` entries.
    pub async fn find_expert(
        &self,
        topic: &str,
        limit: Option<usize>,
    ) -> Result<ExpertSearch, AppError> {
        let topic = required("topic", topic)?;
        let limit = self.limits.expert_limit(limit);
        tracing::info!(topic = %topic, limit, "Finding experts");

        let (research, thesis) = tokio::join!(
            self.research.find_experts(topic, limit),
            self.thesis.find_experts(topic, limit)
        );

        let mut sources = SourceReport::default();
        let research = degrade(DataSource::ResearchDb, research, &mut sources);
        let thesis = degrade(DataSource::ThesisDb, thesis, &mut sources);

        let expert_list = merge_experts(&research, &thesis, limit);

        let ai_ranking = if expert_list.is_empty() {
            Narrative::Skipped {
                reason: format!("No experts found for {}", topic),
            }
        } else {
            self.synthesizer.expert_ranking(topic, &expert_list).await
        };

        Ok(ExpertSearch {
            topic: topic.to_string(),
            limit,
            experts_found: expert_list.len(),
            db1_matches: research.len(),
            db2_matches: thesis.len(),
            expert_list,
            sources,
            ai_ranking,
        })
    }

    /// Who is active in a field and how activity developed in recent years.
    pub async fn generate_field_brief(&self, field: &str) -> Result<FieldBrief, AppError> {
        let field = required("field", field)?;
        tracing::info!(field = %field, "Generating field brief");

        let (researchers, years) = tokio::join!(
            self.thesis.field_researchers(field),
            self.thesis.field_trends(field)
        );

        let mut sources = SourceReport::default();
        let researchers = degrade(DataSource::ThesisDb, researchers, &mut sources);
        let trends = FieldTrends::new(degrade(DataSource::ThesisDb, years, &mut sources));

        let ai_intelligence_brief = if researchers.is_empty() && trends.yearly_activity.is_empty() {
            Narrative::Skipped {
                reason: format!("No thesis activity found for {}", field),
            }
        } else {
            self.synthesizer
                .field_brief(field, &researchers, &trends)
                .await
        };

        Ok(FieldBrief {
            field: field.to_string(),
            researchers_found: researchers.len(),
            researchers,
            trends,
            sources,
            ai_intelligence_brief,
        })
    }

    /// Researchers sharing thesis keywords with `name`.
    ///
    /// # Errors
    ///
    /// [`AppError::NoThesisData`] when the target has no keyword-bearing
    /// thesis records, [`AppError::SourceUnavailable`] when the thesis
    /// database cannot be queried.
    pub async fn match_researchers(&self, name: &str) -> Result<ResearcherMatches, AppError> {
        let name = required("name", name)?;
        tracing::info!(name = %name, "Matching researchers");

        let target_keywords = self
            .thesis
            .target_keywords(name)
            .await
            .map_err(|e| unavailable(DataSource::ThesisDb, e))?;

        if target_keywords.is_empty() {
            return Err(AppError::NoThesisData(name.to_string()));
        }

        let potential_matches = self
            .thesis
            .keyword_matches(name, &target_keywords)
            .await
            .map_err(|e| unavailable(DataSource::ThesisDb, e))?;

        let ai_analysis = if potential_matches.is_empty() {
            Narrative::Skipped {
                reason: format!("No researchers share keywords with {}", name),
            }
        } else {
            self.synthesizer
                .match_analysis(name, &target_keywords, &potential_matches)
                .await
        };

        Ok(ResearcherMatches {
            target_researcher: name.to_string(),
            target_keywords,
            matches_found: potential_matches.len(),
            potential_matches,
            ai_analysis,
        })
    }

    /// Node, label and relationship counts of both databases.
    pub async fn database_overview(&self) -> DatabaseOverview {
        tracing::info!("Collecting database overview");

        let (research, thesis) = tokio::join!(self.research.stats(), self.thesis.stats());

        DatabaseOverview {
            research_db: stats_or_unavailable(DataSource::ResearchDb, research),
            thesis_db: stats_or_unavailable(DataSource::ThesisDb, thesis),
        }
    }
}

fn required<'a>(field: &str, value: &'a str) -> Result<&'a str, AppError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::Validation(format!("{} must not be empty", field)));
    }
    Ok(value)
}

/// Keeps the rows, or records the database as unavailable and returns nothing.
fn degrade<T: Default>(
    source: DataSource,
    result: Result<T, AppError>,
    sources: &mut SourceReport,
) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(database = %source, error = %e, "Query failed, continuing without it");
            sources.record(
                source,
                SourceStatus::Unavailable {
                    message: e.to_string(),
                },
            );
            T::default()
        }
    }
}

fn unavailable(source: DataSource, err: AppError) -> AppError {
    match err {
        AppError::Connection(_) | AppError::Query { .. } => {
            tracing::warn!(database = %source, error = %err, "Database unavailable");
            AppError::SourceUnavailable {
                database: source,
                message: err.to_string(),
            }
        }
        other => other,
    }
}

fn stats_or_unavailable(source: DataSource, result: Result<DatabaseStats, AppError>) -> DatabaseStats {
    result.unwrap_or_else(|e| {
        tracing::warn!(database = %source, error = %e, "Overview unavailable");
        DatabaseStats {
            status: SourceStatus::Unavailable {
                message: e.to_string(),
            },
            ..DatabaseStats::default()
        }
    })
}
