//! Reports returned by the resolver, one per user-facing action.

use serde::{Deserialize, Serialize};

use super::{
    DatabaseStats, ExpertCandidate, FieldResearcher, FieldTrends, Narrative, ResearcherMatch,
    ResearcherProfile, SourceReport, ThesisActivity,
};

/// Person lookup across both databases.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonLookup {
    pub name: String,
    pub found_in_db1: bool,
    pub found_in_db2: bool,
    pub researcher_profiles: Vec<ResearcherProfile>,
    pub thesis_activities: Vec<ThesisActivity>,
    pub sources: SourceReport,
    pub ai_analysis: Narrative,
}

impl PersonLookup {
    pub fn found(&self) -> bool {
        self.found_in_db1 || self.found_in_db2
    }
}

/// Experts on a topic from both databases.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpertSearch {
    pub topic: String,
    pub limit: usize,
    pub experts_found: usize,
    /// Rows returned by the research database before merging.
    pub db1_matches: usize,
    /// Rows returned by the thesis database before merging.
    pub db2_matches: usize,
    pub expert_list: Vec<ExpertCandidate>,
    pub sources: SourceReport,
    pub ai_ranking: Narrative,
}

/// Field intelligence brief.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldBrief {
    pub field: String,
    pub researchers_found: usize,
    pub researchers: Vec<FieldResearcher>,
    pub trends: FieldTrends,
    pub sources: SourceReport,
    pub ai_intelligence_brief: Narrative,
}

/// Collaboration candidates for a researcher.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResearcherMatches {
    pub target_researcher: String,
    pub target_keywords: Vec<String>,
    pub matches_found: usize,
    pub potential_matches: Vec<ResearcherMatch>,
    pub ai_analysis: Narrative,
}

/// Shape of both databases.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseOverview {
    pub research_db: DatabaseStats,
    pub thesis_db: DatabaseStats,
}
