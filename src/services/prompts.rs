//! Prompt templates, one per narrative task.
//!
//! Templates are fixed text with the structured data embedded verbatim, so
//! the same data always yields the same prompt.

use serde::Serialize;

use crate::config::PromptFormat;
use crate::models::{
    ExpertCandidate, FieldResearcher, FieldTrends, ResearcherMatch, ResearcherProfile,
    ThesisActivity,
};

pub(crate) const SYSTEM_PROMPT: &str = "You are an academic research intelligence analyst. \
Base every statement on the data provided. If the data does not support a claim, say so \
instead of guessing. Write in clear, professional English.";

/// Renders data as pretty JSON or TOON.
pub(crate) fn render<T: Serialize>(data: &T, format: PromptFormat) -> String {
    let rendered = match format {
        PromptFormat::Json => serde_json::to_string_pretty(data).map_err(|e| e.to_string()),
        PromptFormat::Toon => serde_toon::to_string(data).map_err(|e| e.to_string()),
    };
    rendered.unwrap_or_else(|e| format!("<unrenderable data: {}>", e))
}

pub(crate) fn profile_analysis(
    name: &str,
    profiles: &[ResearcherProfile],
    activities: &[ThesisActivity],
    format: PromptFormat,
) -> String {
    format!(
        r#"Analyze the academic profile of "{name}".

RESEARCH DATABASE PROFILES (publications, ORCID, affiliations):
{profiles}

THESIS DATABASE ACTIVITIES (roles on theses):
{activities}

Please provide:
1. **Profile Summary**: Who this person is, and whether the records likely describe one or several people
2. **Expertise Areas**: Main research topics, based on publications and thesis keywords
3. **Academic Roles**: Supervision, examination and other thesis involvement
4. **Career & Affiliations**: Institutions, roles and departments over time
5. **Collaboration Potential**: Where this person could contribute

Keep the response under 500 words."#,
        name = name,
        profiles = render(&profiles, format),
        activities = render(&activities, format),
    )
}

pub(crate) fn expert_ranking(
    topic: &str,
    experts: &[ExpertCandidate],
    format: PromptFormat,
) -> String {
    format!(
        r#"Rank the experts on "{topic}" found in a research database and a thesis database.

CANDIDATES:
{experts}

Please provide:
1. **Top Experts**: A ranked list with a one-line justification each
2. **Evidence**: Publications, theses and roles supporting each ranking
3. **Institutions**: Where expertise on "{topic}" is concentrated
4. **Recommendation**: Who to contact first, and why

Keep the response concise and actionable."#,
        topic = topic,
        experts = render(&experts, format),
    )
}

pub(crate) fn field_brief(
    field: &str,
    researchers: &[FieldResearcher],
    trends: &FieldTrends,
    format: PromptFormat,
) -> String {
    format!(
        r#"Generate a comprehensive research field intelligence brief for: "{field}"

RESEARCHERS IN FIELD (from thesis database):
{researchers}

RECENT ACTIVITY TRENDS:
{trends}

Please provide:
1. **Field Overview**: Current state of "{field}" research
2. **Key Players**: Top researchers and their expertise
3. **Activity Patterns**: Supervision, examination, collaboration trends
4. **Research Focus Areas**: Main topics and themes
5. **Growth Trends**: Recent developments and momentum
6. **Opportunities**: Collaboration potential and emerging areas

Keep response comprehensive but under 1000 words."#,
        field = field,
        researchers = render(&researchers, format),
        trends = render(trends, format),
    )
}

pub(crate) fn match_analysis(
    name: &str,
    keywords: &[String],
    matches: &[ResearcherMatch],
    format: PromptFormat,
) -> String {
    format!(
        r#"Analyze researcher compatibility for: "{name}"

Target researcher's keywords: {keywords}

Potential matches:
{matches}

Provide:
1. Top 5 recommended matches for collaboration
2. Explanation of compatibility for each match
3. Specific collaboration opportunities
4. Match quality scores (1-10)

Keep response concise but actionable."#,
        name = name,
        keywords = keywords.join(", "),
        matches = render(&matches, format),
    )
}
