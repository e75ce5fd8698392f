//! Plain-text rendering of reports.
//!
//! "Not found", "unavailable" and "analysis unavailable" each get their own
//! wording so a reader never mistakes an outage for an empty result.

use std::fmt::{self, Write};

use crate::models::{
    DataSource, DatabaseOverview, DatabaseStats, ExpertSearch, FieldBrief, Narrative,
    PersonLookup, ResearcherMatches, SourceReport, SourceStatus,
};
use crate::services::ConnectivityReport;

/// Runs a writer against a fresh buffer. Writing to a `String` cannot fail.
fn render(write: impl FnOnce(&mut String) -> fmt::Result) -> String {
    let mut out = String::new();
    let _ = write(&mut out);
    out
}

pub fn person_lookup(lookup: &PersonLookup) -> String {
    render(|out| {
        writeln!(out, "Person lookup: {}", lookup.name)?;
        writeln!(out)?;

        section(out, DataSource::ResearchDb, &lookup.sources)?;
        if lookup.sources.research_db.is_available() {
            if lookup.researcher_profiles.is_empty() {
                writeln!(out, "  Not found")?;
            }
            for p in &lookup.researcher_profiles {
                writeln!(out, "  {} ({} publications)", p.name, p.total_publications)?;
                if let Some(orcid) = &p.orcid_id {
                    writeln!(out, "    ORCID: {}", orcid)?;
                }
                for a in &p.affiliations {
                    let role = a.role.as_deref().unwrap_or("member");
                    writeln!(out, "    {} at {}", role, a.organization)?;
                }
            }
        }
        writeln!(out)?;

        section(out, DataSource::ThesisDb, &lookup.sources)?;
        if lookup.sources.thesis_db.is_available() {
            if lookup.thesis_activities.is_empty() {
                writeln!(out, "  Not found")?;
            }
            for a in &lookup.thesis_activities {
                let title = a.thesis_title.as_deref().unwrap_or("(untitled)");
                writeln!(out, "  {} - {}: {}", a.name, a.role, title)?;
            }
        }
        writeln!(out)?;

        narrative(out, "Analysis", &lookup.ai_analysis)
    })
}

pub fn expert_search(search: &ExpertSearch) -> String {
    render(|out| {
        writeln!(
            out,
            "Experts on \"{}\": {} (research db {}, thesis db {})",
            search.topic,
            search.experts_found,
            search.db1_matches,
            search.db2_matches
        )?;
        unavailable_sources(out, &search.sources)?;
        writeln!(out)?;

        if search.expert_list.is_empty() {
            writeln!(out, "  No experts found")?;
        }
        for (i, e) in search.expert_list.iter().enumerate() {
            let mut counts = Vec::new();
            if let Some(n) = e.relevant_publications {
                counts.push(format!("{} publications", n));
            }
            if let Some(n) = e.relevant_theses {
                counts.push(format!("{} theses", n));
            }
            writeln!(out, "  {}. {} ({})", i + 1, e.name, counts.join(", "))?;
            if !e.organizations.is_empty() {
                writeln!(out, "     {}", e.organizations.join(", "))?;
            }
        }
        writeln!(out)?;

        narrative(out, "Ranking", &search.ai_ranking)
    })
}

pub fn field_brief(brief: &FieldBrief) -> String {
    render(|out| {
        writeln!(out, "Field brief: {}", brief.field)?;
        unavailable_sources(out, &brief.sources)?;
        writeln!(out)?;

        writeln!(out, "Most active researchers ({}):", brief.researchers_found)?;
        if brief.researchers.is_empty() {
            writeln!(out, "  Not found")?;
        }
        for r in &brief.researchers {
            writeln!(
                out,
                "  {} - {} theses ({})",
                r.name,
                r.thesis_count,
                r.thesis_roles.join(", ")
            )?;
        }
        writeln!(out)?;

        writeln!(out, "Recent activity ({} theses):", brief.trends.total_recent)?;
        for y in &brief.trends.yearly_activity {
            writeln!(out, "  {}: {}", y.year, y.count)?;
        }
        writeln!(out)?;

        narrative(out, "Brief", &brief.ai_intelligence_brief)
    })
}

pub fn researcher_matches(matches: &ResearcherMatches) -> String {
    render(|out| {
        writeln!(out, "Matches for {}", matches.target_researcher)?;
        writeln!(out, "Keywords: {}", matches.target_keywords.join(", "))?;
        writeln!(out)?;

        if matches.potential_matches.is_empty() {
            writeln!(out, "  No researchers share these keywords")?;
        }
        for m in &matches.potential_matches {
            writeln!(
                out,
                "  {} - {} shared theses ({})",
                m.name,
                m.relevance,
                m.roles.join(", ")
            )?;
        }
        writeln!(out)?;

        narrative(out, "Analysis", &matches.ai_analysis)
    })
}

pub fn database_overview(overview: &DatabaseOverview) -> String {
    render(|out| {
        database_stats(out, DataSource::ResearchDb, &overview.research_db)?;
        writeln!(out)?;
        database_stats(out, DataSource::ThesisDb, &overview.thesis_db)
    })
}

pub fn connectivity(report: &ConnectivityReport) -> String {
    render(|out| {
        status_line(out, "Research database", &report.research_db)?;
        status_line(out, "Thesis database", &report.thesis_db)?;
        status_line(
            out,
            &format!("Model endpoint ({})", report.model),
            &report.llm,
        )
    })
}

pub fn models(models: &[String]) -> String {
    if models.is_empty() {
        return "No models offered".to_string();
    }
    models.join("\n")
}

fn database_stats(out: &mut String, source: DataSource, stats: &DatabaseStats) -> fmt::Result {
    writeln!(out, "{}", title_case(source))?;
    if let SourceStatus::Unavailable { message } = &stats.status {
        writeln!(out, "  Service unavailable: {}", message)?;
        return Ok(());
    }
    writeln!(out, "  Nodes: {}", stats.total_nodes)?;
    writeln!(
        out,
        "  Relationships: {} ({} types)",
        stats.total_relationships,
        stats.relationship_type_count
    )?;
    for l in &stats.labels {
        writeln!(out, "    :{} {}", l.label, l.count)?;
    }
    for r in &stats.relationship_types {
        writeln!(out, "    [{}] {}", r.relationship_type, r.count)?;
    }
    if let Some(coverage) = &stats.orcid_coverage {
        writeln!(
            out,
            "  ORCID coverage: {}/{} ({:.1}%)",
            coverage.with_orcid,
            coverage.total_persons,
            coverage.percent()
        )?;
    }
    Ok(())
}

fn section(out: &mut String, source: DataSource, sources: &SourceReport) -> fmt::Result {
    writeln!(out, "{}:", title_case(source))?;
    if let SourceStatus::Unavailable { message } = sources.get(source) {
        writeln!(out, "  Service unavailable: {}", message)?;
    }
    Ok(())
}

fn unavailable_sources(out: &mut String, sources: &SourceReport) -> fmt::Result {
    for source in [DataSource::ResearchDb, DataSource::ThesisDb] {
        if let SourceStatus::Unavailable { message } = sources.get(source) {
            writeln!(out, "Warning: {} unavailable: {}", source, message)?;
        }
    }
    Ok(())
}

fn narrative(out: &mut String, heading: &str, narrative: &Narrative) -> fmt::Result {
    match narrative {
        Narrative::Generated { text, model, .. } => {
            writeln!(out, "{} ({}):", heading, model)?;
            writeln!(out, "{}", text)?;
        }
        Narrative::Unavailable { reason } => {
            writeln!(out, "{}: analysis unavailable ({})", heading, reason)?;
        }
        Narrative::Skipped { reason } => {
            writeln!(out, "{}: {}", heading, reason)?;
        }
    }
    Ok(())
}

fn status_line(out: &mut String, name: &str, status: &SourceStatus) -> fmt::Result {
    match status {
        SourceStatus::Ok => writeln!(out, "{}: ok", name),
        SourceStatus::Unavailable { message } => {
            writeln!(out, "{}: unavailable ({})", name, message)
        }
    }
}

fn title_case(source: DataSource) -> String {
    let name = source.to_string();
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ResearcherProfile;

    fn lookup(sources: SourceReport, ai_analysis: Narrative) -> PersonLookup {
        PersonLookup {
            name: "Anders".to_string(),
            found_in_db1: false,
            found_in_db2: false,
            researcher_profiles: vec![],
            thesis_activities: vec![],
            sources,
            ai_analysis,
        }
    }

    #[test]
    fn test_not_found_and_unavailable_read_differently() {
        let mut sources = SourceReport::default();
        sources.record(
            DataSource::ThesisDb,
            SourceStatus::Unavailable {
                message: "connection refused".to_string(),
            },
        );
        let text = person_lookup(&lookup(
            sources,
            Narrative::Skipped {
                reason: "No records found for Anders".to_string(),
            },
        ));

        assert!(text.contains("Research database:\n  Not found"));
        assert!(text.contains("Thesis database:\n  Service unavailable: connection refused"));
        assert!(!text.contains("Thesis database:\n  Not found"));
    }

    #[test]
    fn test_analysis_unavailable_is_labelled() {
        let mut result = lookup(
            SourceReport::default(),
            Narrative::Unavailable {
                reason: "request timed out after 60s".to_string(),
            },
        );
        result.found_in_db1 = true;
        result.researcher_profiles.push(ResearcherProfile {
            name: "Anders Lind".to_string(),
            orcid_id: Some("0000-0001-2345-6789".to_string()),
            given_names: None,
            family_name: None,
            orcid_publication_count: None,
            search_date: None,
            total_publications: 12,
            affiliations: vec![],
        });

        let text = person_lookup(&result);

        assert!(text.contains("Anders Lind (12 publications)"));
        assert!(text.contains("ORCID: 0000-0001-2345-6789"));
        assert!(text.contains("Analysis: analysis unavailable (request timed out after 60s)"));
    }

    #[test]
    fn test_overview_unavailable_database() {
        let overview = DatabaseOverview {
            research_db: DatabaseStats {
                total_nodes: 10,
                ..DatabaseStats::default()
            },
            thesis_db: DatabaseStats {
                status: SourceStatus::Unavailable {
                    message: "timeout".to_string(),
                },
                ..DatabaseStats::default()
            },
        };

        let text = database_overview(&overview);

        assert!(text.contains("Nodes: 10"));
        assert!(text.contains("Thesis database\n  Service unavailable: timeout"));
    }
}
