//! Expert finder records and the cross-database merge.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::DataSource;

/// A person whose publications or employment mention the topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResearchExpert {
    pub name: String,
    #[serde(default)]
    pub orcid_id: Option<String>,
    pub relevant_publications: i64,
    #[serde(default)]
    pub organizations: Vec<String>,
    #[serde(default)]
    pub roles: Vec<String>,
}

/// A person whose theses mention the topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThesisExpert {
    pub name: String,
    pub relevant_theses: i64,
    /// Role edge types, e.g. `SUPERVISOR`, `EXAMINER`.
    #[serde(default)]
    pub roles: Vec<String>,
}

/// One entry of the merged expert list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpertCandidate {
    pub name: String,
    pub sources: Vec<DataSource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orcid_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relevant_publications: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relevant_theses: Option<i64>,
    #[serde(default)]
    pub organizations: Vec<String>,
    #[serde(default)]
    pub roles: Vec<String>,
}

impl From<&ResearchExpert> for ExpertCandidate {
    fn from(e: &ResearchExpert) -> Self {
        Self {
            name: e.name.clone(),
            sources: vec![DataSource::ResearchDb],
            orcid_id: e.orcid_id.clone(),
            relevant_publications: Some(e.relevant_publications),
            relevant_theses: None,
            organizations: e.organizations.clone(),
            roles: e.roles.clone(),
        }
    }
}

impl From<&ThesisExpert> for ExpertCandidate {
    fn from(e: &ThesisExpert) -> Self {
        Self {
            name: e.name.clone(),
            sources: vec![DataSource::ThesisDb],
            orcid_id: None,
            relevant_publications: None,
            relevant_theses: Some(e.relevant_theses),
            organizations: Vec::new(),
            roles: e.roles.clone(),
        }
    }
}

impl ExpertCandidate {
    fn absorb(&mut self, other: ExpertCandidate) {
        for source in other.sources {
            if !self.sources.contains(&source) {
                self.sources.push(source);
            }
        }
        self.orcid_id = self.orcid_id.take().or(other.orcid_id);
        self.relevant_publications = self.relevant_publications.or(other.relevant_publications);
        self.relevant_theses = self.relevant_theses.or(other.relevant_theses);
        union_into(&mut self.organizations, other.organizations);
        union_into(&mut self.roles, other.roles);
    }
}

fn union_into(target: &mut Vec<String>, items: Vec<String>) {
    for item in items {
        if !target.contains(&item) {
            target.push(item);
        }
    }
}

fn name_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Merge both expert lists into at most `limit` candidates.
///
/// Entries are taken alternately from each list in store rank order. People
/// appearing in both databases under the same name (case-insensitive) become
/// one candidate, even when the second sighting comes after the list is full.
pub fn merge_experts(
    research: &[ResearchExpert],
    thesis: &[ThesisExpert],
    limit: usize,
) -> Vec<ExpertCandidate> {
    let mut merged: Vec<ExpertCandidate> = Vec::with_capacity(limit);
    let mut index: HashMap<String, usize> = HashMap::new();

    let mut push = |candidate: ExpertCandidate| {
        let key = name_key(&candidate.name);
        match index.get(&key) {
            Some(&i) => merged[i].absorb(candidate),
            None if merged.len() < limit => {
                index.insert(key, merged.len());
                merged.push(candidate);
            }
            None => {}
        }
    };

    for i in 0..research.len().max(thesis.len()) {
        if let Some(e) = research.get(i) {
            push(e.into());
        }
        if let Some(e) = thesis.get(i) {
            push(e.into());
        }
    }

    merged
}
