//! Person lookup records.

use serde::{Deserialize, Serialize};

/// A researcher profile from the research database.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResearcherProfile {
    pub name: String,
    /// ORCID iD. The store's `NOT_FOUND` sentinel is normalized to `None`.
    #[serde(default)]
    pub orcid_id: Option<String>,
    #[serde(default)]
    pub given_names: Option<String>,
    #[serde(default)]
    pub family_name: Option<String>,
    /// Publication count reported by ORCID.
    #[serde(default)]
    pub orcid_publication_count: Option<i64>,
    /// When the ORCID search ran, as stored.
    #[serde(default)]
    pub search_date: Option<String>,
    /// `AUTHORED` edges in the graph.
    #[serde(default)]
    pub total_publications: i64,
    #[serde(default)]
    pub affiliations: Vec<Affiliation>,
}

/// A `WORKED_AT` edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Affiliation {
    pub organization: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub start_year: Option<i64>,
    #[serde(default)]
    pub end_year: Option<i64>,
}

/// A person's involvement in one thesis, from the thesis database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThesisActivity {
    pub name: String,
    /// Role edge type, e.g. `SUPERVISOR`.
    pub role: String,
    #[serde(default)]
    pub thesis_title: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub created_date: Option<String>,
}

/// ORCID iD value the enrichment job writes when no match was found.
pub(crate) const ORCID_NOT_FOUND: &str = "NOT_FOUND";

/// `None` unless the stored value is a real ORCID iD.
pub(crate) fn real_orcid(id: Option<String>) -> Option<String> {
    id.filter(|id| !id.is_empty() && id != ORCID_NOT_FOUND)
}

impl ResearcherProfile {
    /// Drop sentinel values and empty affiliation entries left by OPTIONAL MATCH.
    pub(crate) fn normalized(mut self) -> Self {
        self.orcid_id = real_orcid(self.orcid_id.take());
        self.affiliations.retain(|a| !a.organization.is_empty());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(orcid: Option<&str>) -> ResearcherProfile {
        ResearcherProfile {
            name: "Anders Svensson".to_string(),
            orcid_id: orcid.map(str::to_string),
            given_names: None,
            family_name: None,
            orcid_publication_count: None,
            search_date: None,
            total_publications: 0,
            affiliations: vec![],
        }
    }

    #[test]
    fn test_normalized_drops_not_found_sentinel() {
        assert_eq!(profile(Some("NOT_FOUND")).normalized().orcid_id, None);
        assert_eq!(
            profile(Some("0000-0002-1825-0097")).normalized().orcid_id,
            Some("0000-0002-1825-0097".to_string())
        );
    }
}
