//! Database overview statistics.

use serde::{Deserialize, Serialize};

use super::SourceStatus;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelCount {
    pub label: String,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipTypeCount {
    pub relationship_type: String,
    pub count: i64,
}

/// How many people in the research database carry a real ORCID iD.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrcidCoverage {
    pub total_persons: i64,
    pub with_orcid: i64,
}

impl OrcidCoverage {
    /// Share of people with an ORCID iD, in percent.
    pub fn percent(&self) -> f64 {
        if self.total_persons == 0 {
            0.0
        } else {
            self.with_orcid as f64 * 100.0 / self.total_persons as f64
        }
    }
}

/// Shape of one database.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatabaseStats {
    pub status: SourceStatus,
    pub total_nodes: i64,
    pub total_relationships: i64,
    pub relationship_type_count: i64,
    /// Largest labels first.
    pub labels: Vec<LabelCount>,
    /// Most frequent relationship types first.
    pub relationship_types: Vec<RelationshipTypeCount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orcid_coverage: Option<OrcidCoverage>,
}
