//! Researcher matching records.

use serde::{Deserialize, Serialize};

/// A candidate sharing thesis keywords with the target researcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResearcherMatch {
    pub name: String,
    /// Number of the candidate's theses carrying at least one target keyword.
    pub relevance: i64,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub sample_work: Vec<String>,
}
