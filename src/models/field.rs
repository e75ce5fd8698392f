//! Field intelligence records.

use serde::{Deserialize, Serialize};

/// A person active in a research field, from the thesis database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldResearcher {
    pub name: String,
    #[serde(default)]
    pub thesis_roles: Vec<String>,
    pub thesis_count: i64,
    #[serde(default)]
    pub sample_titles: Vec<String>,
}

/// Number of matching thesis records created in one year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearlyActivity {
    pub year: i64,
    pub count: i64,
}

/// Recent activity histogram, newest year first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldTrends {
    pub yearly_activity: Vec<YearlyActivity>,
    pub total_recent: i64,
}

impl FieldTrends {
    pub fn new(yearly_activity: Vec<YearlyActivity>) -> Self {
        let total_recent = yearly_activity.iter().map(|y| y.count).sum();
        Self {
            yearly_activity,
            total_recent,
        }
    }
}
