//! Which database a piece of data came from, and whether it answered.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the two graph databases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    /// Researchers, publications, organizations ("db1").
    ResearchDb,
    /// Theses and academic roles ("db2").
    ThesisDb,
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::ResearchDb => f.write_str("research database"),
            DataSource::ThesisDb => f.write_str("thesis database"),
        }
    }
}

/// Outcome of querying one database for a report.
///
/// `Ok` with zero rows means "not found"; `Unavailable` means the database
/// could not be asked at all.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SourceStatus {
    #[default]
    Ok,
    Unavailable { message: String },
}

impl SourceStatus {
    pub fn is_available(&self) -> bool {
        matches!(self, SourceStatus::Ok)
    }
}

/// Per-database status attached to every report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceReport {
    pub research_db: SourceStatus,
    pub thesis_db: SourceStatus,
}

impl SourceReport {
    /// Status for a single database.
    pub fn get(&self, source: DataSource) -> &SourceStatus {
        match source {
            DataSource::ResearchDb => &self.research_db,
            DataSource::ThesisDb => &self.thesis_db,
        }
    }

    /// Merge a status in, keeping the first failure seen for that database.
    pub fn record(&mut self, source: DataSource, status: SourceStatus) {
        let slot = match source {
            DataSource::ResearchDb => &mut self.research_db,
            DataSource::ThesisDb => &mut self.thesis_db,
        };
        if slot.is_available() {
            *slot = status;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_keeps_first_failure() {
        let mut report = SourceReport::default();
        report.record(
            DataSource::ThesisDb,
            SourceStatus::Unavailable {
                message: "first".to_string(),
            },
        );
        report.record(DataSource::ThesisDb, SourceStatus::Ok);
        report.record(
            DataSource::ThesisDb,
            SourceStatus::Unavailable {
                message: "second".to_string(),
            },
        );

        assert!(report.research_db.is_available());
        assert_eq!(
            report.get(DataSource::ThesisDb),
            &SourceStatus::Unavailable {
                message: "first".to_string()
            }
        );
    }

    #[test]
    fn test_status_serializes_with_tag() {
        let json = serde_json::to_value(SourceStatus::Unavailable {
            message: "timeout".to_string(),
        })
        .unwrap();
        assert_eq!(
            json,
            serde_json::json!({"status": "unavailable", "message": "timeout"})
        );
    }
}
