//! Data access layer, one repository per database.
//!
//! Repositories own the Cypher text for their store and decode rows into
//! typed records, using the `FromContext` derive macro for dependency
//! injection. Every query that can fan out carries `LIMIT $limit`.

mod research;
mod stats;
mod thesis;

use serde::de::DeserializeOwned;

use crate::graph::Row;

pub use research::ResearchRepository;
pub use thesis::ThesisRepository;

#[cfg(test)]
pub(crate) use research::{RESEARCH_EXPERTS_QUERY, RESEARCH_PROFILES_QUERY};
#[cfg(test)]
pub(crate) use stats::{
    LABEL_COUNTS_QUERY, ORCID_COVERAGE_QUERY, PING_QUERY, RELATIONSHIP_TYPES_QUERY,
    RELATIONSHIP_TYPE_COUNT_QUERY, TOTALS_QUERY,
};
#[cfg(test)]
pub(crate) use thesis::{
    FIELD_RESEARCHERS_QUERY, FIELD_TRENDS_QUERY, KEYWORD_MATCHES_QUERY, TARGET_KEYWORDS_QUERY,
    THESIS_ACTIVITIES_QUERY, THESIS_EXPERTS_QUERY,
};

/// Decodes every row that fits `T`. Rows that don't are logged and skipped,
/// so one malformed node never hides the rest of the result.
fn decode_rows<T: DeserializeOwned>(rows: &[Row], record: &'static str) -> Vec<T> {
    rows.iter()
        .filter_map(|row| match row.decode::<T>() {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(record, error = %e, "Skipping undecodable row");
                None
            }
        })
        .collect()
}
