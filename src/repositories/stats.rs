//! Shape queries shared by both databases.

use std::sync::Arc;

use crate::error::AppError;
use crate::graph::{CypherExecutor, QueryExt, Row};
use crate::models::{DatabaseStats, LabelCount, RelationshipTypeCount};

pub(crate) const PING_QUERY: &str = "RETURN 1 AS ok";

pub(crate) const TOTALS_QUERY: &str = "
CALL { MATCH (n) RETURN count(n) AS total_nodes }
CALL { MATCH ()-[r]->() RETURN count(r) AS total_relationships }
RETURN total_nodes, total_relationships";

pub(crate) const LABEL_COUNTS_QUERY: &str = "
MATCH (n)
WITH labels(n)[0] AS label
WHERE label IS NOT NULL
RETURN label, count(*) AS count
ORDER BY count DESC
LIMIT $limit";

pub(crate) const RELATIONSHIP_TYPES_QUERY: &str = "
MATCH ()-[r]->()
RETURN type(r) AS relationship_type, count(r) AS count
ORDER BY count DESC
LIMIT $limit";

pub(crate) const RELATIONSHIP_TYPE_COUNT_QUERY: &str = "
CALL db.relationshipTypes() YIELD relationshipType
RETURN count(relationshipType) AS relationship_type_count";

pub(crate) const ORCID_COVERAGE_QUERY: &str = "
MATCH (p:Person)
RETURN count(p) AS total_persons,
       count(CASE WHEN p.orcid_id IS NOT NULL AND p.orcid_id <> $not_found THEN 1 END) AS with_orcid";

/// Round-trips a trivial query.
pub(crate) async fn ping(db: &Arc<dyn CypherExecutor>) -> Result<(), AppError> {
    db.query(PING_QUERY).fetch_one().await?;
    Ok(())
}

/// Node, label and relationship counts, biggest first, `limit` entries per list.
pub(crate) async fn collect_stats(
    db: &Arc<dyn CypherExecutor>,
    limit: usize,
) -> Result<DatabaseStats, AppError> {
    let totals = db.query(TOTALS_QUERY).fetch_one().await?;
    let (total_nodes, total_relationships) = match totals {
        Some(row) => (
            row.get_opt::<i64>("total_nodes")?.unwrap_or_default(),
            row.get_opt::<i64>("total_relationships")?.unwrap_or_default(),
        ),
        None => (0, 0),
    };

    let labels = db
        .query(LABEL_COUNTS_QUERY)
        .param("limit", limit)
        .fetch_all()
        .await?
        .iter()
        .map(Row::decode::<LabelCount>)
        .collect::<Result<Vec<_>, _>>()?;

    let relationship_types = db
        .query(RELATIONSHIP_TYPES_QUERY)
        .param("limit", limit)
        .fetch_all()
        .await?
        .iter()
        .map(Row::decode::<RelationshipTypeCount>)
        .collect::<Result<Vec<_>, _>>()?;

    let relationship_type_count = match db.query(RELATIONSHIP_TYPE_COUNT_QUERY).fetch_one().await? {
        Some(row) => row
            .get_opt::<i64>("relationship_type_count")?
            .unwrap_or_default(),
        None => 0,
    };

    Ok(DatabaseStats {
        total_nodes,
        total_relationships,
        relationship_type_count,
        labels,
        relationship_types,
        ..DatabaseStats::default()
    })
}
