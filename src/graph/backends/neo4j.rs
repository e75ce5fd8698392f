//! Neo4j backend over the Bolt protocol.
//!
//! # Example
//!
//! ```ignore
//! use researchbook::graph::backends::neo4j::Neo4jClient;
//! use researchbook::graph::QueryExt;
//!
//! let client = Neo4jClient::connect(&config.research_db).await?;
//!
//! let rows = client.query("MATCH (p:Person) RETURN p.name AS name LIMIT $limit")
//!     .param("limit", 10)
//!     .fetch_all()
//!     .await?;
//! ```

use std::collections::HashMap;

use async_stream::try_stream;
use async_trait::async_trait;
use neo4rs::{
    BoltBoolean, BoltFloat, BoltInteger, BoltList, BoltMap, BoltNull, BoltString, BoltType,
    ConfigBuilder, Graph,
};
use serde_json::Value as JsonValue;

use crate::config::GraphDbConfig;
use crate::error::AppError;
use crate::graph::guard::ensure_read_only;
use crate::graph::row::{Params, Row, RowStream};
use crate::graph::traits::CypherExecutor;

/// Read-only client for one Neo4j database.
///
/// This type is cheap to clone - `neo4rs::Graph` shares its connection pool.
#[derive(Clone)]
pub struct Neo4jClient {
    graph: Graph,
}

impl Neo4jClient {
    /// Opens a connection pool for the configured database.
    ///
    /// The driver connects lazily, so an unreachable server usually surfaces
    /// on the first query rather than here.
    pub async fn connect(config: &GraphDbConfig) -> Result<Self, AppError> {
        let neo4j_config = ConfigBuilder::default()
            .uri(config.uri.as_str())
            .user(config.user.as_str())
            .password(config.password.expose())
            .db(config.database.as_str())
            .fetch_size(config.fetch_size)
            .max_connections(config.max_connections)
            .build()?;
        let graph = Graph::connect(neo4j_config).await?;

        tracing::debug!(uri = %config.uri, database = %config.database, "Neo4j pool ready");
        Ok(Self { graph })
    }
}

#[async_trait]
impl CypherExecutor for Neo4jClient {
    async fn execute_cypher(
        &self,
        cypher: &str,
        params: Params,
    ) -> Result<RowStream<'_>, AppError> {
        ensure_read_only(cypher)?;

        let mut query = neo4rs::query(cypher);
        for (name, value) in params {
            query = query.param(&name, json_to_bolt(value));
        }

        let graph = self.graph.clone();
        let cypher = cypher.to_string();

        Ok(Box::pin(try_stream! {
            let mut result = graph.execute(query).await.map_err(|e| AppError::Query {
                message: format!("Cypher query failed: {}", e),
                query: cypher.clone(),
            })?;

            while let Some(row) = result.next().await.map_err(|e| AppError::Query {
                message: format!("Failed to fetch row: {}", e),
                query: cypher.clone(),
            })? {
                yield parse_bolt_row(&row)?;
            }
        }))
    }
}

/// Converts a driver row into a [`Row`] keyed by column alias.
fn parse_bolt_row(row: &neo4rs::Row) -> Result<Row, AppError> {
    let columns: HashMap<String, BoltType> = row
        .to()
        .map_err(|e| AppError::Internal(format!("Failed to decode Bolt row: {}", e)))?;

    Ok(Row::new(
        columns
            .into_iter()
            .map(|(k, v)| (k, bolt_to_json(v)))
            .collect(),
    ))
}

/// Maps Bolt values onto JSON.
///
/// Temporal and graph values fall back to their debug rendering; queries
/// convert dates with `toString()` before returning them.
fn bolt_to_json(value: BoltType) -> JsonValue {
    match value {
        BoltType::Null(_) => JsonValue::Null,
        BoltType::Boolean(b) => JsonValue::Bool(b.value),
        BoltType::Integer(i) => JsonValue::from(i.value),
        BoltType::Float(f) => serde_json::Number::from_f64(f.value)
            .map(JsonValue::Number)
            .unwrap_or(JsonValue::Null),
        BoltType::String(s) => JsonValue::String(s.value),
        BoltType::List(list) => JsonValue::Array(list.value.into_iter().map(bolt_to_json).collect()),
        BoltType::Map(map) => JsonValue::Object(
            map.value
                .into_iter()
                .map(|(k, v)| (k.value, bolt_to_json(v)))
                .collect(),
        ),
        other => JsonValue::String(format!("{:?}", other)),
    }
}

/// Maps JSON parameters onto Bolt values.
fn json_to_bolt(value: JsonValue) -> BoltType {
    match value {
        JsonValue::Null => BoltType::Null(BoltNull),
        JsonValue::Bool(b) => BoltType::Boolean(BoltBoolean::new(b)),
        JsonValue::Number(n) => match n.as_i64() {
            Some(i) => BoltType::Integer(BoltInteger::new(i)),
            None => BoltType::Float(BoltFloat::new(n.as_f64().unwrap_or_default())),
        },
        JsonValue::String(s) => BoltType::String(BoltString::from(s)),
        JsonValue::Array(items) => BoltType::List(BoltList {
            value: items.into_iter().map(json_to_bolt).collect(),
        }),
        JsonValue::Object(entries) => {
            let mut map = BoltMap::new();
            for (k, v) in entries {
                map.put(BoltString::from(k), json_to_bolt(v));
            }
            BoltType::Map(map)
        }
    }
}
