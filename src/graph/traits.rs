//! Core trait for graph database access.

use async_trait::async_trait;

use crate::error::AppError;
use crate::graph::row::{Params, RowStream};

/// Executes read-only Cypher queries against a graph database.
///
/// Implementations must bind `params` as query parameters, never by
/// interpolating them into the query text.
#[async_trait]
pub trait CypherExecutor: Send + Sync {
    /// Executes a Cypher query and returns a stream of result rows.
    ///
    /// # Arguments
    ///
    /// * `cypher` - The Cypher query string
    /// * `params` - Parameters to bind to the query
    async fn execute_cypher(&self, cypher: &str, params: Params)
        -> Result<RowStream<'_>, AppError>;
}

#[async_trait]
impl<E: CypherExecutor + ?Sized> CypherExecutor for std::sync::Arc<E> {
    async fn execute_cypher(
        &self,
        cypher: &str,
        params: Params,
    ) -> Result<RowStream<'_>, AppError> {
        (**self).execute_cypher(cypher, params).await
    }
}
