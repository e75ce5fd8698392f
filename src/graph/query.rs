//! Query builder for fluent Cypher query construction.

use futures::TryStreamExt;
use serde::Serialize;

use crate::error::AppError;
use crate::graph::row::{Params, Row, RowStream};
use crate::graph::traits::CypherExecutor;

/// A builder for constructing and executing Cypher queries.
///
/// `Query` provides a fluent API for adding parameters and executing
/// queries against any [`CypherExecutor`].
///
/// # Example
///
/// ```ignore
/// let rows = Query::new(&client, "MATCH (t:Thesis) WHERE toLower(t.title) CONTAINS toLower($topic) RETURN t.title AS title")
///     .param("topic", "machine learning")
///     .fetch_all()
///     .await?;
/// ```
pub struct Query<'a, E: CypherExecutor + ?Sized> {
    executor: &'a E,
    cypher: String,
    params: Params,
    // First parameter that failed to serialize, reported on execute
    param_error: Option<String>,
}

impl<'a, E: CypherExecutor + ?Sized> Query<'a, E> {
    /// Creates a new query builder.
    ///
    /// # Arguments
    ///
    /// * `executor` - The executor to run the query against
    /// * `cypher` - The Cypher query string
    pub fn new(executor: &'a E, cypher: &str) -> Self {
        Self {
            executor,
            cypher: cypher.to_string(),
            params: Params::new(),
            param_error: None,
        }
    }

    /// Adds a parameter to the query.
    ///
    /// Parameters are referenced in Cypher using `$name` syntax.
    ///
    /// # Arguments
    ///
    /// * `name` - The parameter name (without the $ prefix)
    /// * `value` - The parameter value (must be serializable)
    ///
    /// A value that cannot be serialized to JSON makes the query fail with
    /// [`AppError::Validation`] when it is executed.
    pub fn param<T: Serialize>(mut self, name: &str, value: T) -> Self {
        match serde_json::to_value(value) {
            Ok(json_value) => {
                self.params.insert(name.to_string(), json_value);
            }
            Err(e) => {
                self.param_error
                    .get_or_insert_with(|| format!("parameter '{}': {}", name, e));
            }
        }
        self
    }

    /// Executes the query and returns a stream of rows.
    ///
    /// Use this for memory-efficient iteration over large result sets.
    /// Rows are fetched on-demand.
    pub async fn execute(self) -> Result<RowStream<'a>, AppError> {
        if let Some(message) = self.param_error {
            return Err(AppError::Validation(message));
        }
        self.executor
            .execute_cypher(&self.cypher, self.params)
            .await
    }

    /// Executes the query and collects all rows into a vector.
    ///
    /// This is a convenience method for small result sets. For large
    /// results, use [`execute`](Query::execute) and stream the rows.
    pub async fn fetch_all(self) -> Result<Vec<Row>, AppError> {
        self.execute().await?.try_collect().await
    }

    /// Executes the query and returns the first row, if any.
    pub async fn fetch_one(self) -> Result<Option<Row>, AppError> {
        let mut stream = self.execute().await?;
        use futures::StreamExt;
        stream.next().await.transpose()
    }
}

/// Extension trait providing a convenient `query()` method.
///
/// This trait is automatically implemented for all [`CypherExecutor`]
/// types, allowing you to write `executor.query("...")` instead of
/// `Query::new(&executor, "...")`.
pub trait QueryExt: CypherExecutor {
    /// Creates a new query builder for this executor.
    ///
    /// # Example
    ///
    /// ```ignore
    /// use researchbook::graph::QueryExt;
    ///
    /// let rows = client.query("MATCH (p:Person) RETURN p.name AS name LIMIT $limit")
    ///     .param("limit", 10)
    ///     .fetch_all()
    ///     .await?;
    /// ```
    fn query(&self, cypher: &str) -> Query<'_, Self>
    where
        Self: Sized,
    {
        Query::new(self, cypher)
    }
}

// Blanket implementation for all CypherExecutor types
impl<E: CypherExecutor> QueryExt for E {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    // Mock executor for testing
    struct MockExecutor {
        expected_cypher: String,
        expected_params: Params,
    }

    #[async_trait::async_trait]
    impl CypherExecutor for MockExecutor {
        async fn execute_cypher(
            &self,
            cypher: &str,
            params: Params,
        ) -> Result<RowStream<'_>, AppError> {
            assert_eq!(cypher, self.expected_cypher);
            assert_eq!(params, self.expected_params);
            // Return empty stream
            Ok(Box::pin(futures::stream::empty()))
        }
    }

    #[tokio::test]
    async fn test_query_no_params() {
        let executor = MockExecutor {
            expected_cypher: "MATCH (n) RETURN n".to_string(),
            expected_params: HashMap::new(),
        };

        let result = executor.query("MATCH (n) RETURN n").fetch_all().await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_query_with_params() {
        let mut expected_params = HashMap::new();
        expected_params.insert("name".to_string(), serde_json::json!("Anders"));
        expected_params.insert("limit".to_string(), serde_json::json!(10));

        let executor = MockExecutor {
            expected_cypher: "MATCH (p:Person) WHERE p.name = $name RETURN p LIMIT $limit".to_string(),
            expected_params,
        };

        let result = executor
            .query("MATCH (p:Person) WHERE p.name = $name RETURN p LIMIT $limit")
            .param("name", "Anders")
            .param("limit", 10)
            .fetch_all()
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_query_unserializable_param_is_validation_error() {
        struct Unserializable;
        impl Serialize for Unserializable {
            fn serialize<S: serde::Serializer>(&self, _: S) -> Result<S::Ok, S::Error> {
                Err(serde::ser::Error::custom("not representable"))
            }
        }

        let executor = MockExecutor {
            expected_cypher: String::new(),
            expected_params: HashMap::new(),
        };
        let result = executor
            .query("MATCH (n) WHERE n.x = $x RETURN n")
            .param("x", Unserializable)
            .fetch_all()
            .await;
        assert!(matches!(result, Err(AppError::Validation(m)) if m.contains("'x'")));
    }
}
