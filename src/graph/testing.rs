//! Scripted executor for repository and service tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value as JsonValue;

use crate::error::AppError;
use crate::graph::row::{Params, Row, RowStream};
use crate::graph::traits::CypherExecutor;

enum Reply {
    Rows(Vec<Row>),
    Fail(String),
}

/// Answers queries by exact text with canned rows.
///
/// Unknown queries return no rows. Every call is recorded so tests can
/// assert on bound parameters.
#[derive(Default)]
pub struct ScriptedExecutor {
    replies: HashMap<String, Reply>,
    unavailable: Option<String>,
    calls: Mutex<Vec<(String, Params)>>,
}

impl ScriptedExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every query fails as if the database were unreachable.
    pub fn unavailable(message: &str) -> Self {
        Self {
            unavailable: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn with_rows(mut self, cypher: &str, rows: Vec<JsonValue>) -> Self {
        self.replies.insert(
            cypher.to_string(),
            Reply::Rows(rows.into_iter().map(Row::from).collect()),
        );
        self
    }

    pub fn with_failure(mut self, cypher: &str, message: &str) -> Self {
        self.replies
            .insert(cypher.to_string(), Reply::Fail(message.to_string()));
        self
    }

    fn calls(&self) -> Vec<(String, Params)> {
        self.calls.lock().unwrap().clone()
    }

    /// Parameters of the first call made with `cypher`.
    pub fn params_for(&self, cypher: &str) -> Option<Params> {
        self.calls()
            .into_iter()
            .find(|(q, _)| q == cypher)
            .map(|(_, p)| p)
    }
}

#[async_trait]
impl CypherExecutor for ScriptedExecutor {
    async fn execute_cypher(
        &self,
        cypher: &str,
        params: Params,
    ) -> Result<RowStream<'_>, AppError> {
        self.calls
            .lock()
            .unwrap()
            .push((cypher.to_string(), params));

        if let Some(message) = &self.unavailable {
            return Err(AppError::Query {
                message: message.clone(),
                query: cypher.to_string(),
            });
        }

        match self.replies.get(cypher) {
            Some(Reply::Rows(rows)) => {
                let rows: Vec<Result<Row, AppError>> = rows.iter().cloned().map(Ok).collect();
                Ok(Box::pin(futures::stream::iter(rows)))
            }
            Some(Reply::Fail(message)) => Err(AppError::Query {
                message: message.clone(),
                query: cypher.to_string(),
            }),
            None => Ok(Box::pin(futures::stream::empty())),
        }
    }
}
