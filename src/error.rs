//! Application error types with MCP protocol conversion.

use rmcp::model::ErrorCode;
use thiserror::Error;

use crate::llm::LlmError;
use crate::models::DataSource;

/// Application-level errors for ResearchBook.
#[derive(Error, Debug)]
pub enum AppError {
    // Neo4j errors
    #[error("Neo4j connection error: {0}")]
    Connection(#[from] neo4rs::Error),

    #[error("Neo4j query error: {message}")]
    Query { message: String, query: String },

    // Domain errors
    #[error("No thesis data found for {0}")]
    NoThesisData(String),

    #[error("{database} is unavailable: {message}")]
    SourceUnavailable {
        database: DataSource,
        message: String,
    },

    #[error("Validation error: {0}")]
    Validation(String),

    // Language model errors
    #[error("Language model error: {0}")]
    Llm(#[from] LlmError),

    // Config errors
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Short application code used in MCP error payloads.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Connection(_) => "CONNECTION_ERROR",
            AppError::Query { .. } => "QUERY_ERROR",
            AppError::NoThesisData(_) => "NO_THESIS_DATA",
            AppError::SourceUnavailable { .. } => "SOURCE_UNAVAILABLE",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Llm(_) => "LLM_ERROR",
            AppError::Config(_) => "CONFIG_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<AppError> for rmcp::model::ErrorData {
    fn from(err: AppError) -> Self {
        let code = match &err {
            AppError::NoThesisData(_) => ErrorCode::RESOURCE_NOT_FOUND,
            AppError::Validation(_) => ErrorCode::INVALID_PARAMS,
            AppError::SourceUnavailable { .. }
            | AppError::Connection(_)
            | AppError::Query { .. }
            | AppError::Llm(_)
            | AppError::Config(_)
            | AppError::Internal(_) => ErrorCode::INTERNAL_ERROR,
        };

        rmcp::model::ErrorData::new(code, format!("[{}] {}", err.code(), err), None)
    }
}
