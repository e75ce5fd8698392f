//! Application context providing dependency injection root.

use std::ops::Deref;
use std::sync::Arc;

use crate::config::{Config, Limits, PromptFormat};
use crate::di::Context as ContextDerive;
use crate::error::AppError;
use crate::graph::backends::neo4j::Neo4jClient;
use crate::graph::CypherExecutor;
use crate::llm::{ChatCompletion, OpenAiClient};

/// Researchers, publications and organizations ("db1").
#[derive(Clone)]
pub struct ResearchDb(pub Arc<dyn CypherExecutor>);

/// Theses and academic roles ("db2").
#[derive(Clone)]
pub struct ThesisDb(pub Arc<dyn CypherExecutor>);

impl Deref for ResearchDb {
    type Target = Arc<dyn CypherExecutor>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Deref for ThesisDb {
    type Target = Arc<dyn CypherExecutor>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Shared chat-completion client.
pub type AppLlm = Arc<dyn ChatCompletion>;

/// Root application context for dependency injection.
///
/// The Context holds all shared dependencies and uses `#[derive(Context)]`
/// to generate `FromRef` implementations for each field, enabling
/// compile-time dependency resolution. The whole `Config` is not
/// extractable; repositories and services pick the pieces they need with
/// `#[from_context(with = "...")]`.
#[derive(ContextDerive, Clone)]
pub struct Context {
    pub research_db: ResearchDb,
    pub thesis_db: ThesisDb,
    pub llm: AppLlm,
    #[context(skip)]
    pub config: Arc<Config>,
}

impl Context {
    /// Creates a context from already-built clients.
    pub fn new(
        research_db: Arc<dyn CypherExecutor>,
        thesis_db: Arc<dyn CypherExecutor>,
        llm: AppLlm,
        config: Config,
    ) -> Self {
        Self {
            research_db: ResearchDb(research_db),
            thesis_db: ThesisDb(thesis_db),
            llm,
            config: Arc::new(config),
        }
    }

    /// Opens both database pools and the model client.
    pub async fn connect(config: Config) -> Result<Self, AppError> {
        tracing::info!(uri = %config.research_db.uri, "Connecting to research database");
        let research = Neo4jClient::connect(&config.research_db).await?;

        tracing::info!(uri = %config.thesis_db.uri, "Connecting to thesis database");
        let thesis = Neo4jClient::connect(&config.thesis_db).await?;

        let llm = OpenAiClient::new(&config.llm)?;
        tracing::info!(base_url = %config.llm.base_url, model = %config.llm.model, "Model client ready");

        Ok(Self::new(
            Arc::new(research),
            Arc::new(thesis),
            Arc::new(llm),
            config,
        ))
    }

    /// Result-size caps, for `#[from_context(with = "Context::limits")]`.
    pub fn limits(ctx: &Context) -> Limits {
        ctx.config.limits.clone()
    }

    /// Prompt rendering format, for `#[from_context(with = "Context::prompt_format")]`.
    pub fn prompt_format(ctx: &Context) -> PromptFormat {
        ctx.config.llm.prompt_format
    }
}
