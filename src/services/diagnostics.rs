//! Connectivity checks for both databases and the model endpoint.

use serde::{Deserialize, Serialize};

use crate::context::{AppLlm, Context};
use crate::di::FromContext;
use crate::error::AppError;
use crate::models::{DataSource, SourceStatus};
use crate::repositories::{ResearchRepository, ThesisRepository};

/// Reachability of every external dependency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectivityReport {
    pub research_db: SourceStatus,
    pub thesis_db: SourceStatus,
    pub llm: SourceStatus,
    /// Model configured for narratives.
    pub model: String,
}

impl ConnectivityReport {
    pub fn all_ok(&self) -> bool {
        self.research_db.is_available() && self.thesis_db.is_available() && self.llm.is_available()
    }
}

#[derive(FromContext, Clone)]
pub struct DiagnosticsService {
    research: ResearchRepository,
    thesis: ThesisRepository,
    llm: AppLlm,
}

impl DiagnosticsService {
    /// Pings both databases and lists models, all at once.
    pub async fn check(&self) -> ConnectivityReport {
        let (research, thesis, models) = tokio::join!(
            self.research.ping(),
            self.thesis.ping(),
            self.llm.list_models()
        );

        let llm = match models {
            Ok(models) => {
                tracing::debug!(count = models.len(), "Model endpoint reachable");
                SourceStatus::Ok
            }
            Err(e) => {
                tracing::warn!(error = %e, "Model endpoint unreachable");
                SourceStatus::Unavailable {
                    message: e.to_string(),
                }
            }
        };

        ConnectivityReport {
            research_db: ping_status(DataSource::ResearchDb, research),
            thesis_db: ping_status(DataSource::ThesisDb, thesis),
            llm,
            model: self.llm.model().to_string(),
        }
    }

    /// Model ids offered by the endpoint.
    pub async fn list_models(&self) -> Result<Vec<String>, AppError> {
        Ok(self.llm.list_models().await?)
    }
}

fn ping_status(source: DataSource, result: Result<(), AppError>) -> SourceStatus {
    match result {
        Ok(()) => SourceStatus::Ok,
        Err(e) => {
            tracing::warn!(database = %source, error = %e, "Ping failed");
            SourceStatus::Unavailable {
                message: e.to_string(),
            }
        }
    }
}
