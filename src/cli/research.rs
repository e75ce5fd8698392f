//! Research command handlers: lookup, experts, brief, match, overview.

use color_eyre::Result;
use serde::Serialize;

use crate::context::Context;
use crate::di::FromRef;
use crate::error::AppError;
use crate::services::ResearchService;

use super::{render, App};

/// Printed instead of a report when the target has nothing to match on.
#[derive(Serialize)]
struct NotFound<'a> {
    target_researcher: &'a str,
    code: &'static str,
    message: String,
}

impl App {
    pub async fn run_lookup(&self, ctx: &Context, name: &str) -> Result<()> {
        let lookup = ResearchService::from_ref(ctx).lookup_person(name).await?;
        self.emit(&lookup, render::person_lookup)
    }

    pub async fn run_experts(&self, ctx: &Context, topic: &str, limit: Option<usize>) -> Result<()> {
        let search = ResearchService::from_ref(ctx)
            .find_expert(topic, limit)
            .await?;
        self.emit(&search, render::expert_search)
    }

    pub async fn run_brief(&self, ctx: &Context, field: &str) -> Result<()> {
        let brief = ResearchService::from_ref(ctx)
            .generate_field_brief(field)
            .await?;
        self.emit(&brief, render::field_brief)
    }

    /// A target without keyword-bearing theses is reported, not raised.
    pub async fn run_match(&self, ctx: &Context, name: &str) -> Result<()> {
        match ResearchService::from_ref(ctx).match_researchers(name).await {
            Ok(matches) => self.emit(&matches, render::researcher_matches),
            Err(err @ AppError::NoThesisData(_)) => {
                let not_found = NotFound {
                    target_researcher: name,
                    code: err.code(),
                    message: err.to_string(),
                };
                self.emit(&not_found, |n| n.message.clone())
            }
            Err(err) => Err(err.into()),
        }
    }

    pub async fn run_overview(&self, ctx: &Context) -> Result<()> {
        let overview = ResearchService::from_ref(ctx).database_overview().await;
        self.emit(&overview, render::database_overview)
    }
}
