//! Check and models command handlers.

use color_eyre::Result;

use crate::context::Context;
use crate::di::FromRef;
use crate::services::DiagnosticsService;

use super::{render, App};

impl App {
    /// Reports every dependency, then fails if any is unreachable.
    pub async fn run_check(&self, ctx: &Context) -> Result<()> {
        let report = DiagnosticsService::from_ref(ctx).check().await;
        self.emit(&report, render::connectivity)?;

        if !report.all_ok() {
            color_eyre::eyre::bail!("One or more services are unavailable");
        }
        Ok(())
    }

    pub async fn run_models(&self, ctx: &Context) -> Result<()> {
        let models = DiagnosticsService::from_ref(ctx).list_models().await?;
        tracing::info!(count = models.len(), "Models listed");
        self.emit(&models, |m| render::models(m))
    }
}
