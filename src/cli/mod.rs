//! CLI module for ResearchBook.
//!
//! Subcommands:
//! - `lookup`: Person lookup across both databases
//! - `experts`: Expert finder for a topic
//! - `brief`: Field intelligence brief
//! - `match`: Researcher matching by shared thesis keywords
//! - `overview`: Database overview
//! - `check`: Connectivity check of both databases and the model endpoint
//! - `models`: Models offered by the model endpoint
//! - `mcp`: Run the MCP server (stdio transport)

mod diagnostics;
mod mcp;
mod render;
mod research;

use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::Result;
use serde::Serialize;

use crate::config::Config;
use crate::context::Context;

/// ResearchBook - Academic intelligence over research graphs
#[derive(Parser)]
#[command(name = "researchbook")]
#[command(about = "Academic intelligence - person lookup, expert finding, field briefs and researcher matching")]
#[command(version)]
pub struct App {
    /// Run in verbose mode
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format for results
    #[arg(short, long, global = true, value_enum, default_value_t = Format::Text)]
    pub format: Format,

    #[command(subcommand)]
    pub command: Command,
}

/// How results are printed to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Human-readable report
    Text,
    /// Pretty-printed JSON
    Json,
    /// TOON (Token-Oriented Object Notation)
    Toon,
}

#[derive(Subcommand)]
pub enum Command {
    /// Look up a person in both databases
    Lookup {
        /// Full or partial name
        name: String,
    },

    /// Find experts on a topic
    Experts {
        /// Topic to search for
        topic: String,

        /// Maximum number of experts (1-20)
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Intelligence brief for a research field
    Brief {
        /// Research field, e.g. "sustainability"
        field: String,
    },

    /// Find collaboration candidates by shared thesis keywords
    Match {
        /// Full or partial name of the target researcher
        name: String,
    },

    /// Node, label and relationship counts of both databases
    Overview,

    /// Check connectivity of both databases and the model endpoint
    Check,

    /// List models offered by the model endpoint
    Models,

    /// Run the MCP server (stdio transport for local use)
    Mcp,
}

impl App {
    /// Run the CLI application.
    pub async fn run(self) -> Result<()> {
        let ctx = connect().await?;

        match &self.command {
            Command::Lookup { name } => self.run_lookup(&ctx, name).await,
            Command::Experts { topic, limit } => self.run_experts(&ctx, topic, *limit).await,
            Command::Brief { field } => self.run_brief(&ctx, field).await,
            Command::Match { name } => self.run_match(&ctx, name).await,
            Command::Overview => self.run_overview(&ctx).await,
            Command::Check => self.run_check(&ctx).await,
            Command::Models => self.run_models(&ctx).await,
            Command::Mcp => self.run_mcp(ctx).await,
        }
    }

    /// Print a result in the selected format, using `text` for [`Format::Text`].
    fn emit<T: Serialize>(&self, value: &T, text: impl FnOnce(&T) -> String) -> Result<()> {
        let out = match self.format {
            Format::Text => text(value),
            Format::Json => serde_json::to_string_pretty(value)?,
            Format::Toon => serde_toon::to_string(value)
                .map_err(|e| color_eyre::eyre::eyre!("TOON serialization error: {}", e))?,
        };
        println!("{}", out.trim_end());
        Ok(())
    }
}

async fn connect() -> Result<Context> {
    let config = Config::load()?;
    tracing::debug!(config = ?config, "Configuration loaded");
    Ok(Context::connect(config).await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_experts_with_global_flags() {
        let app = App::try_parse_from([
            "researchbook",
            "experts",
            "machine learning",
            "--limit",
            "5",
            "--format",
            "json",
            "-v",
        ])
        .unwrap();

        assert!(app.verbose);
        assert_eq!(app.format, Format::Json);
        match app.command {
            Command::Experts { topic, limit } => {
                assert_eq!(topic, "machine learning");
                assert_eq!(limit, Some(5));
            }
            _ => panic!("expected experts command"),
        }
    }

    #[test]
    fn test_format_defaults_to_text() {
        let app = App::try_parse_from(["researchbook", "overview"]).unwrap();
        assert_eq!(app.format, Format::Text);
        assert!(matches!(app.command, Command::Overview));
    }

    #[test]
    fn test_lookup_requires_name() {
        assert!(App::try_parse_from(["researchbook", "lookup"]).is_err());
    }
}
