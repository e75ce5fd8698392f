//! Configuration with layered resolution using figment.
//!
//! Resolution order (highest priority last):
//! 1. User config: `~/.config/researchbook/config.toml` (XDG) or platform config dir
//! 2. Project config: `.researchbook.toml`
//! 3. Environment variables: `RESEARCHBOOK_*`, nested keys separated by `__`
//!
//! # Intended Usage
//!
//! **Global config** (`~/.config/researchbook/config.toml`):
//! ```toml
//! [research_db]
//! uri = "neo4j+s://research.databases.neo4j.io"
//! user = "neo4j"
//!
//! [thesis_db]
//! uri = "neo4j+s://thesis.databases.neo4j.io"
//! user = "neo4j"
//!
//! [llm]
//! base_url = "https://llm.example.org:4000/v1"
//! model = "claude-sonnet-4"
//! ```
//!
//! Secrets never live in the files above. Supply them through the environment:
//!
//! ```text
//! RESEARCHBOOK_RESEARCH_DB__PASSWORD=...
//! RESEARCHBOOK_THESIS_DB__PASSWORD=...
//! RESEARCHBOOK_LLM__API_KEY=...
//! ```

use std::fmt;
use std::ops::Deref;
use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::Deserialize;

/// Boxed wrapper for figment::Error to reduce Result size on the stack.
#[derive(Debug)]
pub struct ConfigError(Box<figment::Error>);

impl Deref for ConfigError {
    type Target = figment::Error;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self(Box::new(err))
    }
}

/// A credential that never shows up in `Debug` output or logs.
#[derive(Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The raw secret, for handing to a driver or an HTTP header.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(***)")
    }
}

/// Root configuration structure.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Researchers, publications and organizations.
    pub research_db: GraphDbConfig,
    /// Theses and academic roles.
    pub thesis_db: GraphDbConfig,
    pub llm: LlmConfig,
    #[serde(default)]
    pub limits: Limits,
}

/// Connection settings for one Neo4j database.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphDbConfig {
    /// Bolt URI, e.g. `neo4j+s://xxxx.databases.neo4j.io`.
    pub uri: String,
    #[serde(default = "default_user")]
    pub user: String,
    #[serde(default)]
    pub password: Secret,
    /// Database name inside the server.
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: usize,
    #[serde(default = "default_fetch_size")]
    pub fetch_size: usize,
}

/// How structured data is rendered inside prompts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptFormat {
    /// Pretty-printed JSON.
    #[default]
    Json,
    /// TOON, noticeably fewer tokens for tabular data.
    Toon,
}

/// Chat-completion endpoint settings.
#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    /// Base URL including the version prefix, e.g. `https://host:4000/v1`.
    pub base_url: String,
    /// Bearer token. Keyless endpoints leave this unset.
    #[serde(default)]
    pub api_key: Option<Secret>,
    pub model: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Retry a connection-level failure once without certificate verification.
    #[serde(default)]
    pub insecure_retry: bool,
    #[serde(default)]
    pub prompt_format: PromptFormat,
}

/// Hard ceiling on target keywords, whatever `limits.keyword_cap` says.
pub const MAX_TARGET_KEYWORDS: usize = 10;

/// Result-size caps applied before anything is returned or sent to the model.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Limits {
    pub profile_limit: usize,
    pub activity_limit: usize,
    pub expert_default_limit: usize,
    pub expert_max_limit: usize,
    pub field_researchers_limit: usize,
    pub trend_since_year: i64,
    pub trend_years: usize,
    pub keyword_cap: usize,
    pub match_limit: usize,
    pub sample_titles: usize,
    pub overview_limit: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            profile_limit: 10,
            activity_limit: 25,
            expert_default_limit: 10,
            expert_max_limit: 20,
            field_researchers_limit: 15,
            trend_since_year: 2020,
            trend_years: 10,
            keyword_cap: 10,
            match_limit: 10,
            sample_titles: 2,
            overview_limit: 15,
        }
    }
}

impl Limits {
    /// Clamp a requested expert count into `1..=expert_max_limit`.
    ///
    /// `None` falls back to `expert_default_limit`.
    pub fn expert_limit(&self, requested: Option<usize>) -> usize {
        let max = self.expert_max_limit.max(1);
        requested
            .unwrap_or(self.expert_default_limit)
            .clamp(1, max)
    }

    /// Target keywords to use for matching, in `1..=MAX_TARGET_KEYWORDS`.
    pub fn target_keywords(&self) -> usize {
        self.keyword_cap.clamp(1, MAX_TARGET_KEYWORDS)
    }
}

fn default_user() -> String {
    "neo4j".to_string()
}

fn default_database() -> String {
    "neo4j".to_string()
}

fn default_max_connections() -> usize {
    8
}

fn default_fetch_size() -> usize {
    200
}

fn default_timeout_secs() -> u64 {
    60
}

/// Environment prefix for all overrides.
pub const ENV_PREFIX: &str = "RESEARCHBOOK_";

/// Project-level config file, looked up in the working directory.
pub const PROJECT_CONFIG_FILE: &str = ".researchbook.toml";

impl Config {
    /// Load config with layered resolution (user → project → env).
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::user_config_path(), Path::new(PROJECT_CONFIG_FILE))
    }

    /// Load config from explicit file locations, still honoring the environment.
    ///
    /// Missing files are skipped.
    pub fn load_from(user_config: &Path, project_config: &Path) -> Result<Self, ConfigError> {
        Figment::new()
            // Layer 1: User config (lowest priority)
            .merge(Toml::file(user_config))
            // Layer 2: Project config
            .merge(Toml::file(project_config))
            // Layer 3: Environment variables (highest priority)
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .map_err(ConfigError::from)
    }

    /// User config path: ~/.config/researchbook/config.toml (XDG) or platform config dir.
    fn user_config_path() -> PathBuf {
        // Prefer XDG config location (~/.config) on all platforms
        if let Some(home) = dirs::home_dir() {
            let xdg_path = home.join(".config").join("researchbook").join("config.toml");
            if xdg_path.exists() {
                return xdg_path;
            }
        }
        // Fall back to platform-specific config dir
        dirs::config_dir()
            .map(|p| p.join("researchbook").join("config.toml"))
            .unwrap_or_default()
    }
}

#[cfg(test)]
impl Config {
    /// Config pointing nowhere, for wiring a context around test doubles.
    pub(crate) fn for_tests() -> Self {
        let db = |uri: &str| GraphDbConfig {
            uri: uri.to_string(),
            user: default_user(),
            password: Secret::default(),
            database: default_database(),
            max_connections: default_max_connections(),
            fetch_size: default_fetch_size(),
        };
        Self {
            research_db: db("bolt://research.invalid:7687"),
            thesis_db: db("bolt://thesis.invalid:7687"),
            llm: LlmConfig {
                base_url: "http://llm.invalid/v1".to_string(),
                api_key: None,
                model: "stub-model".to_string(),
                timeout_secs: default_timeout_secs(),
                insecure_retry: false,
                prompt_format: PromptFormat::Json,
            },
            limits: Limits::default(),
        }
    }
}
