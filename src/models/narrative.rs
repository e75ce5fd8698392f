//! Generated prose attached to a report.

use serde::{Deserialize, Serialize};

use crate::llm::Usage;

/// Outcome of asking the language model for a summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Narrative {
    Generated {
        text: String,
        model: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        usage: Option<Usage>,
    },
    /// The model call failed. Never replaced by empty or invented text.
    Unavailable { reason: String },
    /// No call was made, e.g. because nothing was found to summarize.
    Skipped { reason: String },
}

impl Narrative {
    pub fn text(&self) -> Option<&str> {
        match self {
            Narrative::Generated { text, .. } => Some(text),
            _ => None,
        }
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, Narrative::Unavailable { .. })
    }
}
