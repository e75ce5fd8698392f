//! Business logic services.
//!
//! Services orchestrate repositories and the model client, using the
//! `FromContext` derive macro for dependency injection.

mod diagnostics;
mod prompts;
mod resolver;
mod synthesizer;

pub use diagnostics::{ConnectivityReport, DiagnosticsService};
pub use resolver::ResearchService;
pub use synthesizer::{NarrativeSynthesizer, NarrativeTask};
