//! ResearchBook - Academic Intelligence over Research Graphs
//!
//! Answers questions about researchers by querying a research database
//! (people, publications, organizations) and a thesis database (theses,
//! keywords, academic roles), merging the results and asking a language
//! model for a short written analysis.

pub mod cli;
pub mod config;
pub mod context;
pub mod di;
pub mod error;
pub mod graph;
pub mod llm;
pub mod mcp;
pub mod models;
pub mod repositories;
pub mod services;

// Re-export FromRef at crate root for di-macros generated code
pub use di::FromRef;
