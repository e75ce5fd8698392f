//! Backend implementations for the graph databases the resolver reads.
//!
//! Each backend implements [`CypherExecutor`](crate::graph::CypherExecutor).
//!
//! # Available Backends
//!
//! | Backend | Module | Status |
//! |---------|--------|--------|
//! | Neo4j (Bolt) | [`neo4j`] | Available |

pub mod neo4j;
