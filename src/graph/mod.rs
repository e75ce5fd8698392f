//! Graph abstraction layer for read-only database access.
//!
//! The resolver talks to two graph databases through the same small trait,
//! so the Neo4j backend can be swapped for a scripted executor in tests.
//!
//! - [`CypherExecutor`] - execute a parameterized read query, stream rows
//! - [`Query`] / [`QueryExt`] - fluent builder on top of any executor
//! - [`Row`] - one result row, column alias → JSON value
//!
//! # Usage
//!
//! ```ignore
//! use researchbook::graph::QueryExt;
//!
//! let rows = executor
//!     .query("MATCH (p:Person) WHERE toLower(p.name) CONTAINS toLower($name) RETURN p.name AS name LIMIT $limit")
//!     .param("name", "anders")
//!     .param("limit", 10)
//!     .fetch_all()
//!     .await?;
//! ```

mod guard;
mod query;
mod row;
mod traits;

pub mod backends;

#[cfg(test)]
pub(crate) mod testing;

pub use guard::ensure_read_only;
pub use query::{Query, QueryExt};
pub use row::{Params, Row, RowStream};
pub use traits::CypherExecutor;
