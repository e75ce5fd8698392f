//! Rejects Cypher that would modify a database.

use crate::error::AppError;

/// Clauses that write to the store or load external data.
const WRITE_CLAUSES: &[&str] = &[
    "CREATE", "MERGE", "DELETE", "DETACH", "SET", "REMOVE", "DROP", "LOAD",
];

/// Fails with [`AppError::Validation`] if the query contains a write clause.
///
/// Matches whole words outside string literals, so `toString(...)` or a
/// title parameter containing "set" pass.
pub fn ensure_read_only(cypher: &str) -> Result<(), AppError> {
    let mut word = String::new();
    let mut quote: Option<char> = None;

    for ch in cypher.chars().chain(std::iter::once(' ')) {
        if let Some(q) = quote {
            if ch == q {
                quote = None;
            }
            continue;
        }
        if ch == '\'' || ch == '"' || ch == '`' {
            quote = Some(ch);
            word.clear();
            continue;
        }
        if ch.is_ascii_alphanumeric() || ch == '_' {
            word.push(ch);
            continue;
        }
        if !word.is_empty() {
            let upper = word.to_ascii_uppercase();
            if let Some(clause) = WRITE_CLAUSES.iter().find(|c| **c == upper) {
                return Err(AppError::Validation(format!(
                    "write clause {} is not allowed on a read-only gateway",
                    clause
                )));
            }
            word.clear();
        }
    }
    Ok(())
}
