use crate::types::DbId;

/// Domain-level error shared across the catalog crates.
///
/// Only conditions that abort a request live here. Validation failures and
/// integrity conflicts (duplicate names, blocked deletions) are not errors:
/// they branch to an alternate response, either a re-rendered form or a
/// redirect to the canonical record.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A record was requested by id and does not exist.
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },
}
