//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent misuse of the chart's construction rules.
/// Queries over a well-formed chart never fail.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("person name must not be empty")]
    EmptyName,

    #[error("person handle was issued by another chart")]
    ForeignPerson,

    #[error("chart has {levels} levels, tree rendering supports at most {limit}")]
    TooDeep { levels: usize, limit: usize },

    #[error("person not found: {0}")]
    PersonNotFound(String),
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
