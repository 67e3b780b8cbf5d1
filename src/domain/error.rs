//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::NodeId;

/// Domain errors represent violations of the hierarchy rules.
/// The editor recovers from every one of them locally.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("{level} is full: at most {capacity} allowed")]
    CapacityReached { level: &'static str, capacity: usize },

    #[error("{field} must be within {min} - {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: u32,
        min: u32,
        max: u32,
    },

    #[error("{level} type '{kind}' is not allowed here, expected one of: {allowed}")]
    KindNotAllowed {
        level: &'static str,
        kind: String,
        allowed: String,
    },

    #[error("{level} type '{kind}' is already used by a sibling")]
    KindTaken { level: &'static str, kind: String },

    #[error("{level} id {id} is already used")]
    DuplicateId { level: &'static str, id: NodeId },

    #[error("index {index} out of bounds, expected 0 - {max}")]
    IndexOutOfBounds { index: usize, max: usize },

    #[error("nothing to edit: the {level} list is empty")]
    EmptyCollection { level: &'static str },

    #[error("cannot change building type to '{kind}': {reason}")]
    KindConflict { kind: String, reason: String },

    #[error("building type '{0}' cannot have a stove")]
    StoveNotSupported(String),
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
