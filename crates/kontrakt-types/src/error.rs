//! Error types for the intake core and its collaborator ports.

use thiserror::Error;

/// Recoverable input-validation failures inside the form state machine.
///
/// None of these are fatal: the session state is left unchanged and the
/// current prompt is re-issued.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("'{input}' is not an integer")]
    NotAnInteger { input: String },

    #[error("quantity must be positive")]
    NotPositive,

    #[error("cannot finish with an empty item list")]
    NoItems,

    #[error("item index {index} out of range (len {len})")]
    ItemIndexOutOfRange { index: usize, len: usize },

    #[error("event does not apply to the current form state")]
    UnexpectedEvent,
}

/// Errors from the document-generation collaborator.
///
/// All variants are recoverable: the session stays in its reviewing state and
/// the user may retry finish.
#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("generator request failed: {0}")]
    Request(String),

    #[error("generator returned status {status}: {detail}")]
    Status { status: u16, detail: String },

    #[error("generator request timed out after {seconds}s")]
    Timeout { seconds: u64 },
}

/// Errors from repository operations (used by trait definitions in kontrakt-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,
}

/// Errors from the document store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("document not found: {0}")]
    NotFound(String),

    #[error("io error: {0}")]
    Io(String),
}
