//! Generation Context - Errors

use thiserror::Error;

use super::JobState;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GenerationDomainError {
    #[error("missing instruction")]
    MissingInstruction,

    #[error("missing image")]
    MissingImage,

    #[error("invalid job state transition: {from} -> {to}")]
    InvalidTransition { from: JobState, to: JobState },
}
