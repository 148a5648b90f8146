// ⚠️ Error types for the tuition book
//
// Two layers:
// - TuitionError: raised by value objects, entities and the store
// - CommandError: raised by the command layer, wraps TuitionError

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TuitionError {
    /// A value object rejected its raw input
    #[error("{message}")]
    Validation { field: &'static str, message: String },

    #[error("Operation would result in duplicate tuition students")]
    DuplicateTuition,

    #[error("Tuition student not found")]
    TuitionNotFound,

    #[error("Operation would result in duplicate sessions")]
    DuplicateSession,

    #[error("Missing required session field: {0}")]
    MissingField(&'static str),
}

impl TuitionError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        TuitionError::Validation {
            field,
            message: message.into(),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("The student index provided is invalid")]
    IndexOutOfRange,

    #[error("At least one field to edit must be provided.")]
    NoFieldToEdit,

    #[error("This student already exists in the tuition book.")]
    DuplicateTuition,

    #[error(transparent)]
    Model(#[from] TuitionError),
}

pub type Result<T> = std::result::Result<T, TuitionError>;
