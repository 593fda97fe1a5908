use crate::types::BookingStatus;
use thiserror::Error;

/// Every storage- and domain-level failure resolves into one of these
/// kinds before it reaches a caller; raw driver errors never escape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookingError {
    #[error("this time slot is no longer available, please choose another")]
    SlotUnavailable,

    #[error("booking status can't change from {from} to {to}")]
    InvalidTransition {
        from: BookingStatus,
        to: BookingStatus,
    },

    #[error("invalid request: {0}")]
    Validation(String),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("storage failure: {0}")]
    Storage(String),
}

pub type BookingResult<T> = Result<T, BookingError>;

impl From<diesel::result::Error> for BookingError {
    fn from(err: diesel::result::Error) -> Self {
        use diesel::result::{DatabaseErrorKind, Error};
        match err {
            Error::NotFound => BookingError::NotFound("record"),
            // A unique-index rejection or a serialization failure means we
            // lost the race for the slot; the caller should re-query
            // availability and pick again.
            Error::DatabaseError(DatabaseErrorKind::UniqueViolation, _)
            | Error::DatabaseError(DatabaseErrorKind::SerializationFailure, _) => {
                BookingError::SlotUnavailable
            }
            other => BookingError::Storage(other.to_string()),
        }
    }
}
