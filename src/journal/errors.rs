//! Error types of the journal.
//!
//! Every failure is a value the caller can inspect; none of them is fatal to the process.
//! Absence of an entry is not an error at all and is reported as `Ok(None)`.

use chrono::NaiveDate;
use thiserror::Error;

use crate::storage::backend::BackendError;

use super::date_key::DateKey;

/// Input rejected by the write boundary before anything touches the backend.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("An entry needs a title or a body")]
    EmptyEntry,
    #[error("Mood {0} is outside of 0..=3")]
    MoodOutOfRange(f64),
    #[error("Can't write an entry for {key}, it is after {today}")]
    FutureDate { key: DateKey, today: NaiveDate },
}

/// A stored value that isn't a journal entry.
#[derive(Debug, Error)]
#[error("Stored value is not a journal entry: {0}")]
pub struct DecodeError(#[source] pub serde_json::Error);

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Backend(#[from] BackendError),
    #[error("Entry {key} is corrupted")]
    CorruptEntry {
        key: DateKey,
        #[source]
        source: DecodeError,
    },
}

pub type StoreResult<T> = Result<T, StoreError>;
