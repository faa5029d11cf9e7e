//! Result of running one page stage

use thiserror::Error;

use super::page_source::{PageKind, PageSourceError};
use super::parsing_error::ParsingError;
use crate::domain::AssemblyError;

#[derive(Error, Debug)]
pub enum StageError {
    #[error(transparent)]
    Parsing(#[from] ParsingError),

    #[error(transparent)]
    Assembly(#[from] AssemblyError),

    #[error(transparent)]
    Source(#[from] PageSourceError),
}

impl StageError {
    /// Whether a fresh scan attempt could succeed
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Parsing(err) => err.is_recoverable(),
            Self::Assembly(err) => err.is_recoverable(),
            Self::Source(_) => true,
        }
    }
}

/// What a stage did with its page
#[derive(Debug)]
pub enum StageOutcome<T> {
    /// The stage committed its fields
    Completed(T),
    /// The input was not a document; nothing was written
    Skipped { page: PageKind, reason: String },
    /// Extraction, normalization or assembly failed; nothing was written
    Failed(StageError),
}

impl<T> StageOutcome<T> {
    pub const fn is_completed(&self) -> bool {
        matches!(self, Self::Completed(_))
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> StageOutcome<U> {
        match self {
            Self::Completed(value) => StageOutcome::Completed(f(value)),
            Self::Skipped { page, reason } => StageOutcome::Skipped { page, reason },
            Self::Failed(err) => StageOutcome::Failed(err),
        }
    }

    /// Unwrap a completed value, or hand back the interruption re-typed for the caller
    pub fn proceed<U>(self) -> Result<T, StageOutcome<U>> {
        match self {
            Self::Completed(value) => Ok(value),
            Self::Skipped { page, reason } => Err(StageOutcome::Skipped { page, reason }),
            Self::Failed(err) => Err(StageOutcome::Failed(err)),
        }
    }

    pub fn completed(self) -> Option<T> {
        match self {
            Self::Completed(value) => Some(value),
            _ => None,
        }
    }

    /// Whether retrying the scan could change this outcome
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Completed(_) => false,
            Self::Skipped { .. } => true,
            Self::Failed(err) => err.is_recoverable(),
        }
    }
}

impl<T> From<StageError> for StageOutcome<T> {
    fn from(err: StageError) -> Self {
        Self::Failed(err)
    }
}
