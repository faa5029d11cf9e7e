//! Parsing error types for the page stages
//!
//! This module separates "the input was not a document" from selector,
//! normalization and artifact failures so callers can decide what to retry.

use thiserror::Error;

use super::normalizer::NormalizationError;
use super::page_source::PageKind;

#[derive(Error, Debug, Clone)]
pub enum ParsingError {
    #[error("Malformed input for {page} page: {reason}")]
    MalformedInput { page: PageKind, reason: String },

    #[error("Invalid CSS selector for '{field}': {selector} - {reason}")]
    InvalidSelector {
        field: String,
        selector: String,
        reason: String,
    },

    #[error("Normalization failed: {0}")]
    Normalization(#[from] NormalizationError),

    #[error("Failed to write artifact to {target}: {message}")]
    ArtifactWriteFailed { target: String, message: String },

    #[error("Failed to serialize '{field}': {message}")]
    Serialization { field: String, message: String },
}

impl ParsingError {
    /// Create a malformed input error for a page
    pub fn malformed_input(page: PageKind, reason: &str) -> Self {
        Self::MalformedInput {
            page,
            reason: reason.to_string(),
        }
    }

    /// Create an invalid selector error
    pub fn invalid_selector(field: &str, selector: &str, reason: &str) -> Self {
        Self::InvalidSelector {
            field: field.to_string(),
            selector: selector.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Create an artifact write error
    pub fn artifact_write_failed(target: &str, message: &str) -> Self {
        Self::ArtifactWriteFailed {
            target: target.to_string(),
            message: message.to_string(),
        }
    }

    /// Create a serialization error for a structured field
    pub fn serialization(field: &str, message: &str) -> Self {
        Self::Serialization {
            field: field.to_string(),
            message: message.to_string(),
        }
    }

    /// Check if this error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::MalformedInput { .. } => true,
            Self::InvalidSelector { .. } => false,
            Self::Normalization(_) => true,
            Self::ArtifactWriteFailed { .. } => true,
            Self::Serialization { .. } => false,
        }
    }
}

pub type ParsingResult<T> = Result<T, ParsingError>;
