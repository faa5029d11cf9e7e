//! Sentinel fill and final assembly of the user record
//!
//! The record is round-tripped through a JSON mapping: empty top-level values
//! are replaced with [`SENTINEL`], the mapping is read back into a
//! [`UserRecord`] and validated exactly once.

use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use super::constants::SENTINEL;
use super::user_record::UserRecord;
use super::validation::{UserRecordValidator, ValidationError, Validator};

#[derive(Error, Debug)]
pub enum AssemblyError {
    #[error("Expected a mapping of fields, found {found}")]
    NotAMapping { found: &'static str },

    #[error("Record serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Record validation failed: {0}")]
    Validation(#[from] ValidationError),
}

impl AssemblyError {
    /// Whether a fresh scan could fix this
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::NotAMapping { .. } | Self::Serialization(_) => false,
            Self::Validation(_) => true,
        }
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "a mapping",
    }
}

/// Falsy in the usual scripting sense: null, false, zero, or an empty string/array/mapping
pub fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::Number(number) => number.as_f64() == Some(0.0),
        Value::String(text) => text.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
    }
}

/// Overwrite every falsy top-level value of a mapping with the sentinel.
///
/// Nested values are not visited. Returns how many fields were filled.
pub fn fill_empty(record: &mut Value) -> Result<usize, AssemblyError> {
    let found = kind_of(record);
    let fields = record
        .as_object_mut()
        .ok_or(AssemblyError::NotAMapping { found })?;

    let mut filled = 0;
    for value in fields.values_mut() {
        if is_falsy(value) {
            *value = Value::String(SENTINEL.to_string());
            filled += 1;
        }
    }
    Ok(filled)
}

/// Builds the validated record out of the in-progress one
#[derive(Debug, Clone, Default)]
pub struct RecordAssembler {
    validator: UserRecordValidator,
}

impl RecordAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sentinel-fill a copy of `record` and validate it
    pub fn assemble(&self, record: &UserRecord) -> Result<UserRecord, AssemblyError> {
        let mut mapping = serde_json::to_value(record)?;
        let filled = fill_empty(&mut mapping)?;
        debug!("Sentinel-filled {} empty fields", filled);

        let assembled: UserRecord = serde_json::from_value(mapping)?;
        self.validator.validate(&assembled)?;
        Ok(assembled)
    }
}
