//! Structural and format checks on an assembled [`UserRecord`]
//!
//! Checks run in a fixed order (identifiers, phone number, country code) and
//! stop at the first violation.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;
use uuid::Uuid;

use super::constants::{E164_PATTERN, MAX_COUNTRY_CODE_LEN};
use super::user_record::UserRecord;

static E164: Lazy<Regex> = Lazy::new(|| Regex::new(E164_PATTERN).expect("E.164 pattern compiles"));

/// Field-tagged validation failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Field '{field}' is not a valid UUID: {value}")]
    InvalidUuid { field: String, value: String },

    #[error("{message}: {value}")]
    InvalidPhoneNumber { value: String, message: String },

    #[error("{message}: {value}")]
    CountryFormat { value: String, message: String },
}

impl ValidationError {
    pub fn invalid_uuid(field: &str, value: &str) -> Self {
        Self::InvalidUuid {
            field: field.to_string(),
            value: value.to_string(),
        }
    }

    pub fn invalid_phone_number(value: &str) -> Self {
        Self::InvalidPhoneNumber {
            value: value.to_string(),
            message: "Phone number is not in E.164 format".to_string(),
        }
    }

    pub fn country_format(value: &str) -> Self {
        Self::CountryFormat {
            value: value.to_string(),
            message: "Invalid value format for field Country".to_string(),
        }
    }

    /// Name of the record field that failed
    pub fn field(&self) -> &str {
        match self {
            Self::InvalidUuid { field, .. } => field,
            Self::InvalidPhoneNumber { .. } => "phone_number",
            Self::CountryFormat { .. } => "address.country",
        }
    }

    /// The value that was rejected
    pub fn value(&self) -> &str {
        match self {
            Self::InvalidUuid { value, .. }
            | Self::InvalidPhoneNumber { value, .. }
            | Self::CountryFormat { value, .. } => value,
        }
    }
}

/// Validation trait for assembled results
pub trait Validator<T> {
    type Error;

    /// Validate data for completeness and correctness
    fn validate(&self, data: &T) -> Result<(), Self::Error>;
}

/// Whether `value` is a canonical E.164 phone number
pub fn is_e164(value: &str) -> bool {
    E164.is_match(value)
}

/// Validator for the final user record
#[derive(Debug, Clone, Copy, Default)]
pub struct UserRecordValidator;

impl Validator<UserRecord> for UserRecordValidator {
    type Error = ValidationError;

    fn validate(&self, record: &UserRecord) -> Result<(), ValidationError> {
        for (field, value) in [("id", &record.id), ("account", &record.account)] {
            if Uuid::parse_str(value).is_err() {
                return Err(ValidationError::invalid_uuid(field, value));
            }
        }

        if !is_e164(&record.phone_number) {
            return Err(ValidationError::invalid_phone_number(&record.phone_number));
        }

        if record.address.country.chars().count() > MAX_COUNTRY_CODE_LEN {
            return Err(ValidationError::country_format(&record.address.country));
        }

        Ok(())
    }
}
