//! Value normalization for scraped fields
//!
//! Pure functions that turn free-text values into canonical forms:
//! country names into ISO 3166-1 alpha-2 codes and phone numbers into E.164.

pub mod country;
pub mod phone;

pub use country::country_to_iso2;
pub use phone::format_phone;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NormalizationError {
    #[error("No ISO 3166-1 alpha-2 code known for country '{name}'")]
    UnknownCountry { name: String },

    #[error("Unknown default phone region '{region}'")]
    UnknownRegion { region: String },

    #[error("Invalid phone number '{value}': {message}")]
    InvalidPhoneNumber { value: String, message: String },
}

impl NormalizationError {
    pub fn unknown_country(name: &str) -> Self {
        Self::UnknownCountry {
            name: name.to_string(),
        }
    }

    pub fn unknown_region(region: &str) -> Self {
        Self::UnknownRegion {
            region: region.to_string(),
        }
    }

    pub fn invalid_phone_number(value: &str, message: &str) -> Self {
        Self::InvalidPhoneNumber {
            value: value.to_string(),
            message: message.to_string(),
        }
    }
}
