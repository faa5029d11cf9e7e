//! Phone number formatting to E.164
//!
//! Parsing and validity checks come from the libphonenumber metadata shipped
//! with the `phonenumber` crate. Numbers without an explicit country code are
//! read in the caller's default region.

use once_cell::sync::Lazy;
use phonenumber::{Mode, country};
use regex::Regex;
use tracing::debug;

use super::NormalizationError;
use crate::domain::is_e164;

static EXTENSION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\s*(?:ext\.?|extension|x|#)\s*\d{1,6}\s*$").expect("extension pattern compiles")
});

fn parse_region(region: &str) -> Option<country::Id> {
    region.trim().to_ascii_uppercase().parse::<country::Id>().ok()
}

/// Format a raw phone string as E.164, reading numbers without a country code in `default_region`
pub fn format_phone(raw: &str, default_region: &str) -> Result<String, NormalizationError> {
    let trimmed = EXTENSION.replace(raw.trim(), "");
    let trimmed = trimmed.trim();

    if trimmed.is_empty() {
        return Err(NormalizationError::invalid_phone_number(raw, "Phone number is empty"));
    }

    // An explicit "+<code>" carries its own region
    let region = parse_region(default_region);
    if region.is_none() && !trimmed.starts_with('+') {
        return Err(NormalizationError::unknown_region(default_region));
    }

    let number = phonenumber::parse(region, trimmed)
        .map_err(|e| NormalizationError::invalid_phone_number(raw, &e.to_string()))?;

    if !number.is_valid() {
        return Err(NormalizationError::invalid_phone_number(
            raw,
            "Not a valid number for its region",
        ));
    }

    let formatted = number.format().mode(Mode::E164).to_string();
    if !is_e164(&formatted) {
        return Err(NormalizationError::invalid_phone_number(raw, "Result is not valid E.164"));
    }

    debug!("Formatted phone number {:?} as {}", raw, formatted);
    Ok(formatted)
}
