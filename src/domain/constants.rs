//! Domain constants shared by the parsers, assembler and validator

/// Placeholder written into any field left empty before validation
pub const SENTINEL: &str = "No available information.";

/// E.164: a `+`, a non-zero leading digit, at most 15 digits in total
pub const E164_PATTERN: &str = r"^\+[1-9]\d{1,14}$";

/// ISO 3166-1 alpha-2 codes are exactly two letters
pub const MAX_COUNTRY_CODE_LEN: usize = 2;
