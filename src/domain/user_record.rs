//! User record aggregate built across the three page stages
//!
//! Homepage data lives in [`HomepageSummary`](super::homepage_summary::HomepageSummary);
//! everything scraped from the profile and contact-info pages lands here.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Postal address owned by a [`UserRecord`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub line1: String,
    pub line2: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    /// ISO 3166-1 alpha-2 code
    pub country: String,
}

/// The scraped user profile.
///
/// Created once per scan attempt and mutated in place by the profile and
/// contact-info stages. Each stage overwrites only the fields it owns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: String,
    pub account: String,
    pub employer: String,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub email: String,
    /// E.164 formatted
    pub phone_number: String,
    pub birth_date: String,
    pub picture_url: String,
    pub address: Address,
    pub ssn: String,
    pub marital_status: String,
    pub gender: String,
    /// Open mapping filled by the profile stage; null until then
    pub metadata: Value,
    pub created_at: String,
    pub updated_at: String,
}

impl UserRecord {
    /// Fresh record with generated identifiers and timestamps
    pub fn new() -> Self {
        let now = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);

        Self {
            id: Uuid::new_v4().to_string(),
            account: Uuid::new_v4().to_string(),
            employer: String::new(),
            first_name: String::new(),
            last_name: String::new(),
            full_name: String::new(),
            email: String::new(),
            phone_number: String::new(),
            birth_date: String::new(),
            picture_url: String::new(),
            address: Address::default(),
            ssn: String::new(),
            marital_status: String::new(),
            gender: String::new(),
            metadata: Value::Null,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

impl Default for UserRecord {
    fn default() -> Self {
        Self::new()
    }
}

/// Education block nested in the profile metadata
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Education {
    pub university: String,
    pub degree: String,
    pub university_years: String,
}

/// Freelance details collected from the profile page and stored as
/// [`UserRecord::metadata`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileMetadata {
    pub specialization: String,
    pub hourly_rate: String,
    pub hours_per_week: String,
    /// Language and proficiency, e.g. "English Native or Bilingual"
    pub language: String,
    pub military_status: String,
    pub education: Education,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_has_distinct_uuids() {
        let record = UserRecord::new();

        assert!(Uuid::parse_str(&record.id).is_ok());
        assert!(Uuid::parse_str(&record.account).is_ok());
        assert_ne!(record.id, record.account);
        assert!(record.metadata.is_null());
        assert_eq!(record.created_at, record.updated_at);
    }

    #[test]
    fn test_metadata_serializes_with_six_keys() {
        let value = serde_json::to_value(ProfileMetadata::default()).unwrap();
        let object = value.as_object().unwrap();

        assert_eq!(object.len(), 6);
        assert!(object["education"].is_object());
    }
}
