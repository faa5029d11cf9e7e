//! Profile page parser
//!
//! Writes employer, picture, city/state/country and the metadata block.

use serde::Serialize;
use tracing::{debug, info};
use url::Url;

use super::PageParser;
use super::config::ParsingConfig;
use super::error::{ParsingError, ParsingResult};
use super::extractor::{Document, FieldSelector};
use crate::domain::{Education, ProfileMetadata, UserRecord};
use crate::infrastructure::normalizer::country_to_iso2;
use crate::infrastructure::page_source::PageKind;

const OWNED_FIELDS: &[&str] = &[
    "employer",
    "picture_url",
    "address.city",
    "address.state",
    "address.country",
    "metadata",
];

/// JSON form of the metadata block as stored on the record
fn metadata_value<T: Serialize>(metadata: &T) -> ParsingResult<serde_json::Value> {
    serde_json::to_value(metadata)
        .map_err(|e| ParsingError::serialization("metadata", &e.to_string()))
}

/// Employer is the segment after the last `|` of a "title | employer" heading
fn employer_from_title(title: &str) -> String {
    let parts: Vec<&str> = title.split('|').collect();
    if parts.len() > 1 {
        parts.last().map(|s| s.trim().to_string()).unwrap_or_default()
    } else {
        String::new()
    }
}

/// Parser for the freelancer profile page
pub struct ProfileParser {
    base_url: Option<Url>,
    city: FieldSelector,
    state: FieldSelector,
    country: FieldSelector,
    picture: FieldSelector,
    job_title: FieldSelector,
    specialization: FieldSelector,
    hourly_rate: FieldSelector,
    hours_per_week: FieldSelector,
    language: FieldSelector,
    proficiency: FieldSelector,
    military_status: FieldSelector,
    university: FieldSelector,
    degree: FieldSelector,
    university_years: FieldSelector,
}

impl ProfileParser {
    pub fn new(config: &ParsingConfig) -> ParsingResult<Self> {
        let s = &config.profile_selectors;

        let base_url = match Url::parse(&config.base_url) {
            Ok(url) => Some(url),
            Err(e) => {
                debug!("Ignoring invalid base URL '{}': {}", config.base_url, e);
                None
            }
        };

        Ok(Self {
            base_url,
            city: FieldSelector::compile("city", &s.city)?,
            state: FieldSelector::compile("state", &s.state)?,
            country: FieldSelector::compile("country", &s.country)?,
            picture: FieldSelector::compile("picture", &s.picture)?,
            job_title: FieldSelector::compile("job_title", &s.job_title)?,
            specialization: FieldSelector::compile("specialization", &s.specialization)?,
            hourly_rate: FieldSelector::compile("hourly_rate", &s.hourly_rate)?,
            hours_per_week: FieldSelector::compile("hours_per_week", &s.hours_per_week)?,
            language: FieldSelector::compile("language", &s.language)?,
            proficiency: FieldSelector::compile("proficiency", &s.proficiency)?,
            military_status: FieldSelector::compile("military_status", &s.military_status)?,
            university: FieldSelector::compile("university", &s.university)?,
            degree: FieldSelector::compile("degree", &s.degree)?,
            university_years: FieldSelector::compile("university_years", &s.university_years)?,
        })
    }

    /// Resolve a relative picture URL against the site; unresolvable values pass through
    fn resolve_picture(&self, src: &str) -> String {
        if src.is_empty() {
            return String::new();
        }
        let resolved = match &self.base_url {
            Some(base) => base.join(src),
            None => Url::parse(src),
        };
        resolved.map_or_else(|_| src.to_string(), String::from)
    }

    fn extract_metadata(&self, document: &Document) -> ProfileMetadata {
        let language = format!(
            "{} {}",
            document.text_or_empty(&self.language),
            document.text_or_empty(&self.proficiency)
        );

        ProfileMetadata {
            specialization: document.text_or_empty(&self.specialization),
            hourly_rate: document.text_or_empty(&self.hourly_rate),
            hours_per_week: document.text_or_empty(&self.hours_per_week),
            language: language.trim().to_string(),
            military_status: document.text_or_empty(&self.military_status),
            education: Education {
                university: document.text_or_empty(&self.university),
                degree: document.text_or_empty(&self.degree),
                university_years: document.text_or_empty(&self.university_years),
            },
        }
    }
}

impl PageParser for ProfileParser {
    type Target = UserRecord;

    fn page(&self) -> PageKind {
        PageKind::Profile
    }

    fn owned_fields(&self) -> &'static [&'static str] {
        OWNED_FIELDS
    }

    fn parse_document(&self, document: &Document, target: &mut UserRecord) -> ParsingResult<()> {
        let employer = employer_from_title(&document.text_or_empty(&self.job_title));
        let picture_url = self.resolve_picture(&document.attr(&self.picture, "src").unwrap_or_default());
        let city = document.text_or_empty(&self.city);
        let state = document.text_or_empty(&self.state);

        let raw_country = document.text_or_empty(&self.country);
        let country = if raw_country.is_empty() {
            String::new()
        } else {
            country_to_iso2(&raw_country)?
        };

        let metadata = metadata_value(&self.extract_metadata(document))?;

        info!("Parsed profile page: employer '{}', country '{}'", employer, country);

        target.employer = employer;
        target.picture_url = picture_url;
        target.address.city = city;
        target.address.state = state;
        target.address.country = country;
        target.metadata = metadata;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::normalizer::NormalizationError;
    use crate::infrastructure::stage_outcome::{StageError, StageOutcome};
    use rstest::rstest;
    use std::collections::HashMap;

    fn page(country: &str) -> String {
        format!(
            r#"<html><body>
              <div class="up-presence-container"><img class="up-avatar" src="/avatars/bobby.png"></div>
              <span itemprop="locality">Miami</span>
              <span itemprop="state-name"> Florida </span>
              <span itemprop="country-name">{country}</span>
              <section class="up-card-section"><div><ul><li><div><div>
                <h4 role="presentation">Chief Executive | All Party No Work Company</h4>
              </div></div></li></ul></div></section>
            </body></html>"#
        )
    }

    fn parser() -> ProfileParser {
        ProfileParser::new(&ParsingConfig::default()).unwrap()
    }

    #[rstest]
    #[case("Chief Executive | All Party No Work Company", "All Party No Work Company")]
    #[case("Engineer|Acme|Acme Labs ", "Acme Labs")]
    #[case("Freelancer", "")]
    #[case("", "")]
    fn test_employer_is_trailing_segment(#[case] title: &str, #[case] expected: &str) {
        assert_eq!(employer_from_title(title), expected);
    }

    #[test]
    fn test_writes_owned_fields() {
        let mut record = UserRecord::new();

        let outcome = parser().parse(page("United States").as_bytes(), &mut record);

        assert!(outcome.is_completed());
        assert_eq!(record.employer, "All Party No Work Company");
        assert_eq!(record.address.city, "Miami");
        assert_eq!(record.address.state, "Florida");
        assert_eq!(record.address.country, "US");
        assert_eq!(record.picture_url, "https://www.upwork.com/avatars/bobby.png");
        assert_eq!(record.metadata.as_object().unwrap().len(), 6);
    }

    #[test]
    fn test_empty_country_skips_normalization() {
        let mut record = UserRecord::new();

        assert!(parser().parse(page("").as_bytes(), &mut record).is_completed());
        assert_eq!(record.address.country, "");
    }

    #[test]
    fn test_unknown_country_fails_without_mutation() {
        let mut record = UserRecord::new();
        let before = record.clone();

        let outcome = parser().parse(page("Atlantis").as_bytes(), &mut record);

        assert!(matches!(
            outcome,
            StageOutcome::Failed(StageError::Parsing(ParsingError::Normalization(
                NormalizationError::UnknownCountry { .. }
            )))
        ));
        assert_eq!(record, before);
    }

    #[test]
    fn test_absolute_picture_url_passes_through() {
        assert_eq!(
            parser().resolve_picture("https://cdn.example.com/a.png"),
            "https://cdn.example.com/a.png"
        );
        assert_eq!(parser().resolve_picture(""), "");
    }

    #[test]
    fn test_unserializable_metadata_is_an_error() {
        let metadata = HashMap::from([((1u8, 2u8), "tuple keys have no JSON form")]);

        let err = metadata_value(&metadata).unwrap_err();

        assert!(matches!(err, ParsingError::Serialization { ref field, .. } if field == "metadata"));
        assert!(!err.is_recoverable());
    }
}
