//! Page parsers against the saved page fixtures
use std::sync::Arc;

use profile_scan_lib::domain::{
    RecordAssembler, SENTINEL, UserRecordValidator, ValidationError, Validator,
};
use profile_scan_lib::infrastructure::{
    ContactInfoParser, HomepageParser, MemorySink, PageKind, PageParser, ParsingConfig,
    ProfileParser, StageOutcome,
};
use profile_scan_lib::{HomepageSummary, UserRecord};

const HOMEPAGE: &str = include_str!("fixtures/homepage.html");
const PROFILE: &str = include_str!("fixtures/profile.html");
const CONTACT_INFO: &str = include_str!("fixtures/contact_info.html");

fn config() -> ParsingConfig {
    ParsingConfig::default()
}

#[test]
fn homepage_fixture_populates_summary() {
    let sink = Arc::new(MemorySink::new());
    let parser = HomepageParser::new(&config()).unwrap().with_sink(sink.clone());
    let mut summary = HomepageSummary::default();

    let outcome = parser.parse(HOMEPAGE.as_bytes(), &mut summary);

    assert!(outcome.is_completed());
    assert_eq!(summary.name, "Bobby B.");
    assert_eq!(summary.profile_completeness, "30%");
    assert_eq!(summary.categories.len(), 2);
    assert_eq!(summary.categories[0], "Blockchain, NFT & Cryptocurrency");
    assert_eq!(summary.available_connects, "80");
    assert_eq!(summary.specialization, "Executive Assistant");

    let artifact: HomepageSummary = serde_json::from_str(&sink.artifacts()[0]).unwrap();
    assert_eq!(artifact, summary);
}

#[test]
fn homepage_non_document_leaves_summary_untouched() {
    let parser = HomepageParser::new(&config()).unwrap();
    let mut summary = HomepageSummary::default();

    let outcome = parser.parse(b"[1, 2, 3]", &mut summary);

    assert!(matches!(outcome, StageOutcome::Skipped { page: PageKind::Homepage, .. }));
    assert_eq!(summary, HomepageSummary::default());
}

#[test]
fn profile_fixture_populates_record() {
    let parser = ProfileParser::new(&config()).unwrap();
    let mut record = UserRecord::new();

    let outcome = parser.parse(PROFILE.as_bytes(), &mut record);

    assert!(outcome.is_completed());
    assert_eq!(record.employer, "All Party No Work Company");
    assert_eq!(record.address.city, "Miami");
    assert_eq!(record.address.state, "Florida");
    assert_eq!(record.address.country, "US");
    assert_eq!(
        record.picture_url,
        "https://www.upwork.com/profile-portraits/bobby_b.jpg"
    );

    let metadata = record.metadata.as_object().unwrap();
    assert_eq!(metadata.len(), 6);
    for key in [
        "specialization",
        "hourly_rate",
        "hours_per_week",
        "language",
        "military_status",
        "education",
    ] {
        assert!(metadata.contains_key(key), "missing metadata key {key}");
    }
    assert_eq!(metadata["hourly_rate"], "$25.00/hr");
    assert_eq!(metadata["hours_per_week"], "More than 30 hrs/week");
    assert_eq!(metadata["military_status"], "Not a veteran");
    assert_eq!(metadata["language"], "English: Native or Bilingual");
    assert_eq!(metadata["education"]["university"], "University of Miami");
    assert_eq!(metadata["education"]["degree"], "Bachelor of Business Administration");
    assert_eq!(metadata["education"]["university_years"], "2005-2009");
}

#[test]
fn profile_stage_does_not_touch_contact_fields() {
    let parser = ProfileParser::new(&config()).unwrap();
    let mut record = UserRecord::new();
    record.email = "kept@example.com".to_string();

    parser.parse(PROFILE.as_bytes(), &mut record);

    assert_eq!(record.email, "kept@example.com");
    assert!(!parser.owned_fields().contains(&"email"));
}

#[test]
fn contact_info_fixture_populates_record() {
    let parser = ContactInfoParser::new(&config()).unwrap();
    let mut record = UserRecord::new();

    let outcome = parser.parse(CONTACT_INFO.as_bytes(), &mut record);

    assert!(outcome.is_completed());
    assert_eq!(record.first_name, "Bobby");
    assert_eq!(record.last_name, "Backupy");
    assert_eq!(record.full_name, "Bobby Backupy");
    assert_eq!(record.address.postal_code, "123456");
    assert_eq!(record.address.line1, "1200 Brickell Ave");
    assert_eq!(record.address.line2, "Suite 1950");
    assert_eq!(record.email, "bobby.backupy@example.com");
    assert!(record.phone_number.starts_with("+1"));
}

#[test]
fn stages_in_order_produce_valid_record() {
    let config = config();
    let mut summary = HomepageSummary::default();
    let mut record = UserRecord::new();

    let homepage = HomepageParser::new(&config).unwrap();
    assert!(homepage.parse(HOMEPAGE.as_bytes(), &mut summary).is_completed());

    let profile = ProfileParser::new(&config).unwrap();
    assert!(profile.parse(PROFILE.as_bytes(), &mut record).is_completed());

    let contact_info = ContactInfoParser::new(&config).unwrap();
    assert!(contact_info.parse(CONTACT_INFO.as_bytes(), &mut record).is_completed());

    let assembled = RecordAssembler::new().assemble(&record).unwrap();
    assert!(UserRecordValidator.validate(&assembled).is_ok());
    assert_eq!(assembled.phone_number, "+13055550142");
    assert_eq!(assembled.birth_date, SENTINEL);
    assert_eq!(assembled.ssn, SENTINEL);
    assert_eq!(assembled.employer, "All Party No Work Company");
}

#[test]
fn validator_rejects_long_country_with_value() {
    let mut record = UserRecord::new();
    record.phone_number = "+13055550142".to_string();
    record.address.country = "USA".to_string();

    let err = UserRecordValidator.validate(&record).unwrap_err();

    assert!(matches!(err, ValidationError::CountryFormat { .. }));
    assert_eq!(err.value(), "USA");
}
