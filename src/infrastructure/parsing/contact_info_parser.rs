//! Contact info page parser
//!
//! Last stage of a scan. Besides writing names, contact details and the
//! street address it can assemble the final validated [`UserRecord`].

use tracing::{info, warn};

use super::PageParser;
use super::config::ParsingConfig;
use super::error::ParsingResult;
use super::extractor::{Document, FieldSelector};
use crate::domain::{RecordAssembler, UserRecord};
use crate::infrastructure::normalizer::format_phone;
use crate::infrastructure::page_source::PageKind;
use crate::infrastructure::stage_outcome::{StageError, StageOutcome};

const OWNED_FIELDS: &[&str] = &[
    "first_name",
    "last_name",
    "full_name",
    "email",
    "phone_number",
    "address.line1",
    "address.line2",
    "address.postal_code",
];

/// Split a display name into first and last token.
/// Middle names are dropped; a single token leaves the last name empty.
fn split_name(full_name: &str) -> (String, String) {
    let tokens: Vec<&str> = full_name.split_whitespace().collect();
    let first = tokens.first().copied().unwrap_or_default().to_string();
    let last = if tokens.len() > 1 {
        tokens.last().copied().unwrap_or_default().to_string()
    } else {
        String::new()
    };
    (first, last)
}

/// Parser for the contact info settings page
pub struct ContactInfoParser {
    phone_region: String,
    full_name: FieldSelector,
    street_address: FieldSelector,
    secondary_address: FieldSelector,
    postal_code: FieldSelector,
    phone: FieldSelector,
    email: FieldSelector,
    assembler: RecordAssembler,
}

impl ContactInfoParser {
    pub fn new(config: &ParsingConfig) -> ParsingResult<Self> {
        let s = &config.contact_info_selectors;

        Ok(Self {
            phone_region: config.default_phone_region.clone(),
            full_name: FieldSelector::compile("full_name", &s.full_name)?,
            street_address: FieldSelector::compile("street_address", &s.street_address)?,
            secondary_address: FieldSelector::compile("secondary_address", &s.secondary_address)?,
            postal_code: FieldSelector::compile("postal_code", &s.postal_code)?,
            phone: FieldSelector::compile("phone", &s.phone)?,
            email: FieldSelector::compile("email", &s.email)?,
            assembler: RecordAssembler::new(),
        })
    }

    /// Parse the page, then sentinel-fill and validate the whole record.
    ///
    /// `record` keeps the parsed fields even when validation rejects the result.
    pub fn parse_and_assemble(&self, raw: &[u8], record: &mut UserRecord) -> StageOutcome<UserRecord> {
        if let Err(interrupted) = self.parse(raw, record).proceed() {
            return interrupted;
        }

        match self.assembler.assemble(record) {
            Ok(assembled) => {
                info!("Assembled user record {}", assembled.id);
                StageOutcome::Completed(assembled)
            }
            Err(e) => {
                warn!("User record rejected: {}", e);
                StageOutcome::Failed(StageError::from(e))
            }
        }
    }
}

impl PageParser for ContactInfoParser {
    type Target = UserRecord;

    fn page(&self) -> PageKind {
        PageKind::ContactInfo
    }

    fn owned_fields(&self) -> &'static [&'static str] {
        OWNED_FIELDS
    }

    fn parse_document(&self, document: &Document, target: &mut UserRecord) -> ParsingResult<()> {
        let (first_name, last_name) = split_name(&document.text_or_empty(&self.full_name));
        let line1 = document.text_or_empty(&self.street_address);
        let line2 = document.text_or_empty(&self.secondary_address);
        let postal_code = document.text_or_empty(&self.postal_code);
        let email = document.text_or_empty(&self.email);

        let raw_phone = document.text_or_empty(&self.phone);
        let phone_number = if raw_phone.is_empty() {
            String::new()
        } else {
            format_phone(&raw_phone, &self.phone_region)?
        };

        info!("Parsed contact info for '{} {}'", first_name, last_name);

        target.full_name = format!("{first_name} {last_name}");
        target.first_name = first_name;
        target.last_name = last_name;
        target.email = email;
        target.phone_number = phone_number;
        target.address.line1 = line1;
        target.address.line2 = line2;
        target.address.postal_code = postal_code;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AssemblyError, ValidationError};
    use crate::infrastructure::parsing::ParsingError;
    use rstest::rstest;

    fn page(name: &str, phone: &str) -> String {
        format!(
            r#"<html><body>
              <div data-test="userName">{name}</div>
              <div data-test="userEmail"> bobby@example.com </div>
              <div data-test="phone">{phone}</div>
              <span data-test="addressStreet">1 Ocean Drive</span>
              <span data-test="addressStreet2">Apt 4</span>
              <span data-test="addressZip">123456</span>
            </body></html>"#
        )
    }

    fn parser() -> ContactInfoParser {
        ContactInfoParser::new(&ParsingConfig::default()).unwrap()
    }

    #[rstest]
    #[case("Bobby Backupy", "Bobby", "Backupy")]
    #[case("Mary Ann Smith", "Mary", "Smith")]
    #[case("Cher", "Cher", "")]
    #[case("   ", "", "")]
    fn test_splits_names(#[case] full: &str, #[case] first: &str, #[case] last: &str) {
        assert_eq!(split_name(full), (first.to_string(), last.to_string()));
    }

    #[test]
    fn test_writes_contact_fields() {
        let mut record = UserRecord::new();

        let outcome = parser().parse(page("Bobby Backupy", "(305) 555-0142").as_bytes(), &mut record);

        assert!(outcome.is_completed());
        assert_eq!(record.first_name, "Bobby");
        assert_eq!(record.last_name, "Backupy");
        assert_eq!(record.full_name, "Bobby Backupy");
        assert_eq!(record.email, "bobby@example.com");
        assert_eq!(record.phone_number, "+13055550142");
        assert_eq!(record.address.line1, "1 Ocean Drive");
        assert_eq!(record.address.line2, "Apt 4");
        assert_eq!(record.address.postal_code, "123456");
    }

    #[test]
    fn test_middle_names_are_dropped_from_full_name() {
        let mut record = UserRecord::new();

        parser().parse(page("Mary Ann Smith", "").as_bytes(), &mut record);

        assert_eq!(record.full_name, "Mary Smith");
    }

    #[test]
    fn test_invalid_phone_fails_without_mutation() {
        let mut record = UserRecord::new();
        let before = record.clone();

        let outcome = parser().parse(page("Bobby Backupy", "12").as_bytes(), &mut record);

        assert!(matches!(
            outcome,
            StageOutcome::Failed(StageError::Parsing(ParsingError::Normalization(_)))
        ));
        assert_eq!(record, before);
    }

    #[test]
    fn test_assembles_validated_record() {
        let mut record = UserRecord::new();

        let outcome =
            parser().parse_and_assemble(page("Bobby Backupy", "305-555-0142").as_bytes(), &mut record);

        let assembled = outcome.completed().unwrap();
        assert!(assembled.phone_number.starts_with("+1"));
        assert_eq!(assembled.employer, crate::domain::SENTINEL);
        assert_eq!(assembled.id, record.id);
    }

    #[test]
    fn test_missing_phone_is_rejected_at_assembly() {
        let mut record = UserRecord::new();

        let outcome = parser().parse_and_assemble(page("Bobby Backupy", "").as_bytes(), &mut record);

        assert!(matches!(
            outcome,
            StageOutcome::Failed(StageError::Assembly(AssemblyError::Validation(
                ValidationError::InvalidPhoneNumber { .. }
            )))
        ));
        assert_eq!(record.phone_number, "");
    }

    #[test]
    fn test_malformed_input_skips_assembly() {
        let mut record = UserRecord::new();

        let outcome = parser().parse_and_assemble(b"[1, 2, 3]", &mut record);

        assert!(matches!(outcome, StageOutcome::Skipped { page: PageKind::ContactInfo, .. }));
        assert!(record.first_name.is_empty());
    }
}
