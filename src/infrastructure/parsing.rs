//! HTML parsing stages for the three scanned pages
//!
//! Each page parser owns a disjoint set of destination fields. A parser
//! extracts and normalizes everything first and writes its fields in one
//! step, so a skipped or failed stage leaves the destination untouched.

pub mod config;
pub mod contact_info_parser;
pub mod error;
pub mod extractor;
pub mod homepage_parser;
pub mod profile_parser;

pub use config::{ContactInfoSelectors, HomepageSelectors, ParsingConfig, ProfileSelectors};
pub use contact_info_parser::ContactInfoParser;
pub use error::{ParsingError, ParsingResult};
pub use extractor::{Document, FieldSelector, extract};
pub use homepage_parser::HomepageParser;
pub use profile_parser::ProfileParser;

use tracing::{debug, warn};

use super::page_source::PageKind;
use super::stage_outcome::StageOutcome;

/// One page stage of a scan
pub trait PageParser {
    /// The record this stage writes into
    type Target;

    fn page(&self) -> PageKind;

    /// Names of the destination fields this stage overwrites
    fn owned_fields(&self) -> &'static [&'static str];

    /// Extract from an accepted document and commit the owned fields
    fn parse_document(&self, document: &Document, target: &mut Self::Target) -> ParsingResult<()>;

    /// Run the stage over raw page bytes
    fn parse(&self, raw: &[u8], target: &mut Self::Target) -> StageOutcome<()> {
        let page = self.page();
        let document = match Document::parse(page, raw) {
            Ok(document) => document,
            Err(ParsingError::MalformedInput { page, reason }) => {
                warn!("Skipping {} page: {}", page, reason);
                return StageOutcome::Skipped { page, reason };
            }
            Err(e) => return StageOutcome::Failed(e.into()),
        };

        match self.parse_document(&document, target) {
            Ok(()) => {
                debug!("Parsed {} page ({} fields)", page, self.owned_fields().len());
                StageOutcome::Completed(())
            }
            Err(e) => {
                warn!("Failed to parse {} page: {}", page, e);
                StageOutcome::Failed(e.into())
            }
        }
    }
}
