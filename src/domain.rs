//! Domain module - Core data model and record rules
//!
//! This module contains the user record aggregate, the homepage summary,
//! and the assembly/validation rules applied once all pages are parsed.
//!
//! Modern Rust module organization (Rust 2018+ style):
//! - Each module is its own file in the domain/ directory
//! - Public exports are defined here for convenience

pub mod constants;
pub mod homepage_summary;
pub mod record_assembler;
pub mod user_record;
pub mod validation;

// Re-export commonly used items for convenience
pub use constants::SENTINEL;
pub use homepage_summary::HomepageSummary;
pub use record_assembler::{AssemblyError, RecordAssembler, fill_empty};
pub use user_record::{Address, Education, ProfileMetadata, UserRecord};
pub use validation::{UserRecordValidator, ValidationError, Validator, is_e164};
