//! Profile Scan - freelancer profile extraction
//!
//! Turns HTML snapshots of a freelancer's homepage, profile and contact info
//! pages into a validated user record plus a homepage summary artifact.

// Module declarations
pub mod application;
pub mod domain;
pub mod infrastructure;

// Re-export the types most callers need
pub use application::{ScanPipeline, ScanReport};
pub use domain::{HomepageSummary, UserRecord};
pub use infrastructure::{
    AppConfig, ConfigManager, DirectoryPageSource, PageKind, PageSource, StageOutcome,
    StaticPageSource,
};
