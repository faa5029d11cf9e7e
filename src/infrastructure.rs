//! Infrastructure layer for page input, parsing, normalization and artifacts
//!
//! This module provides page sources, HTML parsing stages, value
//! normalization, summary sinks, configuration and logging.

pub mod config; // Configuration file and defaults
pub mod logging; // Logging infrastructure
pub mod normalizer; // Country and phone normalization
pub mod page_source; // Raw page input
pub mod parsing; // Page parsing stages
pub mod parsing_error; // Parsing error types
pub mod stage_outcome; // Per-stage results
pub mod summary_sink; // Homepage summary artifacts

// Re-export commonly used items
pub use config::{AppConfig, ConfigManager, LoggingConfig, PipelineConfig};
pub use logging::{init_logging, init_logging_with_config};
pub use normalizer::{NormalizationError, country_to_iso2, format_phone};
pub use page_source::{DirectoryPageSource, PageKind, PageSource, PageSourceError, StaticPageSource};
pub use parsing::{
    ContactInfoParser, Document, FieldSelector, HomepageParser, PageParser, ParsingConfig,
    ParsingError, ParsingResult, ProfileParser, extract,
};
pub use stage_outcome::{StageError, StageOutcome};
pub use summary_sink::{JsonFileSink, MemorySink, SinkError, SummarySink};
