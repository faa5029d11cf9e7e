//! Scan orchestration
//!
//! Runs homepage → profile → contact info against one page source and
//! retries the whole scan, never a single stage.

use std::sync::Arc;
use tracing::{error, info, warn};

use crate::domain::{HomepageSummary, UserRecord};
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::page_source::{PageKind, PageSource};
use crate::infrastructure::parsing::{
    ContactInfoParser, HomepageParser, PageParser, ParsingConfig, ParsingResult, ProfileParser,
};
use crate::infrastructure::stage_outcome::{StageError, StageOutcome};
use crate::infrastructure::summary_sink::{JsonFileSink, SummarySink};

/// Result of a complete scan, after retries
#[derive(Debug)]
pub struct ScanReport {
    /// Number of attempts made, at least 1
    pub attempts: u32,
    /// Outcome of the last attempt
    pub outcome: StageOutcome<UserRecord>,
    /// Homepage summary of the last attempt, if that stage completed
    pub summary: Option<HomepageSummary>,
}

impl ScanReport {
    pub const fn is_success(&self) -> bool {
        self.outcome.is_completed()
    }

    /// The validated record, if the scan succeeded
    pub fn into_record(self) -> Option<UserRecord> {
        self.outcome.completed()
    }
}

/// Three-stage scan over a [`PageSource`]
pub struct ScanPipeline<S: PageSource> {
    source: S,
    homepage: HomepageParser,
    profile: ProfileParser,
    contact_info: ContactInfoParser,
    max_retries: u32,
}

impl<S: PageSource> ScanPipeline<S> {
    /// Pipeline persisting the homepage summary to `sink`
    pub fn new(
        parsing: &ParsingConfig,
        source: S,
        sink: Arc<dyn SummarySink + Send + Sync>,
    ) -> ParsingResult<Self> {
        Ok(Self {
            source,
            homepage: HomepageParser::new(parsing)?.with_sink(sink),
            profile: ProfileParser::new(parsing)?,
            contact_info: ContactInfoParser::new(parsing)?,
            max_retries: 0,
        })
    }

    /// Pipeline writing the summary to the configured JSON file
    pub fn from_config(config: &AppConfig, source: S) -> ParsingResult<Self> {
        let sink = Arc::new(JsonFileSink::new(&config.pipeline.summary_output_path));
        Ok(Self::new(&config.parsing, source, sink)?.with_max_retries(config.pipeline.max_retries))
    }

    pub const fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Scan until a record validates, the failure is not retryable, or attempts run out
    pub fn run(&mut self) -> ScanReport {
        let max_attempts = self.max_retries.saturating_add(1);
        let mut attempts = 0;

        loop {
            attempts += 1;
            info!("Starting scan attempt {}/{}", attempts, max_attempts);

            let (outcome, summary) = self.run_attempt();

            match &outcome {
                StageOutcome::Completed(record) => {
                    info!("Scan attempt {} produced record {}", attempts, record.id);
                }
                StageOutcome::Skipped { page, reason } => {
                    warn!("Scan attempt {} skipped at {} page: {}", attempts, page, reason);
                }
                StageOutcome::Failed(e) => {
                    warn!("Scan attempt {} failed: {}", attempts, e);
                }
            }

            if !outcome.is_retryable() || attempts >= max_attempts {
                if !outcome.is_completed() {
                    error!("Scan gave up after {} attempt(s)", attempts);
                }
                return ScanReport {
                    attempts,
                    outcome,
                    summary,
                };
            }
        }
    }

    /// One pass over the three pages with a fresh record and summary
    fn run_attempt(&mut self) -> (StageOutcome<UserRecord>, Option<HomepageSummary>) {
        let mut summary = HomepageSummary::default();
        let mut record = UserRecord::new();

        let raw = match self.fetch(PageKind::Homepage) {
            Ok(raw) => raw,
            Err(interrupted) => return (interrupted, None),
        };
        if let Err(interrupted) = self.homepage.parse(&raw, &mut summary).proceed() {
            return (interrupted, None);
        }

        let raw = match self.fetch(PageKind::Profile) {
            Ok(raw) => raw,
            Err(interrupted) => return (interrupted, Some(summary)),
        };
        if let Err(interrupted) = self.profile.parse(&raw, &mut record).proceed() {
            return (interrupted, Some(summary));
        }

        let raw = match self.fetch(PageKind::ContactInfo) {
            Ok(raw) => raw,
            Err(interrupted) => return (interrupted, Some(summary)),
        };
        let outcome = self.contact_info.parse_and_assemble(&raw, &mut record);
        (outcome, Some(summary))
    }

    fn fetch(&mut self, page: PageKind) -> Result<Vec<u8>, StageOutcome<UserRecord>> {
        self.source
            .fetch(page)
            .map_err(|e| StageOutcome::Failed(StageError::from(e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::page_source::StaticPageSource;
    use crate::infrastructure::summary_sink::MemorySink;

    fn pipeline(source: StaticPageSource) -> (ScanPipeline<StaticPageSource>, Arc<MemorySink>) {
        let sink = Arc::new(MemorySink::new());
        let pipeline = ScanPipeline::new(&ParsingConfig::default(), source, sink.clone()).unwrap();
        (pipeline, sink)
    }

    #[test]
    fn test_missing_pages_are_retried_then_reported() {
        let (pipeline, sink) = pipeline(StaticPageSource::new());
        let mut pipeline = pipeline.with_max_retries(2);

        let report = pipeline.run();

        assert_eq!(report.attempts, 3);
        assert!(matches!(report.outcome, StageOutcome::Failed(StageError::Source(_))));
        assert!(report.summary.is_none());
        assert!(sink.artifacts().is_empty());
    }

    #[test]
    fn test_skipped_homepage_stops_attempt_before_profile() {
        let source = StaticPageSource::new().with_page(PageKind::Homepage, "[1, 2, 3]");
        let (mut pipeline, _) = pipeline(source);

        let report = pipeline.run();

        assert_eq!(report.attempts, 1);
        assert!(matches!(
            report.outcome,
            StageOutcome::Skipped { page: PageKind::Homepage, .. }
        ));
    }
}
