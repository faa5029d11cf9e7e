//! Landing page parser
//!
//! Fills a [`HomepageSummary`] and hands it to the configured
//! [`SummarySink`] before committing.

use std::sync::Arc;
use tracing::info;

use super::PageParser;
use super::config::ParsingConfig;
use super::error::{ParsingError, ParsingResult};
use super::extractor::{Document, FieldSelector};
use crate::domain::HomepageSummary;
use crate::infrastructure::page_source::PageKind;
use crate::infrastructure::summary_sink::SummarySink;

const OWNED_FIELDS: &[&str] = &[
    "name",
    "specialization",
    "available_connects",
    "hours_per_week",
    "categories",
    "profile_completeness",
];

/// Parser for the freelancer landing page
pub struct HomepageParser {
    name: FieldSelector,
    available_connects: FieldSelector,
    hours_per_week: FieldSelector,
    specialization: FieldSelector,
    categories: FieldSelector,
    profile_completeness: FieldSelector,
    sink: Option<Arc<dyn SummarySink + Send + Sync>>,
}

impl HomepageParser {
    /// Compile the landing page selectors
    pub fn new(config: &ParsingConfig) -> ParsingResult<Self> {
        let selectors = &config.homepage_selectors;

        Ok(Self {
            name: FieldSelector::compile("name", &selectors.name)?,
            available_connects: FieldSelector::compile(
                "available_connects",
                &selectors.available_connects,
            )?,
            hours_per_week: FieldSelector::compile("hours_per_week", &selectors.hours_per_week)?,
            specialization: FieldSelector::compile("specialization", &selectors.specialization)?,
            categories: FieldSelector::compile("categories", &selectors.categories)?,
            profile_completeness: FieldSelector::compile(
                "profile_completeness",
                &selectors.profile_completeness,
            )?,
            sink: None,
        })
    }

    /// Persist every parsed summary to `sink`
    pub fn with_sink(mut self, sink: Arc<dyn SummarySink + Send + Sync>) -> Self {
        self.sink = Some(sink);
        self
    }

    fn extract_summary(&self, document: &Document) -> HomepageSummary {
        HomepageSummary {
            name: document.text_or_empty(&self.name),
            specialization: document.text_or_empty(&self.specialization),
            available_connects: document.text_or_empty(&self.available_connects),
            hours_per_week: document.text_or_empty(&self.hours_per_week),
            categories: document.all_texts(&self.categories),
            profile_completeness: document.text_or_empty(&self.profile_completeness),
        }
    }
}

impl PageParser for HomepageParser {
    type Target = HomepageSummary;

    fn page(&self) -> PageKind {
        PageKind::Homepage
    }

    fn owned_fields(&self) -> &'static [&'static str] {
        OWNED_FIELDS
    }

    fn parse_document(&self, document: &Document, target: &mut HomepageSummary) -> ParsingResult<()> {
        let mut summary = self.extract_summary(document);
        summary.fill_empty_fields();

        if let Some(sink) = &self.sink {
            sink.persist(&summary).map_err(|e| {
                ParsingError::artifact_write_failed(&sink.target(), &e.to_string())
            })?;
        }

        info!(
            "Parsed homepage for '{}' with {} categories",
            summary.name,
            summary.categories.len()
        );
        *target = summary;
        Ok(())
    }
}
