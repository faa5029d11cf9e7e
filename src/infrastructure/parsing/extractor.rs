//! Field extraction over a parsed HTML document
//!
//! A missing node is never an error: extraction yields `None` and callers
//! store an empty string. Only input that is not a document at all fails,
//! with [`ParsingError::MalformedInput`].

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};
use tracing::{debug, warn};

use super::error::{ParsingError, ParsingResult};
use crate::infrastructure::page_source::PageKind;

static MARKUP_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<[A-Za-z!/]").expect("markup tag pattern compiles"));

/// A page accepted as HTML
pub struct Document {
    page: PageKind,
    html: Html,
}

impl Document {
    /// Parse raw page bytes leniently, rejecting input that is not markup
    pub fn parse(page: PageKind, raw: &[u8]) -> ParsingResult<Self> {
        let text = std::str::from_utf8(raw)
            .map_err(|e| ParsingError::malformed_input(page, &format!("not UTF-8: {e}")))?;

        if text.trim().is_empty() {
            return Err(ParsingError::malformed_input(page, "empty input"));
        }
        if !MARKUP_TAG.is_match(text) {
            return Err(ParsingError::malformed_input(page, "no markup found"));
        }

        Ok(Self {
            page,
            html: Html::parse_document(text),
        })
    }

    pub fn page(&self) -> PageKind {
        self.page
    }

    /// First matching node with non-empty trimmed text, trying selectors in order
    pub fn text(&self, field: &FieldSelector) -> Option<String> {
        for (i, selector) in field.selectors.iter().enumerate() {
            for element in self.html.select(selector) {
                let text = element.text().collect::<String>().trim().to_string();
                if !text.is_empty() {
                    debug!("Extracted {} using selector {}: {}", field.name, i, text);
                    return Some(text);
                }
            }
        }

        debug!(
            "Failed to extract {} using {} selectors",
            field.name,
            field.selectors.len()
        );
        None
    }

    /// Same as [`Document::text`] with absence mapped to an empty string
    pub fn text_or_empty(&self, field: &FieldSelector) -> String {
        self.text(field).unwrap_or_default()
    }

    /// Trimmed value of `attribute` on the first matching node that carries it
    pub fn attr(&self, field: &FieldSelector, attribute: &str) -> Option<String> {
        field
            .selectors
            .iter()
            .flat_map(|selector| self.html.select(selector))
            .find_map(|element| element.value().attr(attribute))
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }

    /// Every matching node under the first selector that matches anything
    pub fn all_texts(&self, field: &FieldSelector) -> Vec<String> {
        for selector in &field.selectors {
            let mut matched = false;
            let texts: Vec<String> = self
                .html
                .select(selector)
                .inspect(|_| matched = true)
                .map(|element| element.text().collect::<String>().trim().to_string())
                .filter(|text| !text.is_empty())
                .collect();

            if matched {
                debug!("Extracted {} {} values", texts.len(), field.name);
                return texts;
            }
        }
        Vec::new()
    }
}

/// A named field with its compiled fallback selectors
#[derive(Debug, Clone)]
pub struct FieldSelector {
    name: String,
    selectors: Vec<Selector>,
}

impl FieldSelector {
    /// Compile selector strings, skipping bad ones unless none compile
    pub fn compile(name: &str, selector_strings: &[String]) -> ParsingResult<Self> {
        let mut selectors = Vec::new();
        let mut errors = Vec::new();

        for selector_str in selector_strings {
            match Selector::parse(selector_str) {
                Ok(selector) => selectors.push(selector),
                Err(e) => {
                    warn!("Failed to compile selector '{}' for {}: {}", selector_str, name, e);
                    errors.push(format!("'{selector_str}': {e}"));
                }
            }
        }

        if selectors.is_empty() {
            return Err(ParsingError::invalid_selector(
                name,
                &selector_strings.join(", "),
                &format!(
                    "no valid selectors compiled from {} attempts: {}",
                    selector_strings.len(),
                    errors.join(", ")
                ),
            ));
        }

        Ok(Self {
            name: name.to_string(),
            selectors,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// One-off extraction of the first matching node's trimmed text
pub fn extract(document: &Document, selector: &str) -> ParsingResult<Option<String>> {
    let field = FieldSelector::compile(selector, &[selector.to_string()])?;
    Ok(document.text(&field))
}
