//! Page snapshots handed to the parsers
//!
//! Browser automation (login, navigation, popups) lives outside this crate.
//! Whatever drives the browser only has to implement [`PageSource`] and hand
//! back the raw HTML of each page in order.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// The three pages of a scan, in the order they are visited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageKind {
    Homepage,
    Profile,
    ContactInfo,
}

impl PageKind {
    pub const ORDER: [Self; 3] = [Self::Homepage, Self::Profile, Self::ContactInfo];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Homepage => "homepage",
            Self::Profile => "profile",
            Self::ContactInfo => "contact_info",
        }
    }

    /// Snapshot file name used by [`DirectoryPageSource`]
    pub fn file_name(self) -> String {
        format!("{}.html", self.as_str())
    }
}

impl fmt::Display for PageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug)]
pub enum PageSourceError {
    #[error("No snapshot available for {page} page")]
    Missing { page: PageKind },

    #[error("Failed to read {page} page from {}: {source}", path.display())]
    Io {
        page: PageKind,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Supplies the raw HTML of each page
pub trait PageSource {
    fn fetch(&mut self, page: PageKind) -> Result<Vec<u8>, PageSourceError>;
}

/// Reads `homepage.html`, `profile.html` and `contact_info.html` from a directory
#[derive(Debug, Clone)]
pub struct DirectoryPageSource {
    root: PathBuf,
}

impl DirectoryPageSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl PageSource for DirectoryPageSource {
    fn fetch(&mut self, page: PageKind) -> Result<Vec<u8>, PageSourceError> {
        let path = self.root.join(page.file_name());
        debug!("Reading {} snapshot from {}", page, path.display());

        std::fs::read(&path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                PageSourceError::Missing { page }
            } else {
                PageSourceError::Io { page, path, source }
            }
        })
    }
}

/// In-memory snapshots
#[derive(Debug, Clone, Default)]
pub struct StaticPageSource {
    pages: HashMap<PageKind, Vec<u8>>,
}

impl StaticPageSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, page: PageKind, content: impl Into<Vec<u8>>) -> Self {
        self.pages.insert(page, content.into());
        self
    }
}

impl PageSource for StaticPageSource {
    fn fetch(&mut self, page: PageKind) -> Result<Vec<u8>, PageSourceError> {
        self.pages
            .get(&page)
            .cloned()
            .ok_or(PageSourceError::Missing { page })
    }
}
