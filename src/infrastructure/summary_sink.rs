//! Destinations for the homepage summary artifact

use std::path::{Path, PathBuf};
use std::sync::Mutex;
use thiserror::Error;
use tracing::info;

use crate::domain::HomepageSummary;

#[derive(Error, Debug)]
pub enum SinkError {
    #[error("Failed to serialize summary: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Sink '{target}' is unusable after a panic while it was locked")]
    Poisoned { target: String },
}

/// Persists a populated [`HomepageSummary`]
pub trait SummarySink {
    /// Human-readable name of the destination, used in logs and errors
    fn target(&self) -> String;

    fn persist(&self, summary: &HomepageSummary) -> Result<(), SinkError>;
}

/// Writes the summary as 2-space indented UTF-8 JSON
#[derive(Debug, Clone)]
pub struct JsonFileSink {
    path: PathBuf,
}

impl JsonFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SummarySink for JsonFileSink {
    fn target(&self) -> String {
        self.path.display().to_string()
    }

    fn persist(&self, summary: &HomepageSummary) -> Result<(), SinkError> {
        let content = serde_json::to_string_pretty(summary)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| SinkError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        std::fs::write(&self.path, content).map_err(|source| SinkError::Io {
            path: self.path.clone(),
            source,
        })?;

        info!("Saved homepage summary to: {:?}", self.path);
        Ok(())
    }
}

/// Keeps serialized summaries in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    artifacts: Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every artifact persisted so far, oldest first
    pub fn artifacts(&self) -> Vec<String> {
        self.artifacts
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

impl SummarySink for MemorySink {
    fn target(&self) -> String {
        "memory".to_string()
    }

    fn persist(&self, summary: &HomepageSummary) -> Result<(), SinkError> {
        let content = serde_json::to_string_pretty(summary)?;
        let mut guard = self.artifacts.lock().map_err(|_| SinkError::Poisoned {
            target: self.target(),
        })?;
        guard.push(content);
        Ok(())
    }
}
