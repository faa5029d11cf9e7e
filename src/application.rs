//! Application layer module
//!
//! Orchestrates the page stages into a complete scan.

pub mod scan_pipeline;

pub use scan_pipeline::{ScanPipeline, ScanReport};
