//! Export renderer trait and associated types
//!
//! This module defines the interface every export format implements, the
//! format selector, and the error type shared by all renderers.

use crate::output::stats::ResultStats;
use crate::results::FinalizedResults;
use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Column headers shared by the tabular formats
pub const TABLE_HEADERS: [&str; 3] = ["kind", "text", "url"];

/// Title used by the document formats
pub const DOCUMENT_TITLE: &str = "Web Scraper Results";

/// Errors that can occur during export
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV serialization failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Spreadsheet serialization failed: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("Failed to format output: {0}")]
    Format(String),
}

/// Result type for export operations
pub type ExportResult<T> = Result<T, ExportError>;

/// The six supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    /// Spreadsheet workbook (.xlsx)
    Xlsx,
    /// Comma-separated values with a UTF-8 byte-order mark
    Csv,
    /// Pretty-printed array of `{type, text, url}` records
    Json,
    /// Standalone HTML document
    Html,
    /// Markdown outline
    Markdown,
    /// Plain text with a grid table
    Text,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 6] = [
        Self::Xlsx,
        Self::Csv,
        Self::Json,
        Self::Html,
        Self::Markdown,
        Self::Text,
    ];

    /// Default file extension, without the dot
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Xlsx => "xlsx",
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Html => "html",
            Self::Markdown => "md",
            Self::Text => "txt",
        }
    }

    /// Guesses the format from a file name's extension
    pub fn from_path(path: &std::path::Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| ext.parse().ok())
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Xlsx => "Excel (.xlsx)",
            Self::Csv => "CSV (.csv)",
            Self::Json => "JSON (.json)",
            Self::Html => "HTML (.html)",
            Self::Markdown => "Markdown (.md)",
            Self::Text => "Text (.txt)",
        };
        f.write_str(label)
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "xlsx" | "excel" => Ok(Self::Xlsx),
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "html" | "htm" => Ok(Self::Html),
            "md" | "markdown" => Ok(Self::Markdown),
            "txt" | "text" => Ok(Self::Text),
            other => Err(format!(
                "Unknown format '{}'. Use: xlsx, csv, json, html, md, or txt",
                other
            )),
        }
    }
}

/// Values computed once per export and shared with the renderer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportContext {
    pub stats: ResultStats,
    pub generated_at: DateTime<Utc>,
}

/// Outcome of a successful export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub format: ExportFormat,
    pub stats: ResultStats,
    pub bytes_written: usize,
}

/// A serializer for one export format
///
/// Renderers only read the finalized results and produce the full output in
/// memory; writing it anywhere is the pipeline's job.
pub trait Renderer {
    fn render(&self, results: &FinalizedResults, context: &ExportContext) -> ExportResult<Vec<u8>>;
}
