//! Web Scraper: structured content extraction with bounded recursive crawling
//!
//! This crate fetches a seed page, extracts links, headings and paragraphs,
//! optionally follows discovered links up to a depth bound, and exports the
//! accumulated results to several document formats.

pub mod config;
pub mod crawler;
pub mod output;
pub mod results;
pub mod url;

use thiserror::Error;

pub use crawler::FetchError;
pub use output::ExportError;

/// Main error type for scraper operations
#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("A crawl is already running on this controller")]
    CrawlInProgress,

    #[error("Crawl worker terminated abnormally: {0}")]
    Worker(String),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid exclusion pattern: {0}")]
    InvalidPattern(String),

    #[error("Depth must be at least 1, got {0}")]
    InvalidDepth(u32),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),
}

/// Result type alias for scraper operations
pub type Result<T> = std::result::Result<T, ScraperError>;

// Re-export commonly used types
pub use config::Settings;
pub use crawler::{CrawlController, CrawlRequest, CrawlStatus};
pub use output::{ExportFormat, ResultStats};
pub use results::{ExtractedItem, FinalizedResults, ItemKind, ResultSet};
pub use url::{normalize_seed, resolve_url};
