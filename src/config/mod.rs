//! Persisted settings for the web scraper
//!
//! This module handles loading, saving, and validating the TOML settings
//! file that remembers the last crawl's parameters between runs.
//!
//! # Example
//!
//! ```no_run
//! use web_scraper::config::load_settings;
//! use std::path::Path;
//!
//! let settings = load_settings(Path::new("settings.toml")).unwrap();
//! println!("Last depth: {}", settings.depth);
//! ```

mod parser;
mod types;
mod validation;

pub use parser::{load_settings, save_settings};
pub use types::{Settings, Theme};
pub use validation::validate as validate_settings;

use crate::crawler::CrawlRequest;

/// File name used when no settings path is given
pub const DEFAULT_SETTINGS_FILE: &str = "web_scraper_settings.toml";

impl Settings {
    /// Builds a crawl request from the stored values, seeded with `last_url`
    pub fn to_request(&self) -> crate::Result<CrawlRequest> {
        CrawlRequest::builder(self.last_url.as_str())
            .max_depth(self.depth)
            .extract_links(self.extract_links)
            .extract_headings(self.extract_headings)
            .extract_text(self.extract_text)
            .min_text_length(self.min_text_length)
            .exclude_pattern(self.exclude_pattern.as_str())
            .build()
    }
}
