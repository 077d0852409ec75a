//! Filter stage applied to every page's extracted items

use crate::results::ExtractedItem;
use crate::ConfigError;
use regex::{Regex, RegexBuilder};

/// Minimum-length and exclusion-pattern predicate over extracted items
#[derive(Debug, Clone, Default)]
pub struct ItemFilter {
    min_text_length: usize,
    exclude: Option<Regex>,
}

impl ItemFilter {
    /// Builds a filter; an empty `exclude_pattern` disables exclusion
    ///
    /// # Returns
    ///
    /// * `Err(ConfigError::InvalidPattern)` - The pattern is not a valid regex
    pub fn new(min_text_length: usize, exclude_pattern: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            min_text_length,
            exclude: compile_exclude_pattern(exclude_pattern)?,
        })
    }

    pub fn min_text_length(&self) -> usize {
        self.min_text_length
    }

    pub fn exclude_pattern(&self) -> Option<&str> {
        self.exclude.as_ref().map(Regex::as_str)
    }

    /// Returns true if the item survives both rules
    ///
    /// Length is counted in characters. The exclusion pattern is a
    /// case-insensitive search anywhere in the text, not a full match.
    pub fn keeps(&self, item: &ExtractedItem) -> bool {
        if item.text().chars().count() < self.min_text_length {
            return false;
        }

        match &self.exclude {
            Some(pattern) => !pattern.is_match(item.text()),
            None => true,
        }
    }

    pub fn apply(&self, items: Vec<ExtractedItem>) -> Vec<ExtractedItem> {
        items.into_iter().filter(|item| self.keeps(item)).collect()
    }
}

/// Compiles an exclusion pattern with case-insensitive semantics
pub fn compile_exclude_pattern(pattern: &str) -> Result<Option<Regex>, ConfigError> {
    if pattern.is_empty() {
        return Ok(None);
    }

    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map(Some)
        .map_err(|e| ConfigError::InvalidPattern(e.to_string()))
}

/// Parses a configured minimum length; anything non-numeric becomes 0
pub fn parse_min_text_length(raw: &str) -> usize {
    raw.trim().parse().unwrap_or(0)
}
