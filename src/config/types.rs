use crate::crawler::parse_min_text_length;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Persisted user settings
///
/// Every key is optional in the file; missing keys take the defaults below.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Settings {
    /// Display theme, kept for the interactive front end
    pub theme: Theme,

    /// Seed URL of the most recent crawl
    pub last_url: String,

    /// Maximum crawl depth, at least 1
    pub depth: u32,

    /// Minimum item text length in characters
    #[serde(deserialize_with = "lenient_length")]
    pub min_text_length: usize,

    /// Case-insensitive exclusion regex, empty for none
    pub exclude_pattern: String,

    pub extract_links: bool,
    pub extract_headings: bool,
    pub extract_text: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            last_url: String::new(),
            depth: 1,
            min_text_length: 0,
            exclude_pattern: String::new(),
            extract_links: true,
            extract_headings: true,
            extract_text: true,
        }
    }
}

/// Color theme
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggle(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dark => f.write_str("dark"),
            Self::Light => f.write_str("light"),
        }
    }
}

/// Accepts an integer or a string; anything unusable becomes 0
fn lenient_length<'de, D>(deserializer: D) -> Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    let value = toml::Value::deserialize(deserializer)?;
    Ok(match value {
        toml::Value::Integer(n) => usize::try_from(n).unwrap_or(0),
        toml::Value::String(s) => parse_min_text_length(&s),
        _ => 0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_is_default() {
        let settings: Settings = toml::from_str("").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.depth, 1);
        assert!(settings.extract_links && settings.extract_headings && settings.extract_text);
    }

    #[test]
    fn test_kebab_case_keys() {
        let settings: Settings = toml::from_str(
            r#"
theme = "light"
last-url = "https://example.com"
depth = 3
exclude-pattern = "ads"
extract-text = false
"#,
        )
        .unwrap();

        assert_eq!(settings.theme, Theme::Light);
        assert_eq!(settings.last_url, "https://example.com");
        assert_eq!(settings.depth, 3);
        assert_eq!(settings.exclude_pattern, "ads");
        assert!(!settings.extract_text);
        assert!(settings.extract_links);
    }

    #[test]
    fn test_min_text_length_is_lenient() {
        let parse = |doc: &str| toml::from_str::<Settings>(doc).unwrap().min_text_length;
        assert_eq!(parse("min-text-length = 12"), 12);
        assert_eq!(parse("min-text-length = \"7\""), 7);
        assert_eq!(parse("min-text-length = \"abc\""), 0);
        assert_eq!(parse("min-text-length = -4"), 0);
        assert_eq!(parse("min-text-length = 2.5"), 0);
    }

    #[test]
    fn test_theme_toggle() {
        assert_eq!(Theme::Dark.toggle(), Theme::Light);
        assert_eq!(Theme::Light.toggle().toggle(), Theme::Light);
    }
}
