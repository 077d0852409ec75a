use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// The kind of content an item was extracted from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    /// An anchor with a resolvable href
    Link,
    /// A heading element, level 1 through 3
    Heading(u8),
    /// A non-empty paragraph
    Paragraph,
}

impl ItemKind {
    pub fn is_link(&self) -> bool {
        matches!(self, Self::Link)
    }

    pub fn is_heading(&self) -> bool {
        matches!(self, Self::Heading(_))
    }

    pub fn is_paragraph(&self) -> bool {
        matches!(self, Self::Paragraph)
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Link => f.write_str("Link"),
            Self::Heading(level) => write!(f, "Heading (h{})", level),
            Self::Paragraph => f.write_str("Paragraph"),
        }
    }
}

impl FromStr for ItemKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Link" => Ok(Self::Link),
            "Paragraph" => Ok(Self::Paragraph),
            "Heading (h1)" => Ok(Self::Heading(1)),
            "Heading (h2)" => Ok(Self::Heading(2)),
            "Heading (h3)" => Ok(Self::Heading(3)),
            other => Err(format!("unknown item type '{}'", other)),
        }
    }
}

impl Serialize for ItemKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ItemKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        label.parse().map_err(serde::de::Error::custom)
    }
}

/// One unit of scraped content
///
/// `url` is present if and only if the item is a [`ItemKind::Link`]; the
/// constructors and the deserializer both enforce this.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ItemRecord")]
pub struct ExtractedItem {
    #[serde(rename = "type")]
    kind: ItemKind,
    text: String,
    url: Option<String>,
}

/// Wire shape of an item before the url/kind invariant is checked
#[derive(Deserialize)]
struct ItemRecord {
    #[serde(rename = "type")]
    kind: ItemKind,
    text: String,
    #[serde(default)]
    url: Option<String>,
}

impl TryFrom<ItemRecord> for ExtractedItem {
    type Error = String;

    fn try_from(record: ItemRecord) -> Result<Self, Self::Error> {
        match (record.kind, record.url) {
            (ItemKind::Link, Some(url)) => Ok(Self::link(record.text, url)),
            (ItemKind::Link, None) => Err("link item is missing its url".to_string()),
            (kind, None) => Ok(Self {
                kind,
                text: record.text,
                url: None,
            }),
            (kind, Some(_)) => Err(format!("{} item must not carry a url", kind)),
        }
    }
}

impl ExtractedItem {
    pub fn link(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            kind: ItemKind::Link,
            text: text.into(),
            url: Some(url.into()),
        }
    }

    /// Creates a heading item; levels outside 1..=3 are clamped into range
    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        Self {
            kind: ItemKind::Heading(level.clamp(1, 3)),
            text: text.into(),
            url: None,
        }
    }

    pub fn paragraph(text: impl Into<String>) -> Self {
        Self {
            kind: ItemKind::Paragraph,
            text: text.into(),
            url: None,
        }
    }

    pub fn kind(&self) -> ItemKind {
        self.kind
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }
}
