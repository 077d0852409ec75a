//! Statistics derived from a result set
//!
//! Every export format reports these four counts, computed in one pass.

use crate::results::{ExtractedItem, ItemKind};
use serde::Serialize;

/// Item counts for a finalized result set
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ResultStats {
    pub total: usize,
    pub links: usize,
    pub headings: usize,
    pub paragraphs: usize,
}

impl ResultStats {
    pub fn from_items(items: &[ExtractedItem]) -> Self {
        let mut stats = Self {
            total: items.len(),
            ..Self::default()
        };

        for item in items {
            match item.kind() {
                ItemKind::Link => stats.links += 1,
                ItemKind::Heading(_) => stats.headings += 1,
                ItemKind::Paragraph => stats.paragraphs += 1,
            }
        }

        stats
    }

    /// Labelled counts in display order, shared by all document renderers
    pub fn labelled(&self) -> [(&'static str, usize); 4] {
        [
            ("Total items", self.total),
            ("Links", self.links),
            ("Headings", self.headings),
            ("Paragraphs", self.paragraphs),
        ]
    }
}
