use crate::output::ResultStats;
use crate::results::ExtractedItem;
use std::sync::Arc;

/// Append-only, insertion-ordered collection of extracted items
///
/// Items are merged one page at a time; a reader can never see half of a
/// page. The crawl worker is the only writer.
#[derive(Debug, Default)]
pub struct ResultSet {
    items: Vec<ExtractedItem>,
    pages: usize,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends all surviving items of one page as a single batch
    ///
    /// Returns the number of items appended.
    pub fn append_page(&mut self, batch: Vec<ExtractedItem>) -> usize {
        let count = batch.len();
        self.items.extend(batch);
        self.pages += 1;
        count
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of page batches merged so far (empty batches included)
    pub fn pages(&self) -> usize {
        self.pages
    }

    pub fn items(&self) -> &[ExtractedItem] {
        &self.items
    }

    /// Freezes the set; no further appends are possible
    pub fn finalize(self) -> FinalizedResults {
        FinalizedResults {
            items: self.items.into(),
        }
    }
}

/// A read-only result set, safe to export and cheap to clone
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinalizedResults {
    items: Arc<[ExtractedItem]>,
}

impl FinalizedResults {
    pub fn items(&self) -> &[ExtractedItem] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ExtractedItem> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn stats(&self) -> ResultStats {
        ResultStats::from_items(&self.items)
    }
}

impl From<Vec<ExtractedItem>> for FinalizedResults {
    fn from(items: Vec<ExtractedItem>) -> Self {
        Self {
            items: items.into(),
        }
    }
}

impl<'a> IntoIterator for &'a FinalizedResults {
    type Item = &'a ExtractedItem;
    type IntoIter = std::slice::Iter<'a, ExtractedItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
