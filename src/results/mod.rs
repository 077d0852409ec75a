//! Extracted items and the per-crawl result set
//!
//! A crawl appends whole pages of [`ExtractedItem`]s to a [`ResultSet`]; once
//! the crawl ends the set is frozen into [`FinalizedResults`], which is what
//! the export pipeline reads.

mod item;
mod result_set;

pub use item::{ExtractedItem, ItemKind};
pub use result_set::{FinalizedResults, ResultSet};
