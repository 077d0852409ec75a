//! URL handling module
//!
//! This module resolves references found on a page into absolute http(s) URLs
//! and turns user-supplied seeds into crawlable URLs.

mod normalize;

pub use normalize::{is_crawlable_scheme, normalize_seed, resolve_url};
