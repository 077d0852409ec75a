//! Depth-first frontier for a single crawl
//!
//! Traversal uses an explicit work stack of `(url, depth_remaining)` pairs
//! instead of call-stack recursion. Children are pushed in reverse document
//! order and the visited check happens when an entry is popped, which yields
//! exactly the pre-order a recursive `visit()` would produce.

use std::collections::HashSet;
use url::Url;

/// A URL popped from the frontier that must be fetched now
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Visit {
    pub url: Url,
    pub depth_remaining: u32,
}

/// Work stack plus the visited set; owned by one crawl and dropped with it
#[derive(Debug)]
pub struct Frontier {
    stack: Vec<Visit>,
    visited: HashSet<String>,
}

impl Frontier {
    /// Creates a frontier holding only the seed
    pub fn new(seed: Url, max_depth: u32) -> Self {
        Self {
            stack: vec![Visit {
                url: seed,
                depth_remaining: max_depth,
            }],
            visited: HashSet::new(),
        }
    }

    /// Pops the next URL to fetch and marks it visited
    ///
    /// Entries that were visited after being pushed, or that have no depth
    /// left, are discarded without effect.
    pub fn next_visit(&mut self) -> Option<Visit> {
        while let Some(visit) = self.stack.pop() {
            if visit.depth_remaining < 1 || self.visited.contains(visit.url.as_str()) {
                tracing::trace!("Skipping {} (visited or out of depth)", visit.url);
                continue;
            }

            // Marked before the fetch so nothing can re-schedule it meanwhile
            self.visited.insert(visit.url.as_str().to_string());
            return Some(visit);
        }

        None
    }

    /// Schedules the links of a page, preserving document order on pop
    ///
    /// Returns the number of links scheduled.
    pub fn schedule_children(&mut self, links: Vec<Url>, depth_remaining: u32) -> usize {
        let before = self.stack.len();
        for url in links.into_iter().rev() {
            if !self.visited.contains(url.as_str()) {
                self.stack.push(Visit {
                    url,
                    depth_remaining,
                });
            }
        }
        self.stack.len() - before
    }

    pub fn is_visited(&self, url: &str) -> bool {
        self.visited.contains(url)
    }

    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    pub fn pending(&self) -> usize {
        self.stack.len()
    }
}
