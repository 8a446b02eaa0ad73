use std::collections::HashMap;

/// Bracket `(first, last)` indices into an array view; `last < first`
/// would be nonsensical, so an empty range is absent entirely rather
/// than represented by swapped bounds.
pub type Bracket = (u32, u32);

const MAX_ENTRIES: usize = 256;

/// A small memo of recent `(pattern, first, last)` search results.
///
/// Keyed on the full pattern bytes rather than the reference
/// implementation's single leading byte: strictly more precise, and
/// changes nothing but hit rate (see the Open Question resolution in
/// DESIGN.md). Evicts in insertion order once full, which is enough
/// for the repeated-query workloads this is meant for.
#[derive(Default)]
pub struct SearchCache {
    entries: HashMap<Vec<u8>, Bracket>,
    order: Vec<Vec<u8>>,
}

impl SearchCache {
    pub fn new() -> Self {
        SearchCache::default()
    }

    pub fn get(&self, pattern: &[u8]) -> Option<Bracket> {
        self.entries.get(pattern).copied()
    }

    pub fn add(&mut self, pattern: &[u8], bracket: Bracket) {
        if self.entries.contains_key(pattern) {
            return;
        }
        if self.entries.len() >= MAX_ENTRIES {
            if let Some(oldest) = self.order.first().cloned() {
                self.entries.remove(&oldest);
                self.order.remove(0);
            }
        }
        self.entries.insert(pattern.to_vec(), bracket);
        self.order.push(pattern.to_vec());
    }
}
