use std::path::Path;

use crate::array::ArrayView;
use crate::cache::SearchCache;
use crate::comparator::Pattern;
use crate::error::Result;
use crate::region::{region_for, ContextRegion, LineRegion, RegionKind, TaggedRegion};
use crate::search::{bracket, expand_byte, is_single_folding};
use crate::text::Text;

/// A live suffix-array session over one text file and its companion
/// array file.
///
/// Mirrors the lifecycle of the reference `Saryer`: construction maps
/// both files, `search`/`isearch`/`icase_search` narrow a match range,
/// and the region-extraction methods walk that range producing output.
/// A `Searcher` is not `Sync` for mutation (all of its search state is
/// plain fields, no locking) but distinct `Searcher`s over the same
/// files are independent and may be used from different threads.
pub struct Searcher {
    text: Text,
    array: ArrayView,
    range: Option<(usize, usize)>,
    cursor: usize,
    skip: usize,
    is_sorted: bool,
    reordered: Option<Vec<u32>>,
    cache: Option<SearchCache>,
}

impl Searcher {
    /// Opens `text_path` and `array_path`, both memory-mapped read-only.
    pub fn open<P: AsRef<Path>>(text_path: P, array_path: P) -> Result<Self> {
        let text = Text::open(text_path)?;
        let array = ArrayView::open(array_path)?;
        Ok(Searcher {
            text,
            array,
            range: None,
            cursor: 0,
            skip: 0,
            is_sorted: false,
            reordered: None,
            cache: None,
        })
    }

    /// Builds a searcher directly from an in-memory text and array,
    /// skipping the filesystem. Used by the builder pipeline and tests.
    pub fn from_parts(text: Text, array: ArrayView) -> Self {
        Searcher {
            text,
            array,
            range: None,
            cursor: 0,
            skip: 0,
            is_sorted: false,
            reordered: None,
            cache: None,
        }
    }

    /// Enables the search-result cache (disabled by default).
    pub fn enable_cache(&mut self) {
        self.cache.get_or_insert_with(SearchCache::new);
    }

    #[inline]
    pub fn text(&self) -> &Text {
        &self.text
    }

    #[inline]
    pub fn is_sorted(&self) -> bool {
        self.is_sorted
    }

    fn reset(&mut self) {
        self.range = None;
        self.cursor = 0;
        self.skip = 0;
        self.is_sorted = false;
        self.reordered = None;
    }

    #[inline]
    fn array_len(&self) -> usize {
        match &self.reordered {
            Some(v) => v.len(),
            None => self.array.len(),
        }
    }

    #[inline]
    fn array_get(&self, i: usize) -> u32 {
        match &self.reordered {
            Some(v) => v[i],
            None => self.array.get(i),
        }
    }

    /// Normal search: resets state and brackets `pattern` over the
    /// whole array.
    pub fn search(&mut self, pattern: &[u8]) -> bool {
        if let Some(cache) = &self.cache {
            if let Some((first, last)) = cache.get(pattern) {
                self.reset();
                self.range = Some((first as usize, last as usize));
                self.cursor = first as usize;
                return true;
            }
        }

        self.reset();
        let pat = Pattern::new(pattern);
        let found = bracket(self.text.as_bytes(), &self.array, &pat, 0, self.array.len());
        if let Some((first, last)) = found {
            self.range = Some((first, last));
            self.cursor = first;
            if let Some(cache) = &mut self.cache {
                cache.add(pattern, (first as u32, last as u32));
            }
            true
        } else {
            false
        }
    }

    /// Incremental search: refines the previous range using `pattern`,
    /// whose first `self.skip` bytes are assumed already verified. On
    /// the very first call (`skip == 0`) this behaves like `search`.
    /// Must not be called after `sort_occurrences`.
    pub fn isearch(&mut self, pattern: &[u8]) -> bool {
        debug_assert!(!self.is_sorted, "isearch after sort_occurrences is unsound");
        debug_assert!(pattern.len() >= self.skip, "isearch pattern shorter than skip");

        let (lo, hi) = match self.range {
            Some((first, last)) if self.skip > 0 => (first, last + 1),
            _ => (0, self.array.len()),
        };

        let mut pat = Pattern::new(pattern);
        pat.skip = self.skip;
        let found = bracket(self.text.as_bytes(), &self.array, &pat, lo, hi);
        // skip advances to the full pattern length whether or not this
        // call matched, mirroring saryer_isearch: a failed call still
        // records how much of the pattern was attempted, and leaves the
        // previous range untouched rather than clearing it.
        self.skip = pattern.len();
        if let Some((first, last)) = found {
            self.range = Some((first, last));
            self.cursor = first;
            true
        } else {
            false
        }
    }

    /// Clears the incremental-search skip so the next `isearch` call
    /// starts a fresh walk of the array.
    pub fn isearch_reset(&mut self) {
        self.skip = 0;
    }

    /// Case-insensitive search (ASCII only): finds every occurrence
    /// matching `pattern` under `A-Z`/`a-z` folding, via recursive
    /// expansion driven by `isearch`.
    pub fn icase_search(&mut self, pattern: &[u8]) -> bool {
        self.reset();
        if pattern.is_empty() {
            return self.search(pattern);
        }

        let mut collected: Vec<u32> = Vec::new();
        let mut scratch = vec![0u8; pattern.len()];
        self.icase_expand(pattern, 0, &mut scratch, &mut collected);

        if collected.is_empty() {
            self.range = None;
            false
        } else {
            // concatenation order (upper folding before lower, per
            // expand_byte), not text order; call sort_occurrences for that.
            let first = 0;
            let last = collected.len() - 1;
            self.reordered = Some(collected);
            self.range = Some((first, last));
            self.cursor = first;
            true
        }
    }

    fn icase_expand(&mut self, pattern: &[u8], step: usize, scratch: &mut [u8], out: &mut Vec<u32>) {
        if step == pattern.len() {
            if let Some((first, last)) = self.range {
                for i in first..=last {
                    out.push(self.array_get(i));
                }
            }
            return;
        }

        let saved_range = self.range;
        let saved_skip = self.skip;
        let [hi, lo] = expand_byte(pattern[step]);
        let candidates = if is_single_folding(pattern[step]) {
            &[hi][..]
        } else {
            &[hi, lo][..]
        };

        for &c in candidates {
            scratch[step] = c;
            self.range = saved_range;
            self.skip = saved_skip;
            if self.isearch(&scratch[..=step]) {
                self.icase_expand(pattern, step + 1, scratch, out);
            }
        }
        self.range = saved_range;
        self.skip = saved_skip;
    }

    /// Number of matches in the current range (0 if no search has
    /// succeeded, or the last one failed).
    pub fn count_occurrences(&self) -> usize {
        match self.range {
            Some((first, last)) => last - first + 1,
            None => 0,
        }
    }

    /// Reorders the current match range by ascending text offset, so
    /// region extraction can join overlapping output. Idempotent: a
    /// second call is a no-op.
    pub fn sort_occurrences(&mut self) {
        if self.is_sorted {
            return;
        }
        let Some((first, last)) = self.range else {
            self.is_sorted = true;
            return;
        };

        if self.reordered.is_none() {
            let mut buf = Vec::with_capacity(last - first + 1);
            for i in first..=last {
                buf.push(self.array_get(i));
            }
            self.reordered = Some(buf);
        } else if let Some(buf) = &mut self.reordered {
            buf.truncate(last + 1);
            buf.drain(..first);
        }

        if let Some(buf) = &mut self.reordered {
            buf.sort_unstable();
        }
        self.range = Some((0, self.array_len().saturating_sub(1)));
        self.cursor = 0;
        self.is_sorted = true;
    }

    /// Next raw match offset, or `None` once the range is exhausted.
    pub fn next_offset(&mut self) -> Option<u32> {
        let (_, last) = self.range?;
        if self.cursor > last {
            return None;
        }
        let offset = self.array_get(self.cursor);
        self.cursor += 1;
        Some(offset)
    }

    /// Offset of the next match without consuming it.
    pub fn peek_next_offset(&self) -> Option<u32> {
        let (_, last) = self.range?;
        if self.cursor > last {
            return None;
        }
        Some(self.array_get(self.cursor))
    }

    fn next_region_with(&mut self, kind: &dyn RegionKind) -> Option<(usize, usize)> {
        let offset = self.next_offset()? as usize;
        let (head, tail0) = region_for(&self.text, kind, offset);
        if !self.is_sorted {
            return Some((head, tail0));
        }

        let mut tail = tail0;
        loop {
            let Some(next_offset) = self.peek_next_offset() else {
                break;
            };
            let next_head = kind.backward(&self.text, next_offset as usize);
            if next_head >= tail {
                break;
            }
            self.next_offset();
            let next_tail = kind.forward(&self.text, next_offset as usize);
            if next_tail > tail {
                tail = next_tail;
            }
        }
        Some((head, tail))
    }

    /// Next match's containing line, as a `(head, tail)` byte range
    /// into the mapped text.
    pub fn next_line(&mut self) -> Option<(usize, usize)> {
        self.next_region_with(&LineRegion)
    }

    /// Next match's context region: `before` lines above, `after`
    /// lines below its own line.
    pub fn next_context(&mut self, before: usize, after: usize) -> Option<(usize, usize)> {
        let kind = ContextRegion { before, after };
        self.next_region_with(&kind)
    }

    /// Next match's tagged region, delimited by the nearest enclosing
    /// `start`/`end` byte tags.
    pub fn next_tagged_region(&mut self, start: &[u8], end: &[u8]) -> Option<(usize, usize)> {
        let kind = TaggedRegion {
            start: start.to_vec(),
            end: end.to_vec(),
        };
        self.next_region_with(&kind)
    }

    /// Copies the bytes of `(head, tail)` into a new buffer.
    pub fn slice_region(&self, range: (usize, usize)) -> Vec<u8> {
        self.text.as_bytes()[range.0..range.1].to_vec()
    }
}
