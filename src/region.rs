use crate::text::Text;

/// A strategy for expanding a single match offset into the bounds of
/// the region that should be printed for it.
pub trait RegionKind {
    fn backward(&self, text: &Text, pos: usize) -> usize;
    fn forward(&self, text: &Text, pos: usize) -> usize;
}

/// The line containing the match (context 0/0).
pub struct LineRegion;

impl RegionKind for LineRegion {
    fn backward(&self, text: &Text, pos: usize) -> usize {
        text.goto_bol(pos)
    }

    fn forward(&self, text: &Text, pos: usize) -> usize {
        text.goto_eol(pos)
    }
}

/// `before` lines of leading context and `after` lines of trailing
/// context around the match's own line.
pub struct ContextRegion {
    pub before: usize,
    pub after: usize,
}

impl RegionKind for ContextRegion {
    fn backward(&self, text: &Text, pos: usize) -> usize {
        let bol = text.goto_bol(pos);
        text.seek_lines_backward(bol, self.before)
    }

    fn forward(&self, text: &Text, pos: usize) -> usize {
        let eol = text.goto_eol(pos);
        text.seek_lines_forward(eol, self.after)
    }
}

/// The region delimited by the nearest enclosing `start`/`end` tags.
/// Absent tags fall back to `bof()`/`eof()` respectively (see
/// DESIGN.md's Open Question resolution).
pub struct TaggedRegion {
    pub start: Vec<u8>,
    pub end: Vec<u8>,
}

impl RegionKind for TaggedRegion {
    fn backward(&self, text: &Text, pos: usize) -> usize {
        text.seek_tag_backward(pos, &self.start)
    }

    fn forward(&self, text: &Text, pos: usize) -> usize {
        text.seek_tag_forward(pos, &self.end)
    }
}

/// The `(head, tail)` byte bounds of the region around a single match
/// at text offset `pos`.
pub fn region_for(text: &Text, kind: &dyn RegionKind, pos: usize) -> (usize, usize) {
    (kind.backward(text, pos), kind.forward(text, pos))
}

/// Extends `tail` forward by consuming subsequent matches whose region
/// would start before `tail`, via the original sary tool's
/// `join_subsequent_region`. Requires matches to be visited in
/// increasing text order (i.e. after `sort_occurrences`).
///
/// `peek` returns the text offset of the next not-yet-consumed match
/// without advancing past it; `consume` advances past it. Returns the
/// joined tail.
pub fn join_subsequent(
    text: &Text,
    kind: &dyn RegionKind,
    mut tail: usize,
    mut peek: impl FnMut() -> Option<usize>,
    mut consume: impl FnMut(),
) -> usize {
    while let Some(next_pos) = peek() {
        let next_head = kind.backward(text, next_pos);
        if next_head >= tail {
            break;
        }
        consume();
        let next_tail = kind.forward(text, next_pos);
        if next_tail > tail {
            tail = next_tail;
        }
    }
    tail
}

#[cfg(test)]
mod tests {
    use super::*;
    fn text_of(bytes: &[u8]) -> Text {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.txt");
        std::fs::write(&path, bytes).unwrap();
        let text = Text::open(&path).unwrap();
        std::mem::forget(dir); // keep the backing file alive for the mmap
        text
    }

    #[test]
    fn line_region_is_just_the_line() {
        let text = text_of(b"one\ntwo\nthree\n");
        let (head, tail) = region_for(&text, &LineRegion, 5);
        assert_eq!(&text.as_bytes()[head..tail], b"two\n");
    }

    #[test]
    fn context_region_includes_neighbors() {
        let text = text_of(b"a\nb\nc\nd\ne\n");
        let kind = ContextRegion { before: 1, after: 1 };
        let (head, tail) = region_for(&text, &kind, 4); // line "c"
        assert_eq!(&text.as_bytes()[head..tail], b"b\nc\nd\n");
    }

    #[test]
    fn tagged_region_finds_enclosing_tags() {
        let text = text_of(b"<p>x</p><p>y</p>");
        let kind = TaggedRegion {
            start: b"<p>".to_vec(),
            end: b"</p>".to_vec(),
        };
        let (head, tail) = region_for(&text, &kind, 9); // 'y'
        assert_eq!(&text.as_bytes()[head..tail], b"<p>y</p>");
    }

    #[test]
    fn tagged_region_missing_tag_falls_back_to_bounds() {
        let text = text_of(b"no tags at all");
        let kind = TaggedRegion {
            start: b"<p>".to_vec(),
            end: b"</p>".to_vec(),
        };
        let (head, tail) = region_for(&text, &kind, 3);
        assert_eq!(head, text.bof());
        assert_eq!(tail, text.eof());
    }

    #[test]
    fn join_merges_overlapping_lines() {
        let text = text_of(b"xxx\n");
        // three matches of "x" all on the same line
        let offsets = [0usize, 1, 2];
        let mut idx = 1;
        let kind = LineRegion;
        let (head, tail0) = region_for(&text, &kind, offsets[0]);
        let tail = join_subsequent(
            &text,
            &kind,
            tail0,
            || offsets.get(idx).copied(),
            || idx += 1,
        );
        assert_eq!(&text.as_bytes()[head..tail], b"xxx\n");
        assert_eq!(idx, offsets.len());
    }

    #[test]
    fn join_stops_when_next_region_does_not_overlap() {
        let text = text_of(b"a\nb\nc\n");
        let offsets = [0usize, 2, 4];
        let mut idx = 1;
        let kind = LineRegion;
        let (head, tail0) = region_for(&text, &kind, offsets[0]);
        let tail = join_subsequent(
            &text,
            &kind,
            tail0,
            || offsets.get(idx).copied(),
            || idx += 1,
        );
        assert_eq!(&text.as_bytes()[head..tail], b"a\n");
        assert_eq!(idx, 1);
    }
}
