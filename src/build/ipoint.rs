/// A pluggable strategy for choosing which text offsets become index
/// points, mirroring `sary_builder_set_ipoint_func`'s pluggability.
/// Offsets are returned in ascending text order; the builder does not
/// require (or assume) any particular order be preserved beyond that.
pub trait IndexPointStrategy {
    fn scan(&self, text: &[u8]) -> Vec<u32>;
}

/// Every byte offset `[0, n)` is an index point; the end-of-file
/// position itself is never one (there is no suffix to search there).
/// The reference implementation's default (`sary_ipoint_bytestream`),
/// and the only strategy for which the builder's dense fast-path
/// construction applies.
pub struct Bytes;

impl IndexPointStrategy for Bytes {
    fn scan(&self, text: &[u8]) -> Vec<u32> {
        (0..text.len() as u32).collect()
    }
}

/// The first byte of each whitespace-delimited word.
pub struct Words;

impl IndexPointStrategy for Words {
    fn scan(&self, text: &[u8]) -> Vec<u32> {
        let mut points = Vec::new();
        let mut in_word = false;
        for (i, &b) in text.iter().enumerate() {
            let is_space = b.is_ascii_whitespace();
            if !is_space && !in_word {
                points.push(i as u32);
            }
            in_word = !is_space;
        }
        points
    }
}

/// The first byte of every line (offset 0, and every position
/// immediately after a `\n`, excluding a trailing empty line after a
/// final newline).
pub struct Lines;

impl IndexPointStrategy for Lines {
    fn scan(&self, text: &[u8]) -> Vec<u32> {
        if text.is_empty() {
            return Vec::new();
        }
        let mut points = vec![0u32];
        for (i, &b) in text.iter().enumerate() {
            if b == b'\n' && i + 1 < text.len() {
                points.push((i + 1) as u32);
            }
        }
        points
    }
}

/// The first byte following each run of two or more consecutive
/// newlines, plus offset 0.
pub struct Paragraphs;

impl IndexPointStrategy for Paragraphs {
    fn scan(&self, text: &[u8]) -> Vec<u32> {
        if text.is_empty() {
            return Vec::new();
        }
        let mut points = vec![0u32];
        let mut newline_run = 0usize;
        for (i, &b) in text.iter().enumerate() {
            if b == b'\n' {
                newline_run += 1;
            } else {
                if newline_run >= 2 {
                    points.push(i as u32);
                }
                newline_run = 0;
            }
        }
        points
    }
}
