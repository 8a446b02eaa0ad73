use std::fs::File;
use std::ops::Deref;
use std::path::Path;

use memmap2::Mmap;

use crate::error::{Result, SaryError};

/// The backing storage for a [`Text`]: either a live mapping, or nothing
/// at all for a zero-length file (mapping an empty file is not portable).
enum Backing {
    Mapped(Mmap),
    Empty,
}

impl Deref for Backing {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        match self {
            Backing::Mapped(m) => &m[..],
            Backing::Empty => &[],
        }
    }
}

/// A read-only, memory-mapped view of a text file.
///
/// `bof`/`eof` name the two boundary offsets (0 and `size()`); every
/// other method accepts and returns plain byte offsets rather than
/// exposing a mutable internal cursor, which keeps a `Text` shareable
/// across concurrent searchers.
pub struct Text {
    backing: Backing,
}

impl Text {
    /// Maps `path` read-only. An empty file yields a zero-length text
    /// with `bof() == eof() == 0`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| SaryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let len = file
            .metadata()
            .map_err(|source| SaryError::Io {
                path: path.to_path_buf(),
                source,
            })?
            .len();

        let backing = if len == 0 {
            Backing::Empty
        } else {
            let mmap = unsafe { Mmap::map(&file) }.map_err(|source| SaryError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            Backing::Mapped(mmap)
        };

        Ok(Text { backing })
    }

    /// Wraps an in-memory byte slice without touching the filesystem.
    /// Used by the builder and by tests that do not want to round-trip
    /// through a temporary file.
    pub fn from_bytes(bytes: &[u8]) -> TextBuf {
        TextBuf {
            bytes: bytes.to_vec(),
        }
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.backing
    }

    #[inline]
    pub fn bof(&self) -> usize {
        0
    }

    #[inline]
    pub fn eof(&self) -> usize {
        self.backing.len()
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.backing.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.backing.is_empty()
    }

    /// Returns `text[pos..pos+len)`, clamped to `eof()`.
    pub fn get_region(&self, pos: usize, len: usize) -> &[u8] {
        let end = (pos + len).min(self.eof());
        let start = pos.min(end);
        &self.as_bytes()[start..end]
    }

    /// 1-origin line number containing `pos` (counts `\n` bytes strictly
    /// before `pos`, plus one). Matches `sary_text_get_lineno`.
    pub fn lineno_at(&self, pos: usize) -> usize {
        let pos = pos.min(self.eof());
        1 + self.as_bytes()[..pos].iter().filter(|&&b| b == b'\n').count()
    }

    /// Scans backward from `pos` to the start of the line containing it.
    pub fn goto_bol(&self, pos: usize) -> usize {
        let bytes = self.as_bytes();
        let mut i = pos.min(self.eof());
        while i > self.bof() && bytes[i - 1] != b'\n' {
            i -= 1;
        }
        i
    }

    /// Scans forward from `pos` to just past the next `\n`, or `eof()`.
    pub fn goto_eol(&self, pos: usize) -> usize {
        let bytes = self.as_bytes();
        let mut i = pos;
        while i < self.eof() && bytes[i] != b'\n' {
            i += 1;
        }
        if i < self.eof() {
            i + 1
        } else {
            i
        }
    }

    /// Walks `n` whole lines backward from `pos`, which must already be
    /// at a line start. `n == 0` is a no-op.
    pub fn seek_lines_backward(&self, pos: usize, n: usize) -> usize {
        let mut i = pos;
        for _ in 0..n {
            if i == self.bof() {
                break;
            }
            i = self.goto_bol(i - 1);
        }
        i
    }

    /// Walks `n` whole lines forward from `pos`, which must already be
    /// at (or past) a line end boundary for the current line.
    pub fn seek_lines_forward(&self, pos: usize, n: usize) -> usize {
        let mut i = pos;
        for _ in 0..n {
            if i >= self.eof() {
                break;
            }
            i = self.goto_eol(i);
        }
        i
    }

    /// Scans backward for the start of the nearest occurrence of `tag`
    /// at or before `pos`; returns `bof()` if none is found.
    pub fn seek_tag_backward(&self, pos: usize, tag: &[u8]) -> usize {
        if tag.is_empty() {
            return self.bof();
        }
        let bytes = self.as_bytes();
        let limit = pos.min(self.eof());
        let mut i = limit;
        loop {
            if i >= tag.len() && bytes[i - tag.len()..i].ends_with(tag) {
                return i - tag.len();
            }
            if i == self.bof() {
                return self.bof();
            }
            i -= 1;
        }
    }

    /// Scans forward for the end (one past the last byte) of the
    /// nearest occurrence of `tag` at or after `pos`; returns `eof()`
    /// if none is found.
    pub fn seek_tag_forward(&self, pos: usize, tag: &[u8]) -> usize {
        if tag.is_empty() {
            return self.eof();
        }
        let bytes = self.as_bytes();
        let mut i = pos.min(self.eof());
        while i + tag.len() <= self.eof() {
            if &bytes[i..i + tag.len()] == tag {
                return i + tag.len();
            }
            i += 1;
        }
        self.eof()
    }
}

/// An in-memory [`Text`]-alike used by the builder when the caller has
/// already loaded bytes and does not want to round-trip through a file.
pub struct TextBuf {
    bytes: Vec<u8>,
}

impl TextBuf {
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}
