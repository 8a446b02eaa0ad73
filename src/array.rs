use std::fs::File;
use std::ops::Deref;
use std::path::Path;

use byteorder::{BigEndian, ByteOrder};
use memmap2::Mmap;

use crate::error::{Result, SaryError};

enum Backing {
    Mapped(Mmap),
    Owned(Vec<u8>),
    Empty,
}

impl Deref for Backing {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        match self {
            Backing::Mapped(m) => &m[..],
            Backing::Owned(v) => &v[..],
            Backing::Empty => &[],
        }
    }
}

/// A read-only view of an on-disk suffix array: a flat sequence of
/// fixed-width big-endian offsets into a companion [`Text`](crate::text::Text).
pub struct ArrayView {
    backing: Backing,
    width: usize,
}

impl ArrayView {
    /// Opens `path`, assuming 4-byte entries (the layout this crate's
    /// builder writes).
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_width(path, 4)
    }

    /// Opens `path`, decoding entries of `width` bytes (4 or 8).
    /// Rejects a file whose length is not a positive multiple of
    /// `width`; a zero-length array is accepted and yields an empty
    /// view (a text with no index points).
    pub fn open_with_width<P: AsRef<Path>>(path: P, width: usize) -> Result<Self> {
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

        if len == 0 {
            return Ok(ArrayView {
                backing: Backing::Empty,
                width,
            });
        }
        if len % width as u64 != 0 {
            return Err(SaryError::MalformedArray {
                path: path.to_path_buf(),
                len,
                width,
            });
        }

        let mmap = unsafe { Mmap::map(&file) }.map_err(|source| SaryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(ArrayView {
            backing: Backing::Mapped(mmap),
            width,
        })
    }

    /// Wraps already-sorted offsets in memory, encoding them as the
    /// view's native width. Used by the builder's in-process pipeline
    /// and by tests that skip the filesystem.
    pub fn from_offsets(offsets: &[u32], width: usize) -> Self {
        let mut buf = vec![0u8; offsets.len() * width];
        for (i, &off) in offsets.iter().enumerate() {
            encode_entry(&mut buf[i * width..(i + 1) * width], off, width);
        }
        ArrayView {
            backing: Backing::Owned(buf),
            width,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.backing.len() / self.width
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Decodes the text offset stored at array index `i`.
    #[inline]
    pub fn get(&self, i: usize) -> u32 {
        let start = i * self.width;
        decode_entry(&self.backing[start..start + self.width])
    }
}

fn decode_entry(bytes: &[u8]) -> u32 {
    match bytes.len() {
        4 => BigEndian::read_u32(bytes),
        8 => BigEndian::read_u64(bytes) as u32,
        n => panic!("unsupported array entry width: {n}"),
    }
}

fn encode_entry(out: &mut [u8], value: u32, width: usize) {
    match width {
        4 => BigEndian::write_u32(out, value),
        8 => BigEndian::write_u64(out, value as u64),
        n => panic!("unsupported array entry width: {n}"),
    }
}
