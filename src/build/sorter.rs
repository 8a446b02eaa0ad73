use std::io::{self, Write};

use byteorder::{BigEndian, WriteBytesExt};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::sais;

/// Orders assigned index points by the suffixes they denote and writes
/// them out as big-endian entries.
pub struct Sorter;

impl Sorter {
    /// Sorts `offsets` (as produced by an [`IndexPointStrategy`]) into
    /// suffix order.
    ///
    /// When `offsets` is exactly every position `0..text.len()` in
    /// ascending order (the default byte strategy), this delegates to
    /// the induced-sorting construction for `O(n)` construction.
    /// Otherwise it falls back to directly comparing the suffixes the
    /// given offsets denote, which is correct for any subset but without
    /// the induced-sorting asymptotics.
    ///
    /// [`IndexPointStrategy`]: crate::build::ipoint::IndexPointStrategy
    pub fn sort(text: &[u8], offsets: &[u32]) -> Vec<u32> {
        if is_dense_byte_range(text, offsets) {
            // `sais::construct` always places the empty suffix (offset
            // `text.len()`) at `sa[0]`, since it is the unique smallest
            // suffix by convention; index points never include it, so
            // it is dropped from the result.
            let mut sa = vec![0u32; text.len() + 1];
            sais::construct(text, &mut sa);
            sa[1..].to_vec()
        } else {
            Self::sort_sparse(text, offsets)
        }
    }

    #[cfg(feature = "parallel")]
    fn sort_sparse(text: &[u8], offsets: &[u32]) -> Vec<u32> {
        let mut sorted = offsets.to_vec();
        sorted.par_sort_unstable_by(|&a, &b| text[a as usize..].cmp(&text[b as usize..]));
        sorted
    }

    #[cfg(not(feature = "parallel"))]
    fn sort_sparse(text: &[u8], offsets: &[u32]) -> Vec<u32> {
        let mut sorted = offsets.to_vec();
        sorted.sort_unstable_by(|&a, &b| text[a as usize..].cmp(&text[b as usize..]));
        sorted
    }

    /// Encodes `offsets` as 4-byte big-endian entries and writes them
    /// to `writer`, matching the on-disk array layout.
    pub fn write<W: Write>(offsets: &[u32], mut writer: W) -> io::Result<()> {
        for &offset in offsets {
            writer.write_u32::<BigEndian>(offset)?;
        }
        Ok(())
    }
}

fn is_dense_byte_range(text: &[u8], offsets: &[u32]) -> bool {
    offsets.len() == text.len() && offsets.iter().enumerate().all(|(i, &o)| o as usize == i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::ipoint::{Bytes, IndexPointStrategy, Lines};

    #[test]
    fn dense_path_matches_sparse_path() {
        let text = b"abracadabra";
        let dense = Sorter::sort(text, &Bytes.scan(text));

        let mut expected = dense.clone();
        expected.sort_unstable_by(|&a, &b| text[a as usize..].cmp(&text[b as usize..]));
        assert_eq!(dense, expected);
    }

    #[test]
    fn sparse_path_sorts_a_subset_correctly() {
        let text = b"banana\nbandana\n";
        let offsets = Lines.scan(text);
        let sorted = Sorter::sort(text, &offsets);

        let mut expected = offsets.clone();
        expected.sort_unstable_by(|&a, &b| text[a as usize..].cmp(&text[b as usize..]));
        assert_eq!(sorted, expected);
    }

    #[test]
    fn write_round_trips_through_big_endian() {
        let offsets = [1u32, 256, 65536];
        let mut buf = Vec::new();
        Sorter::write(&offsets, &mut buf).unwrap();
        assert_eq!(buf.len(), 12);
        assert_eq!(&buf[0..4], &[0, 0, 0, 1]);
        assert_eq!(&buf[4..8], &[0, 0, 1, 0]);
    }
}
